use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::StoreError;
use crate::entities::dao::{self, PortfolioDocument};
use crate::schemas::portfolio::PortfolioItemCreate;

/// A gallery entry shown on the portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    /// Free-form grouping key, used by the `category` filter.
    pub category: String,
    pub image_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PortfolioItem {
    pub const COLLECTION: &'static str = "portfolio_items";

    pub fn new(input: PortfolioItemCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            category: input.category,
            image_url: input.image_url,
            description: input.description,
            created_at: Utc::now(),
        }
    }

    pub fn to_document(&self) -> PortfolioDocument {
        PortfolioDocument {
            schema_version: dao::SCHEMA_VERSION,
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            description: self.description.clone(),
            created_at: dao::format_timestamp(&self.created_at),
        }
    }
}

impl TryFrom<PortfolioDocument> for PortfolioItem {
    type Error = StoreError;

    fn try_from(doc: PortfolioDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: dao::parse_timestamp(&doc.created_at)?,
            id: doc.id,
            title: doc.title,
            category: doc.category,
            image_url: doc.image_url,
            description: doc.description,
        })
    }
}
