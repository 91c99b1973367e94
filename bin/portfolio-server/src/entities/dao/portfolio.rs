use serde::{Deserialize, Serialize};

/// A document in the `portfolio_items` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioDocument {
    #[serde(default = "super::schema_version")]
    pub schema_version: u32,
    pub id: String,
    pub title: String,
    pub category: String,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339 creation time.
    pub created_at: String,
}
