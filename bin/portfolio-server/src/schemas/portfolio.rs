use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Body of `POST /api/portfolio`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PortfolioItemCreate {
    pub title: String,
    pub category: String,
    pub image_url: String,
    pub description: Option<String>,
}

/// Query string of `GET /api/portfolio`.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PortfolioQuery {
    /// Exact-match category filter; absent or empty lists everything.
    pub category: Option<String>,
}

impl PortfolioQuery {
    /// Build from raw query pairs. A repeated `category` keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let category = pairs
            .into_iter()
            .filter(|(key, _)| key == "category")
            .map(|(_, value)| value)
            .last();
        Self { category }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}
