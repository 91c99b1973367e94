use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;

use crate::db::{DocumentStore, Filter};
use crate::entities::dao::PortfolioDocument;
use crate::entities::PortfolioItem;
use crate::error::{FieldViolation, ServerError};
use crate::schemas::portfolio::{PortfolioItemCreate, PortfolioQuery};
use crate::schemas::ValidatedJson;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(create_portfolio_item, list_portfolio_items),
    components(schemas(PortfolioItemCreate, PortfolioItem, FieldViolation))
)]
pub struct PortfolioApi;

/// Register portfolio gallery routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/portfolio",
        post(create_portfolio_item).get(list_portfolio_items),
    )
}

#[utoipa::path(
    post,
    path = "/api/portfolio",
    tag = "portfolio",
    request_body = PortfolioItemCreate,
    responses(
        (status = 200, description = "Item stored", body = PortfolioItem),
        (status = 422, description = "Validation failed", body = Vec<FieldViolation>),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn create_portfolio_item(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<PortfolioItemCreate>,
) -> Result<Json<PortfolioItem>, ServerError> {
    let item = PortfolioItem::new(input);
    state
        .store
        .insert(PortfolioItem::COLLECTION, &item.to_document())
        .await?;
    info!(item_id = %item.id, category = %item.category, "portfolio item stored");
    Ok(Json(item))
}

/// List portfolio items, optionally only those in one category.
#[utoipa::path(
    get,
    path = "/api/portfolio",
    tag = "portfolio",
    params(PortfolioQuery),
    responses(
        (status = 200, description = "Items", body = Vec<PortfolioItem>),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn list_portfolio_items(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<PortfolioItem>>, ServerError> {
    let Query(pairs) = query?;
    let query = PortfolioQuery::from_pairs(pairs);
    let filter = match query.category() {
        Some(category) => Filter::all().eq("category", category),
        None => Filter::all(),
    };
    let documents: Vec<PortfolioDocument> = state
        .store
        .find(PortfolioItem::COLLECTION, &filter)
        .await?;
    let items = documents
        .into_iter()
        .map(PortfolioItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(items))
}
