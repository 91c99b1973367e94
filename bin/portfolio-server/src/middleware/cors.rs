use crate::state::AppState;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build the CORS layer from `PORTFOLIO_CORS_ORIGINS`.
///
/// Credentials are always allowed. Browsers refuse a literal `*` alongside
/// credentials, so "any" is expressed by mirroring the request instead.
pub fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    match parse_origins(state.config.cors_allowed_origins.as_deref()) {
        Some(origins) => layer.allow_origin(AllowOrigin::list(origins)),
        // Wildcard – fine for a public portfolio; set PORTFOLIO_CORS_ORIGINS to restrict.
        None => layer.allow_origin(AllowOrigin::mirror_request()),
    }
}

/// `None` means any origin.
fn parse_origins(raw: Option<&str>) -> Option<Vec<HeaderValue>> {
    let raw = raw?;
    let entries: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    if entries.iter().any(|s| *s == "*") {
        return None;
    }
    let origins: Vec<HeaderValue> = entries.iter().filter_map(|s| s.parse().ok()).collect();
    if origins.is_empty() { None } else { Some(origins) }
}
