use crate::routes::{contact, health, portfolio};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "portfolio-server",
    description = "Contact form and portfolio gallery API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::RootApi::openapi());
    root.merge(contact::ContactApi::openapi());
    root.merge(portfolio::PortfolioApi::openapi());
    root
}
