use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;

use crate::db::{DocumentStore, Filter};
use crate::entities::dao::ContactDocument;
use crate::entities::ContactSubmission;
use crate::error::{FieldViolation, ServerError};
use crate::schemas::contact::ContactSubmissionCreate;
use crate::schemas::ValidatedJson;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(create_contact_submission, list_contact_submissions),
    components(schemas(ContactSubmissionCreate, ContactSubmission, FieldViolation))
)]
pub struct ContactApi;

/// Register contact-form routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/contact",
        post(create_contact_submission).get(list_contact_submissions),
    )
}

/// Store a contact-form submission and notify the site owner.
///
/// The notification email is sent in the background; its outcome never
/// changes this response.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactSubmissionCreate,
    responses(
        (status = 200, description = "Submission stored", body = ContactSubmission),
        (status = 422, description = "Validation failed", body = Vec<FieldViolation>),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn create_contact_submission(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<ContactSubmissionCreate>,
) -> Result<Json<ContactSubmission>, ServerError> {
    let submission = ContactSubmission::new(input);
    state
        .store
        .insert(ContactSubmission::COLLECTION, &submission.to_document())
        .await?;
    info!(submission_id = %submission.id, service = %submission.service, "contact submission stored");

    if let Some(notifier) = &state.notifier {
        let _ = notifier.dispatch(submission.clone());
    }

    Ok(Json(submission))
}

/// List stored contact submissions in the order they arrived.
#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "contact",
    responses(
        (status = 200, description = "Submissions", body = Vec<ContactSubmission>),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn list_contact_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactSubmission>>, ServerError> {
    let documents: Vec<ContactDocument> = state
        .store
        .find(ContactSubmission::COLLECTION, &Filter::all())
        .await?;
    let submissions = documents
        .into_iter()
        .map(ContactSubmission::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(submissions))
}
