//! Request schemas and the validating JSON extractor.

pub mod contact;
pub mod portfolio;

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ServerError;

/// Like [`axum::Json`], but also runs [`Validate`] on the decoded body.
///
/// Both decode failures and validation failures are rejected with
/// [`ServerError::Validation`], so a bad request never reaches the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
