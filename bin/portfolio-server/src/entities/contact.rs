use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::StoreError;
use crate::entities::dao::{self, ContactDocument};
use crate::schemas::contact::ContactSubmissionCreate;

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ContactSubmission {
    pub const COLLECTION: &'static str = "contact_submissions";

    /// Populate a new submission with a fresh id and the current time.
    ///
    /// `input` is expected to have passed validation, so every required
    /// field is present.
    pub fn new(input: ContactSubmissionCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            phone: input.phone,
            service: input.service.unwrap_or_default(),
            message: input.message.unwrap_or_default(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_document(&self) -> ContactDocument {
        ContactDocument {
            schema_version: dao::SCHEMA_VERSION,
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            service: self.service.clone(),
            message: self.message.clone(),
            timestamp: dao::format_timestamp(&self.timestamp),
        }
    }
}

impl TryFrom<ContactDocument> for ContactSubmission {
    type Error = StoreError;

    fn try_from(doc: ContactDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            timestamp: dao::parse_timestamp(&doc.timestamp)?,
            id: doc.id,
            name: doc.name,
            email: doc.email,
            phone: doc.phone,
            service: doc.service,
            message: doc.message,
        })
    }
}
