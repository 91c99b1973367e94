use serde::{Deserialize, Serialize};

/// A document in the `contact_submissions` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDocument {
    #[serde(default = "super::schema_version")]
    pub schema_version: u32,
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub service: String,
    pub message: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
}
