//! Domain entities and their storage documents.
//!
//! Entities carry structured `DateTime<Utc>` values and are what the API
//! returns. The [`dao`] documents are what the store persists; conversion in
//! both directions lives next to each entity.

pub mod contact;
pub mod dao;
pub mod portfolio;

pub use contact::ContactSubmission;
pub use portfolio::PortfolioItem;
