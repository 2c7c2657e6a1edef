//! Error taxonomy shared by all layers
//!
//! Three failure classes cover the whole service: a missing character or
//! embedded record, a request the server refuses to store, and a fault in
//! the persistence layer or filesystem. Best-effort avatar cleanup never
//! produces any of these; its failures are logged and swallowed at the
//! call site.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The addressed character or embedded record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request carried data the server refuses to accept
    #[error("validation failed: {0}")]
    Validation(String),

    /// The database or filesystem failed during a primary write or read
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("embedded column codec: {err}"))
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
