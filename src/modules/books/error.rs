use serde::Serialize;
use thiserror::Error;

/// Failures reported by the book business layer.
///
/// Serializes as a tagged object (`{"kind": "not_found", "id": 7}`), which
/// is what HTTP clients receive for a 500.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookError {
    #[error("book {id} not found")]
    NotFound { id: i64 },

    #[error("book id space exhausted")]
    IdExhausted,

    #[error("storage failure: {message}")]
    Storage { message: String },
}

impl BookError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

pub type BookResult<T> = Result<T, BookError>;
