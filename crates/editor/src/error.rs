//! Session error type

use shared::{EntryError, ValidationErrors};

use crate::store::PersistenceError;

/// Errors surfaced by programmatic session calls.
///
/// UI-driven calls (`*_or_ignore`) swallow `Entry` errors instead.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Stale index or unknown id
    #[error(transparent)]
    Entry(#[from] EntryError),
    /// Edit or save rejected by validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Store failed; the in-memory template is untouched and can be saved again
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl SessionError {
    /// Whether retrying the same call can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionError::Persistence(e) if e.is_retryable())
    }
}
