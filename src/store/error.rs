use thiserror::Error;

use crate::configuration::UnknownBackend;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    UnknownBackend(#[from] UnknownBackend),
    #[error("failed to initialize {backend} store at {identifier}: {reason}")]
    Init {
        backend: &'static str,
        identifier: String,
        reason: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0} store does not support raw byte access")]
    Unsupported(&'static str),
    #[error("store connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn init(
        backend: &'static str,
        identifier: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        StoreError::Init {
            backend,
            identifier: identifier.into(),
            reason: reason.to_string(),
        }
    }

    /// True when SQLite rejected a statement because of a table constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
