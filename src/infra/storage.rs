//! Opaque storage fault.
//!
//! Every repository method fails with `StorageError`: a free-text detail
//! message that is the sole input to the classifier. Keeping the fault
//! opaque here lets the classifier own all knowledge of engine phrasing.

use thiserror::Error;

/// A storage-layer failure carrying free-text detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct StorageError {
    detail: String,
}

impl StorageError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// The raw fault text fed to the classifier.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<sea_orm::DbErr> for StorageError {
    fn from(err: sea_orm::DbErr) -> Self {
        // The Display form of DbErr drops the engine's DETAIL line, which is
        // where PostgreSQL reports the offending column/value pair. The Debug
        // form keeps it, and the classifier scans that text.
        Self::new(format!("{err:?}"))
    }
}

/// Result alias for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;
