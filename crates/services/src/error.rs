//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use study_core::model::QuestionRecordError;

/// Errors emitted by `SubjectStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubjectStoreError {
    /// The in-memory change was applied but could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionLog`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionLogError {
    #[error(transparent)]
    InvalidInput(#[from] QuestionRecordError),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {var} value: {raw}")]
    Invalid { var: &'static str, raw: String },
}

/// Errors emitted while bootstrapping the tracker.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise tracing: {0}")]
    Tracing(String),
}
