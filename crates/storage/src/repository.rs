use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use study_core::model::Subject;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence contract for the subject list.
///
/// The whole list is loaded and saved at once; question records are not
/// persisted.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Load the saved subjects in their stored order.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if stored data is corrupt, or
    /// `StorageError::Connection` if the backend cannot be reached.
    async fn load_subjects(&self) -> Result<Option<Vec<Subject>>, StorageError>;

    /// Replace the saved subjects with `subjects`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be stored.
    async fn save_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    subjects: Arc<Mutex<Option<Vec<Subject>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subjects: Arc::new(Mutex::new(None)),
        }
    }

    /// Repository that already holds `subjects`.
    #[must_use]
    pub fn with_subjects(subjects: Vec<Subject>) -> Self {
        Self {
            subjects: Arc::new(Mutex::new(Some(subjects))),
        }
    }
}

#[async_trait]
impl SubjectRepository for InMemoryRepository {
    async fn load_subjects(&self) -> Result<Option<Vec<Subject>>, StorageError> {
        let guard = self
            .subjects
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError> {
        let mut guard = self
            .subjects
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(subjects.to_vec());
        Ok(())
    }
}

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub subjects: Arc<dyn SubjectRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let subjects: Arc<dyn SubjectRepository> = Arc::new(InMemoryRepository::new());
        Self { subjects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::{ProgressFlag, SubjectId};
    use study_core::seed::default_subjects;

    #[tokio::test]
    async fn empty_repository_loads_nothing() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_subjects().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn round_trips_subjects_with_flags() {
        let repo = InMemoryRepository::new();
        let mut subjects = default_subjects();
        subjects[3].set_flag(ProgressFlag::Reviewed, true);
        repo.save_subjects(&subjects).await.unwrap();

        let loaded = repo.load_subjects().await.unwrap().unwrap();
        assert_eq!(loaded, subjects);
        assert_eq!(loaded[3].id(), &SubjectId::new("const-4"));
        assert!(loaded[3].reviewed());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryRepository::new();
        let storage = Storage {
            subjects: Arc::new(repo.clone()),
        };
        storage.subjects.save_subjects(&default_subjects()).await.unwrap();

        assert_eq!(repo.load_subjects().await.unwrap().map(|s| s.len()), Some(20));
    }
}
