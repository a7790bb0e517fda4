use std::collections::HashSet;
use std::sync::Arc;

use storage::repository::SubjectRepository;
use study_core::model::{ProgressFlag, Subject, SubjectId};
use study_core::seed::default_subjects;
use tokio::sync::Mutex;

use crate::error::SubjectStoreError;

struct StoreState {
    subjects: Vec<Subject>,
    revision: u64,
}

/// Owns the ordered subject list and writes it through to persistence.
///
/// Every mutation holds the lock until its save returns, so one intent
/// produces exactly one update and one save. If the save fails the in-memory
/// change is kept and the error is returned; the next successful save
/// persists it.
pub struct SubjectStore {
    repo: Arc<dyn SubjectRepository>,
    state: Mutex<StoreState>,
}

impl SubjectStore {
    /// Build a store over an already-known subject list.
    #[must_use]
    pub fn with_subjects(repo: Arc<dyn SubjectRepository>, subjects: Vec<Subject>) -> Self {
        Self {
            repo,
            state: Mutex::new(StoreState {
                subjects,
                revision: 0,
            }),
        }
    }

    /// Load saved subjects, falling back to the seed list when nothing has
    /// ever been saved, the data cannot be read, or ids are not unique. A
    /// saved empty list stays empty.
    pub async fn load(repo: Arc<dyn SubjectRepository>) -> Self {
        let subjects = match repo.load_subjects().await {
            Ok(Some(subjects)) if has_unique_ids(&subjects) => {
                tracing::info!(count = subjects.len(), "loaded saved subjects");
                subjects
            }
            Ok(Some(_)) => {
                tracing::warn!("saved subjects contain duplicate ids; using seed data");
                default_subjects()
            }
            Ok(None) => {
                tracing::info!("no saved subjects; using seed data");
                default_subjects()
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load subjects; using seed data");
                default_subjects()
            }
        };
        Self::with_subjects(repo, subjects)
    }

    /// Snapshot of the subjects in insertion order.
    pub async fn list(&self) -> Vec<Subject> {
        self.state.lock().await.subjects.clone()
    }

    /// Counter bumped on every applied mutation.
    pub async fn revision(&self) -> u64 {
        self.state.lock().await.revision
    }

    pub async fn get(&self, id: &SubjectId) -> Option<Subject> {
        let state = self.state.lock().await;
        state.subjects.iter().find(|s| s.id() == id).cloned()
    }

    /// Set one flag on one subject and persist.
    ///
    /// Returns `Ok(None)` without touching storage when `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns `SubjectStoreError::Storage` if the updated list cannot be saved.
    pub async fn update_flag(
        &self,
        id: &SubjectId,
        flag: ProgressFlag,
        value: bool,
    ) -> Result<Option<Subject>, SubjectStoreError> {
        let mut state = self.state.lock().await;

        let Some(subject) = state.subjects.iter_mut().find(|s| s.id() == id) else {
            tracing::debug!(subject = %id, %flag, "flag update for unknown subject ignored");
            return Ok(None);
        };
        subject.set_flag(flag, value);
        let updated = subject.clone();
        state.revision += 1;

        tracing::debug!(subject = %id, %flag, value, "updated subject flag");
        self.repo.save_subjects(&state.subjects).await?;
        Ok(Some(updated))
    }

    /// Clear every flag on every subject as one batch with a single save.
    ///
    /// # Errors
    ///
    /// Returns `SubjectStoreError::Storage` if the reset list cannot be saved.
    pub async fn reset_all(&self) -> Result<(), SubjectStoreError> {
        let mut state = self.state.lock().await;

        let reset: Vec<Subject> = state
            .subjects
            .iter()
            .cloned()
            .map(|mut s| {
                s.clear_flags();
                s
            })
            .collect();
        state.subjects = reset;
        state.revision += 1;

        tracing::info!(count = state.subjects.len(), "reset all subject progress");
        self.repo.save_subjects(&state.subjects).await?;
        Ok(())
    }
}

fn has_unique_ids(subjects: &[Subject]) -> bool {
    let mut seen = HashSet::with_capacity(subjects.len());
    subjects.iter().all(|s| seen.insert(s.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::repository::{InMemoryRepository, StorageError};

    /// Counts saves and can be told to fail loads or saves.
    #[derive(Default)]
    struct ProbeRepository {
        inner: InMemoryRepository,
        saves: AtomicUsize,
        fail_load: bool,
        fail_save: bool,
    }

    #[async_trait]
    impl SubjectRepository for ProbeRepository {
        async fn load_subjects(&self) -> Result<Option<Vec<Subject>>, StorageError> {
            if self.fail_load {
                return Err(StorageError::Serialization("corrupt".into()));
            }
            self.inner.load_subjects().await
        }

        async fn save_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_save {
                return Err(StorageError::Connection("offline".into()));
            }
            self.inner.save_subjects(subjects).await
        }
    }

    fn mat1() -> SubjectId {
        SubjectId::new("mat-1")
    }

    #[tokio::test]
    async fn load_without_saved_data_uses_seed() {
        let store = SubjectStore::load(Arc::new(InMemoryRepository::new())).await;
        let subjects = store.list().await;
        assert_eq!(subjects, default_subjects());
    }

    #[tokio::test]
    async fn load_failure_falls_back_to_seed() {
        let repo = ProbeRepository {
            fail_load: true,
            ..ProbeRepository::default()
        };
        let store = SubjectStore::load(Arc::new(repo)).await;
        assert_eq!(store.list().await.len(), 20);
    }

    #[tokio::test]
    async fn load_with_duplicate_ids_falls_back_to_seed() {
        let dup = Subject::new(SubjectId::new("x"), "X", "Y").unwrap();
        let repo = InMemoryRepository::with_subjects(vec![dup.clone(), dup]);
        let store = SubjectStore::load(Arc::new(repo)).await;
        assert_eq!(store.list().await, default_subjects());
    }

    #[tokio::test]
    async fn load_keeps_a_saved_empty_list() {
        let repo = InMemoryRepository::with_subjects(Vec::new());
        let store = SubjectStore::load(Arc::new(repo)).await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn load_prefers_saved_subjects() {
        let mut saved = default_subjects();
        saved[2].set_flag(ProgressFlag::Studied, true);
        let repo = InMemoryRepository::with_subjects(saved.clone());
        let store = SubjectStore::load(Arc::new(repo)).await;
        assert_eq!(store.list().await, saved);
    }

    #[tokio::test]
    async fn update_flag_sets_field_and_persists() {
        let repo = Arc::new(InMemoryRepository::new());
        let store = SubjectStore::with_subjects(repo.clone(), default_subjects());

        let updated = store
            .update_flag(&mat1(), ProgressFlag::Practiced, true)
            .await
            .unwrap()
            .expect("known subject");
        assert!(updated.practiced());
        assert!(!updated.studied());
        assert_eq!(store.revision().await, 1);

        let persisted = repo.load_subjects().await.unwrap().unwrap();
        let mat = persisted.iter().find(|s| s.id() == &mat1()).unwrap();
        assert!(mat.practiced());
    }

    #[tokio::test]
    async fn update_flag_unknown_id_is_noop() {
        let repo = Arc::new(ProbeRepository::default());
        let store = SubjectStore::with_subjects(repo.clone(), default_subjects());

        let result = store
            .update_flag(&SubjectId::new("unknown-id"), ProgressFlag::Studied, true)
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
        assert_eq!(store.revision().await, 0);
        assert_eq!(store.list().await, default_subjects());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = SubjectStore::with_subjects(
            Arc::new(InMemoryRepository::new()),
            default_subjects(),
        );
        store
            .update_flag(&mat1(), ProgressFlag::Studied, true)
            .await
            .unwrap();
        let ids: Vec<String> = store
            .list()
            .await
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        let seed_ids: Vec<String> = default_subjects()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, seed_ids);
    }

    #[tokio::test]
    async fn reset_all_clears_every_flag_with_one_save() {
        let repo = Arc::new(ProbeRepository::default());
        let mut subjects = default_subjects();
        for s in &mut subjects {
            for flag in ProgressFlag::ALL {
                s.set_flag(flag, true);
            }
        }
        let store = SubjectStore::with_subjects(repo.clone(), subjects);

        store.reset_all().await.unwrap();

        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
        assert!(store.list().await.iter().all(|s| s.completed_flags() == 0));
        let persisted = repo.inner.load_subjects().await.unwrap().unwrap();
        assert!(persisted.iter().all(|s| s.completed_flags() == 0));
    }

    #[tokio::test]
    async fn save_failure_is_reported_but_change_is_kept() {
        let repo = Arc::new(ProbeRepository {
            fail_save: true,
            ..ProbeRepository::default()
        });
        let store = SubjectStore::with_subjects(repo, default_subjects());

        let err = store
            .update_flag(&mat1(), ProgressFlag::Reviewed, true)
            .await
            .unwrap_err();
        assert!(matches!(err, SubjectStoreError::Storage(_)));
        assert!(store.get(&mat1()).await.unwrap().reviewed());
    }
}
