use std::sync::Arc;

use storage::repository::Storage;
use study_core::model::{ProgressFlag, QuestionDraft, QuestionRecord, Subject, SubjectId};
use study_core::stats::{
    CategoryProgress, Dashboard, StudyData, SubjectFilter, SubjectGroup, SubjectQuestionStats,
    compute_category_progress, compute_subject_question_stats, group_subjects_by_category,
};

use crate::Clock;
use crate::config::StudyConfig;
use crate::error::{QuestionLogError, StudyServicesError, SubjectStoreError};
use crate::question_log::QuestionLog;
use crate::subject_store::SubjectStore;

/// Presentation-facing facade over the subject store and question log.
///
/// Intents go in through `update_flag`, `reset_all` and `add_record`;
/// every read returns freshly aggregated values. It does not own any UI
/// formatting.
#[derive(Clone)]
pub struct StudyTracker {
    subjects: Arc<SubjectStore>,
    questions: Arc<QuestionLog>,
}

impl StudyTracker {
    /// Load subjects from `storage` (or seed) and start an empty question log.
    pub async fn open(storage: &Storage, clock: Clock) -> Self {
        let subjects = SubjectStore::load(Arc::clone(&storage.subjects)).await;
        Self {
            subjects: Arc::new(subjects),
            questions: Arc::new(QuestionLog::new(clock)),
        }
    }

    /// Build a tracker backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `StudyServicesError::Sqlite` if the database cannot be opened
    /// or migrated.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, StudyServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::open(&storage, clock).await)
    }

    /// Build a tracker from launcher configuration.
    ///
    /// # Errors
    ///
    /// Returns `StudyServicesError::Sqlite` if the database cannot be opened.
    pub async fn from_config(config: &StudyConfig, clock: Clock) -> Result<Self, StudyServicesError> {
        tracing::info!(db_url = %config.db_url, "opening study tracker");
        Self::new_sqlite(&config.db_url, clock).await
    }

    pub async fn in_memory(clock: Clock) -> Self {
        Self::open(&Storage::in_memory(), clock).await
    }

    // ─── intents ────────────────────────────────────────────────────────────

    /// See [`SubjectStore::update_flag`].
    ///
    /// # Errors
    ///
    /// Returns `SubjectStoreError` if the change cannot be persisted.
    pub async fn update_flag(
        &self,
        id: &SubjectId,
        flag: ProgressFlag,
        value: bool,
    ) -> Result<Option<Subject>, SubjectStoreError> {
        self.subjects.update_flag(id, flag, value).await
    }

    /// Clears subject progress. The question log is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SubjectStoreError` if the reset cannot be persisted.
    pub async fn reset_all(&self) -> Result<(), SubjectStoreError> {
        self.subjects.reset_all().await
    }

    /// Log a practice attempt against a known subject.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLogError::InvalidInput` for out-of-range counts or an
    /// unknown subject.
    pub async fn add_record(
        &self,
        subject_id: SubjectId,
        correct: i64,
        total: i64,
    ) -> Result<QuestionRecord, QuestionLogError> {
        let subjects = self.subjects.list().await;
        self.questions
            .add_record(&subjects, QuestionDraft::new(subject_id, correct, total))
            .await
    }

    // ─── reads ──────────────────────────────────────────────────────────────

    pub async fn subjects(&self) -> Vec<Subject> {
        self.subjects.list().await
    }

    pub async fn records(&self) -> Vec<QuestionRecord> {
        self.questions.list().await
    }

    pub async fn revision(&self) -> u64 {
        self.subjects.revision().await
    }

    pub async fn study_data(&self) -> StudyData {
        let (subjects, records) = self.snapshot().await;
        StudyData::from_snapshot(subjects, records)
    }

    pub async fn category_progress(&self) -> Vec<CategoryProgress> {
        compute_category_progress(&self.subjects.list().await)
    }

    pub async fn question_stats(&self) -> Vec<SubjectQuestionStats> {
        compute_subject_question_stats(&self.questions.list().await)
    }

    pub async fn grouped_subjects(&self, filter: &SubjectFilter) -> Vec<SubjectGroup> {
        group_subjects_by_category(&self.subjects.list().await, filter)
    }

    pub async fn dashboard(&self) -> Dashboard {
        let (subjects, records) = self.snapshot().await;
        Dashboard::compute(subjects, records)
    }

    async fn snapshot(&self) -> (Vec<Subject>, Vec<QuestionRecord>) {
        let subjects = self.subjects.list().await;
        let records = self.questions.list().await;
        (subjects, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_clock;

    #[tokio::test]
    async fn in_memory_tracker_starts_from_seed() {
        let tracker = StudyTracker::in_memory(fixed_clock()).await;
        let data = tracker.study_data().await;
        assert_eq!(data.total_subjects, 20);
        assert_eq!(data.overall_progress(), 0);
        assert!(data.question_records.is_empty());
    }

    #[tokio::test]
    async fn add_record_then_stats_report_accuracy() {
        let tracker = StudyTracker::in_memory(fixed_clock()).await;
        tracker
            .add_record(SubjectId::new("mat-1"), 8, 10)
            .await
            .unwrap();

        let stats = tracker.question_stats().await;
        let mat = study_core::stats::stats_for(&stats, &SubjectId::new("mat-1")).unwrap();
        assert_eq!(mat.total_questions, 10);
        assert_eq!(mat.total_correct, 8);
        assert!((mat.accuracy - 80.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn rejected_records_do_not_grow_the_log() {
        let tracker = StudyTracker::in_memory(fixed_clock()).await;
        assert!(tracker.add_record(SubjectId::new("mat-1"), 11, 10).await.is_err());
        assert!(tracker.add_record(SubjectId::new("unknown-id"), 1, 1).await.is_err());
        assert!(tracker.records().await.is_empty());
    }

    #[tokio::test]
    async fn reset_keeps_question_history() {
        let tracker = StudyTracker::in_memory(fixed_clock()).await;
        let id = SubjectId::new("port-4");
        tracker.update_flag(&id, ProgressFlag::Studied, true).await.unwrap();
        tracker.add_record(id, 3, 5).await.unwrap();

        tracker.reset_all().await.unwrap();

        let data = tracker.study_data().await;
        assert_eq!(data.studied_count, 0);
        assert_eq!(data.overall_progress(), 0);
        assert_eq!(data.question_records.len(), 1);
    }

    #[tokio::test]
    async fn grouped_subjects_follow_filter() {
        let tracker = StudyTracker::in_memory(fixed_clock()).await;
        let groups = tracker
            .grouped_subjects(&SubjectFilter::all().with_category("Português"))
            .await;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].subjects.len(), 5);
    }

    #[tokio::test]
    async fn category_progress_reflects_updates() {
        let tracker = StudyTracker::in_memory(fixed_clock()).await;
        for flag in ProgressFlag::ALL {
            tracker
                .update_flag(&SubjectId::new("admin-2"), flag, true)
                .await
                .unwrap();
        }
        let progress = tracker.category_progress().await;
        let admin = progress
            .iter()
            .find(|c| c.category == "Direito Administrativo")
            .unwrap();
        assert_eq!(admin.completion, 20);
        assert_eq!(tracker.revision().await, 3);
    }
}
