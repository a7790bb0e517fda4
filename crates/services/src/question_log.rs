use study_core::Clock;
use study_core::model::{QuestionDraft, QuestionRecord, RecordId, Subject};
use tokio::sync::Mutex;

use crate::error::QuestionLogError;

/// Append-only, in-memory log of practice attempts.
///
/// Records are never persisted and are not affected by a progress reset.
pub struct QuestionLog {
    clock: Clock,
    records: Mutex<Vec<QuestionRecord>>,
}

impl QuestionLog {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Validate `draft` against `subjects` and append it with a fresh id and
    /// the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLogError::InvalidInput` when the counts are out of
    /// range or the subject is unknown; the log is left unchanged.
    pub async fn add_record(
        &self,
        subjects: &[Subject],
        draft: QuestionDraft,
    ) -> Result<QuestionRecord, QuestionLogError> {
        let validated = draft.validate(subjects).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected question record");
        })?;
        let record = validated.assign(RecordId::generate(), self.clock.now());

        self.records.lock().await.push(record.clone());
        tracing::debug!(
            record = %record.id(),
            subject = %record.subject_id(),
            correct = record.correct(),
            total = record.total(),
            "logged question record"
        );
        Ok(record)
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<QuestionRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}
