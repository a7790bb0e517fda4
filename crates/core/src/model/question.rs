use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::ids::{RecordId, SubjectId};
use crate::model::subject::Subject;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a practice attempt is rejected before it reaches the log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionRecordError {
    #[error("total questions must be > 0 (got {0})")]
    NonPositiveTotal(i64),

    #[error("correct answers cannot be negative (got {0})")]
    NegativeCorrect(i64),

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: i64, total: i64 },

    #[error("question count out of range: {0}")]
    OutOfRange(i64),

    #[error("unknown subject: {0}")]
    UnknownSubject(SubjectId),
}

//
// ─── DRAFT ────────────────────────────────────────────────────────────────────
//

/// Raw practice attempt as entered by the learner.
///
/// Counts are signed so that out-of-range input can be rejected explicitly
/// instead of being lost in a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub subject_id: SubjectId,
    pub correct: i64,
    pub total: i64,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(subject_id: SubjectId, correct: i64, total: i64) -> Self {
        Self {
            subject_id,
            correct,
            total,
        }
    }

    /// Checks the counts and that the subject exists in `subjects`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionRecordError` when `total <= 0`, `correct < 0`,
    /// `correct > total`, or the subject id is unknown.
    pub fn validate(self, subjects: &[Subject]) -> Result<ValidatedQuestion, QuestionRecordError> {
        if self.total <= 0 {
            return Err(QuestionRecordError::NonPositiveTotal(self.total));
        }
        if self.correct < 0 {
            return Err(QuestionRecordError::NegativeCorrect(self.correct));
        }
        if self.correct > self.total {
            return Err(QuestionRecordError::CorrectExceedsTotal {
                correct: self.correct,
                total: self.total,
            });
        }
        if !subjects.iter().any(|s| s.id() == &self.subject_id) {
            return Err(QuestionRecordError::UnknownSubject(self.subject_id));
        }

        let total =
            u32::try_from(self.total).map_err(|_| QuestionRecordError::OutOfRange(self.total))?;
        let correct = u32::try_from(self.correct)
            .map_err(|_| QuestionRecordError::OutOfRange(self.correct))?;

        Ok(ValidatedQuestion {
            subject_id: self.subject_id,
            correct,
            total,
        })
    }
}

/// A draft that passed validation and only lacks identity and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    subject_id: SubjectId,
    correct: u32,
    total: u32,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign(self, id: RecordId, recorded_at: DateTime<Utc>) -> QuestionRecord {
        QuestionRecord {
            id,
            subject_id: self.subject_id,
            recorded_at,
            correct: self.correct,
            total: self.total,
        }
    }
}

//
// ─── RECORD ───────────────────────────────────────────────────────────────────
//

/// One logged practice attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    id: RecordId,
    subject_id: SubjectId,
    recorded_at: DateTime<Utc>,
    correct: u32,
    total: u32,
}

impl QuestionRecord {
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn subjects() -> Vec<Subject> {
        vec![Subject::new(SubjectId::new("mat-1"), "Aritmética", "Matemática").unwrap()]
    }

    #[test]
    fn valid_draft_becomes_record() {
        let id = RecordId::generate();
        let record = QuestionDraft::new(SubjectId::new("mat-1"), 8, 10)
            .validate(&subjects())
            .unwrap()
            .assign(id, fixed_now());

        assert_eq!(record.id(), id);
        assert_eq!(record.subject_id().as_str(), "mat-1");
        assert_eq!(record.correct(), 8);
        assert_eq!(record.total(), 10);
        assert_eq!(record.recorded_at(), fixed_now());
    }

    #[test]
    fn accepts_boundaries() {
        assert!(QuestionDraft::new("mat-1".into(), 0, 1).validate(&subjects()).is_ok());
        assert!(QuestionDraft::new("mat-1".into(), 5, 5).validate(&subjects()).is_ok());
    }

    #[test]
    fn rejects_bad_counts() {
        let err = QuestionDraft::new("mat-1".into(), 11, 10)
            .validate(&subjects())
            .unwrap_err();
        assert_eq!(
            err,
            QuestionRecordError::CorrectExceedsTotal {
                correct: 11,
                total: 10
            }
        );

        let err = QuestionDraft::new("mat-1".into(), -1, 10)
            .validate(&subjects())
            .unwrap_err();
        assert_eq!(err, QuestionRecordError::NegativeCorrect(-1));

        let err = QuestionDraft::new("mat-1".into(), 0, 0)
            .validate(&subjects())
            .unwrap_err();
        assert_eq!(err, QuestionRecordError::NonPositiveTotal(0));
    }

    #[test]
    fn rejects_unknown_subject() {
        let err = QuestionDraft::new("unknown-id".into(), 1, 1)
            .validate(&subjects())
            .unwrap_err();
        assert_eq!(
            err,
            QuestionRecordError::UnknownSubject(SubjectId::new("unknown-id"))
        );
    }

    #[test]
    fn rejects_counts_beyond_u32() {
        let huge = i64::from(u32::MAX) + 1;
        let err = QuestionDraft::new("mat-1".into(), 1, huge)
            .validate(&subjects())
            .unwrap_err();
        assert_eq!(err, QuestionRecordError::OutOfRange(huge));
    }
}
