use serde::Serialize;

use crate::model::{QuestionRecord, SubjectId};

use super::percent;

/// Summed practice results for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectQuestionStats {
    pub subject_id: SubjectId,
    pub total_questions: u64,
    pub total_correct: u64,
    pub accuracy: f64,
}

/// Groups records by subject (first-seen order) and sums their counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_subject_question_stats(records: &[QuestionRecord]) -> Vec<SubjectQuestionStats> {
    let mut out: Vec<SubjectQuestionStats> = Vec::new();

    for record in records {
        let idx = match out.iter().position(|s| &s.subject_id == record.subject_id()) {
            Some(idx) => idx,
            None => {
                out.push(SubjectQuestionStats {
                    subject_id: record.subject_id().clone(),
                    total_questions: 0,
                    total_correct: 0,
                    accuracy: 0.0,
                });
                out.len() - 1
            }
        };
        let entry = &mut out[idx];
        entry.total_questions += u64::from(record.total());
        entry.total_correct += u64::from(record.correct());
    }

    for entry in &mut out {
        entry.accuracy = percent(entry.total_correct as f64, entry.total_questions as f64);
    }
    out
}

/// Looks up the stats for one subject, if it has any records.
#[must_use]
pub fn stats_for<'a>(
    stats: &'a [SubjectQuestionStats],
    subject_id: &SubjectId,
) -> Option<&'a SubjectQuestionStats> {
    stats.iter().find(|s| &s.subject_id == subject_id)
}

/// Accuracy across every subject, weighted by question count.
#[must_use]
pub fn compute_global_accuracy(stats: &[SubjectQuestionStats]) -> f64 {
    QuestionTotals::from_stats(stats).accuracy
}

/// Header figures of the question tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuestionTotals {
    pub total_questions: u64,
    pub total_correct: u64,
    pub accuracy: f64,
}

impl QuestionTotals {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_stats(stats: &[SubjectQuestionStats]) -> Self {
        let total_questions: u64 = stats.iter().map(|s| s.total_questions).sum();
        let total_correct: u64 = stats.iter().map(|s| s.total_correct).sum();
        Self {
            total_questions,
            total_correct,
            accuracy: percent(total_correct as f64, total_questions as f64),
        }
    }
}
