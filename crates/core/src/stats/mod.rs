//! Pure aggregation over subject and question-record snapshots.
//!
//! Nothing in here holds state; every function can be called repeatedly on
//! the same input and returns the same output.

mod dashboard;
mod filter;
mod progress;
mod questions;
mod tiers;

pub use dashboard::Dashboard;
pub use filter::{SubjectFilter, SubjectGroup, categories, group_subjects_by_category};
pub use progress::{
    CategoryProgress, FlagProgress, FlagShare, StudyData, compute_category_progress,
    compute_flag_progress, compute_overall_progress, compute_subject_progress,
};
pub use questions::{
    QuestionTotals, SubjectQuestionStats, compute_global_accuracy,
    compute_subject_question_stats, stats_for,
};
pub use tiers::{AccuracyTier, ProgressTier, classify_accuracy_tier, classify_progress_tier};

/// `100 * part / whole`, or 0 when `whole` is not positive.
fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { 100.0 * part / whole } else { 0.0 }
}
