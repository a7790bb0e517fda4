use serde::Serialize;

/// Accuracy band used to colour per-subject results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyTier {
    High,
    Medium,
    Low,
}

/// Progress band used to colour a subject's progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    Complete,
    High,
    Medium,
    Low,
}

/// `>= 70` high, `>= 50` medium, otherwise low. NaN is low.
#[must_use]
pub fn classify_accuracy_tier(accuracy: f64) -> AccuracyTier {
    if accuracy >= 70.0 {
        AccuracyTier::High
    } else if accuracy >= 50.0 {
        AccuracyTier::Medium
    } else {
        AccuracyTier::Low
    }
}

/// Exactly `100` complete, `>= 66` high, `>= 33` medium, otherwise low.
///
/// Values above 100 are not clamped and classify as high.
#[must_use]
pub fn classify_progress_tier(progress: f64) -> ProgressTier {
    if (progress - 100.0).abs() < f64::EPSILON {
        ProgressTier::Complete
    } else if progress >= 66.0 {
        ProgressTier::High
    } else if progress >= 33.0 {
        ProgressTier::Medium
    } else {
        ProgressTier::Low
    }
}
