use serde::Serialize;

use crate::model::{ProgressFlag, QuestionRecord, Subject};

use super::percent;

//
// ─── STUDY DATA ────────────────────────────────────────────────────────────────
//

/// Snapshot of both stores plus the flag counts the dashboard header shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyData {
    pub subjects: Vec<Subject>,
    pub total_subjects: usize,
    pub studied_count: usize,
    pub reviewed_count: usize,
    pub practiced_count: usize,
    pub question_records: Vec<QuestionRecord>,
}

impl StudyData {
    #[must_use]
    pub fn from_snapshot(subjects: Vec<Subject>, question_records: Vec<QuestionRecord>) -> Self {
        let count = |flag: ProgressFlag| subjects.iter().filter(|s| s.flag(flag)).count();
        Self {
            total_subjects: subjects.len(),
            studied_count: count(ProgressFlag::Studied),
            reviewed_count: count(ProgressFlag::Reviewed),
            practiced_count: count(ProgressFlag::Practiced),
            subjects,
            question_records,
        }
    }

    #[must_use]
    pub fn count(&self, flag: ProgressFlag) -> usize {
        match flag {
            ProgressFlag::Studied => self.studied_count,
            ProgressFlag::Reviewed => self.reviewed_count,
            ProgressFlag::Practiced => self.practiced_count,
        }
    }

    #[must_use]
    pub fn overall_progress(&self) -> u32 {
        compute_overall_progress(
            self.studied_count,
            self.reviewed_count,
            self.practiced_count,
            self.total_subjects,
        )
    }
}

//
// ─── CATEGORY PROGRESS ─────────────────────────────────────────────────────────
//

/// Flag counts and rounded completion for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub category: String,
    pub total: usize,
    pub studied: usize,
    pub reviewed: usize,
    pub practiced: usize,
    pub completion: u32,
}

/// Groups subjects by category in first-seen order and computes completion.
#[must_use]
pub fn compute_category_progress(subjects: &[Subject]) -> Vec<CategoryProgress> {
    let mut out: Vec<CategoryProgress> = Vec::new();

    for subject in subjects {
        let idx = match out.iter().position(|c| c.category == subject.category()) {
            Some(idx) => idx,
            None => {
                out.push(CategoryProgress {
                    category: subject.category().to_owned(),
                    total: 0,
                    studied: 0,
                    reviewed: 0,
                    practiced: 0,
                    completion: 0,
                });
                out.len() - 1
            }
        };
        let entry = &mut out[idx];
        entry.total += 1;
        entry.studied += usize::from(subject.studied());
        entry.reviewed += usize::from(subject.reviewed());
        entry.practiced += usize::from(subject.practiced());
    }

    for entry in &mut out {
        entry.completion =
            compute_overall_progress(entry.studied, entry.reviewed, entry.practiced, entry.total);
    }
    out
}

//
// ─── OVERALL / SUBJECT PROGRESS ────────────────────────────────────────────────
//

/// `round(100 * (studied + reviewed + practiced) / (3 * total))`, or 0 with no subjects.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn compute_overall_progress(
    studied: usize,
    reviewed: usize,
    practiced: usize,
    total_subjects: usize,
) -> u32 {
    let done = (studied + reviewed + practiced) as f64;
    let slots = (total_subjects * 3) as f64;
    percent(done, slots).round() as u32
}

/// Share of the three flags set on one subject: 0, 33.3…, 66.6… or 100.
#[must_use]
pub fn compute_subject_progress(subject: &Subject) -> f64 {
    percent(f64::from(subject.completed_flags()), 3.0)
}

//
// ─── PER-FLAG PROGRESS ─────────────────────────────────────────────────────────
//

/// How many subjects carry one flag, out of all subjects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlagShare {
    pub flag: ProgressFlag,
    pub count: usize,
    pub total: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlagProgress {
    pub studied: FlagShare,
    pub reviewed: FlagShare,
    pub practiced: FlagShare,
}

impl FlagProgress {
    #[must_use]
    pub fn get(&self, flag: ProgressFlag) -> FlagShare {
        match flag {
            ProgressFlag::Studied => self.studied,
            ProgressFlag::Reviewed => self.reviewed,
            ProgressFlag::Practiced => self.practiced,
        }
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_flag_progress(data: &StudyData) -> FlagProgress {
    let share = |flag: ProgressFlag| {
        let count = data.count(flag);
        FlagShare {
            flag,
            count,
            total: data.total_subjects,
            percent: percent(count as f64, data.total_subjects as f64),
        }
    };
    FlagProgress {
        studied: share(ProgressFlag::Studied),
        reviewed: share(ProgressFlag::Reviewed),
        practiced: share(ProgressFlag::Practiced),
    }
}
