use serde::Serialize;

use crate::model::{QuestionRecord, Subject};

use super::{
    CategoryProgress, FlagProgress, QuestionTotals, StudyData, SubjectQuestionStats,
    compute_category_progress, compute_flag_progress, compute_subject_question_stats,
};

/// Everything the dashboard renders, derived from one consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub data: StudyData,
    pub overall_progress: u32,
    pub categories: Vec<CategoryProgress>,
    pub flags: FlagProgress,
    pub question_stats: Vec<SubjectQuestionStats>,
    pub question_totals: QuestionTotals,
}

impl Dashboard {
    #[must_use]
    pub fn compute(subjects: Vec<Subject>, records: Vec<QuestionRecord>) -> Self {
        let categories = compute_category_progress(&subjects);
        let question_stats = compute_subject_question_stats(&records);
        let question_totals = QuestionTotals::from_stats(&question_stats);
        let data = StudyData::from_snapshot(subjects, records);

        Self {
            overall_progress: data.overall_progress(),
            flags: compute_flag_progress(&data),
            categories,
            question_stats,
            question_totals,
            data,
        }
    }
}
