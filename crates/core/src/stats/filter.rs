use serde::Serialize;

use crate::model::Subject;

/// Search term plus optional category restriction for the subject list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectFilter {
    pub search: String,
    /// `None` shows every category.
    pub category: Option<String>,
}

impl SubjectFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Case-insensitive substring match on name or category, plus exact category.
    #[must_use]
    pub fn matches(&self, subject: &Subject) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = subject.name().to_lowercase().contains(&needle)
            || subject.category().to_lowercase().contains(&needle);
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| subject.category() == category);
        matches_search && matches_category
    }
}

/// Subjects of one category, in store order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectGroup {
    pub category: String,
    pub subjects: Vec<Subject>,
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(subjects: &[Subject]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for subject in subjects {
        if !out.iter().any(|c| c == subject.category()) {
            out.push(subject.category().to_owned());
        }
    }
    out
}

/// Applies `filter` and groups the survivors by category.
///
/// Group order follows the unfiltered list; groups left empty are dropped.
#[must_use]
pub fn group_subjects_by_category(subjects: &[Subject], filter: &SubjectFilter) -> Vec<SubjectGroup> {
    categories(subjects)
        .into_iter()
        .filter_map(|category| {
            let members: Vec<Subject> = subjects
                .iter()
                .filter(|s| s.category() == category && filter.matches(s))
                .cloned()
                .collect();
            (!members.is_empty()).then_some(SubjectGroup {
                category,
                subjects: members,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_subjects;

    #[test]
    fn empty_filter_keeps_everything() {
        let subjects = default_subjects();
        let groups = group_subjects_by_category(&subjects, &SubjectFilter::all());
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].category, "Direito Constitucional");
        assert!(groups.iter().all(|g| g.subjects.len() == 5));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_category() {
        let subjects = default_subjects();

        let by_name = group_subjects_by_category(&subjects, &SubjectFilter::all().with_search("SINTAXE"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].subjects[0].id().as_str(), "port-3");

        let by_category =
            group_subjects_by_category(&subjects, &SubjectFilter::all().with_search("matemática"));
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].subjects.len(), 5);
    }

    #[test]
    fn category_filter_is_exact() {
        let subjects = default_subjects();
        let filter = SubjectFilter::all()
            .with_category("Direito Administrativo")
            .with_search("princípios");
        let groups = group_subjects_by_category(&subjects, &filter);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].subjects.len(), 1);
        assert_eq!(groups[0].subjects[0].id().as_str(), "admin-1");
    }

    #[test]
    fn unmatched_search_yields_no_groups() {
        let subjects = default_subjects();
        let groups =
            group_subjects_by_category(&subjects, &SubjectFilter::all().with_search("zzz"));
        assert!(groups.is_empty());
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let cats = categories(&default_subjects());
        assert_eq!(
            cats,
            vec![
                "Direito Constitucional",
                "Direito Administrativo",
                "Português",
                "Matemática"
            ]
        );
    }
}
