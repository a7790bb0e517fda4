use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::SubjectId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject id cannot be empty")]
    EmptyId,

    #[error("subject name cannot be empty")]
    EmptyName,

    #[error("subject category cannot be empty")]
    EmptyCategory,
}

//
// ─── PROGRESS FLAG ─────────────────────────────────────────────────────────────
//

/// One of the three independent progress markers on a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressFlag {
    Studied,
    Reviewed,
    Practiced,
}

impl ProgressFlag {
    pub const ALL: [ProgressFlag; 3] = [
        ProgressFlag::Studied,
        ProgressFlag::Reviewed,
        ProgressFlag::Practiced,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressFlag::Studied => "studied",
            ProgressFlag::Reviewed => "reviewed",
            ProgressFlag::Practiced => "practiced",
        }
    }
}

impl fmt::Display for ProgressFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// A unit of study content, grouped under a category.
///
/// Identity, name and category are fixed at creation; only the three
/// progress flags change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredSubject")]
pub struct Subject {
    id: SubjectId,
    name: String,
    category: String,
    studied: bool,
    reviewed: bool,
    practiced: bool,
}

impl Subject {
    /// Creates a subject with every flag cleared.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError` if the id, name or category is blank.
    pub fn new(
        id: SubjectId,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, SubjectError> {
        Self::from_persisted(id, name, category, false, false, false)
    }

    /// Rebuilds a subject from its stored shape.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError` if the id, name or category is blank.
    pub fn from_persisted(
        id: SubjectId,
        name: impl Into<String>,
        category: impl Into<String>,
        studied: bool,
        reviewed: bool,
        practiced: bool,
    ) -> Result<Self, SubjectError> {
        if id.as_str().trim().is_empty() {
            return Err(SubjectError::EmptyId);
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SubjectError::EmptyName);
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(SubjectError::EmptyCategory);
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            category: category.trim().to_owned(),
            studied,
            reviewed,
            practiced,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &SubjectId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn studied(&self) -> bool {
        self.studied
    }

    #[must_use]
    pub fn reviewed(&self) -> bool {
        self.reviewed
    }

    #[must_use]
    pub fn practiced(&self) -> bool {
        self.practiced
    }

    /// Reads the boolean controlled by `flag`.
    #[must_use]
    pub fn flag(&self, flag: ProgressFlag) -> bool {
        match flag {
            ProgressFlag::Studied => self.studied,
            ProgressFlag::Reviewed => self.reviewed,
            ProgressFlag::Practiced => self.practiced,
        }
    }

    /// Writes the boolean controlled by `flag`.
    pub fn set_flag(&mut self, flag: ProgressFlag, value: bool) {
        let slot = match flag {
            ProgressFlag::Studied => &mut self.studied,
            ProgressFlag::Reviewed => &mut self.reviewed,
            ProgressFlag::Practiced => &mut self.practiced,
        };
        *slot = value;
    }

    pub fn clear_flags(&mut self) {
        self.studied = false;
        self.reviewed = false;
        self.practiced = false;
    }

    /// Number of flags currently set (0..=3).
    #[must_use]
    pub fn completed_flags(&self) -> u8 {
        ProgressFlag::ALL
            .iter()
            .map(|flag| u8::from(self.flag(*flag)))
            .sum()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_flags() == 3
    }
}

/// Wire shape of a subject; decoded values go through `Subject::from_persisted`.
#[derive(Deserialize)]
struct StoredSubject {
    id: SubjectId,
    name: String,
    category: String,
    #[serde(default)]
    studied: bool,
    #[serde(default)]
    reviewed: bool,
    #[serde(default)]
    practiced: bool,
}

impl TryFrom<StoredSubject> for Subject {
    type Error = SubjectError;

    fn try_from(raw: StoredSubject) -> Result<Self, Self::Error> {
        Subject::from_persisted(
            raw.id,
            raw.name,
            raw.category,
            raw.studied,
            raw.reviewed,
            raw.practiced,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
