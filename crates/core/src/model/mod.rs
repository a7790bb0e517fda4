mod ids;
mod question;
mod subject;

pub use ids::{RecordId, SubjectId};

pub use question::{QuestionDraft, QuestionRecord, QuestionRecordError, ValidatedQuestion};
pub use subject::{ProgressFlag, Subject, SubjectError};
