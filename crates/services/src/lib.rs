#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod question_log;
pub mod subject_store;
pub mod telemetry;
pub mod tracker;

pub use study_core::Clock;

pub use config::StudyConfig;
pub use error::{ConfigError, QuestionLogError, StudyServicesError, SubjectStoreError};
pub use question_log::QuestionLog;
pub use subject_store::SubjectStore;
pub use telemetry::init_tracing;
pub use tracker::StudyTracker;
