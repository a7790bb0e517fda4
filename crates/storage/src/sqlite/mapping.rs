use sqlx::Row;
use study_core::model::{Subject, SubjectId};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn flag_to_i64(value: bool) -> i64 {
    i64::from(value)
}

/// Stored flags must be exactly 0 or 1.
pub(crate) fn flag_from_i64(field: &'static str, value: i64) -> Result<bool, StorageError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::Serialization(format!(
            "invalid {field} flag: {other}"
        ))),
    }
}

pub(crate) fn position_to_i64(position: usize) -> Result<i64, StorageError> {
    i64::try_from(position).map_err(|_| StorageError::Serialization("position overflow".into()))
}

pub(crate) fn map_subject_row(row: &sqlx::sqlite::SqliteRow) -> Result<Subject, StorageError> {
    Subject::from_persisted(
        SubjectId::new(row.try_get::<String, _>("id").map_err(ser)?),
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<String, _>("category").map_err(ser)?,
        flag_from_i64("studied", row.try_get("studied").map_err(ser)?)?,
        flag_from_i64("reviewed", row.try_get("reviewed").map_err(ser)?)?,
        flag_from_i64("practiced", row.try_get("practiced").map_err(ser)?)?,
    )
    .map_err(ser)
}
