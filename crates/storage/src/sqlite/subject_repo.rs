use std::collections::HashSet;

use chrono::Utc;
use study_core::model::Subject;

use super::SqliteRepository;
use super::mapping::{flag_to_i64, map_subject_row, position_to_i64};
use crate::repository::{StorageError, SubjectRepository};

#[async_trait::async_trait]
impl SubjectRepository for SqliteRepository {
    async fn load_subjects(&self) -> Result<Option<Vec<Subject>>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, category, studied, reviewed, practiced
            FROM subjects
            ORDER BY position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if rows.is_empty() {
            let saved = sqlx::query("SELECT 1 FROM subject_list_meta WHERE id = 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            return Ok(saved.map(|_| Vec::new()));
        }

        let mut subjects = Vec::with_capacity(rows.len());
        for row in rows {
            subjects.push(map_subject_row(&row)?);
        }
        Ok(Some(subjects))
    }

    async fn save_subjects(&self, subjects: &[Subject]) -> Result<(), StorageError> {
        let mut seen = HashSet::with_capacity(subjects.len());
        if let Some(dup) = subjects.iter().find(|s| !seen.insert(s.id())) {
            return Err(StorageError::Serialization(format!(
                "duplicate subject id: {}",
                dup.id()
            )));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query("DELETE FROM subjects")
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        for (position, subject) in subjects.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO subjects (id, position, name, category, studied, reviewed, practiced)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )
            .bind(subject.id().as_str())
            .bind(position_to_i64(position)?)
            .bind(subject.name())
            .bind(subject.category())
            .bind(flag_to_i64(subject.studied()))
            .bind(flag_to_i64(subject.reviewed()))
            .bind(flag_to_i64(subject.practiced()))
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        }

        sqlx::query(
            r"
            INSERT INTO subject_list_meta (id, saved_at)
            VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET saved_at = excluded.saved_at
            ",
        )
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tracing::debug!(count = subjects.len(), "saved subjects");
        Ok(())
    }
}
