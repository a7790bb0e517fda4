use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DB_URL_VAR: &str = "STUDY_DB_URL";
pub const LOG_VAR: &str = "STUDY_LOG";

const DEFAULT_DB_PATH: &str = "study.sqlite3";
const DEFAULT_LOG_FILTER: &str = "info";
const MEMORY_URL: &str = "sqlite::memory:";

/// Launcher settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyConfig {
    pub db_url: String,
    pub log_filter: String,
}

impl StudyConfig {
    /// Read `STUDY_DB_URL` and `STUDY_LOG` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_url = match lookup(DB_URL_VAR) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    var: DB_URL_VAR,
                    raw,
                });
            }
            Some(raw) => normalize_sqlite_url(&raw),
            None => normalize_sqlite_url(DEFAULT_DB_PATH),
        };

        let log_filter = match lookup(LOG_VAR) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::Invalid { var: LOG_VAR, raw });
            }
            Some(raw) => raw.trim().to_owned(),
            None => DEFAULT_LOG_FILTER.to_owned(),
        };

        Ok(Self { db_url, log_filter })
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.db_url == MEMORY_URL
    }

    /// Filesystem path of the database, if it lives in a file.
    #[must_use]
    pub fn db_path(&self) -> Option<PathBuf> {
        let path = self.db_url.strip_prefix("sqlite://")?;
        let path = path.split('?').next().unwrap_or(path);
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == MEMORY_URL || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn defaults_when_unset() {
        let config = StudyConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.db_url.starts_with("sqlite://"));
        assert!(config.db_url.ends_with(DEFAULT_DB_PATH));
        assert_eq!(config.log_filter, "info");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn memory_url_passes_through() {
        let config = StudyConfig::from_lookup(lookup(&[(DB_URL_VAR, "sqlite::memory:")])).unwrap();
        assert!(config.is_in_memory());
        assert_eq!(config.db_path(), None);
    }

    #[test]
    fn absolute_path_becomes_url() {
        let config =
            StudyConfig::from_lookup(lookup(&[(DB_URL_VAR, "sqlite:/tmp/study/progress.db")]))
                .unwrap();
        assert_eq!(config.db_url, "sqlite:///tmp/study/progress.db");
        assert_eq!(
            config.db_path(),
            Some(PathBuf::from("/tmp/study/progress.db"))
        );
    }

    #[test]
    fn blank_values_are_rejected() {
        let err = StudyConfig::from_lookup(lookup(&[(DB_URL_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: DB_URL_VAR, .. }));

        let err = StudyConfig::from_lookup(lookup(&[(LOG_VAR, "")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: LOG_VAR, .. }));
    }

    #[test]
    fn log_filter_is_trimmed() {
        let config =
            StudyConfig::from_lookup(lookup(&[(LOG_VAR, " services=debug ")])).unwrap();
        assert_eq!(config.log_filter, "services=debug");
    }
}
