use tracing_subscriber::EnvFilter;

use crate::error::StudyServicesError;

/// Install the global `tracing` subscriber with the given filter directives.
///
/// # Errors
///
/// Returns `StudyServicesError::Tracing` if the filter does not parse or a
/// global subscriber is already installed.
pub fn init_tracing(filter: &str) -> Result<(), StudyServicesError> {
    let env_filter =
        EnvFilter::try_new(filter).map_err(|e| StudyServicesError::Tracing(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| StudyServicesError::Tracing(e.to_string()))
}
