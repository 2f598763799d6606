//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors are input validation failures.
/// They are raised before any request reaches the API.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("you must specify a project (--project, DOPPLER_PROJECT or the settings file)")]
    MissingProject,

    #[error("you must specify a config (argument, --config, DOPPLER_CONFIG or the settings file)")]
    MissingConfig,

    #[error("you must specify a name")]
    MissingName,

    #[error("you must specify an environment (--environment, or a name like <environment>_<suffix>): {name}")]
    MissingEnvironment { name: String },

    #[error("you must specify a log id (argument or --log)")]
    MissingLogId,
}
