//! Input resolution rules shared by all commands
//!
//! Precedence for every addressed value: positional argument, then flag or
//! settings value. Empty strings count as unset once resolution is done.

use crate::domain::{ConfigTarget, DomainError, LogTarget, NewConfig};

/// Pick the positional argument if one was given, otherwise the fallback.
///
/// A present positional always wins, even over a non-empty fallback.
pub fn prefer_positional(positional: Option<String>, fallback: Option<String>) -> Option<String> {
    positional.or(fallback)
}

/// Derive an environment slug from a config name: the part before the first `_`.
///
/// ```
/// use doppler::domain::derive_environment;
///
/// assert_eq!(derive_environment("backend_dev"), Some("backend"));
/// assert_eq!(derive_environment("myconfig"), None);
/// ```
pub fn derive_environment(name: &str) -> Option<&str> {
    name.split_once('_')
        .map(|(environment, _)| environment)
        .filter(|environment| !environment.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Require a resolved project.
pub fn require_project(project: Option<String>) -> Result<String, DomainError> {
    non_empty(project).ok_or(DomainError::MissingProject)
}

impl ConfigTarget {
    /// Resolve project and config; `config` must already carry positional precedence.
    pub fn resolve(project: Option<String>, config: Option<String>) -> Result<Self, DomainError> {
        let project = require_project(project)?;
        let config = non_empty(config).ok_or(DomainError::MissingConfig)?;
        Ok(Self { project, config })
    }
}

impl LogTarget {
    pub fn resolve(
        config: ConfigTarget,
        positional: Option<String>,
        log_flag: Option<String>,
    ) -> Result<Self, DomainError> {
        let log_id =
            non_empty(prefer_positional(positional, log_flag)).ok_or(DomainError::MissingLogId)?;
        Ok(Self { config, log_id })
    }
}

impl NewConfig {
    /// Resolve name and environment for config creation.
    ///
    /// The environment flag wins; without it the environment is derived from
    /// the name, and a name without a usable prefix is rejected.
    pub fn resolve(
        positional: Option<String>,
        name_flag: Option<String>,
        environment_flag: Option<String>,
        defaults: bool,
    ) -> Result<Self, DomainError> {
        let name = non_empty(prefer_positional(positional, name_flag))
            .ok_or(DomainError::MissingName)?;

        let environment = match non_empty(environment_flag) {
            Some(environment) => environment,
            None => derive_environment(&name)
                .map(str::to_string)
                .ok_or_else(|| DomainError::MissingEnvironment { name: name.clone() })?,
        };

        Ok(Self {
            name,
            environment,
            defaults,
        })
    }
}
