//! I/O boundary traits for testability
//!
//! These traits abstract the remote API and the interactive terminal,
//! allowing services to be tested with mock implementations.

use crate::domain::{AuditLog, ConfigInfo, ConfigTarget, LogTarget, NewConfig};
use crate::infrastructure::error::ApiResult;

/// Remote Doppler API: one method per endpoint, one round-trip per call.
pub trait ApiClient: Send + Sync {
    /// List all configs of a project.
    fn get_configs(&self, project: &str) -> ApiResult<Vec<ConfigInfo>>;

    /// Fetch a single config.
    fn get_config(&self, target: &ConfigTarget) -> ApiResult<ConfigInfo>;

    /// Create a config in a project.
    fn create_config(&self, project: &str, config: &NewConfig) -> ApiResult<ConfigInfo>;

    /// Rename a config.
    fn update_config(&self, target: &ConfigTarget, name: &str) -> ApiResult<ConfigInfo>;

    /// Delete a config.
    fn delete_config(&self, target: &ConfigTarget) -> ApiResult<()>;

    /// List audit log entries of a config, most recent first.
    fn get_config_logs(&self, target: &ConfigTarget) -> ApiResult<Vec<AuditLog>>;

    /// Fetch a single audit log entry.
    fn get_config_log(&self, target: &LogTarget) -> ApiResult<AuditLog>;

    /// Revert a config to the state captured by a log entry.
    /// Returns the new entry recording the rollback.
    fn rollback_config_log(&self, target: &LogTarget) -> ApiResult<AuditLog>;
}

/// Yes/no confirmation abstraction.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. Returns the answer, or an error if no answer can be read.
    fn confirm(&self, message: &str, default: bool) -> Result<bool, String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real prompter reading from the interactive terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool, String> {
        use inquire::InquireError;

        match inquire::Confirm::new(message).with_default(default).prompt() {
            Ok(answer) => Ok(answer),
            // Esc is a "no", not a failure
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(e.to_string()),
        }
    }
}
