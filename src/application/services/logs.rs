//! Config audit log service

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ApplicationResult;
use crate::domain::{AuditLog, ConfigTarget, LogTarget};
use crate::infrastructure::traits::ApiClient;

/// Default number of log entries shown by `configs logs`.
pub const DEFAULT_LOG_COUNT: usize = 5;

/// Service for reading and rolling back config audit logs.
pub struct ConfigLogService {
    api: Arc<dyn ApiClient>,
}

impl ConfigLogService {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// Most recent `limit` entries, newest first.
    ///
    /// The API returns entries newest first; order is preserved and the tail dropped.
    pub fn recent(&self, target: &ConfigTarget, limit: usize) -> ApplicationResult<Vec<AuditLog>> {
        debug!("recent: {}/{} limit={}", target.project, target.config, limit);
        let mut logs = self.api.get_config_logs(target)?;
        logs.truncate(limit);
        Ok(logs)
    }

    pub fn get(&self, target: &LogTarget) -> ApplicationResult<AuditLog> {
        debug!("get: log={}", target.log_id);
        Ok(self.api.get_config_log(target)?)
    }

    /// Roll the config back to the state recorded by `target`.
    pub fn rollback(&self, target: &LogTarget) -> ApplicationResult<AuditLog> {
        let log = self.api.rollback_config_log(target)?;
        info!(
            "rolled back {}/{} to log {}",
            target.config.project, target.config.config, target.log_id
        );
        Ok(log)
    }
}
