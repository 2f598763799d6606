//! Config service
//!
//! List, fetch, create, rename and delete configs of a project.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ConfigInfo, ConfigTarget, NewConfig};
use crate::infrastructure::traits::{ApiClient, Prompter};

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The config was deleted on the remote service.
    Deleted,
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

/// Service for config lifecycle operations.
pub struct ConfigService {
    api: Arc<dyn ApiClient>,
    prompter: Arc<dyn Prompter>,
}

impl ConfigService {
    /// Create a new config service.
    pub fn new(api: Arc<dyn ApiClient>, prompter: Arc<dyn Prompter>) -> Self {
        Self { api, prompter }
    }

    pub fn list(&self, project: &str) -> ApplicationResult<Vec<ConfigInfo>> {
        debug!("list: project={}", project);
        let configs = self.api.get_configs(project)?;
        debug!("list: {} configs", configs.len());
        Ok(configs)
    }

    pub fn get(&self, target: &ConfigTarget) -> ApplicationResult<ConfigInfo> {
        debug!("get: {}/{}", target.project, target.config);
        Ok(self.api.get_config(target)?)
    }

    pub fn create(&self, project: &str, config: &NewConfig) -> ApplicationResult<ConfigInfo> {
        debug!(
            "create: project={} name={} environment={} defaults={}",
            project, config.name, config.environment, config.defaults
        );
        let created = self.api.create_config(project, config)?;
        info!("created config {}/{}", created.project, created.name);
        Ok(created)
    }

    /// Rename a config to `name`.
    pub fn rename(&self, target: &ConfigTarget, name: &str) -> ApplicationResult<ConfigInfo> {
        debug!("rename: {}/{} -> {}", target.project, target.config, name);
        Ok(self.api.update_config(target, name)?)
    }

    /// Delete a config, asking for confirmation unless `assume_yes`.
    ///
    /// The confirmation defaults to "no". A declined prompt sends nothing.
    pub fn delete(
        &self,
        target: &ConfigTarget,
        assume_yes: bool,
    ) -> ApplicationResult<DeleteOutcome> {
        if !assume_yes {
            let confirmed = self
                .prompter
                .confirm(&format!("Delete config {}", target.config), false)
                .map_err(|message| ApplicationError::Prompt { message })?;
            if !confirmed {
                debug!("delete: declined for {}/{}", target.project, target.config);
                return Ok(DeleteOutcome::Declined);
            }
        }

        self.api.delete_config(target)?;
        info!("deleted config {}/{}", target.project, target.config);
        Ok(DeleteOutcome::Deleted)
    }
}
