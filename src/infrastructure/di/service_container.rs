//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ConfigLogService, ConfigService};
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::http::HttpApiClient;
use crate::infrastructure::traits::{ApiClient, Prompter, TerminalPrompter};

/// Container holding the resolved settings and I/O boundaries.
pub struct ServiceContainer {
    /// Resolved settings (defaults < file < env < global flags)
    pub settings: Arc<Settings>,

    /// Remote API
    pub api: Arc<dyn ApiClient>,

    /// Interactive confirmation
    pub prompter: Arc<dyn Prompter>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let api = HttpApiClient::new(&settings)?;
        Ok(Self::with_deps(
            settings,
            Arc::new(api),
            Arc::new(TerminalPrompter),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        api: Arc<dyn ApiClient>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            api,
            prompter,
        }
    }

    pub fn config_service(&self) -> ConfigService {
        ConfigService::new(self.api.clone(), self.prompter.clone())
    }

    pub fn log_service(&self) -> ConfigLogService {
        ConfigLogService::new(self.api.clone())
    }
}
