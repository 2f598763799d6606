//! Shared test doubles and fixtures for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use doppler::config::Settings;
use doppler::domain::{AuditLog, ConfigInfo, ConfigTarget, LogTarget, LogUser, NewConfig};
use doppler::infrastructure::di::ServiceContainer;
use doppler::infrastructure::traits::{ApiClient, Prompter};
use doppler::infrastructure::{ApiError, ApiResult};

/// Build a config record.
pub fn config(name: &str, environment: &str, project: &str) -> ConfigInfo {
    ConfigInfo {
        name: name.to_string(),
        environment: environment.to_string(),
        project: project.to_string(),
        created_at: "2019-07-01T10:00:00.000Z".to_string(),
        deployed_at: Some("2019-07-02T10:00:00.000Z".to_string()),
        missing_variables: vec![],
    }
}

/// Build an audit log entry; `n` makes ids and timestamps distinct.
pub fn log(n: u32) -> AuditLog {
    AuditLog {
        id: format!("log_{n}"),
        text: format!("Change number {n}"),
        html: None,
        created_at: format!("2019-07-{:02}T10:00:00.000Z", 28 - n),
        config: "dev".to_string(),
        environment: "dev".to_string(),
        project: "api".to_string(),
        user: LogUser {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            username: "ada".to_string(),
            profile_image_url: None,
        },
        diff: vec![],
    }
}

/// Mock API recording every call as `"<operation> <args>"`.
#[derive(Default)]
pub struct MockApi {
    pub calls: Mutex<Vec<String>>,
    pub configs: Vec<ConfigInfo>,
    pub logs: Vec<AuditLog>,
    /// When set, every call fails with this HTTP status
    pub fail_status: Option<u16>,
}

impl MockApi {
    pub fn with_configs(configs: Vec<ConfigInfo>) -> Self {
        Self {
            configs,
            ..Self::default()
        }
    }

    pub fn with_logs(logs: Vec<AuditLog>) -> Self {
        Self {
            logs,
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_status {
            Some(status) => Err(ApiError::Status {
                status,
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn find_config(&self, target: &ConfigTarget) -> ConfigInfo {
        self.configs
            .iter()
            .find(|c| c.name == target.config)
            .cloned()
            .unwrap_or_else(|| config(&target.config, "dev", &target.project))
    }

    fn find_log(&self, target: &LogTarget) -> AuditLog {
        self.logs
            .iter()
            .find(|l| l.id == target.log_id)
            .cloned()
            .unwrap_or_else(|| AuditLog {
                id: target.log_id.clone(),
                ..log(0)
            })
    }
}

impl ApiClient for MockApi {
    fn get_configs(&self, project: &str) -> ApiResult<Vec<ConfigInfo>> {
        self.record(format!("get_configs {project}"))?;
        Ok(self.configs.clone())
    }

    fn get_config(&self, target: &ConfigTarget) -> ApiResult<ConfigInfo> {
        self.record(format!("get_config {} {}", target.project, target.config))?;
        Ok(self.find_config(target))
    }

    fn create_config(&self, project: &str, new: &NewConfig) -> ApiResult<ConfigInfo> {
        self.record(format!(
            "create_config {} {} {} {}",
            project, new.name, new.environment, new.defaults
        ))?;
        Ok(config(&new.name, &new.environment, project))
    }

    fn update_config(&self, target: &ConfigTarget, name: &str) -> ApiResult<ConfigInfo> {
        self.record(format!(
            "update_config {} {} {}",
            target.project, target.config, name
        ))?;
        Ok(config(name, "dev", &target.project))
    }

    fn delete_config(&self, target: &ConfigTarget) -> ApiResult<()> {
        self.record(format!("delete_config {} {}", target.project, target.config))
    }

    fn get_config_logs(&self, target: &ConfigTarget) -> ApiResult<Vec<AuditLog>> {
        self.record(format!(
            "get_config_logs {} {}",
            target.project, target.config
        ))?;
        Ok(self.logs.clone())
    }

    fn get_config_log(&self, target: &LogTarget) -> ApiResult<AuditLog> {
        self.record(format!(
            "get_config_log {} {} {}",
            target.config.project, target.config.config, target.log_id
        ))?;
        Ok(self.find_log(target))
    }

    fn rollback_config_log(&self, target: &LogTarget) -> ApiResult<AuditLog> {
        self.record(format!(
            "rollback_config_log {} {} {}",
            target.config.project, target.config.config, target.log_id
        ))?;
        Ok(AuditLog {
            id: format!("rollback_of_{}", target.log_id),
            text: format!("Rolled back to {}", target.log_id),
            ..log(0)
        })
    }
}

/// Prompter returning a scripted answer and recording the questions asked.
pub struct ScriptedPrompter {
    pub answer: Result<bool, String>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Ok(answer),
            asked: Mutex::new(vec![]),
        }
    }

    pub fn broken(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            asked: Mutex::new(vec![]),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool, String> {
        assert!(!default, "destructive confirmations must default to no");
        self.asked.lock().unwrap().push(message.to_string());
        self.answer.clone()
    }
}

/// Settings as if resolved from a settings file scoped to project "api", config "dev".
pub fn settings() -> Settings {
    Settings {
        token: Some("dp.st.test".to_string()),
        project: Some("api".to_string()),
        config: Some("dev".to_string()),
        ..Settings::default()
    }
}

pub fn container(
    settings: Settings,
    api: Arc<MockApi>,
    prompter: Arc<ScriptedPrompter>,
) -> ServiceContainer {
    ServiceContainer::with_deps(settings, api, prompter)
}
