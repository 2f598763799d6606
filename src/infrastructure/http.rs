//! Blocking HTTPS client for the Doppler API

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::Settings;
use crate::domain::{AuditLog, ConfigInfo, ConfigTarget, LogTarget, NewConfig};
use crate::infrastructure::error::{ApiError, ApiResult, InfraError, InfraResult};
use crate::infrastructure::traits::ApiClient;

const USER_AGENT: &str = concat!("doppler-cli/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ConfigsEnvelope {
    configs: Vec<ConfigInfo>,
}

#[derive(Deserialize)]
struct ConfigEnvelope {
    config: ConfigInfo,
}

#[derive(Deserialize)]
struct LogsEnvelope {
    logs: Vec<AuditLog>,
}

#[derive(Deserialize)]
struct LogEnvelope {
    log: AuditLog,
}

/// `ApiClient` backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpApiClient {
    /// Create a client from resolved settings.
    ///
    /// Fails if no token was resolved; TLS verification follows `settings.verify_tls`.
    pub fn new(settings: &Settings) -> InfraResult<Self> {
        let token = settings
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(InfraError::MissingToken)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .timeout(TIMEOUT)
            .build()
            .map_err(|source| InfraError::Http {
                context: "build client".to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: settings.api_host.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw body of a 2xx response.
    fn execute(&self, request: RequestBuilder, context: &str) -> ApiResult<String> {
        debug!("request: {}", context);
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|source| ApiError::Transport {
                context: context.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| ApiError::Transport {
            context: context.to_string(),
            source,
        })?;
        debug!("response: {} -> {}", context, status);

        if !status.is_success() {
            return Err(ApiError::from_status(status, &body));
        }
        Ok(body)
    }

    /// Send a request and decode the body against a schema.
    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, context: &str) -> ApiResult<T> {
        let body = self.execute(request, context)?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            context: context.to_string(),
            source,
        })
    }
}

impl ApiClient for HttpApiClient {
    fn get_configs(&self, project: &str) -> ApiResult<Vec<ConfigInfo>> {
        let request = self
            .client
            .get(self.url("/v2/configs"))
            .query(&[("project", project)]);
        let envelope: ConfigsEnvelope =
            self.fetch(request, &format!("get configs of {project}"))?;
        Ok(envelope.configs)
    }

    fn get_config(&self, target: &ConfigTarget) -> ApiResult<ConfigInfo> {
        let request = self
            .client
            .get(self.url("/v2/configs/config"))
            .query(&config_query(target));
        let envelope: ConfigEnvelope =
            self.fetch(request, &format!("get config {}", target.config))?;
        Ok(envelope.config)
    }

    fn create_config(&self, project: &str, config: &NewConfig) -> ApiResult<ConfigInfo> {
        let request = self
            .client
            .post(self.url("/v2/configs"))
            .query(&[("project", project)])
            .json(config);
        let envelope: ConfigEnvelope =
            self.fetch(request, &format!("create config {}", config.name))?;
        Ok(envelope.config)
    }

    fn update_config(&self, target: &ConfigTarget, name: &str) -> ApiResult<ConfigInfo> {
        let request = self
            .client
            .post(self.url("/v2/configs/config"))
            .query(&config_query(target))
            .json(&json!({ "name": name }));
        let envelope: ConfigEnvelope =
            self.fetch(request, &format!("rename config {}", target.config))?;
        Ok(envelope.config)
    }

    fn delete_config(&self, target: &ConfigTarget) -> ApiResult<()> {
        let request = self
            .client
            .delete(self.url("/v2/configs/config"))
            .query(&config_query(target));
        self.execute(request, &format!("delete config {}", target.config))?;
        Ok(())
    }

    fn get_config_logs(&self, target: &ConfigTarget) -> ApiResult<Vec<AuditLog>> {
        let request = self
            .client
            .get(self.url("/v2/configs/config/logs"))
            .query(&config_query(target));
        let envelope: LogsEnvelope =
            self.fetch(request, &format!("get logs of config {}", target.config))?;
        Ok(envelope.logs)
    }

    fn get_config_log(&self, target: &LogTarget) -> ApiResult<AuditLog> {
        let request = self
            .client
            .get(self.url("/v2/configs/config/logs/log"))
            .query(&log_query(target));
        let envelope: LogEnvelope = self.fetch(request, &format!("get log {}", target.log_id))?;
        Ok(envelope.log)
    }

    fn rollback_config_log(&self, target: &LogTarget) -> ApiResult<AuditLog> {
        let request = self
            .client
            .post(self.url("/v2/configs/config/logs/log/rollback"))
            .query(&log_query(target));
        let envelope: LogEnvelope =
            self.fetch(request, &format!("rollback to log {}", target.log_id))?;
        Ok(envelope.log)
    }
}

fn config_query(target: &ConfigTarget) -> [(&'static str, &str); 2] {
    [
        ("project", target.project.as_str()),
        ("config", target.config.as_str()),
    ]
}

fn log_query(target: &LogTarget) -> [(&'static str, &str); 3] {
    [
        ("project", target.config.project.as_str()),
        ("config", target.config.config.as_str()),
        ("log", target.log_id.as_str()),
    ]
}
