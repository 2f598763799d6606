//! Domain entities: remote records and resolved request inputs

use serde::{Deserialize, Serialize};

/// A config (environment-scoped set of secrets) as returned by the API.
///
/// Field order is the serialization order used for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub name: String,
    /// Stage the config belongs to (wire key `stage`)
    #[serde(rename = "stage", alias = "environment")]
    pub environment: String,
    pub project: String,
    pub created_at: String,
    /// `None` until the config has been deployed once
    pub deployed_at: Option<String>,
    /// Names of variables required by the stage but unset in this config
    #[serde(default)]
    pub missing_variables: Vec<String>,
}

/// Author of an audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogUser {
    pub email: String,
    pub name: String,
    pub username: String,
    pub profile_image_url: Option<String>,
}

/// One variable change recorded in an audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDiff {
    pub name: String,
    pub added: Option<String>,
    pub removed: Option<String>,
}

/// Immutable record of a change made to a config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub text: String,
    pub html: Option<String>,
    pub created_at: String,
    pub config: String,
    pub environment: String,
    pub project: String,
    pub user: LogUser,
    #[serde(default)]
    pub diff: Vec<LogDiff>,
}

impl AuditLog {
    /// `Name <email>` of the author, as shown in log listings.
    pub fn author(&self) -> String {
        format!("{} <{}>", self.user.name, self.user.email)
    }
}

/// A config addressed on the remote service: (project, config name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTarget {
    pub project: String,
    pub config: String,
}

/// An audit log entry addressed on the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub config: ConfigTarget,
    pub log_id: String,
}

/// Validated input for creating a config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewConfig {
    pub name: String,
    pub environment: String,
    /// Populate the config with the stage's default secrets
    pub defaults: bool,
}
