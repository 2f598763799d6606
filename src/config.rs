//! Settings management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Settings file: `$XDG_CONFIG_HOME/doppler/doppler.toml`, values scoped by directory
//! 3. Environment variables: `DOPPLER_*` prefix
//! 4. Command-line flags

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};

/// API host used when nothing else is configured.
pub const DEFAULT_API_HOST: &str = "https://api.doppler.com";

/// Effective settings for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the Doppler API
    pub api_host: String,
    /// Verify the API's TLS certificate
    pub verify_tls: bool,
    /// Bearer token for the API
    pub token: Option<String>,
    /// Active project
    pub project: Option<String>,
    /// Active config
    pub config: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            verify_tls: true,
            token: None,
            project: None,
            config: None,
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// `None` means "not specified at this layer, inherit from below".
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RawSettings {
    pub api_host: Option<String>,
    pub verify_tls: Option<bool>,
    pub token: Option<String>,
    pub project: Option<String>,
    pub config: Option<String>,
}

/// Settings file layout: one table of values per directory scope.
///
/// ```toml
/// [scoped."/"]
/// token = "dp.st.xxxx"
///
/// [scoped."~/code/backend"]
/// project = "backend"
/// config = "dev"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SettingsFile {
    pub scoped: BTreeMap<String, RawSettings>,
}

impl SettingsFile {
    /// Scopes that apply to `dir` (the scope is `dir` or one of its ancestors),
    /// shallowest first so deeper scopes override.
    pub fn scopes_for(&self, dir: &Path) -> Vec<(PathBuf, &RawSettings)> {
        let mut matching: Vec<(PathBuf, &RawSettings)> = self
            .scoped
            .iter()
            .map(|(scope, raw)| (expand_path(scope), raw))
            .filter(|(scope, _)| dir.starts_with(scope))
            .collect();
        matching.sort_by_key(|(scope, _)| scope.components().count());
        matching
    }
}

/// Where settings are read from for one invocation.
#[derive(Debug, Clone, Default)]
pub struct SettingsSource {
    /// Explicit settings file; the default location is used when `None`
    pub file: Option<PathBuf>,
    /// Directory selecting scoped values; the current directory when `None`
    pub scope: Option<PathBuf>,
    /// Values from command-line flags, applied last
    pub overrides: RawSettings,
}

/// Get the XDG config directory for doppler.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "doppler").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the default settings file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("doppler.toml"))
}

/// Expand `~` and `$VAR` in a path.
fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    PathBuf::from(expanded)
}

/// Load a TOML settings file.
fn load_settings_file(path: &Path) -> ApplicationResult<SettingsFile> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay onto self: overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            api_host: overlay
                .api_host
                .clone()
                .unwrap_or_else(|| self.api_host.clone()),
            verify_tls: overlay.verify_tls.unwrap_or(self.verify_tls),
            token: overlay.token.clone().or_else(|| self.token.clone()),
            project: overlay.project.clone().or_else(|| self.project.clone()),
            config: overlay.config.clone().or_else(|| self.config.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Settings file scopes matching the scope directory, shallowest first
    /// 3. Environment variables: `DOPPLER_*`
    /// 4. `source.overrides` (command-line flags)
    ///
    /// A missing default settings file is fine; a missing explicit one is an error.
    pub fn load(source: &SettingsSource) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Settings file, scoped by directory
        let scope = match &source.scope {
            Some(dir) => expand_path(&dir.to_string_lossy()),
            None => std::env::current_dir().map_err(|e| ApplicationError::Config {
                message: format!("resolve current directory: {e}"),
            })?,
        };
        if let Some(path) = Self::settings_file_path(source)? {
            let file = load_settings_file(&path)?;
            for (dir, raw) in file.scopes_for(&scope) {
                debug!("load: applying scope {}", dir.display());
                current = current.merge_with(raw);
            }
        }

        // 3. Environment variables
        current = Self::apply_env_overrides(current)?;

        // 4. Flags
        current = current.merge_with(&source.overrides);

        Ok(current)
    }

    fn settings_file_path(source: &SettingsSource) -> ApplicationResult<Option<PathBuf>> {
        match &source.file {
            Some(path) => {
                let path = expand_path(&path.to_string_lossy());
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("settings file not found: {}", path.display()),
                    });
                }
                Ok(Some(path))
            }
            None => Ok(global_config_path().filter(|p| p.exists())),
        }
    }

    /// Apply DOPPLER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        // Use config crate just for env var parsing; keys are flat (DOPPLER_API_HOST -> api_host)
        let builder = Config::builder()
            .add_source(Environment::with_prefix("DOPPLER").prefix_separator("_"));

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("api_host") {
            settings.api_host = val;
        }
        if let Ok(val) = config.get_bool("verify_tls") {
            settings.verify_tls = val;
        }
        if let Ok(val) = config.get_string("token") {
            settings.token = Some(val);
        }
        if let Ok(val) = config.get_string("project") {
            settings.project = Some(val);
        }
        if let Ok(val) = config.get_string("config") {
            settings.config = Some(val);
        }

        Ok(settings)
    }

    /// Project from a command flag, else the settings bundle.
    pub fn project_or(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.project.clone())
    }

    /// Config from a command flag, else the settings bundle.
    pub fn config_or(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.config.clone())
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_points_at_public_api() {
        let settings = Settings::default();

        assert_eq!(settings.api_host, DEFAULT_API_HOST);
        assert!(settings.verify_tls);
        assert!(settings.token.is_none());
    }

    #[test]
    fn given_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings {
            token: Some("base-token".into()),
            project: Some("api".into()),
            ..Settings::default()
        };
        let overlay = RawSettings {
            project: Some("web".into()),
            verify_tls: Some(false),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.token.as_deref(), Some("base-token"));
        assert_eq!(merged.project.as_deref(), Some("web"));
        assert!(!merged.verify_tls);
        assert_eq!(merged.api_host, DEFAULT_API_HOST);
    }

    #[test]
    fn given_nested_scopes_when_selecting_then_returns_ancestors_shallowest_first() {
        let file: SettingsFile = toml::from_str(
            r#"
[scoped."/"]
token = "root"

[scoped."/work/backend"]
project = "backend"

[scoped."/work"]
config = "dev"

[scoped."/other"]
project = "other"
"#,
        )
        .unwrap();

        let scopes = file.scopes_for(Path::new("/work/backend/src"));
        let dirs: Vec<PathBuf> = scopes.iter().map(|(d, _)| d.clone()).collect();

        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/"),
                PathBuf::from("/work"),
                PathBuf::from("/work/backend")
            ]
        );
    }

    #[test]
    fn given_sibling_prefix_when_selecting_then_does_not_match() {
        // "/work/back" is a string prefix of "/work/backend" but not a path ancestor
        let file: SettingsFile = toml::from_str(
            r#"
[scoped."/work/back"]
project = "wrong"
"#,
        )
        .unwrap();

        assert!(file.scopes_for(Path::new("/work/backend")).is_empty());
    }

    #[test]
    fn given_flag_value_when_project_or_then_flag_wins() {
        let settings = Settings {
            project: Some("from-file".into()),
            ..Settings::default()
        };

        assert_eq!(
            settings.project_or(Some("from-flag".into())).as_deref(),
            Some("from-flag")
        );
        assert_eq!(settings.project_or(None).as_deref(), Some("from-file"));
    }
}
