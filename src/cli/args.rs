//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::services::DEFAULT_LOG_COUNT;
use crate::config::{RawSettings, SettingsSource};

/// Doppler CLI: manage the configs of your projects
#[derive(Parser, Debug)]
#[command(name = "doppler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Print JSON instead of tables
    #[arg(long, global = true, env = "DOPPLER_JSON")]
    pub json: bool,

    /// Doppler API host
    #[arg(long, global = true, value_name = "URL", value_hint = ValueHint::Url)]
    pub api_host: Option<String>,

    /// Doppler API token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Do not verify the API's TLS certificate
    #[arg(long, global = true)]
    pub no_verify_tls: bool,

    /// Settings file (default: $XDG_CONFIG_HOME/doppler/doppler.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub configuration: Option<PathBuf>,

    /// Directory whose scoped settings apply (default: cwd)
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub scope: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings sources selected by the global flags.
    pub fn settings_source(&self) -> SettingsSource {
        SettingsSource {
            file: self.configuration.clone(),
            scope: self.scope.clone(),
            overrides: RawSettings {
                api_host: self.api_host.clone(),
                verify_tls: self.no_verify_tls.then_some(false),
                token: self.token.clone(),
                project: None,
                config: None,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configs, or manage them
    Configs(ConfigsArgs),

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Project selection shared by all configs commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Doppler project (e.g. backend)
    #[arg(short, long)]
    pub project: Option<String>,
}

/// Project and config selection shared by config-scoped commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Doppler project (e.g. backend)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Doppler config (e.g. dev)
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(subcommand)]
    pub command: Option<ConfigsCommands>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigsCommands {
    /// Get info for a config
    Get {
        /// Config name (default: --config or settings)
        #[arg(value_name = "CONFIG")]
        target: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Create a config
    Create {
        /// Config name (default: --name)
        #[arg(value_name = "NAME")]
        name_arg: Option<String>,
        #[command(flatten)]
        project: ProjectArgs,
        /// Config name
        #[arg(long)]
        name: Option<String>,
        /// Config environment (default: the part of the name before the first '_')
        #[arg(short, long)]
        environment: Option<String>,
        /// Populate config with the environment's default secrets (default)
        #[arg(long, overrides_with = "no_defaults")]
        defaults: bool,
        /// Don't populate config with the environment's default secrets
        #[arg(long, overrides_with = "defaults")]
        no_defaults: bool,
        /// Don't output the response
        #[arg(long)]
        silent: bool,
    },

    /// Rename a config
    Update {
        /// Config name (default: --config or settings)
        #[arg(value_name = "CONFIG")]
        target: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        /// New config name
        #[arg(long, required = true)]
        name: String,
        /// Don't output the response
        #[arg(long)]
        silent: bool,
    },

    /// Delete a config
    Delete {
        /// Config name (default: --config or settings)
        #[arg(value_name = "CONFIG")]
        target: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Don't output the response
        #[arg(long)]
        silent: bool,
        /// Proceed without confirmation
        #[arg(long)]
        yes: bool,
    },

    /// List config audit logs
    Logs(LogsArgs),
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Max number of logs to display
    #[arg(short, long, default_value_t = DEFAULT_LOG_COUNT)]
    pub number: usize,

    #[command(subcommand)]
    pub command: Option<LogsCommands>,
}

#[derive(Subcommand, Debug)]
pub enum LogsCommands {
    /// Get a config audit log
    Get {
        /// Audit log id (default: --log)
        #[arg(value_name = "LOG_ID")]
        log_id: Option<String>,
        /// Audit log id
        #[arg(long)]
        log: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Roll a config back to an audit log
    Rollback {
        /// Audit log id (default: --log)
        #[arg(value_name = "LOG_ID")]
        log_id: Option<String>,
        /// Audit log id
        #[arg(long)]
        log: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Don't output the response
        #[arg(long)]
        silent: bool,
    },
}
