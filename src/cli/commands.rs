//! Command dispatch: resolve inputs, call services, render results

use std::io::Write;

use tracing::{debug, instrument};

use crate::application::services::DeleteOutcome;
use crate::cli::args::{
    Cli, Commands, ConfigsArgs, ConfigsCommands, LogsArgs, LogsCommands, ProjectArgs, ScopeArgs,
};
use crate::cli::error::CliResult;
use crate::cli::render::{self, OutputFormat};
use crate::config::Settings;
use crate::domain::{prefer_positional, require_project, ConfigTarget, LogTarget, NewConfig};
use crate::infrastructure::di::ServiceContainer;

/// Run the parsed command against the container, writing results to `out`.
///
/// `completion` and the bare invocation need no API and are handled in `main`.
pub fn execute_command(
    cli: &Cli,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    let format = OutputFormat::from_json_flag(cli.json);
    match &cli.command {
        Some(Commands::Configs(args)) => execute_configs(args, container, format, out),
        Some(Commands::Completion { .. }) | None => Ok(()),
    }
}

impl ScopeArgs {
    /// Fill unset values from an enclosing command's flags.
    fn or(&self, outer: &ScopeArgs) -> ScopeArgs {
        ScopeArgs {
            project: self.project.clone().or_else(|| outer.project.clone()),
            config: self.config.clone().or_else(|| outer.config.clone()),
        }
    }
}

impl From<&ProjectArgs> for ScopeArgs {
    fn from(args: &ProjectArgs) -> Self {
        ScopeArgs {
            project: args.project.clone(),
            config: None,
        }
    }
}

/// Resolve the addressed config: positional, then `--config`, then settings.
fn resolve_target(
    settings: &Settings,
    scope: &ScopeArgs,
    positional: Option<String>,
) -> CliResult<ConfigTarget> {
    let project = settings.project_or(scope.project.clone());
    let config = prefer_positional(positional, settings.config_or(scope.config.clone()));
    Ok(ConfigTarget::resolve(project, config)?)
}

fn execute_configs(
    args: &ConfigsArgs,
    container: &ServiceContainer,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let settings = container.settings.as_ref();
    let outer = ScopeArgs::from(&args.project);

    match &args.command {
        None => {
            let project = require_project(settings.project_or(outer.project.clone()))?;
            list_configs(container, &project, format, out)
        }
        Some(ConfigsCommands::Get { target, scope }) => {
            let target = resolve_target(settings, &scope.or(&outer), target.clone())?;
            get_config(container, &target, format, out)
        }
        Some(ConfigsCommands::Create {
            name_arg,
            project,
            name,
            environment,
            defaults: _,
            no_defaults,
            silent,
        }) => {
            let project = require_project(
                settings.project_or(project.project.clone().or_else(|| outer.project.clone())),
            )?;
            let new = NewConfig::resolve(
                name_arg.clone(),
                name.clone(),
                environment.clone(),
                !no_defaults,
            )?;
            create_config(container, &project, &new, *silent, format, out)
        }
        Some(ConfigsCommands::Update {
            target,
            scope,
            name,
            silent,
        }) => {
            let target = resolve_target(settings, &scope.or(&outer), target.clone())?;
            update_config(container, &target, name, *silent, format, out)
        }
        Some(ConfigsCommands::Delete {
            target,
            scope,
            silent,
            yes,
        }) => {
            let target = resolve_target(settings, &scope.or(&outer), target.clone())?;
            delete_config(container, &target, *silent, *yes, format, out)
        }
        Some(ConfigsCommands::Logs(logs)) => execute_logs(logs, &outer, container, format, out),
    }
}

fn execute_logs(
    args: &LogsArgs,
    outer: &ScopeArgs,
    container: &ServiceContainer,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let settings = container.settings.as_ref();
    let logs_scope = args.scope.or(outer);

    match &args.command {
        None => {
            let target = resolve_target(settings, &logs_scope, None)?;
            list_logs(container, &target, args.number, format, out)
        }
        Some(LogsCommands::Get { log_id, log, scope }) => {
            let config = resolve_target(settings, &scope.or(&logs_scope), None)?;
            let target = LogTarget::resolve(config, log_id.clone(), log.clone())?;
            get_log(container, &target, format, out)
        }
        Some(LogsCommands::Rollback {
            log_id,
            log,
            scope,
            silent,
        }) => {
            let config = resolve_target(settings, &scope.or(&logs_scope), None)?;
            let target = LogTarget::resolve(config, log_id.clone(), log.clone())?;
            rollback_log(container, &target, *silent, format, out)
        }
    }
}

#[instrument(skip(container, out))]
fn list_configs(
    container: &ServiceContainer,
    project: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let configs = container.config_service().list(project)?;
    render::write_configs(out, &configs, format)
}

#[instrument(skip(container, out))]
fn get_config(
    container: &ServiceContainer,
    target: &ConfigTarget,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let config = container.config_service().get(target)?;
    render::write_config(out, &config, format)
}

#[instrument(skip(container, out))]
fn create_config(
    container: &ServiceContainer,
    project: &str,
    new: &NewConfig,
    silent: bool,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let config = container.config_service().create(project, new)?;
    if !silent {
        render::write_config(out, &config, format)?;
    }
    Ok(())
}

#[instrument(skip(container, out))]
fn update_config(
    container: &ServiceContainer,
    target: &ConfigTarget,
    name: &str,
    silent: bool,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let config = container.config_service().rename(target, name)?;
    if !silent {
        render::write_config(out, &config, format)?;
    }
    Ok(())
}

/// Delete, then show the remaining configs unless silent.
///
/// A failing re-list is reported even though the delete already committed.
#[instrument(skip(container, out))]
fn delete_config(
    container: &ServiceContainer,
    target: &ConfigTarget,
    silent: bool,
    yes: bool,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let service = container.config_service();
    match service.delete(target, yes)? {
        DeleteOutcome::Declined => {
            debug!("delete declined, nothing sent");
            Ok(())
        }
        DeleteOutcome::Deleted => {
            if !silent {
                let configs = service.list(&target.project)?;
                render::write_configs(out, &configs, format)?;
            }
            Ok(())
        }
    }
}

#[instrument(skip(container, out))]
fn list_logs(
    container: &ServiceContainer,
    target: &ConfigTarget,
    number: usize,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let logs = container.log_service().recent(target, number)?;
    render::write_logs(out, &logs, format)
}

#[instrument(skip(container, out))]
fn get_log(
    container: &ServiceContainer,
    target: &LogTarget,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let log = container.log_service().get(target)?;
    render::write_log(out, &log, format)
}

#[instrument(skip(container, out))]
fn rollback_log(
    container: &ServiceContainer,
    target: &LogTarget,
    silent: bool,
    format: OutputFormat,
    out: &mut dyn Write,
) -> CliResult<()> {
    let log = container.log_service().rollback(target)?;
    if !silent {
        render::write_log(out, &log, format)?;
    }
    Ok(())
}
