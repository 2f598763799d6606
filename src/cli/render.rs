//! Table and JSON rendering of API payloads
//!
//! JSON output is the serialized payload itself; tables are for humans.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::error::{CliError, CliResult};
use crate::domain::{AuditLog, ConfigInfo};

/// Column header of config tables.
pub const CONFIG_HEADER: [&str; 6] = [
    "name",
    "missing_variables",
    "deployed_at",
    "created_at",
    "stage",
    "project",
];

/// Output format selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T, what: &str) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| CliError::Render {
        context: what.to_string(),
        source,
    })?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn config_row(config: &ConfigInfo) -> [String; 6] {
    [
        config.name.clone(),
        config.missing_variables.join(", "),
        config.deployed_at.clone().unwrap_or_default(),
        config.created_at.clone(),
        config.environment.clone(),
        config.project.clone(),
    ]
}

fn config_table<'a>(configs: impl IntoIterator<Item = &'a ConfigInfo>) -> String {
    let mut builder = Builder::default();
    builder.push_record(CONFIG_HEADER);
    for config in configs {
        builder.push_record(config_row(config));
    }
    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

/// Render a list of configs.
pub fn write_configs(
    out: &mut dyn Write,
    configs: &[ConfigInfo],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, configs, "configs"),
        OutputFormat::Table => {
            writeln!(out, "{}", config_table(configs))?;
            Ok(())
        }
    }
}

/// Render a single config (a one-row table, or a JSON object).
pub fn write_config(out: &mut dyn Write, config: &ConfigInfo, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, config, "config"),
        OutputFormat::Table => {
            writeln!(out, "{}", config_table([config]))?;
            Ok(())
        }
    }
}

fn log_block(log: &AuditLog) -> String {
    let mut block = format!(
        "{} {}\nUser: {}\nDate: {}\n",
        "log".yellow(),
        log.id.yellow(),
        log.author(),
        log.created_at
    );
    block.push('\n');
    for line in log.text.lines() {
        block.push_str(&format!("    {line}\n"));
    }
    block
}

/// Render audit log entries, in the order given.
pub fn write_logs(out: &mut dyn Write, logs: &[AuditLog], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, logs, "logs"),
        OutputFormat::Table => {
            let blocks: Vec<String> = logs.iter().map(log_block).collect();
            write!(out, "{}", blocks.join("\n"))?;
            Ok(())
        }
    }
}

/// Render a single audit log entry.
pub fn write_log(out: &mut dyn Write, log: &AuditLog, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, log, "log"),
        OutputFormat::Table => {
            write!(out, "{}", log_block(log))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, missing: &[&str]) -> ConfigInfo {
        ConfigInfo {
            name: name.into(),
            environment: "backend".into(),
            project: "api".into(),
            created_at: "2019-07-01T10:00:00.000Z".into(),
            deployed_at: None,
            missing_variables: missing.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn render(configs: &[ConfigInfo]) -> String {
        let mut out = Vec::new();
        write_configs(&mut out, configs, OutputFormat::Table).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn given_configs_when_rendering_table_then_header_columns_in_order() {
        let output = render(&[config("backend_dev", &[])]);
        let header = output.lines().next().unwrap();

        let positions: Vec<usize> = CONFIG_HEADER
            .iter()
            .map(|column| header.find(column).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "header: {header}");
    }

    #[test]
    fn given_missing_variables_when_rendering_table_then_joined_with_comma() {
        let output = render(&[config("backend_dev", &["DB_URL", "API_KEY"])]);

        assert!(output.contains("DB_URL, API_KEY"), "{output}");
    }

    #[test]
    fn given_three_configs_when_rendering_table_then_one_row_each() {
        let configs = [
            config("backend_dev", &[]),
            config("backend_stg", &[]),
            config("backend_prd", &[]),
        ];

        let output = render(&configs);

        for name in ["backend_dev", "backend_stg", "backend_prd"] {
            assert_eq!(
                output.lines().filter(|l| l.contains(name)).count(),
                1,
                "{output}"
            );
        }
    }

    #[test]
    fn given_config_when_rendering_json_then_keys_follow_schema() {
        let mut out = Vec::new();
        write_config(&mut out, &config("backend_dev", &[]), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["stage"], "backend");
        assert!(value["deployed_at"].is_null());
        assert!(value.get("environment").is_none());
    }
}
