//! Logging config and subscriber setup
//!
//! stdout belongs to the stdio MCP transport, so logs go either to a rolling
//! file or to stderr.

mod defaults;
mod log_rotation_kind;
mod parsers;

use std::path::Path;

use log_rotation_kind::LogRotationKind;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::Config;

/// Prefix of the rolling log files
const LOG_FILE_PREFIX: &str = "openhexa_mcp_server";

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(
        default = "defaults::log_level",
        deserialize_with = "parsers::from_str"
    )]
    #[schemars(schema_with = "level")]
    pub level: Level,

    /// Directory to write log files to, instead of stderr
    #[serde(default)]
    pub path: Option<std::path::PathBuf>,

    /// Log file rotation period to use when a log path is provided
    /// [default: Hourly]
    #[serde(default = "defaults::default_rotation")]
    pub rotation: LogRotationKind,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            path: None,
            rotation: defaults::default_rotation(),
        }
    }
}

impl Logging {
    fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        if self.level == Level::INFO {
            env_filter = env_filter.add_directive("rmcp=warn".parse()?);
        }
        Ok(env_filter)
    }
}

/// Sets up either file logging or stderr logging depending on provided configuration options
pub fn setup_logging(config: &Config) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let env_filter = config.logging.env_filter()?;

    match &config.logging.path {
        Some(path) => setup_file_logging(path, env_filter, config.logging.rotation.clone()),
        None => setup_stderr_logging(env_filter),
    }
}

/// Sets up rolling file appender logging but falls back to stderr logging on failure
fn setup_file_logging(
    log_path: &Path,
    env_filter: EnvFilter,
    log_rotation: LogRotationKind,
) -> Result<Option<WorkerGuard>, anyhow::Error> {
    if let Err(error) = std::fs::create_dir_all(log_path) {
        eprintln!(
            "Could not create log directory {}: {error} - falling back to stderr",
            log_path.display()
        );
        return setup_stderr_logging(env_filter);
    }

    let (non_blocking_writer, guard) = match RollingFileAppender::builder()
        .rotation(log_rotation.into())
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_path)
    {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(error) => {
            eprintln!("Log file setup failed: {error} - falling back to stderr");
            return setup_stderr_logging(env_filter);
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(Some(guard))
}

fn setup_stderr_logging(env_filter: EnvFilter) -> Result<Option<WorkerGuard>, anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false),
        )
        .init();

    Ok(None)
}

fn level(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    // Only exists to describe the accepted values
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("trace", Level::TRACE)]
    #[case("DEBUG", Level::DEBUG)]
    #[case("warn", Level::WARN)]
    fn it_parses_levels(#[case] level: &str, #[case] expected: Level) {
        let logging: Logging = serde_json::from_value(json!({ "level": level })).unwrap();

        assert_eq!(logging.level, expected);
    }

    #[test]
    fn it_rejects_unknown_levels() {
        assert!(serde_json::from_value::<Logging>(json!({ "level": "loud" })).is_err());
    }

    #[test]
    fn it_logs_to_stderr_hourly_by_default() {
        let logging: Logging = serde_json::from_value(json!({})).unwrap();

        assert_eq!(logging.level, Level::INFO);
        assert!(logging.path.is_none());
        assert_eq!(logging.rotation, LogRotationKind::Hourly);
    }
}
