//! Runtime utilities
//!
//! This module is only used by the binaries and covers reading the
//! configuration and installing the tracing subscriber.

mod config;
mod logging;
mod openhexa;

use std::path::Path;

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
pub use logging::setup_logging;

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix of the env variables mirroring the config file
const ENV_PREFIX: &str = "OPENHEXA_MCP_";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(hexa_common_env())
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(hexa_common_env())
        .join(Yaml::file(yaml_path))
        .extract()
}

/// Figment provider mapping the variables shared with the OpenHEXA SDK and
/// toolbox into the `openhexa` section of the config
fn hexa_common_env() -> Env {
    Env::prefixed("HEXA_")
        .only(&["server_url", "token"])
        .map(|key| match key.to_string().to_lowercase().as_str() {
            "server_url" => "openhexa:server_url".into(),
            "token" => "openhexa:token".into(),

            // Filtered out by `only` above
            other => other.to_string().into(),
        })
        .split(":")
}
