use openhexa_mcp_server::server::Transport;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{logging::Logging, openhexa::OpenHexaConfig};

/// Configuration for the OpenHEXA MCP server
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// How to reach the OpenHEXA instance
    pub openhexa: OpenHexaConfig,

    /// Logging configuration
    pub logging: Logging,

    /// The type of server transport to use
    pub transport: Transport,
}
