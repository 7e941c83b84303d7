//! An MCP server exposing the OpenHEXA data platform to AI agents

pub mod errors;
pub mod json_schema;
pub mod listing;
pub mod openhexa;
pub mod packaging;
pub mod server;
pub mod server_handler;
pub mod tools;

#[cfg(test)]
mod test_support;
