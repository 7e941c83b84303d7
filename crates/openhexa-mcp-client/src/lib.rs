//! Client for the OpenHEXA GraphQL API
//!
//! The MCP server never talks HTTP directly. Every request goes through a
//! [`Transport`], which the server builds once at start-up from the configured
//! server URL and token, and which tests replace with a recording double.

pub mod error;
pub mod model;
pub mod queries;
mod request;
pub mod transport;

pub use error::ClientError;
pub use request::request;
pub use transport::{HttpTransport, Transport};
