use openhexa_mcp_client::ClientError;
use openhexa_mcp_client::model::Pipeline;
use rmcp::service::ServerInitializeError;
use serde_json::{Value, json};
use tokio::task::JoinError;

/// Note attached to a pipeline that exists remotely without any code
pub const MISSING_CODE_NOTE: &str = "Pipeline was created but code upload failed";

/// A failed tool call, rendered to the agent as `{"error": <message>}`
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(
        "OpenHEXA client not available. Please configure your OpenHEXA credentials (HEXA_SERVER_URL, HEXA_TOKEN)."
    )]
    ConfigurationMissing,

    #[error(transparent)]
    Transport(ClientError),

    #[error("{0}")]
    Remote(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    /// The pipeline was created but its code could not be attached
    #[error("{message}")]
    PartialFailure {
        message: String,
        pipeline: Box<Pipeline>,
    },
}

impl From<ClientError> for ToolError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::GraphQL(_) => ToolError::Remote(error.to_string()),
            other => ToolError::Transport(other),
        }
    }
}

impl ToolError {
    /// The JSON value returned to the agent in place of a result
    pub fn to_value(&self) -> Value {
        match self {
            ToolError::PartialFailure { message, pipeline } => json!({
                "error": message,
                "pipeline": pipeline,
                "note": MISSING_CODE_NOTE,
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Could not start transport: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create OpenHEXA client: {0}")]
    Client(#[from] ClientError),

    #[error("Failed to initialize MCP server: {0}")]
    McpInitializeError(Box<ServerInitializeError<std::io::Error>>),

    #[error("Failed to start server")]
    StartupError(#[from] JoinError),
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;
