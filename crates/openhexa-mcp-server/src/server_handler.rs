use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorCode, Implementation, JsonObject,
    ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{McpError, ToolError};
use crate::openhexa::OpenHexa;
use crate::tools::connections::LIST_CONNECTIONS_TOOL_NAME;
use crate::tools::datasets::{
    GET_DATASET_DETAILS_TOOL_NAME, GET_DATASET_VERSION_DETAILS_TOOL_NAME,
    LIST_DATASET_VERSIONS_TOOL_NAME, LIST_DATASETS_BY_CREATOR_TOOL_NAME, LIST_DATASETS_TOOL_NAME,
    SEARCH_DATASETS_TOOL_NAME,
};
use crate::tools::files::{
    GET_DATASET_FILE_DETAILS_TOOL_NAME, LIST_DATASET_FILES_TOOL_NAME,
    PREVIEW_DATASET_FILE_TOOL_NAME,
};
use crate::tools::pipelines::{
    CREATE_PIPELINE_TOOL_NAME, GET_PIPELINE_DETAILS_TOOL_NAME, GET_PIPELINE_RUNS_TOOL_NAME,
    LIST_PIPELINES_TOOL_NAME,
};
use crate::tools::search::SEARCH_RESOURCES_TOOL_NAME;
use crate::tools::webapps::LIST_WEBAPPS_TOOL_NAME;
use crate::tools::workspaces::{
    GET_WORKSPACE_DETAILS_TOOL_NAME, LIST_WORKSPACE_MEMBERS_TOOL_NAME, LIST_WORKSPACES_TOOL_NAME,
};
use crate::tools;

/// Serves the OpenHEXA tools to MCP clients.
///
/// Tool failures are returned as successful protocol responses flagged as
/// errors, whose content is `{"error": <message>}`. Only unknown tools and
/// undecodable arguments are protocol errors.
#[derive(Clone)]
pub struct OpenHexaMcpServerHandler {
    openhexa: OpenHexa,
    tools: Arc<Vec<rmcp::model::Tool>>,
}

impl OpenHexaMcpServerHandler {
    pub fn new(openhexa: OpenHexa) -> Self {
        Self {
            openhexa,
            tools: Arc::new(tools::tools()),
        }
    }

    /// Run a tool by name
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = name, "Calling tool");
        let openhexa = &self.openhexa;
        if !openhexa.is_available() && self.tools.iter().any(|tool| tool.name == name) {
            return render::<()>(Err(ToolError::ConfigurationMissing));
        }
        let arguments = Value::Object(arguments.unwrap_or_default());

        match name {
            LIST_WORKSPACES_TOOL_NAME => {
                render(openhexa.list_workspaces(convert_arguments(arguments)?).await)
            }
            GET_WORKSPACE_DETAILS_TOOL_NAME => {
                render(openhexa.get_workspace_details(convert_arguments(arguments)?).await)
            }
            LIST_WORKSPACE_MEMBERS_TOOL_NAME => {
                render(openhexa.list_workspace_members(convert_arguments(arguments)?).await)
            }
            LIST_DATASETS_TOOL_NAME => {
                render(openhexa.list_datasets(convert_arguments(arguments)?).await)
            }
            GET_DATASET_DETAILS_TOOL_NAME => {
                render(openhexa.get_dataset_details(convert_arguments(arguments)?).await)
            }
            SEARCH_DATASETS_TOOL_NAME => {
                render(openhexa.search_datasets(convert_arguments(arguments)?).await)
            }
            LIST_DATASETS_BY_CREATOR_TOOL_NAME => {
                render(openhexa.list_datasets_by_creator(convert_arguments(arguments)?).await)
            }
            LIST_DATASET_VERSIONS_TOOL_NAME => {
                render(openhexa.list_dataset_versions(convert_arguments(arguments)?).await)
            }
            GET_DATASET_VERSION_DETAILS_TOOL_NAME => render(
                openhexa
                    .get_dataset_version_details(convert_arguments(arguments)?)
                    .await,
            ),
            LIST_DATASET_FILES_TOOL_NAME => {
                render(openhexa.list_dataset_files(convert_arguments(arguments)?).await)
            }
            GET_DATASET_FILE_DETAILS_TOOL_NAME => {
                render(openhexa.get_dataset_file_details(convert_arguments(arguments)?).await)
            }
            PREVIEW_DATASET_FILE_TOOL_NAME => {
                render(openhexa.preview_dataset_file(convert_arguments(arguments)?).await)
            }
            LIST_PIPELINES_TOOL_NAME => {
                render(openhexa.list_pipelines(convert_arguments(arguments)?).await)
            }
            GET_PIPELINE_DETAILS_TOOL_NAME => {
                render(openhexa.get_pipeline_details(convert_arguments(arguments)?).await)
            }
            GET_PIPELINE_RUNS_TOOL_NAME => {
                render(openhexa.get_pipeline_runs(convert_arguments(arguments)?).await)
            }
            CREATE_PIPELINE_TOOL_NAME => {
                render(openhexa.create_pipeline(convert_arguments(arguments)?).await)
            }
            LIST_CONNECTIONS_TOOL_NAME => {
                render(openhexa.list_connections(convert_arguments(arguments)?).await)
            }
            LIST_WEBAPPS_TOOL_NAME => {
                render(openhexa.list_webapps(convert_arguments(arguments)?).await)
            }
            SEARCH_RESOURCES_TOOL_NAME => {
                render(openhexa.search_resources(convert_arguments(arguments)?).await)
            }
            _ => Err(tool_not_found(name)),
        }
    }
}

impl ServerHandler for OpenHexaMcpServerHandler {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools.as_ref().clone(),
        })
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "OpenHEXA".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Tools to explore and manage the workspaces, datasets, pipelines, connections and webapps of an OpenHEXA instance.".to_string(),
            ),
            ..Default::default()
        }
    }
}

fn render<T: Serialize>(result: Result<T, ToolError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => Ok(CallToolResult::success(vec![Content::json(value)?])),
        Err(error) => {
            warn!("Tool call failed: {error}");
            Ok(CallToolResult::error(vec![Content::json(error.to_value())?]))
        }
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}

fn convert_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, McpError> {
    serde_json::from_value(arguments)
        .map_err(|error| McpError::new(ErrorCode::INVALID_PARAMS, error.to_string(), None))
}
