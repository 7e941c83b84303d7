use openhexa_mcp_client::model::{Dataset, Pipeline, Workspace};
use rmcp::model::Tool;
use rmcp::schemars::JsonSchema;
use rmcp::{schemars, serde_json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::datasets::ListDatasetsInput;
use super::workspaces::ListWorkspacesInput;
use crate::errors::ToolError;
use crate::listing::{default_page, default_per_page};
use crate::openhexa::OpenHexa;
use crate::schema_from_type;

pub const SEARCH_RESOURCES_TOOL_NAME: &str = "search_resources";

#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Workspace,
    Dataset,
    Pipeline,
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct SearchResourcesInput {
    /// Text to look for, case-insensitively, in names and descriptions
    pub query: String,

    /// Only search this kind of resource
    #[serde(default)]
    pub resource_type: Option<ResourceType>,

    /// Scope datasets and pipelines to this workspace
    #[serde(default)]
    pub workspace_slug: Option<String>,
}

/// A matching resource, tagged with its kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "resource", rename_all = "lowercase")]
pub enum SearchHit {
    Workspace(Workspace),
    Dataset(Dataset),
    Pipeline(Pipeline),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub success: bool,
    pub query: String,
    pub results: Vec<SearchHit>,
    pub count: usize,
}

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool::new(
        SEARCH_RESOURCES_TOOL_NAME,
        "Search workspaces, datasets and pipelines by name or description. Only the first page of each listing is searched, and a listing that fails is skipped.",
        schema_from_type!(SearchResourcesInput),
    )]
}

impl OpenHexa {
    /// Search the first page of the workspace, dataset and pipeline listings, in that order.
    ///
    /// A listing that fails is logged and skipped; the others still contribute matches.
    pub async fn search_resources(
        &self,
        input: SearchResourcesInput,
    ) -> Result<SearchResults, ToolError> {
        self.ensure_available()?;
        let wanted = |kind| input.resource_type.is_none_or(|wanted| wanted == kind);
        let needle = input.query.to_lowercase();
        let mut results = Vec::new();

        if wanted(ResourceType::Workspace) {
            let workspaces = self.list_workspaces(ListWorkspacesInput::default()).await;
            if let Some(workspaces) = skip_failed(ResourceType::Workspace, workspaces) {
                results.extend(
                    workspaces
                        .items
                        .into_iter()
                        .filter(|workspace| {
                            mentions(
                                &needle,
                                Some(workspace.name.as_str()),
                                workspace.description.as_deref(),
                            )
                        })
                        .map(SearchHit::Workspace),
                );
            }
        }

        if wanted(ResourceType::Dataset) {
            let datasets = self
                .list_datasets(ListDatasetsInput {
                    workspace_slug: input.workspace_slug.clone(),
                    ..Default::default()
                })
                .await;
            if let Some(datasets) = skip_failed(ResourceType::Dataset, datasets) {
                results.extend(
                    datasets
                        .items
                        .into_iter()
                        .filter(|dataset| {
                            mentions(
                                &needle,
                                Some(dataset.name.as_str()),
                                dataset.description.as_deref(),
                            )
                        })
                        .map(SearchHit::Dataset),
                );
            }
        }

        if wanted(ResourceType::Pipeline) {
            let pipelines = self
                .pipelines_page(
                    input.workspace_slug.clone(),
                    default_page(),
                    default_per_page(),
                )
                .await;
            if let Some(pipelines) = skip_failed(ResourceType::Pipeline, pipelines) {
                results.extend(
                    pipelines
                        .items
                        .into_iter()
                        .filter(|pipeline| {
                            mentions(
                                &needle,
                                pipeline.name.as_deref(),
                                pipeline.description.as_deref(),
                            )
                        })
                        .map(SearchHit::Pipeline),
                );
            }
        }

        Ok(SearchResults {
            success: true,
            count: results.len(),
            query: input.query,
            results,
        })
    }
}

fn skip_failed<T>(kind: ResourceType, listing: Result<T, ToolError>) -> Option<T> {
    listing
        .inspect_err(|error| warn!(?kind, %error, "Skipping failed listing in search"))
        .ok()
}

fn mentions(needle: &str, name: Option<&str>, description: Option<&str>) -> bool {
    [name, description]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(needle))
}
