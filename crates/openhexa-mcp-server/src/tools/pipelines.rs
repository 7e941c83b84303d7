use openhexa_mcp_client::model::{Page, Pipeline, PipelineRun};
use openhexa_mcp_client::queries::InputVariables;
use openhexa_mcp_client::queries::pipelines::{
    self as queries, CreatePipelineInput, PipelineRunsVariables, PipelineVariables,
    PipelinesVariables, UploadPipelineInput,
};
use rmcp::model::Tool;
use rmcp::schemars::JsonSchema;
use rmcp::{schemars, serde_json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::ToolError;
use crate::listing::{Listing, Pagination, check_paging, default_page, default_per_page};
use crate::openhexa::OpenHexa;
use crate::packaging::package_pipeline;
use crate::schema_from_type;

pub const LIST_PIPELINES_TOOL_NAME: &str = "list_pipelines";
pub const GET_PIPELINE_DETAILS_TOOL_NAME: &str = "get_pipeline_details";
pub const GET_PIPELINE_RUNS_TOOL_NAME: &str = "get_pipeline_runs";
pub const CREATE_PIPELINE_TOOL_NAME: &str = "create_pipeline";

/// Name of the code version uploaded with a new pipeline
const INITIAL_VERSION_NAME: &str = "Initial version";
const DEFAULT_VERSION_DESCRIPTION: &str = "Created via MCP";

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct ListPipelinesInput {
    /// The workspace slug
    pub workspace_slug: String,

    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of pipelines per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct PipelineInput {
    /// The workspace slug
    pub workspace_slug: String,

    /// The pipeline code
    pub pipeline_code: String,
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct PipelineRunsInput {
    /// The workspace slug
    pub workspace_slug: String,

    /// The pipeline code
    pub pipeline_code: String,

    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of runs per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, Default, JsonSchema, Deserialize)]
pub struct CreatePipelineToolInput {
    /// The slug of the workspace to create the pipeline in
    pub workspace_slug: String,

    /// Pipeline name. The pipeline code is derived from it by OpenHEXA.
    pub name: String,

    /// Python source of the pipeline, uploaded as its initial version
    pub code_content: String,

    /// Description of the initial version
    #[serde(default)]
    pub description: Option<String>,

    /// One of extraction, transformation, loading or computation
    #[serde(default)]
    pub functional_type: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedPipeline {
    pub success: bool,
    pub pipeline: Pipeline,
    pub message: String,
}

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            LIST_PIPELINES_TOOL_NAME,
            "List the pipelines of a workspace, one page at a time.",
            schema_from_type!(ListPipelinesInput),
        ),
        Tool::new(
            GET_PIPELINE_DETAILS_TOOL_NAME,
            "Get the details of a pipeline by workspace and pipeline code, including its latest runs.",
            schema_from_type!(PipelineInput),
        ),
        Tool::new(
            GET_PIPELINE_RUNS_TOOL_NAME,
            "List the runs of a pipeline, one page at a time.",
            schema_from_type!(PipelineRunsInput),
        ),
        Tool::new(
            CREATE_PIPELINE_TOOL_NAME,
            "Create a pipeline in a workspace and upload its Python code as the initial version. If the upload fails, the created pipeline is returned along with the error and has no code until one is uploaded.",
            schema_from_type!(CreatePipelineToolInput),
        ),
    ]
}

impl OpenHexa {
    pub async fn list_pipelines(
        &self,
        input: ListPipelinesInput,
    ) -> Result<Listing<Pipeline>, ToolError> {
        self.ensure_available()?;
        self.pipelines_page(Some(input.workspace_slug), input.page, input.per_page)
            .await
    }

    /// One page of pipelines, across workspaces when no slug is given
    pub(crate) async fn pipelines_page(
        &self,
        workspace_slug: Option<String>,
        page: u32,
        per_page: u32,
    ) -> Result<Listing<Pipeline>, ToolError> {
        check_paging(page, per_page)?;
        let pipelines = self
            .request::<queries::Pipelines>(PipelinesVariables {
                workspace_slug,
                page,
                per_page,
            })
            .await?
            .pipelines;

        let pagination = Pagination::new(page, per_page).with_total_pages(&pipelines);
        Ok(Listing::new("pipelines", pipelines.items).paginated(pagination))
    }

    pub async fn get_pipeline_details(&self, input: PipelineInput) -> Result<Pipeline, ToolError> {
        self.ensure_available()?;
        self.request::<queries::PipelineByCode>(PipelineVariables {
            workspace_slug: input.workspace_slug.clone(),
            code: input.pipeline_code.clone(),
        })
        .await?
        .pipeline_by_code
        .ok_or_else(|| pipeline_not_found(&input.workspace_slug, &input.pipeline_code))
    }

    pub async fn get_pipeline_runs(
        &self,
        input: PipelineRunsInput,
    ) -> Result<Listing<PipelineRun>, ToolError> {
        self.ensure_available()?;
        check_paging(input.page, input.per_page)?;
        let pipeline = self
            .request::<queries::PipelineRuns>(PipelineRunsVariables {
                workspace_slug: input.workspace_slug.clone(),
                code: input.pipeline_code.clone(),
                page: input.page,
                per_page: input.per_page,
            })
            .await?
            .pipeline_by_code
            .ok_or_else(|| pipeline_not_found(&input.workspace_slug, &input.pipeline_code))?;

        let runs = pipeline.runs.unwrap_or(Page {
            items: vec![],
            page_number: None,
            total_pages: None,
            total_items: None,
        });
        let pagination = Pagination::new(input.page, input.per_page)
            .with_total_pages(&runs)
            .with_total_items(&runs);
        Ok(Listing::new("runs", runs.items).paginated(pagination))
    }

    /// Create a pipeline, then upload its code as the initial version.
    ///
    /// Nothing is uploaded unless creation succeeded. Once the pipeline exists,
    /// any later failure is a [`ToolError::PartialFailure`] carrying it; the
    /// pipeline is never rolled back.
    pub async fn create_pipeline(
        &self,
        input: CreatePipelineToolInput,
    ) -> Result<CreatedPipeline, ToolError> {
        self.ensure_available()?;
        if input.workspace_slug.is_empty() || input.name.is_empty() || input.code_content.is_empty()
        {
            return Err(ToolError::InvalidInput(
                "workspace_slug, name, and code_content are required".to_string(),
            ));
        }

        let created = self
            .request::<queries::CreatePipeline>(InputVariables {
                input: CreatePipelineInput {
                    name: input.name.clone(),
                    workspace_slug: input.workspace_slug.clone(),
                    functional_type: input
                        .functional_type
                        .filter(|kind| !kind.is_empty())
                        .map(|kind| kind.to_lowercase()),
                    tags: input.tags.filter(|tags| !tags.is_empty()),
                },
            })
            .await?
            .create_pipeline;

        if !created.success {
            return Err(ToolError::Remote(format!(
                "Failed to create pipeline: {:?}",
                created.errors
            )));
        }
        let pipeline = created.pipeline.ok_or_else(|| {
            ToolError::Remote("Pipeline creation succeeded but no pipeline data returned".to_string())
        })?;
        info!(code = %pipeline.code, workspace = %input.workspace_slug, "Created pipeline");

        let zipfile = match package_pipeline(&input.code_content) {
            Ok(zipfile) => zipfile,
            Err(error) => {
                return Err(partial_failure(
                    format!("Failed to create ZIP file: {error}"),
                    pipeline,
                ));
            }
        };

        let uploaded = self
            .request::<queries::UploadPipeline>(InputVariables {
                input: UploadPipelineInput {
                    workspace_slug: input.workspace_slug,
                    pipeline_code: pipeline.code.clone(),
                    name: INITIAL_VERSION_NAME.to_string(),
                    description: input
                        .description
                        .filter(|description| !description.is_empty())
                        .unwrap_or_else(|| DEFAULT_VERSION_DESCRIPTION.to_string()),
                    zipfile,
                },
            })
            .await;

        match uploaded {
            Ok(data) if data.upload_pipeline.success => Ok(CreatedPipeline {
                success: true,
                pipeline,
                message: format!(
                    "Pipeline '{}' created and code uploaded successfully",
                    input.name
                ),
            }),
            Ok(data) => Err(partial_failure(
                format!(
                    "Failed to upload pipeline code: {:?}",
                    data.upload_pipeline.errors
                ),
                pipeline,
            )),
            Err(error) => Err(partial_failure(
                format!("Failed to upload pipeline code: {error}"),
                pipeline,
            )),
        }
    }
}

fn partial_failure(message: String, pipeline: Pipeline) -> ToolError {
    warn!(code = %pipeline.code, "{message}");
    ToolError::PartialFailure {
        message,
        pipeline: Box::new(pipeline),
    }
}

fn pipeline_not_found(workspace_slug: &str, code: &str) -> ToolError {
    ToolError::NotFound(format!(
        "Pipeline '{code}' not found in workspace '{workspace_slug}'"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SpyTransport, openhexa};
    use serde_json::{Value, json};
    use tracing_test::traced_test;

    fn input() -> CreatePipelineToolInput {
        CreatePipelineToolInput {
            workspace_slug: "malaria".to_string(),
            name: "Weekly export".to_string(),
            code_content: "print('hello')\n".to_string(),
            functional_type: Some("Extraction".to_string()),
            ..Default::default()
        }
    }

    fn created() -> Value {
        json!({
            "createPipeline": {
                "success": true,
                "errors": [],
                "pipeline": {
                    "id": "p1",
                    "name": "Weekly export",
                    "code": "weekly-export",
                    "type": "zipFile",
                    "workspace": { "slug": "malaria" }
                }
            }
        })
    }

    #[tokio::test]
    async fn it_creates_and_uploads() {
        let (openhexa, spy) = openhexa(
            SpyTransport::new()
                .data("CreatePipeline", created())
                .data(
                    "UploadPipeline",
                    json!({ "uploadPipeline": { "success": true, "errors": [] } }),
                ),
        );

        let result = openhexa.create_pipeline(input()).await.unwrap();

        assert_eq!(spy.operations(), ["CreatePipeline", "UploadPipeline"]);
        assert_eq!(
            spy.variables("CreatePipeline"),
            Some(json!({
                "input": {
                    "name": "Weekly export",
                    "workspaceSlug": "malaria",
                    "functionalType": "extraction"
                }
            }))
        );
        let upload = spy.variables("UploadPipeline").unwrap();
        assert_eq!(upload["input"]["pipelineCode"], "weekly-export");
        assert_eq!(upload["input"]["name"], "Initial version");
        assert_eq!(upload["input"]["description"], "Created via MCP");
        assert_eq!(
            upload["input"]["zipfile"],
            package_pipeline("print('hello')\n").unwrap()
        );
        assert_eq!(
            result.message,
            "Pipeline 'Weekly export' created and code uploaded successfully"
        );
        assert_eq!(
            serde_json::to_value(&result.pipeline).unwrap(),
            created()["createPipeline"]["pipeline"]
        );
    }

    #[tokio::test]
    async fn rejected_creation_never_uploads() {
        let (openhexa, spy) = openhexa(SpyTransport::new().data(
            "CreatePipeline",
            json!({
                "createPipeline": { "success": false, "errors": ["PERMISSION_DENIED"], "pipeline": null }
            }),
        ));

        let error = openhexa.create_pipeline(input()).await.unwrap_err();

        assert_eq!(
            error.to_value(),
            json!({ "error": "Failed to create pipeline: [\"PERMISSION_DENIED\"]" })
        );
        assert_eq!(spy.operations(), ["CreatePipeline"]);
    }

    #[tokio::test]
    async fn failed_creation_request_never_uploads() {
        let (openhexa, spy) =
            openhexa(SpyTransport::new().errors("CreatePipeline", vec!["Workspace is archived"]));

        let error = openhexa.create_pipeline(input()).await.unwrap_err();

        assert_eq!(error.to_string(), "GraphQL error: Workspace is archived");
        assert_eq!(spy.operations(), ["CreatePipeline"]);
    }

    #[tokio::test]
    #[traced_test]
    async fn rejected_upload_returns_the_created_pipeline() {
        let (openhexa, _) = openhexa(
            SpyTransport::new().data("CreatePipeline", created()).data(
                "UploadPipeline",
                json!({ "uploadPipeline": { "success": false, "errors": ["INVALID_CONFIG"] } }),
            ),
        );

        let value = openhexa.create_pipeline(input()).await.unwrap_err().to_value();

        assert_eq!(
            value["error"],
            "Failed to upload pipeline code: [\"INVALID_CONFIG\"]"
        );
        assert_eq!(value["pipeline"], created()["createPipeline"]["pipeline"]);
        assert_eq!(value["note"], "Pipeline was created but code upload failed");
        assert!(logs_contain("code=weekly-export"));
    }

    #[tokio::test]
    async fn failed_upload_request_returns_the_created_pipeline() {
        let (openhexa, _) = openhexa(
            SpyTransport::new()
                .data("CreatePipeline", created())
                .fail("UploadPipeline", "connection reset"),
        );

        let error = openhexa.create_pipeline(input()).await.unwrap_err();

        match error {
            ToolError::PartialFailure { message, pipeline } => {
                assert_eq!(
                    message,
                    "Failed to upload pipeline code: Error in response: connection reset"
                );
                assert_eq!(pipeline.code, "weekly-export");
            }
            other => panic!("expected a partial failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_locally() {
        let (openhexa, spy) = openhexa(SpyTransport::new());

        let error = openhexa
            .create_pipeline(CreatePipelineToolInput {
                code_content: String::new(),
                ..input()
            })
            .await
            .unwrap_err();

        assert!(matches!(error, ToolError::InvalidInput(_)));
        assert!(spy.calls().is_empty());
    }

    #[tokio::test]
    async fn it_pages_runs() {
        let (openhexa, spy) = openhexa(SpyTransport::new().data(
            "PipelineRuns",
            json!({
                "pipelineByCode": {
                    "id": "p1",
                    "code": "weekly-export",
                    "runs": {
                        "items": [
                            { "id": "r2", "status": "success", "duration": 42, "triggerMode": "manual" },
                            { "id": "r1", "status": "failed", "duration": 3, "triggerMode": "scheduled" }
                        ],
                        "pageNumber": 1,
                        "totalPages": 5,
                        "totalItems": 9
                    }
                }
            }),
        ));

        let listing = openhexa
            .get_pipeline_runs(PipelineRunsInput {
                workspace_slug: "malaria".to_string(),
                pipeline_code: "weekly-export".to_string(),
                page: 1,
                per_page: 2,
            })
            .await
            .unwrap();

        assert_eq!(
            spy.variables("PipelineRuns"),
            Some(json!({ "workspaceSlug": "malaria", "code": "weekly-export", "page": 1, "perPage": 2 }))
        );
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["total_pages"], 5);
        assert_eq!(value["total_items"], 9);
        assert_eq!(value["runs"][1]["triggerMode"], "scheduled");
    }

    #[tokio::test]
    async fn it_reports_unknown_pipelines() {
        let (openhexa, _) =
            openhexa(SpyTransport::new().data("PipelineByCode", json!({ "pipelineByCode": null })));

        let error = openhexa
            .get_pipeline_details(PipelineInput {
                workspace_slug: "malaria".to_string(),
                pipeline_code: "missing".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Pipeline 'missing' not found in workspace 'malaria'"
        );
    }
}
