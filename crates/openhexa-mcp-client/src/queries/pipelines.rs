use serde::{Deserialize, Serialize};

use super::{InputVariables, graphql_query};
use crate::model::{Page, Pipeline};

graphql_query!(
    /// A page of pipelines, optionally scoped to a workspace
    Pipelines,
    PipelinesVariables,
    PipelinesData,
    r#"
    query Pipelines($workspaceSlug: String, $page: Int!, $perPage: Int!) {
        pipelines(workspaceSlug: $workspaceSlug, page: $page, perPage: $perPage) {
            items {
                id
                code
                name
                description
                type
                functionalType
                tags {
                    name
                }
                createdAt
                updatedAt
            }
            pageNumber
            totalPages
            totalItems
        }
    }
    "#
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinesVariables {
    /// Without a slug, OpenHEXA lists the pipelines of every workspace the token can see
    pub workspace_slug: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Deserialize)]
pub struct PipelinesData {
    pub pipelines: Page<Pipeline>,
}

graphql_query!(
    /// A single pipeline, by code, with its latest runs
    PipelineByCode,
    PipelineVariables,
    PipelineData,
    r#"
    query PipelineByCode($workspaceSlug: String!, $code: String!) {
        pipelineByCode(workspaceSlug: $workspaceSlug, code: $code) {
            id
            code
            name
            description
            type
            functionalType
            tags {
                name
            }
            createdAt
            updatedAt
            workspace {
                slug
                name
            }
            runs {
                items {
                    id
                    status
                    executionDate
                    duration
                    triggerMode
                }
                pageNumber
                totalPages
                totalItems
            }
        }
    }
    "#
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineVariables {
    pub workspace_slug: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineData {
    pub pipeline_by_code: Option<Pipeline>,
}

graphql_query!(
    /// A page of the runs of a pipeline
    PipelineRuns,
    PipelineRunsVariables,
    PipelineRunsData,
    r#"
    query PipelineRuns($workspaceSlug: String!, $code: String!, $page: Int!, $perPage: Int!) {
        pipelineByCode(workspaceSlug: $workspaceSlug, code: $code) {
            id
            code
            runs(page: $page, perPage: $perPage) {
                items {
                    id
                    status
                    executionDate
                    duration
                    triggerMode
                }
                pageNumber
                totalPages
                totalItems
            }
        }
    }
    "#
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunsVariables {
    pub workspace_slug: String,
    pub code: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunsData {
    pub pipeline_by_code: Option<Pipeline>,
}

graphql_query!(
    /// Create an empty pipeline in a workspace
    CreatePipeline,
    InputVariables<CreatePipelineInput>,
    CreatePipelineData,
    r#"
    mutation CreatePipeline($input: CreatePipelineInput!) {
        createPipeline(input: $input) {
            success
            errors
            pipeline {
                id
                name
                code
                type
                workspace {
                    slug
                }
            }
        }
    }
    "#
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipelineInput {
    pub name: String,
    pub workspace_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functional_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipelineData {
    pub create_pipeline: CreatePipelineResult,
}

#[derive(Debug, Deserialize)]
pub struct CreatePipelineResult {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    pub pipeline: Option<Pipeline>,
}

graphql_query!(
    /// Upload a zipped code version to an existing pipeline
    UploadPipeline,
    InputVariables<UploadPipelineInput>,
    UploadPipelineData,
    r#"
    mutation UploadPipeline($input: UploadPipelineInput!) {
        uploadPipeline(input: $input) {
            success
            errors
        }
    }
    "#
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPipelineInput {
    pub workspace_slug: String,
    pub pipeline_code: String,
    pub name: String,
    pub description: String,
    /// Base64-encoded ZIP archive
    pub zipfile: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPipelineData {
    pub upload_pipeline: UploadPipelineResult,
}

#[derive(Debug, Deserialize)]
pub struct UploadPipelineResult {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}
