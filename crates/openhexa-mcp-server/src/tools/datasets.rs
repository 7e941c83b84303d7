use openhexa_mcp_client::model::{Dataset, DatasetVersion};
use openhexa_mcp_client::queries::IdVariables;
use openhexa_mcp_client::queries::datasets::{self as queries, DatasetsVariables};
use rmcp::model::Tool;
use rmcp::schemars::JsonSchema;
use rmcp::{schemars, serde_json};
use serde::{Deserialize, Serialize};

use crate::errors::ToolError;
use crate::listing::{
    Listing, Pagination, check_paging, default_page, default_per_page, default_search_per_page,
};
use crate::openhexa::OpenHexa;
use crate::schema_from_type;

pub const LIST_DATASETS_TOOL_NAME: &str = "list_datasets";
pub const GET_DATASET_DETAILS_TOOL_NAME: &str = "get_dataset_details";
pub const SEARCH_DATASETS_TOOL_NAME: &str = "search_datasets";
pub const LIST_DATASETS_BY_CREATOR_TOOL_NAME: &str = "list_datasets_by_creator";
pub const LIST_DATASET_VERSIONS_TOOL_NAME: &str = "list_dataset_versions";
pub const GET_DATASET_VERSION_DETAILS_TOOL_NAME: &str = "get_dataset_version_details";

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct ListDatasetsInput {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of datasets per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Only keep the datasets of this workspace. Applies to the fetched page only.
    #[serde(default)]
    pub workspace_slug: Option<String>,
}

impl Default for ListDatasetsInput {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            workspace_slug: None,
        }
    }
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct DatasetInput {
    /// The dataset ID
    pub dataset_id: String,
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct SearchDatasetsInput {
    /// Text to look for in dataset names and descriptions
    #[serde(alias = "query")]
    pub query_str: String,

    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of datasets per page
    #[serde(default = "default_search_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct DatasetsByCreatorInput {
    /// Email of the user who created the datasets
    pub creator_email: String,

    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of datasets fetched per page, before filtering
    #[serde(default = "default_search_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct DatasetVersionInput {
    /// The dataset version ID
    pub version_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetVersionDetails {
    pub version: DatasetVersion,
}

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            LIST_DATASETS_TOOL_NAME,
            "List datasets, one page at a time. When a workspace slug is given, only the datasets of that workspace within the fetched page are returned.",
            schema_from_type!(ListDatasetsInput),
        ),
        Tool::new(
            GET_DATASET_DETAILS_TOOL_NAME,
            "Get the details of a dataset by ID, including its versions.",
            schema_from_type!(DatasetInput),
        ),
        Tool::new(
            SEARCH_DATASETS_TOOL_NAME,
            "Search datasets by name or description.",
            schema_from_type!(SearchDatasetsInput),
        ),
        Tool::new(
            LIST_DATASETS_BY_CREATOR_TOOL_NAME,
            "List the datasets created by a user, identified by email. Only the fetched page is filtered.",
            schema_from_type!(DatasetsByCreatorInput),
        ),
        Tool::new(
            LIST_DATASET_VERSIONS_TOOL_NAME,
            "List the versions of a dataset.",
            schema_from_type!(DatasetInput),
        ),
        Tool::new(
            GET_DATASET_VERSION_DETAILS_TOOL_NAME,
            "Get the details of a dataset version by ID, including its files.",
            schema_from_type!(DatasetVersionInput),
        ),
    ]
}

impl OpenHexa {
    pub async fn list_datasets(
        &self,
        input: ListDatasetsInput,
    ) -> Result<Listing<Dataset>, ToolError> {
        self.ensure_available()?;
        check_paging(input.page, input.per_page)?;
        let page = self
            .request::<queries::Datasets>(DatasetsVariables {
                query: None,
                page: input.page,
                per_page: input.per_page,
            })
            .await?
            .datasets;

        let pagination = Pagination::new(input.page, input.per_page).with_total_pages(&page);
        let datasets = match input.workspace_slug.as_deref() {
            Some(slug) => page
                .items
                .into_iter()
                .filter(|dataset| {
                    dataset
                        .workspace
                        .as_ref()
                        .is_some_and(|workspace| workspace.slug == slug)
                })
                .collect(),
            None => page.items,
        };
        Ok(Listing::new("datasets", datasets).paginated(pagination))
    }

    pub async fn get_dataset_details(&self, input: DatasetInput) -> Result<Dataset, ToolError> {
        self.ensure_available()?;
        self.request::<queries::Dataset>(IdVariables {
            id: input.dataset_id.clone(),
        })
        .await?
        .dataset
        .ok_or_else(|| {
            ToolError::NotFound(format!("Dataset with ID '{}' not found", input.dataset_id))
        })
    }

    pub async fn search_datasets(
        &self,
        input: SearchDatasetsInput,
    ) -> Result<Listing<Dataset>, ToolError> {
        self.ensure_available()?;
        check_paging(input.page, input.per_page)?;
        let page = self
            .request::<queries::Datasets>(DatasetsVariables {
                query: Some(input.query_str),
                page: input.page,
                per_page: input.per_page,
            })
            .await?
            .datasets;

        let pagination = Pagination::new(input.page, input.per_page)
            .with_total_pages(&page)
            .with_total_items(&page);
        Ok(Listing::new("datasets", page.items).paginated(pagination))
    }

    pub async fn list_datasets_by_creator(
        &self,
        input: DatasetsByCreatorInput,
    ) -> Result<Listing<Dataset>, ToolError> {
        self.ensure_available()?;
        check_paging(input.page, input.per_page)?;
        let page = self
            .request::<queries::Datasets>(DatasetsVariables {
                query: None,
                page: input.page,
                per_page: input.per_page,
            })
            .await?
            .datasets;

        let datasets = page
            .items
            .into_iter()
            .filter(|dataset| dataset.creator_email() == Some(input.creator_email.as_str()))
            .collect();
        Ok(Listing::new("datasets", datasets)
            .paginated(Pagination::new(input.page, input.per_page)))
    }

    pub async fn list_dataset_versions(
        &self,
        input: DatasetInput,
    ) -> Result<Listing<DatasetVersion>, ToolError> {
        self.ensure_available()?;
        let versions = self
            .request::<queries::DatasetVersions>(IdVariables {
                id: input.dataset_id.clone(),
            })
            .await?
            .dataset
            .ok_or_else(|| dataset_not_found(&input.dataset_id))?
            .versions;

        Ok(Listing::new("versions", versions.items))
    }

    pub async fn get_dataset_version_details(
        &self,
        input: DatasetVersionInput,
    ) -> Result<DatasetVersionDetails, ToolError> {
        self.ensure_available()?;
        let version = self
            .request::<queries::GetDatasetVersion>(IdVariables {
                id: input.version_id.clone(),
            })
            .await?
            .dataset_version
            .ok_or_else(|| {
                ToolError::NotFound(format!("Dataset version '{}' not found", input.version_id))
            })?;

        Ok(DatasetVersionDetails { version })
    }
}

pub(crate) fn dataset_not_found(id: &str) -> ToolError {
    ToolError::NotFound(format!("Dataset '{id}' not found"))
}
