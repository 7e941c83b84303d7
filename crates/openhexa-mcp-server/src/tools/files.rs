use openhexa_mcp_client::model::{DatasetFile, DatasetVersion};
use openhexa_mcp_client::queries::IdVariables;
use openhexa_mcp_client::queries::datasets as queries;
use rmcp::model::Tool;
use rmcp::schemars::JsonSchema;
use rmcp::{schemars, serde_json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::datasets::{DatasetInput, dataset_not_found};
use crate::errors::ToolError;
use crate::listing::Listing;
use crate::openhexa::OpenHexa;
use crate::schema_from_type;

pub const LIST_DATASET_FILES_TOOL_NAME: &str = "list_dataset_files";
pub const GET_DATASET_FILE_DETAILS_TOOL_NAME: &str = "get_dataset_file_details";
pub const PREVIEW_DATASET_FILE_TOOL_NAME: &str = "preview_dataset_file";

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct FileInput {
    /// The dataset file ID
    pub file_id: String,
}

/// A file of a dataset, tagged with the version holding it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionedFile {
    #[serde(flatten)]
    pub file: DatasetFile,
    pub version_id: String,
    pub version_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDetails {
    pub file: DatasetFile,
}

/// The sample OpenHEXA computed for a file. Fields are null until the sample exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilePreview {
    pub file_id: String,
    pub sample: Option<Value>,
    pub status: Option<String>,
    pub status_reason: Option<String>,
    pub properties: Option<Value>,
}

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            LIST_DATASET_FILES_TOOL_NAME,
            "List the files of every version of a dataset.",
            schema_from_type!(DatasetInput),
        ),
        Tool::new(
            GET_DATASET_FILE_DETAILS_TOOL_NAME,
            "Get the details of a dataset file by ID, including its download URL.",
            schema_from_type!(FileInput),
        ),
        Tool::new(
            PREVIEW_DATASET_FILE_TOOL_NAME,
            "Preview a dataset file using the sample computed by OpenHEXA. The sample and its status are null while the sample is not available.",
            schema_from_type!(FileInput),
        ),
    ]
}

impl OpenHexa {
    pub async fn list_dataset_files(
        &self,
        input: DatasetInput,
    ) -> Result<Listing<VersionedFile>, ToolError> {
        self.ensure_available()?;
        let versions = self
            .request::<queries::DatasetFiles>(IdVariables {
                id: input.dataset_id.clone(),
            })
            .await?
            .dataset
            .ok_or_else(|| dataset_not_found(&input.dataset_id))?
            .versions;

        let files = versions
            .items
            .into_iter()
            .flat_map(|version| {
                let DatasetVersion {
                    id, name, files, ..
                } = version;
                let files = files.map(|files| files.items).unwrap_or_default();
                files.into_iter().map(move |file| VersionedFile {
                    file,
                    version_id: id.clone(),
                    version_name: name.clone(),
                })
            })
            .collect();
        Ok(Listing::new("files", files))
    }

    pub async fn get_dataset_file_details(
        &self,
        input: FileInput,
    ) -> Result<FileDetails, ToolError> {
        self.ensure_available()?;
        let file = self
            .request::<queries::GetDatasetFile>(IdVariables {
                id: input.file_id.clone(),
            })
            .await?
            .dataset_version_file
            .ok_or_else(|| file_not_found(&input.file_id))?;

        Ok(FileDetails { file })
    }

    pub async fn preview_dataset_file(&self, input: FileInput) -> Result<FilePreview, ToolError> {
        self.ensure_available()?;
        let file = self
            .request::<queries::GetDatasetVersionFileSample>(IdVariables {
                id: input.file_id.clone(),
            })
            .await?
            .dataset_version_file
            .ok_or_else(|| file_not_found(&input.file_id))?;

        let (sample, status, status_reason) = match file.file_sample {
            Some(sample) => (sample.sample, sample.status, sample.status_reason),
            None => (None, None, None),
        };
        Ok(FilePreview {
            file_id: input.file_id,
            sample,
            status,
            status_reason,
            properties: file.properties,
        })
    }
}

fn file_not_found(id: &str) -> ToolError {
    ToolError::NotFound(format!("File '{id}' not found"))
}
