use serde::{Deserialize, Serialize};

use super::{IdVariables, graphql_query};
use crate::model::{self, DatasetFile, DatasetVersion, FilePreview, Page};

graphql_query!(
    /// A page of datasets, optionally narrowed by a free-text query
    Datasets,
    DatasetsVariables,
    DatasetsData,
    r#"
    query Datasets($query: String, $page: Int!, $perPage: Int!) {
        datasets(query: $query, page: $page, perPage: $perPage) {
            items {
                id
                slug
                name
                description
                createdAt
                updatedAt
                createdBy {
                    id
                    displayName
                    email
                }
                workspace {
                    slug
                    name
                }
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
pub struct DatasetsVariables {
    pub query: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Deserialize)]
pub struct DatasetsData {
    pub datasets: Page<model::Dataset>,
}

graphql_query!(
    /// A single dataset with its versions
    Dataset,
    IdVariables,
    DatasetData,
    r#"
    query Dataset($id: ID!) {
        dataset(id: $id) {
            id
            slug
            name
            description
            createdAt
            updatedAt
            createdBy {
                id
                displayName
                email
            }
            workspace {
                slug
                name
            }
            versions {
                items {
                    id
                    name
                    changelog
                    createdAt
                }
            }
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
pub struct DatasetData {
    pub dataset: Option<model::Dataset>,
}

graphql_query!(
    /// The versions of a dataset
    DatasetVersions,
    IdVariables,
    DatasetVersionsData,
    r#"
    query DatasetVersions($id: ID!) {
        dataset(id: $id) {
            versions {
                items {
                    id
                    name
                    changelog
                    createdAt
                    createdBy {
                        id
                        displayName
                        email
                    }
                }
            }
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
pub struct DatasetVersionsData {
    pub dataset: Option<VersionsOfDataset>,
}

#[derive(Debug, Deserialize)]
pub struct VersionsOfDataset {
    pub versions: Page<DatasetVersion>,
}

graphql_query!(
    /// The files of every version of a dataset
    DatasetFiles,
    IdVariables,
    DatasetFilesData,
    r#"
    query DatasetFiles($id: ID!) {
        dataset(id: $id) {
            versions {
                items {
                    id
                    name
                    files {
                        items {
                            id
                            filename
                            size
                            contentType
                            createdAt
                        }
                    }
                }
            }
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
pub struct DatasetFilesData {
    pub dataset: Option<VersionsOfDataset>,
}

graphql_query!(
    /// A single dataset version with its files
    GetDatasetVersion,
    IdVariables,
    DatasetVersionData,
    r#"
    query GetDatasetVersion($id: ID!) {
        datasetVersion(id: $id) {
            id
            name
            changelog
            createdAt
            createdBy {
                id
                displayName
                email
            }
            files {
                items {
                    id
                    filename
                    size
                    contentType
                    createdAt
                }
            }
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetVersionData {
    pub dataset_version: Option<DatasetVersion>,
}

graphql_query!(
    /// A single dataset file's metadata
    GetDatasetFile,
    IdVariables,
    DatasetFileData,
    r#"
    query GetDatasetFile($id: ID!) {
        datasetVersionFile(id: $id) {
            id
            filename
            size
            contentType
            createdAt
            createdBy {
                id
                displayName
                email
            }
            downloadUrl
            uri
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFileData {
    pub dataset_version_file: Option<DatasetFile>,
}

graphql_query!(
    /// The computed sample of a dataset file
    GetDatasetVersionFileSample,
    IdVariables,
    DatasetFileSampleData,
    r#"
    query GetDatasetVersionFileSample($id: ID!) {
        datasetVersionFile(id: $id) {
            id
            properties
            fileSample {
                sample
                status
                statusReason
            }
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFileSampleData {
    pub dataset_version_file: Option<FilePreview>,
}
