use serde::{Deserialize, Serialize};

use super::{PageVariables, graphql_query};
use crate::model::{self, Connection, Page, Webapp, WorkspaceMember};

graphql_query!(
    /// A page of the workspaces visible to the token's user
    Workspaces,
    PageVariables,
    WorkspacesData,
    r#"
    query Workspaces($page: Int!, $perPage: Int!) {
        workspaces(page: $page, perPage: $perPage) {
            items {
                slug
                name
                description
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

#[derive(Debug, Deserialize)]
pub struct WorkspacesData {
    pub workspaces: Page<model::Workspace>,
}

graphql_query!(
    /// A single workspace by slug
    Workspace,
    WorkspaceVariables,
    WorkspaceData,
    r#"
    query Workspace($slug: String!) {
        workspace(slug: $slug) {
            slug
            name
            description
            createdAt
            updatedAt
        }
    }
    "#
);

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceVariables {
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceData {
    pub workspace: Option<model::Workspace>,
}

graphql_query!(
    /// A page of a workspace's members
    WorkspaceMembers,
    WorkspacePageVariables,
    WorkspaceMembersData,
    r#"
    query WorkspaceMembers($slug: String!, $page: Int!, $perPage: Int!) {
        workspace(slug: $slug) {
            members(page: $page, perPage: $perPage) {
                items {
                    id
                    role
                    createdAt
                    user {
                        id
                        displayName
                        email
                    }
                }
                pageNumber
                totalPages
                totalItems
            }
        }
    }
    "#
);

/// Variables for a paged list nested under a workspace
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePageVariables {
    pub slug: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceMembersData {
    pub workspace: Option<MembersOfWorkspace>,
}

#[derive(Debug, Deserialize)]
pub struct MembersOfWorkspace {
    pub members: Page<WorkspaceMember>,
}

graphql_query!(
    /// All connections configured in a workspace
    WorkspaceConnections,
    WorkspaceVariables,
    WorkspaceConnectionsData,
    r#"
    query WorkspaceConnections($slug: String!) {
        workspace(slug: $slug) {
            connections {
                id
                name
                slug
                description
                type
                createdAt
                updatedAt
                user {
                    id
                    displayName
                    email
                }
                fields {
                    code
                    value
                    secret
                }
            }
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
pub struct WorkspaceConnectionsData {
    pub workspace: Option<ConnectionsOfWorkspace>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionsOfWorkspace {
    #[serde(default)]
    pub connections: Vec<Connection>,
}

graphql_query!(
    /// A page of the webapps published in a workspace
    WorkspaceWebapps,
    WorkspacePageVariables,
    WorkspaceWebappsData,
    r#"
    query WorkspaceWebapps($slug: String!, $page: Int = 1, $perPage: Int = 10) {
        workspace(slug: $slug) {
            webapps(page: $page, perPage: $perPage) {
                items {
                    id
                    name
                    description
                    url
                    icon
                    isFavorite
                    createdAt
                    createdBy {
                        id
                        displayName
                        email
                    }
                    permissions {
                        delete
                        update
                    }
                }
                pageNumber
                totalItems
                totalPages
            }
        }
    }
    "#
);

#[derive(Debug, Deserialize)]
pub struct WorkspaceWebappsData {
    pub workspace: Option<WebappsOfWorkspace>,
}

#[derive(Debug, Deserialize)]
pub struct WebappsOfWorkspace {
    pub webapps: Page<Webapp>,
}
