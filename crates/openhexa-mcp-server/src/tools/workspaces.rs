use openhexa_mcp_client::model::{Workspace, WorkspaceMember};
use openhexa_mcp_client::queries::PageVariables;
use openhexa_mcp_client::queries::workspaces::{
    self as queries, WorkspacePageVariables, WorkspaceVariables,
};
use rmcp::model::Tool;
use rmcp::schemars::JsonSchema;
use rmcp::{schemars, serde_json};
use serde::Deserialize;

use crate::errors::ToolError;
use crate::listing::{Listing, Pagination, check_paging, default_page, default_per_page};
use crate::openhexa::OpenHexa;
use crate::schema_from_type;

pub const LIST_WORKSPACES_TOOL_NAME: &str = "list_workspaces";
pub const GET_WORKSPACE_DETAILS_TOOL_NAME: &str = "get_workspace_details";
pub const LIST_WORKSPACE_MEMBERS_TOOL_NAME: &str = "list_workspace_members";

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct ListWorkspacesInput {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of workspaces per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for ListWorkspacesInput {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct WorkspaceInput {
    /// The workspace slug
    pub workspace_slug: String,
}

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct WorkspaceMembersInput {
    /// The workspace slug
    pub workspace_slug: String,

    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of members per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            LIST_WORKSPACES_TOOL_NAME,
            "List the OpenHEXA workspaces available to the configured user, one page at a time.",
            schema_from_type!(ListWorkspacesInput),
        ),
        Tool::new(
            GET_WORKSPACE_DETAILS_TOOL_NAME,
            "Get the details of a workspace by slug.",
            schema_from_type!(WorkspaceInput),
        ),
        Tool::new(
            LIST_WORKSPACE_MEMBERS_TOOL_NAME,
            "List the members of a workspace with their role and user details.",
            schema_from_type!(WorkspaceMembersInput),
        ),
    ]
}

impl OpenHexa {
    pub async fn list_workspaces(
        &self,
        input: ListWorkspacesInput,
    ) -> Result<Listing<Workspace>, ToolError> {
        self.ensure_available()?;
        check_paging(input.page, input.per_page)?;
        let data = self
            .request::<queries::Workspaces>(PageVariables {
                page: input.page,
                per_page: input.per_page,
            })
            .await?;

        let pagination =
            Pagination::new(input.page, input.per_page).with_total_pages(&data.workspaces);
        Ok(Listing::new("workspaces", data.workspaces.items).paginated(pagination))
    }

    pub async fn get_workspace_details(
        &self,
        input: WorkspaceInput,
    ) -> Result<Workspace, ToolError> {
        self.ensure_available()?;
        self.request::<queries::Workspace>(WorkspaceVariables {
            slug: input.workspace_slug.clone(),
        })
        .await?
        .workspace
        .ok_or_else(|| workspace_not_found(&input.workspace_slug))
    }

    pub async fn list_workspace_members(
        &self,
        input: WorkspaceMembersInput,
    ) -> Result<Listing<WorkspaceMember>, ToolError> {
        self.ensure_available()?;
        check_paging(input.page, input.per_page)?;
        let members = self
            .request::<queries::WorkspaceMembers>(WorkspacePageVariables {
                slug: input.workspace_slug.clone(),
                page: input.page,
                per_page: input.per_page,
            })
            .await?
            .workspace
            .ok_or_else(|| workspace_not_found(&input.workspace_slug))?
            .members;

        let pagination = Pagination::new(input.page, input.per_page)
            .with_total_pages(&members)
            .with_total_items(&members);
        Ok(Listing::new("members", members.items).paginated(pagination))
    }
}

pub(crate) fn workspace_not_found(slug: &str) -> ToolError {
    ToolError::NotFound(format!("Workspace '{slug}' not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SpyTransport, openhexa};
    use serde_json::json;

    fn workspace(slug: &str) -> serde_json::Value {
        json!({ "slug": slug, "name": slug.to_uppercase(), "description": null })
    }

    #[tokio::test]
    async fn it_lists_a_page_of_workspaces() {
        let items: Vec<_> = ["a", "b", "c", "d", "e"].map(workspace).into();
        let (openhexa, spy) = openhexa(SpyTransport::new().data(
            "Workspaces",
            json!({
                "workspaces": {
                    "items": items,
                    "pageNumber": 2,
                    "totalPages": 3,
                    "totalItems": 13
                }
            }),
        ));

        let listing = openhexa
            .list_workspaces(ListWorkspacesInput {
                page: 2,
                per_page: 5,
            })
            .await
            .unwrap();

        assert_eq!(
            spy.variables("Workspaces"),
            Some(json!({ "page": 2, "perPage": 5 }))
        );
        assert_eq!(
            serde_json::to_value(listing).unwrap(),
            json!({
                "workspaces": [
                    { "slug": "a", "name": "A" },
                    { "slug": "b", "name": "B" },
                    { "slug": "c", "name": "C" },
                    { "slug": "d", "name": "D" },
                    { "slug": "e", "name": "E" }
                ],
                "total_pages": 3,
                "current_page": 2,
                "per_page": 5,
                "count": 5
            })
        );
    }

    #[tokio::test]
    async fn it_reports_unknown_workspaces() {
        let (openhexa, _) =
            openhexa(SpyTransport::new().data("Workspace", json!({ "workspace": null })));

        let error = openhexa
            .get_workspace_details(WorkspaceInput {
                workspace_slug: "nowhere".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Workspace 'nowhere' not found");
    }

    #[tokio::test]
    async fn it_pages_members() {
        let (openhexa, spy) = openhexa(SpyTransport::new().data(
            "WorkspaceMembers",
            json!({
                "workspace": {
                    "members": {
                        "items": [{
                            "id": "m1",
                            "role": "ADMIN",
                            "user": { "id": "u1", "displayName": "Ana", "email": "ana@example.org" }
                        }],
                        "pageNumber": 1,
                        "totalPages": 1,
                        "totalItems": 1
                    }
                }
            }),
        ));

        let listing = openhexa
            .list_workspace_members(WorkspaceMembersInput {
                workspace_slug: "malaria".to_string(),
                page: 1,
                per_page: 10,
            })
            .await
            .unwrap();

        assert_eq!(listing.count(), 1);
        assert_eq!(
            spy.variables("WorkspaceMembers"),
            Some(json!({ "slug": "malaria", "page": 1, "perPage": 10 }))
        );
        let value = serde_json::to_value(listing).unwrap();
        assert_eq!(value["total_items"], 1);
        assert_eq!(value["members"][0]["user"]["email"], "ana@example.org");
    }

    #[tokio::test]
    async fn invalid_paging_never_reaches_the_network() {
        let (openhexa, spy) = openhexa(SpyTransport::new());

        let result = openhexa
            .list_workspaces(ListWorkspacesInput {
                page: 0,
                per_page: 10,
            })
            .await;

        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
        assert!(spy.calls().is_empty());
    }
}
