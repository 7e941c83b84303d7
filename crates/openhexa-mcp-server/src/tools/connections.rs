use openhexa_mcp_client::model::Connection;
use openhexa_mcp_client::queries::workspaces::{WorkspaceConnections, WorkspaceVariables};
use rmcp::model::Tool;
use rmcp::{schemars, serde_json};

use super::workspaces::{WorkspaceInput, workspace_not_found};
use crate::errors::ToolError;
use crate::listing::Listing;
use crate::openhexa::OpenHexa;
use crate::schema_from_type;

pub const LIST_CONNECTIONS_TOOL_NAME: &str = "list_connections";

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool::new(
        LIST_CONNECTIONS_TOOL_NAME,
        "List the connections configured in a workspace, with their fields. Secret field values are returned as OpenHEXA exposes them to the user.",
        schema_from_type!(WorkspaceInput),
    )]
}

impl OpenHexa {
    pub async fn list_connections(
        &self,
        input: WorkspaceInput,
    ) -> Result<Listing<Connection>, ToolError> {
        self.ensure_available()?;
        let connections = self
            .request::<WorkspaceConnections>(WorkspaceVariables {
                slug: input.workspace_slug.clone(),
            })
            .await?
            .workspace
            .ok_or_else(|| workspace_not_found(&input.workspace_slug))?
            .connections;

        Ok(Listing::new("connections", connections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SpyTransport, openhexa};
    use serde_json::json;

    #[tokio::test]
    async fn it_lists_connections() {
        let (openhexa, _) = openhexa(SpyTransport::new().data(
            "WorkspaceConnections",
            json!({
                "workspace": {
                    "connections": [{
                        "id": "c1",
                        "name": "DHIS2 Mali",
                        "slug": "dhis2-mali",
                        "type": "DHIS2",
                        "fields": [
                            { "code": "url", "value": "https://dhis2.example.org", "secret": false },
                            { "code": "password", "value": null, "secret": true }
                        ]
                    }]
                }
            }),
        ));

        let listing = openhexa
            .list_connections(WorkspaceInput {
                workspace_slug: "malaria".to_string(),
            })
            .await
            .unwrap();

        insta::assert_json_snapshot!(listing, @r#"
        {
          "connections": [
            {
              "id": "c1",
              "name": "DHIS2 Mali",
              "slug": "dhis2-mali",
              "type": "DHIS2",
              "fields": [
                {
                  "code": "url",
                  "value": "https://dhis2.example.org",
                  "secret": false
                },
                {
                  "code": "password",
                  "value": null,
                  "secret": true
                }
              ]
            }
          ],
          "count": 1
        }
        "#);
    }

    #[tokio::test]
    async fn it_reports_unknown_workspaces() {
        let (openhexa, _) = openhexa(
            SpyTransport::new().data("WorkspaceConnections", json!({ "workspace": null })),
        );

        let error = openhexa
            .list_connections(WorkspaceInput {
                workspace_slug: "nowhere".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.to_value(), json!({ "error": "Workspace 'nowhere' not found" }));
    }
}
