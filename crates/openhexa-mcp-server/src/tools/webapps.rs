use openhexa_mcp_client::model::Webapp;
use openhexa_mcp_client::queries::workspaces::{WorkspacePageVariables, WorkspaceWebapps};
use rmcp::model::Tool;
use rmcp::schemars::JsonSchema;
use rmcp::{schemars, serde_json};
use serde::Deserialize;

use super::workspaces::workspace_not_found;
use crate::errors::ToolError;
use crate::listing::{Listing, Pagination, check_paging, default_page, default_per_page};
use crate::openhexa::OpenHexa;
use crate::schema_from_type;

pub const LIST_WEBAPPS_TOOL_NAME: &str = "list_webapps";

#[derive(Debug, Clone, JsonSchema, Deserialize)]
pub struct ListWebappsInput {
    /// The workspace slug
    pub workspace_slug: String,

    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of webapps per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool::new(
        LIST_WEBAPPS_TOOL_NAME,
        "List the webapps published in a workspace, one page at a time.",
        schema_from_type!(ListWebappsInput),
    )]
}

impl OpenHexa {
    pub async fn list_webapps(
        &self,
        input: ListWebappsInput,
    ) -> Result<Listing<Webapp>, ToolError> {
        self.ensure_available()?;
        check_paging(input.page, input.per_page)?;
        let webapps = self
            .request::<WorkspaceWebapps>(WorkspacePageVariables {
                slug: input.workspace_slug.clone(),
                page: input.page,
                per_page: input.per_page,
            })
            .await?
            .workspace
            .ok_or_else(|| workspace_not_found(&input.workspace_slug))?
            .webapps;

        // OpenHEXA may clamp the requested page
        let current_page = webapps.page_number.unwrap_or(input.page);
        let pagination = Pagination::new(current_page, input.per_page)
            .with_total_pages(&webapps)
            .with_total_items(&webapps);
        Ok(Listing::new("webapps", webapps.items).paginated(pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SpyTransport, openhexa};
    use serde_json::json;

    #[tokio::test]
    async fn it_reports_the_page_returned_by_openhexa() {
        let (openhexa, _) = openhexa(SpyTransport::new().data(
            "WorkspaceWebapps",
            json!({
                "workspace": {
                    "webapps": {
                        "items": [{
                            "id": "w1",
                            "name": "Malaria dashboard",
                            "url": "https://apps.example.org/malaria",
                            "isFavorite": true,
                            "permissions": { "update": true, "delete": false }
                        }],
                        "pageNumber": 3,
                        "totalPages": 3,
                        "totalItems": 21
                    }
                }
            }),
        ));

        let listing = openhexa
            .list_webapps(ListWebappsInput {
                workspace_slug: "malaria".to_string(),
                page: 7,
                per_page: 10,
            })
            .await
            .unwrap();

        insta::assert_json_snapshot!(listing, @r#"
        {
          "webapps": [
            {
              "id": "w1",
              "name": "Malaria dashboard",
              "url": "https://apps.example.org/malaria",
              "isFavorite": true,
              "permissions": {
                "update": true,
                "delete": false
              }
            }
          ],
          "total_pages": 3,
          "total_items": 21,
          "current_page": 3,
          "per_page": 10,
          "count": 1
        }
        "#);
    }
}
