use std::sync::Arc;
use std::time::Duration;

use openhexa_mcp_client::HttpTransport;
use openhexa_mcp_server::errors::ServerError;
use openhexa_mcp_server::openhexa::OpenHexa;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

/// Credentials and connection settings for OpenHEXA
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OpenHexaConfig {
    /// Base URL of the OpenHEXA instance, e.g. https://app.openhexa.org
    pub server_url: Option<Url>,

    /// Personal access token sent as a bearer token
    #[schemars(with = "Option<String>")]
    pub token: Option<SecretString>,

    /// Timeout applied to every request, e.g. `30s` or `1m`
    #[serde(with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,
}

impl Default for OpenHexaConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl OpenHexaConfig {
    /// Build the façade the tools run against.
    ///
    /// Missing credentials are not fatal: the server still starts and every
    /// tool reports the configuration error.
    pub fn connect(&self) -> Result<OpenHexa, ServerError> {
        match (&self.server_url, &self.token) {
            (Some(server_url), Some(token)) => {
                let transport = HttpTransport::new(server_url, token.clone(), self.timeout)?;
                info!(endpoint = %transport.endpoint(), "Using OpenHEXA instance");
                Ok(OpenHexa::new(Arc::new(transport)))
            }
            (server_url, token) => {
                warn!(
                    server_url = server_url.is_some(),
                    token = token.is_some(),
                    "OpenHEXA credentials are incomplete; set HEXA_SERVER_URL and HEXA_TOKEN. Tools will report an error until then"
                );
                Ok(OpenHexa::unavailable())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openhexa_mcp_server::server_handler::OpenHexaMcpServerHandler;
    use rmcp::model::{CallToolResult, RawContent};
    use serde_json::{Value, json};
    use tracing_test::traced_test;

    fn payload(result: &CallToolResult) -> Value {
        match result.content.first().map(|content| &content.raw) {
            Some(RawContent::Text(text)) => serde_json::from_str(&text.text).unwrap(),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    #[traced_test]
    fn it_warns_when_credentials_are_missing() {
        let openhexa = OpenHexaConfig::default().connect().unwrap();

        assert!(!openhexa.is_available());
        assert!(logs_contain("OpenHEXA credentials are incomplete"));
    }

    #[tokio::test]
    async fn a_missing_token_never_reaches_the_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let config = OpenHexaConfig {
            server_url: Some(Url::parse(&server.url()).unwrap()),
            ..Default::default()
        };
        let openhexa = config.connect().unwrap();
        assert!(!openhexa.is_available());

        let handler = OpenHexaMcpServerHandler::new(openhexa);
        let result = handler
            .call("list_workspaces", Some(serde_json::Map::new()))
            .await
            .unwrap();

        let value = payload(&result);
        assert_eq!(
            value,
            json!({ "error": "OpenHEXA client not available. Please configure your OpenHEXA credentials (HEXA_SERVER_URL, HEXA_TOKEN)." })
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_credentials_reach_the_graphql_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql/")
            .match_header("authorization", "Bearer secret-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"workspace":null}}"#)
            .create_async()
            .await;

        let config = OpenHexaConfig {
            server_url: Some(Url::parse(&server.url()).unwrap()),
            token: Some(SecretString::from("secret-token")),
            ..Default::default()
        };
        let handler = OpenHexaMcpServerHandler::new(config.connect().unwrap());

        let mut arguments = serde_json::Map::new();
        arguments.insert("workspace_slug".to_string(), json!("malaria"));
        let result = handler
            .call("get_workspace_details", Some(arguments))
            .await
            .unwrap();

        let value = payload(&result);
        assert_eq!(value, json!({ "error": "Workspace 'malaria' not found" }));
        mock.assert_async().await;
    }
}
