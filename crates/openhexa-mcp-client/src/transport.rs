//! Transports carrying GraphQL documents to OpenHEXA

use std::time::Duration;

use async_trait::async_trait;
use graphql_client::QueryBody;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::ClientError;

/// Path of the GraphQL endpoint, relative to the server URL
const GRAPHQL_PATH: &str = "graphql/";

/// Something able to execute a GraphQL document against OpenHEXA.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the document, returning the raw JSON response body
    async fn execute(&self, body: QueryBody<Value>) -> Result<Value, ClientError>;
}

/// A transport sending requests over HTTP(S) with a bearer token.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    token: SecretString,
}

impl HttpTransport {
    pub fn new(
        server_url: &Url,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("openhexa-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Client)?;

        Ok(Self {
            client,
            endpoint: graphql_endpoint(server_url)?,
            token,
        })
    }

    /// The URL requests are posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, body: QueryBody<Value>) -> Result<Value, ClientError> {
        debug!(
            operation = body.operation_name,
            endpoint = %self.endpoint,
            "Sending GraphQL request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        response.json::<Value>().await.map_err(ClientError::Body)
    }
}

/// Resolve the GraphQL endpoint from the server URL, tolerating a missing trailing slash.
fn graphql_endpoint(server_url: &Url) -> Result<Url, ClientError> {
    let mut base = server_url.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    Ok(base.join(GRAPHQL_PATH)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("https://app.openhexa.org", "https://app.openhexa.org/graphql/")]
    #[case("https://app.openhexa.org/", "https://app.openhexa.org/graphql/")]
    #[case("https://example.com/hexa", "https://example.com/hexa/graphql/")]
    fn it_resolves_the_graphql_endpoint(#[case] server_url: &str, #[case] expected: &str) {
        let endpoint = graphql_endpoint(&Url::parse(server_url).unwrap()).unwrap();
        assert_eq!(endpoint.as_str(), expected);
    }

    fn body() -> QueryBody<Value> {
        QueryBody {
            variables: json!({ "slug": "malaria" }),
            query: "query Workspace($slug: String!) { workspace(slug: $slug) { slug } }",
            operation_name: "Workspace",
        }
    }

    #[tokio::test]
    async fn it_posts_the_document_with_a_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql/")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::PartialJson(json!({
                "operationName": "Workspace",
                "variables": { "slug": "malaria" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"workspace":{"slug":"malaria"}}}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(
            &Url::parse(&server.url()).unwrap(),
            SecretString::from("secret-token"),
            Duration::from_secs(5),
        )
        .unwrap();

        let response = transport.execute(body()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response, json!({ "data": { "workspace": { "slug": "malaria" } } }));
    }

    #[tokio::test]
    async fn it_reports_unsuccessful_statuses() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql/")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let transport = HttpTransport::new(
            &Url::parse(&server.url()).unwrap(),
            SecretString::from("secret-token"),
            Duration::from_secs(5),
        )
        .unwrap();

        let error = transport.execute(body()).await.unwrap_err();
        insta::assert_snapshot!(error, @"OpenHEXA responded with HTTP 502 Bad Gateway: bad gateway");
    }
}
