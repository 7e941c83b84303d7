use reqwest::StatusCode;

/// An error talking to the OpenHEXA API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid OpenHEXA server URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Failed to send GraphQL request: {0}")]
    Request(reqwest::Error),

    #[error("Failed to read GraphQL response body: {0}")]
    Body(reqwest::Error),

    #[error("OpenHEXA responded with HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("GraphQL error: {}", join_errors(.0))]
    GraphQL(Vec<graphql_client::Error>),

    #[error("Error in response: {0}")]
    Response(String),

    #[error("Unable to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },

    #[error("invalid variables: {0}")]
    InvalidVariables(serde_json::Error),
}

fn join_errors(errors: &[graphql_client::Error]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_errors_are_listed_verbatim() {
        let errors: Vec<graphql_client::Error> = serde_json::from_value(serde_json::json!([
            { "message": "Resolver failed" },
            { "message": "Permission denied" }
        ]))
        .unwrap();

        insta::assert_snapshot!(
            ClientError::GraphQL(errors).to_string(),
            @"GraphQL error: Resolver failed; Permission denied"
        );
    }
}
