use graphql_client::{GraphQLQuery, QueryBody, Response};
use serde_json::Value;

use crate::{ClientError, Transport};

/// Execute a typed query through a transport and decode its data.
///
/// A non-empty `errors` array fails the request even when partial data is
/// present.
pub async fn request<Query>(
    transport: &dyn Transport,
    variables: Query::Variables,
) -> Result<Query::ResponseData, ClientError>
where
    Query: GraphQLQuery,
{
    let body = Query::build_query(variables);
    let operation = body.operation_name;
    let body = QueryBody {
        variables: serde_json::to_value(&body.variables).map_err(ClientError::InvalidVariables)?,
        query: body.query,
        operation_name: body.operation_name,
    };

    let raw = transport.execute(body).await?;
    let response: Response<Value> = serde_json::from_value(raw)
        .map_err(|source| ClientError::Decode { operation, source })?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        return Err(ClientError::GraphQL(errors));
    }

    let data = response
        .data
        .ok_or(ClientError::Response("missing data".to_string()))?;
    serde_json::from_value(data).map_err(|source| ClientError::Decode { operation, source })
}
