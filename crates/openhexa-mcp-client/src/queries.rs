//! GraphQL documents sent to OpenHEXA, with their variables and response data
//!
//! Documents are fixed strings; field names and nesting are dictated by the
//! remote schema.

pub mod datasets;
pub mod pipelines;
pub mod workspaces;

use serde::Serialize;

/// Declare a query type implementing [`graphql_client::GraphQLQuery`] for a fixed document.
macro_rules! graphql_query {
    ($(#[$meta:meta])* $query:ident, $variables:ty, $data:ty, $document:expr) => {
        $(#[$meta])*
        pub struct $query;

        impl graphql_client::GraphQLQuery for $query {
            type Variables = $variables;
            type ResponseData = $data;

            fn build_query(variables: Self::Variables) -> graphql_client::QueryBody<Self::Variables> {
                graphql_client::QueryBody {
                    variables,
                    query: $document,
                    operation_name: stringify!($query),
                }
            }
        }
    };
}
pub(crate) use graphql_query;

/// Variables for a plain paged query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVariables {
    pub page: u32,
    pub per_page: u32,
}

/// Variables for a lookup by ID
#[derive(Debug, Clone, Serialize)]
pub struct IdVariables {
    pub id: String,
}

/// Variables for mutations taking a single `input` argument
#[derive(Debug, Clone, Serialize)]
pub struct InputVariables<Input> {
    pub input: Input,
}
