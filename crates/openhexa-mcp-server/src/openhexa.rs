use std::sync::Arc;

use graphql_client::GraphQLQuery;
use openhexa_mcp_client::Transport;

use crate::errors::ToolError;

/// The query façade over the OpenHEXA GraphQL API.
///
/// Every tool is a method on this type (see [`crate::tools`]). Without a
/// transport the façade is unavailable and every tool fails with
/// [`ToolError::ConfigurationMissing`] before touching the network.
#[derive(Clone)]
pub struct OpenHexa {
    transport: Option<Arc<dyn Transport>>,
}

impl OpenHexa {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// A façade for a server started without credentials
    pub fn unavailable() -> Self {
        Self { transport: None }
    }

    pub fn is_available(&self) -> bool {
        self.transport.is_some()
    }

    /// Fails with [`ToolError::ConfigurationMissing`] when there is no transport.
    ///
    /// Tools call this before validating their arguments, so an unconfigured
    /// server always reports the missing configuration.
    pub(crate) fn ensure_available(&self) -> Result<&dyn Transport, ToolError> {
        self.transport
            .as_deref()
            .ok_or(ToolError::ConfigurationMissing)
    }

    pub(crate) async fn request<Query>(
        &self,
        variables: Query::Variables,
    ) -> Result<Query::ResponseData, ToolError>
    where
        Query: GraphQLQuery,
    {
        let transport = self.ensure_available()?;
        Ok(openhexa_mcp_client::request::<Query>(transport, variables).await?)
    }
}

impl std::fmt::Debug for OpenHexa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenHexa")
            .field("available", &self.is_available())
            .finish()
    }
}
