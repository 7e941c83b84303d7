use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use graphql_client::QueryBody;
use openhexa_mcp_client::{ClientError, Transport};
use serde_json::{Value, json};

use crate::openhexa::OpenHexa;

enum Reply {
    Data(Value),
    Errors(Vec<&'static str>),
    Fail(&'static str),
}

/// A transport replying with canned responses per operation and recording every call
#[derive(Default)]
pub(crate) struct SpyTransport {
    replies: HashMap<&'static str, Reply>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl SpyTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reply to `operation` with `{"data": data}`
    pub(crate) fn data(mut self, operation: &'static str, data: Value) -> Self {
        self.replies.insert(operation, Reply::Data(data));
        self
    }

    /// Reply to `operation` with a GraphQL `errors` array
    pub(crate) fn errors(mut self, operation: &'static str, messages: Vec<&'static str>) -> Self {
        self.replies.insert(operation, Reply::Errors(messages));
        self
    }

    /// Fail `operation` at the transport level
    pub(crate) fn fail(mut self, operation: &'static str, message: &'static str) -> Self {
        self.replies.insert(operation, Reply::Fail(message));
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    /// Variables sent with the last call of `operation`
    pub(crate) fn variables(&self, operation: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|(name, _)| name == operation)
            .map(|(_, variables)| variables)
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn execute(&self, body: QueryBody<Value>) -> Result<Value, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((body.operation_name.to_string(), body.variables));

        match self.replies.get(body.operation_name) {
            Some(Reply::Data(data)) => Ok(json!({ "data": data })),
            Some(Reply::Errors(messages)) => Ok(json!({
                "data": null,
                "errors": messages
                    .iter()
                    .map(|message| json!({ "message": message }))
                    .collect::<Vec<_>>(),
            })),
            Some(Reply::Fail(message)) => Err(ClientError::Response(message.to_string())),
            None => Err(ClientError::Response(format!(
                "no canned reply for {}",
                body.operation_name
            ))),
        }
    }
}

/// A façade over `spy`, keeping a handle to inspect its calls
pub(crate) fn openhexa(spy: SpyTransport) -> (OpenHexa, Arc<SpyTransport>) {
    let spy = Arc::new(spy);
    (OpenHexa::new(spy.clone()), spy)
}
