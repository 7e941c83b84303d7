use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::Router;
use bon::bon;
use rmcp::ServiceExt;
use rmcp::transport::sse_server::SseServerConfig;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::{SseServer, StreamableHttpService, stdio};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info};

use crate::errors::ServerError;
use crate::openhexa::OpenHexa;
use crate::server_handler::OpenHexaMcpServerHandler;

/// The transport an MCP client uses to reach the server
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// Read requests from stdin and write responses to stdout
    #[default]
    Stdio,

    /// Server-Sent Events, served on `/sse` with messages posted to `/message`
    Sse {
        /// The IP address to bind to
        #[serde(default = "Transport::default_address")]
        address: IpAddr,

        /// The port to bind to
        #[serde(default = "Transport::default_port")]
        port: u16,
    },

    /// Streamable HTTP, served on `/mcp`
    StreamableHttp {
        /// The IP address to bind to
        #[serde(default = "Transport::default_address")]
        address: IpAddr,

        /// The port to bind to
        #[serde(default = "Transport::default_port")]
        port: u16,
    },
}

impl Transport {
    fn default_address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    fn default_port() -> u16 {
        5000
    }
}

/// An OpenHEXA MCP Server
pub struct Server {
    transport: Transport,
    openhexa: OpenHexa,
}

#[bon]
impl Server {
    #[builder]
    pub fn new(transport: Transport, openhexa: OpenHexa) -> Self {
        Self {
            transport,
            openhexa,
        }
    }

    /// Serve the tools until the client disconnects (stdio) or the process is told to stop
    pub async fn start(self) -> Result<(), ServerError> {
        let handler = OpenHexaMcpServerHandler::new(self.openhexa);

        match self.transport {
            Transport::StreamableHttp { address, port } => {
                serve_streamable_http(address, port, handler).await
            }
            Transport::Sse { address, port } => serve_sse(address, port, handler).await,
            Transport::Stdio => {
                info!("Starting MCP server in stdio mode");
                let service = handler
                    .serve(stdio())
                    .await
                    .inspect_err(|e| error!("serving error: {e:?}"))
                    .map_err(|e| ServerError::McpInitializeError(Box::new(e)))?;
                service.waiting().await?;
                Ok(())
            }
        }
    }
}

async fn serve_streamable_http(
    address: IpAddr,
    port: u16,
    handler: OpenHexaMcpServerHandler,
) -> Result<(), ServerError> {
    info!(port = ?port, address = ?address, "Starting MCP server in Streamable HTTP mode");
    let service = StreamableHttpService::new(
        move || Ok(handler.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(SocketAddr::new(address, port)).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("MCP server stopped");
    Ok(())
}

async fn serve_sse(
    address: IpAddr,
    port: u16,
    handler: OpenHexaMcpServerHandler,
) -> Result<(), ServerError> {
    info!(port = ?port, address = ?address, "Starting MCP server in SSE mode");
    let cancellation_token = CancellationToken::new();
    let (server, router) = SseServer::new(SseServerConfig {
        bind: SocketAddr::new(address, port),
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: cancellation_token.clone(),
        sse_keep_alive: None,
    });

    let listener = tokio::net::TcpListener::bind(server.config.bind).await?;
    let ct = server.config.ct.child_token();
    let axum_server = axum::serve(listener, router).with_graceful_shutdown(async move {
        ct.cancelled().await;
        info!("MCP server cancelled");
    });
    let serving = tokio::spawn(
        async move {
            if let Err(e) = axum_server.await {
                error!(error = %e, "MCP server shut down with error");
            }
        }
        .instrument(tracing::info_span!("mcp-server", bind_address = %server.config.bind)),
    );

    server.with_service(move || handler.clone());

    shutdown_signal().await;
    cancellation_token.cancel();
    serving.await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C signal handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({ "type": "stdio" }), Transport::Stdio)]
    #[case(
        json!({ "type": "sse" }),
        Transport::Sse { address: IpAddr::V4(Ipv4Addr::LOCALHOST), port: 5000 }
    )]
    #[case(
        json!({ "type": "streamable_http", "address": "0.0.0.0", "port": 8000 }),
        Transport::StreamableHttp { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8000 }
    )]
    fn it_deserializes_transports(#[case] value: serde_json::Value, #[case] expected: Transport) {
        assert_eq!(serde_json::from_value::<Transport>(value).unwrap(), expected);
    }

    #[test]
    fn it_rejects_unknown_transports() {
        assert!(serde_json::from_value::<Transport>(json!({ "type": "websocket" })).is_err());
    }
}
