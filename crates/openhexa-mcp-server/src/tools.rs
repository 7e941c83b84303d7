//! The tools exposed over MCP, each implemented as a method on [`OpenHexa`](crate::openhexa::OpenHexa)

pub mod connections;
pub mod datasets;
pub mod files;
pub mod pipelines;
pub mod search;
pub mod webapps;
pub mod workspaces;

use rmcp::model::Tool;

/// Descriptors of every tool, in the order they are listed to clients
pub fn tools() -> Vec<Tool> {
    workspaces::tools()
        .into_iter()
        .chain(datasets::tools())
        .chain(files::tools())
        .chain(pipelines::tools())
        .chain(connections::tools())
        .chain(webapps::tools())
        .chain(search::tools())
        .collect()
}
