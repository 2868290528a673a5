//! MCP server implementation for cellosaurus-mcp.
//!
//! This crate wires the Cellosaurus control plane into rmcp tool handlers and
//! exposes the MCP-facing API surface for searching and looking up cell lines.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use cellosaurus_core::client::CellosaurusClient;
use cellosaurus_core::control::CellosaurusControlPlane;
use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool_handler,
};
use rmcp::model::{ServerCapabilities, ServerInfo};

pub use tools::lookup::GetCellLineInfoParams;
pub use tools::search::{FindByDiseaseParams, FindByTissueParams, SearchCellLinesParams};

const SERVER_INSTRUCTIONS: &str = r#"cellosaurus-mcp exposes the Cellosaurus cell-line knowledge resource (https://www.cellosaurus.org) as MCP tools.

Workflow:
1. Call `list_available_fields` to see which field codes can be requested (e.g. `id`, `ac`, `di`, `ox`, `str`).
2. Search with `search_cell_lines` using the Cellosaurus query syntax, `<field>:<value>` terms joined by spaces
   (e.g. `id:HeLa`, `di:melanoma ox:human`). Use `start`/`rows` to page (rows is capped at 1000).
3. Fetch one record with `get_cell_line_info` by accession (e.g. `CVCL_0030`).
4. Shortcuts: `find_cell_lines_by_disease` and `find_cell_lines_by_tissue` build the query for you
   and default the species filter to `human`.

Notes:
- Responses are the Cellosaurus API JSON, unmodified.
- Failures are returned as `{ "error": "<message>" }` rather than protocol errors.
- `get_release_info` reports the database release currently served by the API."#;

/// MCP server wrapper around the control plane and tool routers.
#[derive(Clone)]
pub struct CellosaurusMcp {
    tool_router: ToolRouter<Self>,
    control: CellosaurusControlPlane,
}

impl CellosaurusMcp {
    /// Creates a new server using a shared client handle.
    #[must_use]
    pub fn with_client(client: Arc<CellosaurusClient>) -> Self {
        let tool_router = Self::tool_router_search() + Self::tool_router_lookup();
        Self {
            tool_router,
            control: CellosaurusControlPlane::from_arc(client),
        }
    }

    pub(crate) const fn control(&self) -> &CellosaurusControlPlane {
        &self.control
    }
}

#[tool_handler]
impl ServerHandler for CellosaurusMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
