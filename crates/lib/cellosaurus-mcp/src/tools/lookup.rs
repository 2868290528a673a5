use cellosaurus_core::control::{CellosaurusControlPlane, LookupArgs};
use cellosaurus_core::fields::list_fields;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CellosaurusMcp, helpers};

/// Parameters for fetching one cell line by accession.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetCellLineInfoParams {
    /// Cellosaurus accession, e.g. `CVCL_0030`.
    pub accession: String,
    pub fields: Option<Vec<String>>,
}

#[tool_router(router = tool_router_lookup, vis = "pub")]
impl CellosaurusMcp {
    #[tool(description = "Get detailed information about a cell line by its Cellosaurus accession (e.g. CVCL_0030).")]
    async fn get_cell_line_info(
        &self,
        Parameters(params): Parameters<GetCellLineInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::json_result(cell_line_info(self.control(), params).await)
    }

    #[tool(description = "List the field codes that can be requested, with descriptions.")]
    async fn list_available_fields(&self) -> Result<CallToolResult, ErrorData> {
        helpers::json_result(list_fields())
    }

    #[tool(description = "Get release information (version, date, record counts) for the Cellosaurus database.")]
    async fn get_release_info(&self) -> Result<CallToolResult, ErrorData> {
        helpers::json_result(release_info(self.control()).await)
    }
}

async fn cell_line_info(control: &CellosaurusControlPlane, params: GetCellLineInfoParams) -> Value {
    let args = LookupArgs {
        accession: params.accession,
        fields: params.fields,
    };
    helpers::into_payload("get_cell_line_info", control.get_cell_line_info(args).await)
}

async fn release_info(control: &CellosaurusControlPlane) -> Value {
    helpers::into_payload("get_release_info", control.release_info().await)
}
