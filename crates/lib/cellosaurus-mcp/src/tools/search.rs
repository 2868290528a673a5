use cellosaurus_core::control::search::{DEFAULT_SPECIES, DEFAULT_TOOL_ROWS};
use cellosaurus_core::control::{CellosaurusControlPlane, FindArgs, SearchArgs};
use cellosaurus_core::models::DEFAULT_QUERY;
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

/// Parameters for a free-text cell-line search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchCellLinesParams {
    /// Cellosaurus query, e.g. `id:HeLa` or `di:melanoma ox:human`. Defaults to `id:HeLa`.
    pub query: Option<String>,
    /// Field codes to return (see `list_available_fields`).
    pub fields: Option<Vec<String>>,
    /// Offset of the first result. Defaults to 0.
    pub start: Option<i64>,
    /// Number of results, capped at 1000. Defaults to 10.
    pub rows: Option<i64>,
    /// Sort order, e.g. `id asc`.
    pub sort: Option<String>,
}

/// Parameters for searching cell lines by disease.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindByDiseaseParams {
    pub disease: String,
    /// Species filter; defaults to `human`, an empty string disables it.
    pub species: Option<String>,
    pub fields: Option<Vec<String>>,
    pub limit: Option<i64>,
}

/// Parameters for searching cell lines by tissue of origin.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindByTissueParams {
    pub tissue: String,
    /// Species filter; defaults to `human`, an empty string disables it.
    pub species: Option<String>,
    pub fields: Option<Vec<String>>,
    pub limit: Option<i64>,
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl CellosaurusMcp {
    #[tool(description = "Search Cellosaurus cell lines with a query such as `id:HeLa` or `di:melanoma ox:human`.")]
    async fn search_cell_lines(
        &self,
        Parameters(params): Parameters<SearchCellLinesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::json_result(search(self.control(), params).await)
    }

    #[tool(description = "Find cell lines derived from donors with a given disease, optionally filtered by species.")]
    async fn find_cell_lines_by_disease(
        &self,
        Parameters(params): Parameters<FindByDiseaseParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::json_result(find_by_disease(self.control(), params).await)
    }

    #[tool(description = "Find cell lines derived from a given tissue or organ, optionally filtered by species.")]
    async fn find_cell_lines_by_tissue(
        &self,
        Parameters(params): Parameters<FindByTissueParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::json_result(find_by_tissue(self.control(), params).await)
    }
}

async fn search(control: &CellosaurusControlPlane, params: SearchCellLinesParams) -> Value {
    let args = SearchArgs {
        query: params.query.unwrap_or_else(|| DEFAULT_QUERY.to_string()),
        fields: params.fields,
        start: params.start.unwrap_or(0),
        rows: params.rows.unwrap_or(DEFAULT_TOOL_ROWS),
        sort: params.sort,
    };
    helpers::into_payload("search_cell_lines", control.search_cell_lines(args).await)
}

async fn find_by_disease(control: &CellosaurusControlPlane, params: FindByDiseaseParams) -> Value {
    let args = find_args(params.disease, params.species, params.fields, params.limit);
    helpers::into_payload("find_cell_lines_by_disease", control.find_by_disease(args).await)
}

async fn find_by_tissue(control: &CellosaurusControlPlane, params: FindByTissueParams) -> Value {
    let args = find_args(params.tissue, params.species, params.fields, params.limit);
    helpers::into_payload("find_cell_lines_by_tissue", control.find_by_tissue(args).await)
}

fn find_args(
    term: String,
    species: Option<String>,
    fields: Option<Vec<String>>,
    limit: Option<i64>,
) -> FindArgs {
    FindArgs {
        term,
        species: Some(species.unwrap_or_else(|| DEFAULT_SPECIES.to_string())),
        fields,
        limit: limit.unwrap_or(DEFAULT_TOOL_ROWS),
    }
}
