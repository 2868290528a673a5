use cellosaurus_core::control::ControlError;
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

/// The one place a control-plane failure becomes data: `{"error": <message>}`.
pub(crate) fn into_payload(tool: &'static str, result: Result<Value, ControlError>) -> Value {
    result.unwrap_or_else(|err| {
        warn!(tool, error = %err, "tool call failed");
        json!({ "error": err.to_string() })
    })
}

pub(crate) fn json_result(payload: impl Serialize) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::success(vec![Content::json(payload)?]))
}
