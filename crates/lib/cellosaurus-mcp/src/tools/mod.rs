//! MCP tool modules.
//!
//! Tools are grouped by the API endpoint they front: cell-line search (plus
//! the disease/tissue shortcuts) and single-record lookup with the field
//! vocabulary and release metadata.

pub mod lookup;
pub mod search;
