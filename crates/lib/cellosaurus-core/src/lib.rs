//! Core types and services for cellosaurus-mcp.
//!
//! This crate owns the field vocabulary, the validated request models and
//! their query-parameter mapping, the HTTP client for the public Cellosaurus
//! API, and the control plane that turns untyped tool arguments into calls.

pub mod client;
pub mod control;
pub mod fields;
pub mod models;
pub mod params;
