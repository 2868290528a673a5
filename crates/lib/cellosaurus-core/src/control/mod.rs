use std::{error::Error, fmt, sync::Arc};

use crate::client::{CellosaurusClient, TransportError};
use crate::fields::{CellosaurusField, FieldParseError, parse_fields};
use crate::models::ValidationError;

pub mod lookup;
pub mod search;

pub use lookup::LookupArgs;
pub use search::{FindArgs, SearchArgs};

/// Failure of a tool-level operation. `Display` is the caller-facing message.
#[derive(Debug)]
pub enum ControlError {
    InvalidField(FieldParseError),
    Validation(ValidationError),
    Search(TransportError),
    Lookup(TransportError),
    ReleaseInfo(TransportError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidField(err) => write!(f, "Invalid field specified: {err}"),
            Self::Validation(err) => write!(f, "Invalid request: {err}"),
            Self::Search(err) => write!(f, "Search failed: {err}"),
            Self::Lookup(err) => write!(f, "Failed to get cell line info: {err}"),
            Self::ReleaseInfo(err) => write!(f, "Failed to get release info: {err}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Search(err) | Self::Lookup(err) | Self::ReleaseInfo(err) => Some(err),
        }
    }
}

impl From<FieldParseError> for ControlError {
    fn from(err: FieldParseError) -> Self {
        Self::InvalidField(err)
    }
}

impl From<ValidationError> for ControlError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Entry point for the tool operations: parses caller strings, validates the
/// request models and delegates to the shared HTTP client.
#[derive(Clone)]
pub struct CellosaurusControlPlane {
    client: Arc<CellosaurusClient>,
}

impl CellosaurusControlPlane {
    #[must_use]
    pub fn new(client: CellosaurusClient) -> Self {
        Self::from_arc(Arc::new(client))
    }

    #[must_use]
    pub const fn from_arc(client: Arc<CellosaurusClient>) -> Self {
        Self { client }
    }
}

/// `None` and an empty list both mean "API default fields".
fn parse_optional_fields(
    fields: Option<&[String]>,
) -> Result<Option<Vec<CellosaurusField>>, FieldParseError> {
    match fields {
        Some(codes) if !codes.is_empty() => parse_fields(codes).map(Some),
        _ => Ok(None),
    }
}
