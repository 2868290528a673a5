use serde_json::Value;

use crate::models::{CellLineRequest, Format};

use super::{CellosaurusControlPlane, ControlError, parse_optional_fields};

/// Untyped lookup arguments as received from a tool caller.
#[derive(Debug, Clone)]
pub struct LookupArgs {
    pub accession: String,
    pub fields: Option<Vec<String>>,
}

impl CellosaurusControlPlane {
    /// Fetches a single cell line by accession (e.g. `CVCL_0030`).
    ///
    /// # Errors
    /// Returns `ControlError::InvalidField` or `ControlError::Validation`
    /// without touching the network, and `ControlError::Lookup` for
    /// transport failures.
    pub async fn get_cell_line_info(&self, args: LookupArgs) -> Result<Value, ControlError> {
        let fields = parse_optional_fields(args.fields.as_deref())?;
        let request = CellLineRequest::new(&args.accession, fields, Format::Json)?;
        self.client
            .lookup(&request)
            .await
            .map_err(ControlError::Lookup)
    }

    /// Fetches the current database release metadata.
    ///
    /// # Errors
    /// Returns `ControlError::ReleaseInfo` for transport failures.
    pub async fn release_info(&self) -> Result<Value, ControlError> {
        self.client
            .release_info(Format::Json)
            .await
            .map_err(ControlError::ReleaseInfo)
    }
}
