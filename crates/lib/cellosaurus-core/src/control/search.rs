use serde_json::Value;

use crate::fields::CellosaurusField;
use crate::models::{DEFAULT_QUERY, SearchOptions, SearchRequest, ValidationError, clamp_rows};

use super::{CellosaurusControlPlane, ControlError, parse_optional_fields};

pub const DEFAULT_SPECIES: &str = "human";
pub const DEFAULT_TOOL_ROWS: i64 = 10;

pub const DISEASE_DEFAULT_FIELDS: [CellosaurusField; 5] = [
    CellosaurusField::Id,
    CellosaurusField::Ac,
    CellosaurusField::Di,
    CellosaurusField::Ox,
    CellosaurusField::DerivedFromSite,
];

pub const TISSUE_DEFAULT_FIELDS: [CellosaurusField; 5] = [
    CellosaurusField::Id,
    CellosaurusField::Ac,
    CellosaurusField::DerivedFromSite,
    CellosaurusField::Ox,
    CellosaurusField::CellType,
];

/// Untyped search arguments as received from a tool caller.
#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub query: String,
    pub fields: Option<Vec<String>>,
    pub start: i64,
    pub rows: i64,
    pub sort: Option<String>,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            fields: None,
            start: 0,
            rows: DEFAULT_TOOL_ROWS,
            sort: None,
        }
    }
}

/// Arguments for the disease/tissue convenience searches.
#[derive(Debug, Clone)]
pub struct FindArgs {
    pub term: String,
    pub species: Option<String>,
    pub fields: Option<Vec<String>>,
    pub limit: i64,
}

impl FindArgs {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            species: Some(DEFAULT_SPECIES.to_string()),
            fields: None,
            limit: DEFAULT_TOOL_ROWS,
        }
    }
}

/// Joins a structured filter with an optional `ox:` species filter.
#[must_use]
pub fn compose_query(filter: &str, term: &str, species: Option<&str>) -> String {
    let mut query = format!("{filter}:{term}");
    if let Some(species) = species.map(str::trim).filter(|value| !value.is_empty()) {
        query.push_str(" ox:");
        query.push_str(species);
    }
    query
}

impl CellosaurusControlPlane {
    /// Free-text search over cell lines.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidField` before any request is sent when a
    /// field code is unknown, `ControlError::Validation` for bad paging values,
    /// and `ControlError::Search` for transport failures.
    pub async fn search_cell_lines(&self, args: SearchArgs) -> Result<Value, ControlError> {
        let fields = parse_optional_fields(args.fields.as_deref())?;
        let request = SearchRequest::try_from(SearchOptions {
            query: args.query,
            fields,
            start: args.start,
            rows: args.rows,
            sort: args.sort,
            ..SearchOptions::default()
        })?;
        self.client
            .search(&request)
            .await
            .map_err(ControlError::Search)
    }

    /// Searches `di:<disease>`, optionally narrowed by species.
    ///
    /// # Errors
    /// Same as [`Self::search_cell_lines`].
    pub async fn find_by_disease(&self, args: FindArgs) -> Result<Value, ControlError> {
        self.find(CellosaurusField::Di.code(), &DISEASE_DEFAULT_FIELDS, args)
            .await
    }

    /// Searches `derived-from-site:<tissue>`, optionally narrowed by species.
    ///
    /// # Errors
    /// Same as [`Self::search_cell_lines`].
    pub async fn find_by_tissue(&self, args: FindArgs) -> Result<Value, ControlError> {
        self.find(
            CellosaurusField::DerivedFromSite.code(),
            &TISSUE_DEFAULT_FIELDS,
            args,
        )
        .await
    }

    async fn find(
        &self,
        filter: &str,
        default_fields: &[CellosaurusField],
        args: FindArgs,
    ) -> Result<Value, ControlError> {
        let rows = clamp_rows(args.limit).map_err(|err| ValidationError {
            field: "limit",
            ..err
        })?;
        let query = compose_query(filter, args.term.trim(), args.species.as_deref());
        let fields = args
            .fields
            .filter(|fields| !fields.is_empty())
            .unwrap_or_else(|| {
                default_fields
                    .iter()
                    .map(|field| field.code().to_string())
                    .collect()
            });
        self.search_cell_lines(SearchArgs {
            query,
            fields: Some(fields),
            start: 0,
            rows: i64::from(rows),
            sort: None,
        })
        .await
    }
}
