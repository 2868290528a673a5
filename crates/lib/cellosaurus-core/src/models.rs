//! Request models for the Cellosaurus API.
//!
//! Both request shapes validate when they are built; an instance that exists
//! is always safe to turn into query parameters.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::fields::{CellosaurusField, FieldParseError};

pub const DEFAULT_QUERY: &str = "id:HeLa";
pub const MAX_ROWS: u32 = 1000;

/// Output format requested from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Json,
    Xml,
    Txt,
    Tsv,
}

impl Format {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Txt => "txt",
            Self::Tsv => "tsv",
        }
    }

    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = FieldParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "txt" => Ok(Self::Txt),
            "tsv" => Ok(Self::Tsv),
            _ => Err(FieldParseError {
                value: value.to_string(),
                kind: "Format",
            }),
        }
    }
}

/// A request model was given a value outside its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub constraint: String,
}

impl ValidationError {
    fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.constraint)
    }
}

impl Error for ValidationError {}

/// Unvalidated search inputs. Convert with `SearchRequest::try_from`.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub query: String,
    pub fields: Option<Vec<CellosaurusField>>,
    pub start: i64,
    pub rows: i64,
    pub sort: Option<String>,
    pub format: Format,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            fields: None,
            start: 0,
            rows: i64::from(MAX_ROWS),
            sort: None,
            format: Format::Json,
        }
    }
}

/// A validated search against `/search/cell-line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    fields: Vec<CellosaurusField>,
    start: u64,
    rows: u32,
    sort: Option<String>,
    format: Format,
}

impl SearchRequest {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn fields(&self) -> &[CellosaurusField] {
        &self.fields
    }

    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            fields: Vec::new(),
            start: 0,
            rows: MAX_ROWS,
            sort: None,
            format: Format::Json,
        }
    }
}

impl TryFrom<SearchOptions> for SearchRequest {
    type Error = ValidationError;

    fn try_from(options: SearchOptions) -> Result<Self, Self::Error> {
        let start = u64::try_from(options.start)
            .map_err(|_| ValidationError::new("start", "must be greater than or equal to 0"))?;
        let rows = clamp_rows(options.rows)?;
        let sort = options.sort.filter(|value| !value.trim().is_empty());

        Ok(Self {
            query: options.query,
            fields: options.fields.unwrap_or_default(),
            start,
            rows,
            sort,
            format: options.format,
        })
    }
}

/// Caps `rows` at the API ceiling; values below 1 are rejected.
///
/// # Errors
/// Returns `ValidationError` when `rows` is zero or negative.
pub fn clamp_rows(rows: i64) -> Result<u32, ValidationError> {
    if rows < 1 {
        return Err(ValidationError::new("rows", "must be greater than or equal to 1"));
    }
    Ok(u32::try_from(rows).map_or(MAX_ROWS, |rows| rows.min(MAX_ROWS)))
}

/// A validated lookup against `/cell-line/<accession>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLineRequest {
    accession: String,
    fields: Vec<CellosaurusField>,
    format: Format,
}

impl CellLineRequest {
    /// Builds a lookup request; the accession is trimmed.
    ///
    /// # Errors
    /// Returns `ValidationError` when the accession is blank.
    pub fn new(
        accession: &str,
        fields: Option<Vec<CellosaurusField>>,
        format: Format,
    ) -> Result<Self, ValidationError> {
        let accession = accession.trim();
        if accession.is_empty() {
            return Err(ValidationError::new("accession", "must not be empty"));
        }
        Ok(Self {
            accession: accession.to_string(),
            fields: fields.unwrap_or_default(),
            format,
        })
    }

    #[must_use]
    pub fn accession(&self) -> &str {
        &self.accession
    }

    #[must_use]
    pub fn fields(&self) -> &[CellosaurusField] {
        &self.fields
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_defaults() {
        let request = SearchRequest::try_from(SearchOptions::default()).expect("defaults are valid");
        assert_eq!(request, SearchRequest::default());
        assert_eq!(request.query(), "id:HeLa");
        assert_eq!(request.format(), Format::Json);
        assert_eq!(request.start(), 0);
        assert_eq!(request.rows(), 1000);
        assert!(request.fields().is_empty());
    }

    #[test]
    fn search_request_keeps_fields_and_rows() {
        let request = SearchRequest::try_from(SearchOptions {
            fields: Some(vec![CellosaurusField::Id, CellosaurusField::Ac]),
            rows: 20,
            ..SearchOptions::default()
        })
        .expect("valid request");
        assert_eq!(request.fields(), &[CellosaurusField::Id, CellosaurusField::Ac]);
        assert_eq!(request.rows(), 20);
    }

    #[test]
    fn rows_above_ceiling_are_clamped() {
        for rows in [1001, 5000, i64::from(u32::MAX) + 10, i64::MAX] {
            let clamped = clamp_rows(rows).expect("large rows are clamped, not rejected");
            assert_eq!(clamped, MAX_ROWS);
            assert_eq!(clamp_rows(i64::from(clamped)), Ok(clamped));
        }
        assert_eq!(clamp_rows(1000), Ok(1000));
        assert_eq!(clamp_rows(1), Ok(1));
    }

    #[test]
    fn non_positive_rows_are_rejected() {
        let err = clamp_rows(0).expect_err("zero rows");
        assert_eq!(err.field, "rows");
        assert!(clamp_rows(-3).is_err());
    }

    #[test]
    fn negative_start_is_rejected() {
        let err = SearchRequest::try_from(SearchOptions {
            start: -1,
            ..SearchOptions::default()
        })
        .expect_err("negative start");
        assert_eq!(err.field, "start");
        assert_eq!(err.to_string(), "start must be greater than or equal to 0");
    }

    #[test]
    fn blank_sort_is_dropped() {
        let request = SearchRequest::try_from(SearchOptions {
            sort: Some("  ".to_string()),
            ..SearchOptions::default()
        })
        .expect("valid request");
        assert_eq!(request.sort(), None);
    }

    #[test]
    fn cell_line_request_trims_accession() {
        let request = CellLineRequest::new(" CVCL_0030 ", None, Format::default())
            .expect("valid accession");
        assert_eq!(request.accession(), "CVCL_0030");
        assert_eq!(request.format(), Format::Json);
    }

    #[test]
    fn cell_line_request_rejects_blank_accession() {
        let err = CellLineRequest::new("   ", None, Format::Json).expect_err("blank accession");
        assert_eq!(err.field, "accession");
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("XML".parse::<Format>(), Ok(Format::Xml));
        assert_eq!(" tsv ".parse::<Format>(), Ok(Format::Tsv));
        assert!("yaml".parse::<Format>().is_err());
    }
}
