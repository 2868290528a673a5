//! Field codes understood by the Cellosaurus API.
//!
//! The vocabulary is closed: every [`CellosaurusField`] maps to exactly one
//! wire code, and parsing a code that is not in the table fails.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// A field code selecting which attributes of a cell-line record to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellosaurusField {
    Id,
    Sy,
    Idsy,
    Ac,
    Acas,
    Dr,
    Ref,
    Rx,
    Ra,
    Rt,
    Rl,
    Ww,
    GenomeAncestry,
    Hla,
    SequenceVariation,
    CellType,
    DerivedFromSite,
    Karyotype,
    Str,
    Di,
    Ox,
    Sx,
    Ag,
    Hi,
    Ch,
    Oi,
    Ca,
    Cc,
    Dt,
}

impl CellosaurusField {
    /// Every field, in the order the API documentation groups them.
    pub const ALL: [Self; 29] = [
        Self::Id,
        Self::Sy,
        Self::Idsy,
        Self::Ac,
        Self::Acas,
        Self::Dr,
        Self::Ref,
        Self::Rx,
        Self::Ra,
        Self::Rt,
        Self::Rl,
        Self::Ww,
        Self::GenomeAncestry,
        Self::Hla,
        Self::SequenceVariation,
        Self::CellType,
        Self::DerivedFromSite,
        Self::Karyotype,
        Self::Str,
        Self::Di,
        Self::Ox,
        Self::Sx,
        Self::Ag,
        Self::Hi,
        Self::Ch,
        Self::Oi,
        Self::Ca,
        Self::Cc,
        Self::Dt,
    ];

    /// Wire code sent in the `fields` query parameter.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Sy => "sy",
            Self::Idsy => "idsy",
            Self::Ac => "ac",
            Self::Acas => "acas",
            Self::Dr => "dr",
            Self::Ref => "ref",
            Self::Rx => "rx",
            Self::Ra => "ra",
            Self::Rt => "rt",
            Self::Rl => "rl",
            Self::Ww => "ww",
            Self::GenomeAncestry => "genome-ancestry",
            Self::Hla => "hla",
            Self::SequenceVariation => "sequence-variation",
            Self::CellType => "cell-type",
            Self::DerivedFromSite => "derived-from-site",
            Self::Karyotype => "karyotype",
            Self::Str => "str",
            Self::Di => "di",
            Self::Ox => "ox",
            Self::Sx => "sx",
            Self::Ag => "ag",
            Self::Hi => "hi",
            Self::Ch => "ch",
            Self::Oi => "oi",
            Self::Ca => "ca",
            Self::Cc => "cc",
            Self::Dt => "dt",
        }
    }

    /// Human-readable description of the field.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Id => "Recommended name of the cell line",
            Self::Sy => "List of synonyms",
            Self::Idsy => "Recommended name with all synonyms",
            Self::Ac => "Primary accession (unique identifier)",
            Self::Acas => "Primary and secondary accessions",
            Self::Dr => "Cross-references to external resources",
            Self::Ref => "Publication references",
            Self::Rx => "Publication cross-reference",
            Self::Ra => "Publication authors",
            Self::Rt => "Publication title",
            Self::Rl => "Publication citation elements",
            Self::Ww => "Web page related to the cell line",
            Self::GenomeAncestry => "Ethnic ancestry based on genome analysis",
            Self::Hla => "HLA typing information",
            Self::SequenceVariation => "Important sequence variations",
            Self::CellType => "Cell type from which the cell line is derived",
            Self::DerivedFromSite => "Body part (tissue/organ) the cell line is derived from",
            Self::Karyotype => "Chromosomal information",
            Self::Str => "Short tandem repeat profile",
            Self::Di => "Diseases suffered by the donor",
            Self::Ox => "Species of origin with NCBI taxon identifier",
            Self::Sx => "Sex of the individual",
            Self::Ag => "Age at sampling time",
            Self::Hi => "Parent cell line",
            Self::Ch => "Child cell lines",
            Self::Oi => "Sister cell lines from same individual",
            Self::Ca => "Category (e.g., cancer cell line, hybridoma)",
            Self::Cc => "Various structured comments",
            Self::Dt => "Creation/modification dates and version",
        }
    }
}

impl fmt::Display for CellosaurusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raised when a string does not name a known field code (or output format).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldParseError {
    pub value: String,
    pub kind: &'static str,
}

impl fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.kind)
    }
}

impl Error for FieldParseError {}

impl FromStr for CellosaurusField {
    type Err = FieldParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.code() == value)
            .ok_or_else(|| FieldParseError {
                value: value.to_string(),
                kind: "CellosaurusField",
            })
    }
}

/// Parses caller-supplied codes, stopping at the first unknown one.
///
/// # Errors
/// Returns `FieldParseError` naming the first code outside the vocabulary.
pub fn parse_fields<S: AsRef<str>>(codes: &[S]) -> Result<Vec<CellosaurusField>, FieldParseError> {
    codes.iter().map(|code| code.as_ref().parse()).collect()
}

/// Returns the full vocabulary as `code -> description`.
#[must_use]
pub fn list_fields() -> BTreeMap<&'static str, &'static str> {
    CellosaurusField::ALL
        .into_iter()
        .map(|field| (field.code(), field.description()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back_to_their_field() {
        for field in CellosaurusField::ALL {
            assert_eq!(field.code().parse::<CellosaurusField>(), Ok(field));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "invalid_field"
            .parse::<CellosaurusField>()
            .expect_err("unknown code should fail");
        assert_eq!(err.value, "invalid_field");
        assert_eq!(err.to_string(), "'invalid_field' is not a valid CellosaurusField");
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!("ID".parse::<CellosaurusField>().is_err());
    }

    #[test]
    fn parse_fields_keeps_order_and_stops_on_first_unknown() {
        let parsed = parse_fields(&["str", "id", "derived-from-site"]).expect("known codes");
        assert_eq!(
            parsed,
            vec![
                CellosaurusField::Str,
                CellosaurusField::Id,
                CellosaurusField::DerivedFromSite
            ]
        );

        let err = parse_fields(&["id", "bogus", "also-bogus"]).expect_err("bogus code");
        assert_eq!(err.value, "bogus");
    }

    #[test]
    fn list_fields_covers_core_codes() {
        let fields = list_fields();
        assert_eq!(fields.len(), CellosaurusField::ALL.len());
        for code in ["id", "ac", "ox", "di", "str"] {
            let description = fields.get(code).expect("core code listed");
            assert!(!description.is_empty());
        }
    }
}
