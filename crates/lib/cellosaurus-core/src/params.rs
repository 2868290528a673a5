//! Query-parameter construction for API requests.

use std::fmt;

use crate::fields::CellosaurusField;
use crate::models::{CellLineRequest, Format, SearchRequest};

/// A scalar query-parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(u64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(u64::from(value))
    }
}

/// Parameters for a single API call, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    entries: Vec<(&'static str, ParamValue)>,
}

impl QueryParameters {
    fn insert(&mut self, name: &'static str, value: impl Into<ParamValue>) {
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Flattens to string pairs for the HTTP query string.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        self.iter().map(|(key, value)| (key, value.to_string())).collect()
    }
}

/// Maps a validated request to the parameters the API expects.
pub trait BuildParams {
    fn build_params(&self) -> QueryParameters;
}

impl BuildParams for SearchRequest {
    fn build_params(&self) -> QueryParameters {
        let mut params = QueryParameters::default();
        params.insert("q", self.query());
        insert_fields(&mut params, self.fields());
        params.insert("start", self.start());
        params.insert("rows", self.rows());
        if let Some(sort) = self.sort() {
            params.insert("sort", sort);
        }
        insert_format(&mut params, self.format());
        params
    }
}

impl BuildParams for CellLineRequest {
    fn build_params(&self) -> QueryParameters {
        let mut params = QueryParameters::default();
        insert_fields(&mut params, self.fields());
        insert_format(&mut params, self.format());
        params
    }
}

/// Parameters for `/release-info`, which only understands `format`.
#[must_use]
pub fn release_info_params(format: Format) -> QueryParameters {
    let mut params = QueryParameters::default();
    insert_format(&mut params, format);
    params
}

fn insert_fields(params: &mut QueryParameters, fields: &[CellosaurusField]) {
    if fields.is_empty() {
        return;
    }
    let joined = fields
        .iter()
        .map(|field| field.code())
        .collect::<Vec<_>>()
        .join(",");
    params.insert("fields", joined);
}

// JSON is the API default, so it is never sent.
fn insert_format(params: &mut QueryParameters, format: Format) {
    if !format.is_json() {
        params.insert("format", format.as_str());
    }
}
