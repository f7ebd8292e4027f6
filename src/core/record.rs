use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::core::primitives::{number_to_year, parse_number, parse_year};
use crate::error::ChartResult;

/// Column names used by the indicator dataset.
pub mod fields {
    pub const COUNTRY: &str = "Country";
    pub const YEAR: &str = "Year";
    pub const TECH_SECTOR: &str = "Tech Sector";
    pub const NETWORK_COVERAGE_5G: &str = "5G Network Coverage (%)";
    pub const INTERNET_PENETRATION: &str = "Internet Penetration (%)";
    pub const UNIVERSITY_COLLABORATIONS: &str = "University Research Collaborations";
    pub const STARTUP_COUNT: &str = "Number of Startups";
    pub const TECH_EXPORTS_USD: &str = "Tech Exports (in USD)";
}

/// One raw cell. Tabular sources deliver most cells as text, so numeric
/// access parses lazily instead of at ingestion time.
///
/// Deserialization never fails on a cell: booleans, arrays and objects load
/// as `Empty` so one odd column cannot reject the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Empty,
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => {
                number.as_f64().map_or(Self::Empty, Self::Number)
            }
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Null
            | serde_json::Value::Bool(_)
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => Self::Empty,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl FieldValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Number(_) | Self::Empty => None,
            Self::Text(text) => parse_number(text),
        }
    }

    #[must_use]
    pub fn as_year(&self) -> Option<i32> {
        match self {
            Self::Number(value) => number_to_year(*value),
            Self::Text(text) => parse_year(text),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Self::Number(value) => Some(Cow::Owned(value.to_string())),
            Self::Empty => None,
        }
    }
}

/// One row of the indicator table: an ordered field name → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Numeric value of `field`; missing or unparseable cells are absent, not zero.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    #[must_use]
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).and_then(FieldValue::as_text)
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.get(fields::YEAR).and_then(FieldValue::as_year)
    }

    #[must_use]
    pub fn country(&self) -> Option<Cow<'_, str>> {
        self.text(fields::COUNTRY)
    }

    #[must_use]
    pub fn sector(&self) -> Option<Cow<'_, str>> {
        self.text(fields::TECH_SECTOR)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

/// Parses a JSON array of flat row objects, the shape delivered by the
/// data-loading collaborator.
pub fn records_from_json_str(input: &str) -> ChartResult<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(input)?;
    debug!(count = records.len(), "loaded indicator records");
    Ok(records)
}
