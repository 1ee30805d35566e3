use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ResultParseError;

/// A search response from the 1881 API
///
/// Hits are passed through exactly as the API returned them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "QueryTimeMilliSeconds")]
    query_time: u64,
    #[serde(rename = "NumberOfHits")]
    number_of_hits: u64,
    #[serde(rename = "Profile")]
    profile: String,
    #[serde(rename = "Hits")]
    hits: Vec<Value>,
}

impl SearchResult {
    /// Build a result from a decoded response body
    pub fn from_json(json: &Value) -> Result<Self, ResultParseError> {
        let object = json.as_object().ok_or(ResultParseError::NotAnObject)?;

        let query_time = field(object, "QueryTimeMilliSeconds")?;
        let query_time = query_time
            .as_u64()
            .or_else(|| query_time.as_f64().filter(|ms| *ms >= 0.0).map(|ms| ms as u64))
            .ok_or(ResultParseError::InvalidField {
                field: "QueryTimeMilliSeconds",
                expected: "a non-negative number",
            })?;

        let number_of_hits = field(object, "NumberOfHits")?
            .as_u64()
            .ok_or(ResultParseError::InvalidField {
                field: "NumberOfHits",
                expected: "a non-negative integer",
            })?;

        let profile = field(object, "Profile")?
            .as_str()
            .ok_or(ResultParseError::InvalidField {
                field: "Profile",
                expected: "a string",
            })?
            .to_string();

        let hits = field(object, "Hits")?
            .as_array()
            .ok_or(ResultParseError::InvalidField {
                field: "Hits",
                expected: "an array",
            })?
            .clone();

        Ok(Self {
            query_time,
            number_of_hits,
            profile,
            hits,
        })
    }

    /// Parse a raw response body
    pub fn from_slice(body: &[u8]) -> Result<Self, ResultParseError> {
        let json: Value = serde_json::from_slice(body)?;
        Self::from_json(&json)
    }

    /// Query execution time in milliseconds
    pub fn query_time(&self) -> u64 {
        self.query_time
    }

    /// Total number of hits reported by the API
    pub fn count(&self) -> u64 {
        self.number_of_hits
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Hit records in response order
    pub fn all(&self) -> &[Value] {
        &self.hits
    }

    pub fn hits(&self) -> std::slice::Iter<'_, Value> {
        self.hits.iter()
    }
}

impl IntoIterator for SearchResult {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

fn field<'a>(
    object: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, ResultParseError> {
    object.get(name).ok_or(ResultParseError::MissingField(name))
}
