//! Query parameter sets for upstream requests.

use std::fmt;

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Integer(n) => write!(f, "{}", n),
            QueryValue::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

/// Ordered query parameters. Entries without a value are kept so callers can pass
/// optional filters straight through, but they are never transmitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`QueryParams::insert`].
    #[must_use]
    pub fn with<V: Into<QueryValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<V: Into<QueryValue>>(&mut self, name: impl Into<String>, value: Option<V>) {
        self.entries.push((name.into(), value.map(Into::into)));
    }

    /// Name/value pairs that will be sent, values stringified.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.as_str(), v.to_string())))
    }

    /// Whether a parameter with this name will be sent.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs().any(|(n, _)| n == name)
    }

    /// True when no parameter will be sent.
    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }
}
