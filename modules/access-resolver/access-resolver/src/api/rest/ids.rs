//! Resource ids carried by a request.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

/// Candidate id sources, consulted in priority order: path parameters, JSON
/// body fields, then query parameters.
///
/// A value that is not a UUID counts as absent and the next source is tried.
#[derive(Debug, Default, Clone)]
pub struct RequestIds {
    path: HashMap<String, String>,
    body: Option<Value>,
    query: HashMap<String, String>,
}

fn parse(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

impl RequestIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_path<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.path
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Parse a raw `a=1&b=2` query string. Malformed input yields no parameters.
    #[must_use]
    pub fn with_query(mut self, raw: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();
        for (k, v) in pairs {
            self.query.entry(k).or_insert(v);
        }
        self
    }

    #[must_use]
    pub fn path_id(&self, field: &str) -> Option<Uuid> {
        self.path.get(field).and_then(|v| parse(v))
    }

    #[must_use]
    pub fn body_id(&self, field: &str) -> Option<Uuid> {
        self.body
            .as_ref()
            .and_then(|b| b.get(field))
            .and_then(Value::as_str)
            .and_then(parse)
    }

    #[must_use]
    pub fn query_id(&self, field: &str) -> Option<Uuid> {
        self.query.get(field).and_then(|v| parse(v))
    }

    /// First valid id for `field`.
    #[must_use]
    pub fn lookup(&self, field: &str) -> Option<Uuid> {
        self.path_id(field)
            .or_else(|| self.body_id(field))
            .or_else(|| self.query_id(field))
    }
}
