use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bridge request as handed over by the host runtime: the caller's ordered
/// field projection, a flat `key=value&key=value` query string, and a
/// string-keyed metadata map (pagination hints, page tokens).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub fields: Vec<String>,
    pub query: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl BridgeRequest {
    pub fn new(fields: Vec<String>, query: impl Into<String>) -> Self {
        Self { fields, query: query.into(), metadata: HashMap::new() }
    }

    /// Single metadata entry lookup, `None` when the key was never supplied.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Builds the base response-metadata map from a request's metadata: the
/// standard pagination keys are carried over when present and default to "0".
pub fn normalize_pagination_metadata(metadata: &HashMap<String, String>) -> HashMap<String, String> {
    let mut normalized = HashMap::new();
    for key in ["pageSize", "pageNumber", "offset"] {
        let value = metadata.get(key).cloned().unwrap_or_else(|| "0".to_string());
        normalized.insert(key.to_string(), value);
    }
    normalized
}
