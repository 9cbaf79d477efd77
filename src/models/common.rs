use serde::{Deserialize, Deserializer, Serialize};

/// JSON error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Deserializes a present-but-null field as `Some(None)`, so nullable
/// columns can be cleared through a partial update. A missing field stays
/// `None` via `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
