//! Model catalog entries for the OpenAI-compatible `/v1/models` surface.

use serde::{Deserialize, Serialize};

/// A single model as exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model identifier clients pass in chat completion requests
    pub id: String,
    /// Always `"model"`
    #[serde(default = "model_object")]
    pub object: String,
    /// Unix timestamp recorded when the catalog was loaded
    pub created: i64,
    /// Ownership tag, always `"talkai"`
    #[serde(default = "owned_by")]
    pub owned_by: String,
}

fn model_object() -> String {
    "model".to_string()
}

fn owned_by() -> String {
    "talkai".to_string()
}

impl ModelInfo {
    /// Build an entry with the standard object and ownership tags.
    pub fn new(id: impl Into<String>, created: i64) -> Self {
        Self { id: id.into(), object: model_object(), created, owned_by: owned_by() }
    }
}

/// The `/v1/models` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelList {
    /// Always `"list"`
    #[serde(default = "list_object")]
    pub object: String,
    /// Catalog entries in deterministic order
    #[serde(default)]
    pub data: Vec<ModelInfo>,
}

fn list_object() -> String {
    "list".to_string()
}

impl ModelList {
    /// Wrap catalog entries in the list envelope.
    pub fn new(data: Vec<ModelInfo>) -> Self {
        Self { object: list_object(), data }
    }
}
