//! Model catalog backing `/v1/models`.
//!
//! `models.json` is a JSON object whose *values* are the model identifiers
//! to expose (keys are free-form labels). The catalog is read once at
//! startup; a missing or malformed file degrades to an empty catalog so the
//! gateway still serves chat traffic for any model id the client names.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use talkai_types::{ConfigError, ModelInfo, ModelList};
use tracing::{info, warn};

/// Default path of the catalog file, relative to the working directory.
pub const MODELS_FILE: &str = "models.json";

/// Immutable model catalog, fixed at load time.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelInfo>,
}

fn read_model_ids(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&e))?;
    let mapping: HashMap<String, String> =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;

    let mut ids: Vec<String> = mapping.into_values().collect();
    ids.sort_unstable();
    Ok(ids)
}

impl ModelCatalog {
    /// Load the catalog from `path`, degrading to empty on any failure.
    ///
    /// The `created` timestamp of every entry is fixed here, so repeated
    /// `/v1/models` calls return byte-identical lists.
    pub fn load(path: &Path) -> Self {
        let ids = match read_model_ids(path) {
            Ok(ids) => {
                info!("Loaded {} model(s) from {}", ids.len(), path.display());
                ids
            }
            Err(e) => {
                warn!("Could not load model catalog ({}), serving an empty list", e);
                Vec::new()
            }
        };

        let created = Utc::now().timestamp();
        Self { models: ids.into_iter().map(|id| ModelInfo::new(id, created)).collect() }
    }

    /// Build a catalog from explicit entries.
    pub fn from_models(models: Vec<ModelInfo>) -> Self {
        Self { models }
    }

    /// The `/v1/models` response for this catalog.
    pub fn model_list(&self) -> ModelList {
        ModelList::new(self.models.clone())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
