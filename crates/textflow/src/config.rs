use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use textflow_core::CoreError;

use crate::{Result, TextflowError};

/// Mapping from logical model keys (e.g. `"phi3"`) to backend model identifiers.
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelCatalog {
    models: HashMap<String, String>,
}

impl ModelCatalog {
    /// Build a catalog from `(logical key, backend id)` pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            models: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load from a JSON object file. A missing, malformed or empty file is an error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TextflowError::Config(format!(
                "Failed to read model catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog: Self = serde_json::from_str(&content).map_err(|e| {
            TextflowError::Config(format!(
                "Failed to parse model catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        if catalog.is_empty() {
            return Err(TextflowError::Config(format!(
                "Model catalog {} defines no models",
                path.display()
            )));
        }
        Ok(catalog)
    }

    /// Resolve a logical key to the backend model identifier
    pub fn resolve(&self, key: &str) -> textflow_core::Result<&str> {
        self.models
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| CoreError::UnknownModel(key.to_string()))
    }

    /// Logical keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.models.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Tunables for the workflow controllers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    /// Model calls allowed per sentence before it is counted as unclassified.
    /// The first call uses the plain prompt, later ones the constrained prompt.
    pub max_sentiment_attempts: usize,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            max_sentiment_attempts: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "textflow-catalog-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_catalog_from_json_object() {
        let path = write_temp("ok", r#"{"phi3": "phi3:mini", "llama": "llama3:8b"}"#);
        let catalog = ModelCatalog::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve("phi3").unwrap(), "phi3:mini");
        assert_eq!(catalog.keys(), vec!["llama", "phi3"]);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let catalog = ModelCatalog::from_pairs([("phi3", "phi3")]);
        let err = catalog.resolve("gpt").unwrap_err();
        assert!(matches!(err, CoreError::UnknownModel(key) if key == "gpt"));
    }

    #[test]
    fn missing_file_fails() {
        let path = std::env::temp_dir().join("textflow-catalog-does-not-exist.json");
        let err = ModelCatalog::load_from_file(&path).unwrap_err();
        assert!(matches!(err, TextflowError::Config(_)));
    }

    #[test]
    fn malformed_file_fails() {
        let path = write_temp("malformed", r#"["phi3"]"#);
        let result = ModelCatalog::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(TextflowError::Config(_))));
    }

    #[test]
    fn empty_catalog_fails() {
        let path = write_temp("empty", "{}");
        let result = ModelCatalog::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn settings_default_to_four_attempts() {
        assert_eq!(WorkflowSettings::default().max_sentiment_attempts, 4);
        let settings: WorkflowSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.max_sentiment_attempts, 4);
    }
}
