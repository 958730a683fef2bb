//! Builder configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::tagset::Tagset;

/// Configuration for [`GraphBuilder`](crate::GraphBuilder).
///
/// ```
/// use layered_graph::BuilderConfig;
///
/// let config = BuilderConfig::from_toml_str("dialect = \"KAF\"\nsecure_tree = false").unwrap();
/// assert_eq!(config.dialect, "KAF");
/// assert!(!config.secure_tree);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Annotation dialect name, `KAF` or `NAF`
    pub dialect: String,
    /// Process each constituency edge exactly once, in record order
    pub secure_tree: bool,
    pub tagset: Tagset,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            dialect: "NAF".to_string(),
            secure_tree: true,
            tagset: Tagset::default(),
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(mut self, dialect: &str) -> Self {
        self.dialect = dialect.to_string();
        self
    }

    /// Choose between single-pass (`true`) and requeueing worklist resolution.
    pub fn with_secure_tree(mut self, secure: bool) -> Self {
        self.secure_tree = secure;
        self
    }

    pub fn with_tagset(mut self, tagset: Tagset) -> Self {
        self.tagset = tagset;
        self
    }

    pub fn from_toml_str(input: &str) -> GraphResult<Self> {
        toml::from_str(input).map_err(|e| GraphError::Config {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> GraphResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| GraphError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.dialect, "NAF");
        assert!(config.secure_tree);
        assert_eq!(&config.tagset, Tagset::penn());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = BuilderConfig::from_toml_str(
            r#"
            secure_tree = false

            [tagset]
            root_tags = ["ROOT", "S1"]
            "#,
        )
        .unwrap();
        assert_eq!(config.dialect, "NAF");
        assert!(!config.secure_tree);
        assert!(config.tagset.is_root("S1"));
        assert_eq!(config.tagset.head_markers, vec!["=H", "-H"]);
    }

    #[test]
    fn invalid_toml() {
        let err = BuilderConfig::from_toml_str("secure_tree = \"maybe\"").unwrap_err();
        assert!(matches!(err, GraphError::Config { .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dialect = \"KAF\"").unwrap();
        let config = BuilderConfig::load(file.path()).unwrap();
        assert_eq!(config.dialect, "KAF");
    }
}
