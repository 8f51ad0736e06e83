//! Environment-driven configuration, wrapped in a struct
//! rather than scattered `env::var` calls so tests can construct one
//! directly instead of mutating process environment.

use std::path::PathBuf;

const PLUGIN_PATH_VAR: &str = "NITF_PLUGIN_PATH";
const SCHEMA_PATH_VAR: &str = "SIX_SCHEMA_PATH";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directories searched, in order, for dynamically-loaded TRE plugins.
    pub plugin_path: Vec<PathBuf>,
    /// Root directory under which SICD/SIDD/CPHD XSDs live. `None` disables
    /// schema validation on both read and write.
    pub schema_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let plugin_path = std::env::var_os(PLUGIN_PATH_VAR)
            .map(|v| std::env::split_paths(&v).collect())
            .unwrap_or_default();
        let schema_path = std::env::var_os(SCHEMA_PATH_VAR).map(PathBuf::from);
        Self {
            plugin_path,
            schema_path,
        }
    }

    pub fn validation_enabled(&self) -> bool {
        self.schema_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_disables_validation() {
        let cfg = Config::default();
        assert!(!cfg.validation_enabled());
        assert!(cfg.plugin_path.is_empty());
    }
}
