//! Safety policy configuration
//!
//! The three allowed table names, the dangerous-keyword set and the default
//! row cap are the only policy knobs. They are loaded once at process start
//! and stay immutable for the process lifetime; both the validator and the
//! router receive them by explicit injection.

use crate::error::{AnalistaError, AnalistaResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Policy knobs for the SQL safety validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Base relations the system is permitted to read
    pub allowed_tables: Vec<String>,
    /// SQL keywords denoting mutation, schema change or procedural
    /// execution; banned as whole words regardless of position
    pub dangerous_keywords: Vec<String>,
    /// Row cap appended when a query carries no explicit LIMIT
    pub default_row_limit: u32,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            allowed_tables: vec![
                "facturas".to_string(),
                "facturas_proveedor".to_string(),
                "items".to_string(),
            ],
            dangerous_keywords: [
                "DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "TRUNCATE", "CREATE", "GRANT",
                "REVOKE", "EXEC", "EXECUTE", "CALL", "MERGE",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            default_row_limit: 200,
        }
    }
}

impl SafetyConfig {
    /// Load configuration from a file.
    ///
    /// Supports TOML and JSON formats based on file extension.
    /// Returns the default config if the file doesn't exist.
    pub fn load_from_file(path: &Path) -> AnalistaResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AnalistaError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| {
                AnalistaError::config(format!(
                    "Failed to parse TOML config '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            _ => serde_json::from_str(&content).map_err(|e| {
                AnalistaError::config(format!(
                    "Failed to parse JSON config '{}': {}",
                    path.display(),
                    e
                ))
            })?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail-fast startup validation.
    ///
    /// An unusable policy table is a programming/deployment error and must
    /// never surface as a per-request rejection.
    pub fn validate(&self) -> AnalistaResult<()> {
        if self.allowed_tables.is_empty() {
            return Err(AnalistaError::config("allowed_tables must not be empty"));
        }
        if self.dangerous_keywords.is_empty() {
            return Err(AnalistaError::config(
                "dangerous_keywords must not be empty",
            ));
        }
        if self.default_row_limit == 0 {
            return Err(AnalistaError::config("default_row_limit must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_policy_tables() {
        let config = SafetyConfig::default();
        assert_eq!(
            config.allowed_tables,
            vec!["facturas", "facturas_proveedor", "items"]
        );
        assert!(config.dangerous_keywords.iter().any(|k| k == "DROP"));
        assert!(config.dangerous_keywords.iter().any(|k| k == "MERGE"));
        assert_eq!(config.dangerous_keywords.len(), 13);
        assert_eq!(config.default_row_limit, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let config = SafetyConfig::load_from_file(Path::new("/nonexistent/policy.toml")).unwrap();
        assert_eq!(config.default_row_limit, 200);
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policy.toml");
        fs::write(
            &path,
            r#"
allowed_tables = ["facturas"]
dangerous_keywords = ["DROP", "DELETE"]
default_row_limit = 50
"#,
        )
        .unwrap();

        let config = SafetyConfig::load_from_file(&path).unwrap();
        assert_eq!(config.allowed_tables, vec!["facturas"]);
        assert_eq!(config.dangerous_keywords, vec!["DROP", "DELETE"]);
        assert_eq!(config.default_row_limit, 50);
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policy.json");
        fs::write(
            &path,
            r#"{"allowed_tables": ["items"], "default_row_limit": 10}"#,
        )
        .unwrap();

        let config = SafetyConfig::load_from_file(&path).unwrap();
        assert_eq!(config.allowed_tables, vec!["items"]);
        // Missing fields fall back to the defaults
        assert_eq!(config.dangerous_keywords.len(), 13);
        assert_eq!(config.default_row_limit, 10);
    }

    #[test]
    fn test_empty_allowlist_fails_fast() {
        let config = SafetyConfig {
            allowed_tables: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limit_fails_fast() {
        let config = SafetyConfig {
            default_row_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_policy_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policy.toml");
        fs::write(&path, "allowed_tables = []\n").unwrap();
        assert!(SafetyConfig::load_from_file(&path).is_err());
    }
}
