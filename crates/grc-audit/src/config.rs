//! Configuration and document loading
//!
//! YAML (`.yaml`/`.yml`) and JSON (`.json`) documents are accepted for both
//! [`GrcConfig`] and the scope lookup tables.

use crate::error::AuditError;
use crate::risk::RiskThresholds;
use grc_scope::ScopeTables;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Workspace configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrcConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Risk level bounds
    pub risk: RiskThresholds,
}

impl Default for GrcConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            risk: RiskThresholds::default(),
        }
    }
}

impl GrcConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With risk thresholds
    #[inline]
    #[must_use]
    pub fn with_risk_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.risk = thresholds;
        self
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// Returns [`AuditError::Config`] for invalid risk thresholds
    pub fn validate(&self) -> Result<(), AuditError> {
        self.risk.validate()
    }

    /// Load and validate configuration from a YAML or JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let config: Self = load_document(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }
}

/// Load the three lookup tables from a YAML or JSON file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_scope_tables(path: impl AsRef<Path>) -> Result<ScopeTables, AuditError> {
    let tables: ScopeTables = load_document(path.as_ref())?;
    tracing::debug!(
        macroprocesos = tables.macroprocesos.len(),
        procesos = tables.procesos.len(),
        subprocesos = tables.subprocesos.len(),
        "scope tables loaded"
    );
    Ok(tables)
}

/// Deserialize a YAML or JSON document, chosen by extension
///
/// # Errors
/// Returns [`AuditError::UnsupportedFormat`] for other extensions,
/// [`AuditError::Io`] and [`AuditError::Parse`] otherwise
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, AuditError> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;

    let parsed: Result<T, String> = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| AuditError::Parse {
        path: path.display().to_string(),
        message,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Result<Self, AuditError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(AuditError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn config_builder() {
        let config = GrcConfig::new().with_log_filter("debug");

        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.risk, RiskThresholds::default());
    }

    #[test]
    fn load_yaml_config_with_partial_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "grc.yaml", "log_filter: warn\nrisk:\n  high_max: 20\n");

        let config = GrcConfig::load(&path).unwrap();

        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.risk.low_max, 4);
        assert_eq!(config.risk.high_max, 20);
    }

    #[test]
    fn load_rejects_invalid_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "grc.json", r#"{"risk": {"low_max": 10, "medium_max": 5}}"#);

        assert!(matches!(GrcConfig::load(&path), Err(AuditError::Config(_))));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "grc.toml", "log_filter = 'x'");

        assert!(matches!(GrcConfig::load(&path), Err(AuditError::UnsupportedFormat(_))));
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tables.json", "{ not json");

        assert!(matches!(load_scope_tables(&path), Err(AuditError::Parse { .. })));
    }

    #[test]
    fn load_scope_tables_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = "\
macroprocesos:
  - { id: M1, code: MP-01, name: Finance }
procesos:
  - { id: P1, code: P-01, name: Payables, macroprocesoId: M1 }
";
        let path = write_file(&dir, "tables.yml", yaml);

        let tables = load_scope_tables(&path).unwrap();

        assert_eq!(tables.procesos[0].macroproceso_id, "M1");
        assert!(tables.subprocesos.is_empty());
    }
}
