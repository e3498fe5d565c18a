//! Dashboard configuration
//!
//! A JSON file lists the source tables, the chart source and the export
//! file name. Every field is optional; missing fields fall back to the
//! public-budget defaults.
//!
//! ```json
//! {
//!   "sources": [
//!     { "name": "20RL (CUSTEIO)", "path": "planilha20rl.xlsx" },
//!     { "name": "DEMANDA 2025", "path": "demanda.csv", "numeric_columns": ["VALOR"] }
//!   ],
//!   "chart": { "path": "planilhatabela.xlsx", "sheet": "Página3" },
//!   "export_file_name": "Orcamento_Publico_2025.xlsx"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::DEFAULT_EXPORT_FILE_NAME;

/// One table shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Display name; also the sheet name in the exported workbook
    pub name: String,
    /// Workbook or CSV file
    pub path: PathBuf,
    /// Sheet to read; the first sheet when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    /// Columns to treat as currency regardless of their detected kind
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numeric_columns: Vec<String>,
}

impl SourceConfig {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, path: P) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            sheet: None,
            numeric_columns: Vec::new(),
        }
    }
}

/// Source and views of the chart tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub path: PathBuf,
    pub sheet: Option<String>,
    /// Label column; the first column when absent
    pub category_column: Option<String>,
    /// Columns compared side by side in the grouped view
    pub compare_columns: Vec<String>,
    /// Columns available as single-column views
    pub columns: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("planilhatabela.xlsx"),
            sheet: Some("Página3".to_string()),
            category_column: None,
            compare_columns: vec![
                "RECEBIDO".to_string(),
                "FALTANDO RECEBER".to_string(),
                "NECESSÁRIO PARA 2025".to_string(),
            ],
            columns: vec![
                "A RECEBER".to_string(),
                "RECEBIDO".to_string(),
                "FALTANDO RECEBER".to_string(),
                "NECESSÁRIO PARA 2025".to_string(),
            ],
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub sources: Vec<SourceConfig>,
    pub chart: Option<ChartConfig>,
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig::new("20RL (CUSTEIO)", "planilha20rl.xlsx"),
                SourceConfig::new("2994 (ASSISTÊNCIA)", "planilha2994.xlsx"),
                SourceConfig::new("CAPACITACÃO", "planilhacapacita.xlsx"),
                SourceConfig::new("DEMANDA 2025", "planilhanescessaria.xlsx"),
            ],
            chart: Some(ChartConfig::default()),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON configuration file.
    ///
    /// Relative source and chart paths are resolved against the directory
    /// containing the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse configuration from JSON text without resolving paths
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Make every relative path relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for source in &mut self.sources {
            source.path = resolve(base, &source.path);
        }
        if let Some(chart) = &mut self.chart {
            chart.path = resolve(base, &chart.path);
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        let names: Vec<&str> = config.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["20RL (CUSTEIO)", "2994 (ASSISTÊNCIA)", "CAPACITACÃO", "DEMANDA 2025"]
        );
        assert_eq!(config.export_file_name, "Orcamento_Publico_2025.xlsx");
        assert_eq!(config.chart.unwrap().sheet.as_deref(), Some("Página3"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(
            r#"{ "sources": [ { "name": "A", "path": "a.csv", "numeric_columns": ["VALOR"] } ] }"#,
        )
        .unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].numeric_columns, vec!["VALOR"]);
        assert_eq!(config.sources[0].sheet, None);
        assert_eq!(config.export_file_name, DEFAULT_EXPORT_FILE_NAME);
        assert!(config.chart.is_some());
    }

    #[test]
    fn test_null_chart_disables_charts() {
        let config = DashboardConfig::from_json(r#"{ "chart": null }"#).unwrap();
        assert!(config.chart.is_none());
        assert_eq!(config.sources.len(), 4);
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("dashboard.json");
        fs::write(
            &config_path,
            r#"{ "sources": [ { "name": "A", "path": "dados/a.xlsx" } ], "chart": { "path": "t.xlsx" } }"#,
        )
        .unwrap();

        let config = DashboardConfig::load(&config_path).unwrap();
        assert_eq!(config.sources[0].path, dir.path().join("dados/a.xlsx"));
        let chart = config.chart.unwrap();
        assert_eq!(chart.path, dir.path().join("t.xlsx"));
        assert_eq!(chart.compare_columns.len(), 3);
    }

    #[test]
    fn test_invalid_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("broken.json");
        fs::write(&config_path, "{ sources: ").unwrap();

        let err = DashboardConfig::load(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
