//! Dashboard assembly: load every configured table, normalize, style

use budget_sheets_core::{normalize, NormalizedTable, RowPalette, RowStyle};
use tracing::{debug, warn};

use crate::config::{DashboardConfig, SourceConfig};
use crate::error::LoadError;
use crate::loader::load_source;

/// A loaded and normalized table with its display name
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub table: NormalizedTable,
}

impl Section {
    pub fn new<S: Into<String>>(name: S, table: NormalizedTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// Rows with their style tag and CSS declarations, in display order
    pub fn styled_rows<'a>(
        &'a self,
        palette: &'a RowPalette,
    ) -> impl Iterator<Item = StyledRow<'a>> + 'a {
        self.table
            .display_rows()
            .iter()
            .zip(self.table.row_styles())
            .map(move |(cells, &style)| StyledRow {
                cells,
                style,
                css: palette.style_for(style).to_css(),
            })
    }
}

/// One display row ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRow<'a> {
    pub cells: &'a [String],
    pub style: RowStyle,
    pub css: String,
}

/// A source that could not be loaded
#[derive(Debug)]
pub struct LoadFailure {
    pub name: String,
    pub error: LoadError,
}

/// Every section that loaded, plus the sources that did not
#[derive(Debug, Default)]
pub struct Dashboard {
    pub sections: Vec<Section>,
    pub failures: Vec<LoadFailure>,
}

impl Dashboard {
    /// Load and normalize every configured source.
    ///
    /// A source that fails to load is recorded in `failures` and skipped;
    /// the remaining sources are still loaded, in configuration order.
    pub fn load(config: &DashboardConfig) -> Self {
        let mut dashboard = Dashboard::default();
        for source in &config.sources {
            dashboard.load_one(source);
        }
        dashboard
    }

    fn load_one(&mut self, source: &SourceConfig) {
        match load_source(source) {
            Ok(table) => {
                let table = normalize(&table);
                debug!(
                    table = %source.name,
                    rows = table.row_count(),
                    "normalized table"
                );
                self.sections.push(Section::new(source.name.clone(), table));
            }
            Err(error) => {
                warn!(table = %source.name, %error, "skipping table");
                self.failures.push(LoadFailure {
                    name: source.name.clone(),
                    error,
                });
            }
        }
    }

    /// Look up a loaded section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Check whether no section loaded
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_sheets_core::{CellValue, Table};
    use std::fs;

    #[test]
    fn test_styled_rows() {
        let table = Table::from_rows(
            vec!["AÇÃO", "VALOR"],
            vec![
                vec!["Custeio".into(), 10.0.into()],
                vec!["Bolsas".into(), CellValue::Empty],
                vec!["TOTAL".into(), 10.0.into()],
            ],
        )
        .unwrap();
        let section = Section::new("20RL (CUSTEIO)", normalize(&table));
        let palette = RowPalette::screen();

        let rows: Vec<StyledRow<'_>> = section.styled_rows(&palette).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].style, RowStyle::Even);
        assert_eq!(rows[0].cells, ["Custeio", "R$ 10,00"]);
        assert_eq!(rows[1].cells[1], "-");
        assert_eq!(rows[1].style, RowStyle::Odd);
        assert_eq!(rows[2].style, RowStyle::Total);
        assert!(rows[2].css.contains("#1C1C1C"));
    }

    #[test]
    fn test_failed_source_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("ok.csv");
        fs::write(&good, "A,B\nx,1\n").unwrap();

        let config = DashboardConfig {
            sources: vec![
                SourceConfig::new("Falta", dir.path().join("missing.xlsx")),
                SourceConfig::new("Ok", &good),
            ],
            ..Default::default()
        };

        let dashboard = Dashboard::load(&config);
        assert_eq!(dashboard.sections.len(), 1);
        assert_eq!(dashboard.sections[0].name, "Ok");
        assert_eq!(dashboard.failures.len(), 1);
        assert_eq!(dashboard.failures[0].name, "Falta");
        assert!(dashboard.failures[0]
            .error
            .to_string()
            .contains("missing.xlsx"));
        assert!(dashboard.section("Ok").is_some());
    }
}
