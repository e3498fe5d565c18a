//! Load workbooks from disk, normalize them, export and read the result back

use std::path::Path;

use budget_sheets::prelude::*;
use budget_sheets::{SheetData, SourceConfig, StyledCell, XlsxReader, XlsxWriter};
use pretty_assertions::assert_eq;

fn write_source(path: &Path, sheet: &str, rows: Vec<Vec<CellValue>>) {
    let style = Style::default();
    let mut data = SheetData::new(sheet);
    for row in rows {
        data.push_row(row.into_iter().map(|v| StyledCell::new(v, &style)).collect());
    }
    XlsxWriter::write_file(&[data], path).unwrap();
}

fn custeio(path: &Path) {
    write_source(
        path,
        "Planilha1",
        vec![
            vec!["AÇÃO".into(), "PAGAMENTO REALIZADO".into(), "SALDO".into()],
            vec!["Custeio".into(), 1234.5.into(), 10.0.into()],
            vec!["Bolsas".into(), CellValue::Empty, 2.005.into()],
            vec!["Total Geral".into(), 1234.5.into(), 12.0.into()],
        ],
    );
}

fn config(dir: &Path) -> DashboardConfig {
    let custeio_path = dir.join("planilha20rl.xlsx");
    custeio(&custeio_path);

    let demanda_path = dir.join("demanda.csv");
    std::fs::write(&demanda_path, "ITEM,VALOR\nPapel,12.5\nTOTAL,12.5\n").unwrap();

    DashboardConfig {
        sources: vec![
            SourceConfig::new("20RL (CUSTEIO)", custeio_path),
            SourceConfig::new("DEMANDA 2025", demanda_path),
        ],
        chart: None,
        ..Default::default()
    }
}

#[test]
fn test_dashboard_display() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = Dashboard::load(&config(dir.path()));

    assert!(dashboard.failures.is_empty());
    let section = dashboard.section("20RL (CUSTEIO)").unwrap();
    assert_eq!(
        section.table.display_rows(),
        &[
            vec!["Custeio", "R$ 1.234,50", "R$ 10,00"],
            vec!["Bolsas", "-", "R$ 2,00"],
            vec!["Total Geral", "R$ 1.234,50", "R$ 12,00"],
        ]
    );
    assert_eq!(
        section.table.row_styles(),
        &[RowStyle::Even, RowStyle::Odd, RowStyle::Total]
    );

    let demanda = dashboard.section("DEMANDA 2025").unwrap();
    assert_eq!(demanda.table.display_row(0).unwrap(), &["Papel", "R$ 12,50"]);
    assert_eq!(demanda.table.row_style(1), Some(RowStyle::Total));
}

#[test]
fn test_export_blanks_missing_values() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = Dashboard::load(&config(dir.path()));
    let out = dir.path().join("saida").join("Orcamento_Publico_2025.xlsx");

    export_to_file(&dashboard.sections, &out, &ExportOptions::default()).unwrap();

    assert_eq!(
        XlsxReader::sheet_names_from_file(&out).unwrap(),
        vec!["20RL (CUSTEIO)", "DEMANDA 2025"]
    );

    let table = XlsxReader::read_file(&out, Some("20RL (CUSTEIO)")).unwrap();
    let headers: Vec<&str> = table.headers().collect();
    assert_eq!(headers, vec!["AÇÃO", "PAGAMENTO REALIZADO", "SALDO"]);
    assert_eq!(table.cell(0, 1), Some(&CellValue::text("R$ 1.234,50")));
    // "-" on screen, empty in the workbook
    assert_eq!(table.cell(1, 1), Some(&CellValue::Empty));
    assert_eq!(table.cell(2, 0), Some(&CellValue::text("Total Geral")));
}

#[test]
fn test_export_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = Dashboard::load(&config(dir.path()));
    let options = ExportOptions::default().with_numeric_cells(NumericCells::Number);

    let bytes = export_workbook(&dashboard.sections, &options).unwrap();
    let table = XlsxReader::read(std::io::Cursor::new(bytes), Some("DEMANDA 2025")).unwrap();

    assert_eq!(table.cell(0, 1), Some(&CellValue::Number(12.5)));
    assert_eq!(table.column("VALOR").unwrap().kind(), ColumnKind::Numeric);
}

#[test]
fn test_open_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planilha20rl.xlsx");
    custeio(&path);

    let normalized = Table::open_normalized(&path, Some("Planilha1")).unwrap();
    assert_eq!(normalized.row_count(), 3);

    let err = Table::open(&path, Some("Página3")).unwrap_err();
    assert!(err.to_string().contains("planilha20rl.xlsx"));
}

#[test]
fn test_reexported_sheet_sources_reload() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = Dashboard::load(&config(dir.path()));
    let out = dir.path().join("export.xlsx");
    export_to_file(&dashboard.sections, &out, &ExportOptions::default()).unwrap();

    // The export can itself be loaded as a source; amounts are now text
    let again = Dashboard::load(&DashboardConfig {
        sources: vec![SourceConfig {
            sheet: Some("20RL (CUSTEIO)".to_string()),
            ..SourceConfig::new("20RL (CUSTEIO)", &out)
        }],
        chart: None,
        ..Default::default()
    });
    let section = again.section("20RL (CUSTEIO)").unwrap();
    assert_eq!(section.table.display_row(0).unwrap()[1], "R$ 1.234,50");
    assert_eq!(section.table.display_row(1).unwrap()[1], "-");
}

#[test]
fn test_date_cells_load_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pagamentos.xlsx");

    let plain = Style::default();
    let date = Style::new().number_format("dd/mm/yyyy");
    let mut data = SheetData::new("Planilha1");
    data.push_row(vec![
        StyledCell::new("DATA", &plain),
        StyledCell::new("VALOR", &plain),
    ]);
    data.push_row(vec![
        StyledCell::new(45678.0, &date),
        StyledCell::new(10.0, &plain),
    ]);
    XlsxWriter::write_file(&[data], &path).unwrap();

    let normalized = Table::open_normalized(&path, None).unwrap();
    assert_eq!(normalized.columns()[0].kind(), ColumnKind::Text);
    assert_eq!(normalized.display_row(0).unwrap(), &["2025-01-21", "R$ 10,00"]);
}
