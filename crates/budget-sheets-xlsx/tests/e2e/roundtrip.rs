//! Write a workbook, read it back.

use crate::{styled_sheet, temp_workbook, StyledValue::*};
use budget_sheets_core::{CellValue, ColumnKind};
use budget_sheets_xlsx::{XlsxError, XlsxReader, XlsxWriter};
use pretty_assertions::assert_eq;

#[test]
fn test_written_workbook_reads_back() {
    let (_dir, path) = temp_workbook("orcamento.xlsx");
    let sheet = styled_sheet(
        "20RL (CUSTEIO)",
        &["AÇÃO", "PAGAMENTO REALIZADO"],
        vec![
            vec![Text("Custeio"), Number(1500.25)],
            vec![Text("Bolsas"), Blank],
            vec![Text("Total Geral"), Number(1500.25)],
        ],
    );
    XlsxWriter::write_file(&[sheet], &path).unwrap();

    let table = XlsxReader::read_file(&path, None).unwrap();
    let headers: Vec<&str> = table.headers().collect();
    assert_eq!(headers, vec!["AÇÃO", "PAGAMENTO REALIZADO"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.cell(1, 1), Some(&CellValue::Empty));
    assert_eq!(table.cell(2, 1), Some(&CellValue::Number(1500.25)));
    assert_eq!(table.column("PAGAMENTO REALIZADO").unwrap().kind(), ColumnKind::Numeric);
    assert_eq!(table.column("AÇÃO").unwrap().kind(), ColumnKind::Text);
}

#[test]
fn test_multiple_sheets() {
    let (_dir, path) = temp_workbook("multi.xlsx");
    let sheets = vec![
        styled_sheet("2994 (ASSISTÊNCIA)", &["A"], vec![vec![Number(1.0)]]),
        styled_sheet("CAPACITACÃO", &["B"], vec![vec![Text("x <&> y")]]),
    ];
    XlsxWriter::write_file(&sheets, &path).unwrap();

    assert_eq!(
        XlsxReader::sheet_names_from_file(&path).unwrap(),
        vec!["2994 (ASSISTÊNCIA)", "CAPACITACÃO"]
    );

    let second = XlsxReader::read_file(&path, Some("CAPACITACÃO")).unwrap();
    assert_eq!(second.cell(0, 0), Some(&CellValue::text("x <&> y")));

    let err = XlsxReader::read_file(&path, Some("DEMANDA 2025")).unwrap_err();
    assert!(err.to_string().contains("DEMANDA 2025"));
}

#[test]
fn test_missing_file_is_io_error() {
    let (_dir, path) = temp_workbook("absent.xlsx");
    let err = XlsxReader::read_file(&path, None).unwrap_err();
    assert!(matches!(err, XlsxError::Io(_)));
}

#[test]
fn test_not_a_zip() {
    let (_dir, path) = temp_workbook("plain.xlsx");
    std::fs::write(&path, "AÇÃO;VALOR\n").unwrap();
    let err = XlsxReader::read_file(&path, None).unwrap_err();
    assert!(matches!(err, XlsxError::Zip(_)));
}
