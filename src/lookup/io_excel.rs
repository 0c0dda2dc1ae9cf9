use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::lookup::*;

/// Reads the rows of a worksheet (the first one by default). The first row
/// holds the headers. Every cell is converted to text here.
pub fn read_excel_rows(path: &str, worksheet_name: Option<&str>) -> LookupResult<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    }
    .context(EmptyExcelSnafu { path })?
    .context(OpeningExcelSnafu { path })?;

    let mut iter = wrange.rows();
    let headers: Vec<String> = match iter.next() {
        Some(header) => header.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    debug!("read_excel_rows: header: {:?}", headers);

    let mut res: Vec<RawRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|c| c.is_empty()) {
            debug!("read_excel_rows: skipping empty row {}", idx + 2);
            continue;
        }
        let raw: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), cells.get(i).cloned().unwrap_or_default()))
            .collect();
        res.push(raw);
    }
    Ok(res)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => "".to_string(),
        x => {
            warn!("read_excel_rows: cannot read cell {:?}", x);
            "".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(cell_text(&DataType::String("Yea".to_string())), "Yea");
        assert_eq!(cell_text(&DataType::Float(2025.0)), "2025");
        assert_eq!(cell_text(&DataType::Float(1.5)), "1.5");
        assert_eq!(cell_text(&DataType::Int(7)), "7");
        assert_eq!(cell_text(&DataType::Empty), "");
    }

    fn fixture() -> String {
        format!(
            "{}/tests/data/excel_sheets/votes.xlsx",
            env!("CARGO_MANIFEST_DIR")
        )
    }

    #[test]
    fn first_worksheet_by_default() {
        let rows = read_excel_rows(&fixture(), None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Jane Doe");
        assert_eq!(rows[0]["HB2_2025"], "No");
        assert_eq!(rows[1]["id"], "42");
        assert_eq!(rows[1]["HB1_2025"], "Nay");
        assert_eq!(rows[1]["HB2_2025"], "");
    }

    #[test]
    fn named_worksheet() {
        let rows = read_excel_rows(&fixture(), Some("Long")).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["bill"], "HB 1 (2025)");
        assert_eq!(rows[1]["vote"], "Excused");
        let table = build_vote_table(&rows);
        assert_eq!(table.columns(), vec!["HB1_2025", "SB45_2025"]);
    }

    #[test]
    fn unknown_worksheet() {
        assert!(matches!(
            read_excel_rows(&fixture(), Some("Nope")),
            Err(LookupError::EmptyExcel { .. })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_excel_rows("/does/not/exist.xlsx", None),
            Err(LookupError::OpeningExcel { .. })
        ));
    }
}
