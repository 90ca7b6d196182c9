use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use hub_charts::builder::{parse_cell, TableBuilder};
use snafu::prelude::*;

use crate::dash::*;

/// Reads one sheet of a workbook into a table. The first row is the header.
pub fn read_sheet(path: &str, sheet: &str) -> DashResult<Table> {
    info!("Attempting to read sheet {:?} of {:?}", sheet, path);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range(sheet)
        .context(MissingSheetSnafu { path, sheet })?
        .context(OpeningExcelSnafu { path })?;
    range_to_table(&wrange).context(TableShapeSnafu { path })
}

pub(crate) fn range_to_table(wrange: &Range<DataType>) -> Result<Table, ChartErrors> {
    let mut rows = wrange.rows();
    let header: Vec<String> = match rows.next() {
        Some(h) => h.iter().map(header_name).collect(),
        None => {
            warn!("range_to_table: empty sheet");
            Vec::new()
        }
    };
    debug!("range_to_table: header: {:?}", header);
    let mut builder = TableBuilder::new(&header);
    for (idx, row) in rows.enumerate() {
        debug!("range_to_table: idx: {:?} row: {:?}", idx, row);
        builder.push_row(row.iter().map(read_cell).collect())?;
    }
    builder.build()
}

fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Float(f) => Cell::Number(*f),
        // Dates are kept as their serial number.
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::String(s) => parse_cell(s),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        _ => Cell::Empty,
    }
}

fn header_name(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => "".to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::DateTime(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        _ => "".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_to_table() {
        let mut r: Range<DataType> = Range::new((0, 0), (3, 3));
        r.set_value((0, 0), DataType::String("Main Sector".to_string()));
        r.set_value((0, 1), DataType::String("Frequency".to_string()));
        r.set_value((0, 2), DataType::String("Total Supported".to_string()));
        r.set_value((1, 0), DataType::String("Mining".to_string()));
        r.set_value((1, 1), DataType::Int(2));
        r.set_value((1, 2), DataType::Float(10.5));
        r.set_value((2, 0), DataType::String("Trade".to_string()));
        r.set_value((2, 1), DataType::String("3".to_string()));
        r.set_value((3, 0), DataType::String("Mining".to_string()));
        r.set_value((3, 1), DataType::Bool(true));

        let t = range_to_table(&r).unwrap();
        assert_eq!(
            t.column_names(),
            vec!["Main Sector", "Frequency", "Total Supported", "Unnamed: 3"]
        );
        assert_eq!(t.num_rows(), 3);
        assert_eq!(
            t.column("Frequency").unwrap().values,
            vec![
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::Text("true".to_string())
            ]
        );
        assert_eq!(
            t.column("Total Supported").unwrap().values,
            vec![Cell::Number(10.5), Cell::Empty, Cell::Empty]
        );
    }

    #[test]
    fn headers_of_any_type() {
        let mut r: Range<DataType> = Range::new((0, 0), (0, 4));
        r.set_value((0, 0), DataType::String("Main Sector".to_string()));
        r.set_value((0, 1), DataType::Bool(true));
        r.set_value((0, 2), DataType::DateTime(44927.0));
        r.set_value((0, 3), DataType::Int(2023));

        let t = range_to_table(&r).unwrap();
        assert_eq!(
            t.column_names(),
            vec!["Main Sector", "true", "44927", "2023", "Unnamed: 4"]
        );
    }

    #[test]
    fn empty_sheet() {
        let r: Range<DataType> = Range::empty();
        let t = range_to_table(&r).unwrap();
        assert_eq!(t.num_rows(), 0);
        assert!(t.columns().is_empty());
    }
}
