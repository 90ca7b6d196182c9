// Primitives for reading CSV files.

use hub_charts::builder::{parse_cell, TableBuilder};
use snafu::prelude::*;

use crate::dash::{io_common::simplify_file_name, *};

/// Reads a CSV file with a header row into a table.
///
/// Short lines are padded with empty cells.
pub fn read_csv_table(path: &str) -> DashResult<Table> {
    info!("Attempting to read CSV file {:?}", path);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_table: header: {:?}", header);

    let mut builder = TableBuilder::new(&header);
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let row: Vec<Cell> = line.iter().map(parse_cell).collect();
        builder.push_row(row).context(TableShapeSnafu { path })?;
    }
    let table = builder.build().context(TableShapeSnafu { path })?;
    info!(
        "read_csv_table: {}: {} rows, {} columns",
        simplify_file_name(path),
        table.num_rows(),
        table.columns().len()
    );
    Ok(table)
}
