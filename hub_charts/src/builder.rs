pub use crate::config::*;

/// A builder for assembling a table row by row, as the file readers do.
///
/// ```
/// pub use hub_charts::builder::TableBuilder;
/// pub use hub_charts::Cell;
/// # use hub_charts::ChartErrors;
///
/// let mut builder = TableBuilder::new(&["Hub".to_string(), "Technology: Cost".to_string()]);
///
/// builder.push_row(vec![Cell::Text("Alpha".to_string()), Cell::Number(1.0)])?;
///
/// let table = builder.build()?;
/// assert_eq!(table.num_rows(), 1);
///
/// # Ok::<(), ChartErrors>(())
/// ```
pub struct TableBuilder {
    pub(crate) _names: Vec<String>,
    pub(crate) _rows: Vec<Vec<Cell>>,
}

impl TableBuilder {
    /// Starts a table from its header.
    ///
    /// Blank header names become `Unnamed: <index>` and repeated names get a
    /// `.1`, `.2`, ... suffix, so that every column can be addressed by name.
    pub fn new(header: &[String]) -> TableBuilder {
        let mut names: Vec<String> = Vec::new();
        for (idx, h) in header.iter().enumerate() {
            let base = if h.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                h.clone()
            };
            let mut name = base.clone();
            let mut dup = 0;
            while names.contains(&name) {
                dup += 1;
                name = format!("{}.{}", base, dup);
            }
            names.push(name);
        }
        TableBuilder {
            _names: names,
            _rows: Vec::new(),
        }
    }

    pub fn column_names(&self) -> &[String] {
        &self._names
    }

    /// Adds a row. Short rows are padded with empty cells.
    pub fn push_row(&mut self, mut row: Vec<Cell>) -> Result<(), ChartErrors> {
        if row.len() > self._names.len() {
            return Err(ChartErrors::RaggedTable {
                column: format!("row {}", self._rows.len() + 1),
                expected: self._names.len(),
                found: row.len(),
            });
        }
        row.resize(self._names.len(), Cell::Empty);
        self._rows.push(row);
        Ok(())
    }

    pub fn build(self) -> Result<Table, ChartErrors> {
        let mut columns: Vec<Column> = self
            ._names
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(self._rows.len()),
            })
            .collect();
        for row in self._rows {
            for (col, cell) in columns.iter_mut().zip(row.into_iter()) {
                col.values.push(cell);
            }
        }
        Table::new(columns)
    }
}

/// The markers of a missing value in the data files, besides blank fields.
pub const NA_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Converts a raw text field into a cell.
///
/// Blank fields and the `NA_VALUES` markers are empty, fields that parse as
/// floating point numbers are numbers, everything else is text (untrimmed).
pub fn parse_cell(s: &str) -> Cell {
    let t = s.trim();
    if t.is_empty() || NA_VALUES.contains(&t) {
        Cell::Empty
    } else if let Ok(x) = t.parse::<f64>() {
        if x.is_nan() {
            Cell::Empty
        } else {
            Cell::Number(x)
        }
    } else {
        Cell::Text(s.to_string())
    }
}
