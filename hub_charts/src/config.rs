// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The content of one cell of a table, after loading.
///
/// Loaders are responsible for the conversion: numbers stay numbers, blank
/// cells are `Empty`, and anything else is kept as text.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// The numeric payload, if any. Text and empty cells have none, even if the
    /// text looks like a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// True if this cell holds exactly the given text.
    pub fn is_text(&self, s: &str) -> bool {
        matches!(self, Cell::Text(t) if t == s)
    }

    /// The display value of the cell, as used for grouping keys.
    /// Empty cells have no key.
    pub fn key(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(x) => Some(x.to_string()),
            Cell::Empty => None,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<Cell>,
}

/// An ordered collection of named columns, all with the same number of rows.
///
/// Tables are immutable once built: filtering returns a new table.
#[derive(PartialEq, Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Table, ChartErrors> {
        let num_rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        for c in columns.iter() {
            if c.values.len() != num_rows {
                return Err(ChartErrors::RaggedTable {
                    column: c.name.clone(),
                    expected: num_rows,
                    found: c.values.len(),
                });
            }
        }
        Ok(Table { columns, num_rows })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require_column(&self, name: &str) -> Result<&Column, ChartErrors> {
        self.column(name)
            .ok_or_else(|| ChartErrors::MissingColumn(name.to_string()))
    }

    /// Keeps the rows for which the given column holds exactly `value` as text.
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<Table, ChartErrors> {
        let keep: Vec<bool> = self
            .require_column(column)?
            .values
            .iter()
            .map(|c| c.is_text(value))
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: c
                    .values
                    .iter()
                    .zip(keep.iter())
                    .filter(|(_, k)| **k)
                    .map(|(v, _)| v.clone())
                    .collect(),
            })
            .collect();
        Table::new(columns)
    }

    /// The distinct non-empty values of a column, in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<String>, ChartErrors> {
        let mut res: Vec<String> = Vec::new();
        for c in self.require_column(column)?.values.iter() {
            if let Some(k) = c.key() {
                if !res.contains(&k) {
                    res.push(k);
                }
            }
        }
        Ok(res)
    }
}

// ******** Output data structures *********

/// The average of one selected column.
#[derive(PartialEq, Debug, Clone)]
pub struct AggregateRow {
    pub label: String,
    /// NaN if the column has no numeric value.
    pub average: f64,
}

/// The total of one category in a group-by-sum.
#[derive(PartialEq, Debug, Clone)]
pub struct CategorySummary {
    pub category: String,
    pub shorthand: String,
    pub total: f64,
}

/// Errors that prevent a chart from being built.
///
/// Missing data for a selection is not an error: the builders return `None`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ChartErrors {
    MissingColumn(String),
    RaggedTable {
        column: String,
        expected: usize,
        found: usize,
    },
}

impl Error for ChartErrors {}

impl Display for ChartErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartErrors::MissingColumn(name) => write!(f, "missing column {:?}", name),
            ChartErrors::RaggedTable {
                column,
                expected,
                found,
            } => write!(
                f,
                "column {:?} has {} rows, expected {}",
                column, found, expected
            ),
        }
    }
}

// ********* Configuration **********

/// How the values of a pie chart are displayed in tooltips and labels.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ValueDisplay {
    /// The share of the slice in the series total, one decimal.
    Percentage,
    /// The average itself, two decimals.
    Value,
}

impl ValueDisplay {
    pub fn parse(s: &str) -> Option<ValueDisplay> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" => Some(ValueDisplay::Percentage),
            "value" | "raw" => Some(ValueDisplay::Value),
            _ => None,
        }
    }
}

/// The numeric column summed by the item chart.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ItemMetric {
    Frequency,
    TotalSupported,
}

impl ItemMetric {
    /// Any selector mentioning `Frequency` counts occurrences, everything else
    /// counts the supported jobs.
    pub fn from_selector(selector: &str) -> ItemMetric {
        if selector.contains("Frequency") {
            ItemMetric::Frequency
        } else {
            ItemMetric::TotalSupported
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            ItemMetric::Frequency => "Frequency",
            ItemMetric::TotalSupported => "Total Supported",
        }
    }
}

/// The column identifying the hub of a survey row.
pub const HUB_COLUMN: &str = "Hub";

/// The grouping column of the item chart.
pub const MAIN_SECTOR_COLUMN: &str = "Main Sector";
