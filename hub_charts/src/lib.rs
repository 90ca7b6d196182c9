mod config;
use log::{debug, info, warn};

use std::collections::{BTreeMap, BTreeSet};

pub use crate::config::*;

pub mod builder;
pub mod charts;
pub mod manual;

/// Averages every column whose name starts with `keyword`.
///
/// Arguments:
/// * `table` the table to read from
/// * `keyword` the exact, case-sensitive prefix of the selected column names
///
/// The rows come in the order of the columns in the table. The labels are the
/// full column names. Only numeric cells count towards the mean: a column without
/// any numeric cell has an average of NaN.
///
/// If no column matches, a warning is logged and the result is empty. Callers
/// should treat this as "nothing to plot".
pub fn get_filtered_avg(table: &Table, keyword: &str) -> Vec<AggregateRow> {
    let filtered: Vec<&Column> = table
        .columns()
        .iter()
        .filter(|c| c.name.starts_with(keyword))
        .collect();
    if filtered.is_empty() {
        warn!("No columns found starting with '{}'", keyword);
        return Vec::new();
    }
    debug!(
        "get_filtered_avg: keyword {:?}: {} columns over {} rows",
        keyword,
        filtered.len(),
        table.num_rows()
    );
    filtered
        .iter()
        .map(|c| AggregateRow {
            label: c.name.clone(),
            average: mean(&c.values),
        })
        .collect()
}

/// The arithmetic mean of the numeric cells. NaN if there are none.
pub fn mean(cells: &[Cell]) -> f64 {
    let (sum, count) = cells
        .iter()
        .filter_map(|c| c.as_number())
        .fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Recovers the readable part of a `<Category>: <Label>` column name.
///
/// Everything up to and including the first ':' is dropped and the rest is
/// trimmed. Names without ':' are only trimmed.
pub fn strip_label_prefix(name: &str) -> String {
    match name.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => name.trim().to_string(),
    }
}

/// The initials of each word of a category name, uppercased.
/// `"Mining Services"` gives `"MS"`.
pub fn shorthand_label(category: &str) -> String {
    category
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Sums the numeric cells of `value_column` for each distinct value of
/// `group_column`.
///
/// Groups come in lexical order of their names. Rows with an empty group cell
/// are dropped, and non-numeric values do not contribute to the total.
pub fn group_by_sum(
    table: &Table,
    group_column: &str,
    value_column: &str,
) -> Result<Vec<CategorySummary>, ChartErrors> {
    let groups = table.require_column(group_column)?;
    let values = table.require_column(value_column)?;
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (g, v) in groups.values.iter().zip(values.values.iter()) {
        let key = match g.key() {
            Some(k) => k,
            None => {
                debug!("group_by_sum: skipping row without {:?}", group_column);
                continue;
            }
        };
        let total = totals.entry(key).or_insert(0.0);
        if let Some(x) = v.as_number() {
            *total += x;
        }
    }
    info!(
        "group_by_sum: {} groups of {:?} summing {:?}",
        totals.len(),
        group_column,
        value_column
    );
    Ok(totals
        .into_iter()
        .map(|(category, total)| CategorySummary {
            shorthand: shorthand_label(&category),
            category,
            total,
        })
        .collect())
}

/// The share of each average in the total, in percent.
///
/// This is what the percentage display of the pie chart shows. Missing (NaN)
/// averages count as zero. If the total is zero, all the shares are zero.
pub fn shares_of_total(rows: &[AggregateRow]) -> Vec<f64> {
    let value = |r: &AggregateRow| if r.average.is_nan() { 0.0 } else { r.average };
    let total: f64 = rows.iter().map(value).sum();
    rows.iter()
        .map(|r| {
            if total == 0.0 {
                0.0
            } else {
                100.0 * value(r) / total
            }
        })
        .collect()
}

/// The question categories of a survey table, as offered for selection.
///
/// A category is the text before the first ':' of a column name. Columns without
/// ':', the `Have:` columns and the unnamed columns are not categories.
pub fn survey_categories(table: &Table) -> Vec<String> {
    let cats: BTreeSet<String> = table
        .column_names()
        .iter()
        .filter(|n| !n.starts_with("Have:") && !n.contains("Unnamed"))
        .filter_map(|n| n.split_once(':'))
        .map(|(cat, _)| cat.trim().to_string())
        .collect();
    cats.into_iter().collect()
}
