use chrono::NaiveDate;
use core_types::{ComparisonRow, ComparisonTable, ObservedSeries};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Full outer join of several labelled series on date.
///
/// Every distinct label becomes one column, in first-seen order; a repeated
/// label keeps its first series. The row index is the union of all input
/// dates, ascending. Cells with no observation stay `None`: there is no
/// interpolation or fill-forward. An empty input keeps its column (all cells
/// missing) and never removes rows contributed by the others. When every input
/// is empty the table has no rows.
pub fn align(indicator_name: &str, per_economy: &[(String, ObservedSeries)]) -> ComparisonTable {
    let mut columns: Vec<String> = Vec::with_capacity(per_economy.len());
    let mut inputs: Vec<&ObservedSeries> = Vec::with_capacity(per_economy.len());
    for (label, series) in per_economy {
        if columns.contains(label) {
            tracing::warn!(label, "Ignoring repeated comparison column.");
            continue;
        }
        columns.push(label.clone());
        inputs.push(series);
    }

    let mut rows: BTreeMap<NaiveDate, Vec<Option<Decimal>>> = BTreeMap::new();
    for (column, series) in inputs.iter().enumerate() {
        for observation in series.iter() {
            let cells = rows
                .entry(observation.date)
                .or_insert_with(|| vec![None; columns.len()]);
            cells[column] = Some(observation.value);
        }
    }

    let table = ComparisonTable {
        indicator_name: indicator_name.to_string(),
        columns,
        rows: rows
            .into_iter()
            .map(|(date, cells)| ComparisonRow { date, cells })
            .collect(),
    };

    if table.is_empty() {
        tracing::debug!(indicator_name, "No data to align.");
    }
    table
}
