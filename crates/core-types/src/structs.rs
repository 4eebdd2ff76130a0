use crate::enums::Cadence;
use crate::error::CoreError;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single `(date, value)` pair as reported by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// A date-ordered sequence of observations.
///
/// Dates are strictly ascending with no duplicates. Gaps are allowed: a missing
/// period is simply absent from the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObservedSeries {
    observations: Vec<Observation>,
}

impl ObservedSeries {
    /// Builds a series from observations that must already be strictly ascending.
    pub fn new(observations: Vec<Observation>) -> Result<Self, CoreError> {
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CoreError::UnorderedSeries {
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }
        Ok(Self { observations })
    }

    /// Sorts by date and keeps the first observation of any duplicated date.
    pub fn from_unsorted(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);
        Self { observations }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Looks up the value observed on `date`, if any.
    #[cfg(test)]
    pub fn value_at(&self, date: NaiveDate) -> Option<Decimal> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|idx| self.observations[idx].value)
    }
}

/// One row of a derived series: the raw value and its year-over-year change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedRow {
    pub date: NaiveDate,
    pub value: Decimal,
    pub yoy_pct: Decimal,
}

/// A raw series paired with its year-over-year percentage change.
///
/// Only rows for which the change is defined are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedSeries {
    pub indicator_name: String,
    pub cadence: Cadence,
    pub rows: Vec<DerivedRow>,
}

impl DerivedSeries {
    pub fn empty(indicator_name: impl Into<String>, cadence: Cadence) -> Self {
        Self {
            indicator_name: indicator_name.into(),
            cadence,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The raw value column, as consumed by the comparison view.
    pub fn values(&self) -> ObservedSeries {
        // Rows come from an ordered series, so the order is preserved.
        ObservedSeries {
            observations: self
                .rows
                .iter()
                .map(|r| Observation::new(r.date, r.value))
                .collect(),
        }
    }
}

/// One date of a comparison table. `cells` is parallel to the table's columns;
/// `None` marks an economy with no observation on that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub cells: Vec<Option<Decimal>>,
}

/// Raw values of one indicator for several economies on a shared date axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub indicator_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// A table with no rows, signalling that there is nothing to display.
    pub fn empty(indicator_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            indicator_name: indicator_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, label: &str) -> Option<Vec<Option<Decimal>>> {
        let idx = self.column_index(label)?;
        Some(self.rows.iter().map(|r| r.cells[idx]).collect())
    }

    /// The cell for `label` on `date`. Returns `None` if either is unknown or the cell is missing.
    #[cfg(test)]
    pub fn value(&self, date: NaiveDate, label: &str) -> Option<Decimal> {
        let idx = self.column_index(label)?;
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .and_then(|row| self.rows[row].cells[idx])
    }

    /// True when the column exists and holds at least one value.
    pub fn has_values(&self, label: &str) -> bool {
        self.column(label)
            .is_some_and(|cells| cells.iter().any(Option::is_some))
    }
}

/// How far back to fetch and how far back to keep for presentation.
///
/// The fetch window is longer than the display window so the earliest
/// displayed period still has a year-earlier anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookbackWindow {
    pub fetch_years: u32,
    pub display_years: u32,
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self {
            fetch_years: 12,
            display_years: 10,
        }
    }
}

impl LookbackWindow {
    pub fn fetch_start(&self, today: NaiveDate) -> NaiveDate {
        years_before(today, self.fetch_years)
    }

    pub fn display_start(&self, today: NaiveDate) -> NaiveDate {
        years_before(today, self.display_years)
    }
}

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn strict_constructor_rejects_disorder_and_duplicates() {
        let unordered = vec![
            Observation::new(date(2024, 2, 1), dec!(1)),
            Observation::new(date(2024, 1, 1), dec!(2)),
        ];
        assert!(matches!(
            ObservedSeries::new(unordered),
            Err(CoreError::UnorderedSeries { .. })
        ));

        let duplicated = vec![
            Observation::new(date(2024, 1, 1), dec!(1)),
            Observation::new(date(2024, 1, 1), dec!(2)),
        ];
        assert!(ObservedSeries::new(duplicated).is_err());
    }

    #[test]
    fn from_unsorted_orders_and_keeps_first_duplicate() {
        let series = ObservedSeries::from_unsorted(vec![
            Observation::new(date(2024, 3, 1), dec!(3)),
            Observation::new(date(2024, 1, 1), dec!(1)),
            Observation::new(date(2024, 3, 1), dec!(30)),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.first().unwrap().date, date(2024, 1, 1));
        assert_eq!(series.value_at(date(2024, 3, 1)), Some(dec!(3)));
        assert_eq!(series.value_at(date(2024, 2, 1)), None);
    }

    #[test]
    fn lookback_window_uses_calendar_years() {
        let window = LookbackWindow::default();
        let today = date(2026, 10, 14);
        assert_eq!(window.fetch_start(today), date(2014, 10, 14));
        assert_eq!(window.display_start(today), date(2016, 10, 14));

        // Leap day clamps to the end of February.
        assert_eq!(window.display_start(date(2024, 2, 29)), date(2014, 2, 28));
    }

    #[test]
    fn comparison_table_lookups() {
        let table = ComparisonTable {
            indicator_name: "CPI".to_string(),
            columns: vec!["A".to_string(), "B".to_string()],
            rows: vec![
                ComparisonRow {
                    date: date(2024, 1, 1),
                    cells: vec![Some(dec!(1)), None],
                },
                ComparisonRow {
                    date: date(2024, 2, 1),
                    cells: vec![Some(dec!(2)), None],
                },
            ],
        };

        assert_eq!(table.value(date(2024, 2, 1), "A"), Some(dec!(2)));
        assert_eq!(table.value(date(2024, 2, 1), "B"), None);
        assert!(table.has_values("A"));
        assert!(!table.has_values("B"));
        assert!(!table.has_values("C"));
        assert_eq!(table.column("B"), Some(vec![None, None]));
    }
}
