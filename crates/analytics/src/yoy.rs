use chrono::{NaiveDate, Utc};
use core_types::{Cadence, DerivedRow, DerivedSeries, LookbackWindow, ObservedSeries};
use rust_decimal::Decimal;

/// A stateless calculator for year-over-year percentage changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct YoyCalculator {
    window: LookbackWindow,
}

impl YoyCalculator {
    pub fn new(window: LookbackWindow) -> Self {
        Self { window }
    }

    /// Derives the YoY series with the presentation window ending today.
    pub fn derive(
        &self,
        series: &ObservedSeries,
        indicator_name: &str,
        cadence: Cadence,
    ) -> DerivedSeries {
        self.derive_as_of(series, indicator_name, cadence, Utc::now().date_naive())
    }

    /// Computes `(value[t] / value[t - lag] - 1) * 100` for every observation
    /// that has an anchor `lag` positions earlier, then keeps the rows dated on
    /// or after `today - display_years`.
    ///
    /// The lag is positional: with a gap in the series the anchor is the
    /// `lag`-th earlier observation, not the same calendar period a year back.
    /// A series with `lag` or fewer observations yields an empty result.
    pub fn derive_as_of(
        &self,
        series: &ObservedSeries,
        indicator_name: &str,
        cadence: Cadence,
        today: NaiveDate,
    ) -> DerivedSeries {
        let lag = cadence.yoy_lag();
        let observations = series.observations();

        if observations.len() <= lag {
            tracing::debug!(
                indicator_name,
                %cadence,
                observations = observations.len(),
                required = lag + 1,
                "Insufficient history for a year-over-year change."
            );
            return DerivedSeries::empty(indicator_name, cadence);
        }

        let display_start = self.window.display_start(today);
        let rows = observations
            .windows(lag + 1)
            .filter_map(|window| {
                let (anchor, current) = (window[0], window[lag]);
                if current.date < display_start {
                    return None;
                }
                let yoy_pct = pct_change(anchor.value, current.value);
                if yoy_pct.is_none() {
                    tracing::debug!(
                        indicator_name,
                        date = %current.date,
                        "Year-over-year change undefined for a zero anchor."
                    );
                }
                yoy_pct.map(|yoy_pct| DerivedRow {
                    date: current.date,
                    value: current.value,
                    yoy_pct,
                })
            })
            .collect();

        DerivedSeries {
            indicator_name: indicator_name.to_string(),
            cadence,
            rows,
        }
    }
}

/// Percentage change from `anchor` to `current`; `None` when the anchor is zero.
fn pct_change(anchor: Decimal, current: Decimal) -> Option<Decimal> {
    current
        .checked_div(anchor)?
        .checked_sub(Decimal::ONE)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;
    use core_types::Observation;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    /// `values` laid out one period apart, ending at `last`.
    fn series_ending(last: NaiveDate, step_months: u32, values: &[Decimal]) -> ObservedSeries {
        let n = values.len() as u32;
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let back = (n - 1 - i as u32) * step_months;
                Observation::new(last - Months::new(back), *v)
            })
            .collect();
        ObservedSeries::new(observations).unwrap()
    }

    fn step(cadence: Cadence) -> u32 {
        match cadence {
            Cadence::Monthly => 1,
            Cadence::Quarterly => 3,
            Cadence::Annual => 12,
        }
    }

    #[test]
    fn monthly_cpi_scenario() {
        let values: Vec<Decimal> = (0..13).map(|i| Decimal::from(100 + i)).collect();
        let jan_2026 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let series = series_ending(jan_2026, 1, &values);

        let derived =
            YoyCalculator::default().derive_as_of(&series, "CPI", Cadence::Monthly, today());

        assert_eq!(derived.len(), 1);
        assert_eq!(derived.rows[0].date, jan_2026);
        assert_eq!(derived.rows[0].value, dec!(112));
        assert_eq!(derived.rows[0].yoy_pct, dec!(12.0));
    }

    #[test]
    fn constant_series_has_n_minus_lag_zero_rows() {
        let calculator = YoyCalculator::default();
        for cadence in [Cadence::Monthly, Cadence::Quarterly, Cadence::Annual] {
            // Short enough to stay inside the ten-year display window.
            let n = 9 + cadence.yoy_lag();
            let values = vec![dec!(250.5); n];
            let series = series_ending(today(), step(cadence), &values);

            let derived = calculator.derive_as_of(&series, "X", cadence, today());

            assert_eq!(derived.len(), n - cadence.yoy_lag(), "{cadence}");
            assert!(derived.rows.iter().all(|r| r.yoy_pct.is_zero()));
        }
    }

    #[test]
    fn lag_observations_are_not_enough() {
        let calculator = YoyCalculator::default();
        for cadence in [Cadence::Monthly, Cadence::Quarterly, Cadence::Annual] {
            let lag = cadence.yoy_lag();

            let short = series_ending(today(), step(cadence), &vec![dec!(1); lag]);
            assert!(calculator.derive_as_of(&short, "X", cadence, today()).is_empty());

            let just_enough = series_ending(today(), step(cadence), &vec![dec!(1); lag + 1]);
            assert_eq!(
                calculator
                    .derive_as_of(&just_enough, "X", cadence, today())
                    .len(),
                1
            );
        }
    }

    #[test]
    fn quarterly_growth_uses_four_periods() {
        let series = series_ending(
            today(),
            3,
            &[dec!(200), dec!(201), dec!(202), dec!(203), dec!(210)],
        );
        let derived =
            YoyCalculator::default().derive_as_of(&series, "Real GDP", Cadence::Quarterly, today());

        assert_eq!(derived.len(), 1);
        assert_eq!(derived.rows[0].yoy_pct, dec!(5));
    }

    #[test]
    fn rows_before_the_display_window_are_dropped() {
        // 15 years of monthly data ending today.
        let values = vec![dec!(10); 180];
        let series = series_ending(today(), 1, &values);
        let calculator = YoyCalculator::default();

        let derived = calculator.derive_as_of(&series, "CPI", Cadence::Monthly, today());

        let display_start = LookbackWindow::default().display_start(today());
        assert_eq!(derived.rows.first().unwrap().date, display_start);
        // Ten years of months plus the start month itself.
        assert_eq!(derived.len(), 121);
    }

    #[test]
    fn anchor_outside_the_window_still_counts() {
        // The first in-window row draws its anchor from before the window.
        let window = LookbackWindow {
            fetch_years: 2,
            display_years: 1,
        };
        let values: Vec<Decimal> = (0..25).map(|i| Decimal::from(100 + i)).collect();
        let series = series_ending(today(), 1, &values);

        let derived =
            YoyCalculator::new(window).derive_as_of(&series, "CPI", Cadence::Monthly, today());

        assert_eq!(derived.len(), 13);
        assert_eq!(derived.rows[0].value, dec!(112));
        assert_eq!(derived.rows[0].yoy_pct, dec!(12));
    }

    #[test]
    fn lag_is_positional_across_gaps() {
        // Thirteen observations spanning fourteen months: one month is missing.
        let mut observations: Vec<Observation> = (0..14)
            .map(|i| {
                Observation::new(
                    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Months::new(i),
                    Decimal::from(100 + i),
                )
            })
            .collect();
        observations.remove(5);
        let series = ObservedSeries::new(observations).unwrap();

        let derived =
            YoyCalculator::default().derive_as_of(&series, "CPI", Cadence::Monthly, today());

        assert_eq!(derived.len(), 1);
        // Anchor is the first observation, thirteen calendar months back.
        assert_eq!(derived.rows[0].yoy_pct, dec!(13));
    }

    #[test]
    fn zero_anchor_rows_are_dropped() {
        let series = series_ending(today(), 12, &[dec!(0), dec!(5), dec!(6)]);
        let derived = YoyCalculator::default().derive_as_of(&series, "X", Cadence::Annual, today());

        assert_eq!(derived.len(), 1);
        assert_eq!(derived.rows[0].yoy_pct, dec!(20));
    }
}
