//! Historical view flow: filtered rows plus derived aggregates.

use std::collections::BTreeMap;

use aq_data::{HistoricalRecord, HistoricalSeries};
use aq_session::SessionStore;

use crate::filters::{self, FilterSelection};

/// Mean/min/max of the selected metric for one city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregates over the whole filtered set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityMetricRow {
    pub city: String,
    pub summary: MetricSummary,
}

/// The three UI states of the historical page. `NotApplied` renders a
/// prompt and `Empty` renders a no-results notice; they must never be
/// conflated.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoricalView {
    NotApplied,
    Empty,
    Ready {
        rows: Vec<HistoricalRecord>,
        per_city: Vec<CityMetricRow>,
        overall: OverallSummary,
    },
}

/// Recompute the view from the current session state.
pub fn compute_view(series: &HistoricalSeries, session: &SessionStore) -> HistoricalView {
    match filters::applied_filters(session) {
        Some(filter) => compute_view_with(series, &filter),
        None => HistoricalView::NotApplied,
    }
}

/// Recompute the view for an explicit filter selection.
///
/// Dates are inclusive on both ends. An empty city selection retains
/// all cities; a non-empty selection restricts to exactly those names,
/// so an unknown city yields zero rows.
pub fn compute_view_with(series: &HistoricalSeries, filter: &FilterSelection) -> HistoricalView {
    let rows: Vec<HistoricalRecord> = series
        .records()
        .iter()
        .filter(|r| r.date >= filter.from && r.date <= filter.to)
        .filter(|r| filter.cities.is_empty() || filter.cities.iter().any(|c| *c == r.city))
        .cloned()
        .collect();

    if rows.is_empty() {
        return HistoricalView::Empty;
    }

    let mut by_city: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in &rows {
        by_city
            .entry(row.city.as_str())
            .or_default()
            .push(filter.metric.value_of(row));
    }

    let per_city = by_city
        .into_iter()
        .map(|(city, values)| CityMetricRow {
            city: city.to_string(),
            summary: summarize(&values),
        })
        .collect();

    let mut values: Vec<f64> = rows.iter().map(|r| filter.metric.value_of(r)).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    let MetricSummary { mean, min, max } = summarize(&values);
    let overall = OverallSummary {
        mean,
        median: median_of_sorted(&values),
        min,
        max,
    };

    HistoricalView::Ready {
        rows,
        per_city,
        overall,
    }
}

fn summarize(values: &[f64]) -> MetricSummary {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    MetricSummary {
        mean: sum / values.len() as f64,
        min,
        max,
    }
}

/// Midpoint for odd counts, mean of the middle two for even counts.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_handles_even_and_odd_counts() {
        assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median_of_sorted(&[7.0]), 7.0);
    }

    #[test]
    fn summarize_basic() {
        let s = summarize(&[2.0, 8.0, 5.0]);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 8.0);
    }
}
