//! City analysis flow: detailed summary for one selected city.

use std::collections::BTreeMap;

use aq_core::Pollutant;
use aq_data::HistoricalSeries;
use aq_session::{SessionStore, keys};
use chrono::{Datelike, NaiveDate};

/// Everything the city page renders for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySummary {
    pub city: String,
    pub record_count: usize,
    pub mean_aqi: f64,
    /// Lowest observed AQI.
    pub best_aqi: f64,
    /// Highest observed AQI.
    pub worst_aqi: f64,
    /// Chronological AQI series for the trend chart.
    pub aqi_trend: Vec<(NaiveDate, f64)>,
    /// `("YYYY-MM", mean AQI)` buckets in chronological order.
    pub monthly_aqi: Vec<(String, f64)>,
    pub pollutant_means: Vec<(Pollutant, f64)>,
}

/// Remember the city selection across re-evaluations.
pub fn select_city(session: &mut SessionStore, city: &str) {
    session.set(keys::CITY_SELECTED, city);
}

/// Session selection if present and still known, else the first city.
pub fn selected_city(session: &SessionStore, series: &HistoricalSeries) -> Option<String> {
    if let Some(name) = session.text(keys::CITY_SELECTED) {
        if series.cities().iter().any(|c| c == name) {
            return Some(name.to_string());
        }
    }
    series.cities().first().cloned()
}

/// Reset the city page: deletes exactly its owned key.
pub fn reset_city(session: &mut SessionStore) {
    session.delete_many(keys::CITY_OWNED);
}

/// Compute the summary for one city; `None` for an unknown name.
pub fn city_summary(series: &HistoricalSeries, city: &str) -> Option<CitySummary> {
    let rows: Vec<_> = series
        .records()
        .iter()
        .filter(|r| r.city == city)
        .collect();
    if rows.is_empty() {
        return None;
    }

    let mut mean_aqi = 0.0;
    let mut best_aqi = f64::INFINITY;
    let mut worst_aqi = f64::NEG_INFINITY;
    let mut monthly: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    let mut aqi_trend = Vec::with_capacity(rows.len());

    for row in &rows {
        mean_aqi += row.aqi;
        best_aqi = best_aqi.min(row.aqi);
        worst_aqi = worst_aqi.max(row.aqi);
        aqi_trend.push((row.date, row.aqi));

        let bucket = monthly.entry((row.date.year(), row.date.month())).or_insert((0.0, 0));
        bucket.0 += row.aqi;
        bucket.1 += 1;
    }
    mean_aqi /= rows.len() as f64;

    let monthly_aqi = monthly
        .into_iter()
        .map(|((year, month), (sum, count))| {
            (format!("{year:04}-{month:02}"), sum / count as f64)
        })
        .collect();

    let pollutant_means = Pollutant::ALL
        .into_iter()
        .map(|p| {
            let sum: f64 = rows.iter().map(|r| r.pollutant(p)).sum();
            (p, sum / rows.len() as f64)
        })
        .collect();

    Some(CitySummary {
        city: city.to_string(),
        record_count: rows.len(),
        mean_aqi,
        best_aqi,
        worst_aqi,
        aqi_trend,
        monthly_aqi,
        pollutant_means,
    })
}
