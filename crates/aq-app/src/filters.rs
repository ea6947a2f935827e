//! Filter controller for the historical view.
//!
//! Apply validates and then writes the controller's four values plus
//! the applied flag; Reset deletes exactly the five keys this
//! controller owns. Re-applying identical values is observably a
//! no-op.

use aq_core::Pollutant;
use aq_data::{HistoricalRecord, HistoricalSeries};
use aq_session::{SessionStore, keys};
use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Which column of the series gets charted and summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Pollutant(Pollutant),
    Aqi,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Pollutant(Pollutant::Co),
        Metric::Pollutant(Pollutant::Ozone),
        Metric::Pollutant(Pollutant::Pm10),
        Metric::Pollutant(Pollutant::Pm25),
        Metric::Pollutant(Pollutant::No2),
        Metric::Aqi,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Pollutant(p) => p.label(),
            Metric::Aqi => "Overall AQI",
        }
    }

    /// Stable name stored in the session and accepted by the CLI.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Pollutant(p) => p.key(),
            Metric::Aqi => "AQI",
        }
    }

    pub fn parse(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.key() == name)
    }

    pub fn value_of(&self, record: &HistoricalRecord) -> f64 {
        match self {
            Metric::Pollutant(p) => record.pollutant(*p),
            Metric::Aqi => record.aqi,
        }
    }
}

/// One complete filter choice.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Empty means no city restriction (deliberate default-inclusive
    /// policy).
    pub cities: Vec<String>,
    pub metric: Metric,
}

/// Apply a filter selection.
///
/// Both dates are clamped into the series' observed range first. An
/// inverted range is rejected before any session key is written: the
/// pre-state equals the post-state on failure.
pub fn apply_filters(
    series: &HistoricalSeries,
    session: &mut SessionStore,
    selection: &FilterSelection,
) -> AppResult<()> {
    let (min_date, max_date) = series.date_range();
    let from = selection.from.clamp(min_date, max_date);
    let to = selection.to.clamp(min_date, max_date);

    if from > to {
        return Err(AppError::InvalidFilterRange { from, to });
    }

    session.set(keys::HISTORY_FROM_DATE, from);
    session.set(keys::HISTORY_TO_DATE, to);
    session.set(keys::HISTORY_CITIES, selection.cities.clone());
    session.set(keys::HISTORY_METRIC, selection.metric.key());
    session.set(keys::HISTORY_FILTERS_APPLIED, true);
    Ok(())
}

/// Reset the filter controller: deletes exactly its five owned keys.
pub fn reset_filters(session: &mut SessionStore) {
    session.delete_many(keys::HISTORY_OWNED);
}

/// The applied selection reconstructed from the session, or `None`
/// when filters have not been applied.
pub fn applied_filters(session: &SessionStore) -> Option<FilterSelection> {
    if !session.flag(keys::HISTORY_FILTERS_APPLIED) {
        return None;
    }
    let from = session.date(keys::HISTORY_FROM_DATE)?;
    let to = session.date(keys::HISTORY_TO_DATE)?;
    let cities = session
        .cities(keys::HISTORY_CITIES)
        .map(|c| c.to_vec())
        .unwrap_or_default();
    let metric = session
        .text(keys::HISTORY_METRIC)
        .and_then(Metric::parse)
        .unwrap_or(Metric::Aqi);
    Some(FilterSelection {
        from,
        to,
        cities,
        metric,
    })
}
