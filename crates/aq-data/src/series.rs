//! The historical AQI time series artifact.
//!
//! A row-oriented CSV with one record per city per day:
//! `Date,City,CO,Ozone,PM10,PM25,NO2,AQI`. The loaded series is owned
//! by the `DataStore`; downstream flows only ever read filtered copies.

use aq_core::Pollutant;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

use crate::{ArtifactError, ArtifactResult};

/// Date format of the series' `Date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the historical series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    pub city: String,
    pub co: f64,
    pub ozone: f64,
    pub pm10: f64,
    pub pm25: f64,
    pub no2: f64,
    pub aqi: f64,
}

impl HistoricalRecord {
    pub fn pollutant(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Co => self.co,
            Pollutant::Ozone => self.ozone,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Pm25 => self.pm25,
            Pollutant::No2 => self.no2,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "CO")]
    co: f64,
    #[serde(rename = "Ozone")]
    ozone: f64,
    #[serde(rename = "PM10")]
    pm10: f64,
    #[serde(rename = "PM25")]
    pm25: f64,
    #[serde(rename = "NO2")]
    no2: f64,
    #[serde(rename = "AQI")]
    aqi: f64,
}

/// The full ordered series plus its derived lookup data.
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    records: Vec<HistoricalRecord>,
    date_range: (NaiveDate, NaiveDate),
    cities: Vec<String>,
}

impl HistoricalSeries {
    /// Build a series from records; records are sorted by date, and the
    /// observed date range and sorted distinct city list are derived
    /// once here.
    pub fn from_records(mut records: Vec<HistoricalRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        records.sort_by(|a, b| a.date.cmp(&b.date));

        let min_date = records.first().map(|r| r.date)?;
        let max_date = records.last().map(|r| r.date)?;

        let mut cities: Vec<String> = records.iter().map(|r| r.city.clone()).collect();
        cities.sort();
        cities.dedup();

        Some(Self {
            records,
            date_range: (min_date, max_date),
            cities,
        })
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    /// Observed `(min, max)` dates.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        self.date_range
    }

    /// Sorted distinct city names.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the series artifact.
pub fn load_series(path: &Path) -> ArtifactResult<HistoricalSeries> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut records = Vec::new();
    for (row, raw) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = raw?;
        let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT).map_err(|_| {
            ArtifactError::InvalidDate {
                value: raw.date.clone(),
                // +2: header line plus 1-based numbering.
                row: row + 2,
            }
        })?;
        records.push(HistoricalRecord {
            date,
            city: raw.city,
            co: raw.co,
            ozone: raw.ozone,
            pm10: raw.pm10,
            pm25: raw.pm25,
            no2: raw.no2,
            aqi: raw.aqi,
        });
    }

    HistoricalSeries::from_records(records).ok_or_else(|| ArtifactError::EmptySeries {
        path: path.to_path_buf(),
    })
}
