//! aq-data: external artifact loading and caching.
//!
//! Four artifacts live in a data directory: the trained regression
//! model, the historical AQI series, the scenario presets, and the
//! auxiliary pollutant statistics. Loaders return explicit results;
//! `DataStore` turns load failures into `absent` sentinels so that no
//! artifact error ever propagates past this crate's boundary.

pub mod model;
pub mod scenarios;
pub mod series;
pub mod stats;
pub mod store;

pub use model::{ModelError, RegressionModel};
pub use scenarios::{Scenario, ScenarioValues, builtin_scenarios, load_scenarios};
pub use series::{HistoricalRecord, HistoricalSeries, load_series};
pub use stats::{PollutantStats, StatSummary, load_stats};
pub use store::{ArtifactPaths, DataStore};

use std::path::PathBuf;

pub type ArtifactResult<T> = Result<T, ArtifactError>;

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact not found: {path}")]
    Missing { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{value}' at row {row}")]
    InvalidDate { value: String, row: usize },

    #[error("Series has no records: {path}")]
    EmptySeries { path: PathBuf },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
