//! Cached artifact store.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::model::{self, RegressionModel};
use crate::scenarios::{self, Scenario, builtin_scenarios};
use crate::series::{self, HistoricalSeries};
use crate::stats::{self, PollutantStats};

pub const MODEL_FILE: &str = "air_pollution_model.json";
pub const SERIES_FILE: &str = "aqi_history.csv";
pub const SCENARIOS_FILE: &str = "example_scenarios.json";
pub const STATS_FILE: &str = "pollutant_statistics.json";

/// Locations of the four artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub series: PathBuf,
    pub scenarios: PathBuf,
    pub stats: PathBuf,
}

impl ArtifactPaths {
    /// Conventional file names inside one data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            series: dir.join(SERIES_FILE),
            scenarios: dir.join(SCENARIOS_FILE),
            stats: dir.join(STATS_FILE),
        }
    }
}

/// All external artifacts, loaded once and cached for the life of the
/// process.
///
/// Load failures never escape: the model and series degrade to `None`
/// (each dependent page checks before use), scenarios fall back to the
/// built-in presets, and statistics are simply dropped.
#[derive(Debug)]
pub struct DataStore {
    model: Option<RegressionModel>,
    series: Option<HistoricalSeries>,
    scenarios: Vec<Scenario>,
    stats: Option<PollutantStats>,
}

impl DataStore {
    pub fn load(dir: &Path) -> Self {
        Self::load_with(&ArtifactPaths::in_dir(dir))
    }

    pub fn load_with(paths: &ArtifactPaths) -> Self {
        let model = match model::load_model(&paths.model) {
            Ok(model) => {
                info!(path = %paths.model.display(), "loaded regression model");
                Some(model)
            }
            Err(err) => {
                warn!(path = %paths.model.display(), %err, "model unavailable");
                None
            }
        };

        let series = match series::load_series(&paths.series) {
            Ok(series) => {
                info!(
                    path = %paths.series.display(),
                    records = series.len(),
                    cities = series.cities().len(),
                    "loaded historical series"
                );
                Some(series)
            }
            Err(err) => {
                warn!(path = %paths.series.display(), %err, "historical series unavailable");
                None
            }
        };

        let scenarios = match scenarios::load_scenarios(&paths.scenarios) {
            Ok(scenarios) => scenarios,
            Err(err) => {
                info!(%err, "using built-in scenario presets");
                builtin_scenarios()
            }
        };

        let stats = stats::load_stats(&paths.stats).ok();

        Self {
            model,
            series,
            scenarios,
            stats,
        }
    }

    pub fn model(&self) -> Option<&RegressionModel> {
        self.model.as_ref()
    }

    pub fn series(&self) -> Option<&HistoricalSeries> {
        self.series.as_ref()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn stats(&self) -> Option<&PollutantStats> {
        self.stats.as_ref()
    }
}
