//! Auxiliary pollutant statistics artifact.
//!
//! Loaded but never required: absence is silently tolerated and the
//! guidance it feeds simply disappears.

use aq_core::Pollutant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::{ArtifactError, ArtifactResult};

/// Summary statistics for one pollutant over the training data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-pollutant statistics keyed by artifact column name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollutantStats {
    by_key: BTreeMap<String, StatSummary>,
}

impl PollutantStats {
    pub fn get(&self, pollutant: Pollutant) -> Option<StatSummary> {
        self.by_key.get(pollutant.key()).copied()
    }
}

pub fn load_stats(path: &Path) -> ArtifactResult<PollutantStats> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_artifact_keys() {
        let json = r#"{"PM25": {"mean": 32.1, "min": 2.0, "max": 310.0}}"#;
        let stats: PollutantStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.get(Pollutant::Pm25).unwrap().mean, 32.1);
        assert!(stats.get(Pollutant::Co).is_none());
    }
}
