//! Scenario presets: named partial readings used to prefill the form.

use aq_core::{PollutantReading, Pollutant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::{ArtifactError, ArtifactResult};

/// Preset names removed unconditionally after load.
const RETIRED_SCENARIOS: [&str; 2] = ["Typical Hyderabad Day", "Typical Bangalore Day"];

/// Partial reading as stored in the artifact; absent fields resolve to
/// the declared field defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioValues {
    #[serde(rename = "CO", default, skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(rename = "Ozone", default, skip_serializing_if = "Option::is_none")]
    pub ozone: Option<f64>,
    #[serde(rename = "PM10", default, skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
    #[serde(rename = "PM25", default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    #[serde(rename = "NO2", default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
}

/// A named preset, immutable for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub values: ScenarioValues,
}

impl Scenario {
    /// Resolve to a complete reading: preset value where present, field
    /// default otherwise, every field clamped to its declared range.
    pub fn resolved(&self) -> PollutantReading {
        let mut reading = PollutantReading::defaults();
        let ScenarioValues {
            co,
            ozone,
            pm10,
            pm25,
            no2,
        } = self.values;
        for (pollutant, value) in [
            (Pollutant::Co, co),
            (Pollutant::Ozone, ozone),
            (Pollutant::Pm10, pm10),
            (Pollutant::Pm25, pm25),
            (Pollutant::No2, no2),
        ] {
            if let Some(value) = value {
                reading.set(pollutant, value);
            }
        }
        reading.clamped()
    }
}

/// The three built-in presets substituted when the artifact is absent.
pub fn builtin_scenarios() -> Vec<Scenario> {
    let preset = |name: &str, co, ozone, pm10, pm25, no2| Scenario {
        name: name.to_string(),
        values: ScenarioValues {
            co: Some(co),
            ozone: Some(ozone),
            pm10: Some(pm10),
            pm25: Some(pm25),
            no2: Some(no2),
        },
    };
    vec![
        preset("Clean Air Day", 2.0, 25.0, 15.0, 10.0, 15.0),
        preset("Moderate Pollution", 5.0, 50.0, 35.0, 25.0, 30.0),
        preset("High Pollution", 10.0, 80.0, 60.0, 50.0, 60.0),
    ]
}

/// Load the scenario artifact, dropping the retired preset names.
pub fn load_scenarios(path: &Path) -> ArtifactResult<Vec<Scenario>> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let raw: BTreeMap<String, ScenarioValues> = serde_json::from_str(&content)?;

    Ok(raw
        .into_iter()
        .filter(|(name, _)| !RETIRED_SCENARIOS.contains(&name.as_str()))
        .map(|(name, values)| Scenario { name, values })
        .collect())
}
