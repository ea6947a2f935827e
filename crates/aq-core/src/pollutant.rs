//! The five pollutant inputs and their bounded field contracts.

use crate::error::{AqError, AqResult};

/// Number of model input features.
pub const FEATURE_COUNT: usize = 5;

/// The five pollutant inputs.
///
/// `FEATURE_ORDER` fixes the position of each pollutant in the model
/// input vector; that order is part of the external model contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pollutant {
    Co,
    Ozone,
    Pm10,
    Pm25,
    No2,
}

/// Canonical feature order: [CO, Ozone, PM10, PM2.5, NO2].
pub const FEATURE_ORDER: [Pollutant; FEATURE_COUNT] = [
    Pollutant::Co,
    Pollutant::Ozone,
    Pollutant::Pm10,
    Pollutant::Pm25,
    Pollutant::No2,
];

impl Pollutant {
    pub const ALL: [Pollutant; FEATURE_COUNT] = FEATURE_ORDER;

    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Co => "CO",
            Pollutant::Ozone => "Ozone",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
            Pollutant::No2 => "NO2",
        }
    }

    /// Column/key name used by the external artifacts (CSV header,
    /// scenario and statistics JSON). Differs from `label` for PM2.5.
    pub fn key(&self) -> &'static str {
        match self {
            Pollutant::Co => "CO",
            Pollutant::Ozone => "Ozone",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM25",
            Pollutant::No2 => "NO2",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            Pollutant::Co => "ppm",
            Pollutant::Ozone => "ppb",
            Pollutant::Pm10 => "µg/m³",
            Pollutant::Pm25 => "µg/m³",
            Pollutant::No2 => "ppb",
        }
    }

    /// Bounded input contract for this pollutant.
    pub fn spec(&self) -> FieldSpec {
        match self {
            Pollutant::Co => FieldSpec::new(0.0, 100.0, 5.0, 0.1),
            Pollutant::Ozone => FieldSpec::new(0.0, 300.0, 30.0, 0.5),
            Pollutant::Pm10 => FieldSpec::new(0.0, 500.0, 15.0, 1.0),
            Pollutant::Pm25 => FieldSpec::new(0.0, 500.0, 25.0, 1.0),
            Pollutant::No2 => FieldSpec::new(0.0, 200.0, 20.0, 0.5),
        }
    }
}

/// `(value, min, max, default, step)` contract for one input field.
///
/// Each field is clamped independently; there are no cross-field
/// invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl FieldSpec {
    pub const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            min,
            max,
            default,
            step,
        }
    }

    /// Clamp a finite value into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Reject non-finite input, clamp everything else.
    pub fn checked(&self, value: f64) -> AqResult<f64> {
        if !value.is_finite() {
            return Err(AqError::NonFinite {
                what: "pollutant value",
                value,
            });
        }
        Ok(self.clamp(value))
    }
}

/// One resolved set of the five pollutant concentrations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollutantReading {
    pub co: f64,
    pub ozone: f64,
    pub pm10: f64,
    pub pm25: f64,
    pub no2: f64,
}

impl PollutantReading {
    /// Reading populated with every field's declared default.
    pub fn defaults() -> Self {
        let mut reading = Self {
            co: 0.0,
            ozone: 0.0,
            pm10: 0.0,
            pm25: 0.0,
            no2: 0.0,
        };
        for p in Pollutant::ALL {
            reading.set(p, p.spec().default);
        }
        reading
    }

    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Co => self.co,
            Pollutant::Ozone => self.ozone,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Pm25 => self.pm25,
            Pollutant::No2 => self.no2,
        }
    }

    pub fn set(&mut self, pollutant: Pollutant, value: f64) {
        match pollutant {
            Pollutant::Co => self.co = value,
            Pollutant::Ozone => self.ozone = value,
            Pollutant::Pm10 => self.pm10 = value,
            Pollutant::Pm25 => self.pm25 = value,
            Pollutant::No2 => self.no2 = value,
        }
    }

    /// Copy with every field clamped to its declared range.
    pub fn clamped(mut self) -> Self {
        for p in Pollutant::ALL {
            self.set(p, p.spec().clamp(self.get(p)));
        }
        self
    }

    /// Model input vector in canonical feature order.
    pub fn feature_vector(&self) -> [f64; FEATURE_COUNT] {
        let mut features = [0.0; FEATURE_COUNT];
        for (slot, p) in features.iter_mut().zip(FEATURE_ORDER) {
            *slot = self.get(p);
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_at_boundaries() {
        let spec = Pollutant::Co.spec();
        assert_eq!(spec.clamp(-1.0), 0.0);
        assert_eq!(spec.clamp(0.0), 0.0);
        assert_eq!(spec.clamp(100.0), 100.0);
        assert_eq!(spec.clamp(100.1), 100.0);
        assert_eq!(spec.clamp(42.5), 42.5);
    }

    #[test]
    fn checked_rejects_non_finite() {
        let spec = Pollutant::No2.spec();
        assert!(spec.checked(f64::NAN).is_err());
        assert!(spec.checked(f64::INFINITY).is_err());
        assert_eq!(spec.checked(500.0).unwrap(), 200.0);
    }

    #[test]
    fn feature_vector_order_is_fixed() {
        let reading = PollutantReading {
            co: 1.0,
            ozone: 2.0,
            pm10: 3.0,
            pm25: 4.0,
            no2: 5.0,
        };
        assert_eq!(reading.feature_vector(), [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn defaults_match_specs() {
        let reading = PollutantReading::defaults();
        for p in Pollutant::ALL {
            assert_eq!(reading.get(p), p.spec().default);
        }
    }

    proptest! {
        #[test]
        fn clamped_never_leaves_range(
            co in -1e6f64..1e6,
            ozone in -1e6f64..1e6,
            pm10 in -1e6f64..1e6,
            pm25 in -1e6f64..1e6,
            no2 in -1e6f64..1e6,
        ) {
            let reading = PollutantReading { co, ozone, pm10, pm25, no2 }.clamped();
            for (value, p) in reading.feature_vector().into_iter().zip(FEATURE_ORDER) {
                let spec = p.spec();
                prop_assert!(value >= spec.min && value <= spec.max);
            }
        }
    }
}
