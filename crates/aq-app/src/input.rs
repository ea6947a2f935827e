//! Input form controller for the five bounded pollutant fields.
//!
//! Two mutually exclusive population strategies: direct per-field edits
//! (clamped at the boundary) and bulk overwrite from a scenario preset.
//! Reading precedence per field: session override if present, else the
//! widget's own last-set value, else the declared default.

use aq_core::{AqResult, Pollutant, PollutantReading};
use aq_data::Scenario;
use aq_session::{SessionStore, keys};

/// The form's widget-side state. One instance per session/frontend.
#[derive(Debug, Clone)]
pub struct InputForm {
    widget: PollutantReading,
}

impl Default for InputForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InputForm {
    pub fn new() -> Self {
        Self {
            widget: PollutantReading::defaults(),
        }
    }

    /// Session key owning a pollutant's input override.
    pub fn session_key(pollutant: Pollutant) -> &'static str {
        match pollutant {
            Pollutant::Co => keys::PREDICT_CO,
            Pollutant::Ozone => keys::PREDICT_OZONE,
            Pollutant::Pm10 => keys::PREDICT_PM10,
            Pollutant::Pm25 => keys::PREDICT_PM25,
            Pollutant::No2 => keys::PREDICT_NO2,
        }
    }

    /// Per-field edit. Non-finite input is rejected; everything else is
    /// clamped into the field's declared range, never passed through.
    pub fn set_field(&mut self, pollutant: Pollutant, value: f64) -> AqResult<f64> {
        let clamped = pollutant.spec().checked(value)?;
        self.widget.set(pollutant, clamped);
        Ok(clamped)
    }

    pub fn widget_value(&self, pollutant: Pollutant) -> f64 {
        self.widget.get(pollutant)
    }

    /// The reading the prediction flow sees, with the documented
    /// precedence applied and every field clamped.
    pub fn resolved(&self, session: &SessionStore) -> PollutantReading {
        let mut reading = self.widget;
        for pollutant in Pollutant::ALL {
            if let Some(value) = session.number(Self::session_key(pollutant)) {
                reading.set(pollutant, value);
            }
        }
        reading.clamped()
    }

    /// Bulk overwrite from a scenario. All five resolved fields are
    /// written before this returns, so any read in the same reaction
    /// sees the complete new set, never a partial one.
    pub fn apply_scenario(session: &mut SessionStore, scenario: &Scenario) {
        let resolved = scenario.resolved();
        for pollutant in Pollutant::ALL {
            session.set(Self::session_key(pollutant), resolved.get(pollutant));
        }
    }

    /// Reset the prediction page: deletes exactly the keys this page
    /// owns and restores the widget defaults.
    pub fn reset(&mut self, session: &mut SessionStore) {
        session.delete_many(keys::PREDICT_OWNED);
        self.widget = PollutantReading::defaults();
    }
}
