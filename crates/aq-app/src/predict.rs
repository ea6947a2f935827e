//! Prediction flow: resolved reading → model inference → category.

use aq_core::AqiCategory;
use aq_data::DataStore;
use aq_session::{SessionStore, keys};

use crate::error::{AppError, AppResult};
use crate::input::InputForm;

/// One categorized prediction. Created per request; the integer value
/// is persisted in the session so it survives re-evaluations until the
/// page is reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiPrediction {
    pub aqi: i64,
    pub category: AqiCategory,
}

impl AqiPrediction {
    fn from_aqi(aqi: i64) -> Self {
        Self {
            aqi,
            category: AqiCategory::from_aqi(aqi),
        }
    }
}

/// Run one prediction over the form's resolved reading.
///
/// Fails fast when the model artifact is absent — inference is never
/// attempted. An inference failure is reported without touching the
/// stored prediction; the session is only written on success.
pub fn run_prediction(
    store: &DataStore,
    session: &mut SessionStore,
    form: &InputForm,
) -> AppResult<AqiPrediction> {
    let model = store.model().ok_or(AppError::ModelUnavailable)?;

    let reading = form.resolved(session);
    let features = reading.feature_vector();
    let output = model.predict(&features)?;

    // Truncate, not round: 100.9 is still Moderate.
    let prediction = AqiPrediction::from_aqi(output.trunc() as i64);

    session.set(keys::PREDICT_RESULT, prediction.aqi);
    session.set(keys::PREDICT_SHOW_RESULT, true);
    Ok(prediction)
}

/// The prediction persisted by an earlier re-evaluation, if any.
pub fn stored_prediction(session: &SessionStore) -> Option<AqiPrediction> {
    if !session.flag(keys::PREDICT_SHOW_RESULT) {
        return None;
    }
    session.integer(keys::PREDICT_RESULT).map(AqiPrediction::from_aqi)
}
