//! Session key namespaces and per-page ownership.
//!
//! Each page's reset action deletes exactly its owned key set and
//! nothing else. Deleting one page's keys must be unobservable to every
//! other page.

// Prediction page: the five input overrides plus the stored result.
pub const PREDICT_CO: &str = "predict.co";
pub const PREDICT_OZONE: &str = "predict.ozone";
pub const PREDICT_PM10: &str = "predict.pm10";
pub const PREDICT_PM25: &str = "predict.pm25";
pub const PREDICT_NO2: &str = "predict.no2";
pub const PREDICT_RESULT: &str = "predict.result";
pub const PREDICT_SHOW_RESULT: &str = "predict.show_result";

/// Keys owned by the prediction page's reset action.
pub const PREDICT_OWNED: &[&str] = &[
    PREDICT_CO,
    PREDICT_OZONE,
    PREDICT_PM10,
    PREDICT_PM25,
    PREDICT_NO2,
    PREDICT_RESULT,
    PREDICT_SHOW_RESULT,
];

// History page: the filter controller's state.
pub const HISTORY_FILTERS_APPLIED: &str = "history.filters_applied";
pub const HISTORY_FROM_DATE: &str = "history.from_date";
pub const HISTORY_TO_DATE: &str = "history.to_date";
pub const HISTORY_CITIES: &str = "history.cities";
pub const HISTORY_METRIC: &str = "history.metric";

/// Keys owned by the filter controller's reset action.
pub const HISTORY_OWNED: &[&str] = &[
    HISTORY_FILTERS_APPLIED,
    HISTORY_FROM_DATE,
    HISTORY_TO_DATE,
    HISTORY_CITIES,
    HISTORY_METRIC,
];

// City analysis page.
pub const CITY_SELECTED: &str = "city.selected";

/// Keys owned by the city page's reset action.
pub const CITY_OWNED: &[&str] = &[CITY_SELECTED];
