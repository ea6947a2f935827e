//! Shared application service layer for airqual.
//!
//! This crate provides a unified interface for both CLI and GUI
//! frontends, centralizing the dashboard's interaction model: the
//! bounded input form, the filter controller, the prediction flow, and
//! the derived historical and per-city views. Each user action triggers
//! a full re-evaluation — frontends re-read the session store and
//! recompute every derived view from scratch.

pub mod cities;
pub mod error;
pub mod filters;
pub mod history;
pub mod input;
pub mod predict;

// Re-export key types for convenience
pub use cities::{CitySummary, city_summary, reset_city, select_city, selected_city};
pub use error::{AppError, AppResult};
pub use filters::{FilterSelection, Metric, applied_filters, apply_filters, reset_filters};
pub use history::{
    CityMetricRow, HistoricalView, MetricSummary, OverallSummary, compute_view, compute_view_with,
};
pub use input::InputForm;
pub use predict::{AqiPrediction, run_prediction, stored_prediction};
