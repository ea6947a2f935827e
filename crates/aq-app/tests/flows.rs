//! Integration tests for the controller/flow layer.

use aq_app::*;
use aq_core::Pollutant;
use aq_data::{DataStore, HistoricalRecord, HistoricalSeries, store};
use aq_session::{SessionStore, keys};
use chrono::NaiveDate;
use std::path::PathBuf;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn record(day: &str, city: &str, aqi: f64) -> HistoricalRecord {
    HistoricalRecord {
        date: date(day),
        city: city.to_string(),
        co: 3.0,
        ozone: 40.0,
        pm10: 80.0,
        pm25: 45.0,
        no2: 30.0,
        aqi,
    }
}

fn sample_series() -> HistoricalSeries {
    HistoricalSeries::from_records(vec![
        record("2024-01-01", "Delhi", 220.0),
        record("2024-01-01", "Bangalore", 64.0),
        record("2024-01-02", "Delhi", 205.0),
        record("2024-01-02", "Hyderabad", 110.0),
        record("2024-01-03", "Bangalore", 58.0),
        record("2024-01-04", "Delhi", 231.0),
    ])
    .unwrap()
}

fn selection(from: &str, to: &str, cities: &[&str]) -> FilterSelection {
    FilterSelection {
        from: date(from),
        to: date(to),
        cities: cities.iter().map(|c| c.to_string()).collect(),
        metric: Metric::Aqi,
    }
}

fn data_dir(name: &str, model_json: Option<&str>) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("aq_app_test_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    if let Some(json) = model_json {
        std::fs::write(dir.join(store::MODEL_FILE), json).unwrap();
    }
    dir
}

const LINEAR_MODEL: &str = r#"{
    "kind": "linear",
    "intercept": 5.0,
    "coefficients": [3.0, 0.5, 0.4, 1.2, 0.8]
}"#;

// Structurally valid forest whose single tree never reaches a leaf, so
// inference itself fails.
const BROKEN_MODEL: &str = r#"{
    "kind": "forest",
    "n_features": 5,
    "trees": [{"nodes": [
        {"feature": 0, "threshold": 1.0, "left": 0, "right": 0}
    ]}]
}"#;

#[test]
fn scenario_apply_equals_manual_entry() {
    let dir = data_dir("scenario_eq", Some(LINEAR_MODEL));
    let store = DataStore::load(&dir);

    // Manual entry of the Clean Air Day values.
    let mut manual_session = SessionStore::new();
    let mut manual_form = InputForm::new();
    manual_form.set_field(Pollutant::Co, 2.0).unwrap();
    manual_form.set_field(Pollutant::Ozone, 25.0).unwrap();
    manual_form.set_field(Pollutant::Pm10, 15.0).unwrap();
    manual_form.set_field(Pollutant::Pm25, 10.0).unwrap();
    manual_form.set_field(Pollutant::No2, 15.0).unwrap();
    let manual = run_prediction(&store, &mut manual_session, &manual_form).unwrap();

    // Scenario application of the same preset.
    let mut scenario_session = SessionStore::new();
    let scenario_form = InputForm::new();
    let clean = store.scenario("Clean Air Day").unwrap().clone();
    InputForm::apply_scenario(&mut scenario_session, &clean);
    let via_scenario = run_prediction(&store, &mut scenario_session, &scenario_form).unwrap();

    assert_eq!(manual, via_scenario);
}

#[test]
fn prediction_truncates_model_output() {
    // Zero coefficients: output is exactly the intercept.
    let dir = data_dir(
        "truncate",
        Some(
            r#"{"kind": "linear", "intercept": 100.9,
                "coefficients": [0.0, 0.0, 0.0, 0.0, 0.0]}"#,
        ),
    );
    let store = DataStore::load(&dir);
    let mut session = SessionStore::new();
    let prediction = run_prediction(&store, &mut session, &InputForm::new()).unwrap();

    assert_eq!(prediction.aqi, 100);
    assert_eq!(prediction.category, aq_core::AqiCategory::Moderate);
    assert_eq!(session.integer(keys::PREDICT_RESULT), Some(100));
    assert!(session.flag(keys::PREDICT_SHOW_RESULT));
}

#[test]
fn missing_model_fails_fast_without_session_writes() {
    let dir = data_dir("no_model", None);
    let store = DataStore::load(&dir);
    let mut session = SessionStore::new();

    let err = run_prediction(&store, &mut session, &InputForm::new()).unwrap_err();
    assert!(matches!(err, AppError::ModelUnavailable));
    assert!(session.is_empty());
}

#[test]
fn failed_inference_leaves_stored_prediction_unchanged() {
    let dir = data_dir("broken_model", Some(BROKEN_MODEL));
    let store = DataStore::load(&dir);

    let mut session = SessionStore::new();
    session.set(keys::PREDICT_RESULT, 42i64);
    session.set(keys::PREDICT_SHOW_RESULT, true);

    let err = run_prediction(&store, &mut session, &InputForm::new()).unwrap_err();
    assert!(matches!(err, AppError::Inference(_)));
    assert_eq!(stored_prediction(&session).unwrap().aqi, 42);
}

#[test]
fn filter_apply_is_idempotent() {
    let series = sample_series();
    let mut session = SessionStore::new();
    let sel = selection("2024-01-01", "2024-01-02", &["Delhi"]);

    apply_filters(&series, &mut session, &sel).unwrap();
    let first = compute_view(&series, &session);

    apply_filters(&series, &mut session, &sel).unwrap();
    let second = compute_view(&series, &session);

    assert_eq!(first, second);
    match first {
        HistoricalView::Ready { rows, .. } => assert_eq!(rows.len(), 2),
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[test]
fn empty_city_selection_means_no_restriction() {
    let series = sample_series();

    let all_cities = compute_view_with(&series, &selection("2024-01-01", "2024-01-04", &[]));
    let by_date_only: Vec<_> = series
        .records()
        .iter()
        .filter(|r| r.date >= date("2024-01-01") && r.date <= date("2024-01-04"))
        .cloned()
        .collect();

    match all_cities {
        HistoricalView::Ready { rows, .. } => assert_eq!(rows, by_date_only),
        other => panic!("expected Ready, got {other:?}"),
    }

    // One unknown city restricts to nothing at all.
    let unknown = compute_view_with(&series, &selection("2024-01-01", "2024-01-04", &["Pune"]));
    assert_eq!(unknown, HistoricalView::Empty);
}

#[test]
fn reset_only_touches_the_owning_controller() {
    let series = sample_series();
    let mut session = SessionStore::new();

    session.set(keys::PREDICT_RESULT, 180i64);
    session.set(keys::PREDICT_SHOW_RESULT, true);
    select_city(&mut session, "Delhi");
    apply_filters(
        &series,
        &mut session,
        &selection("2024-01-01", "2024-01-03", &["Delhi"]),
    )
    .unwrap();

    reset_filters(&mut session);

    for key in keys::HISTORY_OWNED {
        assert!(!session.contains(key), "history key {key} survived reset");
    }
    assert_eq!(session.integer(keys::PREDICT_RESULT), Some(180));
    assert!(session.flag(keys::PREDICT_SHOW_RESULT));
    assert_eq!(session.text(keys::CITY_SELECTED), Some("Delhi"));
}

#[test]
fn inverted_range_is_rejected_before_any_write() {
    let series = sample_series();
    let mut session = SessionStore::new();

    // Fresh store: rejection leaves it empty.
    let bad = selection("2024-01-03", "2024-01-01", &[]);
    let err = apply_filters(&series, &mut session, &bad).unwrap_err();
    assert!(matches!(err, AppError::InvalidFilterRange { .. }));
    assert!(session.is_empty());

    // Previously applied filters survive a rejected re-apply untouched.
    let good = selection("2024-01-01", "2024-01-02", &["Bangalore"]);
    apply_filters(&series, &mut session, &good).unwrap();
    let before = applied_filters(&session).unwrap();
    let _ = apply_filters(&series, &mut session, &bad).unwrap_err();
    assert_eq!(applied_filters(&session).unwrap(), before);
}

#[test]
fn empty_result_is_distinct_from_not_applied() {
    let series = sample_series();
    let session = SessionStore::new();
    assert_eq!(compute_view(&series, &session), HistoricalView::NotApplied);

    let mut session = SessionStore::new();
    apply_filters(
        &series,
        &mut session,
        &selection("2024-01-01", "2024-01-04", &["Pune"]),
    )
    .unwrap();
    assert_eq!(compute_view(&series, &session), HistoricalView::Empty);
}

#[test]
fn out_of_range_dates_are_clamped_to_observed_range() {
    let series = sample_series();
    let mut session = SessionStore::new();
    apply_filters(
        &series,
        &mut session,
        &selection("2020-01-01", "2030-01-01", &[]),
    )
    .unwrap();

    let applied = applied_filters(&session).unwrap();
    assert_eq!((applied.from, applied.to), series.date_range());
    match compute_view(&series, &session) {
        HistoricalView::Ready { rows, .. } => assert_eq!(rows.len(), series.len()),
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[test]
fn history_aggregates_per_city_and_overall() {
    let series = sample_series();
    let view = compute_view_with(&series, &selection("2024-01-01", "2024-01-04", &[]));

    let HistoricalView::Ready {
        per_city, overall, ..
    } = view
    else {
        panic!("expected Ready");
    };

    // Cities come back in sorted order.
    let names: Vec<&str> = per_city.iter().map(|c| c.city.as_str()).collect();
    assert_eq!(names, ["Bangalore", "Delhi", "Hyderabad"]);

    let delhi = &per_city[1].summary;
    assert!((delhi.mean - (220.0 + 205.0 + 231.0) / 3.0).abs() < 1e-9);
    assert_eq!(delhi.min, 205.0);
    assert_eq!(delhi.max, 231.0);

    assert_eq!(overall.min, 58.0);
    assert_eq!(overall.max, 231.0);
    // Six values: median is the mean of the middle two (110, 205).
    assert_eq!(overall.median, 157.5);
}

#[test]
fn city_summary_aggregates_one_city() {
    let series = sample_series();
    let summary = city_summary(&series, "Delhi").unwrap();

    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.best_aqi, 205.0);
    assert_eq!(summary.worst_aqi, 231.0);
    assert_eq!(summary.monthly_aqi.len(), 1);
    assert_eq!(summary.monthly_aqi[0].0, "2024-01");
    assert_eq!(summary.aqi_trend.first().unwrap().0, date("2024-01-01"));

    assert!(city_summary(&series, "Pune").is_none());
}

#[test]
fn selected_city_falls_back_to_first_known() {
    let series = sample_series();
    let mut session = SessionStore::new();

    assert_eq!(selected_city(&session, &series).as_deref(), Some("Bangalore"));

    select_city(&mut session, "Hyderabad");
    assert_eq!(selected_city(&session, &series).as_deref(), Some("Hyderabad"));

    // A stale selection for a city no longer in the data falls back.
    select_city(&mut session, "Atlantis");
    assert_eq!(selected_city(&session, &series).as_deref(), Some("Bangalore"));

    reset_city(&mut session);
    assert!(!session.contains(keys::CITY_SELECTED));
}
