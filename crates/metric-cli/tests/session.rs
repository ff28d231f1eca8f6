//! Session persistence across invocations.

use std::fs;

use tempfile::TempDir;

use metric_cli::session::SessionStore;
use metric_model::{ChartControls, ChartType, MAX_LAST_N};

#[test]
fn missing_session_yields_defaults_without_warning() {
    let dir = TempDir::new().unwrap();
    let (controls, warning) = SessionStore::new(dir.path().join("session.json")).load();
    assert_eq!(controls, ChartControls::default());
    assert!(warning.is_none());
}

#[test]
fn saved_controls_load_back() {
    let dir = TempDir::new().unwrap();
    let session = SessionStore::new(dir.path().join("session.json"));
    let controls = ChartControls::default()
        .with_categories(["Steps (count)"])
        .with_chart_type(ChartType::Bar)
        .with_last_n(7)
        .with_weight("Sleep", 1.5);
    session.save(&controls).unwrap();

    let (loaded, warning) = session.load();
    assert_eq!(loaded, controls);
    assert!(warning.is_none());
}

#[test]
fn malformed_session_falls_back_with_warning() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "{ not json").unwrap();
    let (controls, warning) = SessionStore::new(&path).load();
    assert_eq!(controls, ChartControls::default());
    assert!(warning.unwrap().starts_with("ignoring malformed session"));
}

#[test]
fn out_of_range_session_values_are_bounded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, r#"{"last_n": 5000, "weights": {"Sleep": 9.0}}"#).unwrap();
    let (controls, _) = SessionStore::new(&path).load();
    assert_eq!(controls.last_n, MAX_LAST_N);
    assert!((controls.weight("Sleep") - 3.0).abs() < 1e-9);
}

#[test]
fn reset_removes_the_file_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let session = SessionStore::new(dir.path().join("session.json"));
    session.save(&ChartControls::default()).unwrap();
    session.reset().unwrap();
    assert!(!session.path().exists());
    session.reset().unwrap();
}
