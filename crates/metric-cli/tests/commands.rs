//! End-to-end command runs against temporary stores.

use std::fs;

use tempfile::TempDir;

use metric_cli::cli::{ChartArg, ExportArgs, StoreArgs, SurveyArgs, VisualsArgs};
use metric_cli::commands::{run_export, run_survey, run_visuals, shaped_frame};
use metric_cli::session::SessionStore;
use metric_model::{FrameIndex, Observation};

fn stores(dir: &TempDir) -> StoreArgs {
    StoreArgs {
        csv: dir.path().join("data.csv"),
        json: dir.path().join("data.json"),
        session: dir.path().join("session.json"),
    }
}

fn survey(
    stores: &StoreArgs,
    metric: Option<&str>,
    custom: Option<&str>,
    value: f64,
) -> Option<Observation> {
    let args = SurveyArgs {
        metric: metric.map(ToString::to_string),
        custom: custom.map(ToString::to_string),
        value,
    };
    run_survey(stores, &args).unwrap()
}

#[test]
fn survey_appends_accepted_entries() {
    let dir = TempDir::new().unwrap();
    let stores = stores(&dir);
    let accepted = survey(&stores, Some("steps (count)"), None, 8000.0).unwrap();
    assert_eq!(accepted, Observation::new("Steps (count)", 8000.0));
    survey(&stores, Some("Other"), Some("  Naps "), 1.0).unwrap();

    let text = fs::read_to_string(&stores.csv).unwrap();
    assert_eq!(text, "Category,Value\nSteps (count),8000\nNaps,1\n");
}

#[test]
fn rejected_custom_name_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let stores = stores(&dir);
    assert!(survey(&stores, Some("Other"), Some("   "), 3.0).is_none());
    assert!(!stores.csv.exists());
}

#[test]
fn rejection_is_reported_before_the_store_is_prepared() {
    let dir = TempDir::new().unwrap();
    let mut stores = stores(&dir);
    stores.csv = dir.path().join("missing").join("data.csv");
    assert!(survey(&stores, Some("Other"), None, 3.0).is_none());

    let args = SurveyArgs {
        metric: Some("Water (oz)".to_string()),
        custom: None,
        value: 3.0,
    };
    assert!(run_survey(&stores, &args).is_err());
}

#[test]
fn unknown_preset_is_an_error() {
    let dir = TempDir::new().unwrap();
    let stores = stores(&dir);
    let args = SurveyArgs {
        metric: Some("Naps".to_string()),
        custom: None,
        value: 1.0,
    };
    assert!(run_survey(&stores, &args).is_err());
}

#[test]
fn visuals_run_saves_the_session_and_seeds_weights() {
    let dir = TempDir::new().unwrap();
    let stores = stores(&dir);
    fs::write(
        &stores.json,
        r#"{"chart_title": "Factors", "data_points": [{"label": "Sleep", "value": 7}]}"#,
    )
    .unwrap();
    survey(&stores, Some("Sleep (hours)"), None, 7.5).unwrap();

    let mut args = VisualsArgs::default();
    args.controls.last_n = Some(3);
    run_visuals(&stores, &args).unwrap();

    let (controls, warning) = SessionStore::new(&stores.session).load();
    assert!(warning.is_none());
    assert_eq!(controls.last_n, 3);
    assert!((controls.weight("Sleep") - 1.0).abs() < 1e-9);
    assert!(controls.weights.contains_key("Sleep"));
}

#[test]
fn visuals_tolerate_missing_sources() {
    let dir = TempDir::new().unwrap();
    run_visuals(&stores(&dir), &VisualsArgs::default()).unwrap();
}

#[test]
fn export_writes_the_trend_frame() {
    let dir = TempDir::new().unwrap();
    let stores = stores(&dir);
    for value in [1.0, 2.0, 3.0] {
        survey(&stores, Some("Water (oz)"), None, value).unwrap();
    }
    let out = dir.path().join("trend.csv");
    let args = ExportArgs {
        chart: ChartArg::Trend,
        out: Some(out.clone()),
    };
    run_export(&stores, &args).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Entry #,Water (oz)\n1,1\n2,2\n3,3\n"
    );
}

#[test]
fn export_uses_the_saved_window() {
    let dir = TempDir::new().unwrap();
    let stores = stores(&dir);
    for value in [1.0, 2.0, 3.0, 4.0] {
        survey(&stores, Some("Water (oz)"), None, value).unwrap();
    }
    let mut args = VisualsArgs::default();
    args.controls.last_n = Some(2);
    run_visuals(&stores, &args).unwrap();

    let frame = shaped_frame(&stores, ChartArg::Trend).unwrap();
    assert_eq!(frame.index, FrameIndex::Entry(vec![1, 2]));
    assert_eq!(frame.value(0, "Water (oz)"), Some(3.0));
}

#[test]
fn export_of_empty_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(shaped_frame(&stores(&dir), ChartArg::Static).is_err());
}
