use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span, trace, warn};

use metric_ingest::{DocumentStore, TabularStore, load_document, load_series, validate};
use metric_model::{
    ChartControls, ChartData, ChartType, MAX_LAST_N, OTHER_CHOICE, Observation, PRESET_METRICS,
    ShapedFrame, find_preset,
};
use metric_transform::{ChartSet, frame_to_csv, frame_to_dataframe, shape_charts};

use crate::cli::{ChartArg, ControlArgs, ExportArgs, StoreArgs, SurveyArgs, VisualsArgs};
use crate::logging::redact_value;
use crate::render::{chart, raw_table, status_table};
use crate::session::SessionStore;

const STATIC_DESCRIPTION: &str = "Values as they appear in the JSON document.";
const TREND_DESCRIPTION: &str =
    "Logged metrics per entry. Each category starts at entry 1 after the window.";
const WEIGHTED_DESCRIPTION: &str =
    "Document values multiplied by their weights; normalized values are percentage shares.";

/// Survey input resolved to what the validator expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyChoice {
    pub category: String,
    pub is_custom_name: bool,
}

pub fn run_presets() {
    let mut table = Table::new();
    table.set_header(vec!["Preset metric"]);
    for preset in PRESET_METRICS {
        table.add_row(vec![*preset]);
    }
    table.add_row(vec![format!("{OTHER_CHOICE} (use --custom NAME)")]);
    println!("{table}");
}

/// Map the positional metric and `--custom` onto a category.
///
/// `--custom` wins when the metric is absent or `Other`. Preset names match
/// case-insensitively; anything else is refused here, before validation.
pub fn resolve_choice(metric: Option<&str>, custom: Option<&str>) -> Result<SurveyChoice> {
    match (metric.map(str::trim), custom) {
        (None, Some(custom)) => Ok(custom_choice(custom)),
        (Some(metric), custom) if metric.eq_ignore_ascii_case(OTHER_CHOICE) => {
            Ok(custom_choice(custom.unwrap_or_default()))
        }
        (Some(metric), None) => match find_preset(metric) {
            Some(preset) => Ok(SurveyChoice {
                category: preset.to_string(),
                is_custom_name: false,
            }),
            None => bail!("unknown preset '{metric}' (run `metrics presets`, or use --custom)"),
        },
        (Some(metric), Some(_)) => {
            bail!("--custom requires the metric to be '{OTHER_CHOICE}' or omitted, got '{metric}'")
        }
        (None, None) => bail!("choose a preset metric or pass --custom NAME"),
    }
}

fn custom_choice(name: &str) -> SurveyChoice {
    SurveyChoice {
        category: name.to_string(),
        is_custom_name: true,
    }
}

/// Validate and append one observation.
///
/// Returns `Ok(None)` when the validator refused the submission; the reason
/// has already been printed.
pub fn run_survey(stores: &StoreArgs, args: &SurveyArgs) -> Result<Option<Observation>> {
    let choice = resolve_choice(args.metric.as_deref(), args.custom.as_deref())?;
    let observation = match validate(&choice.category, choice.is_custom_name, args.value) {
        Ok(observation) => observation,
        Err(error) => {
            warn!(%error, "submission rejected");
            eprintln!("error: {error}");
            return Ok(None);
        }
    };

    let store = TabularStore::new(&stores.csv);
    store
        .ensure_store()
        .with_context(|| format!("prepare store {}", stores.csv.display()))?;
    store
        .append(&observation)
        .with_context(|| format!("append to {}", stores.csv.display()))?;
    trace!(
        category = redact_value(&observation.category),
        "appended observation"
    );
    info!(path = %stores.csv.display(), "recorded survey entry");
    println!(
        "You entered: Category: {}, Value: {:.2}",
        observation.category, observation.value
    );
    Ok(Some(observation))
}

pub fn run_data(stores: &StoreArgs) -> Result<()> {
    let store = TabularStore::new(&stores.csv);
    let raw = store
        .read_all()
        .with_context(|| format!("read {}", stores.csv.display()))?;
    if raw.is_empty() {
        println!("warning: no data in {} yet", stores.csv.display());
        return Ok(());
    }
    println!("{}", raw_table(&raw));
    Ok(())
}

/// Fold the control flags into the stored controls.
pub fn apply_controls(mut controls: ChartControls, args: &ControlArgs) -> ChartControls {
    if args.reset {
        controls = ChartControls::default();
    }
    if args.all_categories {
        controls.selected_categories.clear();
    } else if !args.categories.is_empty() {
        controls = controls.with_categories(args.categories.iter().map(String::as_str));
    }
    if let Some(chart) = args.chart {
        controls = controls.with_chart_type(chart.into());
    }
    if let Some(last_n) = args.last_n {
        controls = controls.with_last_n(usize::from(last_n).min(MAX_LAST_N));
    }
    if args.cumulative {
        controls.cumulative = true;
    } else if args.no_cumulative {
        controls.cumulative = false;
    }
    for (label, weight) in &args.weights {
        controls.set_weight(label.as_str(), *weight);
    }
    if args.normalize {
        controls.normalize = true;
    } else if args.no_normalize {
        controls.normalize = false;
    }
    controls.sanitized()
}

pub fn run_visuals(stores: &StoreArgs, args: &VisualsArgs) -> Result<()> {
    let span = info_span!("visuals");
    let _guard = span.enter();

    let session = SessionStore::new(&stores.session);
    if args.controls.reset {
        session.reset()?;
    }
    let (stored, session_warning) = session.load();
    let mut controls = apply_controls(stored, &args.controls);

    let series = load_series(&TabularStore::new(&stores.csv));
    let document = load_document(&DocumentStore::new(&stores.json));
    println!("{}", status_table(series.data.len(), document.data.points.len()));
    let warnings = session_warning
        .iter()
        .chain(&series.warnings)
        .chain(&document.warnings);
    for message in warnings {
        println!("warning: {message}");
    }
    let dropped = series.dropped + document.dropped;
    if dropped > 0 {
        println!("note: {dropped} row(s) without a usable name or number were skipped");
    }

    controls.seed_weights(document.data.labels());
    let categories = series.data.categories();
    if !categories.is_empty() {
        println!("Categories: {}", categories.join(", "));
    }

    let charts = shape_charts(&series.data, &document.data, controls.clone());
    print_charts(&charts, &document.data.title, controls.chart_type);

    if args.show_data
        && let Some(frame) = charts.trend.frame()
    {
        let df = frame_to_dataframe(frame).context("build trend table")?;
        println!("{df}");
    }

    session.save(&controls)?;
    Ok(())
}

fn print_charts(charts: &ChartSet, title: &str, chart_type: ChartType) {
    print_chart(title, STATIC_DESCRIPTION, &charts.static_chart, ChartType::Bar);
    print_chart("Trends", TREND_DESCRIPTION, &charts.trend, chart_type);
    print_chart(
        "Weighted factors",
        WEIGHTED_DESCRIPTION,
        &charts.weighted,
        ChartType::Bar,
    );
}

fn print_chart(title: &str, description: &str, data: &ChartData, chart_type: ChartType) {
    println!();
    println!("{title}");
    println!("{description}");
    match data {
        ChartData::Frame(frame) => println!("{}", chart(frame, chart_type)),
        ChartData::NoData(reason) => println!("({reason})"),
    }
}

/// Shape one chart from the stores and the saved session.
pub fn shaped_frame(stores: &StoreArgs, which: ChartArg) -> Result<ShapedFrame> {
    let (mut controls, _) = SessionStore::new(&stores.session).load();
    let series = load_series(&TabularStore::new(&stores.csv));
    let document = load_document(&DocumentStore::new(&stores.json));
    controls.seed_weights(document.data.labels());
    let charts = shape_charts(&series.data, &document.data, controls);
    let data = match which {
        ChartArg::Static => charts.static_chart,
        ChartArg::Trend => charts.trend,
        ChartArg::Weighted => charts.weighted,
    };
    match data {
        ChartData::Frame(frame) => Ok(frame),
        ChartData::NoData(reason) => bail!("nothing to export: {reason}"),
    }
}

pub fn run_export(stores: &StoreArgs, args: &ExportArgs) -> Result<()> {
    let frame = shaped_frame(stores, args.chart)?;
    let csv = frame_to_csv(&frame).context("encode chart as CSV")?;
    match &args.out {
        Some(path) => {
            fs::write(path, &csv).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), rows = frame.height(), "exported chart");
        }
        None => io::stdout()
            .write_all(csv.as_bytes())
            .context("write chart to stdout")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ChartTypeArg;

    #[test]
    fn presets_match_case_insensitively() {
        let choice = resolve_choice(Some("sleep (HOURS)"), None).unwrap();
        assert_eq!(choice.category, "Sleep (hours)");
        assert!(!choice.is_custom_name);
    }

    #[test]
    fn other_uses_the_custom_name() {
        let choice = resolve_choice(Some("other"), Some("  Naps ")).unwrap();
        assert_eq!(choice.category, "  Naps ");
        assert!(choice.is_custom_name);

        let choice = resolve_choice(None, Some("Naps")).unwrap();
        assert!(choice.is_custom_name);
    }

    #[test]
    fn other_without_custom_reaches_the_validator_empty() {
        let choice = resolve_choice(Some("Other"), None).unwrap();
        assert_eq!(choice.category, "");
        assert!(validate(&choice.category, choice.is_custom_name, 1.0).is_err());
    }

    #[test]
    fn unknown_presets_are_refused() {
        assert!(resolve_choice(Some("Naps"), None).is_err());
        assert!(resolve_choice(Some("Steps (count)"), Some("Naps")).is_err());
    }

    #[test]
    fn control_flags_update_the_session() {
        let args = ControlArgs {
            categories: vec!["Steps (count)".to_string()],
            chart: Some(ChartTypeArg::Bar),
            last_n: Some(5),
            cumulative: true,
            weights: vec![("Sleep".to_string(), 2.04)],
            normalize: true,
            ..ControlArgs::default()
        };
        let controls = apply_controls(ChartControls::default(), &args);
        assert!(controls.selected_categories.contains("Steps (count)"));
        assert_eq!(controls.chart_type, ChartType::Bar);
        assert_eq!(controls.last_n, 5);
        assert!(controls.cumulative);
        assert!(controls.normalize);
        assert!((controls.weight("Sleep") - 2.0).abs() < 1e-9);
    }

    #[test]
    fn reset_and_negative_flags_clear_state() {
        let stored = ChartControls::default()
            .with_categories(["A"])
            .with_cumulative(true)
            .with_normalize(true);
        let args = ControlArgs {
            no_cumulative: true,
            all_categories: true,
            ..ControlArgs::default()
        };
        let controls = apply_controls(stored.clone(), &args);
        assert!(controls.selected_categories.is_empty());
        assert!(!controls.cumulative);
        assert!(controls.normalize);

        let reset = ControlArgs {
            reset: true,
            ..ControlArgs::default()
        };
        assert_eq!(apply_controls(stored, &reset), ChartControls::default());
    }
}
