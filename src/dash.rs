use log::{debug, info, warn};

use hub_charts::charts::{
    create_item_chart, create_pie_chart, ChartSpec, ItemChartOptions, PieChartOptions,
};
use hub_charts::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dash::config_reader::*;
use crate::dash::location::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
pub mod location;

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Sheet {sheet} not found in workbook {path}"))]
    MissingSheet { path: String, sheet: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Inconsistent table in {path}"))]
    TableShape { source: ChartErrors, path: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the dashboard"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the dashboard to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Location '{key}' not found in the location map."))]
    LocationNotFound { key: String },
    #[snafu(display("Invalid value {value:?} for {name}"))]
    InvalidSelection { name: String, value: String },
    #[snafu(display("Cannot build the chart of panel {panel}"))]
    Chart { source: ChartErrors, panel: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;

const DEFAULT_TARGET: &str = "Rustenburg";
const DEFAULT_NAME: &str = "Mine hub dashboard";

/// The selections of one run, after merging the configuration and the
/// command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Selections {
    pub target: String,
    pub metric_type: String,
    /// Resolved against the survey when not set.
    pub survey_location: Option<String>,
    pub survey_category: Option<String>,
    pub display: ValueDisplay,
}

/// One chart of the dashboard, or the reason why it is not shown.
#[derive(PartialEq, Debug, Clone)]
pub enum Panel {
    Chart { title: String, chart: ChartSpec },
    Missing { title: String, message: String },
}

fn resolve_selections(args: &Args, config: &DashConfig) -> DashResult<Selections> {
    let sel = &config.selections;
    let display = match args.value_display.as_ref().or(config.pie_display.as_ref()) {
        None => ValueDisplay::Percentage,
        Some(s) => match ValueDisplay::parse(s) {
            Some(d) => d,
            None => {
                return InvalidSelectionSnafu {
                    name: "value display",
                    value: s.as_str(),
                }
                .fail()
            }
        },
    };
    Ok(Selections {
        target: args
            .target
            .clone()
            .or_else(|| sel.target.clone())
            .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
        metric_type: args
            .metric_type
            .clone()
            .or_else(|| sel.metric_type.clone())
            .unwrap_or_else(|| METRIC_TYPES[0].to_string()),
        survey_location: args
            .survey_location
            .clone()
            .or_else(|| sel.survey_location.clone()),
        survey_category: args
            .survey_category
            .clone()
            .or_else(|| sel.survey_category.clone()),
        display,
    })
}

/// The data directory: from the command line (relative to the working
/// directory), or from the configuration (relative to the configuration file).
fn resolve_data_files(args: &Args, config: &DashConfig) -> DataFiles {
    let config_dir: String = args
        .config
        .as_ref()
        .and_then(|p| Path::new(p).parent())
        .map(|p| p.display().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    let data_dir = match (&args.data_dir, &config.data_sources.data_directory) {
        (Some(d), _) => d.clone(),
        (None, Some(d)) => io_common::join_path(&config_dir, d),
        (None, None) => config_dir,
    };
    DataFiles {
        data_dir,
        workbook: config
            .data_sources
            .workbook_file
            .clone()
            .unwrap_or_else(|| DEFAULT_WORKBOOK.to_string()),
        survey: config
            .data_sources
            .survey_file
            .clone()
            .unwrap_or_else(|| DEFAULT_SURVEY.to_string()),
    }
}

fn sector_panel(
    files: &DataFiles,
    title: &str,
    location: &str,
    target: &str,
    metric_type: &str,
) -> DashResult<Panel> {
    let table = load_cleaned_data(files, location)?;
    let chart = create_item_chart(
        &table,
        &format!("{} Data", target),
        metric_type,
        &ItemChartOptions::default(),
    )
    .context(ChartSnafu { panel: title })?;
    Ok(match chart {
        Some(chart) => Panel::Chart {
            title: title.to_string(),
            chart,
        },
        None => Panel::Missing {
            title: title.to_string(),
            message: format!("No sector data available for {}", location),
        },
    })
}

/// The hubs and question categories a survey offers for selection.
pub fn survey_options(survey: &Table) -> DashResult<(Vec<String>, Vec<String>)> {
    let hubs = survey
        .distinct_values(HUB_COLUMN)
        .context(ChartSnafu {
            panel: "Survey Analysis",
        })?;
    Ok((hubs, survey_categories(survey)))
}

fn survey_panel(survey: &Table, selections: &Selections) -> DashResult<Panel> {
    let title = "Survey Analysis";
    let (hubs, categories) = survey_options(survey)?;
    let location = match selections.survey_location.clone().or_else(|| hubs.first().cloned()) {
        Some(l) => l,
        None => {
            return Ok(Panel::Missing {
                title: title.to_string(),
                message: "No hub found in the survey".to_string(),
            })
        }
    };
    let category = match selections
        .survey_category
        .clone()
        .or_else(|| categories.first().cloned())
    {
        Some(c) => c,
        None => {
            return Ok(Panel::Missing {
                title: title.to_string(),
                message: "No question category found in the survey".to_string(),
            })
        }
    };
    info!("survey_panel: location {:?} category {:?}", location, category);

    let options = PieChartOptions {
        title: format!("{} Impact in {}", category, location),
        display: selections.display,
    };
    let chart = create_pie_chart(survey, &location, &category, &options)
        .context(ChartSnafu { panel: title })?;
    Ok(match chart {
        Some(chart) => {
            log_shares(&chart);
            Panel::Chart {
                title: title.to_string(),
                chart,
            }
        }
        None => Panel::Missing {
            title: title.to_string(),
            message: format!(
                "No data available for location '{}' with keyword '{}'",
                location, category
            ),
        },
    })
}

fn log_shares(chart: &ChartSpec) {
    let rows: Vec<AggregateRow> = chart
        .series_data()
        .iter()
        .map(|p| AggregateRow {
            label: p[0].as_str().unwrap_or_default().to_string(),
            average: p[1].as_f64().unwrap_or(f64::NAN),
        })
        .collect();
    for (r, share) in rows.iter().zip(shares_of_total(&rows)) {
        info!("{}: average {:.2} ({:.1}%)", r.label, r.average, share);
    }
}

/// Builds all the panels of the dashboard, for one set of selections.
pub fn build_panels(files: &DataFiles, selections: &Selections) -> DashResult<Vec<Panel>> {
    let target = selections.target.as_str();
    let mut panels: Vec<Panel> = Vec::new();
    panels.push(sector_panel(
        files,
        "Sector Analysis",
        target,
        target,
        "Frequency",
    )?);
    panels.push(sector_panel(
        files,
        "AAZ Analysis",
        &aaz_location(target),
        target,
        &selections.metric_type,
    )?);
    let survey = io_csv::read_csv_table(&files.survey_path())?;
    panels.push(survey_panel(&survey, selections)?);
    Ok(panels)
}

fn build_dashboard_js(name: &str, selections: &Selections, panels: &[Panel]) -> JSValue {
    let mut charts: Vec<JSValue> = Vec::new();
    let mut messages: Vec<JSValue> = Vec::new();
    let display = match selections.display {
        ValueDisplay::Percentage => "percentage",
        ValueDisplay::Value => "value",
    };
    for p in panels {
        match p {
            Panel::Chart { title, chart } => charts.push(json!({
                "panel": title,
                "type": chart.kind.as_str(),
                "chart": chart.config
            })),
            Panel::Missing { title, message } => {
                warn!("{}: {}", title, message);
                messages.push(json!({
                    "panel": title,
                    "level": "warning",
                    "text": message
                }))
            }
        }
    }
    json!({
        "dashboard": name,
        "selections": {
            "target": selections.target,
            "metricType": selections.metric_type,
            "surveyLocation": selections.survey_location,
            "surveyCategory": selections.survey_category,
            "pieDisplay": display
        },
        "charts": charts,
        "messages": messages
    })
}

fn write_output(out: Option<&str>, contents: &str) -> DashResult<()> {
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", contents);
            Ok(())
        }
        Some(path) => {
            info!("Writing dashboard to {:?}", path);
            fs::write(path, contents).context(WritingOutputSnafu { path })
        }
    }
}

fn check_reference(reference_path: &str, pretty_js: &str) -> DashResult<()> {
    let reference = read_reference(reference_path)?;
    let pretty_ref = serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu {})?;
    if pretty_ref != pretty_js {
        warn!("Found differences with the reference dashboard");
        print_diff(pretty_ref.as_str(), pretty_js, "\n");
        whatever!("Difference detected between the generated dashboard and the reference")
    }
    info!("The dashboard matches the reference {:?}", reference_path);
    Ok(())
}

fn list_options(files: &DataFiles) -> DashResult<()> {
    let survey = io_csv::read_csv_table(&files.survey_path())?;
    let (hubs, categories) = survey_options(&survey)?;
    let js = json!({
        "targets": TARGETS,
        "metricTypes": METRIC_TYPES,
        "surveyLocations": hubs,
        "surveyCategories": categories
    });
    let pretty = serde_json::to_string_pretty(&js).context(SerializingJsonSnafu {})?;
    println!("{}", pretty);
    Ok(())
}

pub fn run_dashboard(args: &Args) -> DashResult<()> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => DashConfig::default(),
    };
    let files = resolve_data_files(args, &config);
    debug!("run_dashboard: files: {:?}", files);

    if args.list_options {
        return list_options(&files);
    }

    let selections = resolve_selections(args, &config)?;
    info!("run_dashboard: selections: {:?}", selections);

    let panels = build_panels(&files, &selections)?;
    let name = config
        .output_settings
        .dashboard_name
        .clone()
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let js = build_dashboard_js(&name, &selections, &panels);
    let pretty_js = serde_json::to_string_pretty(&js).context(SerializingJsonSnafu {})?;

    let out = args
        .out
        .as_deref()
        .or(config.output_settings.output_file.as_deref());
    write_output(out, &pretty_js)?;

    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dash::io_common::{join_path, write_temp_file};
    use clap::Parser;
    use hub_charts::charts::ChartKind;

    const SURVEY: &str = "Hub,Technology: Cost,Technology: Access,Support: Training,Have: Phone\n\
                          Alpha,1,3,5,1\n\
                          Alpha,2,4,,0\n\
                          Beta,9,9,1,1\n";

    fn selections(location: Option<&str>, category: Option<&str>) -> Selections {
        Selections {
            target: "Rustenburg".to_string(),
            metric_type: "By Frequency".to_string(),
            survey_location: location.map(|s| s.to_string()),
            survey_category: category.map(|s| s.to_string()),
            display: ValueDisplay::Percentage,
        }
    }

    fn survey(test_name: &str) -> Table {
        let (_guard, dir) = write_temp_file(test_name, "survey.csv", SURVEY);
        io_csv::read_csv_table(&join_path(&dir, "survey.csv")).unwrap()
    }

    #[test]
    fn survey_panel_selected() {
        let t = survey("survey_panel_selected");
        let panel = survey_panel(&t, &selections(Some("Alpha"), Some("Technology"))).unwrap();
        match panel {
            Panel::Chart { title, chart } => {
                assert_eq!(title, "Survey Analysis");
                assert_eq!(chart.title(), Some("Technology Impact in Alpha"));
                assert_eq!(
                    chart.series_data(),
                    &[json!(["Cost", 1.5]), json!(["Access", 3.5])]
                );
            }
            x => panic!("unexpected panel {:?}", x),
        }
    }

    #[test]
    fn survey_panel_defaults() {
        let t = survey("survey_panel_defaults");
        let panel = survey_panel(&t, &selections(None, None)).unwrap();
        match panel {
            // First hub, first category in lexical order.
            Panel::Chart { chart, .. } => {
                assert_eq!(chart.title(), Some("Support Impact in Alpha"));
                assert_eq!(chart.series_data(), &[json!(["Training", 5.0])]);
            }
            x => panic!("unexpected panel {:?}", x),
        }
    }

    #[test]
    fn survey_panel_without_data() {
        let t = survey("survey_panel_without_data");
        let panel = survey_panel(&t, &selections(Some("Alpha"), Some("Others"))).unwrap();
        assert!(matches!(panel, Panel::Missing { .. }));
        let js = build_dashboard_js("test", &selections(None, None), &[panel]);
        assert_eq!(js["charts"], json!([]));
        assert_eq!(
            js["messages"][0]["text"],
            json!("No data available for location 'Alpha' with keyword 'Others'")
        );
    }

    #[test]
    fn options_of_survey() {
        let t = survey("options_of_survey");
        let (hubs, categories) = survey_options(&t).unwrap();
        assert_eq!(hubs, vec!["Alpha", "Beta"]);
        assert_eq!(categories, vec!["Support", "Technology"]);
    }

    #[test]
    fn selections_merge() {
        let args = Args::parse_from([
            "hubcharts",
            "--target",
            "Polokwane",
            "--value-display",
            "value",
        ]);
        let mut config = DashConfig::default();
        config.selections.target = Some("Mototolo".to_string());
        config.selections.survey_category = Some("Technology".to_string());
        let s = resolve_selections(&args, &config).unwrap();
        assert_eq!(s.target, "Polokwane");
        assert_eq!(s.metric_type, "By Frequency");
        assert_eq!(s.survey_category, Some("Technology".to_string()));
        assert_eq!(s.display, ValueDisplay::Value);
    }

    #[test]
    fn invalid_value_display() {
        let args = Args::parse_from(["hubcharts", "--value-display", "pixels"]);
        let res = resolve_selections(&args, &DashConfig::default());
        assert!(matches!(res, Err(DashError::InvalidSelection { .. })));
    }

    #[test]
    fn data_dir_relative_to_config() {
        let args = Args::parse_from(["hubcharts", "--config", "conf/dash.json"]);
        let mut config = DashConfig::default();
        config.data_sources.data_directory = Some("data".to_string());
        let files = resolve_data_files(&args, &config);
        assert_eq!(files.data_dir, "conf/data");
        assert_eq!(files.workbook_path(), "conf/data/Cleaned-Refined-Anglodata.xlsx");
        assert_eq!(files.survey_path(), "conf/data/Cleaned-Survey-Data.csv");

        let args = Args::parse_from(["hubcharts", "-d", "elsewhere"]);
        assert_eq!(resolve_data_files(&args, &config).data_dir, "elsewhere");
    }

    #[test]
    fn unknown_target_fails() {
        let (_guard, dir) = write_temp_file("unknown_target_fails", "survey.csv", SURVEY);
        let files = DataFiles {
            data_dir: dir,
            workbook: DEFAULT_WORKBOOK.to_string(),
            survey: "survey.csv".to_string(),
        };
        let mut s = selections(None, None);
        s.target = "Nowhere".to_string();
        let res = build_panels(&files, &s);
        assert!(matches!(res, Err(DashError::LocationNotFound { .. })));
    }

    fn fixture_path(file_name: &str) -> String {
        join_path(concat!(env!("CARGO_MANIFEST_DIR"), "/test_data"), file_name)
    }

    fn fixture_files() -> DataFiles {
        DataFiles {
            data_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/test_data").to_string(),
            workbook: "hubs.xlsx".to_string(),
            survey: "survey.csv".to_string(),
        }
    }

    /// The parts of the charts that depend on the data.
    fn chart_summary(charts: &JSValue) -> JSValue {
        let summary: Vec<JSValue> = charts
            .as_array()
            .unwrap()
            .iter()
            .map(|c| {
                json!({
                    "panel": c["panel"],
                    "type": c["type"],
                    "title": c["chart"]["title"]["text"],
                    "subtitle": c["chart"]["subtitle"]["text"],
                    "data": c["chart"]["series"][0]["data"]
                })
            })
            .collect();
        JSValue::Array(summary)
    }

    #[test]
    fn panels_from_workbook() {
        let mut s = selections(Some("Alpha"), Some("Technology"));
        s.metric_type = "By Number Of Jobs".to_string();
        let panels = build_panels(&fixture_files(), &s).unwrap();
        let titles: Vec<&str> = panels
            .iter()
            .map(|p| match p {
                Panel::Chart { title, .. } | Panel::Missing { title, .. } => title.as_str(),
            })
            .collect();
        assert_eq!(titles, vec!["Sector Analysis", "AAZ Analysis", "Survey Analysis"]);
        match &panels[0] {
            Panel::Chart { chart, .. } => {
                assert_eq!(chart.kind, ChartKind::Item);
                assert_eq!(
                    chart.config["subtitle"]["text"],
                    json!("Rustenburg Data. Source: Provided Dataset")
                );
                assert_eq!(
                    chart.series_data(),
                    &[json!(["Mining", 3, null, "M"]), json!(["Trade", 3, null, "T"])]
                );
            }
            x => panic!("unexpected panel {:?}", x),
        }
        match &panels[1] {
            Panel::Chart { chart, .. } => assert_eq!(
                chart.series_data(),
                &[
                    json!(["Agriculture", 20, null, "A"]),
                    json!(["Mining", 5, null, "M"])
                ]
            ),
            x => panic!("unexpected panel {:?}", x),
        }
    }

    #[test]
    fn aaz_panel_follows_metric_type() {
        let s = selections(None, None);
        let panels = build_panels(&fixture_files(), &s).unwrap();
        match &panels[1] {
            Panel::Chart { chart, .. } => assert_eq!(
                chart.series_data(),
                &[
                    json!(["Agriculture", 4, null, "A"]),
                    json!(["Mining", 1, null, "M"])
                ]
            ),
            x => panic!("unexpected panel {:?}", x),
        }
    }

    #[test]
    fn missing_sheet() {
        let res = load_cleaned_data(&fixture_files(), "Polokwane");
        assert!(matches!(
            res,
            Err(DashError::MissingSheet { ref sheet, .. }) if sheet == "Polokwane"
        ));
        let mut s = selections(None, None);
        s.target = "Polokwane".to_string();
        assert!(matches!(
            build_panels(&fixture_files(), &s),
            Err(DashError::MissingSheet { .. })
        ));
    }

    #[test]
    fn dashboard_from_config() {
        let out_dir = tempfile::tempdir().unwrap();
        let dir = out_dir.path().display().to_string();
        let out = join_path(&dir, "dashboard.json");
        let other = join_path(&dir, "other.json");
        let config = fixture_path("dashboard_config.json");
        let args = Args::parse_from([
            "hubcharts",
            "--config",
            config.as_str(),
            "--out",
            out.as_str(),
        ]);
        run_dashboard(&args).unwrap();

        let js = read_reference(&out).unwrap();
        assert_eq!(js["dashboard"], json!("Fixture hubs"));
        assert_eq!(js["selections"]["metricType"], json!("By Number Of Jobs"));
        assert_eq!(js["messages"], json!([]));
        let expected = read_reference(&fixture_path("dashboard_expected_charts.json")).unwrap();
        assert_eq!(chart_summary(&js["charts"]), expected);

        // The generated dashboard is a valid reference for the same run.
        let args = Args::parse_from([
            "hubcharts",
            "--config",
            config.as_str(),
            "--out",
            out.as_str(),
            "--reference",
            out.as_str(),
        ]);
        assert!(run_dashboard(&args).is_ok());

        let args = Args::parse_from([
            "hubcharts",
            "--config",
            config.as_str(),
            "--metric-type",
            "By Frequency",
            "--out",
            other.as_str(),
            "--reference",
            out.as_str(),
        ]);
        assert!(matches!(
            run_dashboard(&args),
            Err(DashError::Whatever { .. })
        ));
    }

    #[test]
    fn reference_mismatch() {
        let (_guard, dir) =
            write_temp_file("reference_mismatch", "reference.json", r#"{"dashboard": "a"}"#);
        let path = join_path(&dir, "reference.json");
        let same = serde_json::to_string_pretty(&json!({"dashboard": "a"})).unwrap();
        assert!(check_reference(&path, &same).is_ok());
        let other = serde_json::to_string_pretty(&json!({"dashboard": "b"})).unwrap();
        assert!(matches!(
            check_reference(&path, &other),
            Err(DashError::Whatever { .. })
        ));
    }
}
