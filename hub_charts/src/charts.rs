//! Chart configurations, in the object shape of the Highcharts library.

use log::{debug, info, warn};
use serde_json::json;
use serde_json::Value as JSValue;

use crate::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ChartKind {
    Pie,
    Item,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Item => "item",
        }
    }
}

/// A chart ready to be handed over to the renderer.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub config: JSValue,
}

impl ChartSpec {
    pub fn title(&self) -> Option<&str> {
        self.config["title"]["text"].as_str()
    }

    /// The data points of the first series.
    pub fn series_data(&self) -> &[JSValue] {
        self.config["series"][0]["data"]
            .as_array()
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct PieChartOptions {
    pub title: String,
    pub display: ValueDisplay,
}

impl Default for PieChartOptions {
    fn default() -> Self {
        PieChartOptions {
            title: "Impact Analysis".to_string(),
            display: ValueDisplay::Percentage,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ItemChartOptions {
    pub title: String,
    /// Defaults to a mention of the location and the source.
    pub subtitle: Option<String>,
}

impl Default for ItemChartOptions {
    fn default() -> Self {
        ItemChartOptions {
            title: "Main Sector Frequency Distribution".to_string(),
            subtitle: None,
        }
    }
}

/// Builds a semi-circular donut of the average scores of one question category
/// at one hub.
///
/// Arguments:
/// * `table` the survey table, with a `Hub` column
/// * `location` the hub to restrict the rows to
/// * `keyword` the prefix of the question columns
///
/// Returns `None` if there is nothing to plot for this hub and keyword.
pub fn create_pie_chart(
    table: &Table,
    location: &str,
    keyword: &str,
    options: &PieChartOptions,
) -> Result<Option<ChartSpec>, ChartErrors> {
    let loc_table = table.filter_eq(HUB_COLUMN, location)?;
    debug!(
        "create_pie_chart: {} rows for location {:?}",
        loc_table.num_rows(),
        location
    );
    let rows = get_filtered_avg(&loc_table, keyword);
    if rows.is_empty() {
        warn!(
            "No data available for location '{}' with keyword '{}'",
            location, keyword
        );
        return Ok(None);
    }

    let data: Vec<JSValue> = rows
        .iter()
        .map(|r| json!([strip_label_prefix(&r.label), r.average]))
        .collect();
    info!(
        "create_pie_chart: {:?}: {} slices",
        options.title,
        data.len()
    );

    let (point_format, label_format) = match options.display {
        ValueDisplay::Percentage => (
            "{series.name}: <b>{point.percentage:.1f}%</b>",
            "{point.percentage:.1f}%",
        ),
        ValueDisplay::Value => ("{series.name}: <b>{point.y:.2f}</b>", "{point.y:.2f}"),
    };

    let mut config = json!({
        "chart": {
            "plotBackgroundColor": null,
            "height": 650,
            "plotBorderWidth": 0,
            "plotShadow": false,
            "type": "pie"
        },
        "title": {
            "text": options.title,
            "align": "center",
            "verticalAlign": "top",
            "y": 15,
            "style": {
                "fontSize": "1.5em",
                "fontWeight": "bold"
            }
        },
        "tooltip": {
            "pointFormat": point_format
        },
        "plotOptions": {
            "pie": {
                "allowPointSelect": true,
                "cursor": "pointer",
                "dataLabels": {
                    "enabled": true,
                    "distance": -50,
                    "format": label_format,
                    "style": {
                        "fontWeight": "bold",
                        "color": "white"
                    }
                },
                "showInLegend": true,
                "startAngle": -90,
                "endAngle": 90,
                "center": ["50%", "65%"],
                "size": "110%"
            }
        },
        "series": [{
            "type": "pie",
            "name": "Average Score",
            "innerSize": "65%",
            "data": data
        }],
        "legend": {
            "labelFormat": "{name}",
            "align": "center",
            "verticalAlign": "middle",
            "y": 200
        }
    });
    if options.display == ValueDisplay::Percentage {
        config["accessibility"] = json!({ "point": { "valueSuffix": "%" } });
    }

    Ok(Some(ChartSpec {
        kind: ChartKind::Pie,
        config,
    }))
}

/// Builds a semi-circular pictogram of the sectors of a hub, one point per
/// main sector.
///
/// The `selector` picks the metric: see `ItemMetric::from_selector`.
///
/// Returns `None` if the table has no sector to show.
pub fn create_item_chart(
    table: &Table,
    location: &str,
    selector: &str,
    options: &ItemChartOptions,
) -> Result<Option<ChartSpec>, ChartErrors> {
    let metric = ItemMetric::from_selector(selector);
    debug!(
        "create_item_chart: selector {:?} -> metric {:?}",
        selector, metric
    );
    let summaries = group_by_sum(table, MAIN_SECTOR_COLUMN, metric.column_name())?;
    if summaries.is_empty() {
        warn!(
            "No sector data available for '{}' ({})",
            location,
            metric.column_name()
        );
        return Ok(None);
    }

    let data: Vec<JSValue> = summaries
        .iter()
        .map(|s| json!([s.category, number_value(s.total), null, s.shorthand]))
        .collect();
    let subtitle = match &options.subtitle {
        Some(s) if !s.is_empty() => s.clone(),
        _ => format!("{}. Source: Provided Dataset", location),
    };
    info!(
        "create_item_chart: {:?} / {:?}: {} sectors",
        options.title,
        subtitle,
        data.len()
    );

    let config = json!({
        "chart": {
            "type": "item",
            "height": 620
        },
        "title": {
            "text": options.title
        },
        "subtitle": {
            "text": subtitle
        },
        "legend": {
            "labelFormat": "{name} <span style=\"opacity: 0.6\">{y}</span>",
            "x": 30,
            "layout": "horizontal",
            "horizontalAlign": "middle",
            "width": 650,
            "itemStyle": {
                "width": 300
            }
        },
        "series": [{
            "name": "Frequency",
            "keys": ["name", "y", "color", "label"],
            "data": data,
            "dataLabels": {
                "enabled": true,
                "format": "{point.label}",
                "style": {
                    "textOutline": "3px contrast"
                }
            },
            "center": ["50%", "80%"],
            "size": "125%",
            "startAngle": -100,
            "endAngle": 100
        }],
        "responsive": {
            "rules": [{
                "condition": {
                    "maxWidth": 600
                },
                "chartOptions": {
                    "series": [{
                        "dataLabels": {
                            "distance": -40
                        }
                    }]
                }
            }]
        }
    });

    Ok(Some(ChartSpec {
        kind: ChartKind::Item,
        config,
    }))
}

/// Whole totals are written as integers, the way a sum of counts reads.
fn number_value(x: f64) -> JSValue {
    if x.fract() == 0.0 && x.abs() < 9.0e15 {
        json!(x as i64)
    } else {
        json!(x)
    }
}
