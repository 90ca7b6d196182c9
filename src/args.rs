use clap::Parser;

/// Builds the chart configurations of the mine hub dashboard.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the data sources and the selections.
    /// Everything in this file can be overridden by the options below.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory) Where the workbook and the CSV files are. Defaults to the directory
    /// of the configuration file, or to the current directory.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// (default Rustenburg) The hub for the sector charts: Rustenburg, Polokwane,
    /// Amandelbult, Mogalakwena, Twickenham or Mototolo.
    #[clap(short, long, value_parser)]
    pub target: Option<String>,

    /// (default 'By Frequency') The metric of the AAZ sector chart. Anything mentioning
    /// Frequency counts the occurrences, anything else counts the supported jobs.
    #[clap(short, long, value_parser)]
    pub metric_type: Option<String>,

    /// (hub name, optional) The hub of the survey chart. Defaults to the first hub of
    /// the survey.
    #[clap(long, value_parser)]
    pub survey_location: Option<String>,

    /// (category, optional) The question category of the survey chart, for example
    /// Technology. Defaults to the first category of the survey.
    #[clap(long, value_parser)]
    pub survey_category: Option<String>,

    /// (percentage or value) What the survey chart displays for each slice.
    #[clap(long, value_parser)]
    pub value_display: Option<String>,

    /// (file path, 'stdout' or empty) Where the dashboard is written in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference dashboard in JSON format. If provided, hubcharts will
    /// check that the generated dashboard matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, prints the available selections instead of the charts.
    #[clap(long, takes_value = false)]
    pub list_options: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
