// The fixed mapping between the locations and the data files.

use snafu::OptionExt;

use crate::dash::{
    io_common::join_path,
    io_csv::read_csv_table,
    io_excel::read_sheet,
    *,
};

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DataSource {
    /// A sheet of the shared workbook.
    Sheet(&'static str),
    /// A standalone CSV file.
    Csv(&'static str),
}

pub const LOCATIONS: [(&str, DataSource); 13] = [
    ("Rustenburg", DataSource::Sheet("Rusty")),
    ("Rustenburg-AAZ", DataSource::Sheet("Rusty-AAZ")),
    ("Polokwane", DataSource::Sheet("Polokwane")),
    ("Polokwane-AAZ", DataSource::Sheet("Polokwane-AAZ")),
    ("Amandelbult", DataSource::Sheet("Amanda")),
    ("Amandelbult-AAZ", DataSource::Sheet("Amanda-AAZ")),
    ("Mogalakwena", DataSource::Sheet("Mogala")),
    ("Mogalakwena-AAZ", DataSource::Sheet("Mogala-AAZ")),
    ("Twickenham", DataSource::Sheet("Twik")),
    ("Twickenham-AAZ", DataSource::Sheet("Twik-AAZ")),
    ("Mototolo", DataSource::Sheet("Mototolo")),
    ("Mototolo-AAZ", DataSource::Sheet("Moto-AAZ")),
    ("Interview-Data", DataSource::Csv("Cleaned-Interview-Data.csv")),
];

/// The hubs offered as targets of the sector charts.
pub const TARGETS: [&str; 6] = [
    "Rustenburg",
    "Polokwane",
    "Amandelbult",
    "Mogalakwena",
    "Twickenham",
    "Mototolo",
];

pub const METRIC_TYPES: [&str; 2] = ["By Frequency", "By Number Of Jobs"];

pub const DEFAULT_WORKBOOK: &str = "Cleaned-Refined-Anglodata.xlsx";
pub const DEFAULT_SURVEY: &str = "Cleaned-Survey-Data.csv";

pub fn lookup_location(location: &str) -> DashResult<DataSource> {
    LOCATIONS
        .iter()
        .find(|(k, _)| *k == location)
        .map(|(_, src)| *src)
        .context(LocationNotFoundSnafu { key: location })
}

/// The location of the alternate dataset of a hub.
pub fn aaz_location(location: &str) -> String {
    format!("{}-AAZ", location)
}

/// Where the data files are found.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DataFiles {
    pub data_dir: String,
    pub workbook: String,
    pub survey: String,
}

impl DataFiles {
    pub fn workbook_path(&self) -> String {
        join_path(&self.data_dir, &self.workbook)
    }

    pub fn survey_path(&self) -> String {
        join_path(&self.data_dir, &self.survey)
    }
}

/// Loads the table of a location, as stored.
pub fn load_cleaned_data(files: &DataFiles, location: &str) -> DashResult<Table> {
    let source = lookup_location(location)?;
    info!("Loading {:?} from {:?}", location, source);
    match source {
        DataSource::Sheet(sheet) => read_sheet(&files.workbook_path(), sheet),
        DataSource::Csv(file) => read_csv_table(&join_path(&files.data_dir, file)),
    }
}
