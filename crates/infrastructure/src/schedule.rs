//! Bus schedule loader
//!
//! Reads the schedule CSV once at startup. The header row names the columns;
//! the spreadsheet export's `FROM_1`, `TO_2` and `Departure_time` headers are
//! accepted alongside `FROM`, `TO` and `DEPARTURE_TIME`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use domain::entities::{Schedule, Trip};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

/// Errors raised while loading the schedule
#[derive(Debug, Error)]
pub enum ScheduleLoadError {
    /// The file could not be opened
    #[error("Cannot open schedule {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be read or has the wrong shape
    #[error("Malformed schedule row {row}: {message}")]
    Malformed { row: u64, message: String },

    /// The header row lacks a required column
    #[error("Schedule is missing the {0} column")]
    MissingColumn(&'static str),
}

/// One CSV row
#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "FROM", alias = "FROM_1")]
    origin: String,
    #[serde(rename = "TO", alias = "TO_2")]
    destination: String,
    #[serde(rename = "TYPE", default)]
    bus_type: String,
    #[serde(rename = "CORPORATION", default)]
    corporation: String,
    #[serde(rename = "TRIPNAME", default)]
    trip_name: String,
    #[serde(rename = "DEPARTURE_TIME", alias = "Departure_time", default)]
    departure_time: String,
}

impl From<Record> for Trip {
    fn from(r: Record) -> Self {
        Self {
            origin: r.origin,
            destination: r.destination,
            bus_type: r.bus_type,
            corporation: r.corporation,
            trip_name: r.trip_name,
            departure_time: r.departure_time,
        }
    }
}

/// Headers that must be present, each with its accepted spellings
const REQUIRED_COLUMNS: [(&str, &[&str]); 2] =
    [("FROM", &["FROM", "FROM_1"]), ("TO", &["TO", "TO_2"])];

/// Load the schedule from a CSV file
#[instrument]
pub fn load_trips(path: &Path) -> Result<Schedule, ScheduleLoadError> {
    let file = File::open(path).map_err(|source| ScheduleLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let schedule = read_trips(file)?;
    info!(trips = schedule.len(), "Schedule loaded");
    Ok(schedule)
}

/// Read a schedule from any CSV source
pub fn read_trips<R: Read>(reader: R) -> Result<Schedule, ScheduleLoadError> {
    let mut rows = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rows
        .headers()
        .map_err(|e| ScheduleLoadError::Malformed {
            row: 0,
            message: e.to_string(),
        })?
        .clone();
    for (name, spellings) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| spellings.contains(&h)) {
            return Err(ScheduleLoadError::MissingColumn(name));
        }
    }

    let mut trips = Vec::new();
    for rec in rows.deserialize::<Record>() {
        let record = rec.map_err(|e| ScheduleLoadError::Malformed {
            row: e.position().map_or(0, csv::Position::line),
            message: e.to_string(),
        })?;
        trips.push(Trip::from(record));
    }

    Ok(Schedule::new(trips))
}
