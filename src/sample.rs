use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{PlotError, Result};

/// one row of criterion's `raw.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    pub sample_measured_value: f64,
    pub unit: String,
    pub iteration_count: f64,
}

impl Measurement {
    /// time per iteration, unguarded: a zero count gives inf or NaN
    pub fn normalized(&self) -> f64 {
        self.sample_measured_value / self.iteration_count
    }
}

#[derive(Debug, Clone)]
pub struct MeasurementTable {
    path: PathBuf,
    rows: Vec<Measurement>,
}

impl MeasurementTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(path, file)
    }

    /// parse a table from any reader, `path` is kept for error context only
    pub fn from_reader<P: AsRef<Path>, R: Read>(path: P, reader: R) -> Result<Self> {
        let path = path.as_ref();
        let table_error = |source| PlotError::Table {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<Measurement>, _>>()
            .map_err(table_error)?;

        let table = Self {
            path: path.to_path_buf(),
            rows,
        };

        debug!(
            path = %table.path.display(),
            rows = table.rows.len(),
            benchmark = %table.benchmark_id().unwrap_or_default(),
            "loaded measurement table"
        );

        Ok(table)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// the unit of the first row; the rest of the column is assumed identical
    pub fn unit(&self) -> Option<&str> {
        self.rows.first().map(|row| row.unit.as_str())
    }

    /// `group/function/value` of the first row, as criterion names the bench
    pub fn benchmark_id(&self) -> Option<String> {
        let row = self.rows.first()?;

        let parts: Vec<&str> = [&row.group, &row.function, &row.value]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }

    /// per-iteration time of every row, in row order
    pub fn normalized(&self) -> Vec<f64> {
        let values: Vec<f64> = self.rows.iter().map(Measurement::normalized).collect();

        let non_finite = values.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            warn!(
                path = %self.path.display(),
                non_finite,
                "non-finite per-iteration time, is an iteration_count zero?"
            );
        }

        values
    }
}
