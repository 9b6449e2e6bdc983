use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed measurement table {}: {source}", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("measurement table {} has no rows to take a unit from", .path.display())]
    EmptyTable { path: PathBuf },

    #[error("{sizes} tree sizes do not fit a {rows}x{cols} figure grid")]
    GridOverflow {
        sizes: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{variants} variants but only {markers} marker shapes")]
    MarkerOverflow { variants: usize, markers: usize },

    #[error("failed to draw {}: {source}", .path.display())]
    Draw {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, PlotError>;
