use std::{io, path::PathBuf};

use statlab_stats::StatsError;

/// Errors raised while producing or analyzing a dataset.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DataError {
    #[display("failed to open {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed CSV: {_0}")]
    #[from]
    Csv(csv::Error),
    #[display("the dataset must contain the column '{column}'")]
    MissingColumn { column: String },
    #[display("invalid value {value:?} in column '{column}' at data row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
    #[display("the dataset contains no data rows")]
    EmptyDataset,
    #[display("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
    #[display("no patient with heart disease in either sex group")]
    NoCases,
    #[display("{_0}")]
    #[from]
    Stats(StatsError),
}

impl DataError {
    pub(crate) fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}
