//! Loading of the three CSV sources the dashboard reads.
//!
//! Every source is parsed into a [`Table`] of typed rows. A source that
//! cannot be read never fails the caller: the loader hands back an empty
//! table together with the [`LoadError`] so the dependent page section can
//! show a "data unavailable" state.

use std::fmt;
use std::path::PathBuf;

use csv::StringRecord;
use thiserror::Error;

pub mod cache;
pub mod loader;
pub mod records;
pub mod table;

#[cfg(test)]
mod data_tests;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use loader::{load, read_table, DataStore, Loaded};
pub use records::{PreferenceResult, TransactionRecord, TrendResult};
pub use table::{HeaderIndex, Table};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("missing header row in {}", .path.display())]
    MissingHeader { path: PathBuf },
}

/// The three inputs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Transactions,
    TrendResults,
    PreferenceResults,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Transactions, Source::TrendResults, Source::PreferenceResults];

    pub fn name(&self) -> &'static str {
        match self {
            Source::Transactions => "transactions",
            Source::TrendResults => "trend results",
            Source::PreferenceResults => "preference results",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row type that can be built from one CSV record.
///
/// Column positions are resolved once per file from the header row, then
/// every record is converted with them. Conversion is infallible: cells that
/// are absent or malformed end up as `None` on the row.
pub trait FromRow: Sized {
    type Columns;

    fn columns(headers: &HeaderIndex) -> Self::Columns;

    fn from_row(record: &StringRecord, columns: &Self::Columns) -> Self;
}
