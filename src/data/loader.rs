use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info};

use super::cache::{Clock, SystemClock, TtlCache};
use super::records::{PreferenceResult, TransactionRecord, TrendResult};
use super::table::{HeaderIndex, Table};
use super::{FromRow, LoadError, Source};
use crate::config::Config;

/// Outcome of loading one source: the table, plus the reason it is empty
/// when the file could not be read.
#[derive(Debug)]
pub struct Loaded<R> {
    table: Table<R>,
    error: Option<LoadError>,
}

impl<R> Loaded<R> {
    pub fn ok(table: Table<R>) -> Loaded<R> {
        Loaded { table, error: None }
    }

    pub fn failed(error: LoadError) -> Loaded<R> {
        Loaded {
            table: Table::empty(),
            error: Some(error),
        }
    }

    pub fn table(&self) -> &Table<R> {
        &self.table
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// Whether dependent sections have anything to render. An empty file is
    /// treated the same as a missing one.
    pub fn is_available(&self) -> bool {
        self.error.is_none() && !self.table.is_empty()
    }
}

/// Parses a CSV file into a table, failing on an unreadable file.
///
/// Records the CSV reader rejects are skipped.
pub fn read_table<R: FromRow>(path: &Path) -> Result<Table<R>, LoadError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = csv_reader.headers().map_err(|err| LoadError::Csv {
        path: path.to_path_buf(),
        source: err,
    })?;
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    let headers = HeaderIndex::new(headers.iter());
    let columns = R::columns(&headers);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        match record {
            Ok(record) => rows.push(R::from_row(&record, &columns)),
            Err(err) => debug!("failed to read record, err={}", err),
        }
    }

    Ok(Table::new(headers, rows))
}

/// Loads a source, degrading to an empty table if the file is unusable.
pub fn load<R: FromRow>(source: Source, path: &Path) -> Loaded<R> {
    match read_table(path) {
        Ok(table) => {
            info!("loaded {}, path={}, rows={}", source, path.display(), table.row_count());
            Loaded::ok(table)
        },
        Err(err) => {
            error!("could not load {}, err={}", source, err);
            Loaded::failed(err)
        },
    }
}

/// Entry point for pages: the three sources behind a time-bounded cache.
pub struct DataStore {
    transactions_path: PathBuf,
    trend_path: PathBuf,
    preference_path: PathBuf,
    transactions: TtlCache<PathBuf, Arc<Loaded<TransactionRecord>>>,
    trend: TtlCache<PathBuf, Arc<Loaded<TrendResult>>>,
    preference: TtlCache<PathBuf, Arc<Loaded<PreferenceResult>>>,
}

impl DataStore {
    pub fn new(config: &Config) -> DataStore {
        DataStore::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> DataStore {
        let ttl = config.cache_ttl;
        DataStore {
            transactions_path: config.path(Source::Transactions).to_path_buf(),
            trend_path: config.path(Source::TrendResults).to_path_buf(),
            preference_path: config.path(Source::PreferenceResults).to_path_buf(),
            transactions: TtlCache::with_clock(ttl, Arc::clone(&clock)),
            trend: TtlCache::with_clock(ttl, Arc::clone(&clock)),
            preference: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn path(&self, source: Source) -> &Path {
        match source {
            Source::Transactions => &self.transactions_path,
            Source::TrendResults => &self.trend_path,
            Source::PreferenceResults => &self.preference_path,
        }
    }

    pub fn transactions(&self) -> Arc<Loaded<TransactionRecord>> {
        let path = self.transactions_path.clone();
        self.transactions
            .get_or_load(path.clone(), || Arc::new(load(Source::Transactions, &path)))
    }

    pub fn trend_results(&self) -> Arc<Loaded<TrendResult>> {
        let path = self.trend_path.clone();
        self.trend
            .get_or_load(path.clone(), || Arc::new(load(Source::TrendResults, &path)))
    }

    pub fn preference_results(&self) -> Arc<Loaded<PreferenceResult>> {
        let path = self.preference_path.clone();
        self.preference
            .get_or_load(path.clone(), || Arc::new(load(Source::PreferenceResults, &path)))
    }

    /// Forgets every cached table so the next access re-reads the files.
    pub fn refresh(&self) {
        for source in Source::ALL {
            self.refresh_source(source);
        }
    }

    /// Forgets the cached table of one source.
    pub fn refresh_source(&self, source: Source) {
        debug!("dropping cached {}", source);
        match source {
            Source::Transactions => self.transactions.clear(),
            Source::TrendResults => self.trend.clear(),
            Source::PreferenceResults => self.preference.clear(),
        }
    }
}
