use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;

use crate::data::Source;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TRANSACTIONS_FILE: &str = "Transaksi-Penjualan-2025.csv";
pub const DEFAULT_TREND_FILE: &str = "trend_analysis_results.csv";
pub const DEFAULT_PREFERENCE_FILE: &str = "preference_analysis_results.csv";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Where the CSV sources live and how long loaded tables stay cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub transactions: PathBuf,
    pub trend_results: PathBuf,
    pub preference_results: PathBuf,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl Config {
    pub fn with_data_dir<P: AsRef<Path>>(dir: P) -> Config {
        let dir = dir.as_ref();
        Config {
            transactions: dir.join(DEFAULT_TRANSACTIONS_FILE),
            trend_results: dir.join(DEFAULT_TREND_FILE),
            preference_results: dir.join(DEFAULT_PREFERENCE_FILE),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Reads `KOPI_DATA_DIR`, the per-file `KOPI_TRANSACTIONS`,
    /// `KOPI_TREND_RESULTS`, `KOPI_PREFERENCE_RESULTS` overrides and
    /// `KOPI_CACHE_TTL_SECS`.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let dir = lookup("KOPI_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let mut config = Config::with_data_dir(dir);

        if let Some(path) = lookup("KOPI_TRANSACTIONS") {
            config.transactions = PathBuf::from(path);
        }
        if let Some(path) = lookup("KOPI_TREND_RESULTS") {
            config.trend_results = PathBuf::from(path);
        }
        if let Some(path) = lookup("KOPI_PREFERENCE_RESULTS") {
            config.preference_results = PathBuf::from(path);
        }
        if let Some(raw) = lookup("KOPI_CACHE_TTL_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.cache_ttl = Duration::from_secs(secs),
                Err(err) => warn!("invalid KOPI_CACHE_TTL_SECS, value={}, err={}", raw, err),
            }
        }

        config
    }

    pub fn path(&self, source: Source) -> &Path {
        match source {
            Source::Transactions => &self.transactions,
            Source::TrendResults => &self.trend_results,
            Source::PreferenceResults => &self.preference_results,
        }
    }
}
