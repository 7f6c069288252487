use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use super::*;
use crate::config::Config;

fn write(dir: &Path, name: &str, contents: &str) -> Result<std::path::PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn test_first_present_follows_candidate_order() {
    let headers = HeaderIndex::new(["Product", "slope", "Slope"]);
    assert_eq!(headers.first_present(&["Slope_Kg_Per_Bulan", "Slope", "slope"]), Some("Slope"));
    assert_eq!(headers.first_position(&["Slope_Kg_Per_Bulan", "Slope", "slope"]), Some(2));
    assert_eq!(headers.first_present(&["Produk"]), None);
}

#[test]
fn test_empty_table_has_no_rows_or_columns() {
    let table: Table<TransactionRecord> = Table::empty();
    assert_eq!(table.row_count(), 0);
    assert!(table.is_empty());
    assert!(table.headers().headers().is_empty());
}

#[test]
fn test_read_transactions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write(
        dir.path(),
        "tx.csv",
        "Tanggal,Produk,Jumlah,Harga\n\
         2025-01-03,Java Halu,2,150000\n\
         05/02/2025, Bunar ,1.5,90000\n\
         not-a-date,Taraju,-1,abc\n",
    )?;

    let table: Table<TransactionRecord> = read_table(&path)?;
    assert_eq!(table.row_count(), 3);
    assert!(table.has_column("Harga"));

    let rows = table.rows();
    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 1, 3));
    assert_eq!(rows[0].price, Some(dec!(150000)));
    assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2025, 2, 5));
    assert_eq!(rows[1].product.as_deref(), Some("Bunar"));
    assert_eq!(rows[1].quantity, Some(dec!(1.5)));
    assert_eq!(rows[2].date, None);
    assert_eq!(rows[2].quantity, None);
    assert_eq!(rows[2].price, None);

    Ok(())
}

#[test]
fn test_parse_date_formats() {
    let cases = [
        ("2025-12-31", NaiveDate::from_ymd_opt(2025, 12, 31)),
        ("31/12/2025", NaiveDate::from_ymd_opt(2025, 12, 31)),
        ("12/31/2025", NaiveDate::from_ymd_opt(2025, 12, 31)),
        ("05/02/2025", NaiveDate::from_ymd_opt(2025, 2, 5)),
        ("2025/12/31", NaiveDate::from_ymd_opt(2025, 12, 31)),
        ("31-12-2025", NaiveDate::from_ymd_opt(2025, 12, 31)),
        ("2025-01-03 10:15:00", NaiveDate::from_ymd_opt(2025, 1, 3)),
        ("2025-01-03T10:15:00", NaiveDate::from_ymd_opt(2025, 1, 3)),
        ("  2025-01-03  ", NaiveDate::from_ymd_opt(2025, 1, 3)),
        ("Jan 3rd 2025", None),
        ("2025-13-01", None),
    ];

    for (raw, expected) in cases {
        assert_eq!(records::parse_date(raw), expected, "input {:?}", raw);
    }
}

#[test]
fn test_read_trend_with_alternate_headers() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write(
        dir.path(),
        "trend.csv",
        "Product,Slope,Intercept,R_squared\nJava Halu,7.25,120,0.81\nRegional,-3.5,80,0.4\n",
    )?;

    let table: Table<TrendResult> = read_table(&path)?;
    assert_eq!(table.rows()[0].product_name(), "Java Halu");
    assert_eq!(table.rows()[0].slope, Some(7.25));
    assert_eq!(table.rows()[1].slope_or_zero(), -3.5);
    assert_eq!(table.rows()[1].r_squared, Some(0.4));

    Ok(())
}

#[test]
fn test_short_rows_fill_with_none() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write(
        dir.path(),
        "pref.csv",
        "Product,Category,Preference_Percentage\nBunar,Big Cafe\n",
    )?;

    let table: Table<PreferenceResult> = read_table(&path)?;
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows()[0].category_name(), "Big Cafe");
    assert_eq!(table.rows()[0].preference_percentage, None);

    Ok(())
}

#[test]
fn test_missing_file_degrades_to_empty_table() {
    let loaded: Loaded<TransactionRecord> = load(Source::Transactions, Path::new("does/not/exist.csv"));

    assert!(!loaded.is_available());
    assert!(loaded.table().is_empty());
    match loaded.error() {
        Some(LoadError::NotFound { path }) => assert_eq!(path, Path::new("does/not/exist.csv")),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(loaded.error().map(|e| e.to_string()).unwrap_or_default().contains("does/not/exist.csv"));
}

#[test]
fn test_empty_file_is_missing_header() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write(dir.path(), "empty.csv", "")?;

    let loaded: Loaded<TrendResult> = load(Source::TrendResults, &path);
    assert!(matches!(loaded.error(), Some(LoadError::MissingHeader { .. })));

    Ok(())
}

#[test]
fn test_header_only_file_is_unavailable() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write(dir.path(), "tx.csv", "Tanggal,Produk,Jumlah,Harga\n")?;

    let loaded: Loaded<TransactionRecord> = load(Source::Transactions, &path);
    assert!(loaded.error().is_none());
    assert!(!loaded.is_available());

    Ok(())
}

#[test]
fn test_cache_expires_after_ttl() {
    let clock = Arc::new(ManualClock::new());
    let cache: TtlCache<&str, u32> = TtlCache::with_clock(Duration::from_secs(60), clock.clone());
    let calls = Cell::new(0);
    let loader = || {
        calls.set(calls.get() + 1);
        calls.get()
    };

    assert_eq!(cache.get_or_load("tx", loader), 1);
    clock.advance(Duration::from_secs(59));
    assert_eq!(cache.get_or_load("tx", loader), 1);
    clock.advance(Duration::from_secs(1));
    assert_eq!(cache.get(&"tx"), None);
    assert_eq!(cache.get_or_load("tx", loader), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_zero_ttl_never_caches() {
    let cache: TtlCache<&str, u32> = TtlCache::new(Duration::ZERO);
    let calls = Cell::new(0);

    for _ in 0..3 {
        cache.get_or_load("tx", || {
            calls.set(calls.get() + 1);
            0
        });
    }

    assert_eq!(calls.get(), 3);
    assert!(cache.is_empty());
}

#[test]
fn test_purge_and_invalidate() {
    let clock = Arc::new(ManualClock::new());
    let cache: TtlCache<&str, u32> = TtlCache::with_clock(Duration::from_secs(10), clock.clone());
    cache.get_or_load("a", || 1);
    clock.advance(Duration::from_secs(5));
    cache.get_or_load("b", || 2);
    clock.advance(Duration::from_secs(5));

    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.get(&"b"), Some(2));

    cache.invalidate(&"b");
    assert!(cache.is_empty());
}

#[test]
fn test_store_serves_cached_table_until_expiry() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write(dir.path(), "Transaksi-Penjualan-2025.csv", "Tanggal,Produk,Jumlah,Harga\n2025-03-01,Bunar,1,1000\n")?;

    let clock = Arc::new(ManualClock::new());
    let store = DataStore::with_clock(&Config::with_data_dir(dir.path()), clock.clone());

    assert!(store.transactions().is_available());
    fs::remove_file(&path)?;
    assert!(store.transactions().is_available());

    clock.advance(Duration::from_secs(3600));
    let reloaded = store.transactions();
    assert!(!reloaded.is_available());
    assert!(matches!(reloaded.error(), Some(LoadError::NotFound { .. })));

    Ok(())
}

#[test]
fn test_store_refresh_rereads_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = DataStore::new(&Config::with_data_dir(dir.path()));
    assert!(!store.trend_results().is_available());

    write(dir.path(), "trend_analysis_results.csv", "Produk,Slope_Kg_Per_Bulan\nBunar,6.1\n")?;
    assert!(!store.trend_results().is_available());

    store.refresh();
    assert!(store.trend_results().is_available());
    assert_eq!(store.path(Source::TrendResults), dir.path().join("trend_analysis_results.csv"));

    Ok(())
}

#[test]
fn test_store_refresh_source_leaves_others_cached() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = DataStore::new(&Config::with_data_dir(dir.path()));
    assert!(!store.trend_results().is_available());
    assert!(!store.preference_results().is_available());

    write(dir.path(), "trend_analysis_results.csv", "Produk,Slope_Kg_Per_Bulan\nBunar,6.1\n")?;
    write(
        dir.path(),
        "preference_analysis_results.csv",
        "Product,Category,Preference_Percentage\nBunar,Big Cafe,40\n",
    )?;

    store.refresh_source(Source::TrendResults);
    assert!(store.trend_results().is_available());
    assert!(!store.preference_results().is_available());

    Ok(())
}
