use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use log::debug;
use rust_decimal::Decimal;

use super::table::HeaderIndex;
use super::FromRow;

/// Accepted header names per field, highest priority first.
///
/// The lists cover the naming used by the different producers of the CSV
/// files (Indonesian headers from the sales export, English headers from the
/// analysis notebooks).
pub mod columns {
    pub const TX_DATE: &[&str] = &["Tanggal", "Date", "date"];
    pub const TX_PRODUCT: &[&str] = &["Produk", "Product", "produk"];
    pub const TX_QUANTITY: &[&str] = &["Jumlah", "Quantity", "quantity"];
    pub const TX_PRICE: &[&str] = &["Harga", "Price", "price"];
    pub const TX_CATEGORY: &[&str] = &["Kategori", "Category", "kategori"];

    pub const TREND_PRODUCT: &[&str] = &["Produk", "Product", "produk"];
    pub const TREND_SLOPE: &[&str] = &["Slope_Kg_Per_Bulan", "Slope", "slope"];
    pub const TREND_INTERCEPT: &[&str] = &["Intercept", "intercept"];
    pub const TREND_R_SQUARED: &[&str] = &["R_squared", "R_Squared", "r_squared"];
    pub const TREND_VOLUME: &[&str] = &["Volume", "Total_Volume", "volume"];
    pub const TREND_REVENUE: &[&str] = &["Revenue", "Revenue_IDR", "revenue"];

    pub const PREF_PRODUCT: &[&str] = &["Produk", "Product", "produk"];
    pub const PREF_CATEGORY: &[&str] = &["Kategori", "Category", "kategori"];
    pub const PREF_PERCENTAGE: &[&str] = &["Preference_Percentage"];
    pub const PREF_TRANSACTIONS: &[&str] = &["Transactions", "Jumlah_Transaksi"];
    pub const PREF_REVENUE: &[&str] = &["Revenue_IDR", "Revenue"];
}

// Day-first before month-first: `05/02/2025` is 5 February.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn raw_cell(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn text_cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    raw_cell(record, index).map(str::to_string)
}

fn f64_cell(record: &StringRecord, index: Option<usize>) -> Option<f64> {
    let raw = raw_cell(record, index)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!("ignoring non-numeric cell, value={}", raw);
            None
        },
    }
}

pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)).ok()
}

fn decimal_cell(record: &StringRecord, index: Option<usize>) -> Option<Decimal> {
    let raw = raw_cell(record, index)?;
    let value = parse_decimal(raw);
    if value.is_none() {
        debug!("ignoring non-numeric cell, value={}", raw);
    }
    value
}

/// Quantities and prices are never negative; a negative cell is treated as
/// malformed.
fn non_negative_cell(record: &StringRecord, index: Option<usize>) -> Option<Decimal> {
    match decimal_cell(record, index) {
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            debug!("ignoring negative amount, value={}", value);
            None
        },
        value => value,
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(datetime.date());
        }
    }

    None
}

fn date_cell(record: &StringRecord, index: Option<usize>) -> Option<NaiveDate> {
    let raw = raw_cell(record, index)?;
    let date = parse_date(raw);
    if date.is_none() {
        debug!("ignoring unparseable date, value={}", raw);
    }
    date
}

/// One sale from the transaction export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    pub date: Option<NaiveDate>,
    pub product: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionColumns {
    date: Option<usize>,
    product: Option<usize>,
    quantity: Option<usize>,
    price: Option<usize>,
    category: Option<usize>,
}

impl FromRow for TransactionRecord {
    type Columns = TransactionColumns;

    fn columns(headers: &HeaderIndex) -> TransactionColumns {
        TransactionColumns {
            date: headers.first_position(columns::TX_DATE),
            product: headers.first_position(columns::TX_PRODUCT),
            quantity: headers.first_position(columns::TX_QUANTITY),
            price: headers.first_position(columns::TX_PRICE),
            category: headers.first_position(columns::TX_CATEGORY),
        }
    }

    fn from_row(record: &StringRecord, columns: &TransactionColumns) -> TransactionRecord {
        TransactionRecord {
            date: date_cell(record, columns.date),
            product: text_cell(record, columns.product),
            quantity: non_negative_cell(record, columns.quantity),
            price: non_negative_cell(record, columns.price),
            category: text_cell(record, columns.category),
        }
    }
}

/// Regression output for one product: monthly volume change and fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendResult {
    pub product: Option<String>,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub r_squared: Option<f64>,
    pub volume: Option<f64>,
    pub revenue: Option<Decimal>,
}

impl TrendResult {
    pub fn product_name(&self) -> &str {
        self.product.as_deref().unwrap_or("N/A")
    }

    pub fn slope_or_zero(&self) -> f64 {
        self.slope.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendColumns {
    product: Option<usize>,
    slope: Option<usize>,
    intercept: Option<usize>,
    r_squared: Option<usize>,
    volume: Option<usize>,
    revenue: Option<usize>,
}

impl FromRow for TrendResult {
    type Columns = TrendColumns;

    fn columns(headers: &HeaderIndex) -> TrendColumns {
        TrendColumns {
            product: headers.first_position(columns::TREND_PRODUCT),
            slope: headers.first_position(columns::TREND_SLOPE),
            intercept: headers.first_position(columns::TREND_INTERCEPT),
            r_squared: headers.first_position(columns::TREND_R_SQUARED),
            volume: headers.first_position(columns::TREND_VOLUME),
            revenue: headers.first_position(columns::TREND_REVENUE),
        }
    }

    fn from_row(record: &StringRecord, columns: &TrendColumns) -> TrendResult {
        TrendResult {
            product: text_cell(record, columns.product),
            slope: f64_cell(record, columns.slope),
            intercept: f64_cell(record, columns.intercept),
            r_squared: f64_cell(record, columns.r_squared),
            volume: f64_cell(record, columns.volume),
            revenue: decimal_cell(record, columns.revenue),
        }
    }
}

/// Share of a customer category's purchases going to one product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceResult {
    pub product: Option<String>,
    pub category: Option<String>,
    pub preference_percentage: Option<f64>,
    pub transactions: Option<f64>,
    pub revenue: Option<Decimal>,
}

impl PreferenceResult {
    pub fn product_name(&self) -> &str {
        self.product.as_deref().unwrap_or("N/A")
    }

    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or("N/A")
    }

    pub fn percentage_or_zero(&self) -> f64 {
        self.preference_percentage.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceColumns {
    product: Option<usize>,
    category: Option<usize>,
    percentage: Option<usize>,
    transactions: Option<usize>,
    revenue: Option<usize>,
}

impl FromRow for PreferenceResult {
    type Columns = PreferenceColumns;

    fn columns(headers: &HeaderIndex) -> PreferenceColumns {
        PreferenceColumns {
            product: headers.first_position(columns::PREF_PRODUCT),
            category: headers.first_position(columns::PREF_CATEGORY),
            percentage: headers.first_position(columns::PREF_PERCENTAGE),
            transactions: headers.first_position(columns::PREF_TRANSACTIONS),
            revenue: headers.first_position(columns::PREF_REVENUE),
        }
    }

    fn from_row(record: &StringRecord, columns: &PreferenceColumns) -> PreferenceResult {
        PreferenceResult {
            product: text_cell(record, columns.product),
            category: text_cell(record, columns.category),
            preference_percentage: f64_cell(record, columns.percentage),
            transactions: f64_cell(record, columns.transactions),
            revenue: decimal_cell(record, columns.revenue),
        }
    }
}
