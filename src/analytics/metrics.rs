use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use getset::{CopyGetters, Getters};
use log::warn;
use rust_decimal::Decimal;

use crate::data::records::columns;
use crate::data::{Table, TransactionRecord};

const NOT_AVAILABLE: &str = "N/A";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Headline figures of the transaction table, recomputed on every render.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Metrics {
    #[getset(get_copy = "pub")]
    total_revenue: Decimal,
    #[getset(get_copy = "pub")]
    total_volume: Decimal,
    #[getset(get_copy = "pub")]
    avg_price: Decimal,
    #[getset(get_copy = "pub")]
    total_transactions: usize,
    #[getset(get = "pub")]
    date_range: String,
    #[getset(get = "pub")]
    top_product: String,
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics {
            total_revenue: Decimal::ZERO,
            total_volume: Decimal::ZERO,
            avg_price: Decimal::ZERO,
            total_transactions: 0,
            date_range: NOT_AVAILABLE.to_string(),
            top_product: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Revenue of one calendar month, labelled by the month's last day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRevenue {
    pub month: NaiveDate,
    pub revenue: Decimal,
}

pub fn calculate_metrics(transactions: &Table<TransactionRecord>) -> Metrics {
    if transactions.is_empty() {
        return Metrics::default();
    }

    let (total_revenue, avg_price) = if transactions.has_any_column(columns::TX_PRICE) {
        let prices: Vec<Decimal> = transactions.iter().filter_map(|tx| tx.price).collect();
        let total = sum_amounts(prices.iter().copied(), "revenue");
        let avg = if prices.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(prices.len())
        };
        (total, avg)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let total_volume = if transactions.has_any_column(columns::TX_QUANTITY) {
        sum_amounts(transactions.iter().filter_map(|tx| tx.quantity), "volume")
    } else {
        Decimal::ZERO
    };

    let date_range = if transactions.has_any_column(columns::TX_DATE) {
        format_date_range(transactions).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    } else {
        NOT_AVAILABLE.to_string()
    };

    let top_product = if transactions.has_any_column(columns::TX_PRODUCT) {
        most_frequent_product(transactions).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    } else {
        NOT_AVAILABLE.to_string()
    };

    Metrics {
        total_revenue,
        total_volume,
        avg_price,
        total_transactions: transactions.row_count(),
        date_range,
        top_product,
    }
}

/// Sums non-negative amounts, capping at `Decimal::MAX` instead of
/// overflowing.
fn sum_amounts<I: IntoIterator<Item = Decimal>>(amounts: I, what: &str) -> Decimal {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        total = add_capped(total, amount, what);
        if total == Decimal::MAX {
            break;
        }
    }
    total
}

fn add_capped(total: Decimal, amount: Decimal, what: &str) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("{} overflowed, capping at {}", what, Decimal::MAX);
        Decimal::MAX
    })
}

fn format_date_range(transactions: &Table<TransactionRecord>) -> Option<String> {
    let mut dates = transactions.iter().filter_map(|tx| tx.date);
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
    Some(format!("{} - {}", min.format(DATE_FORMAT), max.format(DATE_FORMAT)))
}

/// Most frequent product. On equal counts the product seen first wins.
fn most_frequent_product(transactions: &Table<TransactionRecord>) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for product in transactions.iter().filter_map(|tx| tx.product.as_deref()) {
        match index.get(product) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(product, counts.len());
                counts.push((product, 1));
            },
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (product, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((product, count));
        }
    }

    best.map(|(product, _)| product.to_string())
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Revenue summed per calendar month, oldest first.
///
/// Every month between the first and last dated sale is present; months
/// without sales report zero.
pub fn monthly_trend(transactions: &Table<TransactionRecord>) -> Vec<MonthlyRevenue> {
    if transactions.is_empty() || !transactions.has_any_column(columns::TX_DATE) {
        return Vec::new();
    }

    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for tx in transactions {
        if let Some(date) = tx.date {
            let revenue = by_month.entry((date.year(), date.month())).or_insert(Decimal::ZERO);
            *revenue = add_capped(*revenue, tx.price.unwrap_or(Decimal::ZERO), "monthly revenue");
        }
    }

    let (Some(&(first_year, first_month)), Some(&last)) = (by_month.keys().next(), by_month.keys().last()) else {
        return Vec::new();
    };

    let mut trend = Vec::new();
    let (mut year, mut month) = (first_year, first_month);
    while (year, month) <= last {
        if let Some(month_end) = last_day_of_month(year, month) {
            trend.push(MonthlyRevenue {
                month: month_end,
                revenue: by_month.get(&(year, month)).copied().unwrap_or(Decimal::ZERO),
            });
        }
        (year, month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    }

    trend
}
