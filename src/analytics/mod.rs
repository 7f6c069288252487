//! Everything the pages derive from the loaded tables: headline metrics,
//! trend buckets, preference rankings and the static business content.

use thiserror::Error;

use crate::data::Table;

pub mod action_plan;
pub mod catalog;
pub mod interpretation;
pub mod metrics;
pub mod preferences;


pub use action_plan::{action_plan, ActionPlan};
pub use catalog::{customer_category, product_description, product_metadata, CustomerCategory, ProductInfo};
pub use interpretation::{interpret_slope, trend_interpretations, TrendInterpretation, TrendLabel};
pub use metrics::{calculate_metrics, monthly_trend, Metrics, MonthlyRevenue};
pub use preferences::{sorted_by_preference, top_preferences};

#[derive(Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("table is empty")]
    Empty,
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Checks that a table has rows and carries every `required` column.
///
/// Missing columns are reported in the order they were required.
pub fn validate_columns<R>(table: &Table<R>, required: &[&str]) -> Result<(), ValidationError> {
    if table.is_empty() {
        return Err(ValidationError::Empty);
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingColumns(missing))
    }
}
