use std::cmp::Ordering;

use crate::data::{PreferenceResult, Table};

fn by_percentage_desc(a: &PreferenceResult, b: &PreferenceResult) -> Ordering {
    match (a.preference_percentage, b.preference_percentage) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Every row, highest preference first. Rows without a percentage go last;
/// equal rows keep file order.
pub fn sorted_by_preference(preference: &Table<PreferenceResult>) -> Vec<&PreferenceResult> {
    let mut rows: Vec<&PreferenceResult> = preference.iter().collect();
    rows.sort_by(|a, b| by_percentage_desc(a, b));
    rows
}

/// The `n` rows with the largest preference percentage.
pub fn top_preferences(preference: &Table<PreferenceResult>, n: usize) -> Vec<&PreferenceResult> {
    sorted_by_preference(preference)
        .into_iter()
        .filter(|row| row.preference_percentage.is_some())
        .take(n)
        .collect()
}
