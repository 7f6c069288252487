//! Declarative chart descriptions handed to the rendering surface.
//!
//! Builders are pure: they read a table and return a [`ChartSpec`] that
//! serializes to JSON. An empty input gives an empty chart, never an error.

use std::collections::{BTreeSet, HashMap};

use enum_dispatch::enum_dispatch;
use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::data::{PreferenceResult, Table, TrendResult};

pub mod palette {
    pub const PRIMARY: &str = "#3498db";
    pub const SECONDARY: &str = "#2c3e50";
    pub const SUCCESS: &str = "#27ae60";
    pub const WARNING: &str = "#f39c12";
    pub const DANGER: &str = "#e74c3c";
    pub const SUCCESS_FILL: &str = "rgba(39, 174, 96, 0.2)";
    pub const HEATMAP_SCALE: &str = "Blues";

    /// Bar colour for positive slopes.
    pub const POSITIVE: &str = PRIMARY;
    /// Bar colour for flat or negative slopes.
    pub const NEGATIVE: &str = DANGER;
}

pub const CHART_HEIGHT: u32 = 400;

#[enum_dispatch]
pub trait Chart {
    fn title(&self) -> &str;

    fn is_empty(&self) -> bool;
}

#[enum_dispatch(Chart)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChart),
    Heatmap(Heatmap),
    Area(AreaChart),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub height: u32,
}

impl Layout {
    fn new(title: impl Into<String>, x_title: &str, y_title: &str) -> Layout {
        Layout {
            title: title.into(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            height: CHART_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarChart {
    pub layout: Layout,
    pub bars: Vec<Bar>,
}

impl Chart for BarChart {
    fn title(&self) -> &str {
        &self.layout.title
    }

    fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Product x category grid. `z[row][col]` is `None` where the pair has no
/// preference value, which serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heatmap {
    pub layout: Layout,
    pub colorscale: &'static str,
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub z: Vec<Vec<Option<f64>>>,
}

impl Heatmap {
    pub fn cell(&self, product: &str, category: &str) -> Option<f64> {
        let row = self.products.iter().position(|p| p == product)?;
        let col = self.categories.iter().position(|c| c == category)?;
        self.z[row][col]
    }
}

impl Chart for Heatmap {
    fn title(&self) -> &str {
        &self.layout.title
    }

    fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Line series filled down to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaChart {
    pub layout: Layout,
    pub name: String,
    pub color: &'static str,
    pub fill_color: &'static str,
    pub points: Vec<Point>,
}

impl Chart for AreaChart {
    fn title(&self) -> &str {
        &self.layout.title
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One bar per trend row, height = slope.
pub fn trend_chart(trend: &Table<TrendResult>) -> ChartSpec {
    if trend.is_empty() {
        return BarChart::default().into();
    }

    let bars = trend
        .iter()
        .map(|row| {
            let value = row.slope_or_zero();
            Bar {
                label: row.product_name().to_string(),
                value,
                color: if value > 0.0 { palette::POSITIVE } else { palette::NEGATIVE },
            }
        })
        .collect();

    BarChart {
        layout: Layout::new(
            "Trend Analysis - Monthly Slope per Product",
            "Product",
            "Slope (Units/Month)",
        ),
        bars,
    }
    .into()
}

/// Pivots preference rows into a product x category matrix.
///
/// Rows and columns are sorted by name. When a pair appears more than once
/// the first row with a percentage wins.
pub fn preference_heatmap(preference: &Table<PreferenceResult>) -> ChartSpec {
    if preference.is_empty() {
        return Heatmap::default().into();
    }

    let mut products = BTreeSet::new();
    let mut categories = BTreeSet::new();
    let mut values: HashMap<(&str, &str), f64> = HashMap::new();

    for row in preference {
        let (Some(product), Some(category), Some(pct)) =
            (row.product.as_deref(), row.category.as_deref(), row.preference_percentage)
        else {
            continue;
        };
        products.insert(product);
        categories.insert(category);
        values.entry((product, category)).or_insert(pct);
    }

    let z: Vec<Vec<Option<f64>>> = products
        .iter()
        .map(|p| categories.iter().map(|c| values.get(&(*p, *c)).copied()).collect::<Vec<_>>())
        .collect();

    Heatmap {
        layout: Layout::new(
            "Customer Preference Heatmap - Product x Category",
            "Customer Category",
            "Product",
        ),
        colorscale: palette::HEATMAP_SCALE,
        products: products.into_iter().map(str::to_string).collect(),
        categories: categories.into_iter().map(str::to_string).collect(),
        z,
    }
    .into()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPoint {
    pub month: u32,
    pub revenue: Decimal,
}

/// Compound growth: `base * (1 + rate / 100) ^ m` for every month `m` in
/// `0..=months`.
///
/// The series stops early if the amount no longer fits a `Decimal`.
pub fn revenue_projection(base: Decimal, growth_rate_percent: Decimal, months: u32) -> Vec<ProjectionPoint> {
    let factor = Decimal::ONE + growth_rate_percent / Decimal::ONE_HUNDRED;
    let mut points = Vec::with_capacity(months as usize + 1);
    let mut revenue = base;

    for month in 0..=months {
        points.push(ProjectionPoint { month, revenue });
        if month == months {
            break;
        }
        match revenue.checked_mul(factor) {
            Some(next) => revenue = next,
            None => {
                warn!("projection overflow, stopping at month={}", month);
                break;
            },
        }
    }

    points
}

pub fn projection_chart(base: Decimal, growth_rate_percent: Decimal, months: u32) -> ChartSpec {
    let points = revenue_projection(base, growth_rate_percent, months)
        .into_iter()
        .map(|p| Point {
            x: f64::from(p.month),
            y: p.revenue.to_f64().unwrap_or_default(),
        })
        .collect();

    AreaChart {
        layout: Layout::new(
            format!(
                "{}-Month Revenue Projection ({}% Growth)",
                months,
                growth_rate_percent.normalize()
            ),
            "Month",
            "Revenue (IDR)",
        ),
        name: "Projected Revenue".to_string(),
        color: palette::SUCCESS,
        fill_color: palette::SUCCESS_FILL,
        points,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::data::HeaderIndex;

    fn trend_row(product: &str, slope: Option<f64>) -> TrendResult {
        TrendResult {
            product: Some(product.to_string()),
            slope,
            ..Default::default()
        }
    }

    fn pref_row(product: &str, category: &str, pct: f64) -> PreferenceResult {
        PreferenceResult {
            product: Some(product.to_string()),
            category: Some(category.to_string()),
            preference_percentage: Some(pct),
            ..Default::default()
        }
    }

    #[test]
    fn trend_chart_colours_by_sign() {
        let trend = Table::new(
            HeaderIndex::new(["Produk", "Slope_Kg_Per_Bulan"]),
            vec![trend_row("Java Halu", Some(7.5)), trend_row("Taraju", Some(-3.0)), trend_row("Regional", None)],
        );

        let ChartSpec::Bar(chart) = trend_chart(&trend) else {
            panic!("expected a bar chart");
        };
        assert_eq!(chart.bars.len(), 3);
        assert_eq!(chart.bars[0].color, palette::POSITIVE);
        assert_eq!(chart.bars[1].color, palette::NEGATIVE);
        assert_eq!(chart.bars[2].value, 0.0);
        assert_eq!(chart.bars[2].color, palette::NEGATIVE);
    }

    #[test]
    fn empty_inputs_give_empty_charts() {
        assert!(trend_chart(&Table::empty()).is_empty());
        assert!(preference_heatmap(&Table::empty()).is_empty());
        assert_eq!(trend_chart(&Table::empty()).title(), "");
    }

    #[test]
    fn heatmap_pivot_marks_missing_cells() {
        let preference = Table::new(
            HeaderIndex::new(["Product", "Category", "Preference_Percentage"]),
            vec![pref_row("A", "Cat1", 10.0), pref_row("A", "Cat2", 20.0), pref_row("B", "Cat1", 30.0)],
        );

        let ChartSpec::Heatmap(map) = preference_heatmap(&preference) else {
            panic!("expected a heatmap");
        };
        assert_eq!(map.products, vec!["A", "B"]);
        assert_eq!(map.categories, vec!["Cat1", "Cat2"]);
        assert_eq!(map.z, vec![vec![Some(10.0), Some(20.0)], vec![Some(30.0), None]]);
        assert_eq!(map.cell("B", "Cat2"), None);
    }

    #[test]
    fn heatmap_keeps_first_duplicate() {
        let preference = Table::new(
            HeaderIndex::new(["Product", "Category", "Preference_Percentage"]),
            vec![pref_row("A", "Cat1", 10.0), pref_row("A", "Cat1", 99.0)],
        );

        let ChartSpec::Heatmap(map) = preference_heatmap(&preference) else {
            panic!("expected a heatmap");
        };
        assert_eq!(map.cell("A", "Cat1"), Some(10.0));
    }

    #[test]
    fn projection_compounds_monthly() {
        let points = revenue_projection(dec!(100), dec!(20), 6);

        assert_eq!(points.len(), 7);
        assert_eq!(points[0].revenue, dec!(100));
        assert_eq!(points[1].revenue, dec!(120));
        assert_eq!(points[6].revenue, dec!(298.5984));
        assert_eq!(revenue_projection(dec!(100), dec!(20), 0), vec![ProjectionPoint { month: 0, revenue: dec!(100) }]);
    }

    #[test]
    fn projection_chart_serializes() -> anyhow::Result<()> {
        let chart = projection_chart(dec!(100), dec!(20), 2);
        assert_eq!(chart.title(), "2-Month Revenue Projection (20% Growth)");

        let json = serde_json::to_value(&chart)?;
        assert_eq!(json["kind"], "area");
        assert_eq!(json["points"][1]["y"], 120.0);
        assert_eq!(json["points"].as_array().map(Vec::len), Some(3));

        Ok(())
    }

    #[test]
    fn heatmap_serializes_missing_as_null() -> anyhow::Result<()> {
        let preference = Table::new(
            HeaderIndex::new(["Product", "Category", "Preference_Percentage"]),
            vec![pref_row("A", "Cat1", 10.0), pref_row("B", "Cat2", 5.0)],
        );

        let json = serde_json::to_value(preference_heatmap(&preference))?;
        assert_eq!(json["kind"], "heatmap");
        assert!(json["z"][0][1].is_null());

        Ok(())
    }
}
