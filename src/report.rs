//! Plain-text rendering of the dashboard pages.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use log::warn;
use rust_decimal::Decimal;

use crate::analytics::catalog::{FINANCIAL, KPI_TARGETS, PROJECTION_MONTHS, PRODUCTS};
use crate::analytics::action_plan::{action_plan, WEEKS};
use crate::analytics::{
    calculate_metrics, monthly_trend, sorted_by_preference, top_preferences, trend_interpretations, Metrics,
    TrendLabel,
};
use crate::charts::{preference_heatmap, projection_chart, trend_chart, Chart, ChartSpec};
use crate::data::{DataStore, Loaded, PreferenceResult, Source, Table, TrendResult};
use crate::format::{format_currency, format_number, format_percentage};

const RULE_WIDTH: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Trend,
    Preference,
    ActionPlan,
    Kpi,
    About,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Trend,
        Page::Preference,
        Page::ActionPlan,
        Page::Kpi,
        Page::About,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Trend => "trend",
            Page::Preference => "preference",
            Page::ActionPlan => "action-plan",
            Page::Kpi => "kpi",
            Page::About => "about",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("unknown page '{0}'")]
pub struct UnknownPage(String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// A chart built while rendering, with the name it is exported under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedChart {
    pub name: &'static str,
    pub spec: ChartSpec,
}

struct Renderer<'a, W: Write> {
    store: &'a DataStore,
    out: &'a mut W,
    charts: Vec<NamedChart>,
}

/// Writes `page` to `out` and returns the charts it contains.
///
/// Sources that fail to load only blank their own section.
pub fn render<W: Write>(page: Page, store: &DataStore, out: &mut W) -> io::Result<Vec<NamedChart>> {
    let mut renderer = Renderer {
        store,
        out,
        charts: Vec::new(),
    };

    match page {
        Page::Dashboard => renderer.dashboard()?,
        Page::Trend => renderer.trend_page()?,
        Page::Preference => renderer.preference_page()?,
        Page::ActionPlan => renderer.action_plan_page()?,
        Page::Kpi => renderer.kpi_page()?,
        Page::About => renderer.about_page()?,
    }

    Ok(renderer.charts)
}

impl<'a, W: Write> Renderer<'a, W> {
    fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))
    }

    fn chart(&mut self, name: &'static str, spec: ChartSpec) -> io::Result<()> {
        if spec.is_empty() {
            writeln!(self.out, "[chart {}: no data]", name)?;
        } else {
            writeln!(self.out, "[chart {}: {}]", name, spec.title())?;
        }
        self.charts.push(NamedChart { name, spec });
        Ok(())
    }

    fn unavailable<R>(&mut self, loaded: &Loaded<R>, what: &str) -> io::Result<()> {
        if let Some(err) = loaded.error() {
            writeln!(self.out, "Error: {}", err)?;
        }
        warn!("{} unavailable", what);
        writeln!(self.out, "{} data unavailable", what)
    }

    fn dashboard(&mut self) -> io::Result<()> {
        writeln!(self.out, "Galunggung Green Glory Dashboard")?;
        writeln!(self.out, "Sales Analysis & Big Data Analytics 2025")?;

        let transactions = self.store.transactions();
        if !transactions.is_available() {
            if let Some(err) = transactions.error() {
                writeln!(self.out, "Error: {}", err)?;
            }
            writeln!(
                self.out,
                "Cannot load transaction data. Make sure the CSV file exists at {}",
                self.store.path(Source::Transactions).display()
            )?;
            return Ok(());
        }

        let metrics = calculate_metrics(transactions.table());
        self.key_metrics(&metrics)?;

        self.heading("MONTHLY REVENUE")?;
        for month in monthly_trend(transactions.table()) {
            writeln!(self.out, "{}  {}", month.month.format("%Y-%m"), format_currency(month.revenue))?;
        }

        self.heading("TREND ANALYSIS")?;
        let trend = self.store.trend_results();
        if trend.is_available() {
            self.chart("trend", trend_chart(trend.table()))?;
            self.interpretations(trend.table(), false)?;
            writeln!(self.out, "Recommended actions:")?;
            for label in [TrendLabel::RisingStar, TrendLabel::StableGrowth, TrendLabel::Declining] {
                writeln!(self.out, "  - {}: {}", label.name(), label.recommendation())?;
            }
            writeln!(self.out)?;
            self.trend_table(trend.table())?;
        } else {
            self.unavailable(&*trend, "Trend")?;
        }

        self.heading("PREFERENCE ANALYSIS")?;
        let preference = self.store.preference_results();
        if preference.is_available() {
            self.chart("preference_heatmap", preference_heatmap(preference.table()))?;
            writeln!(self.out, "Key insights:")?;
            for row in top_preferences(preference.table(), 3) {
                writeln!(
                    self.out,
                    "  {} -> {}: {} preference",
                    row.product_name(),
                    row.category_name(),
                    format_percentage(row.percentage_or_zero())
                )?;
            }
            writeln!(self.out)?;
            self.preference_table(preference.table())?;
        } else {
            self.unavailable(&*preference, "Preference")?;
        }

        self.heading("FINANCIAL PROJECTIONS")?;
        self.projection(&metrics)?;
        writeln!(self.out, "Base revenue:    {}/month", format_currency(metrics.total_revenue()))?;
        writeln!(
            self.out,
            "Growth target:   {}% in {} months",
            KPI_TARGETS.growth_percentage, PROJECTION_MONTHS
        )?;
        writeln!(
            self.out,
            "Month 6 target:  {}/month",
            format_currency(Decimal::from(KPI_TARGETS.revenue_target_6month))
        )?;
        writeln!(self.out, "Investment:      {}", format_currency(Decimal::from(FINANCIAL.investment_amount)))?;
        writeln!(self.out, "Expected ROI:    {}% year 1", FINANCIAL.year_1_roi)?;
        writeln!(self.out, "Payback period:  {} years", FINANCIAL.payback_period)
    }

    fn key_metrics(&mut self, metrics: &Metrics) -> io::Result<()> {
        self.heading("KEY METRICS")?;
        writeln!(self.out, "Total Revenue:       {}", format_currency(metrics.total_revenue()))?;
        writeln!(self.out, "Total Volume:        {}", format_number(metrics.total_volume()))?;
        writeln!(self.out, "Avg Price:           {}", format_currency(metrics.avg_price()))?;
        writeln!(
            self.out,
            "Total Transactions:  {}",
            format_number(Decimal::from(metrics.total_transactions()))
        )?;
        writeln!(self.out, "Period:              {}", metrics.date_range())?;
        writeln!(self.out, "Top Product:         {}", metrics.top_product())
    }

    fn projection(&mut self, metrics: &Metrics) -> io::Result<()> {
        let growth = Decimal::from(KPI_TARGETS.growth_percentage);
        self.chart(
            "revenue_projection",
            projection_chart(metrics.total_revenue(), growth, PROJECTION_MONTHS),
        )
    }

    fn interpretations(&mut self, trend: &Table<TrendResult>, with_slope: bool) -> io::Result<()> {
        for row in trend_interpretations(trend) {
            if with_slope {
                writeln!(self.out, "{} ({:.2})", row.product, row.slope)?;
                writeln!(self.out, "  > {}", row.label)?;
            } else {
                writeln!(self.out, "{}: {}", row.product, row.label)?;
            }
        }
        Ok(())
    }

    fn trend_table(&mut self, trend: &Table<TrendResult>) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<16} {:>8} {:>10} {:>8} {:>12} {:>16}",
            "Product", "Slope", "Intercept", "R2", "Volume", "Revenue"
        )?;
        for row in trend {
            writeln!(
                self.out,
                "{:<16} {:>8} {:>10} {:>8} {:>12} {:>16}",
                row.product_name(),
                row.slope.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v)),
                row.intercept.map_or_else(|| "-".to_string(), |v| format!("{:.0}", v)),
                row.r_squared.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v)),
                row.volume
                    .and_then(|v| Decimal::try_from(v).ok())
                    .map_or_else(|| "-".to_string(), format_number),
                row.revenue.map_or_else(|| "-".to_string(), format_number),
            )?;
        }
        Ok(())
    }

    fn preference_table(&mut self, preference: &Table<PreferenceResult>) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<16} {:<14} {:>11} {:>13} {:>16}",
            "Product", "Category", "Preference", "Transactions", "Revenue"
        )?;
        for row in sorted_by_preference(preference) {
            writeln!(
                self.out,
                "{:<16} {:<14} {:>11} {:>13} {:>16}",
                row.product_name(),
                row.category_name(),
                row.preference_percentage.map_or_else(|| "-".to_string(), format_percentage),
                row.transactions
                    .and_then(|v| Decimal::try_from(v).ok())
                    .map_or_else(|| "-".to_string(), format_number),
                row.revenue.map_or_else(|| "-".to_string(), format_number),
            )?;
        }
        Ok(())
    }

    fn trend_page(&mut self) -> io::Result<()> {
        self.heading("Sales Trend Analysis")?;
        let trend = self.store.trend_results();
        if !trend.is_available() {
            return self.unavailable(&*trend, "Trend");
        }

        self.chart("trend", trend_chart(trend.table()))?;
        self.interpretations(trend.table(), true)?;

        self.heading("Detail Data")?;
        self.trend_table(trend.table())?;

        self.heading("Product Catalog")?;
        for product in PRODUCTS.iter() {
            writeln!(
                self.out,
                "{} ({}, {}): {} [{}]",
                product.name, product.region, product.category, product.description, product.trend_2025
            )?;
        }
        Ok(())
    }

    fn preference_page(&mut self) -> io::Result<()> {
        self.heading("Customer Preference Analysis")?;
        let preference = self.store.preference_results();
        if !preference.is_available() {
            return self.unavailable(&*preference, "Preference");
        }

        self.chart("preference_heatmap", preference_heatmap(preference.table()))?;

        self.heading("Top Preferences")?;
        for row in top_preferences(preference.table(), 3) {
            writeln!(
                self.out,
                "{} -> {}: {}",
                row.product_name(),
                row.category_name(),
                format_percentage(row.percentage_or_zero())
            )?;
        }

        self.heading("All Data")?;
        self.preference_table(preference.table())
    }

    fn action_plan_page(&mut self) -> io::Result<()> {
        self.heading("30-Day Action Plan")?;
        writeln!(self.out, "Strategy rollout based on the Big Data Analytics insights")?;
        for week in WEEKS {
            let plan = action_plan(week);
            writeln!(self.out)?;
            if plan.title.is_empty() {
                writeln!(self.out, "Week {}", week)?;
            } else {
                writeln!(self.out, "{}", plan.title)?;
            }
            for item in plan.items {
                writeln!(self.out, "  [ ] {}", item)?;
            }
        }
        Ok(())
    }

    fn kpi_page(&mut self) -> io::Result<()> {
        self.heading("KPI Targets & Financial Projections")?;
        writeln!(
            self.out,
            "Revenue Target (6 months):  {} (+{}%)",
            format_currency(Decimal::from(KPI_TARGETS.revenue_target_6month)),
            KPI_TARGETS.growth_percentage
        )?;
        writeln!(self.out, "Volume Increase:            {}%", KPI_TARGETS.volume_increase)?;
        writeln!(self.out, "Market Share Target:        {}%", KPI_TARGETS.market_share_target)?;
        writeln!(self.out, "Customer Retention:         {}%", KPI_TARGETS.customer_retention)?;
        writeln!(self.out, "NPS Target:                 {}", KPI_TARGETS.nps_target)?;
        writeln!(self.out, "Gross Margin Target:        {}%", FINANCIAL.gross_margin_target)?;

        let transactions = self.store.transactions();
        if transactions.is_available() {
            let metrics = calculate_metrics(transactions.table());
            writeln!(self.out)?;
            self.projection(&metrics)?;
        } else if let Some(err) = transactions.error() {
            writeln!(self.out, "Error: {}", err)?;
        }
        Ok(())
    }

    fn about_page(&mut self) -> io::Result<()> {
        self.heading("About")?;
        writeln!(self.out, "Galunggung Green Glory Dashboard")?;
        writeln!(self.out)?;
        writeln!(self.out, "Sales analysis of six coffee products over 2025. Trend slopes come from")?;
        writeln!(self.out, "a linear regression and customer preferences from a logistic regression,")?;
        writeln!(self.out, "both computed upstream and read here as CSV results.")?;
        writeln!(self.out)?;
        writeln!(self.out, "Objectives:")?;
        writeln!(self.out, "  - Identify rising stars and declining products")?;
        writeln!(self.out, "  - Optimize the sales portfolio")?;
        writeln!(
            self.out,
            "  - Grow revenue {}% in {} months",
            KPI_TARGETS.growth_percentage, PROJECTION_MONTHS
        )?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Expected: revenue {} -> {}/month, ROI year 1 {}%, payback {} years, market share {}%",
            format_currency(Decimal::from(KPI_TARGETS.revenue_base_2025)),
            format_currency(Decimal::from(KPI_TARGETS.revenue_target_6month)),
            FINANCIAL.year_1_roi,
            FINANCIAL.payback_period,
            KPI_TARGETS.market_share_target
        )
    }
}
