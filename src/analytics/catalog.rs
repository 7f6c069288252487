//! Static reference data: the coffee catalog, customer segments and the
//! business targets shown next to the computed figures.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductInfo {
    pub name: &'static str,
    pub region: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub trend_2025: &'static str,
}

pub const PRODUCTS: [ProductInfo; 6] = [
    ProductInfo {
        name: "Java Halu",
        region: "Jawa",
        category: "Premium Arabica",
        description: "Premium coffee from the Java highlands with a rich flavour",
        trend_2025: "Rising Star",
    },
    ProductInfo {
        name: "Bunar",
        region: "Sumatera",
        category: "Specialty Robusta",
        description: "Specialty coffee from Sumatera with a strong body",
        trend_2025: "Rising Star",
    },
    ProductInfo {
        name: "Parentas",
        region: "Sumatera",
        category: "Premium Robusta",
        description: "Premium coffee with a complex flavour profile",
        trend_2025: "Stable Growth",
    },
    ProductInfo {
        name: "Taraju",
        region: "Sulawesi",
        category: "Single Origin",
        description: "Single origin from Sulawesi with unique characteristics",
        trend_2025: "Declining",
    },
    ProductInfo {
        name: "Gunung Puntang",
        region: "Jawa",
        category: "Estate Coffee",
        description: "Quality estate coffee from Gunung Puntang",
        trend_2025: "Stable Growth",
    },
    ProductInfo {
        name: "Regional",
        region: "Mixed",
        category: "Blended",
        description: "Coffee blended from several regions",
        trend_2025: "Declining",
    },
];

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

pub fn product_metadata(name: &str) -> Option<&'static ProductInfo> {
    PRODUCTS.iter().find(|p| p.name == name)
}

pub fn product_description(name: &str) -> &'static str {
    product_metadata(name).map_or(PRODUCT_NOT_FOUND, |p| p.description)
}

/// Customer segment, sized by units bought per transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerCategory {
    pub name: &'static str,
    pub min_transaction: u32,
    pub avg_transaction: u32,
    pub description: &'static str,
}

pub const CUSTOMER_CATEGORIES: [CustomerCategory; 3] = [
    CustomerCategory {
        name: "Big Cafe",
        min_transaction: 50,
        avg_transaction: 200,
        description: "Large cafe with high volume",
    },
    CustomerCategory {
        name: "Medium Cafe",
        min_transaction: 20,
        avg_transaction: 75,
        description: "Mid-sized cafe with regular orders",
    },
    CustomerCategory {
        name: "Perorangan",
        min_transaction: 1,
        avg_transaction: 3,
        description: "Individual buyer",
    },
];

pub fn customer_category(name: &str) -> Option<&'static CustomerCategory> {
    CUSTOMER_CATEGORIES.iter().find(|c| c.name == name)
}

/// Amounts in Rupiah, rates in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiTargets {
    pub revenue_target_6month: i64,
    pub revenue_base_2025: i64,
    pub growth_percentage: u32,
    pub volume_increase: u32,
    pub market_share_target: u32,
    pub customer_retention: u32,
    pub nps_target: u32,
}

pub const KPI_TARGETS: KpiTargets = KpiTargets {
    revenue_target_6month: 212_000_000,
    revenue_base_2025: 176_500_000,
    growth_percentage: 20,
    volume_increase: 15,
    market_share_target: 35,
    customer_retention: 92,
    nps_target: 75,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialPlan {
    pub investment_amount: i64,
    pub year_1_roi: u32,
    pub payback_period: f64,
    pub gross_margin_target: u32,
    pub operational_cost_increase: u32,
}

pub const FINANCIAL: FinancialPlan = FinancialPlan {
    investment_amount: 357_000_000,
    year_1_roi: 48,
    payback_period: 2.1,
    gross_margin_target: 35,
    operational_cost_increase: 8,
};

/// Horizon of the revenue projection shown on the dashboard.
pub const PROJECTION_MONTHS: u32 = 6;
