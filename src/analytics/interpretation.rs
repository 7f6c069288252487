use std::fmt;

use crate::data::{Table, TrendResult};

pub const RISING_STAR_THRESHOLD: f64 = 5.0;
pub const DECLINING_THRESHOLD: f64 = -2.0;

/// Qualitative bucket of a product's monthly volume slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendLabel {
    RisingStar,
    StableGrowth,
    SlightDecline,
    Declining,
}

impl TrendLabel {
    pub fn name(&self) -> &'static str {
        match self {
            TrendLabel::RisingStar => "Rising Star",
            TrendLabel::StableGrowth => "Stable Growth",
            TrendLabel::SlightDecline => "Slight Decline",
            TrendLabel::Declining => "Declining",
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            TrendLabel::RisingStar => "significant growth, focus on maximizing it",
            TrendLabel::StableGrowth => "consistent growth, maintain the current strategy",
            TrendLabel::SlightDecline => "needs attention, review the strategy",
            TrendLabel::Declining => "sharp drop, needs an urgent action plan",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            TrendLabel::RisingStar => "Maximize marketing & pricing",
            TrendLabel::StableGrowth => "Maintain current strategy",
            TrendLabel::SlightDecline | TrendLabel::Declining => "Review & reposition",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name(), self.narrative())
    }
}

/// Buckets a slope in units per month.
///
/// Lower bounds are exclusive: 5 is stable growth, 0 is a slight decline and
/// -2 is declining. NaN falls through to `Declining`.
pub fn interpret_slope(slope: f64) -> TrendLabel {
    if slope > RISING_STAR_THRESHOLD {
        TrendLabel::RisingStar
    } else if slope > 0.0 {
        TrendLabel::StableGrowth
    } else if slope > DECLINING_THRESHOLD {
        TrendLabel::SlightDecline
    } else {
        TrendLabel::Declining
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendInterpretation {
    pub product: String,
    pub slope: f64,
    pub label: TrendLabel,
}

/// One interpretation per trend row, in file order.
pub fn trend_interpretations(trend: &Table<TrendResult>) -> Vec<TrendInterpretation> {
    trend
        .iter()
        .map(|row| {
            let slope = row.slope_or_zero();
            TrendInterpretation {
                product: row.product_name().to_string(),
                slope,
                label: interpret_slope(slope),
            }
        })
        .collect()
}
