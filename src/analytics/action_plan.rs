/// Checklist for one week of the 30-day plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionPlan {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

impl ActionPlan {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.items.is_empty()
    }
}

pub const WEEKS: std::ops::RangeInclusive<u32> = 1..=4;

const PLANS: [ActionPlan; 4] = [
    ActionPlan {
        title: "Week 1: Analysis & Planning",
        items: &[
            "Review trend analysis results and identify opportunities",
            "Analyze customer preference patterns by category",
            "Create a detailed 6-month action roadmap",
            "Align with stakeholders on targets and resources",
        ],
    },
    ActionPlan {
        title: "Week 2: Market Activation",
        items: &[
            "Launch marketing campaign for rising stars (Java Halu, Bunar)",
            "Prepare promotional materials and pricing strategies",
            "Brief the sales team on new talking points",
            "Monitor initial market response",
        ],
    },
    ActionPlan {
        title: "Week 3: Portfolio Optimization",
        items: &[
            "Evaluate declining products (Taraju, Regional)",
            "Decide between product discontinuation or a revamp",
            "Plan relaunch strategy for struggling products",
            "Update inventory based on the new demand forecast",
        ],
    },
    ActionPlan {
        title: "Week 4: Review & Adjust",
        items: &[
            "Measure Week 1-3 results against targets",
            "Analyze customer feedback and market response",
            "Make course corrections for Month 2-3",
            "Report findings to management with recommendations",
        ],
    },
];

/// The plan for `week` (1 to 4); any other week gets an empty plan.
pub fn action_plan(week: u32) -> ActionPlan {
    if WEEKS.contains(&week) {
        PLANS[(week - 1) as usize]
    } else {
        ActionPlan::default()
    }
}
