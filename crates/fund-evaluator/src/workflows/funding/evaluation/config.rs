use serde::{Deserialize, Serialize};

/// Tunables for the rule-based engine. Category weights and ladders are fixed; only the
/// monetary tiers and the counterfactual ranking are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub revenue_tiers: RevenueTiers,
    pub counterfactual_ordering: CounterfactualOrdering,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            revenue_tiers: RevenueTiers::default(),
            counterfactual_ordering: CounterfactualOrdering::FixedOrder,
        }
    }
}

impl EvaluationConfig {
    pub fn with_ordering(mut self, ordering: CounterfactualOrdering) -> Self {
        self.counterfactual_ordering = ordering;
        self
    }
}

/// Revenue cut points (inclusive) for the Financial ladder, in the submission currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueTiers {
    pub first: f64,
    pub second: f64,
}

impl Default for RevenueTiers {
    fn default() -> Self {
        Self {
            first: 100_000_000.0,
            second: 1_000_000_000.0,
        }
    }
}

/// How qualifying counterfactuals are ranked before the list is capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterfactualOrdering {
    /// Team, Product, Financial, KPI; later categories are dropped first.
    FixedOrder,
    /// Lowest raw score first, ties kept in the fixed order.
    LargestDeficit,
}

impl CounterfactualOrdering {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed_order" => Some(Self::FixedOrder),
            "deficit" | "largest_deficit" => Some(Self::LargestDeficit),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CounterfactualOrdering::FixedOrder => "fixed",
            CounterfactualOrdering::LargestDeficit => "deficit",
        }
    }
}
