use std::fmt;

use serde::{Deserialize, Serialize};

use super::CategoryScores;

/// Overall score on the 0-10 scale, stored as whole tenths so thresholds compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct OverallScore(u16);

impl OverallScore {
    pub const MAX: OverallScore = OverallScore(100);
    pub const APPROVAL_THRESHOLD: OverallScore = OverallScore(70);
    pub const CONDITIONAL_THRESHOLD: OverallScore = OverallScore(50);

    /// Clamps to the 0-10 scale.
    pub fn from_tenths(tenths: u16) -> Self {
        Self(tenths.min(Self::MAX.0))
    }

    pub const fn tenths(self) -> u16 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl From<OverallScore> for f64 {
    fn from(score: OverallScore) -> Self {
        score.value()
    }
}

impl TryFrom<f64> for OverallScore {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..=10.0).contains(&value) {
            return Err(format!("overall score {value} outside 0-10"));
        }
        Ok(Self((value * 10.0).round() as u16))
    }
}

impl fmt::Display for OverallScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Funding decision; a monotonic step function of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Conditional,
    Rejected,
}

impl Decision {
    pub fn for_score(score: OverallScore) -> Self {
        if score >= OverallScore::APPROVAL_THRESHOLD {
            Decision::Approved
        } else if score >= OverallScore::CONDITIONAL_THRESHOLD {
            Decision::Conditional
        } else {
            Decision::Rejected
        }
    }

    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Decision::Approved => RiskLevel::Low,
            Decision::Conditional => RiskLevel::Medium,
            Decision::Rejected => RiskLevel::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approved => "Approved",
            Decision::Conditional => "Conditional",
            Decision::Rejected => "Rejected",
        }
    }
}

/// Risk classification derived from the decision, never scored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Weighted average of the five categories, rounded half-up to one decimal.
pub(crate) fn aggregate(scores: &CategoryScores) -> OverallScore {
    // raw (0-10) x weight percent, so the sum is the score in hundredths
    let hundredths: u32 = scores
        .in_order()
        .iter()
        .map(|score| u32::from(score.raw_score) * score.category.weight_percent())
        .sum();

    let tenths = (hundredths + 5) / 10;
    OverallScore::from_tenths(u16::try_from(tenths).unwrap_or(u16::MAX))
}
