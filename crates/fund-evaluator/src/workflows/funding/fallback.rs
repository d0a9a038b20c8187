use serde::{Deserialize, Serialize};

use super::collaborators::UsageError;

/// Which evaluator answered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "path", content = "reason")]
pub enum EvaluationPath {
    Llm,
    RuleBased(FallbackReason),
}

impl EvaluationPath {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationPath::Llm => "llm",
            EvaluationPath::RuleBased(_) => "rule-based",
        }
    }

    pub const fn is_rule_based(self) -> bool {
        matches!(self, EvaluationPath::RuleBased(_))
    }
}

/// Why the rule-based engine answered instead of the LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    QuotaExhausted,
    MissingCredential,
    UsageUnavailable,
    UpstreamFailure,
    Requested,
}

impl FallbackReason {
    pub const fn label(self) -> &'static str {
        match self {
            FallbackReason::QuotaExhausted => "daily LLM quota exhausted",
            FallbackReason::MissingCredential => "LLM credential missing",
            FallbackReason::UsageUnavailable => "usage meter unavailable",
            FallbackReason::UpstreamFailure => "LLM evaluator failed",
            FallbackReason::Requested => "rule-based evaluation requested",
        }
    }
}

/// Decides up front whether the LLM path may be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackSelector {
    daily_limit: u32,
    credential_present: bool,
}

impl FallbackSelector {
    pub fn new(daily_limit: u32, credential_present: bool) -> Self {
        Self {
            daily_limit,
            credential_present,
        }
    }

    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    /// A meter that cannot answer routes to the rules, same as an exhausted quota.
    pub fn select(&self, used_today: Result<u32, &UsageError>) -> EvaluationPath {
        if !self.credential_present {
            return EvaluationPath::RuleBased(FallbackReason::MissingCredential);
        }

        match used_today {
            Ok(used) if used >= self.daily_limit => {
                EvaluationPath::RuleBased(FallbackReason::QuotaExhausted)
            }
            Ok(_) => EvaluationPath::Llm,
            Err(_) => EvaluationPath::RuleBased(FallbackReason::UsageUnavailable),
        }
    }
}
