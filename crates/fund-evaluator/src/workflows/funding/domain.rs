use serde::{Deserialize, Deserializer, Serialize};

/// Identifier used to meter LLM usage per caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn anonymous() -> Self {
        Self("anonymous".to_string())
    }
}

/// Raw evaluation form as submitted by the UI.
///
/// Numeric fields are kept as text because the form sends locale-formatted values
/// (`"1,200,000 ریال"`, `"۱۲"`); they are coerced during normalization, never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub team_size: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub technical_team: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_stage: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ip_status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub market_size: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_revenue: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub monthly_users: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cac: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ltv: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub funding_request: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub traction: String,
}

impl EvaluationRequest {
    /// Boundary validation: only the company name and the requested amount are mandatory.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.company_name.trim().is_empty() {
            return Err(IntakeError::MissingField { field: "companyName" });
        }
        if self.funding_request.trim().is_empty() {
            return Err(IntakeError::MissingField {
                field: "fundingRequest",
            });
        }
        Ok(())
    }
}

/// Rejection raised before any scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

/// Accepts strings, numbers, booleans, or null so form encoders can be sloppy.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Number(number)) => number_text(&number),
        Some(serde_json::Value::Bool(flag)) => flag.to_string(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(_) => String::new(),
    })
}

/// Plain decimal text; `Number`'s own formatting writes large values as `2e+22`.
fn number_text(number: &serde_json::Number) -> String {
    if let Some(value) = number.as_u64() {
        value.to_string()
    } else if let Some(value) = number.as_i64() {
        value.to_string()
    } else {
        number.as_f64().map(|value| value.to_string()).unwrap_or_default()
    }
}

/// Development stage of the product after label normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStage {
    Idea,
    Mvp,
    Launched,
    Revenue,
    Unspecified,
}

/// Intellectual property registration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpStatus {
    Registered,
    Pending,
    Unspecified,
}

/// Addressable market bucket, from an explicit label or a magnitude keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSize {
    Large,
    Medium,
    Small,
    Unspecified,
}

/// Normalized, fully typed view of a request. Every field has a safe default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub company_name: String,
    pub team_size: u32,
    pub technical_team: u32,
    pub product_stage: ProductStage,
    pub ip_status: IpStatus,
    pub market_size: MarketSize,
    pub current_revenue: f64,
    pub monthly_users: f64,
    pub cac: f64,
    pub ltv: f64,
    pub funding_request: f64,
    /// `None` when the applicant left traction blank or answered with a "none" sentinel.
    pub traction: Option<String>,
}

/// The five scored categories, declared in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Team,
    Product,
    Market,
    Financial,
    Kpi,
}

impl ScoreCategory {
    /// Canonical order; also the tie-break order for strongest/weakest selection.
    pub const ALL: [ScoreCategory; 5] = [
        ScoreCategory::Team,
        ScoreCategory::Product,
        ScoreCategory::Market,
        ScoreCategory::Financial,
        ScoreCategory::Kpi,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ScoreCategory::Team => "Team",
            ScoreCategory::Product => "Product",
            ScoreCategory::Market => "Market",
            ScoreCategory::Financial => "Financial",
            ScoreCategory::Kpi => "KPI",
        }
    }

    /// Weight expressed in whole percent; the five values sum to exactly 100.
    pub const fn weight_percent(self) -> u32 {
        match self {
            ScoreCategory::Team => 20,
            ScoreCategory::Product => 25,
            ScoreCategory::Market => 20,
            ScoreCategory::Financial => 20,
            ScoreCategory::Kpi => 15,
        }
    }

    pub fn weight(self) -> f64 {
        f64::from(self.weight_percent()) / 100.0
    }
}
