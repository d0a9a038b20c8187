use crate::workflows::funding::CounterfactualOrdering;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluation: EvaluationSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let ordering_raw =
            env::var("FUND_COUNTERFACTUAL_ORDER").unwrap_or_else(|_| "fixed".to_string());
        let counterfactual_ordering = CounterfactualOrdering::from_label(&ordering_raw)
            .ok_or(ConfigError::InvalidCounterfactualOrder {
                value: ordering_raw,
            })?;

        let daily_llm_limit = env::var("FUND_DAILY_LLM_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidDailyLimit)?;

        let llm_api_key = env::var("FUND_LLM_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            evaluation: EvaluationSettings {
                counterfactual_ordering,
                daily_llm_limit,
                llm_api_key,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the fallback selector and the rule-based engine.
#[derive(Clone)]
pub struct EvaluationSettings {
    pub counterfactual_ordering: CounterfactualOrdering,
    pub daily_llm_limit: u32,
    /// Only presence matters here; the LLM adapter owns the credential itself.
    pub llm_api_key: Option<String>,
}

impl EvaluationSettings {
    pub fn llm_credential_present(&self) -> bool {
        self.llm_api_key.is_some()
    }
}

impl fmt::Debug for EvaluationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationSettings")
            .field("counterfactual_ordering", &self.counterfactual_ordering)
            .field("daily_llm_limit", &self.daily_llm_limit)
            .field(
                "llm_api_key",
                &self.llm_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCounterfactualOrder { value: String },
    InvalidDailyLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCounterfactualOrder { value } => write!(
                f,
                "FUND_COUNTERFACTUAL_ORDER must be 'fixed' or 'deficit' (got '{value}')"
            ),
            ConfigError::InvalidDailyLimit => {
                write!(f, "FUND_DAILY_LLM_LIMIT must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCounterfactualOrder { .. }
            | ConfigError::InvalidDailyLimit => None,
        }
    }
}
