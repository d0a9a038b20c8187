//! Startup funding evaluation: request intake, fallback selection, and the deterministic
//! rule-based scoring engine that answers whenever the LLM evaluator cannot.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
