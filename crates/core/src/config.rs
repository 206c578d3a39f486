use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_f64(profile: &str, key: &str) -> Option<f64> {
    profiled_env_opt(profile, key).and_then(|v| v.parse().ok())
}

fn profiled_env_usize(profile: &str, key: &str) -> Option<usize> {
    profiled_env_opt(profile, key).and_then(|v| v.parse().ok())
}

// ── Alignment policy ──────────────────────────────────────────

/// What to do with detection timestamps that have no label counterpart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentPolicy {
    /// Fail the evaluation with `AlignmentMismatch`.
    #[default]
    Reject,
    /// Drop the extra timestamps and log how many were dropped.
    Truncate,
}

impl fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentPolicy::Reject => write!(f, "reject"),
            AlignmentPolicy::Truncate => write!(f, "truncate"),
        }
    }
}

impl FromStr for AlignmentPolicy {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(AlignmentPolicy::Reject),
            "truncate" => Ok(AlignmentPolicy::Truncate),
            other => Err(EvalError::InvalidPolicy(other.to_string())),
        }
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub eval: EvalConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `EVENTMATCH_PROFILE`. When set (e.g. `MENDON`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("EVENTMATCH_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            eval: EvalConfig::from_env_profiled(p),
            rules: RulesConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  eval:   alignment={}", self.eval.alignment);
        tracing::info!(
            "  rules:  range=[{}, {}], persistence={}, interpolation_limit={}",
            fmt_opt(self.rules.range_min),
            fmt_opt(self.rules.range_max),
            self.rules
                .persistence_length
                .map(|n| n.to_string())
                .unwrap_or_else(|| "(off)".to_string()),
            self.rules.interpolation_limit
        );
    }

    /// Return the resolved configuration as JSON.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "eval": { "alignment": self.eval.alignment },
            "rules": {
                "range_min": self.rules.range_min,
                "range_max": self.rules.range_max,
                "persistence_length": self.rules.persistence_length,
                "interpolation_limit": self.rules.interpolation_limit,
            },
        })
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}

// ── Evaluation ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    pub alignment: AlignmentPolicy,
}

impl EvalConfig {
    fn from_env_profiled(p: &str) -> Self {
        let raw = profiled_env_or(p, "EVENTMATCH_ALIGNMENT", "reject");
        let alignment = raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "Unknown alignment policy, using reject");
            AlignmentPolicy::Reject
        });
        Self { alignment }
    }
}

// ── Rule-based detection ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    /// Minimum run of repeated values flagged as a stuck sensor.
    pub persistence_length: Option<usize>,
    /// Maximum consecutive points filled when correcting flagged data.
    pub interpolation_limit: usize,
}

const DEFAULT_INTERPOLATION_LIMIT: usize = 10_000;

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            range_min: None,
            range_max: None,
            persistence_length: None,
            interpolation_limit: DEFAULT_INTERPOLATION_LIMIT,
        }
    }
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            range_min: profiled_env_f64(p, "EVENTMATCH_RANGE_MIN"),
            range_max: profiled_env_f64(p, "EVENTMATCH_RANGE_MAX"),
            persistence_length: profiled_env_usize(p, "EVENTMATCH_PERSISTENCE_LENGTH"),
            interpolation_limit: profiled_env_usize(p, "EVENTMATCH_INTERPOLATION_LIMIT")
                .unwrap_or(DEFAULT_INTERPOLATION_LIMIT),
        }
    }
}
