use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::models::{CookieAuditReport, PolicyReport};

/// Root configuration structure, deserialized from `.privacy-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Exit-code policy.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Thresholds at which a finished report fails the run (exit code 1).
///
/// The analysis itself is unaffected; the gate is applied to the
/// report after rendering.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyConfig {
    /// Fail `analyze` runs whose risk level reaches this. Defaults to `high`.
    #[serde(default = "default_fail_level")]
    pub fail_level: FailLevel,
    /// Fail `audit` runs graded at or below this letter. Defaults to `f`.
    #[serde(default = "default_fail_grade")]
    pub fail_grade: FailGrade,
}

fn default_fail_level() -> FailLevel {
    FailLevel::High
}

fn default_fail_grade() -> FailGrade {
    FailGrade::F
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            fail_level: default_fail_level(),
            fail_grade: default_fail_grade(),
        }
    }
}

/// Risk level at which an `analyze` run fails, or `never` to disable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailLevel {
    Low,
    Medium,
    High,
    Never,
}

impl FailLevel {
    fn min_rank(self) -> Option<u8> {
        match self {
            FailLevel::Low => Some(0),
            FailLevel::Medium => Some(1),
            FailLevel::High => Some(2),
            FailLevel::Never => None,
        }
    }
}

/// Worst acceptable audit grade, or `never` to disable the gate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailGrade {
    A,
    B,
    C,
    D,
    F,
    Never,
}

impl FailGrade {
    fn min_rank(self) -> Option<u8> {
        match self {
            FailGrade::A => Some(0),
            FailGrade::B => Some(1),
            FailGrade::C => Some(2),
            FailGrade::D => Some(3),
            FailGrade::F => Some(4),
            FailGrade::Never => None,
        }
    }
}

/// Load the exit-code policy configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.privacy-checkr/config.toml`
/// 3. `~/.config/privacy-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = Path::new(".privacy-checkr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("privacy-checkr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

/// `analyze` gate: true when the report's risk level reaches the
/// configured fail level.
pub fn breaches_risk_policy(config: &Config, report: &PolicyReport) -> bool {
    config
        .policy
        .fail_level
        .min_rank()
        .map_or(false, |min| report.risk_level.rank() >= min)
}

/// `audit` gate: true when the report's grade is at or below the
/// configured fail grade.
pub fn breaches_grade_policy(config: &Config, report: &CookieAuditReport) -> bool {
    config
        .policy
        .fail_grade
        .min_rank()
        .map_or(false, |min| report.grade.rank() >= min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::audit::grade_cookie_truthfulness;
    use crate::models::ConsentState;
    use crate::policy::analyzer::analyze_policy_text;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.policy.fail_level, FailLevel::High);
        assert_eq!(config.policy.fail_grade, FailGrade::F);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[policy]\nfail-level = \"medium\"\n").unwrap();
        assert_eq!(config.policy.fail_level, FailLevel::Medium);
        assert_eq!(config.policy.fail_grade, FailGrade::F);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.policy.fail_level, FailLevel::High);
    }

    #[test]
    fn test_risk_gate_respects_threshold() {
        let low_report = analyze_policy_text("");
        let config = Config::default();
        assert!(!breaches_risk_policy(&config, &low_report));

        let strict: Config = toml::from_str("[policy]\nfail-level = \"low\"\n").unwrap();
        assert!(breaches_risk_policy(&strict, &low_report));

        let never: Config = toml::from_str("[policy]\nfail-level = \"never\"\n").unwrap();
        assert!(!breaches_risk_policy(&never, &low_report));
    }

    #[test]
    fn test_grade_gate_respects_threshold() {
        let failing =
            grade_cookie_truthfulness("", "_ga, doubleclick", ConsentState::BeforeConsent);
        let config = Config::default();
        assert!(breaches_grade_policy(&config, &failing));

        let clean = grade_cookie_truthfulness(
            "We use analytics and advertising partners; opt-out anytime.",
            "_ga",
            ConsentState::AfterAccept,
        );
        assert!(!breaches_grade_policy(&config, &clean));
    }
}
