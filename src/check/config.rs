//! Checker configuration
//!
//! Loaded from JSON; every field is optional and falls back to its default.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CheckError, CheckResult};
use crate::observability::{Event, Logger, Severity};

/// Container sampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Never check container items
    O0,
    /// Check one item per container
    #[default]
    O1,
    /// Check `floor(log2(len)) + 1` items per container
    Ologn,
    /// Check every item
    On,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::O0 => "O0",
            Strategy::O1 => "O1",
            Strategy::Ologn => "Ologn",
            Strategy::On => "On",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much a violation message says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// No cause, short reprs
    Minimal,
    #[default]
    Default,
    /// Cause with untruncated reprs
    Maximal,
}

impl Verbosity {
    /// Maximum representation length, `None` if unbounded
    pub fn repr_limit(&self) -> Option<usize> {
        match self {
            Verbosity::Minimal => Some(32),
            Verbosity::Default => Some(96),
            Verbosity::Maximal => None,
        }
    }

    /// Whether violation messages include the diagnosed cause
    pub fn includes_cause(&self) -> bool {
        !matches!(self, Verbosity::Minimal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Minimal => "Minimal",
            Verbosity::Default => "Default",
            Verbosity::Maximal => "Maximal",
        }
    }
}

/// Checker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Container sampling strategy (default: O1)
    #[serde(default)]
    pub strategy: Strategy,

    /// Violation verbosity (default: Default)
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Maximum hint nesting depth (default: 64)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Fixed sampling seed; random per check when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Threshold of the logger owned by each engine built from this config (default: warn)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_max_depth() -> usize {
    64
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            verbosity: Verbosity::default(),
            max_depth: default_max_depth(),
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl CheckConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> CheckResult<Self> {
        let config: CheckConfig =
            serde_json::from_str(json).map_err(|e| CheckError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> CheckResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            CheckError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&json)?;

        let shown = path.display().to_string();
        Logger::new(config.log_level).log(
            Event::ConfigLoaded,
            &[
                ("path", shown.as_str()),
                ("strategy", config.strategy.as_str()),
                ("verbosity", config.verbosity.as_str()),
            ],
        );
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_log_level(mut self, log_level: Severity) -> Self {
        self.log_level = log_level;
        self
    }

    /// Reject configurations no engine can honour.
    pub fn validate(&self) -> CheckResult<()> {
        if self.max_depth == 0 {
            return Err(CheckError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.strategy, Strategy::O1);
        assert_eq!(config.verbosity, Verbosity::Default);
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, Severity::Warn);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CheckConfig::from_json_str(r#"{"strategy": "On", "seed": 7}"#).unwrap();
        assert_eq!(config.strategy, Strategy::On);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn test_log_level_is_lowercase() {
        let config = CheckConfig::from_json_str(r#"{"log_level": "trace"}"#).unwrap();
        assert_eq!(config.log_level, Severity::Trace);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = CheckConfig::from_json_str(r#"{"strategy": "O2"}"#).unwrap_err();
        assert!(matches!(err, CheckError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = CheckConfig::from_json_str(r#"{"max_depth": 0}"#).unwrap_err();
        assert!(matches!(err, CheckError::InvalidConfig(_)));
    }

    #[test]
    fn test_verbosity_limits() {
        assert_eq!(Verbosity::Minimal.repr_limit(), Some(32));
        assert_eq!(Verbosity::Default.repr_limit(), Some(96));
        assert_eq!(Verbosity::Maximal.repr_limit(), None);
        assert!(!Verbosity::Minimal.includes_cause());
        assert!(Verbosity::Maximal.includes_cause());
    }

    #[test]
    fn test_builder() {
        let config = CheckConfig::default()
            .with_strategy(Strategy::Ologn)
            .with_verbosity(Verbosity::Maximal)
            .with_max_depth(8)
            .with_seed(3);
        assert_eq!(config.strategy, Strategy::Ologn);
        assert_eq!(config.verbosity, Verbosity::Maximal);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.seed, Some(3));
    }
}
