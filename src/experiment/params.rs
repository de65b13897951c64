use std::{fmt::Display, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    adaptive::AdaptiveConstants,
    error::{MaximizationError, validate_unit_interval},
};

/// Number of independent trials per algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialCounts {
    pub random: usize,
    pub random_prefix: usize,
    pub greedy: usize,
    pub random_greedy: usize,
    pub lazy_greedy: usize,
    pub adaptive_nonmonotone: usize,
    pub adaptive_monotone: usize,
    pub blits: usize,
    pub fantom: usize,
}

impl Default for TrialCounts {
    fn default() -> Self {
        TrialCounts {
            random: 10,
            random_prefix: 10,
            greedy: 1,
            random_greedy: 10,
            lazy_greedy: 10,
            adaptive_nonmonotone: 10,
            adaptive_monotone: 1,
            blits: 5,
            fantom: 1,
        }
    }
}

/// Every tunable of an experiment run. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub epsilon: f64,
    pub delta: f64,
    /// Sieve passes per OPT guess.
    pub blits_rounds: usize,
    /// Margin decay of the random lazy greedy pool.
    pub lazy_delta: f64,
    pub nonmonotone: AdaptiveConstants,
    pub monotone: AdaptiveConstants,
    pub trials: TrialCounts,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            epsilon: 0.25,
            delta: 0.1,
            blits_rounds: 10,
            lazy_delta: 0.01,
            nonmonotone: AdaptiveConstants::nonmonotone(),
            monotone: AdaptiveConstants::monotone(),
            trials: TrialCounts::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(MaximizationError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "Malformed parameters: {e}"),
            Self::Invalid(e) => write!(f, "Invalid parameters: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<MaximizationError> for ConfigError {
    fn from(e: MaximizationError) -> Self {
        Self::Invalid(e)
    }
}

impl Parameters {
    /// Checks the ranges that do not depend on the instance.
    pub fn validate(&self) -> Result<(), MaximizationError> {
        validate_unit_interval("epsilon", self.epsilon)?;
        validate_unit_interval("delta", self.delta)?;
        validate_unit_interval("lazy_delta", self.lazy_delta)?;
        if self.blits_rounds == 0 {
            return Err(MaximizationError::InvalidConfiguration(
                "blits_rounds must be positive".into(),
            ));
        }
        for constants in [self.nonmonotone, self.monotone] {
            if constants.c2 <= 0.0 || constants.c3 < 0.0 {
                return Err(MaximizationError::InvalidConfiguration(format!(
                    "adaptive constants need c2 > 0 and c3 >= 0, got {constants:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let params: Parameters = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = Parameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.trials.blits, 5);
        assert_eq!(params.nonmonotone.c3, 3.0);
        assert_eq!(params.monotone.c1, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params = Parameters::from_json_str(r#"{"epsilon": 0.5, "trials": {"greedy": 3}}"#).unwrap();
        assert_eq!(params.epsilon, 0.5);
        assert_eq!(params.delta, 0.1);
        assert_eq!(params.trials.greedy, 3);
        assert_eq!(params.trials.random, 10);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(matches!(
            Parameters::from_json_str(r#"{"delta": 1.5}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Parameters::from_json_str(r#"{"blits_rounds": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Parameters::from_json_str("{epsilon"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Parameters::from_json_file("/nonexistent/params.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
