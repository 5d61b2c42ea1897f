//! Runtime configuration for hosts of the view model.
//!
//! The base URL is the only value that differs between deployments. It comes
//! from `EXPENSE_API_URL`; `EXPENSE_RECONCILE` picks how the snapshot catches
//! up after a successful mutation.

use std::str::FromStr;

use thiserror::Error;

pub const API_URL_VAR: &str = "EXPENSE_API_URL";
pub const RECONCILE_VAR: &str = "EXPENSE_RECONCILE";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http:// or https:// URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be \"refetch\" or \"apply\", got {value:?}")]
    InvalidReconcile { var: &'static str, value: String },
}

/// How the snapshot is brought up to date after a create, update, or delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcileStrategy {
    /// Reload the whole collection.
    #[default]
    Refetch,
    /// Insert, replace, or remove the affected record in a fresh copy of the
    /// snapshot using the server's response; no extra round trip.
    ApplyReturned,
}

impl FromStr for ReconcileStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refetch" => Ok(ReconcileStrategy::Refetch),
            "apply" | "apply-returned" => Ok(ReconcileStrategy::ApplyReturned),
            _ => Err(ConfigError::InvalidReconcile {
                var: RECONCILE_VAR,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub reconcile: ReconcileStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            reconcile: ReconcileStrategy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys fall back to
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match get(API_URL_VAR) {
            Some(url) => {
                let url = url.trim().to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidUrl {
                        var: API_URL_VAR,
                        value: url,
                    });
                }
                url
            }
            None => DEFAULT_API_URL.to_string(),
        };

        let reconcile = match get(RECONCILE_VAR) {
            Some(value) => value.parse()?,
            None => ReconcileStrategy::default(),
        };

        Ok(Self { base_url, reconcile })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn reads_both_variables() {
        let config = Config::from_lookup(lookup(&[
            (API_URL_VAR, "https://finance.example.com"),
            (RECONCILE_VAR, "apply"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://finance.example.com");
        assert_eq!(config.reconcile, ReconcileStrategy::ApplyReturned);
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = Config::from_lookup(lookup(&[(API_URL_VAR, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn rejects_non_http_url() {
        let err = Config::from_lookup(lookup(&[(API_URL_VAR, "localhost:8000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = Config::from_lookup(lookup(&[(RECONCILE_VAR, "sometimes")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidReconcile {
                var: RECONCILE_VAR,
                value: "sometimes".to_string()
            }
        );
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!(" Apply-Returned ".parse::<ReconcileStrategy>(), Ok(ReconcileStrategy::ApplyReturned));
        assert_eq!("REFETCH".parse::<ReconcileStrategy>(), Ok(ReconcileStrategy::Refetch));
        let err = "never".parse::<ReconcileStrategy>().unwrap_err();
        assert_eq!(err.to_string(), "EXPENSE_RECONCILE must be \"refetch\" or \"apply\", got \"never\"");
    }
}
