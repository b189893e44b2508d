//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// App configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Display name given to the mock user.
    pub user_name: String,
    /// Simulated "thinking" pause before advisor replies.
    pub advisor_delay: Duration,
    /// Directory for a rolling log file. Logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_name: "Ahmed".to_string(),
            advisor_delay: Duration::ZERO,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load from `MASAR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let user_name = lookup("MASAR_USER_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.user_name);

        let advisor_delay = match lookup("MASAR_ADVISOR_DELAY_MS") {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        key: "MASAR_ADVISOR_DELAY_MS".into(),
                        message: e.to_string(),
                    }
                })?;
                Duration::from_millis(ms)
            }
            None => defaults.advisor_delay,
        };

        let log_dir = lookup("MASAR_LOG_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            user_name,
            advisor_delay,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.user_name, "Ahmed");
        assert_eq!(config.advisor_delay, Duration::ZERO);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MASAR_USER_NAME", "Mona"),
            ("MASAR_ADVISOR_DELAY_MS", "1500"),
            ("MASAR_LOG_DIR", "/tmp/masar"),
        ]))
        .unwrap();
        assert_eq!(config.user_name, "Mona");
        assert_eq!(config.advisor_delay, Duration::from_millis(1500));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/masar")));
    }

    #[test]
    fn blank_name_keeps_default() {
        let config = AppConfig::from_lookup(lookup(&[("MASAR_USER_NAME", "  ")])).unwrap();
        assert_eq!(config.user_name, "Ahmed");
    }

    #[test]
    fn invalid_delay_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("MASAR_ADVISOR_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "MASAR_ADVISOR_DELAY_MS"
        ));
    }
}
