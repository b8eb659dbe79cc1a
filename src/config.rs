// Config module for remote lookup settings

use crate::constants;
use std::time::Duration;

/// Settings for the remote registry client.
///
/// Built once by the caller and handed to `ModrinthClient::new`; nothing here
/// is read from global state after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub api_url: String,
    pub site_url: String,
    pub timeout: Duration,
    pub enabled: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            site_url: constants::DEFAULT_SITE_URL.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
            enabled: true,
        }
    }
}

impl LookupConfig {
    /// Read overrides from `MODFIX_API_URL`, `MODFIX_SITE_URL`,
    /// `MODFIX_TIMEOUT_SECS` and `MODFIX_OFFLINE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = var("MODFIX_API_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);
        let site_url = var("MODFIX_SITE_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.site_url);
        let timeout = var("MODFIX_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let enabled = !var("MODFIX_OFFLINE").is_some_and(|v| is_truthy(&v));

        Self {
            api_url,
            site_url,
            timeout,
            enabled,
        }
    }

    pub fn offline(mut self) -> Self {
        self.enabled = false;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    !value.is_empty() && value != "0" && value != "false"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> LookupConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LookupConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config, LookupConfig::default());
        assert!(config.enabled);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_env_overrides() {
        let config = config_from(&[
            ("MODFIX_API_URL", "http://localhost:8080/v2/"),
            ("MODFIX_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(config.api_url, "http://localhost:8080/v2");
        assert_eq!(config.site_url, constants::DEFAULT_SITE_URL);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_offline_flag_values() {
        assert!(!config_from(&[("MODFIX_OFFLINE", "1")]).enabled);
        assert!(!config_from(&[("MODFIX_OFFLINE", "true")]).enabled);
        assert!(config_from(&[("MODFIX_OFFLINE", "0")]).enabled);
        assert!(config_from(&[("MODFIX_OFFLINE", "false")]).enabled);
        assert!(config_from(&[("MODFIX_OFFLINE", "")]).enabled);
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = config_from(&[("MODFIX_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
