use crate::error::{Error, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const BASE_URL_VAR: &str = "LISTINGS_BASE_URL";
pub const TIMEOUT_VAR: &str = "LISTINGS_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the listing backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Read `LISTINGS_BASE_URL` and `LISTINGS_TIMEOUT_SECS`, falling back
    /// to defaults for unset variables. Call `dotenvy::dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line values on top of the environment
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(secs) = timeout_secs {
            if secs == 0 {
                return Err(Error::Config("timeout must be at least one second".to_string()));
            }
            self.timeout = Duration::from_secs(secs);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("{} is not a valid URL: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "{} must be an http or https URL",
                self.base_url
            )));
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(Error::Config(format!(
            "{} must be a positive number of seconds, got {:?}",
            TIMEOUT_VAR, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn reads_environment_values() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://listings.example.com"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://listings.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_timeout() {
        for raw in ["0", "-1", "soon"] {
            let result = Config::from_lookup(lookup(&[(TIMEOUT_VAR, raw)]));
            assert!(matches!(result, Err(Error::Config(_))), "accepted {:?}", raw);
        }
    }

    #[test]
    fn rejects_bad_base_url() {
        for raw in ["localhost", "ftp://example.com"] {
            let result = Config::from_lookup(lookup(&[(BASE_URL_VAR, raw)]));
            assert!(matches!(result, Err(Error::Config(_))), "accepted {:?}", raw);
        }
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config::from_lookup(lookup(&[(TIMEOUT_VAR, "5")]))
            .unwrap()
            .with_overrides(Some("http://10.0.0.2:9000".to_string()), Some(12))
            .unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.timeout, Duration::from_secs(12));

        let unchanged = Config::from_lookup(lookup(&[])).unwrap().with_overrides(None, None).unwrap();
        assert_eq!(unchanged.base_url, DEFAULT_BASE_URL);

        assert!(Config::from_lookup(lookup(&[]))
            .unwrap()
            .with_overrides(None, Some(0))
            .is_err());
    }
}
