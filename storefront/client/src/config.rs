use std::{env, fmt::Display, str::FromStr};

use reqwest::Url;
use tracing::{info, warn};

use crate::error::{Error, Result};

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub auth_url: String,
    pub cookie: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let backend_url: String = try_load("BACKEND_URL", DEFAULT_BACKEND_URL)?;
        let backend_url = normalize_url("BACKEND_URL", &backend_url)?;

        let auth_default = format!("{backend_url}/api/auth");
        let auth_url: String = try_load("AUTH_URL", &auth_default)?;
        let auth_url = normalize_url("AUTH_URL", &auth_url)?;

        let cookie = var("MEDICA_COOKIE").ok().filter(|c| !c.trim().is_empty());

        Ok(Self {
            backend_url,
            auth_url,
            cookie,
        })
    }

    pub fn new(backend_url: &str, auth_url: &str) -> Result<Self> {
        Ok(Self {
            backend_url: normalize_url("backend_url", backend_url)?,
            auth_url: normalize_url("auth_url", auth_url)?,
            cookie: None,
        })
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

fn var(key: &str) -> std::result::Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

/// Reads `key` from the environment, falling back to `default`.
pub fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            Error::Config(format!("invalid {key}: {e}"))
        })
}

fn normalize_url(key: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    Url::parse(trimmed).map_err(|e| Error::Config(format!("{key} is not a valid url: {e}")))?;

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("http://localhost:5000/", "http://auth.local/api/auth/").unwrap();

        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.auth_url, "http://auth.local/api/auth");
        assert!(config.cookie.is_none());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = Config::new("not a url", "http://auth.local");

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("backend_url")));
    }

    #[test]
    fn test_with_cookie() {
        let config = Config::new("http://localhost:5000", "http://localhost:5000/api/auth")
            .unwrap()
            .with_cookie("better-auth.session_token=abc");

        assert_eq!(config.cookie.as_deref(), Some("better-auth.session_token=abc"));
    }
}
