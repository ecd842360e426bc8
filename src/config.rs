use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{
    BROWSER_USER_AGENT, DEFAULT_BOARD_URL, DEFAULT_SITE_ORIGIN, MAX_POSTS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Board source
    pub board_url: String,
    pub site_origin: String,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub max_posts: usize,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset or empty values fall back to the
    /// production defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Board source
            board_url: env_or_default("BOARD_URL", DEFAULT_BOARD_URL),
            site_origin: env_or_default("SITE_ORIGIN", DEFAULT_SITE_ORIGIN),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 10)?),
            user_agent: env_or_default("FETCH_USER_AGENT", BROWSER_USER_AGENT),
            max_posts: parse_env("MAX_POSTS", MAX_POSTS)?,

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env("WEB_PORT", 5001)?,
        })
    }

    /// Defaults without touching the environment.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            board_url: DEFAULT_BOARD_URL.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            fetch_timeout: Duration::from_secs(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
            max_posts: MAX_POSTS,
            web_host: "127.0.0.1".to_string(),
            web_port: 5001,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("BOARD_URL", &self.board_url)?;
        validate_http_url("SITE_ORIGIN", &self.site_origin)?;
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "FETCH_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_posts == 0 || self.max_posts > MAX_POSTS {
            return Err(ConfigError::InvalidValue {
                name: "MAX_POSTS".to_string(),
                message: format!("must be between 1 and {MAX_POSTS}"),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "FETCH_USER_AGENT".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        name: name.to_string(),
        message: format!("'{value}' is not a valid URL: {e}"),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("must be an http(s) URL, got scheme '{}'", parsed.scheme()),
        });
    }
    Ok(())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse an integer variable, falling back to `default` when unset or blank.
fn parse_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = ParseIntError>,
{
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => {
            val.trim().parse().map_err(|source| ConfigError::ParseInt {
                name: name.to_string(),
                source,
            })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BOARD_URL",
        "SITE_ORIGIN",
        "FETCH_TIMEOUT_SECS",
        "FETCH_USER_AGENT",
        "MAX_POSTS",
        "WEB_HOST",
        "WEB_PORT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_is_empty() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.board_url, DEFAULT_BOARD_URL);
        assert_eq!(config.site_origin, DEFAULT_SITE_ORIGIN);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.max_posts, 20);
        assert_eq!(config.web_host, "0.0.0.0");
        assert_eq!(config.web_port, 5001);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("WEB_PORT", "8088");
        std::env::set_var("FETCH_TIMEOUT_SECS", "3");
        std::env::set_var("MAX_POSTS", "5");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.web_port, 8088);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.max_posts, 5);
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_rejected() {
        clear_env();
        std::env::set_var("WEB_PORT", "not-a-port");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::ParseInt { .. })));
    }

    #[test]
    #[serial]
    fn test_numeric_values_are_trimmed_and_blank_means_default() {
        clear_env();
        std::env::set_var("WEB_PORT", " 8089 ");
        std::env::set_var("MAX_POSTS", "   ");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.web_port, 8089);
        assert_eq!(config.max_posts, MAX_POSTS);
    }

    #[test]
    #[serial]
    fn test_parse_error_names_the_variable() {
        clear_env();
        std::env::set_var("MAX_POSTS", "-1");

        let result = Config::from_env();
        clear_env();

        match result {
            Err(ConfigError::ParseInt { name, .. }) => assert_eq!(name, "MAX_POSTS"),
            other => panic!("expected ParseInt error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            max_posts: 21,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_posts: 0,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            fetch_timeout: Duration::ZERO,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            site_origin: "ftp://m.bobaedream.co.kr".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            board_url: "not a url".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }
}
