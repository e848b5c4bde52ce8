use std::env;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(#[from] ParseIntError),
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}

/// Runtime configuration, read from the environment (a local `.env`
/// file is honored by main before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url =
            env::var("PAWDECK_API_URL").unwrap_or_else(|_| "http://localhost:4001/api".to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        let request_timeout_secs = env::var("PAWDECK_REQUEST_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()?;

        Ok(Config {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: the cases share process-wide env vars and must not run
    // in parallel with each other.
    #[test]
    fn config_reads_the_environment() {
        env::remove_var("PAWDECK_API_URL");
        env::remove_var("PAWDECK_REQUEST_TIMEOUT");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:4001/api");
        assert_eq!(config.request_timeout_secs, 30);

        env::set_var("PAWDECK_API_URL", "https://api.pawdeck.io/api/");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url, "https://api.pawdeck.io/api");

        env::set_var("PAWDECK_API_URL", "ftp://api.pawdeck.io");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidApiUrl(_))
        ));
        env::remove_var("PAWDECK_API_URL");

        env::set_var("PAWDECK_REQUEST_TIMEOUT", "whenever");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidTimeout(_))
        ));
        env::remove_var("PAWDECK_REQUEST_TIMEOUT");
    }
}
