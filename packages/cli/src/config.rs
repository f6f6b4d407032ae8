// ABOUTME: Environment-driven configuration for the service binaries
// ABOUTME: Port, CORS origin and dataset path with validated parsing

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("GROQ_API_KEY not found in environment")]
    MissingApiKey,
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub dataset_path: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `PORT` falls back to the service's default; `CORS_ORIGIN` defaults to
    /// any origin; `HIVEMIND_DATASET_PATH` defaults to the bundled dataset
    /// filename in the working directory.
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| default_port.to_string());
        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let dataset_path = env::var("HIVEMIND_DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("easyshare_data.csv"));

        Ok(Config {
            port,
            cors_origin,
            dataset_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment mutation is process-global; serialize these tests.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_from_env_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::remove_var("PORT");
        env::remove_var("CORS_ORIGIN");
        env::remove_var("HIVEMIND_DATASET_PATH");

        let config = Config::from_env(8000).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.dataset_path, PathBuf::from("easyshare_data.csv"));
    }

    #[test]
    fn test_config_from_env_with_custom_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("PORT", "9005");
        env::set_var("CORS_ORIGIN", "https://app.example.com");
        env::set_var("HIVEMIND_DATASET_PATH", "/data/survey.csv");

        let config = Config::from_env(8000).unwrap();

        assert_eq!(config.port, 9005);
        assert_eq!(config.cors_origin, "https://app.example.com");
        assert_eq!(config.dataset_path, PathBuf::from("/data/survey.csv"));

        env::remove_var("PORT");
        env::remove_var("CORS_ORIGIN");
        env::remove_var("HIVEMIND_DATASET_PATH");
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(8000),
            Err(ConfigError::InvalidPort(_))
        ));

        env::set_var("PORT", "0");
        assert!(matches!(
            Config::from_env(8000),
            Err(ConfigError::PortOutOfRange(0))
        ));
        env::remove_var("PORT");
    }
}
