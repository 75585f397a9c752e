use std::path::{Path, PathBuf};

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_LOG_FILE: &str = "obras-dashboard.log";

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the construction backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// File the tracing subscriber appends to
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl Config {
    /// Read `API_BASE_URL` and `LOG_FILE` from the process environment.
    /// A `.env` file in the working directory is merged in first when present;
    /// variables already set in the environment win over it.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from explicit `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;

        Ok(config)
    }

    /// Apply command line overrides on top of the environment
    pub fn with_overrides(mut self, api_url: Option<String>, log_file: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self
    }

    /// Base URL without a trailing slash, ready to have paths appended
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        Config::from_vars(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = from_pairs(&[]);
        assert_eq!(config.api_base_url(), "http://127.0.0.1:8000");
        assert_eq!(config.log_file(), Path::new("obras-dashboard.log"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = from_pairs(&[("API_BASE_URL", "http://api.local:9000/")]);
        assert_eq!(config.api_base_url(), "http://api.local:9000");
    }

    #[test]
    fn command_line_overrides_environment() {
        let config = from_pairs(&[("API_BASE_URL", "http://env:1"), ("LOG_FILE", "env.log")])
            .with_overrides(Some("http://cli:2".to_string()), None);
        assert_eq!(config.api_base_url(), "http://cli:2");
        assert_eq!(config.log_file(), Path::new("env.log"));
    }
}
