// Configuration module

mod models;

pub use models::*;

use crate::error::Result;
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Load configuration with an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (prefix: ADLENS_)
            .add_source(Environment::with_prefix("ADLENS").separator("__"))
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;

        // The canonical provider key variables win only when the layered
        // sources left the keys unset.
        if config.openai.api_key.is_none() {
            config.openai.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if config.gemini.api_key.is_none() {
            config.gemini.api_key = std::env::var("GEMINI_API_KEY").ok();
        }

        Ok(config)
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".adlens")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.fetch.timeout_seconds, 10);
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.max_tokens, 400);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.fallback_phrases.len(), 4);
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[gemini]\nmodel = \"gemini-2.0-flash\"\n"
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        // Untouched sections keep their defaults
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.openai.model, "gpt-4o-mini");
    }
}
