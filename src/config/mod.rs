// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{AnalyzerError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Conventional variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Conventional variable holding an alternate API base URL.
pub const API_BASE_ENV: &str = "OPENAI_API_BASE";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `OPENAI_API_KEY` / `OPENAI_API_BASE` (highest)
    /// 2. `VISION_ASK_*` environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the binary.
    pub fn load() -> Result<Self> {
        Self::load_from(
            &Self::default_config_path(),
            non_empty_env(API_KEY_ENV),
            non_empty_env(API_BASE_ENV),
        )
    }

    /// Same as [`AppConfig::load`] with the file path and the conventional
    /// OpenAI variables supplied by the caller.
    pub fn load_from(
        config_path: &str,
        api_key: Option<String>,
        api_base: Option<String>,
    ) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(config_path).required(false))
            // Override with environment variables (e.g. VISION_ASK_OPENAI__MODEL)
            .add_source(
                Environment::with_prefix("VISION_ASK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("openai.api_key", api_key)?
            .set_override_option("openai.api_base_url", api_base)?
            .build()
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AnalyzerError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vision-ask")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load_from("/nonexistent/vision-ask", None, None).unwrap();

        assert!(config.openai.api_key.is_none());
        assert_eq!(config.openai.api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai.model, "o4-mini");
        assert_eq!(config.openai.max_completion_tokens, 500);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_openai_variables_override_defaults() {
        let config = AppConfig::load_from(
            "/nonexistent/vision-ask",
            Some("sk-test".to_string()),
            Some("http://localhost:1234/v1".to_string()),
        )
        .unwrap();

        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai.api_base_url, "http://localhost:1234/v1");
    }

    #[test]
    fn test_config_file_is_read() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[openai]\nmodel = \"gpt-4o\"\nmax_completion_tokens = 64").unwrap();
        writeln!(file, "[logging]\nformat = \"json\"").unwrap();

        let config =
            AppConfig::load_from(file.path().to_str().unwrap(), None, None).unwrap();

        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.max_completion_tokens, 64);
        assert_eq!(config.logging.format, "json");
        // untouched keys keep their defaults
        assert_eq!(config.openai.timeout_seconds, 300);
    }

    #[test]
    fn test_debug_impl_masks_key() {
        let config = OpenAiConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..Default::default()
        };

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("sk-very-secret"));
    }
}
