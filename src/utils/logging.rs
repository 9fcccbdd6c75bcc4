//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a helper that keeps API
//! keys and bearer tokens out of log output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{AnalyzerError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Lazily initialized pattern for OpenAI-style secret keys (`sk-...`, `sk-proj-...`)
static API_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

/// Lazily initialized pattern for `Bearer <token>` headers
static BEARER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether [`scrub`] should redact. Set once by [`init`].
static SANITIZE_ENABLED: OnceLock<bool> = OnceLock::new();

fn api_key_regex() -> &'static Regex {
    API_KEY_REGEX.get_or_init(|| {
        Regex::new(r"\bsk-[A-Za-z0-9_\-]{8,}").expect("Invalid regex pattern")
    })
}

fn bearer_regex() -> &'static Regex {
    BEARER_REGEX.get_or_init(|| {
        Regex::new(r"Bearer\s+[A-Za-z0-9_\-\.=]+").expect("Invalid regex pattern")
    })
}

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs.
/// - `compact`: Single-line output.
/// - `pretty` (default): Human-readable, colorized output.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AnalyzerError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let _ = SANITIZE_ENABLED.set(config.sanitize_secrets);

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_target(false))
            .try_init(),
    };

    installed.map_err(|e| AnalyzerError::Internal(format!("Failed to install logger: {}", e)))
}

/// Replaces API keys and bearer tokens with redaction placeholders.
///
/// Used on upstream error bodies and transport errors before they reach a
/// log sink, since some gateways echo the `Authorization` header back.
pub fn sanitize(input: &str) -> String {
    let result = api_key_regex().replace_all(input, "[REDACTED_API_KEY]");
    bearer_regex()
        .replace_all(&result, "Bearer [REDACTED_TOKEN]")
        .into_owned()
}

/// [`sanitize`] unless redaction was switched off in the logging config.
pub fn scrub(input: &str) -> String {
    if *SANITIZE_ENABLED.get().unwrap_or(&true) {
        sanitize(input)
    } else {
        input.to_string()
    }
}
