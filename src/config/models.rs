//! Configuration data structures for the adlens service.
//!
//! This module defines the schema for the application settings, including
//! server parameters, image fetching limits, and per-provider API specifics.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote image download settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// OpenAI provider settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Gemini provider settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes. Inline data URIs
    /// inflate images by ~33%, so this is well above the image cap.
    /// Default: `52428800` (50MB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Settings for downloading remote creative images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Timeout for a single image GET, in seconds.
    /// Default: `10`
    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u64,

    /// Maximum accepted image payload in bytes.
    /// Default: `20971520` (20MB, the Gemini inline-data limit)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

/// Settings for the OpenAI chat completions provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL for the OpenAI API.
    /// Default: `https://api.openai.com/v1`
    #[serde(default = "default_openai_base_url")]
    pub api_base_url: String,

    /// Model identifier for creative analysis.
    /// Default: `gpt-4o-mini`
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Response length cap in tokens.
    /// Default: `400`
    #[serde(default = "default_openai_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    /// Default: `0.7`
    #[serde(default = "default_openai_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    /// Default: `120`
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,

    /// API key. Sourced from `OPENAI_API_KEY` when unset here.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Settings for the Gemini generateContent provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Gemini generative language API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_gemini_base_url")]
    pub api_base_url: String,

    /// Model identifier for creative analysis.
    /// Default: `gemini-2.5-flash`
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Request timeout in seconds.
    /// Default: `120`
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,

    /// API key. Sourced from `GEMINI_API_KEY` when unset here.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Low-information replies that trigger the terse reply guard,
    /// compared case-insensitively against the trimmed summary.
    #[serde(default = "default_fallback_phrases")]
    pub fallback_phrases: Vec<String>,

    /// Replacement sentence substituted when the guard fires.
    #[serde(default = "default_fallback_summary")]
    pub fallback_summary: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_fetch_timeout(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_base_url(),
            model: default_openai_model(),
            max_tokens: default_openai_max_tokens(),
            temperature: default_openai_temperature(),
            timeout_seconds: default_provider_timeout(),
            api_key: None,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_seconds: default_provider_timeout(),
            api_key: None,
            fallback_phrases: default_fallback_phrases(),
            fallback_summary: default_fallback_summary(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_max_image_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_max_tokens() -> u32 {
    400
}

fn default_openai_temperature() -> f32 {
    0.7
}

fn default_provider_timeout() -> u64 {
    120
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_fallback_phrases() -> Vec<String> {
    ["ok", "fine", "good", "looks fine"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_fallback_summary() -> String {
    "The image looks aligned and acceptable.".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
