use anyhow::{Context, Result};
use std::time::Duration;
use thiserror::Error;

/// Free-plan DeepL keys carry this suffix and must use the free API host.
const DEEPL_FREE_KEY_SUFFIX: &str = ":fx";
const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com";
const DEEPL_PRO_API_URL: &str = "https://api.deepl.com";
const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com";

/// Fatal configuration problems, detected before any provider call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} environment variable not set ({hint})")]
    MissingCredential {
        var: &'static str,
        hint: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    // DeepL
    pub deepl_api_key: Option<String>,
    pub deepl_api_url: Option<String>,

    // Google Translate
    pub google_translate_url: String,

    // HTTP
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // DeepL - only required when DeepL is the selected provider
            deepl_api_key: std::env::var("DEEPL_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            deepl_api_url: std::env::var("DEEPL_API_URL").ok(),

            // Google Translate
            google_translate_url: std::env::var("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|_| GOOGLE_TRANSLATE_URL.to_string()),

            // HTTP
            http_timeout_secs: match std::env::var("TRANSLATE_HTTP_TIMEOUT_SECS") {
                Ok(v) => v
                    .parse()
                    .context("TRANSLATE_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
                Err(_) => 30,
            },
        })
    }

    /// The DeepL API key, or a [`ConfigError`] explaining how to obtain one.
    pub fn require_deepl_api_key(&self) -> Result<&str, ConfigError> {
        self.deepl_api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential {
                var: "DEEPL_API_KEY",
                hint: "get a free API key at https://www.deepl.com/pro-api, or pass --google",
            })
    }

    /// Base URL for DeepL requests: the explicit override if set, otherwise the
    /// free or pro host depending on the key.
    pub fn deepl_base_url(&self, api_key: &str) -> String {
        match &self.deepl_api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if api_key.ends_with(DEEPL_FREE_KEY_SUFFIX) => DEEPL_FREE_API_URL.to_string(),
            None => DEEPL_PRO_API_URL.to_string(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Build the shared HTTP client used by every provider call.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http_timeout())
            .build()
            .context("Failed to build HTTP client")
    }
}
