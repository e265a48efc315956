use super::{ProviderError, Translator};
use crate::config::Config;
use crate::report::group_thousands;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

const PROVIDER: &str = "DeepL";
const TARGET_LANG: &str = "ES";

/// HTTP status DeepL uses for "character quota exceeded".
const QUOTA_EXCEEDED_STATUS: u16 = 456;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Character usage for the current DeepL billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeeplUsage {
    pub character_count: u64,
    #[serde(default)]
    pub character_limit: Option<u64>,
}

impl DeeplUsage {
    /// Characters left in the plan, when the plan has a limit.
    pub fn remaining(&self) -> Option<u64> {
        self.character_limit
            .filter(|limit| *limit > 0)
            .map(|limit| limit.saturating_sub(self.character_count))
    }
}

/// DeepL REST API client.
pub struct DeeplTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl DeeplTranslator {
    /// Create a client without contacting DeepL.
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration and report the remaining quota.
    ///
    /// Fails with [`crate::config::ConfigError::MissingCredential`] when no
    /// API key is configured, and with the HTTP error when the usage query fails.
    pub async fn connect(client: reqwest::Client, config: &Config) -> Result<Self> {
        let api_key = config.require_deepl_api_key()?;
        let translator = Self::new(client, config.deepl_base_url(api_key), api_key);

        let usage = translator.usage().await?;
        if let (Some(limit), Some(remaining)) = (usage.character_limit, usage.remaining()) {
            info!(
                "DeepL usage: {}/{} chars ({} remaining)",
                group_thousands(usage.character_count),
                group_thousands(limit),
                group_thousands(remaining)
            );
        }

        Ok(translator)
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }

    /// Query the account's character usage.
    pub async fn usage(&self) -> Result<DeeplUsage> {
        let response = self
            .client
            .get(format!("{}/v2/usage", self.api_url))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .context("Failed to send usage request to DeepL API")?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .context("Failed to parse DeepL usage response")
    }
}

#[async_trait]
impl Translator for DeeplTranslator {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn translate_text(&self, text: &str) -> Result<String> {
        let request = TranslateRequest {
            text: [text],
            target_lang: TARGET_LANG,
        };

        let response = self
            .client
            .post(format!("{}/v2/translate", self.api_url))
            .header("Authorization", self.auth_header())
            .json(&request)
            .send()
            .await
            .context("Failed to send translation request to DeepL API")?;

        let response = check_status(response).await?;

        let body: TranslateResponse = response
            .json()
            .await
            .context("Failed to parse DeepL translation response")?;

        let translated = body
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or(ProviderError::EmptyResponse { provider: PROVIDER })?;

        Ok(translated)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.as_u16() == QUOTA_EXCEEDED_STATUS {
        return Err(ProviderError::QuotaExceeded { provider: PROVIDER });
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
    Err(ProviderError::Http {
        provider: PROVIDER,
        status: status.as_u16(),
        body,
    })
}
