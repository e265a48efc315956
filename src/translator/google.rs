use super::{ProviderError, Translator};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

const PROVIDER: &str = "Google Translate";

/// Keyless Google Translate client using the public `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.google_translate_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn translate_text(&self, text: &str) -> Result<String> {
        let params = [
            ("client", "gtx"),
            ("sl", "en"),
            ("tl", "es"),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&params)
            .send()
            .await
            .context("Failed to send request to Google Translate")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let raw: Value = response
            .json()
            .await
            .context("Failed to parse Google Translate response")?;

        Ok(parse_google_response(&raw)?)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The payload is a nested array: `[[["Hola.", "Hello.", ...], [" Adiós", " Bye", ...]], ...]`.
/// The translation is the concatenation of the first string of each segment.
fn parse_google_response(raw: &Value) -> Result<String, ProviderError> {
    let translated: String = raw
        .get(0)
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .filter_map(|segment| segment.get(0).and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if translated.is_empty() {
        return Err(ProviderError::EmptyResponse { provider: PROVIDER });
    }
    Ok(translated)
}
