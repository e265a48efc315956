//! Translation providers.
//!
//! Each provider implements [`Translator::translate_text`] for a single
//! string; the shared [`Translator::translate_batch`] applies the
//! pass-through and capitalization rules and isolates per-item failures, so
//! both providers behave identically apart from the remote call itself.

mod deepl;
mod google;

pub use deepl::{DeeplTranslator, DeeplUsage};
pub use google::GoogleTranslator;

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Texts shorter than this (in characters) are returned untranslated.
const MIN_TRANSLATABLE_CHARS: usize = 3;

/// How much of a failing text to show in the warning.
const LOG_PREVIEW_CHARS: usize = 50;

/// Errors raised by a provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} API error ({status}): {body}")]
    Http {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} quota exceeded")]
    QuotaExceeded { provider: &'static str },

    #[error("{provider} response contained no translation")]
    EmptyResponse { provider: &'static str },

    #[error("translator returned {actual} results for a batch of {expected}")]
    BatchLength { expected: usize, actual: usize },
}

/// Which remote service to translate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    DeepL,
    Google,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::DeepL => "DeepL",
            Provider::Google => "Google Translate",
        }
    }
}

/// A remote English → Spanish translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable provider name for logs.
    fn name(&self) -> &'static str;

    /// Translate a single text with the remote provider.
    async fn translate_text(&self, text: &str) -> Result<String>;

    /// Translate texts one at a time, returning results in input order.
    ///
    /// Empty, URL-like and very short texts are passed through untouched. A
    /// failed item is logged and replaced by its original text; it never
    /// fails the batch.
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        let mut results = Vec::with_capacity(texts.len());

        for text in texts {
            if is_pass_through(text) {
                results.push(text.clone());
                continue;
            }

            match self.translate_text(text).await {
                Ok(translated) => results.push(repair_capitalization(text, translated)),
                Err(e) => {
                    warn!(
                        "{}: error translating '{}...': {:#}",
                        self.name(),
                        preview(text),
                        e
                    );
                    results.push(text.clone());
                }
            }
        }

        Ok(results)
    }
}

/// Set up the selected provider.
///
/// DeepL needs `DEEPL_API_KEY` and reports its remaining quota before
/// returning; Google needs no credential.
pub async fn connect(
    provider: Provider,
    client: reqwest::Client,
    config: &Config,
) -> Result<Box<dyn Translator>> {
    match provider {
        Provider::DeepL => Ok(Box::new(DeeplTranslator::connect(client, config).await?)),
        Provider::Google => Ok(Box::new(GoogleTranslator::new(client, config))),
    }
}

/// Whether a text should skip the provider entirely.
pub fn is_pass_through(text: &str) -> bool {
    text.trim().is_empty()
        || text.starts_with("http")
        || text.chars().count() < MIN_TRANSLATABLE_CHARS
}

/// Uppercase the first letter of `translated` when the original started
/// uppercase and the provider lowercased it.
pub fn repair_capitalization(original: &str, translated: String) -> String {
    let original_upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = translated.chars();
    match chars.next() {
        Some(first) if original_upper && first.is_lowercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => translated,
    }
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted provider: answers from a table, fails on anything else.
    struct TableTranslator {
        answers: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl TableTranslator {
        fn new(answers: &[(&str, &str)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for TableTranslator {
        fn name(&self) -> &'static str {
            "Table"
        }

        async fn translate_text(&self, text: &str) -> Result<String> {
            self.calls.lock().unwrap().push(text.to_string());
            self.answers
                .get(text)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no translation for '{}'", text))
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ==================== Pass-through Rules ====================

    #[test]
    fn test_pass_through_empty_and_whitespace() {
        assert!(is_pass_through(""));
        assert!(is_pass_through("   "));
        assert!(is_pass_through("\n\t"));
    }

    #[test]
    fn test_pass_through_urls() {
        assert!(is_pass_through("http://example.com"));
        assert!(is_pass_through("https://example.com/a/long/path"));
    }

    #[test]
    fn test_pass_through_short_text() {
        assert!(is_pass_through("AI"));
        assert!(is_pass_through("ñá"));
        assert!(!is_pass_through("Yes"));
    }

    #[test]
    fn test_pass_through_ordinary_text() {
        assert!(!is_pass_through("Welcome"));
        assert!(!is_pass_through("See http://example.com"));
    }

    // ==================== Capitalization Repair ====================

    #[test]
    fn test_repair_capitalization_uppercases_first_letter() {
        assert_eq!(
            repair_capitalization("Hello world", "hola mundo".to_string()),
            "Hola mundo"
        );
    }

    #[test]
    fn test_repair_capitalization_keeps_lowercase_original() {
        assert_eq!(
            repair_capitalization("hello world", "hola mundo".to_string()),
            "hola mundo"
        );
    }

    #[test]
    fn test_repair_capitalization_non_letter_first() {
        assert_eq!(
            repair_capitalization("Hello", "¡hola!".to_string()),
            "¡hola!"
        );
    }

    #[test]
    fn test_repair_capitalization_accented_letter() {
        assert_eq!(
            repair_capitalization("Area", "área".to_string()),
            "Área"
        );
    }

    #[test]
    fn test_repair_capitalization_empty_translation() {
        assert_eq!(repair_capitalization("Hello", String::new()), "");
    }

    // ==================== translate_batch ====================

    #[tokio::test]
    async fn test_translate_batch_preserves_order_and_length() {
        let translator =
            TableTranslator::new(&[("Good morning", "Buenos días"), ("Welcome", "bienvenido")]);

        let result = translator
            .translate_batch(&texts(&["Welcome", "Good morning"]))
            .await
            .expect("Should succeed");

        assert_eq!(result, texts(&["Bienvenido", "Buenos días"]));
    }

    #[tokio::test]
    async fn test_translate_batch_skips_provider_for_pass_through() {
        let translator = TableTranslator::new(&[("Welcome", "Bienvenido")]);

        let result = translator
            .translate_batch(&texts(&["", "AI", "https://x.org", "Welcome"]))
            .await
            .expect("Should succeed");

        assert_eq!(result, texts(&["", "AI", "https://x.org", "Bienvenido"]));
        assert_eq!(translator.calls(), texts(&["Welcome"]));
    }

    #[tokio::test]
    async fn test_translate_batch_item_failure_falls_back() {
        let translator = TableTranslator::new(&[("Welcome", "Bienvenido")]);

        let result = translator
            .translate_batch(&texts(&["Unknown text", "Welcome"]))
            .await
            .expect("A failing item must not fail the batch");

        assert_eq!(result, texts(&["Unknown text", "Bienvenido"]));
        assert_eq!(translator.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_translate_batch_empty() {
        let translator = TableTranslator::new(&[]);
        let result = translator.translate_batch(&[]).await.expect("Should succeed");
        assert!(result.is_empty());
    }

    // ==================== Provider ====================

    #[test]
    fn test_provider_names() {
        assert_eq!(Provider::DeepL.name(), "DeepL");
        assert_eq!(Provider::Google.name(), "Google Translate");
    }

    #[test]
    fn test_provider_error_messages() {
        let err = ProviderError::Http {
            provider: "DeepL",
            status: 403,
            body: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "DeepL API error (403): Forbidden");

        let err = ProviderError::BatchLength {
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("2 results for a batch of 3"));
    }
}
