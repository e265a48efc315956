//! The translation run: filter, translate in batches, merge, write.

use crate::cli::Cli;
use crate::config::Config;
use crate::filter::{character_count, select_keys};
use crate::mapping::{load_source, load_target, write_mapping, Mapping};
use crate::merge::merge_translations;
use crate::report::{group_thousands, BatchFailure, RunReport};
use crate::translator::{self, ProviderError, Translator};
use anyhow::Result;
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Number of keys listed by a dry run.
const DRY_RUN_LISTED_KEYS: usize = 20;

/// Values longer than this are truncated in the dry-run listing.
const DRY_RUN_VALUE_CHARS: usize = 60;

/// Batch size and pacing for a run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub batch_size: NonZeroUsize,
    /// Pause between batches (not after the last one)
    pub delay: Duration,
}

/// Translations collected from the batches of one run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub translations: Mapping,
    pub translated: usize,
    pub errors: Vec<BatchFailure>,
}

/// Translate `keys` batch by batch.
///
/// A batch that fails as a whole is recorded under its first key and
/// contributes no translations; the run moves on to the next batch.
pub async fn translate_in_batches(
    translator: &dyn Translator,
    source: &Mapping,
    keys: &[String],
    options: &BatchOptions,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let batch_size = options.batch_size.get();
    let total_batches = keys.len().div_ceil(batch_size);

    info!(
        "Translating {} keys in batches of {}...",
        keys.len(),
        batch_size
    );

    for (index, batch_keys) in keys.chunks(batch_size).enumerate() {
        let progress = index + 1;
        let texts: Vec<String> = batch_keys
            .iter()
            .map(|key| source.get(key).cloned().unwrap_or_default())
            .collect();

        let result = translator
            .translate_batch(&texts)
            .await
            .and_then(|translated| {
                if translated.len() == texts.len() {
                    Ok(translated)
                } else {
                    Err(ProviderError::BatchLength {
                        expected: texts.len(),
                        actual: translated.len(),
                    }
                    .into())
                }
            });

        match result {
            Ok(translated) => {
                outcome.translated += translated.len();
                outcome
                    .translations
                    .extend(batch_keys.iter().cloned().zip(translated));
                info!(
                    "[{}/{}] ✓ {} keys",
                    progress,
                    total_batches,
                    batch_keys.len()
                );
            }
            Err(e) => {
                let first_key = batch_keys.first().cloned().unwrap_or_default();
                warn!(
                    "[{}/{}] ✗ batch starting at {}: {:#}",
                    progress, total_batches, first_key, e
                );
                outcome.errors.push(BatchFailure {
                    first_key,
                    message: format!("{:#}", e),
                });
            }
        }

        if progress < total_batches && !options.delay.is_zero() {
            debug!("Waiting {:?} before next batch", options.delay);
            tokio::time::sleep(options.delay).await;
        }
    }

    outcome
}

/// Translate `keys` and merge the results into the catalog to write.
pub async fn run(
    translator: &dyn Translator,
    source: &Mapping,
    prior: Mapping,
    keys: &[String],
    options: &BatchOptions,
) -> (Mapping, RunReport) {
    let outcome = translate_in_batches(translator, source, keys, options).await;
    let output = merge_translations(source, prior, outcome.translations);

    let report = RunReport {
        translated: outcome.translated,
        total_keys: output.len(),
        errors: outcome.errors,
    };
    (output, report)
}

/// The lines a dry run prints for the selected keys.
pub fn dry_run_preview(source: &Mapping, keys: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = keys
        .iter()
        .take(DRY_RUN_LISTED_KEYS)
        .map(|key| {
            let value = source.get(key).map(String::as_str).unwrap_or_default();
            if value.chars().count() > DRY_RUN_VALUE_CHARS {
                let shown: String = value.chars().take(DRY_RUN_VALUE_CHARS).collect();
                format!("  - {}: {}...", key, shown)
            } else {
                format!("  - {}: {}", key, value)
            }
        })
        .collect();

    if keys.len() > DRY_RUN_LISTED_KEYS {
        lines.push(format!(
            "  ... and {} more",
            keys.len() - DRY_RUN_LISTED_KEYS
        ));
    }
    lines
}

/// Execute a full run as requested on the command line.
///
/// Returns `None` when the run ended early (nothing to translate, or a dry
/// run), in which case no provider was contacted and nothing was written.
pub async fn run_cli(cli: &Cli, config: &Config) -> Result<Option<RunReport>> {
    let provider = cli.provider();
    info!("{}: English → Spanish", provider.name());

    let source = load_source(&cli.source)?;
    let prior = load_target(&cli.target, cli.force)?;

    let prefixes = cli.key_prefixes();
    let keys = select_keys(&source, &prior, cli.force, prefixes.as_deref());
    info!("Keys to translate: {}", keys.len());

    if keys.is_empty() {
        info!("✓ Nothing to translate!");
        return Ok(None);
    }

    let total_chars = character_count(&source, &keys);
    info!("Total characters: {}", group_thousands(total_chars as u64));

    if cli.dry_run {
        info!("Dry run - would translate these keys:");
        for line in dry_run_preview(&source, &keys) {
            info!("{}", line);
        }
        return Ok(None);
    }

    info!("Setting up {}...", provider.name());
    let translator = translator::connect(provider, config.http_client()?, config).await?;
    info!("✓ {} ready", translator.name());

    let options = BatchOptions {
        batch_size: cli.batch,
        delay: cli.batch_delay(),
    };
    let (output, report) = run(translator.as_ref(), &source, prior, &keys, &options).await;

    info!("Writing {}...", cli.target.display());
    write_mapping(&cli.target, &output)?;

    report.log_summary();
    Ok(Some(report))
}
