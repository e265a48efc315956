use crate::translator::Provider;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

/// Command line flags for a translation run.
#[derive(Debug, Parser)]
#[command(name = "translate-es")]
#[command(about = "Translate en.json to es.json using DeepL (default) or Google Translate")]
#[command(long_about = None)]
pub struct Cli {
    /// Overwrite existing es.json translations
    #[arg(long)]
    pub force: bool,

    /// Only translate keys matching prefixes (comma-separated, e.g. "p011,p012")
    #[arg(long, value_name = "PREFIXES")]
    pub keys: Option<String>,

    /// Number of keys per batch
    #[arg(long, default_value = "50", value_parser = parse_batch_size)]
    pub batch: NonZeroUsize,

    /// Show what would be translated without calling the provider or writing output
    #[arg(long)]
    pub dry_run: bool,

    /// Pause between batches, in seconds
    #[arg(long, default_value_t = 0.1, value_parser = parse_delay)]
    pub delay: f64,

    /// Use Google Translate instead of DeepL
    #[arg(long)]
    pub google: bool,

    /// English source catalog
    #[arg(long, default_value = "content/translations/en.json")]
    pub source: PathBuf,

    /// Spanish catalog to update
    #[arg(long, default_value = "content/translations/es.json")]
    pub target: PathBuf,
}

impl Cli {
    pub fn provider(&self) -> Provider {
        if self.google {
            Provider::Google
        } else {
            Provider::DeepL
        }
    }

    /// Key prefixes from `--keys`, each trimmed.
    ///
    /// Returns `None` when `--keys` is absent or empty, which means "all keys".
    pub fn key_prefixes(&self) -> Option<Vec<String>> {
        self.keys.as_deref().and_then(crate::filter::parse_prefixes)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay)
    }
}

fn parse_batch_size(value: &str) -> Result<NonZeroUsize, String> {
    let size: usize = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid batch size '{}': {}", value, e))?;
    NonZeroUsize::new(size).ok_or_else(|| "batch size must be at least 1".to_string())
}

fn parse_delay(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid delay '{}': {}", value, e))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!(
            "delay must be a non-negative number of seconds, got {}",
            value
        ));
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("translate-es").chain(args.iter().copied()))
    }

    // ==================== Defaults ====================

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).expect("Should parse with no flags");

        assert!(!cli.force);
        assert!(!cli.dry_run);
        assert!(!cli.google);
        assert_eq!(cli.keys, None);
        assert_eq!(cli.batch.get(), 50);
        assert_eq!(cli.delay, 0.1);
        assert_eq!(cli.provider(), Provider::DeepL);
        assert_eq!(cli.source, PathBuf::from("content/translations/en.json"));
        assert_eq!(cli.target, PathBuf::from("content/translations/es.json"));
        assert_eq!(cli.key_prefixes(), None);
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "--force",
            "--keys",
            "p011, p012",
            "--batch",
            "10",
            "--dry-run",
            "--delay",
            "0.5",
            "--google",
            "--source",
            "in.json",
            "--target",
            "out.json",
        ])
        .expect("Should parse all flags");

        assert!(cli.force);
        assert!(cli.dry_run);
        assert_eq!(cli.provider(), Provider::Google);
        assert_eq!(cli.batch.get(), 10);
        assert_eq!(cli.batch_delay(), Duration::from_millis(500));
        assert_eq!(
            cli.key_prefixes(),
            Some(vec!["p011".to_string(), "p012".to_string()])
        );
        assert_eq!(cli.source, PathBuf::from("in.json"));
        assert_eq!(cli.target, PathBuf::from("out.json"));
    }

    // ==================== Validation ====================

    #[test]
    fn test_zero_batch_rejected() {
        assert!(parse(&["--batch", "0"]).is_err());
    }

    #[test]
    fn test_non_numeric_batch_rejected() {
        assert!(parse(&["--batch", "many"]).is_err());
    }

    #[test]
    fn test_negative_delay_rejected() {
        assert!(parse(&["--delay=-1"]).is_err());
    }

    #[test]
    fn test_nan_delay_rejected() {
        assert!(parse(&["--delay", "NaN"]).is_err());
    }

    #[test]
    fn test_zero_delay_allowed() {
        let cli = parse(&["--delay", "0"]).expect("Zero delay is valid");
        assert_eq!(cli.batch_delay(), Duration::ZERO);
    }

    #[test]
    fn test_empty_keys_means_all_keys() {
        let cli = parse(&["--keys", ""]).expect("Should parse");
        assert_eq!(cli.key_prefixes(), None);
    }

    #[test]
    fn test_keys_with_trailing_comma_keeps_empty_prefix() {
        let cli = parse(&["--keys", "p011,"]).expect("Should parse");
        assert_eq!(
            cli.key_prefixes(),
            Some(vec!["p011".to_string(), String::new()])
        );
    }
}
