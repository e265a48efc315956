//! End-of-run summary.
//!
//! Collects the counts and batch-level failures of a translation run and
//! renders them for the console.

use tracing::{info, warn};

/// How many batch errors the summary lists individually.
const MAX_LISTED_ERRORS: usize = 10;

/// A batch that failed as a whole; its keys kept their prior or English text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// First key of the failed batch
    pub first_key: String,

    /// Error message reported for the batch
    pub message: String,
}

/// Summary of a completed translation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Keys returned by the translator in successful batches
    pub translated: usize,

    /// Keys in the written catalog
    pub total_keys: usize,

    /// Batch-level failures, in batch order
    pub errors: Vec<BatchFailure>,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Human-readable summary lines.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Translation complete!".to_string(),
            format!("Translated: {} keys", self.translated),
            format!("Total keys: {}", self.total_keys),
        ];

        if self.has_errors() {
            lines.push(format!("Errors ({}):", self.errors.len()));
            lines.extend(
                self.errors
                    .iter()
                    .take(MAX_LISTED_ERRORS)
                    .map(|e| format!("  - {}: {}", e.first_key, e.message)),
            );
        }

        lines
    }

    /// Log the summary; error lines go out at `warn` level.
    pub fn log_summary(&self) {
        let lines = self.summary_lines();
        let (counts, errors) = lines.split_at(lines.len().min(3));
        for line in counts {
            info!("{}", line);
        }
        for line in errors {
            warn!("{}", line);
        }
    }
}

/// Format a count with `,` thousands separators (`1250000` → `1,250,000`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
