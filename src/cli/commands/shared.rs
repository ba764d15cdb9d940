//! Shared components for CLI commands
//!
//! Common types and utilities used across the command implementations:
//! logging setup, batch statistics and progress reporting.

use crate::Error;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;

/// Batch statistics for reporting across commands
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    /// Number of messages decoded successfully
    pub messages_decoded: usize,
    /// Number of messages that failed to decode or persist
    pub messages_failed: usize,
    /// Number of STAC items written
    pub items_written: usize,
    /// Total decode warnings across all messages
    pub warnings_total: usize,
    /// Total processing time
    #[serde(serialize_with = "serialize_duration_secs")]
    pub processing_time: std::time::Duration,
}

fn serialize_duration_secs<S: serde::Serializer>(
    duration: &std::time::Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl BatchStats {
    /// Total messages attempted
    pub fn messages_total(&self) -> usize {
        self.messages_decoded + self.messages_failed
    }
}

/// Set up structured logging from a resolved level, writing to stderr
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dropsonde_processor={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Check if an error is critical enough to stop a batch run
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::ProcessingInterrupted { .. }
    )
}

/// Create a progress bar with the standard batch styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_stats_totals() {
        let stats = BatchStats {
            messages_decoded: 7,
            messages_failed: 3,
            ..Default::default()
        };
        assert_eq!(stats.messages_total(), 10);
    }

    #[test]
    fn test_batch_stats_serializes_duration_as_seconds() {
        let stats = BatchStats {
            processing_time: std::time::Duration::from_millis(1500),
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["processing_time"], serde_json::json!(1.5));
    }

    #[test]
    fn test_is_critical_error() {
        let config_error = Error::configuration("test".to_string());
        let interrupted = Error::processing_interrupted("test".to_string());
        let not_found = Error::file_not_found("missing.txt");

        assert!(is_critical_error(&config_error));
        assert!(is_critical_error(&interrupted));
        assert!(!is_critical_error(&not_found));
    }
}
