//! Batch decode command implementation
//!
//! Decodes one message file or a whole archive directory, writing a STAC
//! item per message. Messages are decoded concurrently with a bounded
//! worker count; cancellation stops new work while in-flight messages
//! finish.

use std::sync::Arc;
use std::time::Instant;

use colored::Colorize;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::shared::{BatchStats, create_progress_bar, is_critical_error, setup_logging};
use crate::app::adapters::{
    ArchiveLister, DirectoryArchive, ItemSink, JsonItemSink, LocalMessageSource, MessageSource,
};
use crate::app::services::stac_builder::build_item;
use crate::app::services::temp_drop_decoder::TempDropDecoder;
use crate::cli::args::{DecodeArgs, OutputFormat};
use crate::{Error, Result};

/// Outcome of processing one message file
enum MessageOutcome {
    Decoded { warnings: usize },
    Failed { source_id: String, error: Error },
    Cancelled,
}

/// Run the decode command
pub async fn run_decode(args: DecodeArgs, cancel: CancellationToken) -> Result<BatchStats> {
    setup_logging(args.get_log_level(), args.quiet);
    args.validate()?;

    let started = Instant::now();

    let paths = collect_input_paths(&args).await?;
    if paths.is_empty() {
        warn!(
            "No message files found under '{}'",
            args.input_path.display()
        );
        return Ok(BatchStats::default());
    }

    info!(
        "Decoding {} message file(s) with {} worker(s)",
        paths.len(),
        args.workers
    );

    let decoder = Arc::new(TempDropDecoder::new(args.decoder_config()));
    let source = Arc::new(LocalMessageSource::new());
    let sink = Arc::new(JsonItemSink::new(&args.output_path));

    let progress = if args.show_progress() {
        Some(create_progress_bar(
            paths.len() as u64,
            "Decoding messages",
        ))
    } else {
        None
    };

    let outcomes: Vec<MessageOutcome> = stream::iter(paths)
        .map(|path| {
            let decoder = Arc::clone(&decoder);
            let source = Arc::clone(&source);
            let sink = Arc::clone(&sink);
            let cancel = cancel.clone();
            let progress = progress.clone();

            async move {
                // Cancellation is checked per message: nothing new starts,
                // in-flight work completes
                if cancel.is_cancelled() {
                    return MessageOutcome::Cancelled;
                }

                let outcome = match process_message(&decoder, &*source, &*sink, &path).await {
                    Ok(warnings) => MessageOutcome::Decoded { warnings },
                    Err(error) => MessageOutcome::Failed {
                        source_id: path.clone(),
                        error,
                    },
                };

                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                outcome
            }
        })
        .buffer_unordered(args.workers)
        .collect()
        .await;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let (mut stats, cancelled) = tally_outcomes(outcomes)?;
    stats.processing_time = started.elapsed();

    if cancelled > 0 {
        return Err(Error::processing_interrupted(format!(
            "{} message(s) skipped after cancellation",
            cancelled
        )));
    }

    report_summary(&args, &stats)?;
    Ok(stats)
}

/// Fold per-message outcomes into batch statistics
///
/// Ordinary per-message failures are counted and logged without stopping
/// the run; a critical error (configuration, interruption) aborts the
/// batch immediately. Returns the stats and the cancelled-message count.
fn tally_outcomes(outcomes: Vec<MessageOutcome>) -> Result<(BatchStats, usize)> {
    let mut stats = BatchStats::default();
    let mut cancelled = 0usize;

    for outcome in outcomes {
        match outcome {
            MessageOutcome::Decoded { warnings } => {
                stats.messages_decoded += 1;
                stats.items_written += 1;
                stats.warnings_total += warnings;
            }
            MessageOutcome::Failed { source_id, error } => {
                if is_critical_error(&error) {
                    error!("Critical error processing '{}': {}", source_id, error);
                    return Err(error);
                }
                stats.messages_failed += 1;
                error!("Failed to process '{}': {}", source_id, error);
            }
            MessageOutcome::Cancelled => cancelled += 1,
        }
    }

    Ok((stats, cancelled))
}

/// Resolve the input path to the list of message files to decode
async fn collect_input_paths(args: &DecodeArgs) -> Result<Vec<String>> {
    if args.input_path.is_file() {
        return Ok(vec![args.input_path.display().to_string()]);
    }

    DirectoryArchive::new(&args.input_path).list().await
}

/// Fetch, decode, project and persist one message; returns the warning count
async fn process_message(
    decoder: &TempDropDecoder,
    source: &dyn MessageSource,
    sink: &dyn ItemSink,
    path: &str,
) -> Result<usize> {
    let message = source.fetch(path).await?;
    let result = decoder.decode(&message)?;
    let item = build_item(&result.report);
    sink.write(&item).await?;
    Ok(result.stats.warnings.len())
}

/// Print the batch summary in the requested format
fn report_summary(args: &DecodeArgs, stats: &BatchStats) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        OutputFormat::Human => {
            if args.quiet {
                return Ok(());
            }

            println!();
            println!("{}", "Decode Summary".bold());
            println!("{}", "==============".bold());
            println!(
                "  Messages decoded: {} of {}",
                stats.messages_decoded.to_string().green(),
                stats.messages_total()
            );
            if stats.messages_failed > 0 {
                println!(
                    "  Messages failed:  {}",
                    stats.messages_failed.to_string().red()
                );
            }
            println!("  Items written:    {}", stats.items_written);
            if stats.warnings_total > 0 {
                println!(
                    "  Decode warnings:  {}",
                    stats.warnings_total.to_string().yellow()
                );
            }
            println!(
                "  Elapsed:          {:.2}s",
                stats.processing_time.as_secs_f64()
            );
            println!(
                "  Output directory: {}",
                args.output_path.display().to_string().cyan()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_decoded_failed_and_cancelled() {
        let outcomes = vec![
            MessageOutcome::Decoded { warnings: 2 },
            MessageOutcome::Decoded { warnings: 0 },
            MessageOutcome::Failed {
                source_id: "missing.txt".to_string(),
                error: Error::file_not_found("missing.txt"),
            },
            MessageOutcome::Cancelled,
        ];

        let (stats, cancelled) = tally_outcomes(outcomes).unwrap();
        assert_eq!(stats.messages_decoded, 2);
        assert_eq!(stats.items_written, 2);
        assert_eq!(stats.warnings_total, 2);
        assert_eq!(stats.messages_failed, 1);
        assert_eq!(stats.messages_total(), 3);
        assert_eq!(cancelled, 1);
    }

    #[test]
    fn test_tally_aborts_batch_on_critical_error() {
        let outcomes = vec![
            MessageOutcome::Decoded { warnings: 0 },
            MessageOutcome::Failed {
                source_id: "a.txt".to_string(),
                error: Error::configuration("worker count must be at least 1"),
            },
            MessageOutcome::Decoded { warnings: 0 },
        ];

        let error = tally_outcomes(outcomes).unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
    }
}
