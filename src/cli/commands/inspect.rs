//! Inspect command implementation
//!
//! Decodes a single message file and prints the decoded report (or its
//! STAC projection) without writing anything to disk. Intended for
//! debugging individual messages.

use colored::Colorize;
use tracing::info;

use super::shared::{BatchStats, setup_logging};
use crate::app::adapters::{LocalMessageSource, MessageSource};
use crate::app::models::{MaxWind, Report, Tropopause};
use crate::app::services::stac_builder::build_item;
use crate::app::services::temp_drop_decoder::{DecodeResult, TempDropDecoder};
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::Result;

/// Run the inspect command
pub async fn run_inspect(args: InspectArgs) -> Result<BatchStats> {
    setup_logging(args.get_log_level(), false);
    args.validate()?;

    let source = LocalMessageSource::new();
    let message = source.fetch(&args.input_file.display().to_string()).await?;

    let decoder = TempDropDecoder::new(args.decoder_config());
    let result = decoder.decode(&message)?;

    info!(
        "Decoded '{}' with {} warning(s)",
        message.source_id,
        result.stats.warnings.len()
    );

    if args.stac {
        let item = build_item(&result.report);
        print_stac(&item, args.output_format)?;
    } else {
        print_report(&result, args.output_format)?;
    }

    Ok(BatchStats {
        messages_decoded: 1,
        warnings_total: result.stats.warnings.len(),
        ..BatchStats::default()
    })
}

fn print_stac(
    item: &crate::app::services::stac_builder::StacItem,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", item.to_json()?),
        OutputFormat::Human => {
            println!("{} {}", "Item:".bold(), item.id);
            match &item.geometry {
                Some(geometry) => println!(
                    "  Position:  {:.1}, {:.1}",
                    geometry.coordinates[1], geometry.coordinates[0]
                ),
                None => println!("  Position:  {}", "none".yellow()),
            }
            println!("  Properties:");
            for (key, value) in &item.properties {
                println!("    {}: {}", key.cyan(), value);
            }
        }
    }
    Ok(())
}

fn print_report(result: &DecodeResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.report)?);
        }
        OutputFormat::Human => {
            print_human_report(&result.report);

            if !result.stats.warnings.is_empty() {
                println!();
                println!("{}", "Warnings".bold());
                for warning in &result.stats.warnings {
                    println!("  {} {}", "!".yellow(), warning);
                }
            }
        }
    }
    Ok(())
}

fn print_human_report(report: &Report) {
    println!("{} {}", "Message:".bold(), report.source_id);
    println!(
        "  Originator:  {} / {}",
        report.header.originator.as_deref().unwrap_or("?"),
        report.header.icao_originator.as_deref().unwrap_or("?")
    );
    println!("  Timestamp:   {}", report.message_date.to_rfc3339());

    match report.position() {
        Some((latitude, longitude)) => {
            println!("  Position:    {:.1}, {:.1}", latitude, longitude)
        }
        None => println!("  Position:    {}", "none".yellow()),
    }

    println!(
        "  Levels:      {} mandatory, {} significant temp, {} significant wind",
        report.mandatory_levels.len(),
        report.significant_temp_levels.len(),
        report.significant_wind_levels.len()
    );

    match &report.tropopause {
        Some(Tropopause::Observed { pressure_hpa, .. }) => {
            println!("  Tropopause:  {:.1} hPa", pressure_hpa)
        }
        Some(Tropopause::NotObserved) => println!("  Tropopause:  not observed"),
        None => {}
    }

    match &report.max_wind {
        Some(MaxWind::Observed {
            pressure_hpa,
            wind_speed_kt,
            ..
        }) => println!("  Max wind:    {} kt at {:.1} hPa", wind_speed_kt, pressure_hpa),
        Some(MaxWind::NotObserved) => println!("  Max wind:    not observed"),
        None => {}
    }

    if let Some(mission) = &report.remarks.mission_info {
        println!(
            "  Mission:     {} {} {}",
            mission.aircraft_id.as_deref().unwrap_or("?"),
            mission.flight_mission_id.as_deref().unwrap_or("?"),
            mission.storm_name.as_deref().unwrap_or("")
        );
    }
}
