//! Command-line argument definitions for the dropsonde processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::{DecoderConfig, DewpointConvention, StormNamePolicy};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the dropsonde processor
///
/// Decodes NHC aircraft reconnaissance TEMP DROP messages into structured
/// observation reports and STAC metadata items.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dropsonde-processor",
    version,
    about = "Decode NHC TEMP DROP dropsonde messages into STAC metadata items",
    long_about = "Decodes WMO fixed-format TEMP DROP messages transmitted by NHC aircraft \
                  reconnaissance missions into structured observation reports, then projects \
                  each report into a STAC metadata item with point geometry and namespaced \
                  properties for cataloguing."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the dropsonde processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode message files and write STAC items (default command)
    Decode(DecodeArgs),
    /// Decode a single message and print the report for inspection
    Inspect(InspectArgs),
}

/// Arguments for the decode command (batch processing)
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Input path: a single message file or a directory to walk recursively
    ///
    /// Directories are walked recursively for .txt files, which are decoded
    /// in sorted order.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Message file or archive directory to decode"
    )]
    pub input_path: PathBuf,

    /// Output directory for generated STAC item JSON files
    ///
    /// Will be created if it doesn't exist. Items are written one file per
    /// message, named after the item identifier.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "./output",
        help = "Output directory for STAC item JSON files"
    )]
    pub output_path: PathBuf,

    /// Dew-point depression unit convention
    #[arg(
        long = "dewpoint-convention",
        value_enum,
        default_value = "whole-degrees",
        help = "Unit convention for the dew-point depression digit"
    )]
    pub dewpoint_convention: DewpointConventionArg,

    /// Disable the storm-name heuristic for mission info
    ///
    /// By default, the first unclaimed all-caps token in the 61616 group is
    /// classified as the storm name. With this flag, ambiguous tokens are
    /// routed to additional info instead.
    #[arg(
        long = "no-storm-name-heuristic",
        help = "Route ambiguous mission-info tokens to additional info"
    )]
    pub no_storm_name_heuristic: bool,

    /// Number of parallel workers
    ///
    /// Controls how many messages are decoded concurrently.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = 4,
        help = "Number of parallel workers for batch decoding"
    )]
    pub workers: usize,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the batch summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the batch summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the inspect command (single-message debugging)
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Path to the message file to inspect
    #[arg(value_name = "FILE", help = "Message file to decode and print")]
    pub input_file: PathBuf,

    /// Dew-point depression unit convention
    #[arg(
        long = "dewpoint-convention",
        value_enum,
        default_value = "whole-degrees",
        help = "Unit convention for the dew-point depression digit"
    )]
    pub dewpoint_convention: DewpointConventionArg,

    /// Output format for the decoded report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the decoded report"
    )]
    pub output_format: OutputFormat,

    /// Print the STAC item instead of the raw report
    #[arg(long = "stac", help = "Print the projected STAC item instead of the report")]
    pub stac: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// CLI value for the dew-point depression convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DewpointConventionArg {
    /// Depression digit is whole degrees Celsius (NHOP reading)
    WholeDegrees,
    /// Depression digit is tenths of a degree Celsius
    Tenths,
}

impl From<DewpointConventionArg> for DewpointConvention {
    fn from(arg: DewpointConventionArg) -> Self {
        match arg {
            DewpointConventionArg::WholeDegrees => DewpointConvention::WholeDegrees,
            DewpointConventionArg::Tenths => DewpointConvention::Tenths,
        }
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl DecodeArgs {
    /// Validate the decode command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        if self.workers > 100 {
            return Err(Error::configuration(
                "Number of workers cannot exceed 100".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the decoder configuration from the CLI flags
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            dewpoint_convention: self.dewpoint_convention.into(),
            storm_name_policy: if self.no_storm_name_heuristic {
                StormNamePolicy::AdditionalInfoOnly
            } else {
                StormNamePolicy::ClassifyUppercaseTokens
            },
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InspectArgs {
    /// Validate the inspect command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.input_file.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input_file.display()
            )));
        }
        Ok(())
    }

    /// Build the decoder configuration from the CLI flags
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            dewpoint_convention: self.dewpoint_convention.into(),
            ..DecoderConfig::default()
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
