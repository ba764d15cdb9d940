use clap::Parser;
use dropsonde_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token coordinates graceful shutdown across workers
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(dropsonde_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Dropsonde Processor - NHC TEMP DROP Message Decoder");
    println!("===================================================");
    println!();
    println!("Decode NHC aircraft reconnaissance TEMP DROP dropsonde messages into");
    println!("structured observation reports and STAC metadata items.");
    println!();
    println!("USAGE:");
    println!("    dropsonde-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    decode      Decode message files and write STAC items (main command)");
    println!("    inspect     Decode a single message and print the report");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Decode a whole archive directory:");
    println!("    dropsonde-processor decode --input /path/to/archive --output ./items");
    println!();
    println!("    # Decode a single message file:");
    println!("    dropsonde-processor decode --input REPNT3-KNHC.202401232347.txt");
    println!();
    println!("    # Inspect one message without writing output:");
    println!("    dropsonde-processor inspect REPNT3-KNHC.202401232347.txt --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    dropsonde-processor <COMMAND> --help");
}
