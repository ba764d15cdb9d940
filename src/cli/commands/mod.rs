//! Command implementations for the dropsonde processor CLI
//!
//! Each command is implemented in its own module:
//! - `decode`: Batch decoding with STAC item output
//! - `inspect`: Single-message decoding for debugging

pub mod decode;
pub mod inspect;
pub mod shared;

pub use shared::BatchStats;

use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner, dispatching to the subcommand handlers
pub async fn run(args: Args, cancel: CancellationToken) -> Result<BatchStats> {
    match args.get_command() {
        Commands::Decode(decode_args) => decode::run_decode(decode_args, cancel).await,
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args).await,
    }
}
