//! TEMP DROP message decoder
//!
//! This module turns the raw text of an NHC dropsonde TEMP DROP message
//! into a typed [`crate::app::models::Report`]. The decoder degrades
//! gracefully: a malformed fixed-width group is dropped with a warning
//! while the rest of the message continues to decode.
//!
//! ## Architecture
//!
//! - [`decoder`] - Section state machine walking the segmented lines
//! - [`group_decoders`] - Pure decoders for single 5-digit groups
//! - [`mission_info`] - 61616 mission information heuristics
//! - [`remarks`] - 62626 remark segmentation and secondary decodes
//! - [`reconciliation`] - Part A / Part B position fix cross-check
//! - [`stats`] - Decoding statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use dropsonde_processor::app::models::RawMessage;
//! use dropsonde_processor::{DecoderConfig, TempDropDecoder};
//!
//! # fn example() -> dropsonde_processor::Result<()> {
//! let decoder = TempDropDecoder::new(DecoderConfig::default());
//! let message = RawMessage::new("974\nUZNT13 KNHC 232347\n", "REPNT3-KNHC.202401232347.txt");
//! let result = decoder.decode(&message)?;
//!
//! println!(
//!     "Decoded {} mandatory levels with {} warnings",
//!     result.report.mandatory_levels.len(),
//!     result.stats.warnings.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod decoder;
pub mod group_decoders;
pub mod mission_info;
pub mod reconciliation;
pub mod remarks;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use decoder::{TempDropDecoder, segment_lines};
pub use group_decoders::GroupDecodeError;
pub use stats::{DecodeResult, DecodeStats};
