//! Decoding statistics and result structures

use crate::Error;
use crate::app::models::Report;
use super::group_decoders::GroupDecodeError;
use tracing::warn;

/// Statistics collected while decoding a single message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeStats {
    /// Total non-empty lines seen
    pub lines_total: usize,

    /// Lines matching no recognized pattern (silently skipped, not errors)
    pub lines_skipped: usize,

    /// Fixed-width groups decoded successfully
    pub groups_decoded: usize,

    /// Groups (or group chunks) dropped due to decode errors
    pub groups_dropped: usize,

    /// Warning messages for dropped groups and shape mismatches
    pub warnings: Vec<String>,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dropped group with its decode error
    pub fn drop_group(&mut self, group: &str, error: &GroupDecodeError) {
        self.groups_dropped += 1;
        let message = Error::group_decode(group, error.clone()).to_string();
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Record a non-fatal shape mismatch or fallback
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Result of decoding one message: the report plus statistics
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    pub report: Report,
    pub stats: DecodeStats,
}
