//! Decoder configuration.
//!
//! Two details of the TEMP DROP format family differ between message
//! revisions and are therefore configurable rather than hard-coded: the
//! dew-point depression unit convention and the mission-info storm-name
//! classification policy.

use serde::{Deserialize, Serialize};

/// Unit convention for the fifth digit of the temperature/dew-point group.
///
/// NHOP Appendix G reads the digit as whole degrees Celsius; one historical
/// revision of the format encodes tenths of a degree instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DewpointConvention {
    /// Dew-point depression digit is whole degrees Celsius (NHOP reading)
    WholeDegrees,
    /// Dew-point depression digit is tenths of a degree Celsius
    Tenths,
}

impl DewpointConvention {
    /// Convert the raw depression digit to degrees Celsius
    pub fn to_celsius(self, digit: u32) -> f64 {
        match self {
            DewpointConvention::WholeDegrees => f64::from(digit),
            DewpointConvention::Tenths => f64::from(digit) / 10.0,
        }
    }
}

/// Tie-break policy for classifying ambiguous mission-info tokens.
///
/// The 61616 group carries free-order optional fields; whether an all-caps
/// token is a storm name or incidental text is a heuristic call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StormNamePolicy {
    /// Treat the first unclaimed all-caps multi-letter token as the storm name
    ClassifyUppercaseTokens,
    /// Never infer a storm name; route ambiguous tokens to additional info
    AdditionalInfoOnly,
}

/// Configuration for the TEMP DROP decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Dew-point depression unit convention
    pub dewpoint_convention: DewpointConvention,

    /// Mission-info storm-name classification policy
    pub storm_name_policy: StormNamePolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            dewpoint_convention: DewpointConvention::WholeDegrees,
            storm_name_policy: StormNamePolicy::ClassifyUppercaseTokens,
        }
    }
}
