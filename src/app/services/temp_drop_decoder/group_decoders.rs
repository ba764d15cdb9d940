//! Fixed-width group decoders for TEMP DROP messages
//!
//! Each decoder operates on a single 5-character ASCII digit group and
//! returns a tagged semantic value or a decode error scoped to that group.
//! Errors distinguish bad length from non-digit content from invalid
//! selector/sign digits so callers can log precisely what was dropped.

use crate::config::DewpointConvention;
use crate::constants::WIND_DIRECTION_VARIABLE;
use thiserror::Error;

/// Decode failure for a single fixed-width group
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupDecodeError {
    /// Group is not exactly 5 characters long
    #[error("expected 5 digits, got {length} characters")]
    BadLength { length: usize },

    /// Group contains a character outside '0'..='9'
    #[error("non-digit character in group '{group}'")]
    NonDigit { group: String },

    /// Pressure/height selector digit outside the defined ranges
    #[error("invalid leading digit {digit} for pressure/height group")]
    BadLeadingDigit { digit: u32 },

    /// Temperature sign indicator digit is neither 0 nor 1
    #[error("invalid sign indicator digit {digit} in temperature group")]
    BadSignDigit { digit: u32 },
}

/// Decoded PnPnhnhnhn group: exactly one of pressure or height is present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureHeight {
    pub pressure_hpa: Option<f64>,
    pub height_m: Option<f64>,
}

/// Decoded TTTaDD group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempDewpoint {
    pub temperature_c: f64,
    pub dewpoint_depression_c: f64,
}

/// Decoded dddff group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    /// Direction in degrees; `None` when coded 999 (variable / not observed)
    pub direction_deg: Option<u16>,
    pub speed_kt: u16,
}

/// Validate that a group is exactly 5 ASCII digits and return its numeric value
fn validate_group(group: &str) -> Result<u32, GroupDecodeError> {
    if group.len() != 5 {
        return Err(GroupDecodeError::BadLength {
            length: group.len(),
        });
    }
    if !group.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GroupDecodeError::NonDigit {
            group: group.to_string(),
        });
    }
    group.parse::<u32>().map_err(|_| GroupDecodeError::NonDigit {
        group: group.to_string(),
    })
}

/// Parse a digit slice out of an already validated group
fn digits(group: &str, start: usize, end: usize) -> u32 {
    group[start..end].parse().unwrap_or(0)
}

/// Decode the PnPnhnhnhn group for pressure or geopotential height.
///
/// The first digit selects the interpretation:
/// - 0..=5: pressure in hPa = value / 10
/// - 6..=8: height in meters = value * 10 (decameters to meters)
/// - 9: pressure above 1000 hPa = (90000 + value) / 10
pub fn decode_pressure_or_height(group: &str) -> Result<PressureHeight, GroupDecodeError> {
    let value = validate_group(group)?;
    let first_digit = value / 10_000;

    match first_digit {
        0..=5 => Ok(PressureHeight {
            pressure_hpa: Some(f64::from(value) / 10.0),
            height_m: None,
        }),
        6..=8 => Ok(PressureHeight {
            pressure_hpa: None,
            height_m: Some(f64::from(value) * 10.0),
        }),
        9 => Ok(PressureHeight {
            pressure_hpa: Some((90_000.0 + f64::from(value)) / 10.0),
            height_m: None,
        }),
        digit => Err(GroupDecodeError::BadLeadingDigit { digit }),
    }
}

/// Decode the TTTaDD group for temperature and dew-point depression.
///
/// The first three digits carry the temperature magnitude in tenths of a
/// degree; the fourth digit selects the sign (0 non-negative, 1 negative);
/// the fifth digit is the dew-point depression, interpreted per the
/// configured unit convention.
pub fn decode_temperature_dewpoint(
    group: &str,
    convention: DewpointConvention,
) -> Result<TempDewpoint, GroupDecodeError> {
    validate_group(group)?;

    let magnitude = digits(group, 0, 3);
    let sign_digit = digits(group, 3, 4);
    let depression_digit = digits(group, 4, 5);

    let temperature_c = match sign_digit {
        0 => f64::from(magnitude) / 10.0,
        1 => -f64::from(magnitude) / 10.0,
        digit => return Err(GroupDecodeError::BadSignDigit { digit }),
    };

    Ok(TempDewpoint {
        temperature_c,
        dewpoint_depression_c: convention.to_celsius(depression_digit),
    })
}

/// Decoded nonoPoPoPo group (Part B significant levels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelPressure {
    /// Level sequence number (nono)
    pub level_number: u32,
    /// Pressure in hectopascals (PoPoPo)
    pub pressure_hpa: f64,
}

/// Decode the nonoPoPoPo group: level sequence number and pressure
pub fn decode_level_pressure(group: &str) -> Result<LevelPressure, GroupDecodeError> {
    validate_group(group)?;

    Ok(LevelPressure {
        level_number: digits(group, 0, 2),
        pressure_hpa: f64::from(digits(group, 2, 5)),
    })
}

/// Decode the dddff group for wind direction and speed.
///
/// Direction 000 means calm (emitted as 0, not absent); 999 means variable
/// or not observed (emitted as absent). Speed is always present, in knots.
pub fn decode_wind(group: &str) -> Result<Wind, GroupDecodeError> {
    validate_group(group)?;

    let ddd = digits(group, 0, 3) as u16;
    let ff = digits(group, 3, 5) as u16;

    let direction_deg = if ddd == WIND_DIRECTION_VARIABLE {
        None
    } else {
        Some(ddd)
    };

    Ok(Wind {
        direction_deg,
        speed_kt: ff,
    })
}
