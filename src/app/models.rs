//! Data models for TEMP DROP processing
//!
//! This module contains the core data structures representing a decoded
//! dropsonde observation: the raw message wrapper, WMO header fields,
//! position fixes, level sequences, remark sub-records and the root
//! `Report` aggregate.

use crate::constants::{SOURCE_TIMESTAMP_FORMAT, SOUTH_QUADRANTS, WEST_QUADRANTS};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// Raw Message
// =============================================================================

/// A TEMP DROP message as read from its source, immutable once constructed.
///
/// The canonical reporting timestamp is derived from the source identifier
/// (conventionally the second-to-last dot-delimited token of the file name,
/// format `YYYYMMDDHHMM`). An unparsable identifier falls back to the current
/// UTC time with a logged warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Original message text
    pub text: String,

    /// Source identifier (file name or URL tail)
    pub source_id: String,

    /// Canonical reporting timestamp derived from the source identifier
    pub message_date: DateTime<Utc>,
}

impl RawMessage {
    /// Construct a raw message, deriving the canonical timestamp from the
    /// source identifier
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        let source_id = source_id.into();
        let message_date = derive_message_date(&source_id).unwrap_or_else(|| {
            warn!(
                "Could not parse timestamp from source identifier '{}'; using current UTC time",
                source_id
            );
            Utc::now()
        });

        Self {
            text: text.into(),
            source_id,
            message_date,
        }
    }

    /// Construct a raw message with an explicit timestamp
    pub fn with_date(
        text: impl Into<String>,
        source_id: impl Into<String>,
        message_date: DateTime<Utc>,
    ) -> Self {
        Self {
            text: text.into(),
            source_id: source_id.into(),
            message_date,
        }
    }
}

/// Derive the reporting timestamp from a source identifier.
///
/// Returns `None` when the identifier has no second-to-last dot-delimited
/// token or the token does not match `YYYYMMDDHHMM`.
pub fn derive_message_date(source_id: &str) -> Option<DateTime<Utc>> {
    let file_name = source_id.rsplit('/').next().unwrap_or(source_id);
    let tokens: Vec<&str> = file_name.split('.').collect();
    if tokens.len() < 2 {
        return None;
    }

    let stamp = tokens[tokens.len() - 2];
    NaiveDateTime::parse_from_str(stamp, SOURCE_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Header and Position
// =============================================================================

/// WMO header fields populated from the first two message lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Sonde serial / launch identifier line, stored verbatim
    pub serial_line: String,

    /// Originating office code (first token of the WMO header line)
    pub originator: Option<String>,

    /// ICAO originator code (second token)
    pub icao_originator: Option<String>,

    /// Transmission date-time group (third token)
    pub transmission_group: Option<String>,
}

/// Which message part is currently being decoded.
///
/// Part A and Part B are mutually exclusive; `None` applies before either
/// part header has been seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivePart {
    #[default]
    None,
    PartA,
    PartB,
}

/// A decoded launch position fix, one per message part.
///
/// Latitude and longitude are signed decimal degrees; the sign is flipped
/// for southern (quadrant 3 or 5) and western (quadrant 5 or 7) hemispheres
/// during decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Observation hour (GG of the YYGGId group)
    pub hour: u32,

    /// Id indicator digit (Id of the YYGGId group)
    pub id_indicator: u32,

    /// Latitude in signed decimal degrees
    pub latitude: f64,

    /// Longitude in signed decimal degrees
    pub longitude: f64,

    /// Quadrant code used for sign correction
    pub quadrant: u8,

    /// Marsden square number (MMM)
    pub marsden_square: u32,

    /// Marsden latitude units digit (ULa)
    pub ula: u32,

    /// Marsden longitude units digit (ULo)
    pub ulo: u32,
}

impl PositionFix {
    /// Whether two independently decoded fixes describe the same point.
    ///
    /// Comparison is exact: both fixes decode from the same degree-tenths
    /// integer encoding, so agreement means bit-identical values.
    pub fn same_position(&self, other: &PositionFix) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

/// Apply the quadrant sign convention to a decoded latitude
pub fn signed_latitude(quadrant: u8, magnitude: f64) -> f64 {
    if SOUTH_QUADRANTS.contains(&quadrant) {
        -magnitude
    } else {
        magnitude
    }
}

/// Apply the quadrant sign convention to a decoded longitude
pub fn signed_longitude(quadrant: u8, magnitude: f64) -> f64 {
    if WEST_QUADRANTS.contains(&quadrant) {
        -magnitude
    } else {
        magnitude
    }
}

// =============================================================================
// Sounding System (31313 group)
// =============================================================================

/// Sounding system and launch time information from the 31313 section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundingSystemInfo {
    /// Part the section was attached to (the part active when it was seen,
    /// or `None` when it preceded both part headers)
    pub attached_to: ActivePart,

    /// Solar / infrared correction indicator (sr)
    pub solar_ir_correction: u32,

    /// Radiosonde system code (rara, WMO table 3685)
    pub radiosonde_system: u32,

    /// Tracking technique / status code (sasa, WMO table 3872)
    pub tracking_technique: u32,

    /// Launch time indicator digit (8)
    pub launch_time_indicator: u32,

    /// Launch hour UTC
    pub launch_hour: u32,

    /// Launch minute UTC
    pub launch_minute: u32,
}

impl SoundingSystemInfo {
    /// Human-readable description of the solar/IR correction indicator
    pub fn solar_ir_correction_description(&self) -> &'static str {
        match self.solar_ir_correction {
            0 => "No correction",
            1 => "Correction applied",
            _ => "Unknown or not applicable",
        }
    }

    /// Human-readable description of the radiosonde system code
    pub fn radiosonde_system_description(&self) -> &'static str {
        match self.radiosonde_system {
            96 => "Descending radiosonde",
            _ => "Unknown or not specified",
        }
    }

    /// Human-readable description of the tracking technique code
    pub fn tracking_technique_description(&self) -> &'static str {
        match self.tracking_technique {
            0 => "No tracking",
            1 => "Radar",
            2 => "Radio direction finding",
            3 => "NAVAID (Omega, Loran-C)",
            4 => "GPS",
            5 => "Other satellite navigation",
            6 => "Inertial",
            7 => "Differential GPS",
            8 => "Automatic satellite navigation",
            _ => "Unknown or not specified",
        }
    }
}

// =============================================================================
// Levels
// =============================================================================

/// A decoded mandatory level (Part A, group triples)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandatoryLevel {
    /// Pressure in hectopascals, when the first group encodes pressure
    pub pressure_hpa: Option<f64>,

    /// Geopotential height in meters, when the first group encodes height
    pub height_m: Option<f64>,

    /// Air temperature in degrees Celsius
    pub temperature_c: f64,

    /// Dew-point depression in degrees Celsius
    pub dewpoint_depression_c: f64,

    /// Wind direction in degrees; absent for variable / not observed
    pub wind_direction_deg: Option<u16>,

    /// Wind speed in knots
    pub wind_speed_kt: u16,
}

/// Tropopause level (Part A, 88 group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tropopause {
    /// Explicit 88999 sentinel: tropopause not observed
    NotObserved,
    Observed {
        pressure_hpa: f64,
        temperature_c: f64,
        dewpoint_depression_c: f64,
        wind_direction_deg: Option<u16>,
        wind_speed_kt: u16,
    },
}

/// Vertical wind shear around the maximum wind level (4vbvbvava group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindShear {
    /// Shear magnitude below the max wind level, knots
    pub below_kt: u32,

    /// Shear magnitude above the max wind level, knots
    pub above_kt: u32,
}

/// Maximum wind data (Part A, 77 or 66 group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaxWind {
    /// Explicit 77999 sentinel: maximum wind not observed
    NotObserved,
    Observed {
        /// Leading indicator, "77" or "66"
        indicator: String,
        pressure_hpa: f64,
        wind_direction_deg: Option<u16>,
        wind_speed_kt: u16,
        shear: Option<WindShear>,
    },
}

/// A significant temperature/humidity level (Part B, group pairs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantTempLevel {
    /// Level sequence number (nono)
    pub level_number: u32,

    /// Pressure in hectopascals (PoPoPo)
    pub pressure_hpa: f64,

    /// Air temperature in degrees Celsius
    pub temperature_c: f64,

    /// Dew-point depression in degrees Celsius
    pub dewpoint_depression_c: f64,
}

/// A significant wind level (Part B, 21212 section, group pairs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantWindLevel {
    /// Level sequence number (nono)
    pub level_number: u32,

    /// Pressure in hectopascals (PoPoPo)
    pub pressure_hpa: f64,

    /// Wind direction in degrees; absent for variable / not observed
    pub wind_direction_deg: Option<u16>,

    /// Wind speed in knots
    pub wind_speed_kt: u16,
}

// =============================================================================
// Remarks
// =============================================================================

/// Result of a best-effort secondary remark decode.
///
/// A segment whose text does not match its key's mini-grammar keeps the raw
/// text instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemarkValue<T> {
    Parsed(T),
    Raw(String),
}

impl<T> RemarkValue<T> {
    /// The parsed payload, if secondary decoding succeeded
    pub fn parsed(&self) -> Option<&T> {
        match self {
            RemarkValue::Parsed(value) => Some(value),
            RemarkValue::Raw(_) => None,
        }
    }
}

/// Day/hour/minute token from a remark segment (`DD/HHMMZ` or `HHMMZ`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemarkTime {
    /// Day of month, absent for the `HHMMZ` form
    pub day: Option<u32>,
    pub hour: u32,
    pub minute: u32,
}

/// Release point (REL) or splash point (SPG) sub-record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropPoint {
    pub time: Option<RemarkTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Residual free-text left after time and position extraction
    pub description: Option<String>,
}

/// Mean boundary-layer wind (MBL WND) sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLayerWind {
    pub time: RemarkTime,
    pub wind_direction_deg: u16,
    pub wind_speed_kt: u16,
    pub altitude_ft: u32,
}

/// Aircraft eye fix (AEV) sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeFix {
    pub time: RemarkTime,
    pub latitude: f64,
    pub longitude: f64,
}

/// Dropsonde-launch-mission wind (DLM WND) sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DlmWind {
    pub wind_direction_deg: u16,
    pub wind_speed_kt: u16,
    pub altitude_ft: u32,
}

/// Wind level (WL) sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindLevelRemark {
    pub altitude_ft: u32,
    pub wind_direction_deg: u16,
    pub wind_speed_kt: u16,
}

/// Eyewall penetration (EYEWALL) sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyewallRemark {
    pub time: RemarkTime,
    pub altitude_ft: u32,
}

/// Mission information extracted from the 61616 group.
///
/// Extraction is heuristic and best-effort; unmatched tokens accumulate in
/// `additional_info` rather than failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionInfo {
    /// The raw mission info text, kept for reference
    pub raw: String,

    /// Aircraft identifier (e.g. AF305)
    pub aircraft_id: Option<String>,

    /// Flight / mission identifier (e.g. 0703A)
    pub flight_mission_id: Option<String>,

    /// Intensive observation period token (e.g. IOP11)
    pub intensive_observation_period: Option<String>,

    /// Storm name, when the classification policy infers one
    pub storm_name: Option<String>,

    /// Literal "OB" observation indicator, when present
    pub observation_indicator: Option<String>,

    /// Storm number following the observation indicator
    pub storm_number: Option<String>,

    /// Residual tokens joined with spaces; absent when empty
    pub additional_info: Option<String>,
}

/// All remark segments decoded from the 62626 group.
///
/// Every key is optional; absence means "not reported", not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemarkSet {
    /// Free text preceding the first recognized remark key
    pub initial_description: Option<String>,

    /// Mission information from the 61616 group
    pub mission_info: Option<MissionInfo>,

    /// Mean boundary-layer wind (MBL WND)
    pub boundary_layer_wind: Option<RemarkValue<BoundaryLayerWind>>,

    /// Aircraft eye fix (AEV)
    pub eye_fix: Option<RemarkValue<EyeFix>>,

    /// Dropsonde-launch-mission wind (DLM WND)
    pub dlm_wind: Option<RemarkValue<DlmWind>>,

    /// Wind level (WL)
    pub wind_level: Option<RemarkValue<WindLevelRemark>>,

    /// Release point (REL)
    pub release_point: Option<RemarkValue<DropPoint>>,

    /// Splash point (SPG)
    pub splash_point: Option<RemarkValue<DropPoint>>,

    /// Eyewall penetration (EYEWALL)
    pub eyewall: Option<RemarkValue<EyewallRemark>>,
}

// =============================================================================
// Verification and Report
// =============================================================================

/// Outcome of reconciling the Part A and Part B position fixes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionVerification {
    /// Neither part carried a position fix
    #[default]
    BothAbsent,

    /// Both fixes present and numerically equal
    Consistent,

    /// Only Part A reported; its fix was copied into Part B
    FilledFromA,

    /// Only Part B reported; its fix was copied into Part A
    FilledFromB,

    /// Both fixes present but disagreeing; originals kept unmodified
    Mismatch,
}

/// The root aggregate: everything decoded from one TEMP DROP message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Source identifier of the original message
    pub source_id: String,

    /// Canonical reporting timestamp
    pub message_date: DateTime<Utc>,

    /// WMO header fields
    pub header: Header,

    /// Part A position fix
    pub part_a_fix: Option<PositionFix>,

    /// Part B position fix
    pub part_b_fix: Option<PositionFix>,

    /// Sounding system information, at most one per message
    pub sounding_system: Option<SoundingSystemInfo>,

    /// Mandatory levels in transmission order
    pub mandatory_levels: Vec<MandatoryLevel>,

    /// Tropopause level
    pub tropopause: Option<Tropopause>,

    /// Maximum wind data
    pub max_wind: Option<MaxWind>,

    /// Significant temperature/humidity levels in transmission order
    pub significant_temp_levels: Vec<SignificantTempLevel>,

    /// Significant wind levels in transmission order
    pub significant_wind_levels: Vec<SignificantWindLevel>,

    /// Decoded remark segments
    pub remarks: RemarkSet,

    /// Position fix verification outcome
    pub verification: PositionVerification,
}

impl Report {
    /// Create an empty report for a raw message
    pub fn new(message: &RawMessage) -> Self {
        Self {
            source_id: message.source_id.clone(),
            message_date: message.message_date,
            header: Header::default(),
            part_a_fix: None,
            part_b_fix: None,
            sounding_system: None,
            mandatory_levels: Vec::new(),
            tropopause: None,
            max_wind: None,
            significant_temp_levels: Vec::new(),
            significant_wind_levels: Vec::new(),
            remarks: RemarkSet::default(),
            verification: PositionVerification::default(),
        }
    }

    /// The reconciled launch position: Part A, falling back to Part B
    pub fn position(&self) -> Option<(f64, f64)> {
        self.part_a_fix
            .as_ref()
            .or(self.part_b_fix.as_ref())
            .map(|fix| (fix.latitude, fix.longitude))
    }
}
