//! Application constants for the dropsonde processor
//!
//! This module contains the WMO section markers, sentinel codes, remark keys
//! and naming conventions used throughout the TEMP DROP decoder.

// =============================================================================
// Section Markers
// =============================================================================

/// Part A header marker (mandatory levels, tropopause, max wind)
pub const PART_A_MARKER: &str = "XXAA";

/// Part B header marker (significant levels)
pub const PART_B_MARKER: &str = "XXBB";

/// Sounding system / launch time section marker
pub const SOUNDING_SYSTEM_MARKER: &str = "31313";

/// Mission information remark marker
pub const MISSION_INFO_MARKER: &str = "61616";

/// Free-text remarks marker
pub const REMARKS_MARKER: &str = "62626";

/// Significant wind levels marker (Part B)
pub const SIGNIFICANT_WIND_MARKER: &str = "21212";

/// Tropopause line prefix (Part A)
pub const TROPOPAUSE_PREFIX: &str = "88";

/// Maximum wind line prefixes (Part A)
pub const MAX_WIND_PREFIXES: &[&str] = &["77", "66"];

// =============================================================================
// Sentinel Codes
// =============================================================================

/// Tropopause "not observed" sentinel group
pub const TROPOPAUSE_NOT_OBSERVED: &str = "88999";

/// Maximum wind "not observed" sentinel group
pub const MAX_WIND_NOT_OBSERVED: &str = "77999";

/// Wind direction code for variable / not observed
pub const WIND_DIRECTION_VARIABLE: u16 = 999;

// =============================================================================
// Quadrant Sign Conventions
// =============================================================================

/// Quadrant codes indicating a southern-hemisphere latitude (sign flip)
pub const SOUTH_QUADRANTS: &[u8] = &[3, 5];

/// Quadrant codes indicating a western-hemisphere longitude (sign flip)
pub const WEST_QUADRANTS: &[u8] = &[5, 7];

// =============================================================================
// Remarks Section
// =============================================================================

/// Recognized remark segment keys, in the order used for splitting
pub const REMARK_KEYS: &[&str] = &["MBL WND", "AEV", "DLM WND", "WL", "REL", "SPG", "EYEWALL"];

// =============================================================================
// Metadata Projection
// =============================================================================

/// Namespace prefix for all projected STAC properties
pub const PROPERTY_NAMESPACE: &str = "dropsonde";

/// Asset key under which the raw message reference is attached
pub const RAW_MESSAGE_ASSET_KEY: &str = "raw_dropsonde_message";

/// STAC version emitted for projected items
pub const STAC_VERSION: &str = "1.0.0";

/// Item id suffix identifying the observation type
pub const ITEM_ID_SUFFIX: &str = "dropsonde";

// =============================================================================
// Source Identifiers
// =============================================================================

/// Timestamp format embedded in message file names (e.g. 202401232347)
pub const SOURCE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// File extension of archived TEMP DROP messages
pub const MESSAGE_FILE_EXTENSION: &str = "txt";
