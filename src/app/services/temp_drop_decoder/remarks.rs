//! Remark sub-parser for the 62626 group
//!
//! The remarks payload is split on a fixed alternation of literal segment
//! keys, carrying a current-key cursor so each stretch of text is assigned
//! to the key that precedes it. Text before the first key lands in the
//! implicit initial-description bucket, and a recurring key concatenates its
//! segments with a separating space.
//!
//! Each recognized key then gets a dedicated secondary decode. These are
//! independently best-effort: a segment whose text does not match its key's
//! mini-grammar keeps the raw text (`RemarkValue::Raw`).

use crate::app::models::{
    BoundaryLayerWind, DlmWind, DropPoint, EyeFix, EyewallRemark, RemarkSet, RemarkTime,
    RemarkValue, WindLevelRemark,
};
use crate::constants::REMARK_KEYS;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&REMARK_KEYS.join("|")).unwrap());

static DAY_TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{2})/(\d{2})(\d{2})Z").unwrap());
static LAT_LON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d.]+)([NS])\s+([\d.]+)([EW])").unwrap());
static MBL_WND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})(\d{2})Z\s+(\d{3})/(\d{2,3})\s+KNOTS AT (\d+)\s+FEET").unwrap()
});
static AEV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})(\d{2})Z\s+([\d.]+)([NS])\s+([\d.]+)([EW])\s+PSN").unwrap()
});
static DLM_WND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3})/(\d+)\s+at\s+(\d+)\s+FT").unwrap());
static WL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+FT\s+(\d{3})/(\d+)").unwrap());
static EYEWALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})(\d{2})Z,\s+(\d+)\s+ft").unwrap());

/// Parse a 62626 remarks payload into the report's remark set
pub fn parse_remarks(payload: &str, remarks: &mut RemarkSet) {
    let segments = segment_remarks(payload);

    if let Some(initial) = segments.initial {
        let trimmed = initial.trim();
        if !trimmed.is_empty() {
            remarks.initial_description = Some(trimmed.to_string());
        }
    }

    for (key, content) in segments.keyed {
        match key {
            "REL" => remarks.release_point = Some(decode_drop_point(&content)),
            "SPG" => remarks.splash_point = Some(decode_drop_point(&content)),
            "MBL WND" => remarks.boundary_layer_wind = Some(decode_boundary_layer_wind(&content)),
            "AEV" => remarks.eye_fix = Some(decode_eye_fix(&content)),
            "DLM WND" => remarks.dlm_wind = Some(decode_dlm_wind(&content)),
            "WL" => remarks.wind_level = Some(decode_wind_level(&content)),
            "EYEWALL" => remarks.eyewall = Some(decode_eyewall(&content)),
            _ => {}
        }
    }
}

struct Segments {
    initial: Option<String>,
    keyed: Vec<(&'static str, String)>,
}

/// Split the payload on the literal key alternation, concatenating segments
/// of a recurring key with a separating space
fn segment_remarks(payload: &str) -> Segments {
    let mut initial = None;
    let mut collected: HashMap<&'static str, String> = HashMap::new();
    let mut order: Vec<&'static str> = Vec::new();

    let matches: Vec<_> = KEY_RE.find_iter(payload).collect();
    if matches.is_empty() {
        return Segments {
            initial: Some(payload.to_string()),
            keyed: Vec::new(),
        };
    }

    let leading = &payload[..matches[0].start()];
    if !leading.trim().is_empty() {
        initial = Some(leading.to_string());
    }

    for (i, m) in matches.iter().enumerate() {
        let key = canonical_key(m.as_str());
        let end = matches
            .get(i + 1)
            .map(|next| next.start())
            .unwrap_or(payload.len());
        let content = payload[m.end()..end].trim();
        if content.is_empty() {
            continue;
        }

        match collected.get_mut(key) {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(content);
            }
            None => {
                collected.insert(key, content.to_string());
                order.push(key);
            }
        }
    }

    let keyed = order
        .into_iter()
        .map(|key| (key, collected.remove(key).unwrap_or_default()))
        .collect();

    Segments { initial, keyed }
}

/// Map a matched key back to its canonical static form
fn canonical_key(matched: &str) -> &'static str {
    REMARK_KEYS
        .iter()
        .copied()
        .find(|key| *key == matched)
        .unwrap_or(REMARK_KEYS[0])
}

/// Decode a release/splash point segment: `DD/HHMMZ` timestamp, lat/lon with
/// hemisphere sign flip, residual text kept as description.
///
/// The structured result always replaces the raw segment; fields that fail
/// to match stay absent and their text remains in the description.
fn decode_drop_point(content: &str) -> RemarkValue<DropPoint> {
    let mut point = DropPoint::default();
    let mut rest = content.to_string();

    if let Some(caps) = DAY_TIME_RE.captures(&rest) {
        let full = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
        point.time = Some(RemarkTime {
            day: caps[1].parse().ok(),
            hour: caps[2].parse().unwrap_or(0),
            minute: caps[3].parse().unwrap_or(0),
        });
        rest = rest.replace(&full, "").trim().to_string();
    }

    if let Some(caps) = LAT_LON_RE.captures(&rest) {
        let full = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
        if let (Ok(lat), Ok(lon)) = (caps[1].parse::<f64>(), caps[3].parse::<f64>()) {
            point.latitude = Some(if &caps[2] == "S" { -lat } else { lat });
            point.longitude = Some(if &caps[4] == "W" { -lon } else { lon });
            rest = rest.replace(&full, "").trim().to_string();
        }
    }

    if !rest.is_empty() {
        point.description = Some(rest);
    }

    RemarkValue::Parsed(point)
}

/// Decode `HHMMZ ddd/ff KNOTS AT <n> FEET`
fn decode_boundary_layer_wind(content: &str) -> RemarkValue<BoundaryLayerWind> {
    match MBL_WND_RE.captures(content) {
        Some(caps) => RemarkValue::Parsed(BoundaryLayerWind {
            time: RemarkTime {
                day: None,
                hour: caps[1].parse().unwrap_or(0),
                minute: caps[2].parse().unwrap_or(0),
            },
            wind_direction_deg: caps[3].parse().unwrap_or(0),
            wind_speed_kt: caps[4].parse().unwrap_or(0),
            altitude_ft: caps[5].parse().unwrap_or(0),
        }),
        None => RemarkValue::Raw(content.to_string()),
    }
}

/// Decode `HHMMZ dd.dddN dd.dddW PSN` with hemisphere sign flip
fn decode_eye_fix(content: &str) -> RemarkValue<EyeFix> {
    let Some(caps) = AEV_RE.captures(content) else {
        return RemarkValue::Raw(content.to_string());
    };

    let (Ok(lat), Ok(lon)) = (caps[3].parse::<f64>(), caps[5].parse::<f64>()) else {
        return RemarkValue::Raw(content.to_string());
    };

    RemarkValue::Parsed(EyeFix {
        time: RemarkTime {
            day: None,
            hour: caps[1].parse().unwrap_or(0),
            minute: caps[2].parse().unwrap_or(0),
        },
        latitude: if &caps[4] == "S" { -lat } else { lat },
        longitude: if &caps[6] == "W" { -lon } else { lon },
    })
}

/// Decode `ddd/fff at <n> FT`
fn decode_dlm_wind(content: &str) -> RemarkValue<DlmWind> {
    match DLM_WND_RE.captures(content) {
        Some(caps) => RemarkValue::Parsed(DlmWind {
            wind_direction_deg: caps[1].parse().unwrap_or(0),
            wind_speed_kt: caps[2].parse().unwrap_or(0),
            altitude_ft: caps[3].parse().unwrap_or(0),
        }),
        None => RemarkValue::Raw(content.to_string()),
    }
}

/// Decode `<n> FT ddd/fff`
fn decode_wind_level(content: &str) -> RemarkValue<WindLevelRemark> {
    match WL_RE.captures(content) {
        Some(caps) => RemarkValue::Parsed(WindLevelRemark {
            altitude_ft: caps[1].parse().unwrap_or(0),
            wind_direction_deg: caps[2].parse().unwrap_or(0),
            wind_speed_kt: caps[3].parse().unwrap_or(0),
        }),
        None => RemarkValue::Raw(content.to_string()),
    }
}

/// Decode `HHMMZ, <n> ft`
fn decode_eyewall(content: &str) -> RemarkValue<EyewallRemark> {
    match EYEWALL_RE.captures(content) {
        Some(caps) => RemarkValue::Parsed(EyewallRemark {
            time: RemarkTime {
                day: None,
                hour: caps[1].parse().unwrap_or(0),
                minute: caps[2].parse().unwrap_or(0),
            },
            altitude_ft: caps[3].parse().unwrap_or(0),
        }),
        None => RemarkValue::Raw(content.to_string()),
    }
}
