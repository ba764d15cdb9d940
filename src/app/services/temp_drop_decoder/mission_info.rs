//! Mission information extraction from the 61616 group
//!
//! The mission info line carries an aircraft identifier, a flight/mission
//! id and a flexible-order tail of optional tokens (intensive observation
//! period, storm name, "OB" + storm number). Extraction is best-effort:
//! tokens that match no known field accumulate in a residual bucket and are
//! never an error.

use crate::app::models::MissionInfo;
use crate::config::StormNamePolicy;
use regex::Regex;
use std::sync::LazyLock;

static IOP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^IOP\d+$").unwrap());
static STORM_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}$").unwrap());
static STORM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2,}$").unwrap());

/// Parse the payload of a 61616 line into structured mission information
pub fn parse_mission_info(raw: &str, policy: StormNamePolicy) -> MissionInfo {
    let mut info = MissionInfo {
        raw: raw.to_string(),
        ..MissionInfo::default()
    };

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if let Some(first) = tokens.first() {
        info.aircraft_id = Some((*first).to_string());
    }
    if let Some(second) = tokens.get(1) {
        info.flight_mission_id = Some((*second).to_string());
    }

    let mut residual: Vec<&str> = Vec::new();
    let mut found_iop_or_storm_name = false;

    for token in tokens.iter().skip(2) {
        if IOP_RE.is_match(token) && !found_iop_or_storm_name {
            info.intensive_observation_period = Some((*token).to_string());
            found_iop_or_storm_name = true;
        } else if *token == "OB" && info.observation_indicator.is_none() {
            info.observation_indicator = Some((*token).to_string());
        } else if info.observation_indicator.is_some()
            && info.storm_number.is_none()
            && STORM_NUMBER_RE.is_match(token)
        {
            info.storm_number = Some((*token).to_string());
        } else if policy == StormNamePolicy::ClassifyUppercaseTokens
            && STORM_NAME_RE.is_match(token)
            && !found_iop_or_storm_name
        {
            info.storm_name = Some((*token).to_string());
            found_iop_or_storm_name = true;
        } else {
            residual.push(token);
        }
    }

    if !residual.is_empty() {
        let joined = residual.join(" ").trim().to_string();
        if !joined.is_empty() {
            info.additional_info = Some(joined);
        }
    }

    info
}
