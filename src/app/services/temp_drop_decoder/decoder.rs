//! Core TEMP DROP decoder implementation
//!
//! This module walks the segmented message lines in strict order,
//! classifies each by prefix or shape, tracks which message part is active
//! and dispatches to the matching section handler. A decode error inside a
//! single group or line is caught, recorded as a warning in the statistics
//! and dropped; it never aborts the decode of the whole message.

use tracing::{debug, info};

use super::group_decoders::{
    decode_level_pressure, decode_pressure_or_height, decode_temperature_dewpoint, decode_wind,
};
use super::mission_info::parse_mission_info;
use super::reconciliation::reconcile_position_fixes;
use super::remarks::parse_remarks;
use super::stats::{DecodeResult, DecodeStats};
use crate::app::models::{
    ActivePart, MandatoryLevel, MaxWind, PositionFix, RawMessage, Report, SignificantTempLevel,
    SignificantWindLevel, SoundingSystemInfo, Tropopause, WindShear, signed_latitude,
    signed_longitude,
};
use crate::config::DecoderConfig;
use crate::constants::{
    MAX_WIND_NOT_OBSERVED, MAX_WIND_PREFIXES, MISSION_INFO_MARKER, PART_A_MARKER, PART_B_MARKER,
    REMARKS_MARKER, SIGNIFICANT_WIND_MARKER, SOUNDING_SYSTEM_MARKER, TROPOPAUSE_NOT_OBSERVED,
    TROPOPAUSE_PREFIX,
};
use crate::{Error, Result};

/// Split raw message text into trimmed, non-empty lines.
///
/// This is the decoder's ingestion unit; everything downstream operates on
/// the segmented lines.
pub fn segment_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Stateful decoder for TEMP DROP observation messages.
///
/// The decoder is purely computational and holds no per-message state: it is
/// safe to share across threads and invoke concurrently on independent
/// messages.
#[derive(Debug, Clone, Default)]
pub struct TempDropDecoder {
    config: DecoderConfig,
}

impl TempDropDecoder {
    /// Create a decoder with the given configuration
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decode a TEMP DROP message into a structured report.
    ///
    /// Only a structurally unreadable input (empty text) fails outright;
    /// malformed groups and unrecognized lines degrade gracefully into
    /// warnings collected in the returned statistics.
    pub fn decode(&self, message: &RawMessage) -> Result<DecodeResult> {
        if message.text.trim().is_empty() {
            return Err(Error::message_format(
                &message.source_id,
                "message text is empty",
            ));
        }

        info!("Decoding TEMP DROP message from '{}'", message.source_id);

        let lines = segment_lines(&message.text);
        let mut report = Report::new(message);
        let mut stats = DecodeStats::new();
        let mut active = ActivePart::None;

        stats.lines_total = lines.len();

        for (i, line) in lines.iter().enumerate() {
            // First line: sonde serial / launch identifier, stored verbatim
            if i == 0 {
                report.header.serial_line = (*line).to_string();
                continue;
            }

            // Second line: space-delimited WMO header
            if i == 1 {
                self.decode_wmo_header(line, &mut report, &mut stats);
                continue;
            }

            if line.starts_with(PART_A_MARKER) {
                active = ActivePart::PartA;
                report.part_a_fix = self.decode_part_header(line, "XXAA", &mut stats);
                continue;
            }

            if line.starts_with(PART_B_MARKER) {
                active = ActivePart::PartB;
                report.part_b_fix = self.decode_part_header(line, "XXBB", &mut stats);
                continue;
            }

            if line.starts_with(SOUNDING_SYSTEM_MARKER) {
                self.decode_sounding_system(line, active, &mut report, &mut stats);
                continue;
            }

            if let Some(payload) = line.strip_prefix(MISSION_INFO_MARKER) {
                let raw = payload.trim();
                report.remarks.mission_info =
                    Some(parse_mission_info(raw, self.config.storm_name_policy));
                continue;
            }

            if let Some(payload) = line.strip_prefix(REMARKS_MARKER) {
                parse_remarks(payload.trim(), &mut report.remarks);
                continue;
            }

            let handled = match active {
                ActivePart::PartA => self.decode_part_a_line(line, &mut report, &mut stats),
                ActivePart::PartB => self.decode_part_b_line(line, &mut report, &mut stats),
                ActivePart::None => false,
            };

            if !handled {
                // Unrecognized lines are skipped silently, by design
                stats.lines_skipped += 1;
                debug!("Skipping unrecognized line: '{}'", line);
            }
        }

        reconcile_position_fixes(&mut report);

        info!(
            "Decoded message '{}': {} mandatory, {} significant temp, {} significant wind levels, {} warnings",
            message.source_id,
            report.mandatory_levels.len(),
            report.significant_temp_levels.len(),
            report.significant_wind_levels.len(),
            stats.warnings.len()
        );

        Ok(DecodeResult { report, stats })
    }

    /// Decode the second message line: originator, ICAO code, transmission group
    fn decode_wmo_header(&self, line: &str, report: &mut Report, stats: &mut DecodeStats) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            stats.warn(format!(
                "WMO header line has {} tokens, expected at least 3; leaving header unset",
                tokens.len()
            ));
            return;
        }

        report.header.originator = Some(tokens[0].to_string());
        report.header.icao_originator = Some(tokens[1].to_string());
        report.header.transmission_group = Some(tokens[2].to_string());
    }

    /// Decode a part header line (XXAA/XXBB) into a position fix.
    ///
    /// Expected shape: `XXAA YYGGId 99LaLaLa QcLoLoLoLo MMMULaULo`. Any
    /// malformed token leaves the fix absent with a logged warning.
    fn decode_part_header(
        &self,
        line: &str,
        part_name: &str,
        stats: &mut DecodeStats,
    ) -> Option<PositionFix> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 5 {
            stats.warn(format!(
                "{} header line has {} tokens, expected at least 5; skipping position details",
                part_name,
                tokens.len()
            ));
            return None;
        }

        let fix = Self::parse_position_tokens(&tokens);
        if fix.is_none() {
            stats.warn(format!(
                "Error parsing {} header line '{}'; skipping position details",
                part_name, line
            ));
        }
        fix
    }

    fn parse_position_tokens(tokens: &[&str]) -> Option<PositionFix> {
        // YYGGId: hour and id indicator (day is authoritative from the file name)
        let time_group = tokens[1];
        let hour: u32 = time_group.get(2..4)?.parse().ok()?;
        let id_indicator: u32 = time_group.get(4..5)?.parse().ok()?;

        // 99LaLaLa: latitude in degrees and tenths after the 99 indicator
        let lat_magnitude: f64 = tokens[2].get(2..)?.parse().ok()?;

        // QcLoLoLoLo: quadrant digit then longitude in degrees and tenths
        let quadrant: u8 = tokens[3].get(0..1)?.parse().ok()?;
        let lon_magnitude: f64 = tokens[3].get(1..)?.parse().ok()?;

        // MMMULaULo: Marsden square and unit digits
        let marsden_square: u32 = tokens[4].get(0..3)?.parse().ok()?;
        let ula: u32 = tokens[4].get(3..4)?.parse().ok()?;
        let ulo: u32 = tokens[4].get(4..5)?.parse().ok()?;

        Some(PositionFix {
            hour,
            id_indicator,
            latitude: signed_latitude(quadrant, lat_magnitude / 10.0),
            longitude: signed_longitude(quadrant, lon_magnitude / 10.0),
            quadrant,
            marsden_square,
            ula,
            ulo,
        })
    }

    /// Decode the 31313 sounding system line, attaching it to the active part
    fn decode_sounding_system(
        &self,
        line: &str,
        active: ActivePart,
        report: &mut Report,
        stats: &mut DecodeStats,
    ) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            stats.warn(format!(
                "Sounding system line has {} tokens, expected at least 3; skipping",
                tokens.len()
            ));
            return;
        }

        let parsed = (|| -> Option<SoundingSystemInfo> {
            let srrarasasa = tokens[1];
            let launch_group = tokens[2];

            Some(SoundingSystemInfo {
                attached_to: active,
                solar_ir_correction: srrarasasa.get(0..1)?.parse().ok()?,
                radiosonde_system: srrarasasa.get(1..3)?.parse().ok()?,
                tracking_technique: srrarasasa.get(3..5)?.parse().ok()?,
                launch_time_indicator: launch_group.get(0..1)?.parse().ok()?,
                launch_hour: launch_group.get(1..3)?.parse().ok()?,
                launch_minute: launch_group.get(3..5)?.parse().ok()?,
            })
        })();

        match parsed {
            Some(info) => report.sounding_system = Some(info),
            None => stats.warn(format!(
                "Error parsing sounding system line '{}'; skipping",
                line
            )),
        }
    }

    /// Decode a data line while Part A is active.
    ///
    /// Tropopause (88) and max wind (77/66) prefixes are claimed before the
    /// generic mandatory-level shape so their lines are not swallowed as
    /// level triples.
    fn decode_part_a_line(&self, line: &str, report: &mut Report, stats: &mut DecodeStats) -> bool {
        if line.starts_with(TROPOPAUSE_PREFIX) {
            self.decode_tropopause(line, report, stats);
            return true;
        }

        if MAX_WIND_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
        {
            self.decode_max_wind(line, report, stats);
            return true;
        }

        let Some(groups) = fixed_width_groups(line, 3) else {
            return false;
        };

        for chunk in groups.chunks_exact(3) {
            let decoded = decode_pressure_or_height(chunk[0])
                .map_err(|e| (chunk[0], e))
                .and_then(|ph| {
                    decode_temperature_dewpoint(chunk[1], self.config.dewpoint_convention)
                        .map(|td| (ph, td))
                        .map_err(|e| (chunk[1], e))
                })
                .and_then(|(ph, td)| {
                    decode_wind(chunk[2])
                        .map(|wind| (ph, td, wind))
                        .map_err(|e| (chunk[2], e))
                });

            match decoded {
                Ok((ph, td, wind)) => {
                    report.mandatory_levels.push(MandatoryLevel {
                        pressure_hpa: ph.pressure_hpa,
                        height_m: ph.height_m,
                        temperature_c: td.temperature_c,
                        dewpoint_depression_c: td.dewpoint_depression_c,
                        wind_direction_deg: wind.direction_deg,
                        wind_speed_kt: wind.speed_kt,
                    });
                    stats.groups_decoded += 3;
                }
                Err((group, error)) => stats.drop_group(group, &error),
            }
        }

        true
    }

    /// Decode the tropopause line (88PtPtPt TTTaDD dddff, or the 88999 sentinel)
    fn decode_tropopause(&self, line: &str, report: &mut Report, stats: &mut DecodeStats) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&TROPOPAUSE_NOT_OBSERVED) {
            report.tropopause = Some(Tropopause::NotObserved);
            return;
        }

        if tokens.len() < 3 {
            stats.warn(format!(
                "Tropopause line has {} tokens, expected at least 3; skipping",
                tokens.len()
            ));
            return;
        }

        let pressure: Option<f64> = tokens[0].get(2..).and_then(|s| s.parse().ok());
        let temp = decode_temperature_dewpoint(tokens[1], self.config.dewpoint_convention);
        let wind = decode_wind(tokens[2]);

        match (pressure, temp, wind) {
            (Some(pressure_hpa), Ok(td), Ok(wind)) => {
                report.tropopause = Some(Tropopause::Observed {
                    pressure_hpa,
                    temperature_c: td.temperature_c,
                    dewpoint_depression_c: td.dewpoint_depression_c,
                    wind_direction_deg: wind.direction_deg,
                    wind_speed_kt: wind.speed_kt,
                });
                stats.groups_decoded += 3;
            }
            _ => stats.warn(format!(
                "Error parsing tropopause line '{}'; skipping tropopause details",
                line
            )),
        }
    }

    /// Decode the max wind line (77PmPmPm or 66PmPmPm, dddff, optional shear)
    fn decode_max_wind(&self, line: &str, report: &mut Report, stats: &mut DecodeStats) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&MAX_WIND_NOT_OBSERVED) {
            report.max_wind = Some(MaxWind::NotObserved);
            return;
        }

        if tokens.len() < 2 {
            stats.warn(format!(
                "Max wind line has {} tokens, expected at least 2; skipping",
                tokens.len()
            ));
            return;
        }

        let indicator = tokens[0].get(0..2).unwrap_or_default().to_string();
        let pressure: Option<f64> = tokens[0].get(2..).and_then(|s| s.parse().ok());
        let wind = decode_wind(tokens[1]);

        let (Some(pressure_hpa), Ok(wind)) = (pressure, wind) else {
            stats.warn(format!(
                "Error parsing max wind line '{}'; skipping max wind details",
                line
            ));
            return;
        };

        // Optional vertical wind shear group 4vbvbvava
        let shear = tokens.get(2).filter(|t| t.starts_with('4')).and_then(|t| {
            Some(WindShear {
                below_kt: t.get(1..3)?.parse().ok()?,
                above_kt: t.get(3..5)?.parse().ok()?,
            })
        });

        report.max_wind = Some(MaxWind::Observed {
            indicator,
            pressure_hpa,
            wind_direction_deg: wind.direction_deg,
            wind_speed_kt: wind.speed_kt,
            shear,
        });
        stats.groups_decoded += 2;
    }

    /// Decode a data line while Part B is active
    fn decode_part_b_line(&self, line: &str, report: &mut Report, stats: &mut DecodeStats) -> bool {
        if let Some(payload) = line.strip_prefix(SIGNIFICANT_WIND_MARKER) {
            self.decode_significant_wind(payload.trim(), report, stats);
            return true;
        }

        let Some(groups) = fixed_width_groups(line, 2) else {
            return false;
        };

        for chunk in groups.chunks_exact(2) {
            let decoded = decode_level_pressure(chunk[0])
                .map_err(|e| (chunk[0], e))
                .and_then(|lp| {
                    decode_temperature_dewpoint(chunk[1], self.config.dewpoint_convention)
                        .map(|td| (lp, td))
                        .map_err(|e| (chunk[1], e))
                });

            match decoded {
                Ok((lp, td)) => {
                    report.significant_temp_levels.push(SignificantTempLevel {
                        level_number: lp.level_number,
                        pressure_hpa: lp.pressure_hpa,
                        temperature_c: td.temperature_c,
                        dewpoint_depression_c: td.dewpoint_depression_c,
                    });
                    stats.groups_decoded += 2;
                }
                Err((group, error)) => stats.drop_group(group, &error),
            }
        }

        true
    }

    /// Decode the 21212 significant wind payload (level/pressure + wind pairs)
    fn decode_significant_wind(&self, payload: &str, report: &mut Report, stats: &mut DecodeStats) {
        let groups: Vec<&str> = payload.split_whitespace().collect();

        for chunk in groups.chunks_exact(2) {
            let decoded = decode_level_pressure(chunk[0])
                .map_err(|e| (chunk[0], e))
                .and_then(|lp| {
                    decode_wind(chunk[1])
                        .map(|wind| (lp, wind))
                        .map_err(|e| (chunk[1], e))
                });

            match decoded {
                Ok((lp, wind)) => {
                    report.significant_wind_levels.push(SignificantWindLevel {
                        level_number: lp.level_number,
                        pressure_hpa: lp.pressure_hpa,
                        wind_direction_deg: wind.direction_deg,
                        wind_speed_kt: wind.speed_kt,
                    });
                    stats.groups_decoded += 2;
                }
                Err((group, error)) => stats.drop_group(group, &error),
            }
        }
    }
}

/// Classify a line as repeating fixed-width groups.
///
/// Returns the whitespace tokens when the line has at least `min_groups`
/// tokens and every token is exactly 5 characters. Token content is not
/// checked here; a token with a non-digit character fails later at group
/// decode, dropping only its chunk.
fn fixed_width_groups(line: &str, min_groups: usize) -> Option<Vec<&str>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() >= min_groups && tokens.iter().all(|t| t.len() == 5) {
        Some(tokens)
    } else {
        None
    }
}
