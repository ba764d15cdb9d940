//! Test suite for the STAC builder


use chrono::{TimeZone, Utc};

use crate::app::models::{
    Header, MissionInfo, PositionFix, PositionVerification, RawMessage, Report,
};

/// A decoded report with a Part A fix and mission info, as the decoder
/// would produce for a routine Atlantic observation
pub fn sample_report() -> Report {
    let message = RawMessage::with_date(
        "974\nUZNT13 KNHC 232347\n",
        "REPNT3-KNHC.202401232347.txt",
        Utc.with_ymd_and_hms(2024, 1, 23, 23, 47, 0).unwrap(),
    );

    let mut report = Report::new(&message);
    report.header = Header {
        serial_line: "974".to_string(),
        originator: Some("UZNT13".to_string()),
        icao_originator: Some("KNHC".to_string()),
        transmission_group: Some("232347".to_string()),
    };
    report.part_a_fix = Some(PositionFix {
        hour: 23,
        id_indicator: 1,
        latitude: 15.3,
        longitude: -53.9,
        quadrant: 7,
        marsden_square: 60,
        ula: 1,
        ulo: 4,
    });
    report.verification = PositionVerification::FilledFromA;
    report.remarks.mission_info = Some(MissionInfo {
        raw: "AF306 0703A CINDY OB 07".to_string(),
        aircraft_id: Some("AF306".to_string()),
        flight_mission_id: Some("0703A".to_string()),
        storm_name: Some("CINDY".to_string()),
        observation_indicator: Some("OB".to_string()),
        storm_number: Some("07".to_string()),
        ..MissionInfo::default()
    });
    report
}

/// A report with no position fix in either part
pub fn positionless_report() -> Report {
    let mut report = sample_report();
    report.part_a_fix = None;
    report.part_b_fix = None;
    report.verification = PositionVerification::BothAbsent;
    report
}
