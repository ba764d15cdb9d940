//! End-to-end tests for the message decoder

use super::{SAMPLE_MESSAGE, SAMPLE_SOURCE_ID, decode_sample, decode_text};
use crate::app::models::{ActivePart, MaxWind, PositionVerification, RawMessage, Tropopause};
use crate::app::services::temp_drop_decoder::{GroupDecodeError, TempDropDecoder, segment_lines};
use crate::Error;
use crate::config::DecoderConfig;

#[test]
fn test_segment_lines_trims_and_drops_empties() {
    let lines = segment_lines("  974  \n\n\nUZNT13 KNHC 232347\r\n   \nXXAA\n");
    assert_eq!(lines, vec!["974", "UZNT13 KNHC 232347", "XXAA"]);
}

#[test]
fn test_empty_message_is_rejected() {
    let decoder = TempDropDecoder::new(DecoderConfig::default());
    let message = RawMessage::new("   \n  \n", SAMPLE_SOURCE_ID);

    let error = decoder.decode(&message).unwrap_err();
    assert!(matches!(error, Error::MessageFormat { .. }));
}

#[test]
fn test_minimal_two_line_message_decodes() {
    let result = decode_text("974\nUZNT13 KNHC 232347\n");
    let report = result.report;

    assert_eq!(report.header.serial_line, "974");
    assert_eq!(report.header.originator.as_deref(), Some("UZNT13"));
    assert_eq!(report.header.icao_originator.as_deref(), Some("KNHC"));
    assert_eq!(report.header.transmission_group.as_deref(), Some("232347"));
    assert!(report.mandatory_levels.is_empty());
    assert_eq!(report.verification, PositionVerification::BothAbsent);
}

#[test]
fn test_short_wmo_header_leaves_header_unset() {
    let result = decode_text("974\nUZNT13\n");
    assert!(result.report.header.originator.is_none());
    assert_eq!(result.stats.warnings.len(), 1);
}

#[test]
fn test_part_a_position_fix() {
    let report = decode_sample().report;
    let fix = report.part_a_fix.expect("Part A fix should decode");

    assert_eq!(fix.hour, 23);
    assert_eq!(fix.id_indicator, 1);
    assert_eq!(fix.latitude, 15.3);
    assert_eq!(fix.longitude, -53.9);
    assert_eq!(fix.quadrant, 7);
    assert_eq!(fix.marsden_square, 60);
    assert_eq!(fix.ula, 1);
    assert_eq!(fix.ulo, 4);
}

#[test]
fn test_mandatory_levels_decode_in_order() {
    let report = decode_sample().report;
    assert_eq!(report.mandatory_levels.len(), 2);

    let first = &report.mandatory_levels[0];
    assert_eq!(first.pressure_hpa, Some(1016.5));
    assert_eq!(first.height_m, None);
    assert_eq!(first.temperature_c, 5.2);
    assert_eq!(first.dewpoint_depression_c, 8.0);
    assert_eq!(first.wind_direction_deg, Some(260));
    assert_eq!(first.wind_speed_kt, 12);

    let second = &report.mandatory_levels[1];
    assert_eq!(second.pressure_hpa, None);
    assert_eq!(second.height_m, Some(784_010.0));
    assert_eq!(second.temperature_c, -11.8);
}

#[test]
fn test_malformed_group_drops_only_its_chunk() {
    let text = "\
974
UZNT13 KNHC 232347
XXAA 23231 99153 70539 06014
10165 05208 26012 7840X 11811 28022
";
    let result = decode_text(text);

    assert_eq!(result.report.mandatory_levels.len(), 1);
    assert_eq!(result.report.mandatory_levels[0].pressure_hpa, Some(1016.5));
    assert_eq!(result.stats.groups_dropped, 1);
    assert_eq!(result.stats.warnings.len(), 1);
    assert!(result.stats.warnings[0].contains("7840X"));
}

#[test]
fn test_dropped_group_warning_carries_crate_error_text() {
    let text = "\
974
UZNT13 KNHC 232347
XXAA 23231 99153 70539 06014
10165 05208 26012 7840X 11811 28022
";
    let result = decode_text(text);

    let expected = Error::group_decode(
        "7840X",
        GroupDecodeError::NonDigit {
            group: "7840X".to_string(),
        },
    )
    .to_string();
    assert_eq!(result.stats.warnings[0], expected);
}

#[test]
fn test_tropopause_observed() {
    let report = decode_sample().report;
    match report.tropopause {
        Some(Tropopause::Observed {
            pressure_hpa,
            temperature_c,
            dewpoint_depression_c,
            wind_direction_deg,
            wind_speed_kt,
        }) => {
            assert_eq!(pressure_hpa, 158.0);
            assert_eq!(temperature_c, -68.1);
            assert_eq!(dewpoint_depression_c, 2.0);
            assert_eq!(wind_direction_deg, Some(250));
            assert_eq!(wind_speed_kt, 35);
        }
        other => panic!("expected observed tropopause, got {:?}", other),
    }
}

#[test]
fn test_tropopause_sentinel() {
    let text = "974\nUZNT13 KNHC 232347\nXXAA 23231 99153 70539 06014\n88999\n";
    let report = decode_text(text).report;
    assert_eq!(report.tropopause, Some(Tropopause::NotObserved));
}

#[test]
fn test_max_wind_with_shear() {
    let report = decode_sample().report;
    match report.max_wind {
        Some(MaxWind::Observed {
            ref indicator,
            pressure_hpa,
            wind_direction_deg,
            wind_speed_kt,
            ref shear,
        }) => {
            assert_eq!(indicator, "77");
            assert_eq!(pressure_hpa, 850.0);
            assert_eq!(wind_direction_deg, Some(270));
            assert_eq!(wind_speed_kt, 65);
            let shear = shear.as_ref().expect("shear group should decode");
            assert_eq!(shear.below_kt, 12);
            assert_eq!(shear.above_kt, 8);
        }
        ref other => panic!("expected observed max wind, got {:?}", other),
    }
}

#[test]
fn test_max_wind_sentinel() {
    let text = "974\nUZNT13 KNHC 232347\nXXAA 23231 99153 70539 06014\n77999\n";
    let report = decode_text(text).report;
    assert_eq!(report.max_wind, Some(MaxWind::NotObserved));
}

#[test]
fn test_sounding_system_attached_to_active_part() {
    let report = decode_sample().report;
    let sounding = report.sounding_system.expect("31313 line should decode");

    assert_eq!(sounding.attached_to, ActivePart::PartA);
    assert_eq!(sounding.solar_ir_correction, 0);
    assert_eq!(sounding.radiosonde_system, 96);
    assert_eq!(sounding.tracking_technique, 8);
    assert_eq!(sounding.launch_hour, 17);
    assert_eq!(sounding.launch_minute, 23);
}

#[test]
fn test_sounding_system_after_part_b_header() {
    let text = "\
974
UZNT13 KNHC 232347
XXBB 23238 99153 70539 06014
31313 09608 81723
";
    let report = decode_text(text).report;
    assert_eq!(
        report.sounding_system.unwrap().attached_to,
        ActivePart::PartB
    );
}

#[test]
fn test_significant_temp_levels() {
    let report = decode_sample().report;
    assert_eq!(report.significant_temp_levels.len(), 2);

    let surface = &report.significant_temp_levels[0];
    assert_eq!(surface.level_number, 0);
    assert_eq!(surface.pressure_hpa, 165.0);
    assert_eq!(surface.temperature_c, 5.2);

    let upper = &report.significant_temp_levels[1];
    assert_eq!(upper.level_number, 11);
    assert_eq!(upper.pressure_hpa, 850.0);
    assert_eq!(upper.temperature_c, -11.8);
}

#[test]
fn test_significant_wind_levels() {
    let report = decode_sample().report;
    assert_eq!(report.significant_wind_levels.len(), 2);

    let surface = &report.significant_wind_levels[0];
    assert_eq!(surface.level_number, 0);
    assert_eq!(surface.wind_direction_deg, Some(260));
    assert_eq!(surface.wind_speed_kt, 12);

    let upper = &report.significant_wind_levels[1];
    assert_eq!(upper.level_number, 11);
    assert_eq!(upper.wind_direction_deg, Some(280));
    assert_eq!(upper.wind_speed_kt, 22);
}

#[test]
fn test_consistent_fixes_verify_clean() {
    let report = decode_sample().report;
    assert_eq!(report.verification, PositionVerification::Consistent);
}

#[test]
fn test_unrecognized_lines_are_skipped_not_fatal() {
    let text = "\
974
UZNT13 KNHC 232347
SOME FREE TEXT LINE
XXAA 23231 99153 70539 06014
";
    let result = decode_text(text);
    assert_eq!(result.stats.lines_skipped, 1);
    assert!(result.report.part_a_fix.is_some());
}

#[test]
fn test_decode_is_deterministic() {
    let first = decode_sample();
    let second = decode_sample();
    assert_eq!(first.report, second.report);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_sample_message_decodes_without_warnings() {
    let result = decode_text(SAMPLE_MESSAGE);
    assert!(
        result.stats.warnings.is_empty(),
        "unexpected warnings: {:?}",
        result.stats.warnings
    );
    assert_eq!(result.stats.groups_decoded, 19);
    assert_eq!(result.stats.lines_skipped, 0);
}
