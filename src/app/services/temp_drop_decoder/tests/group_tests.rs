//! Tests for the fixed-width group decoders

use crate::app::services::temp_drop_decoder::group_decoders::{
    GroupDecodeError, decode_level_pressure, decode_pressure_or_height,
    decode_temperature_dewpoint, decode_wind,
};
use crate::config::DewpointConvention;

#[test]
fn test_pressure_branch_leading_digits_zero_to_five() {
    let decoded = decode_pressure_or_height("10165").unwrap();
    assert_eq!(decoded.pressure_hpa, Some(1016.5));
    assert_eq!(decoded.height_m, None);

    let decoded = decode_pressure_or_height("00850").unwrap();
    assert_eq!(decoded.pressure_hpa, Some(85.0));

    let decoded = decode_pressure_or_height("59999").unwrap();
    assert_eq!(decoded.pressure_hpa, Some(5999.9));
}

#[test]
fn test_height_branch_leading_digits_six_to_eight() {
    let decoded = decode_pressure_or_height("60000").unwrap();
    assert_eq!(decoded.pressure_hpa, None);
    assert_eq!(decoded.height_m, Some(600_000.0));

    let decoded = decode_pressure_or_height("78401").unwrap();
    assert_eq!(decoded.height_m, Some(784_010.0));

    let decoded = decode_pressure_or_height("89999").unwrap();
    assert_eq!(decoded.height_m, Some(899_990.0));
}

#[test]
fn test_high_pressure_branch_leading_digit_nine() {
    let decoded = decode_pressure_or_height("90125").unwrap();
    assert_eq!(decoded.pressure_hpa, Some(18_012.5));
    assert_eq!(decoded.height_m, None);
}

#[test]
fn test_pressure_or_height_rejects_bad_input() {
    assert_eq!(
        decode_pressure_or_height("1234"),
        Err(GroupDecodeError::BadLength { length: 4 })
    );
    assert_eq!(
        decode_pressure_or_height("123456"),
        Err(GroupDecodeError::BadLength { length: 6 })
    );
    assert_eq!(
        decode_pressure_or_height("12A45"),
        Err(GroupDecodeError::NonDigit {
            group: "12A45".to_string()
        })
    );
}

#[test]
fn test_temperature_sign_digits() {
    let decoded =
        decode_temperature_dewpoint("05208", DewpointConvention::WholeDegrees).unwrap();
    assert_eq!(decoded.temperature_c, 5.2);
    assert_eq!(decoded.dewpoint_depression_c, 8.0);

    let decoded =
        decode_temperature_dewpoint("68112", DewpointConvention::WholeDegrees).unwrap();
    assert_eq!(decoded.temperature_c, -68.1);
    assert_eq!(decoded.dewpoint_depression_c, 2.0);
}

#[test]
fn test_temperature_rejects_invalid_sign_digit() {
    assert_eq!(
        decode_temperature_dewpoint("05228", DewpointConvention::WholeDegrees),
        Err(GroupDecodeError::BadSignDigit { digit: 2 })
    );
    assert_eq!(
        decode_temperature_dewpoint("00090", DewpointConvention::WholeDegrees),
        Err(GroupDecodeError::BadSignDigit { digit: 9 })
    );
}

#[test]
fn test_dewpoint_convention_changes_unit() {
    let whole = decode_temperature_dewpoint("05208", DewpointConvention::WholeDegrees).unwrap();
    let tenths = decode_temperature_dewpoint("05208", DewpointConvention::Tenths).unwrap();

    assert_eq!(whole.dewpoint_depression_c, 8.0);
    assert_eq!(tenths.dewpoint_depression_c, 0.8);
    assert_eq!(whole.temperature_c, tenths.temperature_c);
}

#[test]
fn test_wind_calm_is_zero_not_absent() {
    let decoded = decode_wind("00000").unwrap();
    assert_eq!(decoded.direction_deg, Some(0));
    assert_eq!(decoded.speed_kt, 0);
}

#[test]
fn test_wind_variable_direction_is_absent() {
    let decoded = decode_wind("99912").unwrap();
    assert_eq!(decoded.direction_deg, None);
    assert_eq!(decoded.speed_kt, 12);
}

#[test]
fn test_wind_normal_decode() {
    let decoded = decode_wind("26012").unwrap();
    assert_eq!(decoded.direction_deg, Some(260));
    assert_eq!(decoded.speed_kt, 12);
}

#[test]
fn test_level_pressure_splits_number_and_pressure() {
    let decoded = decode_level_pressure("11850").unwrap();
    assert_eq!(decoded.level_number, 11);
    assert_eq!(decoded.pressure_hpa, 850.0);

    let decoded = decode_level_pressure("00165").unwrap();
    assert_eq!(decoded.level_number, 0);
    assert_eq!(decoded.pressure_hpa, 165.0);
}

#[test]
fn test_reencoded_groups_decode_to_original_values() {
    // Pressures in the 0-5 leading-digit range encode as tenths of a hPa
    for pressure in [85.0_f64, 500.0, 1016.5, 5999.9] {
        let group = format!("{:05}", (pressure * 10.0).round() as u32);
        let decoded = decode_pressure_or_height(&group).unwrap();
        assert_eq!(decoded.pressure_hpa, Some(pressure));
        assert_eq!(decoded.height_m, None);
    }

    // Heights in the 6-8 leading-digit range encode as decameters
    for height in [600_000.0_f64, 784_010.0, 899_990.0] {
        let group = format!("{:05}", (height / 10.0) as u32);
        let decoded = decode_pressure_or_height(&group).unwrap();
        assert_eq!(decoded.height_m, Some(height));
        assert_eq!(decoded.pressure_hpa, None);
    }

    // Temperature magnitude in tenths, sign digit, whole-degree depression
    for (temperature, depression) in [(5.2_f64, 8.0_f64), (-11.8, 1.0), (0.0, 0.0)] {
        let sign_digit = if temperature < 0.0 { 1 } else { 0 };
        let group = format!(
            "{:03}{}{}",
            (temperature.abs() * 10.0).round() as u32,
            sign_digit,
            depression as u32
        );
        let decoded =
            decode_temperature_dewpoint(&group, DewpointConvention::WholeDegrees).unwrap();
        assert_eq!(decoded.temperature_c, temperature);
        assert_eq!(decoded.dewpoint_depression_c, depression);
    }

    // Wind direction and speed encode positionally
    for (direction, speed) in [(0_u16, 0_u16), (260, 12), (350, 99)] {
        let group = format!("{:03}{:02}", direction, speed);
        let decoded = decode_wind(&group).unwrap();
        assert_eq!(decoded.direction_deg, Some(direction));
        assert_eq!(decoded.speed_kt, speed);
    }
}

#[test]
fn test_level_pressure_rejects_non_digits() {
    assert!(matches!(
        decode_level_pressure("11x50"),
        Err(GroupDecodeError::NonDigit { .. })
    ));
}
