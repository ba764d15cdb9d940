//! Property flattening for STAC items
//!
//! Every decoded field lands in the item's flat property map under the
//! `dropsonde:` namespace. Values that never decoded stay out of the map
//! rather than appearing as nulls.

use serde_json::{Map, Value, json};

use crate::app::models::{MaxWind, RemarkValue, Report, Tropopause};
use crate::constants::PROPERTY_NAMESPACE;

/// Insert a namespaced property, skipping nulls
fn put(map: &mut Map<String, Value>, key: &str, value: Value) {
    if !value.is_null() {
        map.insert(format!("{PROPERTY_NAMESPACE}:{key}"), value);
    }
}

/// Flatten a report into the namespaced STAC property map
pub fn flatten_properties(report: &Report) -> Map<String, Value> {
    let mut map = Map::new();

    // STAC requires a top-level datetime property, un-namespaced
    map.insert(
        "datetime".to_string(),
        json!(report.message_date.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
    );

    put(&mut map, "source_id", json!(report.source_id));
    put(&mut map, "serial_line", json!(report.header.serial_line));
    put(&mut map, "originator", json!(report.header.originator));
    put(
        &mut map,
        "icao_originator",
        json!(report.header.icao_originator),
    );
    put(
        &mut map,
        "transmission_group",
        json!(report.header.transmission_group),
    );
    put(
        &mut map,
        "position_verification",
        serde_json::to_value(&report.verification).unwrap_or(Value::Null),
    );

    if let Some((latitude, longitude)) = report.position() {
        put(&mut map, "latitude", json!(latitude));
        put(&mut map, "longitude", json!(longitude));
    }

    if let Some(fix) = &report.part_a_fix {
        put(&mut map, "observation_hour", json!(fix.hour));
        put(&mut map, "marsden_square", json!(fix.marsden_square));
    }

    put(
        &mut map,
        "mandatory_level_count",
        json!(report.mandatory_levels.len()),
    );
    put(
        &mut map,
        "significant_temp_level_count",
        json!(report.significant_temp_levels.len()),
    );
    put(
        &mut map,
        "significant_wind_level_count",
        json!(report.significant_wind_levels.len()),
    );

    flatten_tropopause(&mut map, &report.tropopause);
    flatten_max_wind(&mut map, &report.max_wind);

    if let Some(sounding) = &report.sounding_system {
        put(
            &mut map,
            "sounding_solar_ir_correction",
            json!(sounding.solar_ir_correction_description()),
        );
        put(
            &mut map,
            "sounding_radiosonde_system",
            json!(sounding.radiosonde_system_description()),
        );
        put(
            &mut map,
            "sounding_tracking_technique",
            json!(sounding.tracking_technique_description()),
        );
        put(
            &mut map,
            "sounding_launch_time",
            json!(format!(
                "{:02}:{:02}Z",
                sounding.launch_hour, sounding.launch_minute
            )),
        );
    }

    if let Some(mission) = &report.remarks.mission_info {
        put(&mut map, "mission_aircraft_id", json!(mission.aircraft_id));
        put(
            &mut map,
            "mission_flight_id",
            json!(mission.flight_mission_id),
        );
        put(
            &mut map,
            "mission_iop",
            json!(mission.intensive_observation_period),
        );
        put(&mut map, "mission_storm_name", json!(mission.storm_name));
        put(
            &mut map,
            "mission_observation_indicator",
            json!(mission.observation_indicator),
        );
        put(&mut map, "mission_storm_number", json!(mission.storm_number));
        put(
            &mut map,
            "mission_additional_info",
            json!(mission.additional_info),
        );
    }

    flatten_remarks(&mut map, report);

    map
}

fn flatten_tropopause(map: &mut Map<String, Value>, tropopause: &Option<Tropopause>) {
    match tropopause {
        Some(Tropopause::NotObserved) => {
            put(map, "tropopause_observed", json!(false));
        }
        Some(Tropopause::Observed {
            pressure_hpa,
            temperature_c,
            dewpoint_depression_c,
            wind_direction_deg,
            wind_speed_kt,
        }) => {
            put(map, "tropopause_observed", json!(true));
            put(map, "tropopause_pressure_hpa", json!(pressure_hpa));
            put(map, "tropopause_temperature_c", json!(temperature_c));
            put(
                map,
                "tropopause_dewpoint_depression_c",
                json!(dewpoint_depression_c),
            );
            put(
                map,
                "tropopause_wind_direction_deg",
                json!(wind_direction_deg),
            );
            put(map, "tropopause_wind_speed_kt", json!(wind_speed_kt));
        }
        None => {}
    }
}

fn flatten_max_wind(map: &mut Map<String, Value>, max_wind: &Option<MaxWind>) {
    match max_wind {
        Some(MaxWind::NotObserved) => {
            put(map, "max_wind_observed", json!(false));
        }
        Some(MaxWind::Observed {
            pressure_hpa,
            wind_direction_deg,
            wind_speed_kt,
            shear,
            ..
        }) => {
            put(map, "max_wind_observed", json!(true));
            put(map, "max_wind_pressure_hpa", json!(pressure_hpa));
            put(map, "max_wind_direction_deg", json!(wind_direction_deg));
            put(map, "max_wind_speed_kt", json!(wind_speed_kt));
            if let Some(shear) = shear {
                put(map, "max_wind_shear_below_kt", json!(shear.below_kt));
                put(map, "max_wind_shear_above_kt", json!(shear.above_kt));
            }
        }
        None => {}
    }
}

/// Serialize a remark value: parsed structure when available, raw text otherwise
fn remark_value<T: serde::Serialize>(value: &RemarkValue<T>) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn flatten_remarks(map: &mut Map<String, Value>, report: &Report) {
    let remarks = &report.remarks;

    if let Some(description) = &remarks.initial_description {
        put(map, "remarks_description", json!(description));
    }
    if let Some(release) = &remarks.release_point {
        put(map, "remarks_release_point", remark_value(release));
    }
    if let Some(splash) = &remarks.splash_point {
        put(map, "remarks_splash_point", remark_value(splash));
    }
    if let Some(mbl) = &remarks.boundary_layer_wind {
        put(map, "remarks_mbl_wind", remark_value(mbl));
    }
    if let Some(aev) = &remarks.eye_fix {
        put(map, "remarks_aev", remark_value(aev));
    }
    if let Some(dlm) = &remarks.dlm_wind {
        put(map, "remarks_dlm_wind", remark_value(dlm));
    }
    if let Some(wl) = &remarks.wind_level {
        put(map, "remarks_wind_level", remark_value(wl));
    }
    if let Some(eyewall) = &remarks.eyewall {
        put(map, "remarks_eyewall", remark_value(eyewall));
    }
}
