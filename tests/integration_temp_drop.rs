//! End-to-end integration test: message file in, STAC item JSON out

use std::fs;

use tempfile::TempDir;

use dropsonde_processor::app::adapters::{
    ArchiveLister, DirectoryArchive, ItemSink, JsonItemSink, LocalMessageSource, MessageSource,
};
use dropsonde_processor::app::models::PositionVerification;
use dropsonde_processor::app::services::stac_builder::build_item;
use dropsonde_processor::{DecoderConfig, TempDropDecoder};

const MESSAGE: &str = "\
974
UZNT13 KNHC 232347
XXAA 23231 99153 70539 06014
10165 05208 26012 78401 11811 28022
88158 68112 25035
77850 27065 41208
31313 09608 81723
61616 AF306 0703A CINDY OB 07
62626 REL 15.30N 53.90W 23/2345Z SPG 15.21N 53.85W 23/2358Z MBL WND 2346Z 280/12 KNOTS AT 150 FEET
XXBB 23238 99153 70539 06014
00165 05208 11850 11811
21212 00165 26012 11850 28022
";

#[tokio::test]
async fn full_pipeline_from_file_to_stac_item() {
    let archive_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let message_path = archive_dir.path().join("REPNT3-KNHC.202401232347.txt");
    fs::write(&message_path, MESSAGE).unwrap();

    // Discover
    let archive = DirectoryArchive::new(archive_dir.path());
    let paths = archive.list().await.unwrap();
    assert_eq!(paths.len(), 1);

    // Fetch and decode
    let source = LocalMessageSource::new();
    let message = source.fetch(&paths[0]).await.unwrap();
    let decoder = TempDropDecoder::new(DecoderConfig::default());
    let result = decoder.decode(&message).unwrap();

    let report = &result.report;
    assert_eq!(report.verification, PositionVerification::Consistent);
    assert_eq!(report.mandatory_levels.len(), 2);
    assert_eq!(report.significant_temp_levels.len(), 2);
    assert_eq!(report.significant_wind_levels.len(), 2);
    assert!(report.tropopause.is_some());
    assert!(report.max_wind.is_some());
    assert!(result.stats.warnings.is_empty());

    // Project and persist
    let item = build_item(report);
    assert_eq!(item.id, "UZNT13-KNHC-2024-01-23T23-47-00Z-dropsonde");

    let sink = JsonItemSink::new(output_dir.path());
    sink.write(&item).await.unwrap();

    let written = fs::read_to_string(sink.path_for(&item)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(value["type"], "Feature");
    assert_eq!(value["stac_version"], "1.0.0");
    assert_eq!(value["geometry"]["coordinates"][0], -53.9);
    assert_eq!(value["geometry"]["coordinates"][1], 15.3);
    assert_eq!(value["properties"]["datetime"], "2024-01-23T23:47:00Z");
    assert_eq!(value["properties"]["dropsonde:mission_storm_name"], "CINDY");
    assert_eq!(
        value["properties"]["dropsonde:position_verification"],
        "consistent"
    );
    assert_eq!(
        value["assets"]["raw_dropsonde_message"]["href"],
        serde_json::json!(paths[0])
    );
}

#[tokio::test]
async fn malformed_groups_degrade_without_failing_the_pipeline() {
    let archive_dir = TempDir::new().unwrap();

    let degraded = MESSAGE.replace("78401 11811 28022", "78401 1181X 28022");
    let message_path = archive_dir.path().join("REPNT3-KNHC.202401232347.txt");
    fs::write(&message_path, degraded).unwrap();

    let source = LocalMessageSource::new();
    let message = source
        .fetch(message_path.to_str().unwrap())
        .await
        .unwrap();
    let result = TempDropDecoder::new(DecoderConfig::default())
        .decode(&message)
        .unwrap();

    assert_eq!(result.report.mandatory_levels.len(), 1);
    assert_eq!(result.stats.groups_dropped, 1);

    // The rest of the message still decodes fully
    assert_eq!(result.report.significant_wind_levels.len(), 2);
    assert!(result.report.remarks.release_point.is_some());
}
