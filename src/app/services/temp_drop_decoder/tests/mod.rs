//! Test suite for the TEMP DROP decoder

pub mod decoder_tests;
pub mod group_tests;

use crate::app::models::RawMessage;
use crate::app::services::temp_drop_decoder::{DecodeResult, TempDropDecoder};
use crate::config::DecoderConfig;

/// A complete two-part observation with tropopause, max wind, sounding
/// system, mission info and remarks
pub const SAMPLE_MESSAGE: &str = "\
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

pub const SAMPLE_SOURCE_ID: &str = "REPNT3-KNHC.202401232347.txt";

pub fn decode_text(text: &str) -> DecodeResult {
    let decoder = TempDropDecoder::new(DecoderConfig::default());
    decoder
        .decode(&RawMessage::new(text, SAMPLE_SOURCE_ID))
        .expect("decode should succeed")
}

pub fn decode_sample() -> DecodeResult {
    decode_text(SAMPLE_MESSAGE)
}
