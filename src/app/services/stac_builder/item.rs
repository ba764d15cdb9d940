//! STAC item construction from decoded reports
//!
//! Projects a [`Report`] into a minimal "who, what, when, where" metadata
//! item: deterministic identifier, point geometry from the reconciled
//! launch position, a flat namespaced property bag and the raw message
//! attached as a linked asset. The projection performs no I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::properties::flatten_properties;
use crate::app::models::Report;
use crate::constants::{ITEM_ID_SUFFIX, RAW_MESSAGE_ASSET_KEY, STAC_VERSION};

/// GeoJSON point geometry for the launch position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,

    /// `[longitude, latitude]` per GeoJSON convention
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            geometry_type: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }
}

/// An asset linked from a STAC item (reference only, never embedded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub href: String,

    #[serde(rename = "type")]
    pub media_type: String,

    pub title: String,
    pub roles: Vec<String>,
}

/// A projected metadata item, ready for cataloguing.
///
/// Derived and disposable: the durable structured result is the [`Report`]
/// it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StacItem {
    #[serde(rename = "type")]
    pub item_type: String,

    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub geometry: Option<PointGeometry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,

    pub properties: Map<String, Value>,
    pub links: Vec<Value>,
    pub assets: BTreeMap<String, Asset>,
}

impl StacItem {
    /// Serialize the item as pretty-printed STAC JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the deterministic item identifier from originator, ICAO code and
/// the canonical timestamp (ISO-8601 UTC, colons replaced for portability)
pub fn item_id(report: &Report) -> String {
    format!(
        "{}-{}-{}-{}",
        report.header.originator.as_deref().unwrap_or("unknown"),
        report.header.icao_originator.as_deref().unwrap_or("unknown"),
        report.message_date.format("%Y-%m-%dT%H-%M-%SZ"),
        ITEM_ID_SUFFIX
    )
}

/// Project a decoded report into a STAC item
pub fn build_item(report: &Report) -> StacItem {
    let geometry = match report.position() {
        Some((latitude, longitude)) => Some(PointGeometry::new(longitude, latitude)),
        None => {
            warn!(
                "No position fix in report '{}'; building item with null geometry",
                report.source_id
            );
            None
        }
    };

    let bbox = geometry
        .as_ref()
        .map(|g| [g.coordinates[0], g.coordinates[1], g.coordinates[0], g.coordinates[1]]);

    let mut assets = BTreeMap::new();
    assets.insert(
        RAW_MESSAGE_ASSET_KEY.to_string(),
        Asset {
            href: report.source_id.clone(),
            media_type: "text/plain".to_string(),
            title: "Raw Dropsonde Message".to_string(),
            roles: vec!["metadata".to_string(), "source-data".to_string()],
        },
    );

    StacItem {
        item_type: "Feature".to_string(),
        stac_version: STAC_VERSION.to_string(),
        stac_extensions: Vec::new(),
        id: item_id(report),
        geometry,
        bbox,
        properties: flatten_properties(report),
        links: Vec::new(),
        assets,
    }
}
