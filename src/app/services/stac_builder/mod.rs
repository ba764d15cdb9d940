//! STAC metadata projection
//!
//! Builds catalogue-ready STAC items from decoded reports. The builder is a
//! pure projection over [`crate::app::models::Report`]; persistence and
//! upload live behind the adapter traits in [`crate::app::adapters`].
//!
//! ## Architecture
//!
//! - [`item`] - Item assembly: identifier, geometry, bbox, linked assets
//! - [`properties`] - Flattening of decoded fields into namespaced properties

pub mod item;
pub mod properties;

#[cfg(test)]
pub mod tests;

pub use item::{Asset, PointGeometry, StacItem, build_item, item_id};
pub use properties::flatten_properties;
