//! I/O adapters for message acquisition and item persistence
//!
//! The decoder and STAC builder are pure; everything that touches the
//! outside world sits behind the traits in this module. The filesystem
//! implementations cover local processing; remote acquisition and catalogue
//! upload are trait contracts for callers to implement against their own
//! infrastructure.

pub mod filesystem;

#[cfg(test)]
pub mod tests;

use async_trait::async_trait;

use crate::Result;
use crate::app::models::RawMessage;
use crate::app::services::stac_builder::StacItem;

pub use filesystem::{DirectoryArchive, JsonItemSink, LocalMessageSource};

/// Fetches the raw text of a single TEMP DROP message
#[async_trait]
pub trait MessageSource {
    async fn fetch(&self, source_id: &str) -> Result<RawMessage>;
}

/// Lists the message identifiers available in an archive
#[async_trait]
pub trait ArchiveLister {
    async fn list(&self) -> Result<Vec<String>>;
}

/// Persists a built STAC item
#[async_trait]
pub trait ItemSink {
    async fn write(&self, item: &StacItem) -> Result<()>;
}

/// Uploads an item to a remote STAC catalogue
#[async_trait]
pub trait CatalogUploader {
    async fn upload(&self, item: &StacItem) -> Result<()>;
}
