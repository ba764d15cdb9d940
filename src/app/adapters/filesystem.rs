//! Filesystem implementations of the adapter traits
//!
//! Messages are read from local `.txt` files and built STAC items are
//! persisted as pretty-printed JSON, one file per item, named after the
//! item identifier.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use super::{ArchiveLister, ItemSink, MessageSource};
use crate::app::models::RawMessage;
use crate::app::services::stac_builder::StacItem;
use crate::constants::MESSAGE_FILE_EXTENSION;
use crate::{Error, Result};

/// Reads raw messages from files on the local filesystem
#[derive(Debug, Clone, Default)]
pub struct LocalMessageSource;

impl LocalMessageSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageSource for LocalMessageSource {
    /// Read the file at `source_id` into a raw message.
    ///
    /// The source identifier doubles as the path; the file name carries the
    /// reporting timestamp.
    async fn fetch(&self, source_id: &str) -> Result<RawMessage> {
        let path = Path::new(source_id);
        if !path.exists() {
            return Err(Error::file_not_found(source_id));
        }

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read message file '{}'", source_id), e))?;

        debug!("Read {} bytes from '{}'", text.len(), source_id);
        Ok(RawMessage::new(text, source_id))
    }
}

/// Lists TEMP DROP message files under a local archive directory
#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArchiveLister for DirectoryArchive {
    /// Walk the archive recursively, returning `.txt` file paths in sorted
    /// order for deterministic batch runs
    async fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(Error::file_not_found(self.root.display().to_string()));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(MESSAGE_FILE_EXTENSION))
            {
                paths.push(entry.path().display().to_string());
            }
        }

        paths.sort();
        debug!(
            "Found {} message files under '{}'",
            paths.len(),
            self.root.display()
        );
        Ok(paths)
    }
}

/// Writes STAC items as pretty-printed JSON files in an output directory
#[derive(Debug, Clone)]
pub struct JsonItemSink {
    output_dir: PathBuf,
}

impl JsonItemSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Output path for an item, with filesystem-hostile identifier
    /// characters replaced by underscores
    pub fn path_for(&self, item: &StacItem) -> PathBuf {
        let sanitized: String = item
            .id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.output_dir.join(format!("{sanitized}.json"))
    }
}

#[async_trait]
impl ItemSink for JsonItemSink {
    async fn write(&self, item: &StacItem) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            Error::io(
                format!(
                    "Failed to create output directory '{}'",
                    self.output_dir.display()
                ),
                e,
            )
        })?;

        let path = self.path_for(item);
        let json = item.to_json()?;
        tokio::fs::write(&path, json).await.map_err(|e| {
            Error::io(format!("Failed to write item to '{}'", path.display()), e)
        })?;

        debug!("Wrote item '{}' to '{}'", item.id, path.display());
        Ok(())
    }
}
