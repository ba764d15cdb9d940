//! Dropsonde Processor Library
//!
//! A Rust library for decoding NHC aircraft reconnaissance TEMP DROP
//! messages into structured observation reports and projecting them into
//! STAC metadata items for cataloguing.
//!
//! This library provides tools for:
//! - Decoding WMO fixed-format 5-digit groups (pressure/height, temperature,
//!   dew-point depression, wind) with graceful per-group error recovery
//! - Walking the Part A / Part B section structure of a TEMP DROP message
//! - Parsing the free-text remarks section into typed sub-records
//! - Reconciling independently transmitted Part A / Part B position fixes
//! - Building STAC items with point geometry and namespaced properties

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod stac_builder;
        pub mod temp_drop_decoder;
    }
    pub mod adapters;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{RawMessage, Report};
pub use app::services::stac_builder::StacItem;
pub use app::services::temp_drop_decoder::TempDropDecoder;
pub use app::services::temp_drop_decoder::group_decoders::GroupDecodeError;
pub use config::DecoderConfig;

/// Result type alias for the dropsonde processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for TEMP DROP processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Message is structurally unreadable (empty or not text)
    #[error("Unreadable TEMP DROP message from '{source_id}': {message}")]
    MessageFormat { source_id: String, message: String },

    /// A fixed-width 5-digit group failed to decode
    #[error("Group decode error in '{group}': {source}")]
    GroupDecode {
        group: String,
        #[source]
        source: GroupDecodeError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a message format error
    pub fn message_format(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MessageFormat {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create a group decode error scoped to one group
    pub fn group_decode(group: impl Into<String>, source: GroupDecodeError) -> Self {
        Self::GroupDecode {
            group: group.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
