//! Error types for storage, import and export.

use std::path::PathBuf;

use era_core::state::SAVE_VERSION;

/// A storage backend failed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// A slot, registry or active-slot write failed.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("encoding save data failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// An archive could not be imported. No local slot was modified.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Import failed: Archive is corrupted or using an incompatible encryption version.")]
    Unrecognized,

    #[error("Version mismatch: Archive is v{archive}, app is v{app}")]
    VersionMismatch { archive: String, app: u32 },

    #[error("encoding imported data failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ImportError {
    /// A mismatch against the running save-format version.
    pub fn version_mismatch(archive: impl Into<String>) -> Self {
        ImportError::VersionMismatch {
            archive: archive.into(),
            app: SAVE_VERSION,
        }
    }
}

/// Slots could not be exported.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("encoding archive failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
