//! Whole-save export and import.

use era_core::migration::migrate_registry;
use era_core::state::SaveMetadata;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::archive::{Archive, pack_archive, parse_archive};
use crate::error::{ExportError, ImportError, PersistError};
use crate::layout::StorageLayout;
use crate::slots::{load_registry, load_slot_value, remove_slot, store_registry};
use crate::storage::SaveStorage;

/// A packed archive ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// What an import wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// Slot ids written, ascending.
    pub slots_written: Vec<u32>,
    /// The registry now stored.
    pub registry: Vec<SaveMetadata>,
}

/// Pack the registry and every stored slot into an archive file.
pub fn export_archive(
    storage: &dyn SaveStorage,
    layout: &StorageLayout,
    now_ms: u64,
) -> Result<ExportFile, ExportError> {
    let registry = load_registry(storage, layout, now_ms)?;
    let mut slots = Map::new();
    for meta in &registry {
        if let Some(state) = load_slot_value(storage, layout, meta.id)? {
            slots.insert(meta.id.to_string(), state);
        }
    }
    let archive = Archive::new(&registry, slots)?;
    let contents = pack_archive(&archive)?;
    info!(slots = archive.slots.len(), "exported archive");
    Ok(ExportFile {
        file_name: layout.export_file_name(now_ms),
        contents,
    })
}

/// Replace every local slot and the registry with an archive's contents.
///
/// Nothing is written unless the archive is recognized and its version
/// matches. Slots with ids outside the layout are dropped.
pub fn import_archive(
    storage: &mut dyn SaveStorage,
    layout: &StorageLayout,
    raw: &str,
    now_ms: u64,
) -> Result<ImportSummary, ImportError> {
    let Some(archive) = parse_archive(raw, now_ms) else {
        warn!("import rejected: unrecognized archive");
        return Err(ImportError::Unrecognized);
    };
    if !archive.version_matches() {
        let version = archive.version_label();
        warn!(archive_version = %version, "import rejected: version mismatch");
        return Err(ImportError::version_mismatch(version));
    }

    let registry = migrate_registry(&Value::Array(archive.registry.clone()), layout.slot_count(), now_ms);
    let mut blobs = Vec::new();
    for (id, state) in archive.numbered_slots() {
        if layout.contains_slot(id) {
            blobs.push((id, serde_json::to_string(state)?));
        } else {
            warn!(slot = id, "dropping archived slot outside the slot range");
        }
    }
    let dropped = archive.slots.len() - archive.numbered_slots().count();
    if dropped > 0 {
        warn!(count = dropped, "dropping archived slots without a numeric id");
    }
    blobs.sort_by_key(|(id, _)| *id);

    for id in layout.slot_ids() {
        remove_slot(storage, layout, id)?;
    }
    for (id, text) in &blobs {
        storage.set(&layout.slot_key(*id), text)?;
    }
    store_registry(storage, layout, &registry).map_err(|e| match e {
        PersistError::Encode(e) => ImportError::Encode(e),
        PersistError::Storage(e) => ImportError::Storage(e),
    })?;

    let slots_written: Vec<u32> = blobs.iter().map(|(id, _)| *id).collect();
    info!(slots = ?slots_written, "imported archive");
    Ok(ImportSummary {
        slots_written,
        registry,
    })
}
