//! Reading and writing slot blobs, the slot registry and the active slot id.
//!
//! Reads never fail on bad data: unreadable registry or slot text degrades
//! to defaults through migration, with a warning. Only backend failures are
//! reported.

use era_core::migration::{migrate_game_state, migrate_registry};
use era_core::state::{GameState, SaveMetadata, default_registry};
use serde_json::Value;
use tracing::warn;

use crate::error::{PersistError, StorageError};
use crate::layout::StorageLayout;
use crate::storage::SaveStorage;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The stored registry, normalized to the layout's slot count.
pub fn load_registry(
    storage: &dyn SaveStorage,
    layout: &StorageLayout,
    now_ms: u64,
) -> Result<Vec<SaveMetadata>, StorageError> {
    let Some(text) = storage.get(&layout.registry_key())? else {
        return Ok(default_registry(layout.slot_count(), now_ms));
    };
    let loaded = serde_json::from_str::<Value>(&text).unwrap_or_else(|e| {
        warn!(error = %e, "stored slot registry is unreadable, using defaults");
        Value::Null
    });
    Ok(migrate_registry(&loaded, layout.slot_count(), now_ms))
}

pub fn store_registry(
    storage: &mut dyn SaveStorage,
    layout: &StorageLayout,
    registry: &[SaveMetadata],
) -> Result<(), PersistError> {
    let text = serde_json::to_string(registry)?;
    storage.set(&layout.registry_key(), &text)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Active slot
// ---------------------------------------------------------------------------

/// The last active slot id, or 1 when absent or out of range.
pub fn load_active_slot(storage: &dyn SaveStorage, layout: &StorageLayout) -> Result<u32, StorageError> {
    let stored = storage.get(&layout.active_key())?;
    Ok(stored
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|id| layout.contains_slot(*id))
        .unwrap_or(1))
}

pub fn store_active_slot(
    storage: &mut dyn SaveStorage,
    layout: &StorageLayout,
    slot_id: u32,
) -> Result<(), StorageError> {
    storage.set(&layout.active_key(), &slot_id.to_string())
}

// ---------------------------------------------------------------------------
// Slot blobs
// ---------------------------------------------------------------------------

/// Load and migrate a slot. `None` when the slot has never been written.
pub fn load_slot_state(
    storage: &dyn SaveStorage,
    layout: &StorageLayout,
    slot_id: u32,
    now_ms: u64,
) -> Result<Option<GameState>, StorageError> {
    let Some(text) = storage.get(&layout.slot_key(slot_id))? else {
        return Ok(None);
    };
    let loaded = serde_json::from_str::<Value>(&text).unwrap_or_else(|e| {
        warn!(slot = slot_id, error = %e, "slot data is unreadable, starting from defaults");
        Value::Null
    });
    Ok(Some(migrate_game_state(&loaded, slot_id, now_ms)))
}

/// Raw JSON of a slot, for export. Unparsable blobs read as `None`.
pub fn load_slot_value(
    storage: &dyn SaveStorage,
    layout: &StorageLayout,
    slot_id: u32,
) -> Result<Option<Value>, StorageError> {
    let Some(text) = storage.get(&layout.slot_key(slot_id))? else {
        return Ok(None);
    };
    match serde_json::from_str(&text) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!(slot = slot_id, error = %e, "skipping unreadable slot data");
            Ok(None)
        }
    }
}

pub fn store_slot_state(
    storage: &mut dyn SaveStorage,
    layout: &StorageLayout,
    state: &GameState,
) -> Result<(), PersistError> {
    let text = serde_json::to_string(state)?;
    storage.set(&layout.slot_key(state.slot_id), &text)?;
    Ok(())
}

pub fn remove_slot(
    storage: &mut dyn SaveStorage,
    layout: &StorageLayout,
    slot_id: u32,
) -> Result<(), StorageError> {
    storage.remove(&layout.slot_key(slot_id))
}
