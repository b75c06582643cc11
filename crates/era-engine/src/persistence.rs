//! Slot management and the deferred write queue.
//!
//! Saving, starting a game, changing the main slot and deleting a slot
//! update the in-memory registry at once and queue their storage writes.
//! The queue is drained in order at the start of the next
//! [`Engine::advance`] or by [`Engine::flush_persistence`]; until then
//! [`Engine::is_saving`] reports `true`. Import and export flush first so
//! they always see every earlier write.

use era_core::state::{GameState, SaveMetadata};
use era_save::slots::{
    load_active_slot, load_registry, load_slot_state, remove_slot, store_active_slot,
    store_registry, store_slot_state,
};
use era_save::{ExportFile, ImportSummary, PersistError};
use tracing::{debug, info, warn};

use crate::engine::Engine;
use crate::error::EngineError;
use crate::events::EngineEvent;

/// A storage write waiting for the next flush.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingWrite {
    Slot(Box<GameState>),
    ActiveSlot(u32),
    RemoveSlot(u32),
    Registry(Vec<SaveMetadata>),
}

impl Engine {
    // -----------------------------------------------------------------------
    // Queue
    // -----------------------------------------------------------------------

    pub fn is_saving(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Run every queued write in order. Failed writes are logged and
    /// dropped. Returns the number of writes attempted.
    pub fn flush_persistence(&mut self) -> usize {
        let mut flushed = 0;
        while let Some(write) = self.pending.pop_front() {
            flushed += 1;
            if let Err(e) = self.apply_write(&write) {
                warn!(error = %e, ?write, "persistence write failed");
            }
        }
        if flushed > 0 {
            debug!(writes = flushed, "flushed persistence queue");
        }
        flushed
    }

    fn apply_write(&mut self, write: &PendingWrite) -> Result<(), PersistError> {
        let storage = self.storage.as_mut();
        match write {
            PendingWrite::Slot(state) => {
                store_slot_state(storage, &self.layout, state)?;
                self.last_saved_at = Some(state.last_update);
                self.events.push(EngineEvent::Saved {
                    slot_id: state.slot_id,
                });
            }
            PendingWrite::ActiveSlot(id) => store_active_slot(storage, &self.layout, *id)?,
            PendingWrite::RemoveSlot(id) => remove_slot(storage, &self.layout, *id)?,
            PendingWrite::Registry(registry) => store_registry(storage, &self.layout, registry)?,
        }
        Ok(())
    }

    fn queue_registry(&mut self) {
        self.pending
            .push_back(PendingWrite::Registry(self.registry.clone()));
    }

    fn registry_entry(&mut self, slot_id: u32) -> Option<&mut SaveMetadata> {
        self.registry.iter_mut().find(|m| m.id == slot_id)
    }

    // -----------------------------------------------------------------------
    // Slots
    // -----------------------------------------------------------------------

    /// Queue a save of the active game and refresh its registry entry.
    pub fn save(&mut self) {
        let now = self.now();
        let mut snapshot = self.current_state();
        snapshot.last_update = now;
        self.state.last_update = now;
        if let Some(entry) = self.registry_entry(snapshot.slot_id) {
            entry.record(&snapshot, now);
        }
        let slot_id = snapshot.slot_id;
        self.pending
            .push_back(PendingWrite::Slot(Box::new(snapshot)));
        self.pending.push_back(PendingWrite::ActiveSlot(slot_id));
        self.queue_registry();
    }

    /// Switch to a saved slot and start running it. `Ok(false)` when the
    /// slot is out of range or has never been saved.
    pub fn load_slot(&mut self, slot_id: u32) -> Result<bool, EngineError> {
        if !self.layout.contains_slot(slot_id) {
            return Ok(false);
        }
        self.flush_persistence();
        let now = self.now();
        let Some(state) = load_slot_state(self.storage.as_ref(), &self.layout, slot_id, now)? else {
            return Ok(false);
        };
        self.install(state);
        self.active_slot = slot_id;
        self.start();
        self.pending.push_back(PendingWrite::ActiveSlot(slot_id));
        info!(slot = slot_id, era = %self.state.current_era, "slot loaded");
        self.events.push(EngineEvent::SlotLoaded { slot_id });
        Ok(true)
    }

    /// Begin a fresh game in `slot_id`, replacing whatever it held.
    pub fn start_new_slot(&mut self, slot_id: u32) -> bool {
        if !self.layout.contains_slot(slot_id) {
            return false;
        }
        let now = self.now();
        let state = GameState::new(slot_id, now);
        if let Some(entry) = self.registry_entry(slot_id) {
            entry.record(&state, now);
        }
        self.install(state.clone());
        self.active_slot = slot_id;
        self.start();
        self.pending
            .push_back(PendingWrite::Slot(Box::new(state)));
        self.pending.push_back(PendingWrite::ActiveSlot(slot_id));
        self.queue_registry();
        info!(slot = slot_id, "new game started");
        self.events.push(EngineEvent::NewGame { slot_id });
        true
    }

    /// Mark one slot as the main save.
    pub fn set_main_slot(&mut self, slot_id: u32) -> bool {
        if !self.layout.contains_slot(slot_id) {
            return false;
        }
        for entry in &mut self.registry {
            entry.is_main = entry.id == slot_id;
        }
        self.queue_registry();
        true
    }

    /// Erase a slot. Deleting the active slot stops the engine so no
    /// autosave brings it back.
    pub fn delete_slot(&mut self, slot_id: u32) -> bool {
        if !self.layout.contains_slot(slot_id) {
            return false;
        }
        if slot_id == self.active_slot && self.running {
            self.stop();
        }
        if let Some(entry) = self.registry_entry(slot_id) {
            entry.clear();
        }
        self.pending.push_back(PendingWrite::RemoveSlot(slot_id));
        self.queue_registry();
        info!(slot = slot_id, "slot deleted");
        self.events.push(EngineEvent::SlotDeleted { slot_id });
        true
    }

    // -----------------------------------------------------------------------
    // Archives
    // -----------------------------------------------------------------------

    /// Pack every stored slot into an archive file.
    pub fn export_archive(&mut self) -> Result<ExportFile, EngineError> {
        self.flush_persistence();
        let now = self.now();
        Ok(era_save::export_archive(self.storage.as_ref(), &self.layout, now)?)
    }

    /// Replace all local slots with an archive's contents, then reload the
    /// registry and the active slot. The engine is left stopped.
    pub fn import_archive(&mut self, raw: &str) -> Result<ImportSummary, EngineError> {
        self.flush_persistence();
        let now = self.now();
        let summary = era_save::import_archive(self.storage.as_mut(), &self.layout, raw, now)?;

        self.stop();
        self.registry = load_registry(self.storage.as_ref(), &self.layout, now)?;
        self.active_slot = load_active_slot(self.storage.as_ref(), &self.layout)?;
        let state = load_slot_state(self.storage.as_ref(), &self.layout, self.active_slot, now)?
            .unwrap_or_else(|| GameState::new(self.active_slot, now));
        self.install(state);
        self.events.push(EngineEvent::Imported {
            slots: summary.slots_written.len(),
        });
        Ok(summary)
    }
}
