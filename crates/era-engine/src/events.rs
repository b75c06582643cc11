//! Engine notifications for the presentation layer.
//!
//! Events accumulate in a fixed-capacity [`EventBuffer`]; when it is full
//! the oldest event is dropped. The UI drains it once per frame.

use era_core::era::Era;
use era_core::resource::Resource;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A manual gather was buffered. `label` is the formatted gain.
    Gathered {
        building_id: String,
        resource: Resource,
        amount: f64,
        label: String,
    },
    Saved {
        slot_id: u32,
    },
    SlotLoaded {
        slot_id: u32,
    },
    NewGame {
        slot_id: u32,
    },
    SlotDeleted {
        slot_id: u32,
    },
    EraAdvanced {
        era: Era,
    },
    Reborn {
        rebirth_count: u32,
        points_earned: f64,
    },
    Imported {
        slots: usize,
    },
}

// ---------------------------------------------------------------------------
// EventBuffer
// ---------------------------------------------------------------------------

/// Ring buffer of engine events, oldest first.
#[derive(Debug)]
pub struct EventBuffer {
    events: Vec<Option<EngineEvent>>,
    /// Next write position.
    head: usize,
    len: usize,
    total_written: u64,
    dropped: u64,
}

impl EventBuffer {
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            total_written: 0,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: EngineEvent) {
        self.events[self.head] = Some(event);
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        } else {
            self.dropped += 1;
        }
        self.total_written += 1;
    }

    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Events overwritten before anyone drained them.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    fn oldest_index(&self) -> usize {
        if self.len < self.capacity() { 0 } else { self.head }
    }

    /// Events from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &EngineEvent> {
        let start = self.oldest_index();
        (0..self.len).filter_map(move |i| self.events[(start + i) % self.capacity()].as_ref())
    }

    /// Remove and return every stored event, oldest first.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        let start = self.oldest_index();
        let capacity = self.capacity();
        let drained = (0..self.len)
            .filter_map(|i| self.events[(start + i) % capacity].take())
            .collect();
        self.head = 0;
        self.len = 0;
        drained
    }

    pub fn clear(&mut self) {
        for slot in &mut self.events {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }
}
