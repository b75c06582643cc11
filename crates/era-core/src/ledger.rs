//! Observable resource ledger.
//!
//! [`ResourceStore`] holds the live resource amounts plus the lifetime science
//! counter. Reads return a [`LedgerSnapshot`] by value. Writes go through
//! [`ResourceStore::update`] or [`ResourceStore::batch_update`]; observers
//! run once after a write that changed something, never mid-write, and a
//! write that changes nothing notifies nobody.

use crate::resource::{Resource, ResourceMap};

/// One writable entry of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKey {
    Resource(Resource),
    TotalScienceEarned,
}

impl From<Resource> for LedgerKey {
    fn from(r: Resource) -> Self {
        LedgerKey::Resource(r)
    }
}

/// Point-in-time copy of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub resources: ResourceMap,
    pub total_science_earned: f64,
}

impl LedgerSnapshot {
    pub fn get(&self, key: LedgerKey) -> f64 {
        match key {
            LedgerKey::Resource(r) => self.resources.get(r),
            LedgerKey::TotalScienceEarned => self.total_science_earned,
        }
    }

    fn set(&mut self, key: LedgerKey, value: f64) -> bool {
        if self.get(key) == value {
            return false;
        }
        match key {
            LedgerKey::Resource(r) => self.resources.set(r, value),
            LedgerKey::TotalScienceEarned => self.total_science_earned = value,
        }
        true
    }
}

/// Handle returned by [`ResourceStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A ledger observer. Receives the snapshot after each change.
pub type Observer = Box<dyn FnMut(&LedgerSnapshot)>;

/// The single owner of live resource amounts.
pub struct ResourceStore {
    snapshot: LedgerSnapshot,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    /// Incremented on every effective change.
    version: u64,
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .field("version", &self.version)
            .finish()
    }
}

impl ResourceStore {
    pub fn new(initial: LedgerSnapshot) -> Self {
        Self {
            snapshot: initial,
            observers: Vec::new(),
            next_id: 0,
            version: 0,
        }
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&LedgerSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.snapshot
    }

    pub fn get(&self, key: impl Into<LedgerKey>) -> f64 {
        self.snapshot.get(key.into())
    }

    /// Number of effective changes since creation or the last reset.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Write one value.
    pub fn update(&mut self, key: impl Into<LedgerKey>, value: f64) {
        if self.snapshot.set(key.into(), value) {
            self.commit();
        }
    }

    /// Write several values; observers run at most once.
    pub fn batch_update(&mut self, updates: &[(LedgerKey, f64)]) {
        let mut changed = false;
        for &(key, value) in updates {
            changed |= self.snapshot.set(key, value);
        }
        if changed {
            self.commit();
        }
    }

    /// Replace the whole ledger (new session). Observers are kept and told.
    pub fn reset(&mut self, snapshot: LedgerSnapshot) {
        self.snapshot = snapshot;
        self.version = 0;
        self.notify();
    }

    fn commit(&mut self) {
        self.version += 1;
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot;
        for (_, observer) in &mut self.observers {
            observer(&snapshot);
        }
    }
}
