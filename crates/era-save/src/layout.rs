//! Storage key naming.

use era_core::state::SAVE_VERSION;

/// Namespace and slot count that together name every persisted key.
///
/// With the default namespace the keys match the ones written by earlier
/// releases: `era-tycoon-v15-slot-1`, `era-tycoon-registry-v15`,
/// `era-tycoon-active-v15`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    namespace: String,
    slot_count: u32,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMESPACE, Self::DEFAULT_SLOT_COUNT)
    }
}

impl StorageLayout {
    pub const DEFAULT_NAMESPACE: &'static str = "era-tycoon";
    pub const DEFAULT_SLOT_COUNT: u32 = 5;

    /// A zero slot count is clamped to one.
    pub fn new(namespace: impl Into<String>, slot_count: u32) -> Self {
        Self {
            namespace: namespace.into(),
            slot_count: slot_count.max(1),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Slot ids in display order.
    pub fn slot_ids(&self) -> impl Iterator<Item = u32> {
        1..=self.slot_count
    }

    pub fn contains_slot(&self, id: u32) -> bool {
        (1..=self.slot_count).contains(&id)
    }

    pub fn slot_key(&self, id: u32) -> String {
        format!("{}-v{SAVE_VERSION}-slot-{id}", self.namespace)
    }

    pub fn registry_key(&self) -> String {
        format!("{}-registry-v{SAVE_VERSION}", self.namespace)
    }

    pub fn active_key(&self) -> String {
        format!("{}-active-v{SAVE_VERSION}", self.namespace)
    }

    /// File name for an archive exported at `timestamp_ms`.
    pub fn export_file_name(&self, timestamp_ms: u64) -> String {
        format!("{}-v{SAVE_VERSION}-{timestamp_ms}.chronicle", self.namespace)
    }
}
