//! Versioned game-state model.
//!
//! Field names serialize in camelCase so slot blobs keep the layout of
//! earlier releases. Buildings and managers store only mutable progress plus
//! identity; static data comes from [`Catalog`].

use crate::catalog::{Catalog, ManagerBoost, ManagerTemplate, Rarity};
use crate::era::Era;
use crate::resource::ResourceMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Save-format version embedded in storage keys and archives.
pub const SAVE_VERSION: u32 = 15;

/// Resources of a brand-new game.
pub const INITIAL_RESOURCES: ResourceMap = ResourceMap {
    food: 20.0,
    ..ResourceMap::ZERO
};

// ---------------------------------------------------------------------------
// Buildings and managers
// ---------------------------------------------------------------------------

/// Owned units and upgrade level of one building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingProgress {
    pub count: u32,
    pub upgrade_level: u32,
}

/// A manager's identity and progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: String,
    pub building_id: String,
    pub name: String,
    pub rarity: Rarity,
    pub boosts: Vec<ManagerBoost>,
    pub level: u32,
    pub cards: u32,
    pub unlocked: bool,
    pub is_active: bool,
}

impl Manager {
    /// A locked, inactive manager for a catalog template.
    pub fn from_template(template: &ManagerTemplate) -> Self {
        Self {
            id: template.id.clone(),
            building_id: template.building_id.to_string(),
            name: template.name.clone(),
            rarity: template.rarity,
            boosts: template.rarity.boosts().to_vec(),
            level: 0,
            cards: 0,
            unlocked: false,
            is_active: false,
        }
    }

    /// Cards required for the next level-up.
    pub fn cards_for_next_level(&self) -> u32 {
        (self.level + 1) * 2
    }

    pub fn can_level_up(&self) -> bool {
        self.cards >= self.cards_for_next_level()
    }
}

/// Every manager of the catalog, locked, keyed by id.
pub fn initial_managers(catalog: &Catalog) -> BTreeMap<String, Manager> {
    catalog
        .managers()
        .iter()
        .map(|t| (t.id.clone(), Manager::from_template(t)))
        .collect()
}

/// Every building of the catalog at zero progress.
pub fn initial_buildings(catalog: &Catalog) -> BTreeMap<String, BuildingProgress> {
    catalog
        .buildings()
        .iter()
        .map(|b| (b.id.to_string(), BuildingProgress::default()))
        .collect()
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The root aggregate persisted per save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub resources: ResourceMap,
    pub total_science_earned: f64,
    pub current_era: Era,
    pub buildings: BTreeMap<String, BuildingProgress>,
    pub researched_tech_ids: Vec<String>,
    pub managers: BTreeMap<String, Manager>,
    /// Wall-clock milliseconds of the last save or load.
    pub last_update: u64,
    pub slot_id: u32,
    pub rebirth_count: u32,
    pub rebirth_points: f64,
    pub total_rebirth_points_earned: f64,
    pub rebirth_upgrade_ids: Vec<String>,
}

impl GameState {
    /// A fresh game for `slot_id` using the standard catalog.
    pub fn new(slot_id: u32, now_ms: u64) -> Self {
        Self::with_catalog(Catalog::standard(), slot_id, now_ms)
    }

    pub fn with_catalog(catalog: &Catalog, slot_id: u32, now_ms: u64) -> Self {
        Self {
            resources: INITIAL_RESOURCES,
            total_science_earned: 0.0,
            current_era: Era::StoneAge,
            buildings: initial_buildings(catalog),
            researched_tech_ids: Vec::new(),
            managers: initial_managers(catalog),
            last_update: now_ms,
            slot_id,
            rebirth_count: 0,
            rebirth_points: 0.0,
            total_rebirth_points_earned: 0.0,
            rebirth_upgrade_ids: Vec::new(),
        }
    }

    /// Progress of a building, zero if unknown.
    pub fn building(&self, id: &str) -> BuildingProgress {
        self.buildings.get(id).copied().unwrap_or_default()
    }

    /// The active manager of a building, if any.
    pub fn active_manager(&self, building_id: &str) -> Option<&Manager> {
        self.managers
            .values()
            .find(|m| m.is_active && m.building_id == building_id)
    }

    pub fn unlocked_manager_count(&self) -> u32 {
        self.managers.values().filter(|m| m.unlocked).count() as u32
    }

    pub fn has_researched(&self, tech_id: &str) -> bool {
        self.researched_tech_ids.iter().any(|id| id == tech_id)
    }

    pub fn owns_rebirth_upgrade(&self, upgrade_id: &str) -> bool {
        self.rebirth_upgrade_ids.iter().any(|id| id == upgrade_id)
    }

    /// The state a rebirth leaves behind: a fresh game that keeps prestige
    /// progress, rebirth upgrades and manager progress.
    pub fn reborn(&self, points_earned: f64, now_ms: u64) -> GameState {
        GameState {
            rebirth_count: self.rebirth_count + 1,
            rebirth_points: self.rebirth_points + points_earned,
            total_rebirth_points_earned: self.total_rebirth_points_earned + points_earned,
            rebirth_upgrade_ids: self.rebirth_upgrade_ids.clone(),
            managers: self.managers.clone(),
            ..GameState::new(self.slot_id, now_ms)
        }
    }
}

// ---------------------------------------------------------------------------
// Slot registry
// ---------------------------------------------------------------------------

/// Lightweight per-slot summary for the slot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMetadata {
    pub id: u32,
    pub era: Era,
    pub science: f64,
    pub timestamp: u64,
    pub is_empty: bool,
    pub is_main: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebirth_count: Option<u32>,
}

impl SaveMetadata {
    /// An empty slot entry.
    pub fn empty(id: u32, now_ms: u64) -> Self {
        Self {
            id,
            era: Era::StoneAge,
            science: 0.0,
            timestamp: now_ms,
            is_empty: true,
            is_main: false,
            rebirth_count: Some(0),
        }
    }

    /// Refresh this entry from a live game.
    pub fn record(&mut self, state: &GameState, now_ms: u64) {
        self.era = state.current_era;
        self.science = state.resources.science;
        self.timestamp = now_ms;
        self.is_empty = false;
        self.rebirth_count = Some(state.rebirth_count);
    }

    /// Mark this entry as deleted.
    pub fn clear(&mut self) {
        self.is_empty = true;
        self.science = 0.0;
        self.era = Era::StoneAge;
    }
}

/// `slot_count` empty slots with slot 1 as main.
pub fn default_registry(slot_count: u32, now_ms: u64) -> Vec<SaveMetadata> {
    (1..=slot_count)
        .map(|id| SaveMetadata {
            is_main: id == 1,
            ..SaveMetadata::empty(id, now_ms)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_shape() {
        let s = GameState::new(3, 1_000);
        assert_eq!(s.slot_id, 3);
        assert_eq!(s.resources.food, 20.0);
        assert_eq!(s.resources.science, 0.0);
        assert_eq!(s.buildings.len(), 31);
        assert_eq!(s.managers.len(), 186);
        assert!(s.buildings.values().all(|b| b.count == 0 && b.upgrade_level == 0));
        assert!(s.managers.values().all(|m| !m.unlocked && !m.is_active));
        assert_eq!(s.current_era, Era::StoneAge);
    }

    #[test]
    fn reborn_keeps_prestige_and_managers() {
        let mut s = GameState::new(1, 0);
        s.rebirth_points = 1.5;
        s.rebirth_upgrade_ids.push("rb_yield_1".into());
        s.researched_tech_ids.push("t_b1".into());
        s.buildings.insert("b1".into(), BuildingProgress { count: 50, upgrade_level: 3 });
        s.managers.get_mut("m_b1_common").unwrap().unlocked = true;
        s.current_era = Era::AtomicAge;

        let r = s.reborn(2.0, 5);
        assert_eq!(r.rebirth_count, 1);
        assert_eq!(r.rebirth_points, 3.5);
        assert_eq!(r.total_rebirth_points_earned, 2.0);
        assert_eq!(r.rebirth_upgrade_ids, vec!["rb_yield_1".to_string()]);
        assert!(r.researched_tech_ids.is_empty());
        assert_eq!(r.building("b1"), BuildingProgress::default());
        assert!(r.managers["m_b1_common"].unlocked);
        assert_eq!(r.current_era, Era::StoneAge);
        assert_eq!(r.last_update, 5);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let s = GameState::new(1, 0);
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("totalScienceEarned").is_some());
        assert!(v.get("currentEra").is_some());
        assert_eq!(v["managers"]["m_b1_common"]["buildingId"], "b1");
        assert_eq!(v["buildings"]["b1"]["upgradeLevel"], 0);
    }

    #[test]
    fn default_registry_marks_first_slot_main() {
        let reg = default_registry(5, 7);
        assert_eq!(reg.len(), 5);
        assert!(reg[0].is_main);
        assert!(reg[1..].iter().all(|m| !m.is_main));
        assert!(reg.iter().all(|m| m.is_empty));
        assert_eq!(reg[4].id, 5);
    }

    #[test]
    fn level_up_requirement() {
        let t = &Catalog::standard().managers()[0];
        let mut m = Manager::from_template(t);
        m.level = 1;
        m.cards = 3;
        assert_eq!(m.cards_for_next_level(), 4);
        assert!(!m.can_level_up());
        m.cards = 4;
        assert!(m.can_level_up());
    }
}
