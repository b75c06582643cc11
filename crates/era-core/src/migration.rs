//! Forward-compatible loading of saved game states.
//!
//! Loaded blobs are never trusted. Migration starts from a fresh
//! [`GameState`] and overlays only recognised, type-checked fields, so old
//! layouts, foreign extra fields and corrupted values all degrade to
//! defaults instead of failing:
//!
//! - numbers must be finite; amounts clamp to `>= 0`, counts also floor,
//! - tech and rebirth-upgrade ids are filtered to the catalog and deduplicated,
//! - buildings are matched by id and only `count` / `upgradeLevel` are copied,
//! - managers go through [`sanitize_managers`].

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};
use tracing::debug;

use crate::catalog::{Catalog, legacy_manager_id};
use crate::era::Era;
use crate::resource::Resource;
use crate::state::{GameState, Manager, SaveMetadata, default_registry, initial_managers};

// ---------------------------------------------------------------------------
// Field readers
// ---------------------------------------------------------------------------

/// A finite number clamped to `>= 0`.
fn read_amount(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
}

/// A finite number floored and clamped into `u32`.
fn read_count(value: Option<&Value>) -> Option<u32> {
    read_amount(value).map(|v| v.floor().min(u32::MAX as f64) as u32)
}

fn read_timestamp(value: Option<&Value>) -> Option<u64> {
    read_amount(value).map(|v| v.floor() as u64)
}

fn read_bool(value: Option<&Value>) -> Option<bool> {
    value.and_then(Value::as_bool)
}

/// String ids kept only if `known` accepts them, first occurrence wins.
fn read_ids(value: Option<&Value>, kind: &str, known: impl Fn(&str) -> bool) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(items.len());
    for id in items.iter().filter_map(Value::as_str) {
        if !known(id) {
            debug!(kind, id, "dropping unknown id");
            continue;
        }
        if seen.insert(id) {
            ids.push(id.to_string());
        }
    }
    ids
}

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

/// Rebuild a valid [`GameState`] for `slot_id` from any JSON value.
pub fn migrate_game_state(loaded: &Value, slot_id: u32, now_ms: u64) -> GameState {
    migrate_with_catalog(Catalog::standard(), loaded, slot_id, now_ms)
}

pub fn migrate_with_catalog(
    catalog: &Catalog,
    loaded: &Value,
    slot_id: u32,
    now_ms: u64,
) -> GameState {
    let mut state = GameState::with_catalog(catalog, slot_id, now_ms);
    let Some(obj) = loaded.as_object() else {
        return state;
    };

    state.total_science_earned = read_amount(obj.get("totalScienceEarned")).unwrap_or(0.0);
    state.rebirth_count = read_count(obj.get("rebirthCount")).unwrap_or(0);
    state.rebirth_points = read_amount(obj.get("rebirthPoints")).unwrap_or(0.0);
    state.total_rebirth_points_earned =
        read_amount(obj.get("totalRebirthPointsEarned")).unwrap_or(0.0);
    state.rebirth_upgrade_ids = read_ids(obj.get("rebirthUpgradeIds"), "rebirth_upgrade", |id| {
        catalog.rebirth_upgrade(id).is_some()
    });
    if let Some(era) = obj.get("currentEra").and_then(Value::as_str).and_then(Era::from_name) {
        state.current_era = era;
    }
    if let Some(ts) = read_timestamp(obj.get("lastUpdate")) {
        state.last_update = ts;
    }

    if let Some(resources) = obj.get("resources").and_then(Value::as_object) {
        for r in Resource::ALL {
            if let Some(amount) = read_amount(resources.get(r.key())) {
                state.resources.set(r, amount);
            }
        }
    }

    state.researched_tech_ids = read_ids(obj.get("researchedTechIds"), "tech", |id| {
        catalog.tech(id).is_some()
    });

    if let Some(buildings) = obj.get("buildings").and_then(Value::as_object) {
        for (id, progress) in state.buildings.iter_mut() {
            let Some(saved) = buildings.get(id).and_then(Value::as_object) else {
                continue;
            };
            progress.count = read_count(saved.get("count")).unwrap_or(0);
            progress.upgrade_level = read_count(saved.get("upgradeLevel")).unwrap_or(0);
        }
    }

    if let Some(managers) = obj.get("managers").and_then(Value::as_object) {
        state.managers = sanitize_managers(catalog, managers);
    }

    state
}

// ---------------------------------------------------------------------------
// Managers
// ---------------------------------------------------------------------------

/// Merge saved manager progress onto the catalog roster.
///
/// Legacy short ids are remapped first; unknown ids are dropped. Afterwards
/// at most one manager per building stays active, scanning in catalog order.
pub fn sanitize_managers(catalog: &Catalog, loaded: &Map<String, Value>) -> BTreeMap<String, Manager> {
    let mut managers = initial_managers(catalog);

    for (id, saved) in loaded {
        let target = legacy_manager_id(id).unwrap_or(id.as_str());
        let (Some(manager), Some(saved)) = (managers.get_mut(target), saved.as_object()) else {
            debug!(id = %id, "dropping unknown manager");
            continue;
        };
        if let Some(v) = read_bool(saved.get("unlocked")) {
            manager.unlocked = v;
        }
        if let Some(v) = read_count(saved.get("level")) {
            manager.level = v;
        }
        if let Some(v) = read_count(saved.get("cards")) {
            manager.cards = v;
        }
        if let Some(v) = read_bool(saved.get("isActive")) {
            manager.is_active = v;
        }
    }

    enforce_single_active(catalog, &mut managers);
    managers
}

/// Deactivate every active manager after the first one seen per building.
pub fn enforce_single_active(catalog: &Catalog, managers: &mut BTreeMap<String, Manager>) {
    let mut active_buildings = HashSet::new();
    for template in catalog.managers() {
        let Some(m) = managers.get_mut(&template.id) else {
            continue;
        };
        if m.is_active && !active_buildings.insert(template.building_id) {
            m.is_active = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Rebuild a registry of exactly `slot_count` entries from any JSON value.
///
/// Entries are matched by `id`; ids outside `1..=slot_count` are ignored.
/// If no entry is main afterwards, slot 1 becomes main; if several are, the
/// lowest id keeps it.
pub fn migrate_registry(loaded: &Value, slot_count: u32, now_ms: u64) -> Vec<SaveMetadata> {
    let mut registry = default_registry(slot_count, now_ms);
    let Some(entries) = loaded.as_array() else {
        return registry;
    };
    for entry in &mut registry {
        entry.is_main = false;
    }

    let mut any_main = false;
    for saved in entries.iter().filter_map(Value::as_object) {
        let Some(id) = read_count(saved.get("id")).filter(|id| (1..=slot_count).contains(id))
        else {
            continue;
        };
        let entry = &mut registry[(id - 1) as usize];
        if let Some(era) = saved.get("era").and_then(Value::as_str).and_then(Era::from_name) {
            entry.era = era;
        }
        if let Some(science) = read_amount(saved.get("science")) {
            entry.science = science;
        }
        if let Some(ts) = read_timestamp(saved.get("timestamp")) {
            entry.timestamp = ts;
        }
        if let Some(empty) = read_bool(saved.get("isEmpty")) {
            entry.is_empty = empty;
        }
        if let Some(main) = read_bool(saved.get("isMain")) {
            entry.is_main = main;
            any_main |= main;
        }
        entry.rebirth_count = read_count(saved.get("rebirthCount"));
    }

    if any_main {
        let mut seen = false;
        for entry in &mut registry {
            if entry.is_main && std::mem::replace(&mut seen, true) {
                entry.is_main = false;
            }
        }
    } else if let Some(first) = registry.first_mut() {
        first.is_main = true;
    }
    registry
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BuildingProgress;
    use serde_json::json;

    fn migrate(v: Value) -> GameState {
        migrate_game_state(&v, 1, 42)
    }

    // -----------------------------------------------------------------------
    // Robustness
    // -----------------------------------------------------------------------

    #[test]
    fn empty_object_yields_initial_state() {
        let s = migrate(json!({}));
        assert_eq!(s, GameState::new(1, 42));
    }

    #[test]
    fn non_object_yields_initial_state() {
        for v in [json!(null), json!(7), json!("save"), json!([1, 2])] {
            assert_eq!(migrate(v), GameState::new(1, 42));
        }
    }

    #[test]
    fn wrong_types_fall_back_to_defaults() {
        let s = migrate(json!({
            "totalScienceEarned": "lots",
            "rebirthCount": true,
            "currentEra": 3,
            "resources": { "food": "x", "wood": -50, "stone": 12.5 },
            "researchedTechIds": "t1",
            "buildings": { "b1": { "count": "ten", "upgradeLevel": 2.9 } },
            "lastUpdate": "yesterday",
        }));
        assert_eq!(s.total_science_earned, 0.0);
        assert_eq!(s.rebirth_count, 0);
        assert_eq!(s.current_era, Era::StoneAge);
        assert_eq!(s.resources.food, 20.0);
        assert_eq!(s.resources.wood, 0.0);
        assert_eq!(s.resources.stone, 12.5);
        assert!(s.researched_tech_ids.is_empty());
        assert_eq!(s.building("b1"), BuildingProgress { count: 0, upgrade_level: 2 });
        assert_eq!(s.last_update, 42);
    }

    #[test]
    fn unknown_ids_and_duplicates_are_dropped() {
        let s = migrate(json!({
            "researchedTechIds": ["t1", "t_gone", "t1", "t2"],
            "rebirthUpgradeIds": ["rb_sci_1", "rb_old", "rb_sci_1"],
            "buildings": { "b_removed": { "count": 9 }, "b1": { "count": 4 } },
            "somethingFromTheFuture": { "a": 1 },
        }));
        assert_eq!(s.researched_tech_ids, vec!["t1", "t2"]);
        assert_eq!(s.rebirth_upgrade_ids, vec!["rb_sci_1"]);
        assert_eq!(s.building("b1").count, 4);
        assert!(!s.buildings.contains_key("b_removed"));
    }

    #[test]
    fn era_and_last_update_are_kept_when_valid() {
        let s = migrate(json!({ "currentEra": "Atomic Age", "lastUpdate": 1_700_000_000_000u64 }));
        assert_eq!(s.current_era, Era::AtomicAge);
        assert_eq!(s.last_update, 1_700_000_000_000);
    }

    // -----------------------------------------------------------------------
    // Idempotence
    // -----------------------------------------------------------------------

    #[test]
    fn migrating_a_current_state_is_identity() {
        let mut s = GameState::new(2, 99);
        s.resources.science = 1234.5;
        s.total_science_earned = 9876.0;
        s.current_era = Era::IndustrialAge;
        s.researched_tech_ids = vec!["t_b1".into(), "t1".into()];
        s.rebirth_upgrade_ids = vec!["rb_yield_1".into()];
        s.rebirth_count = 2;
        s.rebirth_points = 0.75;
        s.total_rebirth_points_earned = 3.25;
        s.buildings.insert("b3".into(), BuildingProgress { count: 17, upgrade_level: 4 });
        let m = s.managers.get_mut("m_b3_epic").unwrap();
        m.unlocked = true;
        m.level = 3;
        m.cards = 5;
        m.is_active = true;

        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(migrate_game_state(&value, 2, 0), s);
    }

    // -----------------------------------------------------------------------
    // Managers
    // -----------------------------------------------------------------------

    #[test]
    fn legacy_manager_ids_are_remapped() {
        let s = migrate(json!({
            "managers": { "m1": { "unlocked": true, "level": 2, "cards": 3, "isActive": true } }
        }));
        let m = &s.managers["m_b1_common"];
        assert!(m.unlocked && m.is_active);
        assert_eq!((m.level, m.cards), (2, 3));
        assert!(!s.managers.contains_key("m1"));
    }

    #[test]
    fn partial_manager_fields_keep_defaults() {
        let s = migrate(json!({ "managers": { "m_b2_rare": { "cards": 6 } } }));
        let m = &s.managers["m_b2_rare"];
        assert_eq!(m.cards, 6);
        assert!(!m.unlocked);
        assert_eq!(m.level, 0);
    }

    #[test]
    fn only_first_active_manager_per_building_survives() {
        let s = migrate(json!({ "managers": {
            "m_b1_common": { "isActive": true },
            "m_b1_epic": { "isActive": true },
            "m_b2_rare": { "isActive": true },
        }}));
        assert!(s.managers["m_b1_common"].is_active);
        assert!(!s.managers["m_b1_epic"].is_active);
        assert!(s.managers["m_b2_rare"].is_active);
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    #[test]
    fn registry_garbage_yields_defaults() {
        assert_eq!(migrate_registry(&json!("nope"), 5, 1), default_registry(5, 1));
    }

    #[test]
    fn registry_overlays_matching_slots_and_fixes_main() {
        let reg = migrate_registry(
            &json!([
                { "id": 2, "era": "Classical Age", "science": 50, "timestamp": 9,
                  "isEmpty": false, "isMain": true, "rebirthCount": 1 },
                { "id": 4, "isMain": true },
                { "id": 12, "isEmpty": false },
            ]),
            5,
            1,
        );
        assert_eq!(reg.len(), 5);
        assert!(!reg[0].is_main);
        assert!(reg[1].is_main);
        assert!(!reg[3].is_main);
        assert_eq!(reg[1].era, Era::ClassicalAge);
        assert!(!reg[1].is_empty);
        assert_eq!(reg[1].rebirth_count, Some(1));
        assert!(reg[4].is_empty);
    }
}
