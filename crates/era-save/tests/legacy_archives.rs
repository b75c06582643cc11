//! Importing archives written by earlier releases, end to end through
//! storage and migration.

use era_core::era::Era;
use era_core::state::GameState;
use era_save::codec::pack;
use era_save::slots::{load_active_slot, load_registry, load_slot_state, store_active_slot, store_slot_state};
use era_save::{DirStorage, MemoryStorage, SaveStorage, StorageLayout, export_archive, import_archive};
use serde_json::json;

// ===========================================================================
// Flat storage dumps
// ===========================================================================

#[test]
fn flat_dump_with_legacy_managers_loads_remapped() {
    let slot = json!({
        "currentEra": "Classical Age",
        "resources": {"food": 120, "science": 40},
        "buildings": {"b1": {"count": 12, "upgradeLevel": 1}, "b_removed": {"count": 9}},
        "managers": {"m1": {"unlocked": true, "level": 2, "cards": 1, "isActive": true}},
        "researchedTechIds": ["t_obsolete"],
        "lastUpdate": 1000
    });
    let dump = json!({
        "era-tycoon-v15-slot-2": slot.to_string(),
        "era-tycoon-active-v15": "2",
    });

    let layout = StorageLayout::default();
    let mut storage = MemoryStorage::new();
    let summary = import_archive(&mut storage, &layout, &pack(&dump.to_string()), 50).unwrap();
    assert_eq!(summary.slots_written, vec![2]);

    // Registry synthesized from the slot; slot 1 absent so it keeps main.
    let registry = load_registry(&storage, &layout, 0).unwrap();
    assert_eq!(registry[1].era, Era::ClassicalAge);
    assert_eq!(registry[1].science, 40.0);
    assert!(!registry[1].is_empty);
    assert!(registry[0].is_main);

    let state = load_slot_state(&storage, &layout, 2, 0).unwrap().unwrap();
    assert_eq!(state.slot_id, 2);
    assert_eq!(state.building("b1").count, 12);
    assert!(state.researched_tech_ids.is_empty());
    let m = &state.managers["m_b1_common"];
    assert!(m.unlocked && m.is_active);
    assert_eq!(m.level, 2);
    assert!(!state.managers.contains_key("m1"));
}

// ===========================================================================
// Bare single saves
// ===========================================================================

#[test]
fn bare_state_imports_into_its_slot() {
    let mut state = GameState::new(3, 10);
    state.current_era = Era::IndustrialAge;
    let text = serde_json::to_string(&state).unwrap();

    let layout = StorageLayout::default();
    let mut storage = MemoryStorage::new();
    let summary = import_archive(&mut storage, &layout, &pack(&text), 0).unwrap();
    assert_eq!(summary.slots_written, vec![3]);
    assert!(summary.registry[2].is_main);
    assert_eq!(load_slot_state(&storage, &layout, 3, 0).unwrap(), Some(state));
}

// ===========================================================================
// Directory storage
// ===========================================================================

#[test]
fn archive_moves_between_directories() {
    let src_dir = tempfile::tempdir().unwrap();
    let dst_dir = tempfile::tempdir().unwrap();
    let layout = StorageLayout::default();

    let mut src = DirStorage::open(src_dir.path()).unwrap();
    let mut state = GameState::new(1, 5);
    state.resources.stone = 33.0;
    store_slot_state(&mut src, &layout, &state).unwrap();
    store_active_slot(&mut src, &layout, 1).unwrap();

    let file = export_archive(&src, &layout, 77).unwrap();
    std::fs::write(dst_dir.path().join(&file.file_name), &file.contents).unwrap();
    let raw = std::fs::read_to_string(dst_dir.path().join(&file.file_name)).unwrap();

    let mut dst = DirStorage::open(dst_dir.path().join("saves")).unwrap();
    import_archive(&mut dst, &layout, &raw, 0).unwrap();
    assert_eq!(load_slot_state(&dst, &layout, 1, 0).unwrap(), Some(state));
    assert_eq!(load_active_slot(&dst, &layout).unwrap(), 1);
    assert!(dst.get(&layout.registry_key()).unwrap().is_some());
}

// ===========================================================================
// Degenerate documents
// ===========================================================================

fn files(dir: &std::path::Path) -> std::collections::BTreeMap<String, Vec<u8>> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (e.file_name().to_string_lossy().into_owned(), std::fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn rejected_documents_leave_save_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let layout = StorageLayout::default();
    let mut storage = DirStorage::open(dir.path()).unwrap();
    for id in [1, 2] {
        store_slot_state(&mut storage, &layout, &GameState::new(id, 10)).unwrap();
    }
    store_active_slot(&mut storage, &layout, 2).unwrap();
    let before = files(dir.path());

    let half_canonical = json!({
        "version": 13,
        "registry": "corrupted",
        "slots": {"1": {"currentEra": "Atomic Age"}}
    });
    let nothing_usable = json!({
        "era-tycoon-active-v15": "1",
        "era-tycoon-v15-slot-3": "{\"currentEra\":",
    });
    for doc in [half_canonical, nothing_usable] {
        assert!(import_archive(&mut storage, &layout, &pack(&doc.to_string()), 0).is_err());
        assert_eq!(files(dir.path()), before);
    }
}
