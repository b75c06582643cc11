//! Engine fixtures for unit and integration tests.
//!
//! Every fixture uses a fixed RNG seed and a [`ManualClock`] so runs are
//! reproducible.

use era_core::state::GameState;
use era_save::MemoryStorage;
use era_save::slots::store_slot_state;

use crate::clock::ManualClock;
use crate::config::EngineConfig;
use crate::engine::Engine;

/// Wall-clock start of every fixture clock.
pub const TEST_EPOCH_MS: u64 = 1_700_000_000_000;

pub fn test_config() -> EngineConfig {
    EngineConfig {
        seed: Some(7),
        ..EngineConfig::default()
    }
}

/// A stopped engine over `storage`.
pub fn open_engine(storage: MemoryStorage) -> Engine {
    Engine::open_with_clock(
        test_config(),
        Box::new(storage),
        Box::new(ManualClock::new(TEST_EPOCH_MS)),
    )
    .expect("test engine opens")
}

/// A running engine on a new game in slot 1, with its writes flushed.
pub fn fresh_engine() -> Engine {
    let mut engine = open_engine(MemoryStorage::new());
    engine.start_new_slot(1);
    engine.flush_persistence();
    engine
}

/// A running engine that loaded `state` from its slot.
pub fn engine_with_state(state: GameState) -> Engine {
    let layout = test_config().layout();
    let mut storage = MemoryStorage::new();
    store_slot_state(&mut storage, &layout, &state).expect("fixture slot stored");
    let mut engine = open_engine(storage);
    assert!(
        engine.load_slot(state.slot_id).expect("fixture slot loads"),
        "fixture slot {} missing",
        state.slot_id
    );
    engine.flush_persistence();
    engine
}
