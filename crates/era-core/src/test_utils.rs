//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests and, via the `test-utils` feature, in the
//! tests of downstream crates.

use crate::catalog::Catalog;
use crate::resource::{Resource, ResourceMap};
use crate::state::{BuildingProgress, GameState, Manager};

// ===========================================================================
// Numeric helpers
// ===========================================================================

/// Relative float comparison with a tolerance suited to geometric sums.
pub fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= scale * 1e-9
}

// ===========================================================================
// Resource helpers
// ===========================================================================

/// A zero map with the listed amounts set.
pub fn resources_with(amounts: &[(Resource, f64)]) -> ResourceMap {
    let mut map = ResourceMap::ZERO;
    for &(r, amount) in amounts {
        map.set(r, amount);
    }
    map
}

/// A map with every resource at `amount`.
pub fn resources_all(amount: f64) -> ResourceMap {
    resources_with(&Resource::ALL.map(|r| (r, amount)))
}

// ===========================================================================
// State builders
// ===========================================================================

/// A manager from the standard catalog, unlocked at the given level.
///
/// Panics on an unknown id.
pub fn unlocked_manager(id: &str, level: u32, cards: u32) -> Manager {
    let template = Catalog::standard()
        .manager(id)
        .unwrap_or_else(|| panic!("unknown manager {id}"));
    Manager {
        unlocked: true,
        level,
        cards,
        ..Manager::from_template(template)
    }
}

/// A fresh slot-1 game with one building owned.
pub fn state_with_building(id: &str, count: u32, upgrade_level: u32) -> GameState {
    let mut state = GameState::new(1, 0);
    state.buildings.insert(
        id.to_string(),
        BuildingProgress {
            count,
            upgrade_level,
        },
    );
    state
}

/// Put `manager` into `state` as the single active manager of its building.
pub fn activate(state: &mut GameState, mut manager: Manager) {
    for m in state.managers.values_mut() {
        if m.building_id == manager.building_id {
            m.is_active = false;
        }
    }
    manager.is_active = true;
    state.managers.insert(manager.id.clone(), manager);
}
