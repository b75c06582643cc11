//! The simulation engine: owns one save slot's game, its resource ledger and
//! the timers that advance it.
//!
//! # Ownership
//!
//! The `Engine` owns:
//! - the [`GameState`] of the active slot (everything except live amounts),
//! - the [`ResourceStore`] holding live amounts; only the engine writes it,
//! - the manual-gather buffer, merged into the ledger on the next tick,
//! - two [`RepeatingTask`]s: the production tick and the autosave,
//! - the deferred persistence queue and the slot registry,
//! - an [`EventBuffer`] of notifications for the UI.
//!
//! # Time
//!
//! The host calls [`Engine::advance`] with elapsed wall-clock time. Each
//! call first flushes deferred persistence, then runs every production tick
//! that fits and, if its period elapsed, an autosave. Stopping the engine
//! cancels both timers immediately.

use std::collections::VecDeque;

use era_core::bonus::BonusSet;
use era_core::catalog::Catalog;
use era_core::economy::{rebirth_bonus, rebirth_points};
use era_core::ledger::{LedgerKey, LedgerSnapshot, ResourceStore, SubscriptionId};
use era_core::production::resource_rates;
use era_core::resource::{Resource, ResourceMap};
use era_core::rng::SimRng;
use era_core::state::{GameState, SaveMetadata};
use era_save::slots::{load_active_slot, load_registry, load_slot_state};
use era_save::{SaveStorage, StorageLayout};
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::{EngineEvent, EventBuffer};
use crate::persistence::PendingWrite;
use crate::scheduler::RepeatingTask;

/// Mixed into clock-derived RNG seeds.
const SEED_SALT: u64 = 0x5EED_E7A5_0000_0015;

// ---------------------------------------------------------------------------
// Advance result
// ---------------------------------------------------------------------------

/// Result of an [`Engine::advance`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceResult {
    /// Persistence writes flushed before ticking.
    pub writes_flushed: usize,
    pub ticks_run: u64,
    pub autosaved: bool,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) layout: StorageLayout,
    pub(crate) catalog: &'static Catalog,
    pub(crate) storage: Box<dyn SaveStorage>,
    pub(crate) clock: Box<dyn Clock>,

    pub(crate) state: GameState,
    pub(crate) ledger: ResourceStore,
    /// Manual gains waiting for the next tick.
    pub(crate) manual_gains: ResourceMap,
    pub(crate) bonuses: BonusSet,
    pub(crate) rates: ResourceMap,
    pub(crate) session_key: u64,
    pub(crate) rng: SimRng,

    pub(crate) running: bool,
    pub(crate) ticker: RepeatingTask,
    pub(crate) autosaver: RepeatingTask,

    pub(crate) registry: Vec<SaveMetadata>,
    pub(crate) active_slot: u32,
    pub(crate) pending: VecDeque<PendingWrite>,
    pub(crate) last_saved_at: Option<u64>,

    pub(crate) events: EventBuffer,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("active_slot", &self.active_slot)
            .field("running", &self.running)
            .field("session_key", &self.session_key)
            .field("era", &self.state.current_era)
            .field("ledger", &self.ledger)
            .field("pending_writes", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Open the engine on `storage`, restoring the last active slot.
    ///
    /// The engine starts stopped; call [`Engine::start`] or load a slot.
    pub fn open(config: EngineConfig, storage: Box<dyn SaveStorage>) -> Result<Self, EngineError> {
        Self::open_with_clock(config, storage, Box::new(SystemClock))
    }

    pub fn open_with_clock(
        config: EngineConfig,
        storage: Box<dyn SaveStorage>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let layout = config.layout();
        let now = clock.now_ms();
        let registry = load_registry(storage.as_ref(), &layout, now)?;
        let active_slot = load_active_slot(storage.as_ref(), &layout)?;
        let state = load_slot_state(storage.as_ref(), &layout, active_slot, now)?
            .unwrap_or_else(|| GameState::new(active_slot, now));
        let seed = config.seed.unwrap_or(now ^ SEED_SALT);

        let mut engine = Self {
            layout,
            catalog: Catalog::standard(),
            storage,
            clock,
            ledger: ResourceStore::new(LedgerSnapshot::default()),
            manual_gains: ResourceMap::ZERO,
            bonuses: BonusSet::default(),
            rates: ResourceMap::ZERO,
            session_key: 0,
            rng: SimRng::new(seed),
            running: false,
            ticker: RepeatingTask::new(config.tick_interval_ms),
            autosaver: RepeatingTask::new(config.autosave_interval_ms),
            registry,
            active_slot,
            pending: VecDeque::new(),
            last_saved_at: None,
            events: EventBuffer::new(config.feedback_capacity),
            state,
            config,
        };
        engine.install(engine.state.clone());
        info!(slot = active_slot, "engine opened");
        Ok(engine)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    pub fn start(&mut self) {
        self.running = true;
        self.ticker.start();
        self.autosaver.start();
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.ticker.stop();
        self.autosaver.stop();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance wall-clock time by `dt_ms`.
    ///
    /// At most `max_ticks_per_advance` ticks are applied individually; the
    /// rest of a long gap, such as a resume after time offline, is applied
    /// in a single combined step.
    pub fn advance(&mut self, dt_ms: u64) -> AdvanceResult {
        let mut result = AdvanceResult {
            writes_flushed: self.flush_persistence(),
            ..AdvanceResult::default()
        };
        if !self.running {
            return result;
        }
        result.ticks_run = self.ticker.advance(dt_ms);
        let stepped = result.ticks_run.min(self.config.max_ticks_per_advance);
        for _ in 0..stepped {
            self.tick(1);
        }
        if result.ticks_run > stepped {
            self.tick(result.ticks_run - stepped);
        }
        if self.autosaver.advance(dt_ms) > 0 {
            self.save();
            result.autosaved = true;
        }
        result
    }

    /// Apply `ticks` ticks of production plus buffered manual gains as one
    /// ledger change. Rates are fixed between actions, so a span of ticks
    /// lands where the same ticks run one by one would.
    pub(crate) fn tick(&mut self, ticks: u64) {
        let snap = self.ledger.snapshot();
        let step = self.config.tick_seconds() * ticks as f64;
        let mut total_science = snap.total_science_earned;
        let mut updates: Vec<(LedgerKey, f64)> = Vec::with_capacity(Resource::ALL.len() + 1);

        for r in Resource::ALL {
            let mut value = snap.resources.get(r);
            let mut changed = false;

            let delta = self.rates.get(r) * step;
            if delta != 0.0 {
                value = (value + delta).max(0.0);
                changed = true;
                if r == Resource::Science && delta > 0.0 {
                    total_science += delta;
                }
            }
            let gain = self.manual_gains.get(r);
            if gain > 0.0 {
                value = (value + gain).max(0.0);
                changed = true;
                if r == Resource::Science {
                    total_science += gain;
                }
            }
            if changed {
                updates.push((r.into(), value));
            }
        }
        if total_science != snap.total_science_earned {
            updates.push((LedgerKey::TotalScienceEarned, total_science));
        }

        self.manual_gains = ResourceMap::ZERO;
        if !updates.is_empty() {
            self.ledger.batch_update(&updates);
        }
    }

    /// Replace the game and rebuild everything derived from it.
    pub(crate) fn install(&mut self, state: GameState) {
        self.ledger.reset(LedgerSnapshot {
            resources: state.resources,
            total_science_earned: state.total_science_earned,
        });
        self.manual_gains = ResourceMap::ZERO;
        self.state = state;
        self.session_key += 1;
        self.refresh();
    }

    /// Recompute bonuses and rates after a state change.
    pub(crate) fn refresh(&mut self) {
        self.bonuses = BonusSet::collect(
            self.catalog,
            &self.state.researched_tech_ids,
            &self.state.rebirth_upgrade_ids,
        );
        self.rates = resource_rates(self.catalog, &self.state, &self.bonuses);
    }

    pub(crate) fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Progress of the active game. Live amounts are in [`Engine::resources`];
    /// the `resources` and `total_science_earned` fields here are only
    /// refreshed on save.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The active game with live amounts merged in.
    pub fn current_state(&self) -> GameState {
        let snap = self.ledger.snapshot();
        GameState {
            resources: snap.resources,
            total_science_earned: snap.total_science_earned,
            ..self.state.clone()
        }
    }

    pub fn resources(&self) -> ResourceMap {
        self.ledger.snapshot().resources
    }

    pub fn total_science_earned(&self) -> f64 {
        self.ledger.get(LedgerKey::TotalScienceEarned)
    }

    pub fn ledger(&self) -> &ResourceStore {
        &self.ledger
    }

    /// Observe ledger changes. Observers survive slot changes.
    pub fn subscribe(&mut self, observer: impl FnMut(&LedgerSnapshot) + 'static) -> SubscriptionId {
        self.ledger.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.ledger.unsubscribe(id)
    }

    /// Net production per second.
    pub fn rates(&self) -> &ResourceMap {
        &self.rates
    }

    pub fn bonuses(&self) -> &BonusSet {
        &self.bonuses
    }

    pub fn rebirth_bonus(&self) -> f64 {
        rebirth_bonus(self.state.rebirth_count)
    }

    /// Rebirth points a reset would grant now.
    pub fn points_to_earn(&self) -> f64 {
        let snap = self.ledger.snapshot();
        rebirth_points(&snap.resources, snap.total_science_earned)
    }

    /// Science needed for the next era, `None` in the last era.
    pub fn next_era_requirement(&self) -> Option<f64> {
        self.state.current_era.next().map(|e| e.science_requirement())
    }

    /// Changes whenever the ledger is rebuilt (load, new game, rebirth,
    /// import).
    pub fn session_key(&self) -> u64 {
        self.session_key
    }

    pub fn registry(&self) -> &[SaveMetadata] {
        &self.registry
    }

    pub fn active_slot(&self) -> u32 {
        self.active_slot
    }

    pub fn last_saved_at(&self) -> Option<u64> {
        self.last_saved_at
    }

    pub fn events(&self) -> &EventBuffer {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }

    /// Add to a live amount. Test fixtures only.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn grant(&mut self, resource: Resource, amount: f64) {
        let value = self.ledger.get(resource) + amount;
        self.ledger.update(resource, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{engine_with_state, fresh_engine};
    use era_core::test_utils::{activate, approx_eq, state_with_building, unlocked_manager};
    use std::cell::Cell;
    use std::rc::Rc;

    fn producing_engine() -> Engine {
        // Nine huts (below the first milestone) with a level-1 common
        // manager: 2 food/s each at yield 1.1.
        let mut state = state_with_building("b1", 9, 0);
        activate(&mut state, unlocked_manager("m_b1_common", 1, 1));
        engine_with_state(state)
    }

    #[test]
    fn opens_stopped_on_a_new_game() {
        let mut stopped = crate::test_utils::open_engine(era_save::MemoryStorage::new());
        assert!(!stopped.is_running());
        assert_eq!(stopped.active_slot(), 1);
        assert_eq!(stopped.resources().food, 20.0);
        assert_eq!(stopped.advance(1000).ticks_run, 0);
    }

    #[test]
    fn ticks_apply_rates() {
        let mut engine = producing_engine();
        assert!(approx_eq(engine.rates().food, 19.8));
        let result = engine.advance(1000);
        assert_eq!(result.ticks_run, 10);
        assert!(approx_eq(engine.resources().food, 20.0 + 19.8));
    }

    #[test]
    fn partial_interval_carries_over() {
        let mut engine = producing_engine();
        assert_eq!(engine.advance(150).ticks_run, 1);
        assert_eq!(engine.advance(50).ticks_run, 1);
    }

    #[test]
    fn consumption_floors_at_zero() {
        // Gatherers eat 1 food/s each.
        let mut state = state_with_building("worker1", 100, 0);
        activate(&mut state, unlocked_manager("m_worker1_common", 1, 1));
        let mut engine = engine_with_state(state);
        assert!(engine.rates().food < 0.0);
        engine.advance(5000);
        assert_eq!(engine.resources().food, 0.0);
        assert!(engine.resources().wood > 0.0);
    }

    #[test]
    fn science_production_counts_toward_lifetime_total() {
        let mut state = state_with_building("b_sci1", 10, 0);
        activate(&mut state, unlocked_manager("m_b_sci1_common", 1, 1));
        let mut engine = engine_with_state(state);
        engine.advance(1000);
        let science = engine.resources().science;
        assert!(science > 0.0);
        assert!(approx_eq(engine.total_science_earned(), science));
    }

    #[test]
    fn observers_fire_once_per_tick() {
        let mut engine = producing_engine();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let id = engine.subscribe(move |_| seen.set(seen.get() + 1));
        engine.advance(300);
        assert_eq!(calls.get(), 3);
        assert!(engine.unsubscribe(id));
        engine.advance(100);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn long_gap_is_applied_in_one_combined_step() {
        let mut engine = producing_engine();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        engine.subscribe(move |_| seen.set(seen.get() + 1));

        // Eight hours offline.
        let result = engine.advance(8 * 3_600_000);
        assert_eq!(result.ticks_run, 288_000);
        assert_eq!(calls.get(), 601);
        assert!(approx_eq(engine.resources().food, 20.0 + 19.8 * 8.0 * 3_600.0));
    }

    #[test]
    fn combined_step_still_floors_at_zero() {
        let mut state = state_with_building("worker1", 100, 0);
        activate(&mut state, unlocked_manager("m_worker1_common", 1, 1));
        let mut engine = engine_with_state(state);
        let wood_rate = engine.rates().wood;
        let wood = engine.resources().wood;
        engine.advance(3_600_000);
        assert_eq!(engine.resources().food, 0.0);
        assert!(approx_eq(engine.resources().wood, wood + wood_rate * 3_600.0));
    }

    #[test]
    fn stop_cancels_ticks() {
        let mut engine = producing_engine();
        engine.advance(50);
        engine.stop();
        assert_eq!(engine.advance(10_000), AdvanceResult::default());
        engine.start();
        assert_eq!(engine.advance(50).ticks_run, 0);
    }

    #[test]
    fn autosave_fires_on_its_period() {
        let mut engine = fresh_engine();
        let r = engine.advance(9_999);
        assert!(!r.autosaved);
        let r = engine.advance(1);
        assert!(r.autosaved);
        assert!(engine.is_saving());
        let r = engine.advance(0);
        assert!(r.writes_flushed > 0);
        assert!(!engine.is_saving());
        assert!(engine.last_saved_at().is_some());
    }

    #[test]
    fn derived_values() {
        let mut engine = fresh_engine();
        assert_eq!(engine.rebirth_bonus(), 1.0);
        assert_eq!(engine.points_to_earn(), 0.0);
        assert_eq!(engine.next_era_requirement(), Some(5_000.0));
        engine.grant(Resource::Energy, 2e12);
        assert!(approx_eq(engine.points_to_earn(), 2.0));
    }

    #[test]
    fn current_state_merges_live_amounts() {
        let mut engine = fresh_engine();
        engine.grant(Resource::Wood, 5.0);
        assert_eq!(engine.current_state().resources.wood, 5.0);
        assert_eq!(engine.state().resources.wood, 0.0);
    }
}
