//! Era Engine -- the running game.
//!
//! [`Engine`] drives one save slot at a time: it owns the live resource
//! ledger, advances production on a fixed tick, exposes every player action
//! and manages save slots and archives through an
//! [`era_save::SaveStorage`].
//!
//! ```rust
//! use era_core::economy::Quantity;
//! use era_engine::{Engine, EngineConfig};
//! use era_save::MemoryStorage;
//!
//! let mut engine = Engine::open(EngineConfig::default(), Box::new(MemoryStorage::new())).unwrap();
//! engine.start_new_slot(1);
//! assert!(engine.buy_building("b1", Quantity::Exact(1)));
//! engine.manual_gather("b1");
//! engine.advance(100);
//! assert!(engine.resources().food > 10.0);
//! ```
//!
//! # Key Types
//!
//! - [`Engine`] -- lifecycle, ticking, actions, persistence.
//! - [`EngineConfig`] -- namespace, slot count, intervals, RNG seed (TOML).
//! - [`RepeatingTask`] -- the cancellable timer behind ticks and autosave.
//! - [`EngineEvent`] -- notifications drained by the UI.

pub mod actions;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod persistence;
pub mod scheduler;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, EngineConfig};
pub use engine::{AdvanceResult, Engine};
pub use error::EngineError;
pub use events::{EngineEvent, EventBuffer};
pub use scheduler::RepeatingTask;
