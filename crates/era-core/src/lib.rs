//! Era Core -- the pure model of an era-spanning idle tycoon.
//!
//! This crate has no I/O. It holds the static catalog, the save-state model
//! and its forward-compatible migration, bonus stacking, the economy math
//! used to price purchases, production-rate computation, and the observable
//! resource ledger the engine writes through.
//!
//! # Pricing
//!
//! Every purchasable thing follows a geometric price curve. Bulk quotes are
//! solved in closed form, including "as many as affordable":
//!
//! ```rust
//! use era_core::catalog::Catalog;
//! use era_core::bonus::BonusSet;
//! use era_core::economy::{bulk_cost, Quantity};
//! use era_core::resource::{Resource, ResourceMap};
//!
//! let hut = Catalog::standard().building("b1").unwrap();
//! let mut wallet = ResourceMap::ZERO;
//! wallet.food = 100.0;
//! let quote = bulk_cost(hut, 0, &wallet, &BonusSet::default(), Quantity::Max);
//! assert_eq!(quote.amount, 5);
//! assert!(quote.cost_of(Resource::Food) <= 100.0);
//! ```
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- buildings, derived managers, techs and rebirth
//!   upgrades, frozen at startup.
//! - [`state::GameState`] -- the per-slot aggregate that gets saved.
//! - [`migration::migrate_game_state`] -- rebuilds a valid state from any JSON.
//! - [`economy`] -- milestone boosts and bulk purchase/upgrade/recruit quotes.
//! - [`production::resource_rates`] -- per-second net production.
//! - [`ledger::ResourceStore`] -- observable resource amounts.

pub mod bonus;
pub mod catalog;
pub mod catalog_data;
pub mod economy;
pub mod era;
pub mod format;
pub mod ledger;
pub mod migration;
pub mod production;
pub mod resource;
pub mod rng;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
