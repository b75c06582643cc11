//! Production-rate and manual-gather math.
//!
//! A building only produces passively when it is owned and has an active
//! manager of level one or more. Both passive output and manual gathering
//! share [`base_multiplier`]; passive output adds the manager's yield and
//! speed factors, manual gathering the manual-yield bonus instead.

use crate::bonus::BonusSet;
use crate::catalog::{BoostKind, BuildingDef, Catalog};
use crate::economy::{milestone_boost, rebirth_bonus, refine_milestone_boost};
use crate::era::Era;
use crate::resource::{Resource, ResourceMap};
use crate::state::{BuildingProgress, GameState, Manager};

const UPGRADE_STEP: f64 = 0.5;
const MASTERY_STEP: f64 = 0.5;
const MIN_EFFICIENCY: f64 = 0.01;

/// Bonus for running a building from an era before the current one.
pub fn mastery(current: Era, building_era: Era) -> f64 {
    1.0 + current.index().saturating_sub(building_era.index()) as f64 * MASTERY_STEP
}

/// Multipliers contributed by an active manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManagerFactors {
    pub yield_mult: f64,
    pub speed_mult: f64,
    pub efficiency_mult: f64,
}

impl ManagerFactors {
    pub const NEUTRAL: ManagerFactors = ManagerFactors {
        yield_mult: 1.0,
        speed_mult: 1.0,
        efficiency_mult: 1.0,
    };

    /// Fold a manager's boosts, each scaled by its level. Yield and speed
    /// stack additively, efficiency subtracts down to a floor, special
    /// multiplies the yield.
    pub fn of(manager: &Manager) -> Self {
        let mut f = Self::NEUTRAL;
        let level = manager.level as f64;
        for boost in &manager.boosts {
            let val = boost.value * level;
            match boost.kind {
                BoostKind::Yield => f.yield_mult += val,
                BoostKind::Speed => f.speed_mult += val,
                BoostKind::Efficiency => {
                    f.efficiency_mult = (f.efficiency_mult - val).max(MIN_EFFICIENCY)
                }
                BoostKind::Special => f.yield_mult *= 1.0 + val,
            }
        }
        f
    }
}

/// Upgrade, bonus, mastery, rebirth and milestone factors of one building.
pub fn base_multiplier(
    def: &BuildingDef,
    progress: BuildingProgress,
    current_era: Era,
    bonuses: &BonusSet,
    rebirth_count: u32,
) -> f64 {
    let produced = def.produces.resource;
    (1.0 + progress.upgrade_level as f64 * UPGRADE_STEP)
        * bonuses.production.specific(produced)
        * bonuses.production.global()
        * mastery(current_era, def.era)
        * rebirth_bonus(rebirth_count)
        * milestone_boost(progress.count)
        * refine_milestone_boost(progress.upgrade_level)
}

/// Per-second net change of every resource.
///
/// Consumption is subtracted from the consumed resource's rate; science is
/// scaled by the science-gain bonus after all buildings are summed.
pub fn resource_rates(catalog: &Catalog, state: &GameState, bonuses: &BonusSet) -> ResourceMap {
    let mut rates = ResourceMap::ZERO;

    for def in catalog.buildings() {
        let progress = state.building(def.id);
        if progress.count == 0 {
            continue;
        }
        let Some(manager) = state.active_manager(def.id).filter(|m| m.level > 0) else {
            continue;
        };
        let factors = ManagerFactors::of(manager);
        let mult = base_multiplier(def, progress, state.current_era, bonuses, state.rebirth_count)
            * factors.yield_mult
            * factors.speed_mult;
        let count = progress.count as f64;
        rates.add(def.produces.resource, count * def.produces.amount * mult);

        if let Some(consumes) = def.consumes {
            let c_mult = bonuses.consumption_reduction.combined(consumes.resource)
                * factors.efficiency_mult
                * factors.speed_mult;
            rates.add(consumes.resource, -(count * consumes.amount * c_mult));
        }
    }

    rates.science *= bonuses.science_gain;
    rates
}

/// One-shot amount granted by clicking a building.
pub fn manual_gather_yield(
    def: &BuildingDef,
    progress: BuildingProgress,
    current_era: Era,
    bonuses: &BonusSet,
    rebirth_count: u32,
) -> (Resource, f64) {
    let mult = base_multiplier(def, progress, current_era, bonuses, rebirth_count)
        * bonuses.manual_yield;
    (def.produces.resource, (1.0 + progress.count as f64) * mult)
}
