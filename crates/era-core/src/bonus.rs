//! Research and rebirth bonuses, and the multiplicative stacks built from them.
//!
//! Every acquired tech or rebirth upgrade contributes exactly one [`Bonus`].
//! Bonuses of the same kind and target multiply together; a target of
//! [`BonusTarget::All`] stacks separately and is applied on top of the
//! resource-specific factor.

use crate::catalog::Catalog;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};

/// What a bonus affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    Production,
    CostReduction,
    ConsumptionReduction,
    ManualYield,
    ScienceGain,
}

/// Which resource a bonus is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusTarget {
    All,
    Only(Resource),
}

/// A single multiplicative bonus, e.g. `1.5` for +50% or `0.8` for -20%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bonus {
    pub kind: BonusKind,
    pub target: BonusTarget,
    pub value: f64,
}

impl Bonus {
    pub const fn new(kind: BonusKind, target: BonusTarget, value: f64) -> Self {
        Self {
            kind,
            target,
            value,
        }
    }
}

/// A per-resource multiplier table with a separate "all" factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopedMultiplier {
    all: f64,
    per_resource: [f64; 8],
}

impl Default for ScopedMultiplier {
    fn default() -> Self {
        Self {
            all: 1.0,
            per_resource: [1.0; 8],
        }
    }
}

impl ScopedMultiplier {
    fn apply(&mut self, target: BonusTarget, value: f64) {
        match target {
            BonusTarget::All => self.all *= value,
            BonusTarget::Only(r) => self.per_resource[r as usize] *= value,
        }
    }

    /// The factor scoped to "all" resources.
    pub fn global(&self) -> f64 {
        self.all
    }

    /// The factor scoped to exactly `resource`, excluding the global factor.
    pub fn specific(&self, resource: Resource) -> f64 {
        self.per_resource[resource as usize]
    }

    /// Specific factor times global factor.
    pub fn combined(&self, resource: Resource) -> f64 {
        self.specific(resource) * self.all
    }
}

/// All bonuses currently in effect, folded into multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusSet {
    pub production: ScopedMultiplier,
    pub cost_reduction: ScopedMultiplier,
    pub consumption_reduction: ScopedMultiplier,
    pub manual_yield: f64,
    pub science_gain: f64,
}

impl Default for BonusSet {
    fn default() -> Self {
        Self {
            production: ScopedMultiplier::default(),
            cost_reduction: ScopedMultiplier::default(),
            consumption_reduction: ScopedMultiplier::default(),
            manual_yield: 1.0,
            science_gain: 1.0,
        }
    }
}

impl BonusSet {
    /// Fold a sequence of bonuses into a set.
    pub fn from_bonuses<'a>(bonuses: impl IntoIterator<Item = &'a Bonus>) -> Self {
        let mut set = BonusSet::default();
        for bonus in bonuses {
            set.apply(bonus);
        }
        set
    }

    /// Collect the bonuses of every known tech and rebirth upgrade id.
    /// Unknown ids are ignored.
    pub fn collect(catalog: &Catalog, tech_ids: &[String], rebirth_ids: &[String]) -> Self {
        let techs = tech_ids
            .iter()
            .filter_map(|id| catalog.tech(id))
            .map(|t| &t.bonus);
        let upgrades = rebirth_ids
            .iter()
            .filter_map(|id| catalog.rebirth_upgrade(id))
            .map(|u| &u.bonus);
        Self::from_bonuses(techs.chain(upgrades))
    }

    pub fn apply(&mut self, bonus: &Bonus) {
        match bonus.kind {
            BonusKind::Production => self.production.apply(bonus.target, bonus.value),
            BonusKind::CostReduction => self.cost_reduction.apply(bonus.target, bonus.value),
            BonusKind::ConsumptionReduction => {
                self.consumption_reduction.apply(bonus.target, bonus.value)
            }
            BonusKind::ManualYield => self.manual_yield *= bonus.value,
            BonusKind::ScienceGain => self.science_gain *= bonus.value,
        }
    }
}
