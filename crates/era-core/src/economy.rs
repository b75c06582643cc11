//! Economy math: milestone multipliers and bulk cost solving.
//!
//! Everything here is pure. Prices grow geometrically: the unit at position
//! `k` (counted from zero across the lifetime of a building) costs
//! `base * rate^k`, so buying `n` units starting at `c` costs the closed form
//! `base * rate^c * (rate^n - 1) / (rate - 1)`. "Buy max" inverts that sum
//! per resource and takes the binding minimum.

use crate::bonus::BonusSet;
use crate::catalog::BuildingDef;
use crate::era::Era;
use crate::resource::{CostList, Resource, ResourceMap};
use crate::state::Manager;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ownership / upgrade-level thresholds that grant a step multiplier.
pub const MILESTONES: [u32; 7] = [10, 25, 50, 100, 250, 500, 1000];

/// Price growth per owned unit.
pub const PURCHASE_RATE: f64 = 1.25;
/// Price growth per upgrade level.
pub const UPGRADE_RATE: f64 = 2.5;
/// Recruitment price growth per unlocked manager.
pub const RECRUIT_RATE: f64 = 1.4;
/// Most upgrade levels bought in one action.
pub const UPGRADE_CAP: u32 = 100;
/// Divisor of the wealth score in the rebirth point formula.
pub const REBIRTH_SCALE: f64 = 5e11;

const MILESTONE_FACTOR: f64 = 2.0;
const REFINE_MILESTONE_FACTOR: f64 = 3.0;

// ---------------------------------------------------------------------------
// Quantity specifier
// ---------------------------------------------------------------------------

/// How many units an action asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuantityRepr", into = "QuantityRepr")]
pub enum Quantity {
    /// An explicit count. Zero resolves to a no-op quote.
    Exact(u32),
    /// Up to the next milestone (at least one).
    Next,
    /// As many as currently affordable.
    Max,
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Quantity::Exact(n)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Exact(n) => write!(f, "{n}"),
            Quantity::Next => f.write_str("next"),
            Quantity::Max => f.write_str("max"),
        }
    }
}

/// Error returned for a quantity that is neither a number, `next`, nor `max`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid quantity '{0}': expected a number, 'next' or 'max'")]
pub struct InvalidQuantity(pub String);

impl FromStr for Quantity {
    type Err = InvalidQuantity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "next" => Ok(Quantity::Next),
            "max" => Ok(Quantity::Max),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|v| !v.is_nan())
                .map(Quantity::from_count)
                .ok_or_else(|| InvalidQuantity(s.to_string())),
        }
    }
}

impl Quantity {
    /// Convert a raw numeric count; negatives clamp to zero, fractions floor.
    pub fn from_count(n: f64) -> Self {
        Quantity::Exact(n.max(0.0).floor().min(u32::MAX as f64) as u32)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Count(f64),
    Word(String),
}

impl TryFrom<QuantityRepr> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(repr: QuantityRepr) -> Result<Self, Self::Error> {
        match repr {
            QuantityRepr::Count(n) => Ok(Quantity::from_count(n)),
            QuantityRepr::Word(w) => w.parse(),
        }
    }
}

impl From<Quantity> for QuantityRepr {
    fn from(q: Quantity) -> Self {
        match q {
            Quantity::Exact(n) => QuantityRepr::Count(n as f64),
            other => QuantityRepr::Word(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

fn step_boost(value: u32, factor: f64) -> f64 {
    MILESTONES
        .iter()
        .take_while(|&&m| value >= m)
        .fold(1.0, |acc, _| acc * factor)
}

/// Ownership multiplier: x2 per milestone reached.
pub fn milestone_boost(count: u32) -> f64 {
    step_boost(count, MILESTONE_FACTOR)
}

/// Upgrade-level multiplier: x3 per milestone reached.
pub fn refine_milestone_boost(level: u32) -> f64 {
    step_boost(level, REFINE_MILESTONE_FACTOR)
}

/// Units needed to reach the next milestone above `current`, at least one.
/// Past the last milestone this is one.
pub fn units_to_next_milestone(current: u32) -> u32 {
    let target = MILESTONES
        .iter()
        .copied()
        .find(|&m| m > current)
        .unwrap_or(MILESTONES[MILESTONES.len() - 1]);
    target.saturating_sub(current).max(1)
}

// ---------------------------------------------------------------------------
// Geometric series
// ---------------------------------------------------------------------------

/// Price of the single unit at `position`.
pub fn unit_price(base: f64, rate: f64, position: u32) -> f64 {
    base * rate.powf(position as f64)
}

/// Total price of `n` units starting at `start`.
pub fn geometric_total(base: f64, rate: f64, start: u32, n: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    base * rate.powf(start as f64) * (rate.powf(n as f64) - 1.0) / (rate - 1.0)
}

/// Largest `n` whose total starting at `start` fits in `budget`.
/// `None` when the price is zero (no constraint).
fn affordable_units(base: f64, rate: f64, start: u32, budget: f64) -> Option<u32> {
    let first = base * rate.powf(start as f64);
    if !(first > 0.0) || !first.is_finite() {
        return None;
    }
    let budget = budget.max(0.0);
    let raw = ((budget * (rate - 1.0) / first) + 1.0).ln() / rate.ln();
    let mut n = if raw.is_finite() {
        raw.floor().clamp(0.0, u32::MAX as f64) as u32
    } else {
        0
    };
    // Correct float drift at the boundary.
    while n > 0 && geometric_total(base, rate, start, n) > budget {
        n -= 1;
    }
    Some(n)
}

// ---------------------------------------------------------------------------
// Building purchase and upgrade
// ---------------------------------------------------------------------------

/// A resolved quantity and its price.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkQuote {
    pub amount: u32,
    pub costs: CostList,
    pub can_afford: bool,
}

impl BulkQuote {
    pub fn cost_of(&self, resource: Resource) -> f64 {
        self.costs
            .iter()
            .find(|(r, _)| *r == resource)
            .map_or(0.0, |(_, c)| *c)
    }
}

fn solve_bulk(
    base_costs: &[(Resource, f64)],
    current: u32,
    rate: f64,
    resources: &ResourceMap,
    bonuses: &BonusSet,
    qty: Quantity,
    cap: Option<u32>,
) -> BulkQuote {
    let multipliers: Vec<(Resource, f64)> = base_costs
        .iter()
        .map(|&(r, base)| (r, base * bonuses.cost_reduction.combined(r)))
        .collect();

    let mut n = match qty {
        Quantity::Exact(n) => n,
        Quantity::Next => units_to_next_milestone(current),
        Quantity::Max => multipliers
            .iter()
            .filter_map(|&(r, m)| affordable_units(m, rate, current, resources.get(r)))
            .min()
            .unwrap_or(0),
    };
    if let Some(cap) = cap {
        n = n.min(cap);
    }

    let costs: CostList = multipliers
        .iter()
        .map(|&(r, m)| (r, geometric_total(m, rate, current, n)))
        .collect();
    let can_afford = n > 0 && resources.covers(&costs);

    BulkQuote {
        amount: n,
        costs,
        can_afford,
    }
}

/// Price of buying `qty` more units of `building` when `count` are owned.
pub fn bulk_cost(
    building: &BuildingDef,
    count: u32,
    resources: &ResourceMap,
    bonuses: &BonusSet,
    qty: Quantity,
) -> BulkQuote {
    solve_bulk(
        building.base_costs,
        count,
        PURCHASE_RATE,
        resources,
        bonuses,
        qty,
        None,
    )
}

/// Price of `qty` upgrade levels at `level`. `None` if the building has no
/// upgrade costs. The resolved amount never exceeds [`UPGRADE_CAP`].
pub fn bulk_upgrade_cost(
    building: &BuildingDef,
    level: u32,
    resources: &ResourceMap,
    bonuses: &BonusSet,
    qty: Quantity,
) -> Option<BulkQuote> {
    let base = building.upgrade_base_costs?;
    Some(solve_bulk(
        base,
        level,
        UPGRADE_RATE,
        resources,
        bonuses,
        qty,
        Some(UPGRADE_CAP),
    ))
}

// ---------------------------------------------------------------------------
// Manager recruitment
// ---------------------------------------------------------------------------

fn recruit_base(era: Era) -> f64 {
    800.0 * 8f64.powi(era.index() as i32)
}

/// Science price of the next single recruit.
pub fn manager_recruit_cost(era: Era, unlocked: u32) -> f64 {
    unit_price(recruit_base(era), RECRUIT_RATE, unlocked).floor()
}

/// A resolved recruit count and its science price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecruitQuote {
    pub amount: u32,
    pub cost: f64,
    pub can_afford: bool,
}

/// Cards still missing before the closest unlocked manager can level up.
/// One if nothing is unlocked.
pub fn cards_to_next_level<'a>(managers: impl IntoIterator<Item = &'a Manager>) -> u32 {
    managers
        .into_iter()
        .filter(|m| m.unlocked)
        .map(|m| m.cards_for_next_level().saturating_sub(m.cards).max(1))
        .min()
        .unwrap_or(1)
}

/// Science price of recruiting `qty` managers.
pub fn bulk_manager_recruit_cost<'a>(
    era: Era,
    unlocked: u32,
    science: f64,
    qty: Quantity,
    managers: impl IntoIterator<Item = &'a Manager>,
) -> RecruitQuote {
    let base = recruit_base(era);
    let amount = match qty {
        Quantity::Exact(n) => n,
        Quantity::Next => cards_to_next_level(managers),
        Quantity::Max => affordable_units(base, RECRUIT_RATE, unlocked, science).unwrap_or(0),
    };
    let cost = geometric_total(base, RECRUIT_RATE, unlocked, amount);
    RecruitQuote {
        amount,
        cost,
        can_afford: amount > 0 && science >= cost,
    }
}

// ---------------------------------------------------------------------------
// Rebirth
// ---------------------------------------------------------------------------

/// Weighted sum of held resources plus lifetime science.
pub fn wealth_score(resources: &ResourceMap, total_science_earned: f64) -> f64 {
    resources.food * 0.0001
        + resources.wood * 0.0005
        + resources.stone * 0.001
        + resources.ore * 0.005
        + resources.tools * 0.05
        + resources.metal * 0.2
        + resources.energy
        + total_science_earned * 10.0
}

/// Rebirth points a reset would grant right now.
pub fn rebirth_points(resources: &ResourceMap, total_science_earned: f64) -> f64 {
    (wealth_score(resources, total_science_earned) / REBIRTH_SCALE)
        .max(0.0)
        .sqrt()
}

/// Global multiplier granted by completed rebirths.
pub fn rebirth_bonus(rebirth_count: u32) -> f64 {
    1.0 + rebirth_count as f64 * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::{Bonus, BonusKind, BonusTarget};
    use crate::catalog::Catalog;
    use crate::test_utils::{approx_eq, resources_with, unlocked_manager};

    fn b1() -> &'static BuildingDef {
        Catalog::standard().building("b1").unwrap()
    }

    #[test]
    fn milestone_boost_steps() {
        assert_eq!(milestone_boost(0), 1.0);
        assert_eq!(milestone_boost(9), 1.0);
        assert_eq!(milestone_boost(10), 2.0);
        assert_eq!(milestone_boost(24), 2.0);
        assert_eq!(milestone_boost(25), 4.0);
        assert_eq!(milestone_boost(1000), 128.0);
        assert_eq!(milestone_boost(50_000), 128.0);
    }

    #[test]
    fn refine_boost_triples() {
        assert_eq!(refine_milestone_boost(9), 1.0);
        assert_eq!(refine_milestone_boost(10), 3.0);
        assert_eq!(refine_milestone_boost(25), 9.0);
    }

    #[test]
    fn next_milestone_distance() {
        assert_eq!(units_to_next_milestone(0), 10);
        assert_eq!(units_to_next_milestone(10), 15);
        assert_eq!(units_to_next_milestone(999), 1);
        assert_eq!(units_to_next_milestone(1000), 1);
        assert_eq!(units_to_next_milestone(4000), 1);
    }

    #[test]
    fn ten_foraging_huts_cost() {
        let res = resources_with(&[(Resource::Food, 1000.0)]);
        let q = bulk_cost(b1(), 0, &res, &BonusSet::default(), Quantity::Exact(10));
        assert_eq!(q.amount, 10);
        let expected = 10.0 * (1.25f64.powi(10) - 1.0) / 0.25;
        assert!(approx_eq(q.cost_of(Resource::Food), expected));
        assert!(approx_eq(q.cost_of(Resource::Food), 332.529_029_846_191_4));
        assert!(q.can_afford);
    }

    #[test]
    fn exact_zero_is_free_and_not_affordable() {
        let res = resources_with(&[(Resource::Food, 1000.0)]);
        let q = bulk_cost(b1(), 3, &res, &BonusSet::default(), Quantity::Exact(0));
        assert_eq!(q.amount, 0);
        assert_eq!(q.cost_of(Resource::Food), 0.0);
        assert!(!q.can_afford);
    }

    #[test]
    fn max_with_nothing_is_zero_and_not_affordable() {
        let q = bulk_cost(
            b1(),
            0,
            &ResourceMap::ZERO,
            &BonusSet::default(),
            Quantity::Max,
        );
        assert_eq!(q.amount, 0);
        assert!(!q.can_afford);
    }

    #[test]
    fn max_takes_binding_resource() {
        // Lumberjack costs food only; b2 costs wood and stone.
        let b2 = Catalog::standard().building("b2").unwrap();
        let plenty = resources_with(&[(Resource::Wood, 1e9), (Resource::Stone, 0.0)]);
        let q = bulk_cost(b2, 0, &plenty, &BonusSet::default(), Quantity::Max);
        assert_eq!(q.amount, 0);
    }

    #[test]
    fn cost_reduction_scales_price() {
        let res = resources_with(&[(Resource::Food, 1000.0)]);
        let bonuses = BonusSet::from_bonuses(&[
            Bonus::new(BonusKind::CostReduction, BonusTarget::Only(Resource::Food), 0.5),
            Bonus::new(BonusKind::CostReduction, BonusTarget::All, 0.5),
        ]);
        let full = bulk_cost(b1(), 0, &res, &BonusSet::default(), Quantity::Exact(1));
        let cut = bulk_cost(b1(), 0, &res, &bonuses, Quantity::Exact(1));
        assert!(approx_eq(cut.cost_of(Resource::Food), full.cost_of(Resource::Food) / 4.0));
    }

    #[test]
    fn upgrade_cap_applies_to_every_specifier() {
        let rich = resources_with(&Resource::ALL.map(|r| (r, f64::MAX / 4.0)));
        let b = b1();
        for qty in [Quantity::Exact(500), Quantity::Max] {
            let q = bulk_upgrade_cost(b, 0, &rich, &BonusSet::default(), qty).unwrap();
            assert_eq!(q.amount, UPGRADE_CAP, "{qty}");
        }
    }

    #[test]
    fn recruit_cost_curve() {
        assert_eq!(manager_recruit_cost(Era::StoneAge, 0), 800.0);
        assert_eq!(manager_recruit_cost(Era::StoneAge, 1), 1120.0);
        assert_eq!(manager_recruit_cost(Era::ClassicalAge, 0), 6400.0);
    }

    #[test]
    fn recruit_max_and_exact() {
        let q = bulk_manager_recruit_cost(Era::StoneAge, 0, 2000.0, Quantity::Max, []);
        assert_eq!(q.amount, 2);
        assert!(approx_eq(q.cost, 1920.0));
        assert!(q.can_afford);

        let q = bulk_manager_recruit_cost(Era::StoneAge, 0, 799.0, Quantity::Exact(1), []);
        assert!(!q.can_afford);

        let q = bulk_manager_recruit_cost(Era::StoneAge, 0, 0.0, Quantity::Max, []);
        assert_eq!(q.amount, 0);
        assert!(!q.can_afford);
    }

    #[test]
    fn recruit_next_targets_closest_level_up() {
        let a = unlocked_manager("m_b1_common", 1, 1); // needs 4
        let b = unlocked_manager("m_b2_common", 2, 10); // already has enough
        let locked = Manager::from_template(&Catalog::standard().managers()[5]);
        assert_eq!(cards_to_next_level([&a, &locked]), 3);
        assert_eq!(cards_to_next_level([&a, &b]), 1);
        assert_eq!(cards_to_next_level([&locked]), 1);
        assert_eq!(cards_to_next_level([]), 1);
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!("next".parse::<Quantity>(), Ok(Quantity::Next));
        assert_eq!("max".parse::<Quantity>(), Ok(Quantity::Max));
        assert_eq!("12".parse::<Quantity>(), Ok(Quantity::Exact(12)));
        assert_eq!("-4".parse::<Quantity>(), Ok(Quantity::Exact(0)));
        assert!("lots".parse::<Quantity>().is_err());

        let q: Quantity = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(q, Quantity::Max);
        let q: Quantity = serde_json::from_str("25").unwrap();
        assert_eq!(q, Quantity::Exact(25));
        assert_eq!(serde_json::to_string(&Quantity::Next).unwrap(), "\"next\"");
    }

    #[test]
    fn rebirth_points_from_wealth() {
        // 4x the scale -> 2 points.
        let science = REBIRTH_SCALE * 4.0 / 10.0;
        assert!(approx_eq(rebirth_points(&ResourceMap::ZERO, science), 2.0));
        assert_eq!(rebirth_points(&ResourceMap::ZERO, 0.0), 0.0);
        assert_eq!(rebirth_bonus(0), 1.0);
        assert_eq!(rebirth_bonus(3), 7.0);
    }
}
