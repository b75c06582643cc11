//! The immutable game catalog: buildings, managers, research and rebirth
//! upgrades.
//!
//! Static definitions live in [`crate::catalog_data`]; this module holds the
//! definition types and the [`Catalog`] lookup built once at startup. The
//! manager roster is derived from the building list (one manager per
//! building and rarity tier).

use crate::bonus::Bonus;
use crate::catalog_data;
use crate::era::Era;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// A resource and an amount per unit per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flow {
    pub resource: Resource,
    pub amount: f64,
}

/// Whether an entry is presented as a structure or as a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingKind {
    Building,
    Worker,
}

/// Static definition of a building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: BuildingKind,
    /// Per-unit base price of the first purchase, per resource.
    pub base_costs: &'static [(Resource, f64)],
    /// Per-level base price of the first upgrade. `None` means not upgradable.
    pub upgrade_base_costs: Option<&'static [(Resource, f64)]>,
    pub produces: Flow,
    pub consumes: Option<Flow>,
    pub era: Era,
    pub icon: &'static str,
}

// ---------------------------------------------------------------------------
// Managers
// ---------------------------------------------------------------------------

/// Manager rarity tier. Ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    #[serde(rename = "God-like")]
    GodLike,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::GodLike,
    ];

    /// Lowercase tag used in manager ids, e.g. `god-like`.
    pub fn tag(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::GodLike => "god-like",
        }
    }

    /// Weight of this tier in a recruitment draw.
    pub fn recruit_weight(self) -> f64 {
        match self {
            Rarity::Common => 400.0,
            Rarity::Uncommon => 300.0,
            Rarity::Rare => 250.0,
            Rarity::Epic => 150.0,
            Rarity::Legendary => 60.0,
            Rarity::GodLike => 20.0,
        }
    }

    /// Per-level boosts granted by a manager of this tier.
    pub fn boosts(self) -> &'static [ManagerBoost] {
        match self {
            Rarity::Common => COMMON_BOOSTS,
            Rarity::Uncommon => UNCOMMON_BOOSTS,
            Rarity::Rare => RARE_BOOSTS,
            Rarity::Epic => EPIC_BOOSTS,
            Rarity::Legendary => LEGENDARY_BOOSTS,
            Rarity::GodLike => GODLIKE_BOOSTS,
        }
    }

    fn name_pool(self) -> &'static [&'static str] {
        match self {
            Rarity::Common => catalog_data::COMMON_NAMES,
            Rarity::Uncommon => catalog_data::UNCOMMON_NAMES,
            Rarity::Rare => catalog_data::RARE_NAMES,
            Rarity::Epic => catalog_data::EPIC_NAMES,
            Rarity::Legendary => catalog_data::LEGENDARY_NAMES,
            Rarity::GodLike => catalog_data::GODLIKE_NAMES,
        }
    }
}

/// The axis a manager boost acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostKind {
    Yield,
    Speed,
    Efficiency,
    Special,
}

/// One boost entry; the effective value is `value * manager level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManagerBoost {
    #[serde(rename = "type")]
    pub kind: BoostKind,
    pub value: f64,
}

impl ManagerBoost {
    pub const fn new(kind: BoostKind, value: f64) -> Self {
        Self { kind, value }
    }
}

const COMMON_BOOSTS: &[ManagerBoost] = &[ManagerBoost::new(BoostKind::Yield, 0.1)];
const UNCOMMON_BOOSTS: &[ManagerBoost] = &[ManagerBoost::new(BoostKind::Yield, 0.2)];
const RARE_BOOSTS: &[ManagerBoost] = &[
    ManagerBoost::new(BoostKind::Yield, 0.3),
    ManagerBoost::new(BoostKind::Speed, 0.1),
];
const EPIC_BOOSTS: &[ManagerBoost] = &[
    ManagerBoost::new(BoostKind::Yield, 0.5),
    ManagerBoost::new(BoostKind::Speed, 0.3),
];
const LEGENDARY_BOOSTS: &[ManagerBoost] = &[
    ManagerBoost::new(BoostKind::Yield, 1.0),
    ManagerBoost::new(BoostKind::Speed, 0.5),
    ManagerBoost::new(BoostKind::Special, 0.2),
];
const GODLIKE_BOOSTS: &[ManagerBoost] = &[
    ManagerBoost::new(BoostKind::Yield, 5.0),
    ManagerBoost::new(BoostKind::Special, 2.0),
];

/// Static part of a manager, generated from the building list.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerTemplate {
    pub id: String,
    pub building_id: &'static str,
    pub name: String,
    pub rarity: Rarity,
}

/// Canonical manager id for a building and rarity.
pub fn manager_id(building_id: &str, rarity: Rarity) -> String {
    format!("m_{building_id}_{}", rarity.tag())
}

// ---------------------------------------------------------------------------
// Research and rebirth upgrades
// ---------------------------------------------------------------------------

/// A one-time research purchase paid in science.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResearchTech {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: f64,
    pub era: Era,
    pub bonus: Bonus,
    pub icon: &'static str,
}

/// A permanent upgrade paid in rebirth points. Survives rebirths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RebirthUpgrade {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub short_description: &'static str,
    pub cost: f64,
    pub bonus: Bonus,
    pub icon: &'static str,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(
        catalog_data::BUILDINGS,
        catalog_data::RESEARCH_TECHS,
        catalog_data::REBIRTH_UPGRADES,
    )
});

/// Immutable lookup over all static definitions.
#[derive(Debug)]
pub struct Catalog {
    buildings: &'static [BuildingDef],
    techs: &'static [ResearchTech],
    rebirth_upgrades: &'static [RebirthUpgrade],
    managers: Vec<ManagerTemplate>,
    building_index: HashMap<&'static str, usize>,
    manager_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog over the given tables and derive the manager roster.
    pub fn new(
        buildings: &'static [BuildingDef],
        techs: &'static [ResearchTech],
        rebirth_upgrades: &'static [RebirthUpgrade],
    ) -> Self {
        let mut managers = Vec::with_capacity(buildings.len() * Rarity::ALL.len());
        for (b_idx, building) in buildings.iter().enumerate() {
            for rarity in Rarity::ALL {
                let pool = rarity.name_pool();
                let given = pool[b_idx % pool.len()];
                managers.push(ManagerTemplate {
                    id: manager_id(building.id, rarity),
                    building_id: building.id,
                    name: format!("{given} of {}", building.name),
                    rarity,
                });
            }
        }

        let building_index = buildings
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i))
            .collect();
        let manager_index = managers
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();

        Self {
            buildings,
            techs,
            rebirth_upgrades,
            managers,
            building_index,
            manager_index,
        }
    }

    /// The catalog shipped with the game.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn buildings(&self) -> &[BuildingDef] {
        self.buildings
    }

    pub fn building(&self, id: &str) -> Option<&BuildingDef> {
        self.building_index.get(id).map(|&i| &self.buildings[i])
    }

    pub fn techs(&self) -> &[ResearchTech] {
        self.techs
    }

    pub fn tech(&self, id: &str) -> Option<&ResearchTech> {
        self.techs.iter().find(|t| t.id == id)
    }

    pub fn rebirth_upgrades(&self) -> &[RebirthUpgrade] {
        self.rebirth_upgrades
    }

    pub fn rebirth_upgrade(&self, id: &str) -> Option<&RebirthUpgrade> {
        self.rebirth_upgrades.iter().find(|u| u.id == id)
    }

    /// Manager templates in generation order (building order, then rarity).
    pub fn managers(&self) -> &[ManagerTemplate] {
        &self.managers
    }

    pub fn manager(&self, id: &str) -> Option<&ManagerTemplate> {
        self.manager_index.get(id).map(|&i| &self.managers[i])
    }
}

/// Map a legacy short manager id (`m1`..`m23`) to its current id.
pub fn legacy_manager_id(id: &str) -> Option<&'static str> {
    catalog_data::LEGACY_MANAGER_IDS
        .iter()
        .find(|(old, _)| *old == id)
        .map(|(_, new)| *new)
}
