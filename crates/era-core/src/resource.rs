//! Resource identifiers and the fixed-shape resource map.
//!
//! The resource set is closed: every map always carries all eight amounts,
//! so lookups never fail and serialization keeps the flat
//! `{ "food": .., "wood": .., ... }` shape used by save files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight tracked resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Food,
    Wood,
    Stone,
    Ore,
    Tools,
    Metal,
    Energy,
    Science,
}

impl Resource {
    /// All resources in ledger order.
    pub const ALL: [Resource; 8] = [
        Resource::Food,
        Resource::Wood,
        Resource::Stone,
        Resource::Ore,
        Resource::Tools,
        Resource::Metal,
        Resource::Energy,
        Resource::Science,
    ];

    /// Storage key used in save files.
    pub fn key(self) -> &'static str {
        match self {
            Resource::Food => "food",
            Resource::Wood => "wood",
            Resource::Stone => "stone",
            Resource::Ore => "ore",
            Resource::Tools => "tools",
            Resource::Metal => "metal",
            Resource::Energy => "energy",
            Resource::Science => "science",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string does not name a resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.key() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// A per-resource list of amounts, e.g. a building's base costs.
pub type CostList = Vec<(Resource, f64)>;

/// Amount of every resource. Missing fields deserialize to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceMap {
    pub food: f64,
    pub wood: f64,
    pub stone: f64,
    pub ore: f64,
    pub tools: f64,
    pub metal: f64,
    pub energy: f64,
    pub science: f64,
}

impl ResourceMap {
    /// A map with every amount at zero.
    pub const ZERO: ResourceMap = ResourceMap {
        food: 0.0,
        wood: 0.0,
        stone: 0.0,
        ore: 0.0,
        tools: 0.0,
        metal: 0.0,
        energy: 0.0,
        science: 0.0,
    };

    pub fn get(&self, resource: Resource) -> f64 {
        self.as_array()[resource.index()]
    }

    pub fn set(&mut self, resource: Resource, amount: f64) {
        *self.slot_mut(resource) = amount;
    }

    /// Add `amount` (may be negative) to one resource.
    pub fn add(&mut self, resource: Resource, amount: f64) {
        *self.slot_mut(resource) += amount;
    }

    /// Iterate `(resource, amount)` pairs in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, f64)> + '_ {
        Resource::ALL.into_iter().map(|r| (r, self.get(r)))
    }

    /// Whether every listed cost is covered by this map.
    pub fn covers(&self, costs: &[(Resource, f64)]) -> bool {
        costs.iter().all(|&(r, amount)| self.get(r) >= amount)
    }

    fn as_array(&self) -> [f64; 8] {
        [
            self.food,
            self.wood,
            self.stone,
            self.ore,
            self.tools,
            self.metal,
            self.energy,
            self.science,
        ]
    }

    fn slot_mut(&mut self, resource: Resource) -> &mut f64 {
        match resource {
            Resource::Food => &mut self.food,
            Resource::Wood => &mut self.wood,
            Resource::Stone => &mut self.stone,
            Resource::Ore => &mut self.ore,
            Resource::Tools => &mut self.tools,
            Resource::Metal => &mut self.metal,
            Resource::Energy => &mut self.energy,
            Resource::Science => &mut self.science,
        }
    }
}
