//! The nine ordered eras and their science thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tier of progression. Ordering follows advancement order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Era {
    #[default]
    #[serde(rename = "Stone Age")]
    StoneAge,
    #[serde(rename = "Classical Age")]
    ClassicalAge,
    #[serde(rename = "Industrial Age")]
    IndustrialAge,
    #[serde(rename = "Atomic Age")]
    AtomicAge,
    #[serde(rename = "Information Age")]
    InformationAge,
    #[serde(rename = "Quantum Age")]
    QuantumAge,
    #[serde(rename = "Stellar Age")]
    StellarAge,
    #[serde(rename = "Galactic Age")]
    GalacticAge,
    #[serde(rename = "Transcendence Age")]
    TranscendenceAge,
}

impl Era {
    /// All eras in advancement order.
    pub const ORDER: [Era; 9] = [
        Era::StoneAge,
        Era::ClassicalAge,
        Era::IndustrialAge,
        Era::AtomicAge,
        Era::InformationAge,
        Era::QuantumAge,
        Era::StellarAge,
        Era::GalacticAge,
        Era::TranscendenceAge,
    ];

    /// Position in [`Era::ORDER`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The era after this one, or `None` for the last era.
    pub fn next(self) -> Option<Era> {
        Era::ORDER.get(self.index() + 1).copied()
    }

    /// Science needed to enter this era.
    pub fn science_requirement(self) -> f64 {
        match self {
            Era::StoneAge => 0.0,
            Era::ClassicalAge => 5_000.0,
            Era::IndustrialAge => 250_000.0,
            Era::AtomicAge => 10_000_000.0,
            Era::InformationAge => 500_000_000.0,
            Era::QuantumAge => 25_000_000_000.0,
            Era::StellarAge => 1e13,
            Era::GalacticAge => 1e16,
            Era::TranscendenceAge => 1e20,
        }
    }

    /// Display name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Era::StoneAge => "Stone Age",
            Era::ClassicalAge => "Classical Age",
            Era::IndustrialAge => "Industrial Age",
            Era::AtomicAge => "Atomic Age",
            Era::InformationAge => "Information Age",
            Era::QuantumAge => "Quantum Age",
            Era::StellarAge => "Stellar Age",
            Era::GalacticAge => "Galactic Age",
            Era::TranscendenceAge => "Transcendence Age",
        }
    }

    /// Parse a serialized era name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Era> {
        Era::ORDER.into_iter().find(|e| e.name() == name)
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
