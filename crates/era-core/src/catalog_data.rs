//! Static definitions shipped with the game.
//!
//! Costs and flows are per unit per second. Icons are presentation keys.

use crate::bonus::{Bonus, BonusKind, BonusTarget};
use crate::catalog::{BuildingDef, BuildingKind, Flow, RebirthUpgrade, ResearchTech};
use crate::era::Era;
use crate::resource::Resource;

pub const BUILDINGS: &[BuildingDef] = &[
    BuildingDef {
        id: "b1",
        name: "Foraging Hut",
        description: "Basic survival. Gathers edible roots and berries.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Food, 10.0)],
        upgrade_base_costs: Some(&[(Resource::Food, 50.0), (Resource::Wood, 20.0)]),
        produces: Flow { resource: Resource::Food, amount: 2.0 },
        consumes: None,
        era: Era::StoneAge,
        icon: "hut",
    },
    BuildingDef {
        id: "worker1",
        name: "Lumberjack",
        description: "Uses strength to harvest wood. Requires food to work.",
        kind: BuildingKind::Worker,
        base_costs: &[(Resource::Food, 50.0)],
        upgrade_base_costs: Some(&[(Resource::Food, 200.0), (Resource::Stone, 50.0)]),
        produces: Flow { resource: Resource::Wood, amount: 1.5 },
        consumes: Some(Flow { resource: Resource::Food, amount: 1.0 }),
        era: Era::StoneAge,
        icon: "tree",
    },
    BuildingDef {
        id: "worker2",
        name: "Rock Gatherer",
        description: "Collects stones for construction. Needs food.",
        kind: BuildingKind::Worker,
        base_costs: &[(Resource::Food, 80.0)],
        upgrade_base_costs: Some(&[(Resource::Food, 300.0), (Resource::Tools, 5.0)]),
        produces: Flow { resource: Resource::Stone, amount: 1.0 },
        consumes: Some(Flow { resource: Resource::Food, amount: 0.8 }),
        era: Era::StoneAge,
        icon: "mountain_rock",
    },
    BuildingDef {
        id: "b2",
        name: "Flint Workshop",
        description: "Crafts stone tools from wood and flint.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Wood, 100.0), (Resource::Stone, 50.0)],
        upgrade_base_costs: Some(&[(Resource::Wood, 500.0), (Resource::Stone, 200.0)]),
        produces: Flow { resource: Resource::Tools, amount: 0.5 },
        consumes: Some(Flow { resource: Resource::Wood, amount: 2.0 }),
        era: Era::StoneAge,
        icon: "workshop",
    },
    BuildingDef {
        id: "b_sci1",
        name: "Cave Paintings",
        description: "Early record keeping. Generates science.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Food, 200.0), (Resource::Stone, 100.0)],
        upgrade_base_costs: Some(&[(Resource::Science, 50.0), (Resource::Tools, 20.0)]),
        produces: Flow { resource: Resource::Science, amount: 0.2 },
        consumes: None,
        era: Era::StoneAge,
        icon: "art",
    },
    BuildingDef {
        id: "b3",
        name: "Grain Farm",
        description: "Systematic agriculture for mass food production.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Tools, 20.0), (Resource::Wood, 500.0)],
        upgrade_base_costs: Some(&[(Resource::Tools, 100.0), (Resource::Metal, 50.0)]),
        produces: Flow { resource: Resource::Food, amount: 15.0 },
        consumes: None,
        era: Era::ClassicalAge,
        icon: "grain",
    },
    BuildingDef {
        id: "worker3",
        name: "Miner",
        description: "Extracts raw ores. Needs tools and food.",
        kind: BuildingKind::Worker,
        base_costs: &[(Resource::Food, 200.0), (Resource::Tools, 10.0)],
        upgrade_base_costs: Some(&[(Resource::Food, 1000.0), (Resource::Metal, 100.0)]),
        produces: Flow { resource: Resource::Ore, amount: 4.0 },
        consumes: Some(Flow { resource: Resource::Food, amount: 5.0 }),
        era: Era::ClassicalAge,
        icon: "pickaxe",
    },
    BuildingDef {
        id: "b4",
        name: "Smeltery",
        description: "Refines ore into metal using wood as fuel.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Stone, 1000.0), (Resource::Tools, 50.0)],
        upgrade_base_costs: Some(&[(Resource::Stone, 5000.0), (Resource::Metal, 200.0)]),
        produces: Flow { resource: Resource::Metal, amount: 2.0 },
        consumes: Some(Flow { resource: Resource::Ore, amount: 5.0 }),
        era: Era::ClassicalAge,
        icon: "fire",
    },
    BuildingDef {
        id: "b_ind_wood",
        name: "Lumbermill",
        description: "Large scale automated saws for timber.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 1500.0), (Resource::Stone, 5000.0)],
        upgrade_base_costs: Some(&[(Resource::Metal, 2000.0), (Resource::Tools, 500.0)]),
        produces: Flow { resource: Resource::Wood, amount: 150.0 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 10.0 }),
        era: Era::IndustrialAge,
        icon: "sawmill",
    },
    BuildingDef {
        id: "b_ind_tools",
        name: "Tool Factory",
        description: "Mass-produces precision implements.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 2500.0), (Resource::Wood, 10_000.0)],
        upgrade_base_costs: Some(&[(Resource::Metal, 5000.0), (Resource::Science, 1000.0)]),
        produces: Flow { resource: Resource::Tools, amount: 50.0 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 15.0 }),
        era: Era::IndustrialAge,
        icon: "wrench",
    },
    BuildingDef {
        id: "b5",
        name: "Steam Engine",
        description: "Harnesses steam for raw energy.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 200.0), (Resource::Tools, 100.0)],
        upgrade_base_costs: Some(&[(Resource::Metal, 1000.0), (Resource::Ore, 500.0)]),
        produces: Flow { resource: Resource::Energy, amount: 10.0 },
        consumes: Some(Flow { resource: Resource::Wood, amount: 20.0 }),
        era: Era::IndustrialAge,
        icon: "steam",
    },
    BuildingDef {
        id: "b6",
        name: "Steel Works",
        description: "Massively efficient metal facility.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 500.0), (Resource::Energy, 20.0)],
        upgrade_base_costs: Some(&[(Resource::Metal, 2500.0), (Resource::Tools, 300.0)]),
        produces: Flow { resource: Resource::Metal, amount: 15.0 },
        consumes: Some(Flow { resource: Resource::Ore, amount: 20.0 }),
        era: Era::IndustrialAge,
        icon: "factory",
    },
    BuildingDef {
        id: "b7",
        name: "Nuclear Plant",
        description: "The pinnacle of fission energy.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 5000.0), (Resource::Science, 2000.0)],
        upgrade_base_costs: Some(&[(Resource::Metal, 20_000.0), (Resource::Science, 5000.0)]),
        produces: Flow { resource: Resource::Energy, amount: 200.0 },
        consumes: Some(Flow { resource: Resource::Metal, amount: 10.0 }),
        era: Era::AtomicAge,
        icon: "atom",
    },
    BuildingDef {
        id: "b8",
        name: "Quantum Lab",
        description: "Bending the laws of physics.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 5000.0), (Resource::Energy, 100.0)],
        upgrade_base_costs: Some(&[(Resource::Science, 25_000.0), (Resource::Energy, 500.0)]),
        produces: Flow { resource: Resource::Science, amount: 150.0 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 50.0 }),
        era: Era::AtomicAge,
        icon: "lab",
    },
    BuildingDef {
        id: "b_atomic_3",
        name: "Isotope Centrifuge",
        description: "Refining isotopes for advanced reactors.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 10_000.0), (Resource::Tools, 2000.0)],
        upgrade_base_costs: Some(&[(Resource::Metal, 40_000.0), (Resource::Science, 10_000.0)]),
        produces: Flow { resource: Resource::Metal, amount: 120.0 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 40.0 }),
        era: Era::AtomicAge,
        icon: "centrifuge",
    },
    BuildingDef {
        id: "b9",
        name: "Neural Hub",
        description: "Global brain interface.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 100_000.0), (Resource::Energy, 1000.0)],
        upgrade_base_costs: Some(&[(Resource::Science, 500_000.0), (Resource::Energy, 2000.0)]),
        produces: Flow { resource: Resource::Science, amount: 1000.0 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 200.0 }),
        era: Era::InformationAge,
        icon: "brain",
    },
    BuildingDef {
        id: "b_info_2",
        name: "Smart Aggregate Plant",
        description: "AI-guided laser precision excavation for high-density building materials.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Tools, 50_000.0), (Resource::Energy, 5000.0)],
        upgrade_base_costs: Some(&[(Resource::Tools, 200_000.0), (Resource::Science, 100_000.0)]),
        produces: Flow { resource: Resource::Stone, amount: 45_000.0 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 800.0 }),
        era: Era::InformationAge,
        icon: "smart_plant",
    },
    BuildingDef {
        id: "b_info_3",
        name: "Silicon Foundry",
        description: "Crafting the chips of the future.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 100_000.0), (Resource::Tools, 80_000.0)],
        upgrade_base_costs: Some(&[(Resource::Metal, 400_000.0), (Resource::Energy, 10_000.0)]),
        produces: Flow { resource: Resource::Tools, amount: 1500.0 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 1200.0 }),
        era: Era::InformationAge,
        icon: "foundry",
    },
    BuildingDef {
        id: "b_q1",
        name: "Qubit Array",
        description: "Parallel processing on a cosmic scale.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 1e7), (Resource::Energy, 5000.0)],
        upgrade_base_costs: Some(&[(Resource::Science, 5e7), (Resource::Energy, 10_000.0)]),
        produces: Flow { resource: Resource::Science, amount: 1e5 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 1000.0 }),
        era: Era::QuantumAge,
        icon: "quantum",
    },
    BuildingDef {
        id: "b_q2",
        name: "Nano-Fabricator",
        description: "Building tools from the atoms up.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 1e6), (Resource::Science, 5e6)],
        upgrade_base_costs: Some(&[(Resource::Metal, 5e8), (Resource::Science, 1e8)]),
        produces: Flow { resource: Resource::Tools, amount: 5000.0 },
        consumes: Some(Flow { resource: Resource::Metal, amount: 1000.0 }),
        era: Era::QuantumAge,
        icon: "robot",
    },
    BuildingDef {
        id: "b_q3",
        name: "Entangled Farm",
        description: "Quantum bio-synthesis for exponential yields.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 5e7), (Resource::Tools, 1e6)],
        upgrade_base_costs: Some(&[(Resource::Science, 2e8), (Resource::Energy, 1e6)]),
        produces: Flow { resource: Resource::Food, amount: 5e6 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 5000.0 }),
        era: Era::QuantumAge,
        icon: "dna",
    },
    BuildingDef {
        id: "b_q4",
        name: "Molecular Assembler",
        description: "Arranging atoms into pure structural metal.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 1e8), (Resource::Energy, 2e4)],
        upgrade_base_costs: Some(&[(Resource::Science, 5e8), (Resource::Energy, 1e5)]),
        produces: Flow { resource: Resource::Metal, amount: 1e6 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 2000.0 }),
        era: Era::QuantumAge,
        icon: "crystal",
    },
    BuildingDef {
        id: "b_s1",
        name: "Dyson Patch",
        description: "A segment of a sun-wrapping megastructure.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 1e8), (Resource::Tools, 1e7)],
        upgrade_base_costs: Some(&[(Resource::Metal, 5e8), (Resource::Energy, 1e7)]),
        produces: Flow { resource: Resource::Energy, amount: 1e6 },
        consumes: None,
        era: Era::StellarAge,
        icon: "sun",
    },
    BuildingDef {
        id: "b_s2",
        name: "Star Forge",
        description: "Creating heavy metals within artificial stars.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Energy, 1e6), (Resource::Ore, 1e9)],
        upgrade_base_costs: Some(&[(Resource::Energy, 5e6), (Resource::Ore, 5e9)]),
        produces: Flow { resource: Resource::Metal, amount: 1e7 },
        consumes: Some(Flow { resource: Resource::Ore, amount: 1e8 }),
        era: Era::StellarAge,
        icon: "star",
    },
    BuildingDef {
        id: "b_s3",
        name: "Asteroid Outpost",
        description: "Colonizing the rocks of deep space.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 5e9), (Resource::Tools, 1e8)],
        upgrade_base_costs: Some(&[(Resource::Metal, 2e10), (Resource::Food, 1e10)]),
        produces: Flow { resource: Resource::Ore, amount: 1e9 },
        consumes: Some(Flow { resource: Resource::Food, amount: 1e8 }),
        era: Era::StellarAge,
        icon: "outpost",
    },
    BuildingDef {
        id: "b_g1",
        name: "Nebula Condenser",
        description: "Harvesting the raw materials of space clouds.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Energy, 1e9), (Resource::Science, 1e12)],
        upgrade_base_costs: Some(&[(Resource::Energy, 5e9), (Resource::Science, 5e12)]),
        produces: Flow { resource: Resource::Food, amount: 1e9 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 1e8 }),
        era: Era::GalacticAge,
        icon: "galaxy",
    },
    BuildingDef {
        id: "b_g2",
        name: "Void Miner",
        description: "Extracting resources from the vacuum.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Metal, 1e12), (Resource::Science, 1e13)],
        upgrade_base_costs: Some(&[(Resource::Metal, 5e12), (Resource::Science, 5e13)]),
        produces: Flow { resource: Resource::Stone, amount: 1e10 },
        consumes: Some(Flow { resource: Resource::Energy, amount: 5e9 }),
        era: Era::GalacticAge,
        icon: "moon",
    },
    BuildingDef {
        id: "b_g3",
        name: "Black Hole Syphon",
        description: "Tapping into the gravity of a singularity.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Energy, 1e13), (Resource::Metal, 1e13)],
        upgrade_base_costs: Some(&[(Resource::Energy, 5e13), (Resource::Science, 1e14)]),
        produces: Flow { resource: Resource::Energy, amount: 1e12 },
        consumes: Some(Flow { resource: Resource::Science, amount: 1e11 }),
        era: Era::GalacticAge,
        icon: "vortex",
    },
    BuildingDef {
        id: "b_t1",
        name: "Singularity Core",
        description: "Infinite computational power at the event horizon.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 1e15), (Resource::Energy, 1e12)],
        upgrade_base_costs: Some(&[(Resource::Science, 1e16), (Resource::Energy, 1e13)]),
        produces: Flow { resource: Resource::Science, amount: 1e14 },
        consumes: None,
        era: Era::TranscendenceAge,
        icon: "eye",
    },
    BuildingDef {
        id: "b_t2",
        name: "Reality Weaver",
        description: "Converting digital thought into physical existence.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 1e18), (Resource::Metal, 1e15)],
        upgrade_base_costs: Some(&[(Resource::Science, 1e19), (Resource::Metal, 1e16)]),
        produces: Flow { resource: Resource::Metal, amount: 1e16 },
        consumes: None,
        era: Era::TranscendenceAge,
        icon: "sparkle",
    },
    BuildingDef {
        id: "b_t3",
        name: "Aureole Array",
        description: "Manifesting pure energy through consensus.",
        kind: BuildingKind::Building,
        base_costs: &[(Resource::Science, 1e20), (Resource::Tools, 1e18)],
        upgrade_base_costs: Some(&[(Resource::Science, 1e21), (Resource::Energy, 1e18)]),
        produces: Flow { resource: Resource::Energy, amount: 1e18 },
        consumes: Some(Flow { resource: Resource::Science, amount: 1e17 }),
        era: Era::TranscendenceAge,
        icon: "halo",
    },
];

pub const RESEARCH_TECHS: &[ResearchTech] = &[
    ResearchTech {
        id: "t_b1",
        name: "Advanced Foraging",
        description: "Knowledge of roots and berries increases Foraging Hut food yield by 50%.",
        cost: 20.0,
        era: Era::StoneAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Food), 1.5),
        icon: "hut",
    },
    ResearchTech {
        id: "t1",
        name: "Sharp Flint",
        description: "Improved cutting edges. Lumberjacks harvest 50% more Wood.",
        cost: 50.0,
        era: Era::StoneAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Wood), 1.5),
        icon: "tree",
    },
    ResearchTech {
        id: "t_worker2",
        name: "Rock Sleds",
        description: "Crude sleds allow Rock Gatherers to transport 50% more stones.",
        cost: 100.0,
        era: Era::StoneAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Stone), 1.5),
        icon: "mountain_rock",
    },
    ResearchTech {
        id: "t_b2",
        name: "Tool Standardization",
        description: "Defining clear designs boosts Flint Workshop output by 40%.",
        cost: 250.0,
        era: Era::StoneAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Tools), 1.4),
        icon: "workshop",
    },
    ResearchTech {
        id: "t_sci1",
        name: "Oral Tradition",
        description: "Passing down legends increases Science gain from Cave Paintings by 100%.",
        cost: 400.0,
        era: Era::StoneAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Science), 2.0),
        icon: "art",
    },
    ResearchTech {
        id: "t2",
        name: "Fire Control",
        description: "Mastery of the flame reduces worker Food consumption by 20%.",
        cost: 600.0,
        era: Era::StoneAge,
        bonus: Bonus::new(BonusKind::ConsumptionReduction, BonusTarget::All, 0.8),
        icon: "fire",
    },
    ResearchTech {
        id: "t4",
        name: "Irrigation",
        description: "Systematic watering yields 60% more Food from Grain Farms.",
        cost: 1200.0,
        era: Era::ClassicalAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Food), 1.6),
        icon: "grain",
    },
    ResearchTech {
        id: "t_worker3",
        name: "Deep Pits",
        description: "Digging deeper allow Miners to extract 50% more Ore.",
        cost: 3000.0,
        era: Era::ClassicalAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Ore), 1.5),
        icon: "pickaxe",
    },
    ResearchTech {
        id: "t_b4",
        name: "Blast Bellows",
        description: "Increased airflow increases Smeltery metal output by 80%.",
        cost: 8000.0,
        era: Era::ClassicalAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Metal), 1.8),
        icon: "fire",
    },
    ResearchTech {
        id: "t5",
        name: "Alloy Mixing",
        description: "Advanced metallurgy makes Metal refinement 30% cheaper.",
        cost: 25_000.0,
        era: Era::ClassicalAge,
        bonus: Bonus::new(BonusKind::CostReduction, BonusTarget::Only(Resource::Metal), 0.7),
        icon: "fire",
    },
    ResearchTech {
        id: "t6",
        name: "Philosophy",
        description: "Abstract thought increases Science gain from all sources by 50%.",
        cost: 50_000.0,
        era: Era::ClassicalAge,
        bonus: Bonus::new(BonusKind::ScienceGain, BonusTarget::All, 1.5),
        icon: "art",
    },
    ResearchTech {
        id: "t_ind_wood",
        name: "Circular Saws",
        description: "Steam-powered blades make Lumbermills 100% more productive.",
        cost: 80_000.0,
        era: Era::IndustrialAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Wood), 2.0),
        icon: "sawmill",
    },
    ResearchTech {
        id: "t_ind_tools",
        name: "Interchangeable Parts",
        description: "Standardized components boost Tool Factory output by 150%.",
        cost: 150_000.0,
        era: Era::IndustrialAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Tools), 2.5),
        icon: "wrench",
    },
    ResearchTech {
        id: "t_steam",
        name: "High-Pressure Boilers",
        description: "Tighter seals increase Steam Engine energy yield by 100%.",
        cost: 300_000.0,
        era: Era::IndustrialAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Energy), 2.0),
        icon: "steam",
    },
    ResearchTech {
        id: "t_steel",
        name: "Bessemer Process",
        description: "Oxidizing impurities makes Steel Works 200% more efficient.",
        cost: 600_000.0,
        era: Era::IndustrialAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Metal), 3.0),
        icon: "factory",
    },
    ResearchTech {
        id: "t7",
        name: "Electric Grid",
        description: "Copper wiring boosts all Industrial Age production by 50%.",
        cost: 1_200_000.0,
        era: Era::IndustrialAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::All, 1.5),
        icon: "factory",
    },
    ResearchTech {
        id: "t9",
        name: "Nuclear Fission",
        description: "Optimized fuel rods double Nuclear Plant energy production.",
        cost: 2_500_000.0,
        era: Era::AtomicAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Energy), 2.0),
        icon: "atom",
    },
    ResearchTech {
        id: "t_b8",
        name: "Particle Accelerators",
        description: "Collision experiments boost Quantum Lab science output by 200%.",
        cost: 6_000_000.0,
        era: Era::AtomicAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Science), 3.0),
        icon: "lab",
    },
    ResearchTech {
        id: "t_atomic_2",
        name: "Gas Diffusion",
        description: "Better membranes allow Isotope Centrifuges to produce 150% more metal.",
        cost: 15_000_000.0,
        era: Era::AtomicAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Metal), 2.5),
        icon: "centrifuge",
    },
    ResearchTech {
        id: "t10",
        name: "Global Network",
        description: "Instant data exchange. Neural Hubs produce 300% more Science.",
        cost: 40_000_000.0,
        era: Era::InformationAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Science), 4.0),
        icon: "brain",
    },
    ResearchTech {
        id: "t_info_2",
        name: "Precision Extraction",
        description: "Advanced geodetic sensors. Smart Aggregate Plants yield 400% more Stone.",
        cost: 100_000_000.0,
        era: Era::InformationAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Stone), 5.0),
        icon: "smart_plant",
    },
    ResearchTech {
        id: "t_info_3",
        name: "Extreme Ultraviolet Lithography",
        description: "Precision etching boosts Silicon Foundry tool yield by 300%.",
        cost: 250_000_000.0,
        era: Era::InformationAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Tools), 4.0),
        icon: "foundry",
    },
    ResearchTech {
        id: "t11",
        name: "Quantum Correction",
        description: "Removing noise allows Qubit Arrays to produce 500% more Science.",
        cost: 800_000_000.0,
        era: Era::QuantumAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Science), 6.0),
        icon: "quantum",
    },
    ResearchTech {
        id: "t_nano",
        name: "Molecular Printing",
        description: "Building from scratch. Nano-Fabricators produce 400% more Tools.",
        cost: 2_000_000_000.0,
        era: Era::QuantumAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Tools), 5.0),
        icon: "robot",
    },
    ResearchTech {
        id: "t_q3",
        name: "Bio-Sync",
        description: "Entangled nutrition allows Entangled Farms to yield 600% more Food.",
        cost: 5_000_000_000.0,
        era: Era::QuantumAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Food), 7.0),
        icon: "dna",
    },
    ResearchTech {
        id: "t_q4",
        name: "Atomic Glue",
        description: "Stronger bonds allow Molecular Assemblers to yield 500% more Metal.",
        cost: 12_000_000_000.0,
        era: Era::QuantumAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Metal), 6.0),
        icon: "crystal",
    },
    ResearchTech {
        id: "t13",
        name: "Dyson Swarm Optimization",
        description: "Perfect alignment allows Dyson Patches to yield 1000% more Energy.",
        cost: 5e13,
        era: Era::StellarAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Energy), 11.0),
        icon: "sun",
    },
    ResearchTech {
        id: "t_s2",
        name: "Gravitational Compression",
        description: "Simulating core pressure allows Star Forges to yield 800% more Metal.",
        cost: 1.5e14,
        era: Era::StellarAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Metal), 9.0),
        icon: "star",
    },
    ResearchTech {
        id: "t_stellar_3",
        name: "Mag-Lev Extractors",
        description: "Magnetic sifting allows Asteroid Outposts to yield 1000% more Ore.",
        cost: 4e14,
        era: Era::StellarAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Ore), 11.0),
        icon: "outpost",
    },
    ResearchTech {
        id: "t_g1",
        name: "Nebula Sifting",
        description: "Catching cosmic dust. Nebula Condensers yield 1000% more Food.",
        cost: 2e15,
        era: Era::GalacticAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Food), 11.0),
        icon: "galaxy",
    },
    ResearchTech {
        id: "t_g2",
        name: "Void Resonance",
        description: "Deep vacuum tuning allows Void Miners to yield 1000% more Stone.",
        cost: 6e15,
        era: Era::GalacticAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Stone), 11.0),
        icon: "moon",
    },
    ResearchTech {
        id: "t_galactic_1",
        name: "Hawking Capture",
        description: "Capturing radiation allows Black Hole Syphons to yield 1000% more Energy.",
        cost: 1.5e16,
        era: Era::GalacticAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Energy), 11.0),
        icon: "vortex",
    },
    ResearchTech {
        id: "t_sing_core",
        name: "Infinite Memory",
        description: "Perfect retention allows Singularity Cores to yield 50x more Science.",
        cost: 2e18,
        era: Era::TranscendenceAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Science), 50.0),
        icon: "eye",
    },
    ResearchTech {
        id: "t_weaver",
        name: "Conceptual Printing",
        description: "Thought to matter. Reality Weavers yield 50x more Metal.",
        cost: 8e18,
        era: Era::TranscendenceAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Metal), 50.0),
        icon: "sparkle",
    },
    ResearchTech {
        id: "t_trans_1",
        name: "Divine Resonance",
        description: "Agreement with the universe. Aureole Arrays yield 50x more Energy.",
        cost: 3e19,
        era: Era::TranscendenceAge,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Energy), 50.0),
        icon: "halo",
    },
];

pub const REBIRTH_UPGRADES: &[RebirthUpgrade] = &[
    RebirthUpgrade {
        id: "rb_yield_1",
        name: "Ancestral Blessing",
        description: "Permanent 50% boost to all production.",
        short_description: "+50% Production Boost",
        cost: 5.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::All, 1.5),
        icon: "✨",
    },
    RebirthUpgrade {
        id: "rb_sci_1",
        name: "Ethereal Insight",
        description: "Start every timeline with 200% more science gain.",
        short_description: "+200% Science Gained",
        cost: 10.0,
        bonus: Bonus::new(BonusKind::ScienceGain, BonusTarget::All, 3.0),
        icon: "🧠",
    },
    RebirthUpgrade {
        id: "rb_res_1",
        name: "Earthly Affinity",
        description: "Wood and Stone costs reduced by 20%.",
        short_description: "-20% Wood/Stone Cost",
        cost: 15.0,
        bonus: Bonus::new(BonusKind::CostReduction, BonusTarget::All, 0.8),
        icon: "🌍",
    },
    RebirthUpgrade {
        id: "rb_cost_1",
        name: "Timeline Efficiency",
        description: "Buildings are 20% cheaper in all eras.",
        short_description: "-20% Building Cost",
        cost: 25.0,
        bonus: Bonus::new(BonusKind::CostReduction, BonusTarget::All, 0.8),
        icon: "📉",
    },
    RebirthUpgrade {
        id: "rb_ore_1",
        name: "Deep Core Extraction",
        description: "Ore production multiplied by 2.0.",
        short_description: "x2.0 Ore Yield",
        cost: 35.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Ore), 2.0),
        icon: "⛏️",
    },
    RebirthUpgrade {
        id: "rb_manual_1",
        name: "Divine Hand",
        description: "Manual gathering yields 500% more resources.",
        short_description: "+500% Manual Yield",
        cost: 50.0,
        bonus: Bonus::new(BonusKind::ManualYield, BonusTarget::All, 6.0),
        icon: "🖐️",
    },
    RebirthUpgrade {
        id: "rb_tools_1",
        name: "Arcane Machinery",
        description: "Tools production multiplied by 2.5.",
        short_description: "x2.5 Tool Output",
        cost: 75.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Tools), 2.5),
        icon: "⚙️",
    },
    RebirthUpgrade {
        id: "rb_yield_2",
        name: "Legacy of Giants",
        description: "Production increased by another 200%.",
        short_description: "+200% Production Boost",
        cost: 100.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::All, 3.0),
        icon: "🏛️",
    },
    RebirthUpgrade {
        id: "rb_metal_1",
        name: "Industrial Prowess",
        description: "Metal production multiplied by 3.0.",
        short_description: "x3.0 Metal Output",
        cost: 150.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Metal), 3.0),
        icon: "🏭",
    },
    RebirthUpgrade {
        id: "rb_speed_1",
        name: "Chronos Gaze",
        description: "Production boosted by 100% (Manager Synergy).",
        short_description: "x2.0 Synergy Boost",
        cost: 200.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::All, 2.0),
        icon: "⏳",
    },
    RebirthUpgrade {
        id: "rb_cons_1",
        name: "Void Resonance",
        description: "Energy consumption reduced by 50%.",
        short_description: "-50% Energy Use",
        cost: 300.0,
        bonus: Bonus::new(BonusKind::ConsumptionReduction, BonusTarget::Only(Resource::Energy), 0.5),
        icon: "🌑",
    },
    RebirthUpgrade {
        id: "rb_over_1",
        name: "Temporal Overclock",
        description: "All production multiplied by 5.0.",
        short_description: "x5.0 Total Production",
        cost: 450.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::All, 5.0),
        icon: "⚡",
    },
    RebirthUpgrade {
        id: "rb_blue_1",
        name: "Master Blueprint",
        description: "All building and worker costs reduced by 40%.",
        short_description: "-40% All Costs",
        cost: 600.0,
        bonus: Bonus::new(BonusKind::CostReduction, BonusTarget::All, 0.6),
        icon: "📜",
    },
    RebirthUpgrade {
        id: "rb_sci_2",
        name: "Scientific Revolution",
        description: "Science gain multiplied by 10.0.",
        short_description: "x10.0 Science Gain",
        cost: 850.0,
        bonus: Bonus::new(BonusKind::ScienceGain, BonusTarget::All, 10.0),
        icon: "🧬",
    },
    RebirthUpgrade {
        id: "rb_ener_1",
        name: "Stellar Harvest",
        description: "Energy production multiplied by 10.0.",
        short_description: "x10.0 Energy Output",
        cost: 1250.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::Only(Resource::Energy), 10.0),
        icon: "🌞",
    },
    RebirthUpgrade {
        id: "rb_yield_3",
        name: "Universal Synergy",
        description: "All production multiplied by 10.0.",
        short_description: "x10.0 All Production",
        cost: 2000.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::All, 10.0),
        icon: "🌌",
    },
    RebirthUpgrade {
        id: "rb_cost_2",
        name: "Reality Bender",
        description: "All costs reduced by 60%.",
        short_description: "-60% All Costs",
        cost: 5000.0,
        bonus: Bonus::new(BonusKind::CostReduction, BonusTarget::All, 0.4),
        icon: "🕳️",
    },
    RebirthUpgrade {
        id: "rb_omega_1",
        name: "Omega Timeline",
        description: "Final tier. All production multiplied by 50.0.",
        short_description: "x50.0 Final Multiplier",
        cost: 10_000.0,
        bonus: Bonus::new(BonusKind::Production, BonusTarget::All, 50.0),
        icon: "⚛️",
    },
];

// Manager given names, picked by building position.
pub const COMMON_NAMES: &[&str] = &[
    "Grog",
    "Joe",
    "Bob",
    "Jax",
    "Tim",
    "Dan",
    "Sam",
    "Mick",
    "Pip",
    "Zog",
    "Kael",
    "Finn",
];
pub const UNCOMMON_NAMES: &[&str] = &[
    "Kael",
    "Bjorn",
    "Pyra",
    "Heph",
    "Wu",
    "Jax",
    "Tesla",
    "Mole",
    "Vulcan",
    "Watt",
    "Programmer Ada",
];
pub const RARE_NAMES: &[&str] = &[
    "Lyra",
    "Sven",
    "Icarus",
    "Elara",
    "Ceres",
    "Jack",
    "Mole",
    "Carnegie",
    "Watt",
    "Curie",
    "Higgs",
];
pub const EPIC_NAMES: &[&str] = &[
    "Silvanus",
    "Gravel Lord",
    "Homer",
    "Industrialist Ford",
    "Bessemer",
    "Iron King",
    "Schrodinger",
    "Atom Weaver",
    "Space Ghost",
];
pub const LEGENDARY_NAMES: &[&str] = &[
    "Gaia",
    "Paul Bunyan",
    "Demeter",
    "The Architect",
    "Lord Kelvin",
    "Dr. Oppen",
    "Archon",
    "Quantum Core",
    "Event Horizon",
];
pub const GODLIKE_NAMES: &[&str] = &[
    "Hephaestus",
    "Magneto",
    "Atom Lord",
    "Singularity",
    "Star Eater",
    "Void Dredger",
    "Dream Weaver",
    "Chronos",
    "Prometheus",
];

/// Short manager ids from early saves and the ids they became.
pub const LEGACY_MANAGER_IDS: &[(&str, &str)] = &[
    ("m1", "m_b1_common"),
    ("m2", "m_worker1_common"),
    ("m3", "m_worker2_uncommon"),
    ("m4", "m_b2_uncommon"),
    ("m5", "m_b_sci1_rare"),
    ("m6", "m_b3_common"),
    ("m7", "m_b_ind_wood_rare"),
    ("m8", "m_b_ind_tools_epic"),
    ("m9", "m_worker3_uncommon"),
    ("m10", "m_b4_rare"),
    ("m11", "m_b5_rare"),
    ("m12", "m_b6_epic"),
    ("m13", "m_b7_legendary"),
    ("m14", "m_b8_legendary"),
    ("m15", "m_b9_legendary"),
    ("m16", "m_b_q1_epic"),
    ("m17", "m_b_q2_epic"),
    ("m18", "m_b_s1_legendary"),
    ("m19", "m_b_s2_legendary"),
    ("m20", "m_b_g1_god-like"),
    ("m21", "m_b_g2_god-like"),
    ("m22", "m_b_t1_god-like"),
    ("m23", "m_b_t2_god-like"),
];
