//! Player actions and the quotes behind them.
//!
//! Every action validates first and returns `false` without touching
//! anything when it cannot be performed. Resource deductions go through one
//! ledger batch, so observers see each purchase as a single change.

use era_core::catalog::{BuildingDef, ResearchTech};
use era_core::economy::{
    BulkQuote, Quantity, RecruitQuote, bulk_cost, bulk_manager_recruit_cost, bulk_upgrade_cost,
    rebirth_points,
};
use era_core::format::format_number;
use era_core::ledger::LedgerKey;
use era_core::production::manual_gather_yield;
use era_core::resource::Resource;
use tracing::{debug, info};

use crate::engine::Engine;
use crate::events::EngineEvent;

impl Engine {
    // -----------------------------------------------------------------------
    // Era gating
    // -----------------------------------------------------------------------

    /// A building the current era has reached.
    fn available_building(&self, id: &str) -> Option<&'static BuildingDef> {
        let catalog = self.catalog;
        catalog
            .building(id)
            .filter(|def| def.era <= self.state.current_era)
    }

    fn available_tech(&self, id: &str) -> Option<&'static ResearchTech> {
        let catalog = self.catalog;
        catalog
            .tech(id)
            .filter(|tech| tech.era <= self.state.current_era)
    }

    fn deduct(&mut self, costs: &[(Resource, f64)]) {
        let snap = self.ledger.snapshot();
        let updates: Vec<(LedgerKey, f64)> = costs
            .iter()
            .map(|&(r, cost)| (LedgerKey::from(r), (snap.resources.get(r) - cost).max(0.0)))
            .collect();
        self.ledger.batch_update(&updates);
    }

    // -----------------------------------------------------------------------
    // Quotes
    // -----------------------------------------------------------------------

    /// Price of buying `qty` of a building. `None` for unknown or locked
    /// buildings.
    pub fn quote_purchase(&self, building_id: &str, qty: Quantity) -> Option<BulkQuote> {
        let def = self.available_building(building_id)?;
        let count = self.state.building(building_id).count;
        Some(bulk_cost(def, count, &self.resources(), &self.bonuses, qty))
    }

    /// Price of `qty` upgrade levels. `None` for unknown, locked or
    /// non-upgradable buildings.
    pub fn quote_upgrade(&self, building_id: &str, qty: Quantity) -> Option<BulkQuote> {
        let def = self.available_building(building_id)?;
        let level = self.state.building(building_id).upgrade_level;
        bulk_upgrade_cost(def, level, &self.resources(), &self.bonuses, qty)
    }

    pub fn quote_recruit(&self, qty: Quantity) -> RecruitQuote {
        bulk_manager_recruit_cost(
            self.state.current_era,
            self.state.unlocked_manager_count(),
            self.resources().science,
            qty,
            self.state.managers.values(),
        )
    }

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    pub fn buy_building(&mut self, building_id: &str, qty: Quantity) -> bool {
        let Some(quote) = self.quote_purchase(building_id, qty) else {
            return false;
        };
        if !quote.can_afford {
            return false;
        }
        self.deduct(&quote.costs);
        if let Some(progress) = self.state.buildings.get_mut(building_id) {
            progress.count += quote.amount;
        }
        self.refresh();
        debug!(building = building_id, amount = quote.amount, "bought");
        true
    }

    pub fn upgrade_building(&mut self, building_id: &str, qty: Quantity) -> bool {
        let Some(quote) = self.quote_upgrade(building_id, qty) else {
            return false;
        };
        if !quote.can_afford {
            return false;
        }
        self.deduct(&quote.costs);
        if let Some(progress) = self.state.buildings.get_mut(building_id) {
            progress.upgrade_level += quote.amount;
        }
        self.refresh();
        debug!(building = building_id, levels = quote.amount, "upgraded");
        true
    }

    /// Buffer a click's yield for the next tick. Returns the amount.
    pub fn manual_gather(&mut self, building_id: &str) -> Option<f64> {
        let def = self.available_building(building_id)?;
        let (resource, gain) = manual_gather_yield(
            def,
            self.state.building(building_id),
            self.state.current_era,
            &self.bonuses,
            self.state.rebirth_count,
        );
        self.manual_gains.add(resource, gain);
        self.events.push(EngineEvent::Gathered {
            building_id: building_id.to_string(),
            resource,
            amount: gain,
            label: format!("+{}", format_number(gain)),
        });
        Some(gain)
    }

    // -----------------------------------------------------------------------
    // Research and eras
    // -----------------------------------------------------------------------

    pub fn research(&mut self, tech_id: &str) -> bool {
        let Some(tech) = self.available_tech(tech_id) else {
            return false;
        };
        if self.state.has_researched(tech_id) || self.resources().science < tech.cost {
            return false;
        }
        self.deduct(&[(Resource::Science, tech.cost)]);
        self.state.researched_tech_ids.push(tech.id.to_string());
        self.refresh();
        debug!(tech = tech_id, "researched");
        true
    }

    /// Move to the next era if enough science is held.
    pub fn advance_era(&mut self) -> bool {
        let Some(next) = self.state.current_era.next() else {
            return false;
        };
        if self.resources().science < next.science_requirement() {
            return false;
        }
        self.state.current_era = next;
        self.refresh();
        info!(era = %next, "era advanced");
        self.events.push(EngineEvent::EraAdvanced { era: next });
        true
    }

    // -----------------------------------------------------------------------
    // Managers
    // -----------------------------------------------------------------------

    /// Recruit `qty` managers by weighted draw. A locked manager drawn is
    /// unlocked at level 1; an unlocked one gains a card.
    pub fn recruit_managers(&mut self, qty: Quantity) -> bool {
        let quote = self.quote_recruit(qty);
        if !quote.can_afford {
            return false;
        }
        self.deduct(&[(Resource::Science, quote.cost)]);

        let catalog = self.catalog;
        let templates = catalog.managers();
        for _ in 0..quote.amount {
            let Some(pick) = self
                .rng
                .weighted_index(templates.iter().map(|t| t.rarity.recruit_weight()))
            else {
                break;
            };
            let Some(manager) = self.state.managers.get_mut(&templates[pick].id) else {
                continue;
            };
            if manager.unlocked {
                manager.cards += 1;
            } else {
                manager.unlocked = true;
                manager.level = 1;
                manager.cards = 1;
            }
        }
        self.refresh();
        debug!(amount = quote.amount, cost = quote.cost, "recruited managers");
        true
    }

    /// Spend cards to raise a manager's level.
    pub fn upgrade_manager(&mut self, manager_id: &str) -> bool {
        let Some(manager) = self.state.managers.get_mut(manager_id) else {
            return false;
        };
        if !manager.can_level_up() {
            return false;
        }
        let spent = manager.cards_for_next_level();
        manager.cards -= spent;
        manager.level += 1;
        self.refresh();
        true
    }

    /// Flip a manager's active flag. Activating deactivates every other
    /// manager of the same building first. Locked managers cannot be
    /// activated.
    pub fn toggle_manager(&mut self, manager_id: &str) -> bool {
        let Some(manager) = self.state.managers.get(manager_id) else {
            return false;
        };
        let activate = !manager.is_active;
        if activate && !manager.unlocked {
            return false;
        }
        let building_id = manager.building_id.clone();
        if activate {
            for m in self.state.managers.values_mut() {
                if m.building_id == building_id {
                    m.is_active = false;
                }
            }
        }
        if let Some(manager) = self.state.managers.get_mut(manager_id) {
            manager.is_active = activate;
        }
        self.refresh();
        true
    }

    // -----------------------------------------------------------------------
    // Rebirth
    // -----------------------------------------------------------------------

    /// Reset for rebirth points. Requires at least one point to earn.
    pub fn rebirth(&mut self) -> bool {
        let snap = self.ledger.snapshot();
        let points = rebirth_points(&snap.resources, snap.total_science_earned);
        if points < 1.0 {
            return false;
        }
        let next = self.state.reborn(points, self.now());
        let rebirth_count = next.rebirth_count;
        self.install(next);
        info!(rebirth_count, points, "reborn");
        self.events.push(EngineEvent::Reborn {
            rebirth_count,
            points_earned: points,
        });
        true
    }

    pub fn buy_rebirth_upgrade(&mut self, upgrade_id: &str) -> bool {
        let catalog = self.catalog;
        let Some(upgrade) = catalog.rebirth_upgrade(upgrade_id) else {
            return false;
        };
        if self.state.owns_rebirth_upgrade(upgrade_id) || self.state.rebirth_points < upgrade.cost {
            return false;
        }
        self.state.rebirth_points -= upgrade.cost;
        self.state.rebirth_upgrade_ids.push(upgrade.id.to_string());
        self.refresh();
        debug!(upgrade = upgrade_id, "bought rebirth upgrade");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{engine_with_state, fresh_engine};
    use era_core::catalog::Catalog;
    use era_core::era::Era;
    use era_core::resource::ResourceMap;
    use era_core::state::GameState;
    use era_core::test_utils::{activate, approx_eq, state_with_building, unlocked_manager};

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    #[test]
    fn buy_ten_huts() {
        let mut engine = fresh_engine();
        engine.grant(Resource::Food, 380.0);
        assert!(engine.buy_building("b1", Quantity::Exact(10)));
        let expected = 10.0 * (1.25f64.powi(10) - 1.0) / 0.25;
        assert!((expected - 332.52).abs() < 0.01);
        assert!(approx_eq(engine.resources().food, 400.0 - expected));
        assert_eq!(engine.state().building("b1").count, 10);
    }

    #[test]
    fn unaffordable_purchase_is_noop() {
        let mut engine = fresh_engine();
        let version = engine.ledger().version();
        assert!(!engine.buy_building("b1", Quantity::Exact(10)));
        assert!(!engine.buy_building("b1", Quantity::Exact(0)));
        assert!(!engine.buy_building("nope", Quantity::Max));
        assert_eq!(engine.resources().food, 20.0);
        assert_eq!(engine.state().building("b1").count, 0);
        assert_eq!(engine.ledger().version(), version);
    }

    #[test]
    fn later_era_buildings_are_locked() {
        let mut engine = fresh_engine();
        let later = Catalog::standard()
            .buildings()
            .iter()
            .find(|b| b.era > Era::StoneAge)
            .unwrap();
        for (r, _) in later.base_costs {
            engine.grant(*r, 1e30);
        }
        assert!(engine.quote_purchase(later.id, Quantity::Exact(1)).is_none());
        assert!(!engine.buy_building(later.id, Quantity::Exact(1)));
        assert!(engine.manual_gather(later.id).is_none());
    }

    #[test]
    fn upgrade_raises_level() {
        let mut engine = fresh_engine();
        engine.grant(Resource::Food, 30.0);
        engine.grant(Resource::Wood, 20.0);
        assert!(engine.upgrade_building("b1", Quantity::Exact(1)));
        assert_eq!(engine.state().building("b1").upgrade_level, 1);
        assert!(approx_eq(engine.resources().food, 0.0));
        assert!(approx_eq(engine.resources().wood, 0.0));
    }

    #[test]
    fn manual_gather_is_buffered_until_tick() {
        let mut engine = fresh_engine();
        let gain = engine.manual_gather("b1").unwrap();
        assert_eq!(gain, 1.0);
        assert_eq!(engine.resources().food, 20.0);
        engine.advance(100);
        assert_eq!(engine.resources().food, 21.0);
        assert!(engine.drain_events().iter().any(|e| matches!(
            e,
            EngineEvent::Gathered { label, resource: Resource::Food, .. } if label == "+1.00"
        )));
    }

    // -----------------------------------------------------------------------
    // Research and eras
    // -----------------------------------------------------------------------

    #[test]
    fn research_once() {
        let mut engine = fresh_engine();
        assert!(!engine.research("t_b1"));
        engine.grant(Resource::Science, 40.0);
        assert!(engine.research("t_b1"));
        assert!(engine.state().has_researched("t_b1"));
        assert!(approx_eq(engine.resources().science, 20.0));
        assert!(!engine.research("t_b1"));
        assert_eq!(engine.bonuses().production.specific(Resource::Food), 1.5);
    }

    #[test]
    fn era_advances_one_step_on_threshold() {
        let mut engine = fresh_engine();
        engine.grant(Resource::Science, 4_999.0);
        assert!(!engine.advance_era());
        engine.grant(Resource::Science, 1.0);
        assert!(engine.advance_era());
        assert_eq!(engine.state().current_era, Era::ClassicalAge);
        assert_eq!(engine.resources().science, 5_000.0);
        assert!(!engine.advance_era());
    }

    // -----------------------------------------------------------------------
    // Managers
    // -----------------------------------------------------------------------

    #[test]
    fn recruit_one_unlocks_a_manager() {
        let mut engine = fresh_engine();
        assert!(!engine.recruit_managers(Quantity::Exact(1)));
        engine.grant(Resource::Science, 1_000.0);
        assert!(engine.recruit_managers(Quantity::Exact(1)));
        assert!(approx_eq(engine.resources().science, 200.0));
        let unlocked: Vec<_> = engine.state().managers.values().filter(|m| m.unlocked).collect();
        assert_eq!(unlocked.len(), 1);
        assert_eq!((unlocked[0].level, unlocked[0].cards), (1, 1));
    }

    #[test]
    fn every_recruit_adds_one_card() {
        let mut engine = fresh_engine();
        engine.grant(Resource::Science, 1e9);
        assert!(engine.recruit_managers(Quantity::Exact(25)));
        let cards: u32 = engine.state().managers.values().map(|m| m.cards).sum();
        assert_eq!(cards, 25);
    }

    #[test]
    fn upgrade_manager_spends_cards() {
        let mut state = GameState::new(1, 0);
        activate(&mut state, unlocked_manager("m_b1_common", 1, 5));
        let mut engine = engine_with_state(state);
        assert!(engine.upgrade_manager("m_b1_common"));
        let m = &engine.state().managers["m_b1_common"];
        assert_eq!((m.level, m.cards), (2, 1));
        assert!(!engine.upgrade_manager("m_b1_common"));
        assert!(!engine.upgrade_manager("m_b2_common"));
    }

    #[test]
    fn toggling_keeps_one_active_per_building() {
        let mut state = state_with_building("b1", 5, 0);
        activate(&mut state, unlocked_manager("m_b1_common", 1, 1));
        state
            .managers
            .insert("m_b1_rare".into(), unlocked_manager("m_b1_rare", 1, 1));
        let mut engine = engine_with_state(state);
        let before = engine.rates().food;

        assert!(engine.toggle_manager("m_b1_rare"));
        let managers = &engine.state().managers;
        assert!(managers["m_b1_rare"].is_active);
        assert!(!managers["m_b1_common"].is_active);
        assert!(engine.rates().food > before);

        assert!(!engine.toggle_manager("m_b1_epic"));
        assert!(engine.toggle_manager("m_b1_rare"));
        assert!(engine.state().active_manager("b1").is_none());
        assert_eq!(engine.rates().food, 0.0);
    }

    // -----------------------------------------------------------------------
    // Rebirth
    // -----------------------------------------------------------------------

    #[test]
    fn rebirth_grants_points_and_resets() {
        let mut state = state_with_building("b1", 40, 2);
        state.resources = ResourceMap {
            energy: 2e12,
            ..ResourceMap::ZERO
        };
        state.rebirth_upgrade_ids.push("rb_yield_1".into());
        activate(&mut state, unlocked_manager("m_b1_common", 3, 2));
        let mut engine = engine_with_state(state);
        let key = engine.session_key();

        assert_eq!(engine.points_to_earn(), 2.0);
        assert!(engine.rebirth());
        let s = engine.state();
        assert_eq!(s.rebirth_points, 2.0);
        assert_eq!(s.rebirth_count, 1);
        assert!(s.buildings.values().all(|b| b.count == 0));
        assert_eq!(s.rebirth_upgrade_ids, vec!["rb_yield_1".to_string()]);
        assert_eq!(s.managers["m_b1_common"].level, 3);
        assert_eq!(engine.resources().food, 20.0);
        assert_eq!(engine.rebirth_bonus(), 3.0);
        assert_ne!(engine.session_key(), key);
    }

    #[test]
    fn rebirth_needs_a_full_point() {
        let mut engine = fresh_engine();
        engine.grant(Resource::Energy, 4e11);
        assert!(engine.points_to_earn() < 1.0);
        assert!(!engine.rebirth());
        assert_eq!(engine.state().rebirth_count, 0);
    }

    #[test]
    fn rebirth_upgrade_bought_once() {
        let mut state = GameState::new(1, 0);
        state.rebirth_points = 7.0;
        let mut engine = engine_with_state(state);
        assert!(engine.buy_rebirth_upgrade("rb_yield_1"));
        assert_eq!(engine.state().rebirth_points, 2.0);
        assert!(!engine.buy_rebirth_upgrade("rb_yield_1"));
        assert!(!engine.buy_rebirth_upgrade("rb_unknown"));
        assert_eq!(engine.bonuses().production.global(), 1.5);
    }
}
