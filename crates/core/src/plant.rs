//! Plant family state: roots, vines and seeds plus the root's spawn budget.
//! This module exists to keep per-plant state transitions free of any world access.
//! It does not place plants or pick spawn tiles; the turn engine drives that.

use crate::config::GrowthConfig;
use crate::types::EntityId;

/// Spawn allowance shared by every member of one organism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthBudget {
    pub remaining: u32,
    pub capacity: u32,
    pub cooldown: u32,
    pub cooldown_turns: u32,
}

impl GrowthBudget {
    pub fn from_config(config: &GrowthConfig) -> Self {
        Self {
            remaining: config.budget_capacity,
            capacity: config.budget_capacity,
            cooldown: config.initial_cooldown,
            cooldown_turns: config.cooldown_turns,
        }
    }

    pub fn can_spawn_more(&self) -> bool {
        self.remaining > 0
    }

    pub fn spawned_something(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.cooldown = self.cooldown_turns;
        }
    }

    /// Called once per rest turn. Refills the allowance when the cooldown runs out.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            self.remaining = self.capacity;
        }
    }
}

/// What a seed turns into when its timer runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grown {
    Vine,
    Root,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantKind {
    Root(GrowthBudget),
    Vine,
    Seed { timer: u32, into: Grown },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plant {
    pub kind: PlantKind,
    /// Entity this plant grows toward.
    pub target: Option<EntityId>,
    pub parent: Option<EntityId>,
}

impl Plant {
    pub fn root(budget: GrowthBudget, target: Option<EntityId>) -> Self {
        Self { kind: PlantKind::Root(budget), target, parent: None }
    }

    pub fn seed(timer: u32, into: Grown, parent: EntityId, target: Option<EntityId>) -> Self {
        Self { kind: PlantKind::Seed { timer, into }, target, parent: Some(parent) }
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            PlantKind::Root(_) => "root",
            PlantKind::Vine => "vine",
            PlantKind::Seed { .. } => "seed",
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, PlantKind::Root(_))
    }

    pub fn is_seed(&self) -> bool {
        matches!(self.kind, PlantKind::Seed { .. })
    }

    /// Roots and vines spawn; seeds only wait.
    pub fn is_growth_node(&self) -> bool {
        !self.is_seed()
    }

    pub fn budget(&self) -> Option<&GrowthBudget> {
        match &self.kind {
            PlantKind::Root(budget) => Some(budget),
            PlantKind::Vine | PlantKind::Seed { .. } => None,
        }
    }

    pub fn budget_mut(&mut self) -> Option<&mut GrowthBudget> {
        match &mut self.kind {
            PlantKind::Root(budget) => Some(budget),
            PlantKind::Vine | PlantKind::Seed { .. } => None,
        }
    }

    /// Counts a seed down by one turn. Returns what it should become once the timer is spent.
    pub fn tick_seed(&mut self) -> Option<Grown> {
        let PlantKind::Seed { timer, into } = &mut self.kind else {
            return None;
        };
        *timer = timer.saturating_sub(1);
        (*timer == 0).then_some(*into)
    }

    /// Turns this plant into its grown form in place. A new root starts its own organism.
    pub fn mature(&mut self, into: Grown, config: &GrowthConfig) {
        match into {
            Grown::Vine => self.kind = PlantKind::Vine,
            Grown::Root => {
                self.kind = PlantKind::Root(GrowthBudget::from_config(config));
                self.parent = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn budget() -> GrowthBudget {
        GrowthBudget::from_config(&GrowthConfig::default())
    }

    #[test]
    fn budget_spends_then_waits_out_cooldown() {
        let mut budget = budget();
        assert!(budget.can_spawn_more());
        budget.spawned_something();
        assert!(!budget.can_spawn_more());
        assert_eq!(budget.cooldown, 3);

        budget.tick();
        budget.tick();
        assert!(!budget.can_spawn_more());
        budget.tick();
        assert!(budget.can_spawn_more());
        assert_eq!(budget.remaining, budget.capacity);
    }

    #[test]
    fn larger_capacity_spends_down_before_cooldown() {
        let config = GrowthConfig { budget_capacity: 2, ..GrowthConfig::default() };
        let mut budget = GrowthBudget::from_config(&config);
        budget.spawned_something();
        assert!(budget.can_spawn_more());
        budget.spawned_something();
        assert!(!budget.can_spawn_more());
    }

    #[test]
    fn unspent_budget_is_topped_up_by_initial_cooldown() {
        let mut budget = budget();
        for _ in 0..3 {
            budget.tick();
        }
        assert_eq!(budget.cooldown, 0);
        assert_eq!(budget.remaining, 1);
        budget.tick();
        assert_eq!(budget.cooldown, 0);
    }

    #[test]
    fn seed_matures_when_timer_runs_out() {
        let mut arena: SlotMap<EntityId, ()> = SlotMap::with_key();
        let parent = arena.insert(());
        let mut seed = Plant::seed(2, Grown::Vine, parent, None);

        assert_eq!(seed.tick_seed(), None);
        assert_eq!(seed.tick_seed(), Some(Grown::Vine));
        seed.mature(Grown::Vine, &GrowthConfig::default());
        assert_eq!(seed.type_name(), "vine");
        assert_eq!(seed.parent, Some(parent));
    }

    #[test]
    fn seed_maturing_into_root_starts_new_organism() {
        let mut arena: SlotMap<EntityId, ()> = SlotMap::with_key();
        let parent = arena.insert(());
        let mut seed = Plant::seed(1, Grown::Root, parent, None);

        let into = seed.tick_seed().expect("timer of one expires at once");
        seed.mature(into, &GrowthConfig::default());
        assert!(seed.is_root());
        assert_eq!(seed.parent, None);
        assert_eq!(seed.budget(), Some(&budget()));
    }

    #[test]
    fn only_seeds_tick() {
        let mut root = Plant::root(budget(), None);
        assert_eq!(root.tick_seed(), None);
        assert!(root.is_growth_node());
        assert!(Plant::root(budget(), None).budget().is_some());
        assert!(!Plant { kind: PlantKind::Vine, target: None, parent: None }.is_seed());
    }
}
