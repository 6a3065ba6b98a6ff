//! Plant phase of a turn: act pass, removal commit, spawn pass, insertion commit.
//! This module exists to keep the deferred-mutation ordering in one readable sequence.
//! It does not resolve player commands.

use tracing::{debug, warn};

use super::*;
use crate::config::GrowthFocus;
use crate::entity::EntityKind;
use crate::plant::{GrowthBudget, Grown, Plant, PlantKind};

impl Game {
    /// Advances every plant by one turn.
    ///
    /// Both passes walk a snapshot of the index, so births and deaths queued during a pass
    /// only become visible once that pass has finished.
    pub fn rest_act(&mut self) {
        self.phase = TurnPhase::Resting;

        for (_, id) in self.index.snapshot() {
            self.act(id);
        }
        let removed = self.index.commit_removals();
        for &(id, pos) in &removed {
            let entity = self.entities.remove(id);
            debug!(?id, ?pos, kind = entity.as_ref().map(Entity::type_name), "removed entity");
        }
        if !removed.is_empty() {
            self.orphan_detached_plants();
        }

        for (_, id) in self.index.snapshot() {
            self.spawn(id);
        }
        let rejected = self.index.commit_adds();
        for &id in &rejected {
            warn!(?id, "birth rejected, tile was taken at commit");
            self.entities.remove(id);
        }

        self.turn += 1;
        self.phase = TurnPhase::AwaitingInput;
        debug!(turn = self.turn, removed = removed.len(), plants = self.plant_count(), "rest turn done");
    }

    fn act(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let EntityKind::Plant(plant) = &entity.kind else {
            return;
        };
        if entity.vitals.is_dead() {
            debug!(?id, kind = plant.type_name(), "plant died");
            self.emit(id, Did::Died, None);
            self.index.remove_later(id);
            return;
        }

        let kind = plant.kind;
        match kind {
            PlantKind::Seed { .. } => self.ripen(id),
            PlantKind::Root(_) => {
                if let Some(budget) = self.entities[id].as_plant_mut().and_then(Plant::budget_mut) {
                    budget.tick();
                }
                self.lash_out(id);
            }
            PlantKind::Vine => self.lash_out(id),
        }
    }

    fn ripen(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        let Some(plant) = entity.as_plant_mut() else {
            return;
        };
        let Some(into) = plant.tick_seed() else {
            return;
        };
        plant.mature(into, &self.config.growth);
        entity.vitals = match into {
            Grown::Vine => self.config.vitals.vine,
            Grown::Root => self.config.vitals.root,
        };
        debug!(?id, ?into, "seed matured");
        self.emit(id, Did::Grew, None);
    }

    /// Attacks the plant's target when it stands next to it.
    fn lash_out(&mut self, id: EntityId) {
        let entity = &self.entities[id];
        let (damage, to_hit) = (entity.vitals.damage, entity.vitals.to_hit);
        let Some(target) = entity.as_plant().and_then(|plant| plant.target) else {
            return;
        };
        if damage <= 0 || !self.entities.get(target).is_some_and(|e| e.vitals.is_alive()) {
            return;
        }
        let (Ok(from), Ok(to)) = (self.index.coord_of(id), self.index.coord_of(target)) else {
            return;
        };
        if from.chebyshev(to) <= 1 {
            self.strike(id, target, damage, to_hit);
        }
    }

    fn spawn(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let Some(plant) = entity.as_plant() else {
            return;
        };
        if !plant.is_growth_node() || entity.vitals.is_dead() {
            return;
        }
        let Some(target_pos) = plant.target.and_then(|target| self.index.coord_of(target).ok())
        else {
            return;
        };
        let target = plant.target;

        let authority = self.authority_of(id);
        self.orphan_if_detached(authority);
        let can_spawn = self.entities[authority]
            .as_plant()
            .and_then(Plant::budget)
            .is_some_and(GrowthBudget::can_spawn_more);
        if !can_spawn {
            return;
        }

        let focus = self.spawn_focus(id, authority, target_pos);
        let candidates: Vec<Pos> = focus
            .neighbors8()
            .filter(|&pos| {
                self.region.is_walkable(pos)
                    && !self.index.is_occupied(pos)
                    && !self.index.has_pending_add_at(pos)
            })
            .collect();
        let Some(&pos) = self.rng.choose(&candidates) else {
            return;
        };

        let into =
            if self.rng.chance(self.config.growth.offshoot_chance) { Grown::Root } else { Grown::Vine };
        let seed = Plant::seed(self.config.growth.seed_timer, into, id, target);
        let seed_id = self.entities.insert(Entity::plant(self.config.vitals.seed, seed));
        self.index.add_later(seed_id, pos);
        if let Some(budget) = self.entities[authority].as_plant_mut().and_then(Plant::budget_mut) {
            budget.spawned_something();
        }
        debug!(parent = ?id, seed = ?seed_id, ?pos, ?into, "seed spawned");
        self.emit(id, Did::Spawned, Some(seed_id));
    }

    /// Nearest ancestor root, or the plant holding the first broken parent link.
    fn authority_of(&self, id: EntityId) -> EntityId {
        let mut current = id;
        while let Some(plant) = self.entities.get(current).and_then(Entity::as_plant)
            && !plant.is_root()
            && let Some(parent) = plant.parent
            && self.is_live_plant(parent)
        {
            current = parent;
        }
        current
    }

    fn orphan_if_detached(&mut self, authority: EntityId) {
        let Some(plant) = self.entities.get_mut(authority).and_then(Entity::as_plant_mut) else {
            return;
        };
        if !plant.is_root() && plant.parent.is_some() {
            plant.parent = None;
            debug!(?authority, "plant orphaned");
        }
    }

    /// Clears every parent link that no longer leads to a live, indexed plant.
    fn orphan_detached_plants(&mut self) {
        let detached: Vec<EntityId> = self
            .entities
            .iter()
            .filter_map(|(id, entity)| {
                let parent = entity.as_plant()?.parent?;
                (!self.is_live_plant(parent)).then_some(id)
            })
            .collect();
        for id in detached {
            if let Some(plant) = self.entities[id].as_plant_mut() {
                plant.parent = None;
                debug!(?id, "plant orphaned");
            }
        }
    }

    fn is_live_plant(&self, id: EntityId) -> bool {
        self.index.contains(id)
            && self.entities.get(id).is_some_and(|e| e.as_plant().is_some() && e.vitals.is_alive())
    }

    fn spawn_focus(&self, node: EntityId, authority: EntityId, target_pos: Pos) -> Pos {
        let node_pos = self.index.coord_of(node).expect("spawning plant is indexed");
        let range = self.config.growth.target_range;
        match self.config.growth.focus {
            GrowthFocus::NearestMember => {
                let nearest = self
                    .index
                    .iter()
                    .filter(|&(_, id)| self.is_live_plant(id) && self.authority_of(id) == authority)
                    .map(|(pos, _)| pos)
                    .min_by(|a, b| a.distance(target_pos).total_cmp(&b.distance(target_pos)));
                match nearest {
                    Some(pos) if pos.distance(target_pos) < range => pos,
                    _ => node_pos,
                }
            }
            GrowthFocus::Target if node_pos.distance(target_pos) < range => target_pos,
            GrowthFocus::Target => node_pos,
        }
    }
}
