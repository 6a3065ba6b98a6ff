//! Read-only views handed to front-ends between commands.

use super::*;
use crate::error::IndexError;
use crate::plant::Plant;

impl Game {
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn index(&self) -> &SpatialIndex<EntityId> {
        &self.index
    }

    pub fn entity_at(&self, pos: Pos) -> Option<EntityId> {
        self.index.entity_at(pos)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn coord_of(&self, id: EntityId) -> Result<Pos, IndexError> {
        self.index.coord_of(id)
    }

    pub fn player(&self) -> &Entity {
        &self.entities[self.player_id]
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player_coord(&self) -> Pos {
        self.index.coord_of(self.player_id).expect("player stays indexed for the whole level")
    }

    /// Indexed plants in row-major order. Seeds still waiting for their commit are skipped.
    pub fn plants(&self) -> impl Iterator<Item = (EntityId, Pos, &Plant)> + '_ {
        self.index
            .iter()
            .filter_map(|(pos, id)| self.entities.get(id)?.as_plant().map(|plant| (id, pos, plant)))
    }

    pub fn plant_count(&self) -> usize {
        self.plants().count()
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// The level is over once the player has died.
    pub fn is_over(&self) -> bool {
        self.player().vitals.is_dead()
    }

    pub fn log(&self) -> &[DidEvent] {
        &self.log
    }
}
