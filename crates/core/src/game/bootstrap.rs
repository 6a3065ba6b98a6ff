//! World construction, level resets and direct placement helpers.
//! This module exists to isolate setup details from the per-turn simulation flow.
//! It does not own turn sequencing once a level is running.

use tracing::{info, warn};

use super::*;
use crate::error::ConfigError;
use crate::plant::{GrowthBudget, Plant};

impl Game {
    /// Validates `config` and builds the first level.
    pub fn new(seed: u64, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self {
            config,
            rng: GameRng::new(seed),
            region: Region::new(),
            index: SpatialIndex::new(),
            entities: SlotMap::with_key(),
            player_id: EntityId::default(),
            level: 0,
            turn: 0,
            phase: TurnPhase::AwaitingInput,
            log: Vec::new(),
            listener: None,
        };
        game.reset();
        Ok(game)
    }

    /// Regenerates the region and repopulates it for the current level.
    ///
    /// The RNG stream is not reseeded, so consecutive resets produce different caves.
    pub fn reset(&mut self) {
        let (width, height) = (self.config.region.width, self.config.region.height);
        self.region.generate(width, height, &self.config.region, &mut self.rng);
        self.index.clear();
        self.entities.clear();
        self.log.clear();
        self.turn = 0;
        self.phase = TurnPhase::AwaitingInput;

        let player = Entity::player(self.config.vitals.player, self.config.player_attributes);
        self.player_id = self.entities.insert(player);
        let start = self
            .region
            .random_empty_tile(&mut self.rng)
            .expect("generated region always has an open tile");
        self.index.add(self.player_id, start).expect("index was just cleared");

        let wanted = self.config.level_settings(self.level).number_of_roots;
        let placed = (0..wanted).filter(|_| self.place_random_root().is_some()).count();
        if placed < wanted {
            warn!(placed, wanted, "ran out of placement attempts for roots");
        }
        info!(
            seed = self.rng.seed(),
            level = self.level,
            roots = placed,
            open = self.region.open_tiles().len(),
            "world reset"
        );
    }

    /// Moves to the next configured level, staying on the last one, and resets.
    pub fn advance_level(&mut self) {
        self.level = (self.level + 1).min(self.config.levels.len() - 1);
        self.reset();
    }

    /// Puts a fresh root on `pos`, growing toward the player.
    /// Returns `None` when the tile is not walkable or already taken.
    pub fn place_root(&mut self, pos: Pos) -> Option<EntityId> {
        if !self.region.is_walkable(pos) || self.index.is_occupied(pos) {
            return None;
        }
        let plant = Plant::root(GrowthBudget::from_config(&self.config.growth), Some(self.player_id));
        let id = self.entities.insert(Entity::plant(self.config.vitals.root, plant));
        self.index.add(id, pos).expect("tile was checked free");
        Some(id)
    }

    /// Relocates the player without spending a turn. Returns whether it moved.
    pub fn teleport_player(&mut self, pos: Pos) -> bool {
        if !self.region.is_walkable(pos) {
            return false;
        }
        self.index.move_to(self.player_id, pos).is_ok()
    }

    fn place_random_root(&mut self) -> Option<EntityId> {
        for _ in 0..self.config.max_placement_attempts {
            let pos = self.region.random_empty_tile(&mut self.rng)?;
            if let Some(id) = self.place_root(pos) {
                return Some(id);
            }
        }
        None
    }
}
