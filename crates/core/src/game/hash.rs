//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not decide what counts as equal runs; tests and tools compare the values.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::entity::EntityKind;
use crate::plant::PlantKind;

impl Game {
    /// Hash of everything that shapes future turns except handle values, which are an
    /// arena detail.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.rng.seed());
        hasher.write_u64(self.turn);
        hasher.write_u64(self.level as u64);
        hasher.write_u32(self.region.width() as u32);
        hasher.write_u32(self.region.height() as u32);
        for &tile in self.region.tiles() {
            hasher.write_u8(tile as u8);
        }
        for (pos, id) in self.index.iter() {
            hasher.write_i32(pos.x);
            hasher.write_i32(pos.y);
            let entity = &self.entities[id];
            hasher.write_i32(entity.vitals.hearts);
            hasher.write_i32(entity.vitals.max_hearts);
            match &entity.kind {
                EntityKind::Player(_) => hasher.write_u8(0),
                EntityKind::Plant(plant) => match plant.kind {
                    PlantKind::Root(budget) => {
                        hasher.write_u8(1);
                        hasher.write_u32(budget.remaining);
                        hasher.write_u32(budget.cooldown);
                    }
                    PlantKind::Vine => hasher.write_u8(2),
                    PlantKind::Seed { timer, into } => {
                        hasher.write_u8(3);
                        hasher.write_u32(timer);
                        hasher.write_u8(into as u8);
                    }
                },
            }
        }
        hasher.write_u64(self.log.len() as u64);
        hasher.finish()
    }
}
