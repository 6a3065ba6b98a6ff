//! Text views of a running game: the overlaid ASCII map and the run summary.
//! This module exists so headless binaries print the same picture a renderer would draw.
//! It does not mutate the game.

use bilebio_core::{Entity, EntityKind, Game, PlantKind};
use serde::Serialize;

use crate::format_snapshot_hash;

pub fn entity_glyph(entity: &Entity) -> char {
    match &entity.kind {
        EntityKind::Player(_) => '@',
        EntityKind::Plant(plant) => match plant.kind {
            PlantKind::Root(_) => 'R',
            PlantKind::Vine => 'v',
            PlantKind::Seed { .. } => 's',
        },
    }
}

/// The region's ASCII dump with every indexed entity drawn over its tile.
pub fn render_map(game: &Game) -> String {
    let region = game.region();
    let width = region.width();
    let mut cells: Vec<char> = region.tiles().iter().map(|tile| tile.glyph()).collect();
    for (pos, id) in game.index().iter() {
        if let Some(entity) = game.entity(id) {
            cells[(pos.y as usize) * width + (pos.x as usize)] = entity_glyph(entity);
        }
    }

    let mut out = String::with_capacity((width + 1) * region.height());
    for row in cells.chunks(width.max(1)) {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub level: usize,
    pub turns: u64,
    pub roots: usize,
    pub vines: usize,
    pub seeds: usize,
    pub player_hearts: i32,
    pub player_max_hearts: i32,
    pub player_x: i32,
    pub player_y: i32,
    pub player_dead: bool,
    pub events: usize,
    pub snapshot_hash_hex: String,
}

impl RunSummary {
    pub fn capture(game: &Game) -> Self {
        let (mut roots, mut vines, mut seeds) = (0, 0, 0);
        for (_, _, plant) in game.plants() {
            match plant.kind {
                PlantKind::Root(_) => roots += 1,
                PlantKind::Vine => vines += 1,
                PlantKind::Seed { .. } => seeds += 1,
            }
        }
        let player = game.player();
        let coord = game.player_coord();
        Self {
            seed: game.seed(),
            level: game.level(),
            turns: game.turn(),
            roots,
            vines,
            seeds,
            player_hearts: player.vitals.hearts,
            player_max_hearts: player.vitals.max_hearts,
            player_x: coord.x,
            player_y: coord.y,
            player_dead: game.is_over(),
            events: game.log().len(),
            snapshot_hash_hex: format_snapshot_hash(game.snapshot_hash()),
        }
    }

    pub fn to_text(&self) -> String {
        format!(
            "seed {} level {} turn {}\nplants: {} root, {} vine, {} seed\nplayer: {}/{} hearts at ({}, {}){}\nevents: {}\nsnapshot: {}\n",
            self.seed,
            self.level,
            self.turns,
            self.roots,
            self.vines,
            self.seeds,
            self.player_hearts,
            self.player_max_hearts,
            self.player_x,
            self.player_y,
            if self.player_dead { " (dead)" } else { "" },
            self.events,
            self.snapshot_hash_hex,
        )
    }
}
