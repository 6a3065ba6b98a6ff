//! Cave region grid and its drunkard's-walk generator.
//! This module exists to own terrain and the guarantee that all open ground is connected.
//! It does not know about entities; occupancy lives in the spatial index.

mod carve;

use std::collections::VecDeque;

use tracing::info;

use crate::config::RegionConfig;
use crate::rng::GameRng;
use crate::types::{Pos, TileKind};

use carve::CarveContext;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    /// Walkable tiles in row-major order, kept for uniform sampling.
    open: Vec<Pos>,
}

impl Region {
    /// An empty, ungenerated region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a prebuilt grid. `tiles` is row-major and must hold `width * height` cells.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileKind>) -> Self {
        assert_eq!(tiles.len(), width * height, "tile grid does not match its dimensions");
        let mut region = Self { width, height, tiles, open: Vec::new() };
        region.rebuild_open();
        region
    }

    /// Replaces the whole grid with a freshly carved cave.
    ///
    /// Every cell starts as rock and the center cell is opened. Each carving pass then
    /// walks from a random cell toward a random open cell, biased by
    /// `toward_target_chance`, until it steps onto open ground. The walk's trail is
    /// opened when it ends, so every pass stays attached to the area it reached.
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        config: &RegionConfig,
        rng: &mut GameRng,
    ) {
        self.width = width;
        self.height = height;
        self.tiles = vec![TileKind::Rock; width * height];
        self.open.clear();

        let passes = config.carve_passes.unwrap_or(width.min(height));
        let mut context = CarveContext {
            tiles: &mut self.tiles,
            open: &mut self.open,
            width,
            height,
            config,
            max_walk_steps: config.max_walk_steps.unwrap_or(4 * width * height),
        };
        context.open_cell(Pos::new((width / 2) as i32, (height / 2) as i32));
        for _ in 0..passes {
            context.carve_pass(rng);
        }

        let wanted = (config.target_open_fraction * (width * height) as f64).ceil() as usize;
        let mut extra = 0;
        while context.open.len() < wanted && extra < config.max_extra_passes {
            context.carve_pass(rng);
            extra += 1;
        }

        if config.moss_chance > 0.0 {
            for tile in self.tiles.iter_mut().filter(|tile| **tile == TileKind::Floor) {
                if rng.chance(config.moss_chance) {
                    *tile = TileKind::Moss;
                }
            }
        }

        self.rebuild_open();
        info!(width, height, open = self.open.len(), extra_passes = extra, "generated region");
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_generated(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn center(&self) -> Pos {
        Pos::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds coordinates read as rock.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Rock;
        }
        self.tiles[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_walkable()
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn open_tiles(&self) -> &[Pos] {
        &self.open
    }

    pub fn open_fraction(&self) -> f64 {
        if self.tiles.is_empty() {
            return 0.0;
        }
        self.open.len() as f64 / self.tiles.len() as f64
    }

    /// Uniformly sampled walkable tile, or `None` before generation.
    pub fn random_empty_tile(&self, rng: &mut GameRng) -> Option<Pos> {
        rng.choose(&self.open).copied()
    }

    /// Number of walkable tiles 4-connected to `start`, counting `start` itself.
    pub fn reachable_from(&self, start: Pos) -> usize {
        if !self.is_walkable(start) {
            return 0;
        }
        let mut seen = vec![false; self.tiles.len()];
        let mut queue = VecDeque::from([start]);
        seen[(start.y as usize) * self.width + (start.x as usize)] = true;
        let mut count = 0;
        while let Some(pos) = queue.pop_front() {
            count += 1;
            for next in pos.neighbors4() {
                if !self.is_walkable(next) {
                    continue;
                }
                let idx = (next.y as usize) * self.width + (next.x as usize);
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// `#` rock, `.` floor, `,` moss, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|tile| tile.glyph()));
            out.push('\n');
        }
        out
    }

    fn rebuild_open(&mut self) {
        self.open = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Pos::new(x as i32, y as i32)))
            .filter(|&pos| self.tile_at(pos).is_walkable())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Brush;

    fn generated(seed: u64, width: usize, height: usize, config: &RegionConfig) -> Region {
        let mut region = Region::new();
        region.generate(width, height, config, &mut GameRng::new(seed));
        region
    }

    #[test]
    fn fresh_region_has_no_open_tiles() {
        let region = Region::new();
        assert!(!region.is_generated());
        assert_eq!(region.random_empty_tile(&mut GameRng::new(1)), None);
        assert_eq!(region.tile_at(Pos::new(0, 0)), TileKind::Rock);
    }

    #[test]
    fn center_is_always_open() {
        for seed in 0..20 {
            let region = generated(seed, 20, 20, &RegionConfig::default());
            assert!(region.is_walkable(region.center()), "seed {seed}");
        }
    }

    #[test]
    fn open_ground_is_one_component() {
        for seed in [1_u64, 7, 42, 1_000, 65_535] {
            for brush in [Brush::Single, Brush::Plus] {
                let config = RegionConfig { brush, ..RegionConfig::default() };
                let region = generated(seed, 24, 16, &config);
                assert_eq!(
                    region.reachable_from(region.center()),
                    region.open_tiles().len(),
                    "seed {seed} brush {brush:?} left detached open tiles"
                );
            }
        }
    }

    #[test]
    fn same_seed_generates_same_grid() {
        let config = RegionConfig::default();
        assert_eq!(generated(99, 30, 20, &config), generated(99, 30, 20, &config));
        assert_ne!(generated(99, 30, 20, &config).tiles(), generated(98, 30, 20, &config).tiles());
    }

    #[test]
    fn regenerating_replaces_previous_grid() {
        let mut rng = GameRng::new(5);
        let mut region = Region::new();
        region.generate(40, 40, &RegionConfig::default(), &mut rng);
        region.generate(10, 8, &RegionConfig::default(), &mut rng);
        assert_eq!(region.tiles().len(), 80);
        assert!(region.open_tiles().iter().all(|&p| region.in_bounds(p)));
    }

    #[test]
    fn target_fraction_triggers_extra_passes() {
        let sparse = RegionConfig { carve_passes: Some(0), moss_chance: 0.0, ..RegionConfig::default() };
        let region = generated(3, 20, 20, &sparse);
        assert_eq!(region.open_tiles().len(), 1);

        let dense = RegionConfig { target_open_fraction: 0.3, max_extra_passes: 10_000, ..sparse };
        let region = generated(3, 20, 20, &dense);
        assert!(region.open_fraction() >= 0.3);
    }

    #[test]
    fn moss_only_replaces_floor() {
        let config = RegionConfig { moss_chance: 1.0, ..RegionConfig::default() };
        let region = generated(8, 16, 16, &config);
        assert!(region.tiles().iter().all(|&t| t != TileKind::Floor));
        assert!(region.tiles().contains(&TileKind::Moss));
        assert_eq!(region.reachable_from(region.center()), region.open_tiles().len());
    }

    #[test]
    fn random_empty_tile_is_walkable_and_in_bounds() {
        let region = generated(17, 20, 20, &RegionConfig::default());
        let mut rng = GameRng::new(2);
        for _ in 0..200 {
            let pos = region.random_empty_tile(&mut rng).expect("generated region has open tiles");
            assert!(region.in_bounds(pos));
            assert!(region.is_walkable(pos));
        }
    }

    #[test]
    fn ascii_dump_has_one_line_per_row() {
        let region = Region::from_tiles(
            3,
            2,
            vec![
                TileKind::Rock,
                TileKind::Floor,
                TileKind::Moss,
                TileKind::Floor,
                TileKind::Rock,
                TileKind::Rock,
            ],
        );
        assert_eq!(region.to_ascii(), "#.,\n.##\n");
        assert_eq!(region.open_tiles(), &[Pos::new(1, 0), Pos::new(2, 0), Pos::new(0, 1)]);
    }
}
