//! Drunkard's-walk carving primitives used by region generation.

use crate::config::{Brush, RegionConfig};
use crate::rng::GameRng;
use crate::types::{Pos, TileKind};

pub(super) struct CarveContext<'a> {
    pub(super) tiles: &'a mut [TileKind],
    pub(super) open: &'a mut Vec<Pos>,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) config: &'a RegionConfig,
    pub(super) max_walk_steps: usize,
}

impl CarveContext<'_> {
    fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    fn is_open(&self, pos: Pos) -> bool {
        self.tiles[self.index(pos)].is_walkable()
    }

    /// Opens `pos` immediately. Used for the initial seed cell only.
    pub(super) fn open_cell(&mut self, pos: Pos) {
        let idx = self.index(pos);
        if !self.tiles[idx].is_walkable() {
            self.tiles[idx] = TileKind::Floor;
            self.open.push(pos);
        }
    }

    /// One walk from a random cell toward a random open cell. Returns how many tiles opened.
    pub(super) fn carve_pass(&mut self, rng: &mut GameRng) -> usize {
        let start = Pos::new(
            rng.range(0, self.width as i64 - 1) as i32,
            rng.range(0, self.height as i64 - 1) as i32,
        );
        let Some(&target) = rng.choose(self.open.as_slice()) else {
            return 0;
        };
        self.walk(rng, start, target)
    }

    fn walk(&mut self, rng: &mut GameRng, start: Pos, target: Pos) -> usize {
        let mut marks = Vec::new();
        let mut pos = start;
        let mut steps = 0_usize;

        while !self.is_open(pos) {
            self.stamp(pos, &mut marks);
            let wander = steps < self.max_walk_steps;
            pos = if !wander || rng.chance(self.config.toward_target_chance) {
                step_toward(rng, pos, target)
            } else {
                self.random_step(rng, pos)
            };
            steps += 1;
        }

        // Marks land only after the walk so its own trail cannot end it early.
        self.flush(marks)
    }

    fn stamp(&self, pos: Pos, marks: &mut Vec<Pos>) {
        marks.push(pos);
        if self.config.brush == Brush::Plus {
            marks.extend(pos.neighbors4().into_iter().filter(|&p| self.in_bounds(p)));
        }
    }

    fn flush(&mut self, marks: Vec<Pos>) -> usize {
        let mut opened = 0;
        for pos in marks {
            let idx = self.index(pos);
            if !self.tiles[idx].is_walkable() {
                self.tiles[idx] = TileKind::Floor;
                self.open.push(pos);
                opened += 1;
            }
        }
        opened
    }

    fn random_step(&self, rng: &mut GameRng, pos: Pos) -> Pos {
        let options: Vec<Pos> =
            pos.neighbors4().into_iter().filter(|&p| self.in_bounds(p)).collect();
        rng.choose(&options).copied().unwrap_or(pos)
    }
}

/// One cardinal step that closes the gap to `target`, picking the axis in proportion to
/// the remaining distance along it.
fn step_toward(rng: &mut GameRng, pos: Pos, target: Pos) -> Pos {
    let gap_x = target.x - pos.x;
    let gap_y = target.y - pos.y;
    let span = (gap_x.unsigned_abs() + gap_y.unsigned_abs()) as usize;
    if span == 0 {
        return pos;
    }
    if rng.index(span) < gap_x.unsigned_abs() as usize {
        pos.offset(gap_x.signum(), 0)
    } else {
        pos.offset(0, gap_y.signum())
    }
}
