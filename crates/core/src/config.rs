//! Tunable simulation parameters with defaults taken from the shipped game balance.
//! This module exists so thresholds (ranges, budgets, timers, vitals) are data, not code.
//! It does not read files; binaries deserialize these types from whatever source they like.

use serde::{Deserialize, Serialize};

use crate::entity::{Attributes, Vitals};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub region: RegionConfig,
    pub growth: GrowthConfig,
    pub vitals: VitalsConfig,
    pub player_attributes: Attributes,
    pub levels: Vec<LevelSettings>,
    /// Upper bound on random draws when placing the player and roots.
    pub max_placement_attempts: u32,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let region = &self.region;
        if region.width < 3 || region.height < 3 {
            return Err(ConfigError::RegionTooSmall { width: region.width, height: region.height });
        }
        check_probability("region.toward_target_chance", region.toward_target_chance)?;
        check_probability("region.target_open_fraction", region.target_open_fraction)?;
        check_probability("region.moss_chance", region.moss_chance)?;
        check_probability("growth.offshoot_chance", self.growth.offshoot_chance)?;
        let range = self.growth.target_range;
        if range.is_nan() || range <= 0.0 {
            return Err(ConfigError::NotPositive { field: "growth.target_range" });
        }
        if self.growth.budget_capacity == 0 {
            return Err(ConfigError::NotPositive { field: "growth.budget_capacity" });
        }
        for (field, vitals) in [
            ("vitals.root.to_hit", &self.vitals.root),
            ("vitals.vine.to_hit", &self.vitals.vine),
            ("vitals.seed.to_hit", &self.vitals.seed),
        ] {
            check_probability(field, vitals.to_hit)?;
        }
        check_probability("player_attributes.chance_to_hit", self.player_attributes.chance_to_hit)?;
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::NotPositive { field: "max_placement_attempts" });
        }
        Ok(())
    }

    pub fn level_settings(&self, level: usize) -> LevelSettings {
        let last = self.levels.len().saturating_sub(1);
        self.levels.get(level.min(last)).copied().unwrap_or_default()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            region: RegionConfig::default(),
            growth: GrowthConfig::default(),
            vitals: VitalsConfig::default(),
            player_attributes: Attributes::default(),
            levels: vec![LevelSettings::default()],
            max_placement_attempts: 256,
        }
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) { Ok(()) } else { Err(ConfigError::Probability { field, value }) }
}

/// Carving shape stamped at each step of a walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brush {
    Single,
    #[default]
    Plus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub width: usize,
    pub height: usize,
    /// Number of walks; `None` means `min(width, height)`.
    pub carve_passes: Option<usize>,
    pub toward_target_chance: f64,
    pub brush: Brush,
    /// Keep carving past the base passes until this share of tiles is open.
    pub target_open_fraction: f64,
    pub max_extra_passes: usize,
    /// Steps before a walker stops wandering and heads straight for its target.
    /// `None` means `4 * width * height`.
    pub max_walk_steps: Option<usize>,
    pub moss_chance: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            carve_passes: None,
            toward_target_chance: 0.9,
            brush: Brush::Plus,
            target_open_fraction: 0.0,
            max_extra_passes: 64,
            max_walk_steps: None,
            moss_chance: 0.1,
        }
    }
}

/// Where a growth node looks for room to put its next seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthFocus {
    /// Around the organism member closest to the target, when it is in range.
    #[default]
    NearestMember,
    /// Around the target itself, when the node is in range.
    Target,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    pub target_range: f64,
    pub budget_capacity: u32,
    pub cooldown_turns: u32,
    pub initial_cooldown: u32,
    pub seed_timer: u32,
    /// Chance that a new seed matures into an independent root instead of a vine.
    pub offshoot_chance: f64,
    pub focus: GrowthFocus,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            target_range: 6.0,
            budget_capacity: 1,
            cooldown_turns: 3,
            initial_cooldown: 3,
            seed_timer: 3,
            offshoot_chance: 0.0,
            focus: GrowthFocus::NearestMember,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Hearts only; the player's damage and hit chance come from `player_attributes`.
    pub player: Vitals,
    pub root: Vitals,
    pub vine: Vitals,
    pub seed: Vitals,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            player: Vitals { hearts: 2, max_hearts: 3, damage: 2, to_hit: 0.66 },
            root: Vitals { hearts: 3, max_hearts: 3, damage: 1, to_hit: 0.5 },
            vine: Vitals { hearts: 3, max_hearts: 3, damage: 0, to_hit: 0.0 },
            seed: Vitals { hearts: 1, max_hearts: 1, damage: 0, to_hit: 0.0 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub number_of_roots: usize,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self { number_of_roots: 1 }
    }
}
