//! Entity data shared by the player and the plant family.
//! Entities never store their own coordinate; the spatial index owns placement.

use serde::{Deserialize, Serialize};

use crate::plant::Plant;

/// Combat state. An entity is dead once `hearts` drops to zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hearts: i32,
    pub max_hearts: i32,
    pub damage: i32,
    pub to_hit: f64,
}

impl Vitals {
    pub fn is_dead(&self) -> bool {
        self.hearts <= 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hearts = (self.hearts - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.hearts = (self.hearts + amount).min(self.max_hearts);
    }

    pub fn gain_hearts(&mut self, amount: i32) {
        self.max_hearts += amount;
        self.hearts += amount;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub energy: i32,
    pub max_energy: i32,
    pub damage: i32,
    pub chance_to_hit: f64,
}

impl Default for Attributes {
    fn default() -> Self {
        Self { energy: 2, max_energy: 3, damage: 2, chance_to_hit: 0.66 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Player(Attributes),
    Plant(Plant),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub vitals: Vitals,
    pub kind: EntityKind,
}

impl Entity {
    /// The player's attack comes from its attributes, overriding whatever `vitals` carried.
    pub fn player(vitals: Vitals, attributes: Attributes) -> Self {
        let vitals =
            Vitals { damage: attributes.damage, to_hit: attributes.chance_to_hit, ..vitals };
        Self { vitals, kind: EntityKind::Player(attributes) }
    }

    pub fn plant(vitals: Vitals, plant: Plant) -> Self {
        Self { vitals, kind: EntityKind::Plant(plant) }
    }

    pub fn as_plant(&self) -> Option<&Plant> {
        match &self.kind {
            EntityKind::Plant(plant) => Some(plant),
            EntityKind::Player(_) => None,
        }
    }

    pub fn as_plant_mut(&mut self) -> Option<&mut Plant> {
        match &mut self.kind {
            EntityKind::Plant(plant) => Some(plant),
            EntityKind::Player(_) => None,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match &self.kind {
            EntityKind::Player(attributes) => Some(attributes),
            EntityKind::Plant(_) => None,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    /// Short label used by text front-ends and logs.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            EntityKind::Player(_) => "player",
            EntityKind::Plant(plant) => plant.type_name(),
        }
    }
}
