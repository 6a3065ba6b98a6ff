pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod index;
pub mod plant;
pub mod region;
pub mod rng;
pub mod types;

pub use config::SimConfig;
pub use entity::{Attributes, Entity, EntityKind, Vitals};
pub use error::{ConfigError, IndexError};
pub use game::Game;
pub use index::SpatialIndex;
pub use plant::{GrowthBudget, Grown, Plant, PlantKind};
pub use region::Region;
pub use rng::GameRng;
pub use types::*;
