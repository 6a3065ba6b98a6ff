use thiserror::Error;

use crate::types::Pos;

/// Structural failures of the spatial index. Both indicate broken call discipline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("entity is not present in the spatial index")]
    NotFound,
    #[error("coordinate ({}, {}) is already occupied", .pos.x, .pos.y)]
    Occupied { pos: Pos },
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("region must be at least 3x3, got {width}x{height}")]
    RegionTooSmall { width: usize, height: usize },
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("at least one level must be configured")]
    NoLevels,
}
