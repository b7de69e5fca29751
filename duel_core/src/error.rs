use std::fmt;

use crate::input::Key;
use crate::side::Side;

/// Setup-time configuration errors. Steady-state play never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Side label is neither of the two expected labels
    UnknownSide(String),
    UnknownKey(String),
    DuplicateSide(Side),
    MissingSide(Side),
    NonPositive { field: &'static str },
    OutOfRange { field: &'static str, max: i32 },
    ZeroProjectileCap,
    /// The barrier leaves no room for a ship on one of the halves
    ArenaTooNarrow,
    SpawnOutsideArea { side: Side },
    DuplicateBinding { key: Key },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownSide(label) => {
                write!(f, "unknown side label {label:?} (expected \"yellow\" or \"red\")")
            }
            ConfigError::UnknownKey(name) => write!(f, "unknown key name {name:?}"),
            ConfigError::DuplicateSide(side) => write!(f, "side {side} is configured twice"),
            ConfigError::MissingSide(side) => write!(f, "side {side} is not configured"),
            ConfigError::NonPositive { field } => write!(f, "{field} must be greater than zero"),
            ConfigError::OutOfRange { field, max } => write!(f, "{field} must be at most {max}"),
            ConfigError::ZeroProjectileCap => write!(f, "projectile_cap must be at least 1"),
            ConfigError::ArenaTooNarrow => {
                write!(f, "arena leaves no room for a ship on one side of the barrier")
            }
            ConfigError::SpawnOutsideArea { side } => {
                write!(f, "spawn point for {side} puts the ship outside its half of the arena")
            }
            ConfigError::DuplicateBinding { key } => write!(f, "key {key} is bound more than once"),
        }
    }
}

impl std::error::Error for ConfigError {}
