use std::fmt;
use std::str::FromStr;

use hecs::Entity;

use crate::boundary::BoundaryPolicy;
use crate::components::Facing;
use crate::error::ConfigError;
use crate::input::{FireTrigger, Key};
use crate::systems::movement::MoveControls;

/// One of the two symmetric players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Yellow, // left half, shoots right
    Red,    // right half, shoots left
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Yellow, Side::Red];

    pub fn index(self) -> usize {
        match self {
            Side::Yellow => 0,
            Side::Red => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Yellow => Side::Red,
            Side::Red => Side::Yellow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Yellow => "yellow",
            Side::Red => "red",
        }
    }

    /// Sign of projectile travel along x
    pub fn shot_direction(self) -> i32 {
        match self {
            Side::Yellow => 1,
            Side::Red => -1,
        }
    }

    pub fn initial_facing(self) -> Facing {
        match self {
            Side::Yellow => Facing::East,
            Side::Red => Facing::West,
        }
    }

    /// Banner text for the terminal state
    pub fn win_banner(self) -> &'static str {
        match self {
            Side::Yellow => "Yellow wins!",
            Side::Red => "Red wins!",
        }
    }
}

impl FromStr for Side {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("yellow") {
            Ok(Side::Yellow)
        } else if s.eq_ignore_ascii_case("red") {
            Ok(Side::Red)
        } else {
            Err(ConfigError::UnknownSide(s.to_string()))
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything one side owns during a match
///
/// The projectile list is only ever touched by this side's own spawn and
/// advance calls.
#[derive(Debug, Clone)]
pub struct SideState {
    pub side: Side,
    pub ship: Entity,
    pub health_bar: Entity,
    pub projectiles: Vec<Entity>,
    pub policy: BoundaryPolicy,
    pub controls: MoveControls,
    pub fire_key: Key,
    pub trigger: FireTrigger,
}

impl SideState {
    pub fn live_projectiles(&self) -> usize {
        self.projectiles.len()
    }
}
