use crate::side::Side;

/// Fixed set of entity kinds; every entity also carries a `Geometry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Spaceship,
    Projectile,
    HealthBar,
    StaticObstacle,
}

/// Cosmetic orientation of a ship, following its last movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn degrees(self) -> u16 {
        match self {
            Facing::North => 0,
            Facing::East => 90,
            Facing::South => 180,
            Facing::West => 270,
        }
    }
}

/// Spaceship component (movable)
#[derive(Debug, Clone, Copy)]
pub struct Ship {
    pub side: Side,
    pub speed: i32, // units per frame
    pub facing: Facing,
}

impl Ship {
    pub fn new(side: Side, speed: i32) -> Self {
        Self {
            side,
            speed,
            facing: side.initial_facing(),
        }
    }
}

/// Health component (damageable). Only ever decreases, never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Health already partly spent; `current` is clamped to `max`
    #[cfg(any(test, feature = "test-util"))]
    pub fn at(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Apply one point of damage, returns health left
    pub fn take_hit(&mut self) -> u32 {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Projectile component
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub owner: Side,
    pub velocity: i32, // signed x delta per frame
}

/// Health bar component, mirrors the ship's health
#[derive(Debug, Clone, Copy)]
pub struct HealthBar {
    pub side: Side,
    pub value: u32,
    pub unit_width: i32,
}

impl HealthBar {
    pub fn fill_width(&self) -> i32 {
        self.value as i32 * self.unit_width
    }
}

/// Marker for the centre barrier
#[derive(Debug, Clone, Copy, Default)]
pub struct Obstacle;
