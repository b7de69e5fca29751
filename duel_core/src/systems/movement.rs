use std::collections::HashSet;
use std::fmt;

use hecs::World;

use crate::boundary::BoundaryPolicy;
use crate::components::{Facing, Ship};
use crate::geometry::Geometry;
use crate::input::{Key, KeyBindings};
use crate::side::SideState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn facing(self) -> Facing {
        match self {
            Direction::Up => Facing::North,
            Direction::Right => Facing::East,
            Direction::Down => Facing::South,
            Direction::Left => Facing::West,
        }
    }
}

pub type MoveFn = fn(&mut Geometry, i32);

fn move_up(g: &mut Geometry, speed: i32) {
    g.pos.y -= speed;
}

fn move_down(g: &mut Geometry, speed: i32) {
    g.pos.y += speed;
}

fn move_left(g: &mut Geometry, speed: i32) {
    g.pos.x -= speed;
}

fn move_right(g: &mut Geometry, speed: i32) {
    g.pos.x += speed;
}

/// Direction to move function, in application order
pub const MOVE_TABLE: [(Direction, MoveFn); 4] = [
    (Direction::Up, move_up),
    (Direction::Down, move_down),
    (Direction::Left, move_left),
    (Direction::Right, move_right),
];

/// A side's movement keys, resolved once at match setup
#[derive(Clone, Copy)]
pub struct MoveControls {
    bindings: [(Key, Direction, MoveFn); 4],
}

impl fmt::Debug for MoveControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.bindings.iter().map(|(key, direction, _)| (direction, key)))
            .finish()
    }
}

impl MoveControls {
    pub fn new(keys: &KeyBindings) -> Self {
        let bindings = MOVE_TABLE.map(|(direction, apply)| {
            let key = match direction {
                Direction::Up => keys.up,
                Direction::Down => keys.down,
                Direction::Left => keys.left,
                Direction::Right => keys.right,
            };
            (key, direction, apply)
        });
        Self { bindings }
    }

    pub fn key_for(&self, direction: Direction) -> Option<Key> {
        self.bindings
            .iter()
            .find(|(_, d, _)| *d == direction)
            .map(|(key, _, _)| *key)
    }

    /// Apply every held direction the policy approves. Axes are independent,
    /// so diagonals travel at full speed on both. Returns true if the ship moved.
    pub fn apply(
        &self,
        held: &HashSet<Key>,
        policy: &BoundaryPolicy,
        ship: &mut Ship,
        geometry: &mut Geometry,
    ) -> bool {
        let mut moved = false;
        for (key, direction, apply) in &self.bindings {
            if !held.contains(key) {
                continue;
            }
            let mut proposed = *geometry;
            apply(&mut proposed, ship.speed);
            if policy.allows(*direction, &proposed) {
                *geometry = proposed;
                ship.facing = direction.facing();
                moved = true;
            }
        }
        moved
    }
}

/// Move one side's ship from the held-key snapshot
pub fn move_ship(world: &mut World, side: &SideState, held: &HashSet<Key>) -> bool {
    match world.query_one_mut::<(&mut Ship, &mut Geometry)>(side.ship) {
        Ok((ship, geometry)) => side.controls.apply(held, &side.policy, ship, geometry),
        Err(_) => false,
    }
}
