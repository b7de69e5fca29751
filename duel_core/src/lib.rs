pub mod boundary;
pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod params;
pub mod render;
pub mod resources;
pub mod side;
pub mod systems;

pub use boundary::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use geometry::*;
pub use input::*;
pub use params::*;
pub use render::*;
pub use resources::*;
pub use side::*;
pub use systems::{
    move_ship, sync_health_bars, Direction, MoveControls, MoveFn, ProjectileManager, MOVE_TABLE,
};

use hecs::{Entity, World};

/// Helper to create a spaceship entity at its side's spawn point
pub fn create_ship(world: &mut World, layout: &SideLayout, config: &Config) -> Entity {
    world.spawn((
        layout.spawn,
        EntityKind::Spaceship,
        Ship::new(layout.side, config.ship_speed),
        Health::new(config.initial_health),
    ))
}

/// Helper to create a health bar mirroring a full-health ship
pub fn create_health_bar(world: &mut World, layout: &SideLayout, config: &Config) -> Entity {
    world.spawn((
        layout.health_bar,
        EntityKind::HealthBar,
        HealthBar {
            side: layout.side,
            value: config.initial_health,
            unit_width: config.health_bar_unit,
        },
    ))
}

/// Helper to create the centre barrier
pub fn create_barrier(world: &mut World, geometry: Geometry) -> Entity {
    world.spawn((geometry, EntityKind::StaticObstacle, Obstacle))
}
