/// Game tuning parameters for the duel
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena
    pub const ARENA_WIDTH: i32 = 900;
    pub const ARENA_HEIGHT: i32 = 500;
    pub const BARRIER_WIDTH: i32 = 10;
    pub const MAX_ARENA_SIZE: i32 = 100_000; // either side

    // Spaceship
    pub const SHIP_WIDTH: i32 = 55;
    pub const SHIP_HEIGHT: i32 = 40;
    pub const SHIP_SPEED: i32 = 5; // units per frame
    pub const INITIAL_HEALTH: u32 = 10;

    // Projectile
    pub const PROJECTILE_WIDTH: i32 = 10;
    pub const PROJECTILE_HEIGHT: i32 = 5;
    pub const PROJECTILE_SPEED: i32 = 7; // units per frame
    pub const PROJECTILE_CAP: usize = 3; // live projectiles per side

    // Health bar
    pub const HEALTH_BAR_UNIT: i32 = 10; // width per point of health
    pub const HEALTH_BAR_HEIGHT: i32 = 8;
    pub const HEALTH_BAR_MARGIN: i32 = 10;

    // Spawn points (top-left corner of the ship)
    pub const YELLOW_SPAWN: (i32, i32) = (100, 300);
    pub const RED_SPAWN: (i32, i32) = (700, 300);

    // Frame pacing
    pub const FPS: u32 = 60;
}
