use std::collections::HashSet;

use serde::Deserialize;

use crate::boundary::BoundaryPolicy;
use crate::error::ConfigError;
use crate::geometry::Geometry;
use crate::input::KeyBindings;
use crate::params::Params;
use crate::side::Side;

/// Per-side setup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SideConfig {
    pub label: String,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub keys: KeyBindings,
}

impl SideConfig {
    pub fn yellow() -> Self {
        Self {
            label: Side::Yellow.label().to_string(),
            spawn_x: Params::YELLOW_SPAWN.0,
            spawn_y: Params::YELLOW_SPAWN.1,
            keys: KeyBindings::yellow(),
        }
    }

    pub fn red() -> Self {
        Self {
            label: Side::Red.label().to_string(),
            spawn_x: Params::RED_SPAWN.0,
            spawn_y: Params::RED_SPAWN.1,
            keys: KeyBindings::red(),
        }
    }
}

/// Game configuration, built once at match setup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena_width: i32,
    pub arena_height: i32,
    pub barrier_width: i32,
    pub ship_width: i32,
    pub ship_height: i32,
    pub ship_speed: i32,
    pub initial_health: u32,
    pub projectile_cap: usize,
    pub projectile_speed: i32,
    pub projectile_width: i32,
    pub projectile_height: i32,
    pub health_bar_unit: i32,
    pub health_bar_height: i32,
    pub sides: Vec<SideConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            barrier_width: Params::BARRIER_WIDTH,
            ship_width: Params::SHIP_WIDTH,
            ship_height: Params::SHIP_HEIGHT,
            ship_speed: Params::SHIP_SPEED,
            initial_health: Params::INITIAL_HEALTH,
            projectile_cap: Params::PROJECTILE_CAP,
            projectile_speed: Params::PROJECTILE_SPEED,
            projectile_width: Params::PROJECTILE_WIDTH,
            projectile_height: Params::PROJECTILE_HEIGHT,
            health_bar_unit: Params::HEALTH_BAR_UNIT,
            health_bar_height: Params::HEALTH_BAR_HEIGHT,
            sides: vec![SideConfig::yellow(), SideConfig::red()],
        }
    }
}

/// Resolved placement for one side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideLayout {
    pub side: Side,
    pub spawn: Geometry,
    pub policy: BoundaryPolicy,
    pub keys: KeyBindings,
    pub health_bar: Geometry,
}

/// Validated arena layout, indexed by `Side::index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub arena: Geometry,
    pub barrier: Geometry,
    pub sides: [SideLayout; 2],
}

impl Layout {
    pub fn side(&self, side: Side) -> &SideLayout {
        &self.sides[side.index()]
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> Geometry {
        Geometry::new(0, 0, self.arena_width, self.arena_height)
    }

    /// Centre barrier, full arena height
    pub fn barrier(&self) -> Geometry {
        Geometry::new(
            self.arena_width / 2 - self.barrier_width / 2,
            0,
            self.barrier_width,
            self.arena_height,
        )
    }

    /// Validate the configuration and derive the arena layout
    pub fn resolve(&self) -> Result<Layout, ConfigError> {
        self.check_positive()?;
        self.check_ranges()?;
        if self.projectile_cap == 0 {
            return Err(ConfigError::ZeroProjectileCap);
        }

        let arena = self.arena();
        let barrier = self.barrier();
        if barrier.left() - arena.left() < self.ship_width
            || arena.right() - barrier.right() < self.ship_width
            || arena.height() < self.ship_height
        {
            return Err(ConfigError::ArenaTooNarrow);
        }

        let mut resolved: [Option<SideLayout>; 2] = [None, None];
        for side_config in &self.sides {
            let side: Side = side_config.label.parse()?;
            if resolved[side.index()].is_some() {
                return Err(ConfigError::DuplicateSide(side));
            }
            resolved[side.index()] = Some(self.side_layout(side, side_config, &arena, &barrier)?);
        }

        let [yellow, red] = resolved;
        let yellow = yellow.ok_or(ConfigError::MissingSide(Side::Yellow))?;
        let red = red.ok_or(ConfigError::MissingSide(Side::Red))?;

        let mut seen = HashSet::new();
        for key in yellow.keys.keys().into_iter().chain(red.keys.keys()) {
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateBinding { key });
            }
        }

        Ok(Layout {
            arena,
            barrier,
            sides: [yellow, red],
        })
    }

    fn check_positive(&self) -> Result<(), ConfigError> {
        let fields = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("barrier_width", self.barrier_width),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("ship_speed", self.ship_speed),
            ("projectile_speed", self.projectile_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("health_bar_unit", self.health_bar_unit),
            ("health_bar_height", self.health_bar_height),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, value)| *value <= 0) {
            return Err(ConfigError::NonPositive { field });
        }
        if self.initial_health == 0 {
            return Err(ConfigError::NonPositive {
                field: "initial_health",
            });
        }
        Ok(())
    }

    /// Upper bounds so every position, edge and fill width stays within i32
    fn check_ranges(&self) -> Result<(), ConfigError> {
        let limits = [
            ("arena_width", self.arena_width, Params::MAX_ARENA_SIZE),
            ("arena_height", self.arena_height, Params::MAX_ARENA_SIZE),
            ("barrier_width", self.barrier_width, self.arena_width),
            ("ship_width", self.ship_width, self.arena_width),
            ("ship_height", self.ship_height, self.arena_height),
            ("ship_speed", self.ship_speed, self.arena_width),
            ("projectile_speed", self.projectile_speed, self.arena_width),
            ("projectile_width", self.projectile_width, self.arena_width),
            ("projectile_height", self.projectile_height, self.arena_height),
            ("health_bar_height", self.health_bar_height, self.arena_height),
        ];
        if let Some(&(field, _, max)) = limits.iter().find(|(_, value, max)| value > max) {
            return Err(ConfigError::OutOfRange { field, max });
        }

        let bar_width = i32::try_from(self.initial_health)
            .ok()
            .and_then(|health| health.checked_mul(self.health_bar_unit));
        match bar_width {
            Some(width) if width <= self.arena_width => Ok(()),
            _ => Err(ConfigError::OutOfRange {
                field: "initial_health * health_bar_unit",
                max: self.arena_width,
            }),
        }
    }

    fn side_layout(
        &self,
        side: Side,
        side_config: &SideConfig,
        arena: &Geometry,
        barrier: &Geometry,
    ) -> Result<SideLayout, ConfigError> {
        let policy = BoundaryPolicy::for_side(side, arena, barrier);
        if !(arena.left()..=arena.right()).contains(&side_config.spawn_x)
            || !(arena.top()..=arena.bottom()).contains(&side_config.spawn_y)
        {
            return Err(ConfigError::SpawnOutsideArea { side });
        }
        let spawn = Geometry::new(
            side_config.spawn_x,
            side_config.spawn_y,
            self.ship_width,
            self.ship_height,
        );
        if !policy.area().contains(&spawn) {
            return Err(ConfigError::SpawnOutsideArea { side });
        }

        // Bar frame sits in the top outer corner of the side's half
        let bar_width = self.initial_health as i32 * self.health_bar_unit;
        let bar_x = match side {
            Side::Yellow => arena.left() + Params::HEALTH_BAR_MARGIN,
            Side::Red => arena.right() - Params::HEALTH_BAR_MARGIN - bar_width,
        };
        let health_bar = Geometry::new(
            bar_x,
            arena.top() + Params::HEALTH_BAR_MARGIN,
            bar_width,
            self.health_bar_height,
        );

        Ok(SideLayout {
            side,
            spawn,
            policy,
            keys: side_config.keys,
            health_bar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn test_default_layout() {
        let layout = Config::new().resolve().unwrap();
        assert_eq!(layout.arena, Geometry::new(0, 0, 900, 500));
        assert_eq!(layout.barrier, Geometry::new(445, 0, 10, 500));
        assert_eq!(layout.side(Side::Yellow).spawn, Geometry::new(100, 300, 55, 40));
        assert_eq!(layout.side(Side::Red).spawn, Geometry::new(700, 300, 55, 40));
        assert_eq!(
            *layout.side(Side::Red).policy.area(),
            Geometry::new(455, 0, 445, 500)
        );
        assert_eq!(layout.side(Side::Yellow).health_bar, Geometry::new(10, 10, 100, 8));
        assert_eq!(layout.side(Side::Red).health_bar, Geometry::new(790, 10, 100, 8));
    }

    #[test]
    fn test_side_order_in_config_does_not_matter() {
        let mut config = Config::new();
        config.sides.reverse();
        let layout = config.resolve().unwrap();
        assert_eq!(layout.sides[0].side, Side::Yellow);
        assert_eq!(layout.sides[1].side, Side::Red);
    }

    #[test]
    fn test_unknown_side_label_is_rejected() {
        let mut config = Config::new();
        config.sides[1].label = "green".to_string();
        assert_eq!(
            config.resolve(),
            Err(ConfigError::UnknownSide("green".to_string()))
        );
    }

    #[test]
    fn test_duplicate_and_missing_sides() {
        let mut config = Config::new();
        config.sides[1] = SideConfig::yellow();
        config.sides[1].keys = KeyBindings::red();
        assert_eq!(config.resolve(), Err(ConfigError::DuplicateSide(Side::Yellow)));

        let mut config = Config::new();
        config.sides.truncate(1);
        assert_eq!(config.resolve(), Err(ConfigError::MissingSide(Side::Red)));
    }

    #[test]
    fn test_non_positive_fields_are_rejected() {
        let mut config = Config::new();
        config.ship_speed = 0;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::NonPositive {
                field: "ship_speed"
            })
        );

        let mut config = Config::new();
        config.initial_health = 0;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::NonPositive {
                field: "initial_health"
            })
        );
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let mut config = Config::new();
        config.projectile_cap = 0;
        assert_eq!(config.resolve(), Err(ConfigError::ZeroProjectileCap));
    }

    #[test]
    fn test_arena_too_narrow() {
        let mut config = Config::new();
        config.arena_width = 100;
        assert_eq!(config.resolve(), Err(ConfigError::ArenaTooNarrow));
    }

    #[test]
    fn test_spawn_on_wrong_half_is_rejected() {
        let mut config = Config::new();
        config.sides[0].spawn_x = 420; // overlaps the barrier
        assert_eq!(
            config.resolve(),
            Err(ConfigError::SpawnOutsideArea { side: Side::Yellow })
        );
    }

    #[test]
    fn test_oversized_arena_is_rejected() {
        let mut config = Config::new();
        config.arena_width = i32::MAX;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::OutOfRange {
                field: "arena_width",
                max: Params::MAX_ARENA_SIZE
            })
        );

        let mut config = Config::new();
        config.arena_height = Params::MAX_ARENA_SIZE + 1;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::OutOfRange {
                field: "arena_height",
                max: Params::MAX_ARENA_SIZE
            })
        );
    }

    #[test]
    fn test_speeds_are_bounded_by_arena_width() {
        let mut config = Config::new();
        config.projectile_speed = i32::MAX;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::OutOfRange {
                field: "projectile_speed",
                max: 900
            })
        );

        let mut config = Config::new();
        config.ship_speed = 901;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::OutOfRange {
                field: "ship_speed",
                max: 900
            })
        );

        // The arena width itself is still a legal speed
        let mut config = Config::new();
        config.projectile_speed = 900;
        assert!(config.resolve().is_ok());
    }

    #[test]
    fn test_projectile_size_is_bounded() {
        let mut config = Config::new();
        config.projectile_height = 501;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::OutOfRange {
                field: "projectile_height",
                max: 500
            })
        );
    }

    #[test]
    fn test_health_bar_width_must_fit() {
        let mut config = Config::new();
        config.initial_health = 3_000_000_000;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::OutOfRange {
                field: "initial_health * health_bar_unit",
                max: 900
            })
        );

        let mut config = Config::new();
        config.health_bar_unit = i32::MAX;
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_far_away_spawn_is_rejected() {
        let mut config = Config::new();
        config.sides[1].spawn_x = i32::MAX;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::SpawnOutsideArea { side: Side::Red })
        );

        let mut config = Config::new();
        config.sides[0].spawn_y = i32::MIN;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::SpawnOutsideArea { side: Side::Yellow })
        );
    }

    #[test]
    fn test_duplicate_binding_is_rejected() {
        let mut config = Config::new();
        config.sides[1].keys.fire = Key::LCtrl;
        assert_eq!(
            config.resolve(),
            Err(ConfigError::DuplicateBinding { key: Key::LCtrl })
        );
    }
}
