//! Match controller: owns the world and both sides, runs one frame per `step`

use hecs::{Entity, World};
use tracing::{debug, info};

use crate::components::{EntityKind, Facing, Health, HealthBar, Ship};
use crate::config::{Config, Layout, SideLayout};
use crate::error::ConfigError;
use crate::geometry::Geometry;
use crate::input::{FireTrigger, InputFrame};
use crate::render::RenderSink;
use crate::resources::{AdvanceReport, Events, MatchState};
use crate::side::{Side, SideState};
use crate::systems::{move_ship, sync_health_bars, MoveControls, ProjectileManager};
use crate::{create_barrier, create_health_bar, create_ship};

/// Read-only view of one ship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipView {
    pub side: Side,
    pub geometry: Geometry,
    pub facing: Facing,
    pub health: u32,
    pub health_bar: u32,
    pub health_bar_fill: i32,
}

/// Read-only view of the whole match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub frame: u64,
    pub state: MatchState,
    pub ships: Vec<ShipView>,
    pub projectiles: [Vec<Geometry>; 2], // indexed by Side::index
}

pub struct Match {
    world: World,
    config: Config,
    layout: Layout,
    projectiles: ProjectileManager,
    sides: [SideState; 2],
    barrier: Entity,
    state: MatchState,
    events: Events,
    frame: u64,
}

impl Match {
    /// Validate the configuration and set up a fresh match.
    /// Every initial entity is registered with `sink`.
    pub fn new(config: Config, sink: &mut dyn RenderSink) -> Result<Self, ConfigError> {
        let layout = config.resolve()?;
        let mut world = World::new();
        let (barrier, sides) = populate(&mut world, &config, &layout, sink);
        debug!(
            arena_width = layout.arena.width(),
            arena_height = layout.arena.height(),
            projectile_cap = config.projectile_cap,
            "match created"
        );

        Ok(Self {
            world,
            projectiles: ProjectileManager::from_config(&config),
            config,
            layout,
            sides,
            barrier,
            state: MatchState::Running,
            events: Events::new(),
            frame: 0,
        })
    }

    /// Start a new match with the same configuration
    pub fn restart(&mut self, sink: &mut dyn RenderSink) {
        let live: Vec<Entity> = self.world.iter().map(|e| e.entity()).collect();
        for entity in live {
            sink.remove(entity);
        }
        self.world.clear();

        let (barrier, sides) = populate(&mut self.world, &self.config, &self.layout, sink);
        self.barrier = barrier;
        self.sides = sides;
        self.state = MatchState::Running;
        self.events.clear();
        self.frame = 0;
        debug!("match restarted");
    }

    /// Run one frame: movement, fire events, projectile advance, terminal check.
    /// Once the match is over the world is left untouched and only `present`
    /// is forwarded to the sink.
    ///
    /// Yellow's projectiles always resolve before red's. If both ships would
    /// be knocked out in the same frame, yellow wins and red's projectiles
    /// are left where they were at the start of the frame's advance.
    pub fn step(&mut self, input: &InputFrame, sink: &mut dyn RenderSink) -> MatchState {
        if self.state.is_over() {
            sink.present(&self.world);
            return self.state;
        }

        self.events.clear();
        self.frame += 1;

        // 1. Movement from the held-key snapshot
        for side in &self.sides {
            move_ship(&mut self.world, side, &input.held);
        }

        // 2. Fire on key-down transitions; spawned projectiles advance this frame
        for event in &input.events {
            for side in self.sides.iter_mut() {
                if side.trigger.on_event(*event, side.fire_key) {
                    self.projectiles
                        .spawn(&mut self.world, side, sink, &mut self.events);
                }
            }
        }

        // 3. Advance each side against the other
        for side in Side::ALL {
            self.advance_side(side, sink);
            if self.state.is_over() {
                break;
            }
        }

        sink.present(&self.world);
        self.state
    }

    /// Fire a projectile for `side`, bypassing key handling
    pub fn fire(&mut self, side: Side, sink: &mut dyn RenderSink) -> Option<Entity> {
        if self.state.is_over() {
            return None;
        }
        self.projectiles.spawn(
            &mut self.world,
            &mut self.sides[side.index()],
            sink,
            &mut self.events,
        )
    }

    /// Advance `side`'s projectiles against the opposing ship
    pub fn advance_side(&mut self, side: Side, sink: &mut dyn RenderSink) -> AdvanceReport {
        if self.state.is_over() {
            return AdvanceReport::default();
        }

        let target = self.sides[side.opponent().index()].ship;
        let report = self.projectiles.advance(
            &mut self.world,
            &mut self.sides[side.index()],
            target,
            sink,
            &mut self.events,
        );

        if report.hits > 0 {
            sync_health_bars(&mut self.world);
        }
        if report.knocked_out {
            self.finish(side);
        }
        report
    }

    fn finish(&mut self, winner: Side) {
        self.state = MatchState::Over { winner };
        self.events.match_over = Some(winner);
        info!(winner = %winner, frame = self.frame, "match over");
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for setting up positions and health in tests
    #[cfg(any(test, feature = "test-util"))]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    pub fn ship(&self, side: Side) -> Entity {
        self.sides[side.index()].ship
    }

    pub fn barrier(&self) -> Entity {
        self.barrier
    }

    pub fn projectile_cap(&self) -> usize {
        self.projectiles.cap()
    }

    pub fn live_projectiles(&self, side: Side) -> usize {
        self.sides[side.index()].live_projectiles()
    }

    pub fn health(&self, side: Side) -> u32 {
        self.world
            .get::<&Health>(self.ship(side))
            .map(|h| h.current())
            .unwrap_or(0)
    }

    pub fn ship_geometry(&self, side: Side) -> Option<Geometry> {
        self.world.get::<&Geometry>(self.ship(side)).map(|g| *g).ok()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let ships = Side::ALL
            .iter()
            .filter_map(|side| self.ship_view(*side))
            .collect();
        let projectiles = Side::ALL.map(|side| {
            self.sides[side.index()]
                .projectiles
                .iter()
                .filter_map(|entity| self.world.get::<&Geometry>(*entity).map(|g| *g).ok())
                .collect()
        });

        MatchSnapshot {
            frame: self.frame,
            state: self.state,
            ships,
            projectiles,
        }
    }

    fn ship_view(&self, side: Side) -> Option<ShipView> {
        let state = &self.sides[side.index()];
        let geometry = *self.world.get::<&Geometry>(state.ship).ok()?;
        let facing = self.world.get::<&Ship>(state.ship).ok()?.facing;
        let health = self.world.get::<&Health>(state.ship).ok()?.current();
        let bar = *self.world.get::<&HealthBar>(state.health_bar).ok()?;
        Some(ShipView {
            side,
            geometry,
            facing,
            health,
            health_bar: bar.value,
            health_bar_fill: bar.fill_width(),
        })
    }
}

fn populate(
    world: &mut World,
    config: &Config,
    layout: &Layout,
    sink: &mut dyn RenderSink,
) -> (Entity, [SideState; 2]) {
    let barrier = create_barrier(world, layout.barrier);
    sink.add(barrier, EntityKind::StaticObstacle);

    let sides = [
        spawn_side(world, config, &layout.sides[0], sink),
        spawn_side(world, config, &layout.sides[1], sink),
    ];
    (barrier, sides)
}

fn spawn_side(
    world: &mut World,
    config: &Config,
    layout: &SideLayout,
    sink: &mut dyn RenderSink,
) -> SideState {
    let ship = create_ship(world, layout, config);
    sink.add(ship, EntityKind::Spaceship);
    let health_bar = create_health_bar(world, layout, config);
    sink.add(health_bar, EntityKind::HealthBar);

    SideState {
        side: layout.side,
        ship,
        health_bar,
        projectiles: Vec::new(),
        policy: layout.policy,
        controls: MoveControls::new(&layout.keys),
        fire_key: layout.keys.fire,
        trigger: FireTrigger::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::render::NullSink;

    #[test]
    fn test_new_match_places_ships() {
        let game = Match::new(Config::new(), &mut NullSink).unwrap();
        assert_eq!(game.state(), MatchState::Running);
        assert_eq!(
            game.ship_geometry(Side::Yellow),
            Some(Geometry::new(100, 300, 55, 40))
        );
        assert_eq!(
            game.ship_geometry(Side::Red),
            Some(Geometry::new(700, 300, 55, 40))
        );
        assert_eq!(game.health(Side::Yellow), 10);
        assert_eq!(game.health(Side::Red), 10);
        // Barrier, two ships, two bars
        assert_eq!(game.world().len(), 5);
    }

    #[test]
    fn test_invalid_config_fails_at_setup() {
        let mut config = Config::new();
        config.sides[0].label = "blue".to_string();
        assert_eq!(
            Match::new(config, &mut NullSink).err(),
            Some(ConfigError::UnknownSide("blue".to_string()))
        );
    }

    #[test]
    fn test_step_moves_both_sides() {
        let mut game = Match::new(Config::new(), &mut NullSink).unwrap();
        let input = InputFrame::new().hold(Key::D).hold(Key::Up);

        game.step(&input, &mut NullSink);

        assert_eq!(game.ship_geometry(Side::Yellow).unwrap().left(), 105);
        assert_eq!(game.ship_geometry(Side::Red).unwrap().top(), 295);
        assert_eq!(game.frame(), 1);
    }

    #[test]
    fn test_fired_projectile_advances_same_frame() {
        let mut game = Match::new(Config::new(), &mut NullSink).unwrap();
        let input = InputFrame::new().press(Key::LCtrl);

        game.step(&input, &mut NullSink);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.projectiles[Side::Yellow.index()].len(), 1);
        // Muzzle at x=155, one step of 7
        assert_eq!(snapshot.projectiles[Side::Yellow.index()][0].left(), 162);
        assert_eq!(game.events().shots, vec![Side::Yellow]);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = Match::new(Config::new(), &mut NullSink).unwrap();
        game.step(&InputFrame::new().hold(Key::S).press(Key::RCtrl), &mut NullSink);
        let red = game.ship(Side::Red);
        game.world_mut()
            .get::<&mut Health>(red)
            .unwrap()
            .take_hit();
        assert_eq!(game.health(Side::Red), 9);

        game.restart(&mut NullSink);

        assert_eq!(game.frame(), 0);
        assert_eq!(game.state(), MatchState::Running);
        assert_eq!(game.health(Side::Red), 10);
        assert_eq!(game.live_projectiles(Side::Red), 0);
        assert_eq!(
            game.ship_geometry(Side::Yellow),
            Some(Geometry::new(100, 300, 55, 40))
        );
        assert_eq!(game.world().len(), 5);
        assert!(!game.side(Side::Red).trigger.is_pressed());
    }
}
