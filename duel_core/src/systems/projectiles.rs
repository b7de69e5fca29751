use hecs::{Entity, World};
use tracing::{debug, info};

use crate::components::{EntityKind, Health, Projectile};
use crate::config::Config;
use crate::geometry::Geometry;
use crate::render::RenderSink;
use crate::resources::{AdvanceReport, Events, Hit};
use crate::side::SideState;

/// Spawns, moves and despawns projectiles for both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileManager {
    cap: usize,
    speed: i32,
    width: i32,
    height: i32,
    arena: Geometry,
}

impl ProjectileManager {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cap: config.projectile_cap,
            speed: config.projectile_speed,
            width: config.projectile_width,
            height: config.projectile_height,
            arena: config.arena(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Fire from the ship's muzzle. Over the cap this is a silent no-op.
    pub fn spawn(
        &self,
        world: &mut World,
        side: &mut SideState,
        sink: &mut dyn RenderSink,
        events: &mut Events,
    ) -> Option<Entity> {
        if side.projectiles.len() >= self.cap {
            debug!(side = %side.side, cap = self.cap, "projectile cap reached, shot dropped");
            return None;
        }

        let ship = match world.get::<&Geometry>(side.ship) {
            Ok(geometry) => *geometry,
            Err(_) => return None,
        };

        // Muzzle is the ship edge facing the opponent, vertically centred
        let direction = side.side.shot_direction();
        let x = if direction > 0 {
            ship.right()
        } else {
            ship.left() - self.width
        };
        let y = ship.center_y() - self.height / 2;
        let geometry = Geometry::new(x, y, self.width, self.height);

        let entity = world.spawn((
            geometry,
            EntityKind::Projectile,
            Projectile {
                owner: side.side,
                velocity: direction * self.speed,
            },
        ));
        side.projectiles.push(entity);
        sink.add(entity, EntityKind::Projectile);
        events.shots.push(side.side);

        debug!(
            side = %side.side,
            x,
            y,
            live = side.projectiles.len(),
            "projectile spawned"
        );
        Some(entity)
    }

    /// Move every live projectile of `side` and resolve hits against `target`.
    ///
    /// Hits are checked before the arena exit, so a projectile striking the
    /// ship at the edge still counts. The live list is rebuilt from a
    /// snapshot; when the target is knocked out the rest of the list is kept
    /// untouched.
    pub fn advance(
        &self,
        world: &mut World,
        side: &mut SideState,
        target: Entity,
        sink: &mut dyn RenderSink,
        events: &mut Events,
    ) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        if side.projectiles.is_empty() {
            return report;
        }

        let target_rect = world.get::<&Geometry>(target).map(|g| *g).ok();
        let live = std::mem::take(&mut side.projectiles);

        for (index, &entity) in live.iter().enumerate() {
            let Some(rect) = move_projectile(world, entity) else {
                // Despawned outside the manager; drop it from the list and the sink
                sink.remove(entity);
                continue;
            };

            let hit = target_rect.is_some_and(|t| rect.overlaps(&t));
            let exited = !self.arena.contains(&rect);

            if hit {
                report.hits += 1;
                let remaining = apply_hit(world, target);
                events.hits.push(Hit {
                    attacker: side.side,
                    victim: side.side.opponent(),
                    remaining,
                });
                info!(
                    attacker = %side.side,
                    victim = %side.side.opponent(),
                    victim_health = remaining,
                    "ship hit"
                );
                report.knocked_out = remaining == 0;
            } else if exited {
                report.expired += 1;
                events.expired.push(side.side);
                debug!(side = %side.side, x = rect.left(), "projectile left the arena");
            }

            if hit || exited {
                if world.despawn(entity).is_ok() {
                    sink.remove(entity);
                }
            } else {
                side.projectiles.push(entity);
            }

            if report.knocked_out {
                side.projectiles.extend_from_slice(&live[index + 1..]);
                break;
            }
        }

        report
    }
}

fn move_projectile(world: &mut World, entity: Entity) -> Option<Geometry> {
    let (geometry, projectile) = world
        .query_one_mut::<(&mut Geometry, &Projectile)>(entity)
        .ok()?;
    geometry.pos.x = geometry.pos.x.saturating_add(projectile.velocity);
    Some(*geometry)
}

/// One point of damage, the only write path for ship health
fn apply_hit(world: &mut World, target: Entity) -> u32 {
    match world.get::<&mut Health>(target) {
        Ok(mut health) => health.take_hit(),
        Err(_) => 0,
    }
}
