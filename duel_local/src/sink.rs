use std::collections::HashMap;

use duel_core::{EntityKind, Geometry, RenderSink};
use hecs::{Entity, World};
use tracing::{debug, trace};

/// Render sink that keeps the live entity set and logs changes to it
#[derive(Debug, Default)]
pub struct LogSink {
    live: HashMap<Entity, EntityKind>,
    frames: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn add(&mut self, entity: Entity, kind: EntityKind) {
        debug!(?entity, ?kind, "sink add");
        self.live.insert(entity, kind);
    }

    fn remove(&mut self, entity: Entity) {
        if let Some(kind) = self.live.remove(&entity) {
            debug!(?entity, ?kind, "sink remove");
        }
    }

    fn present(&mut self, world: &World) {
        self.frames += 1;
        if !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }
        for (entity, kind) in &self.live {
            if let Ok(geometry) = world.get::<&Geometry>(*entity) {
                trace!(
                    ?entity,
                    ?kind,
                    x = geometry.left(),
                    y = geometry.top(),
                    w = geometry.width(),
                    h = geometry.height(),
                    "draw"
                );
            }
        }
    }
}
