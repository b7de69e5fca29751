use hecs::{Entity, World};

use crate::components::EntityKind;

/// Render collaborator
///
/// The core only reports which entities are live; draw order and visuals
/// are up to the sink. `present` is called once per frame after all
/// mutation.
pub trait RenderSink {
    fn add(&mut self, entity: Entity, kind: EntityKind);
    fn remove(&mut self, entity: Entity);
    fn present(&mut self, world: &World);
}

/// Sink that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn add(&mut self, _entity: Entity, _kind: EntityKind) {}

    fn remove(&mut self, _entity: Entity) {}

    fn present(&mut self, _world: &World) {}
}
