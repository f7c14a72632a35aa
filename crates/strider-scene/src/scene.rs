use std::collections::HashMap;

use strider_core::Transform;
use tracing::debug;

use crate::entity::{Entity, EntitySlots};
use crate::error::SceneError;

/// Transform store for the entities the controllers read and write.
///
/// Every live entity owns exactly one [`Transform`]. Lookups through stale
/// handles return `None` rather than touching a recycled slot.
#[derive(Debug, Default)]
pub struct Scene {
    slots: EntitySlots,
    transforms: Vec<Option<Transform>>,
    names: HashMap<String, Entity>,
    active_camera: Option<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Entity management ----

    /// Spawn an entity with the given transform.
    pub fn spawn(&mut self, transform: Transform) -> Entity {
        let entity = self.slots.allocate();
        let idx = entity.index as usize;
        if idx >= self.transforms.len() {
            self.transforms.resize(idx + 1, None);
        }
        self.transforms[idx] = Some(transform);
        entity
    }

    /// Spawn an entity reachable through [`Scene::find_by_name`].
    pub fn spawn_named(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<Entity, SceneError> {
        let name = name.into();
        if let Some(existing) = self.find_by_name(&name) {
            return Err(SceneError::DuplicateName(name, existing));
        }
        let entity = self.spawn(transform);
        debug!("Spawned {name:?} as {entity}");
        self.names.insert(name, entity);
        Ok(entity)
    }

    /// Despawn an entity, dropping its transform, names and camera role.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.slots.release(entity) {
            return false;
        }
        self.transforms[entity.index as usize] = None;
        self.names.retain(|_, named| *named != entity);
        if self.active_camera == Some(entity) {
            self.active_camera = None;
        }
        true
    }

    /// Check whether an entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slots.is_alive(entity)
    }

    /// Number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.slots.len()
    }

    // ---- Transforms ----

    pub fn transform(&self, entity: Entity) -> Option<&Transform> {
        if !self.slots.is_alive(entity) {
            return None;
        }
        self.transforms.get(entity.index as usize)?.as_ref()
    }

    pub fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        if !self.slots.is_alive(entity) {
            return None;
        }
        self.transforms.get_mut(entity.index as usize)?.as_mut()
    }

    // ---- Lookups ----

    /// Find a live entity by the name it was spawned with.
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.names
            .get(name)
            .copied()
            .filter(|&entity| self.slots.is_alive(entity))
    }

    /// Make `entity` the camera movement is relative to.
    pub fn set_active_camera(&mut self, entity: Entity) -> Result<(), SceneError> {
        if !self.slots.is_alive(entity) {
            return Err(SceneError::DeadEntity(entity));
        }
        self.active_camera = Some(entity);
        Ok(())
    }

    pub fn clear_active_camera(&mut self) {
        self.active_camera = None;
    }

    /// The active camera, if one is set and still alive.
    pub fn active_camera(&self) -> Option<Entity> {
        self.active_camera
            .filter(|&entity| self.slots.is_alive(entity))
    }
}
