//! World: entity storage, collider lifecycle and the per-tick step

use super::{Entity, EntityId, EntityStore};
use crate::core::config::PhysicsConfig;
use crate::foundation::math::{MathError, Vector};
use crate::physics::{
    CollisionEngine, CollisionEventHandler, CollisionOutcome, ColliderShape, RayHit, SegmentHit,
};

/// Scene errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Handle does not refer to a live entity
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(EntityId),

    /// Math failure during integration or transform building
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

/// All simulated entities plus the collision engine tracking them.
///
/// Registration follows the entity lifecycle: an entity with a collider is
/// registered while it is active and deregistered when it is deactivated or
/// destroyed.
#[derive(Debug)]
pub struct World {
    entities: EntityStore,
    collision: CollisionEngine,
    config: PhysicsConfig,
    elapsed: f32,
    ticks: u64,
}

impl World {
    /// Create an empty world
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            entities: EntityStore::with_key(),
            collision: CollisionEngine::new(),
            config,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Physics constants in use
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Collision engine, for inspecting the registry
    pub fn collision(&self) -> &CollisionEngine {
        &self.collision
    }

    /// Simulated time so far, in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of completed steps
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add an entity. A rigid body's position wins over the transform.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        entity.sync_transform();
        entity.refresh_collider();
        let collidable = entity.is_collidable();

        let id = self.entities.insert(entity);
        if collidable {
            self.collision.register(id);
        }
        log::debug!("Spawned {} as {:?}", self.entities[id].name, id);
        id
    }

    /// Remove an entity and deregister its collider
    pub fn destroy(&mut self, id: EntityId) -> Option<Entity> {
        self.collision.deregister(id);
        let entity = self.entities.remove(id)?;
        log::debug!("Destroyed {} ({:?})", entity.name, id);
        Some(entity)
    }

    /// Activate or deactivate an entity, updating registration
    pub fn set_active(&mut self, id: EntityId, active: bool) -> Result<(), SceneError> {
        let entity = self.entities.get_mut(id).ok_or(SceneError::UnknownEntity(id))?;
        entity.set_active(active);

        if entity.is_collidable() {
            entity.refresh_collider();
            self.collision.register(id);
        } else {
            self.collision.deregister(id);
        }
        Ok(())
    }

    /// Teleport an entity, moving its body if it has one
    pub fn move_to(&mut self, id: EntityId, position: Vector) -> Result<(), SceneError> {
        let entity = self.entities.get_mut(id).ok_or(SceneError::UnknownEntity(id))?;
        entity.transform.position = position;
        if let Some(body) = entity.rigid_body.as_mut() {
            body.set_position(position);
        }
        entity.refresh_collider();
        Ok(())
    }

    /// Entity by handle
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Mutable entity by handle
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Entity by handle, or [`SceneError::UnknownEntity`]
    pub fn entity(&self, id: EntityId) -> Result<&Entity, SceneError> {
        self.entities.get(id).ok_or(SceneError::UnknownEntity(id))
    }

    /// Whether `id` refers to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Iterate over all entities
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` when the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Order: integrate active bodies, refresh collider bounds, resolve
    /// collisions, remove destroyed entities, copy body state into
    /// transforms.
    pub fn step(
        &mut self,
        dt: f32,
        events: &mut dyn CollisionEventHandler,
    ) -> Result<CollisionOutcome, SceneError> {
        let gravity = self.config.gravity;
        for entity in self.entities.values_mut().filter(|e| e.is_active()) {
            if let Some(body) = entity.rigid_body.as_mut() {
                body.integrate(dt, gravity)?;
            }
            entity.refresh_collider();
        }

        let outcome = self.collision.step(&mut self.entities, &self.config, events);

        for &id in &outcome.destroyed {
            if let Some(entity) = self.entities.remove(id) {
                log::debug!("Destroyed {} ({:?})", entity.name, id);
            }
        }
        for entity in self.entities.values_mut() {
            entity.sync_transform();
        }

        self.elapsed += dt;
        self.ticks += 1;
        Ok(outcome)
    }

    /// Nearest ray hit; see [`CollisionEngine::raycast`]
    pub fn raycast(
        &self,
        origin: Vector,
        direction: Vector,
        max_distance: f32,
        filter: Option<ColliderShape>,
        ignore: Option<EntityId>,
    ) -> Option<RayHit> {
        self.collision
            .raycast(&self.entities, origin, direction, max_distance, filter, ignore)
    }

    /// First collider on a segment; see [`CollisionEngine::segment_cast`]
    pub fn segment_cast(&self, start: Vector, end: Vector, ignore: Option<EntityId>) -> Option<SegmentHit> {
        self.collision.segment_cast(&self.entities, start, end, ignore)
    }

    /// Wall-corrected position for `moving`; see
    /// [`CollisionEngine::clamp_to_bounds`]
    pub fn clamp_to_bounds(&self, moving: EntityId, proposed: Vector) -> Vector {
        self.collision.clamp_to_bounds(&self.entities, moving, proposed)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Collider, IgnoreEvents, RigidBody};
    use approx::assert_relative_eq;

    #[test]
    fn test_spawn_registers_only_collidable_entities() {
        let mut world = World::default();
        let marker = world.spawn(Entity::new("marker"));
        let wall = world.spawn(Entity::new("wall").with_collider(Collider::sphere()));
        let hidden = world.spawn(Entity::new("hidden").with_collider(Collider::sphere()).inactive());

        assert_eq!(world.collision().colliders(), &[wall]);
        assert!(!world.collision().is_registered(marker));
        assert!(!world.collision().is_registered(hidden));
    }

    #[test]
    fn test_activation_drives_registration() {
        let mut world = World::default();
        let id = world.spawn(Entity::new("enemy").with_collider(Collider::sphere()).inactive());

        world.set_active(id, true).unwrap();
        world.set_active(id, true).unwrap();
        assert_eq!(world.collision().colliders(), &[id]);

        world.set_active(id, false).unwrap();
        assert!(world.collision().is_empty());
    }

    #[test]
    fn test_destroy_deregisters_and_invalidates_handle() {
        let mut world = World::default();
        let id = world.spawn(Entity::new("box").with_collider(Collider::sphere()));

        assert!(world.destroy(id).is_some());
        assert!(world.collision().is_empty());
        assert!(world.destroy(id).is_none());
        assert_eq!(world.set_active(id, true), Err(SceneError::UnknownEntity(id)));
    }

    #[test]
    fn test_step_syncs_transform_from_body() {
        let mut world = World::new(PhysicsConfig::new().with_gravity(-10.0));
        let id = world.spawn(Entity::new("ball").with_rigid_body(RigidBody::new(Vector::new(0.0, 10.0, 0.0))));

        world.step(0.5, &mut IgnoreEvents).unwrap();

        let entity = world.get(id).unwrap();
        assert_relative_eq!(entity.transform.position, Vector::new(0.0, 7.5, 0.0), epsilon = 1e-5);
        assert_eq!(world.ticks(), 1);
        assert_relative_eq!(world.elapsed(), 0.5);
    }

    #[test]
    fn test_inactive_bodies_do_not_move() {
        let mut world = World::default();
        let id = world.spawn(Entity::new("parked").with_rigid_body(RigidBody::new(Vector::UP)).inactive());

        world.step(1.0, &mut IgnoreEvents).unwrap();
        assert_eq!(world.get(id).unwrap().world_position(), Vector::UP);
    }

    #[test]
    fn test_move_to_teleports_body() {
        let mut world = World::default();
        let id = world.spawn(Entity::new("player").with_rigid_body(RigidBody::new(Vector::ZERO)));
        world.move_to(id, Vector::new(3.0, 0.0, 1.0)).unwrap();
        assert_eq!(world.get(id).unwrap().world_position(), Vector::new(3.0, 0.0, 1.0));
    }
}
