//! Entity records
//!
//! An entity is a plain record of optional parts. Nothing is looked up by
//! type: code that needs a rigid body reads `entity.rigid_body` and handles
//! the `None` case.

use super::{Health, Transform};
use crate::foundation::math::Vector;
use crate::physics::{Collider, RigidBody};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational handle to an entity; stale after the entity is destroyed
    pub struct EntityId;
}

/// Storage for all entities of a world
pub type EntityStore = SlotMap<EntityId, Entity>;

/// A simulated object
#[derive(Debug, Clone)]
pub struct Entity {
    /// Display name, used in logs
    pub name: String,
    /// Pose; synchronised from the rigid body after each step
    pub transform: Transform,
    /// Full size of the visual model, used to size the collider
    pub visual_extent: Option<Vector>,
    /// Dynamic state, if the entity moves
    pub rigid_body: Option<RigidBody>,
    /// Collision shape, if the entity collides
    pub collider: Option<Collider>,
    /// Hit points, if the entity can be damaged
    pub health: Option<Health>,
    active: bool,
}

impl Entity {
    /// Active entity with an identity transform and no parts
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            visual_extent: None,
            rigid_body: None,
            collider: None,
            health: None,
            active: true,
        }
    }

    /// Builder pattern: Set transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vector) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder pattern: Set visual extent
    pub fn with_visual_extent(mut self, extent: Vector) -> Self {
        self.visual_extent = Some(extent);
        self
    }

    /// Builder pattern: Attach a rigid body
    pub fn with_rigid_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = Some(body);
        self
    }

    /// Builder pattern: Attach a collider
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Builder pattern: Attach health
    pub fn with_health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }

    /// Builder pattern: Start inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether the entity takes part in simulation
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// `true` when the entity should be in the collision registry
    pub fn is_collidable(&self) -> bool {
        self.active && self.collider.is_some()
    }

    /// Current world position; the rigid body is authoritative when present
    pub fn world_position(&self) -> Vector {
        self.rigid_body
            .as_ref()
            .map_or(self.transform.position, RigidBody::position)
    }

    /// Recompute collider bounds from the current position and extent
    pub fn refresh_collider(&mut self) {
        let position = self.world_position();
        let extent = self.visual_extent;
        if let Some(collider) = self.collider.as_mut() {
            collider.update_bounds(position, extent);
        }
    }

    /// Copy body position, and projectile facing, into the transform
    pub fn sync_transform(&mut self) {
        if let Some(body) = &self.rigid_body {
            self.transform.position = body.position();
            if let Some(facing) = body.facing() {
                self.transform.rotation = facing;
            }
        }
    }
}
