//! Collision engine
//!
//! Detection is split into the usual two phases:
//!
//! - **Broad phase**: every registered pair is tested with a bounds overlap
//!   check. There is no spatial partitioning; arenas hold a few dozen
//!   colliders.
//! - **Narrow phase**: overlapping pairs go to a resolver chosen by the two
//!   shapes, which tests the exact shapes and mutates the rigid bodies.
//!
//! The engine owns no colliders. Its registry holds [`EntityId`]s and every
//! step borrows the entity store from the caller.
//!
//! # Module Organization
//!
//! - `resolve` - shape-pair resolvers
//! - [`query`] - raycasts, segment tests and position clamping

pub mod query;
mod resolve;

pub use query::{RayHit, SegmentHit};

use super::events::CollisionEventHandler;
use crate::core::config::PhysicsConfig;
use crate::scene::{EntityId, EntityStore};
use resolve::Resolver;

/// Entities whose state changed during a collision step
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollisionOutcome {
    /// Entities deactivated but kept alive (the player after a fatal hit)
    pub deactivated: Vec<EntityId>,
    /// Entities that must be removed from the store
    pub destroyed: Vec<EntityId>,
}

impl CollisionOutcome {
    /// `true` when no entity changed lifecycle state
    pub fn is_empty(&self) -> bool {
        self.deactivated.is_empty() && self.destroyed.is_empty()
    }
}

/// Registry plus broad phase over all registered colliders
#[derive(Debug, Default, Clone)]
pub struct CollisionEngine {
    registry: Vec<EntityId>,
}

impl CollisionEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` to the registry; returns `false` if it was already there
    pub fn register(&mut self, id: EntityId) -> bool {
        if self.registry.contains(&id) {
            return false;
        }
        log::debug!("Registered collider {:?}", id);
        self.registry.push(id);
        true
    }

    /// Remove `id` from the registry; returns `false` if it was absent
    pub fn deregister(&mut self, id: EntityId) -> bool {
        let Some(index) = self.registry.iter().position(|&entry| entry == id) else {
            return false;
        };
        log::debug!("Deregistered collider {:?}", id);
        self.registry.remove(index);
        true
    }

    /// Whether `id` is registered
    pub fn is_registered(&self, id: EntityId) -> bool {
        self.registry.contains(&id)
    }

    /// Live view of the registry in registration order
    pub fn colliders(&self) -> &[EntityId] {
        &self.registry
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// `true` when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Run one detection and resolution pass.
    ///
    /// Collider bounds must already be up to date. Entities deactivated or
    /// destroyed by a resolver are skipped for the rest of the pass and
    /// deregistered before returning; removing destroyed entities from the
    /// store is left to the caller.
    pub fn step(
        &mut self,
        entities: &mut EntityStore,
        config: &PhysicsConfig,
        events: &mut dyn CollisionEventHandler,
    ) -> CollisionOutcome {
        let snapshot = self.registry.clone();
        let mut resolver = Resolver::new(entities, config, events);

        for (i, &a) in snapshot.iter().enumerate() {
            for &b in &snapshot[i + 1..] {
                if resolver.broad_phase(a, b) {
                    resolver.dispatch(a, b);
                }
            }
        }

        let outcome = resolver.finish();
        for &id in outcome.deactivated.iter().chain(&outcome.destroyed) {
            self.deregister(id);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::events::IgnoreEvents;
    use crate::physics::Collider;
    use crate::scene::Entity;

    #[test]
    fn test_registration_is_idempotent() {
        let mut store = EntityStore::with_key();
        let a = store.insert(Entity::new("a"));
        let b = store.insert(Entity::new("b"));
        let mut engine = CollisionEngine::new();

        assert!(engine.register(a));
        assert!(!engine.register(a));
        assert!(engine.register(b));
        assert_eq!(engine.colliders(), &[a, b]);

        assert!(engine.deregister(a));
        assert!(!engine.deregister(a));
        assert_eq!(engine.colliders(), &[b]);
        assert!(!engine.is_registered(a));
    }

    #[test]
    fn test_step_skips_stale_handles() {
        let mut store = EntityStore::with_key();
        let a = store.insert(Entity::new("a").with_collider(Collider::sphere()));
        let b = store.insert(Entity::new("b").with_collider(Collider::sphere()));
        for entity in store.values_mut() {
            entity.refresh_collider();
        }
        let mut engine = CollisionEngine::new();
        engine.register(a);
        engine.register(b);
        store.remove(a);

        let outcome = engine.step(&mut store, &PhysicsConfig::default(), &mut IgnoreEvents);
        assert!(outcome.is_empty());
        assert_eq!(engine.colliders(), &[a, b]);
    }
}
