//! Collision events delivered to the game-state collaborator
//!
//! The collision engine never keeps score or decides game flow itself. It
//! reports what happened through a [`CollisionEventHandler`] passed into
//! each step.

use crate::scene::EntityId;

/// Gameplay-relevant outcome of a resolved collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// A plain box entered a trigger volume and was consumed
    Scored {
        /// The trigger volume
        trigger: EntityId,
        /// The box that was destroyed
        target: EntityId,
    },
    /// The player touched a hostile sphere and was deactivated
    PlayerDestroyed {
        /// The player entity
        player: EntityId,
        /// The sphere that hit it
        by: EntityId,
    },
    /// A projectile point hit a sphere with health
    Damaged {
        /// The sphere that lost health
        target: EntityId,
        /// Hit points left after the hit
        remaining: i32,
    },
}

/// Receiver for collision events
pub trait CollisionEventHandler {
    /// Handle one event
    fn on_event(&mut self, event: &CollisionEvent);
}

impl CollisionEventHandler for Vec<CollisionEvent> {
    fn on_event(&mut self, event: &CollisionEvent) {
        self.push(*event);
    }
}

/// Handler that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreEvents;

impl CollisionEventHandler for IgnoreEvents {
    fn on_event(&mut self, _event: &CollisionEvent) {}
}
