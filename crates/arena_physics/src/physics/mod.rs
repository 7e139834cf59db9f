//! Physics module for collision detection and response
//!
//! Rigid bodies integrate with semi-implicit Euler; colliders cache world
//! bounds; the collision engine scans registered pairs and resolves them.

pub mod bounds;
pub mod collider;
pub mod collision;
pub mod events;
pub mod rigid_body;


pub use bounds::Bounds;
pub use collider::{Collider, ColliderRoles, ColliderShape};
pub use collision::{CollisionEngine, CollisionOutcome, RayHit, SegmentHit};
pub use collision::query::{segment_intersects_aabb, segment_intersects_sphere, Ray};
pub use events::{CollisionEvent, CollisionEventHandler, IgnoreEvents};
pub use rigid_body::RigidBody;
