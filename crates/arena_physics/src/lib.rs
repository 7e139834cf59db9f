//! # Arena Physics
//!
//! 3D math and physics core for a small vehicle-combat arena.
//!
//! ## Features
//!
//! - **Math**: vectors, quaternions, dimension-checked matrices and the
//!   transform/rotation builders used by movement, camera and AI code
//! - **Rigid Bodies**: semi-implicit Euler point masses with bounce and
//!   rest handling against ground and walls
//! - **Collision**: all-pairs broad phase, shape-pair resolution, raycasts,
//!   segment casts and wall clamping
//! - **Scene**: entities as plain records of optional parts, stepped by an
//!   explicitly owned [`World`](scene::World)
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_physics::prelude::*;
//!
//! let mut world = World::new(PhysicsConfig::default());
//! world.spawn(
//!     Entity::new("ground")
//!         .with_position(Vector::new(0.0, -0.5, 0.0))
//!         .with_visual_extent(Vector::new(20.0, 1.0, 20.0))
//!         .with_collider(Collider::aabb(ColliderRoles::GROUND)),
//! );
//! let ball = world.spawn(
//!     Entity::new("ball")
//!         .with_visual_extent(Vector::ONE)
//!         .with_rigid_body(RigidBody::new(Vector::new(0.0, 3.0, 0.0)))
//!         .with_collider(Collider::sphere()),
//! );
//!
//! let mut events: Vec<CollisionEvent> = Vec::new();
//! for _ in 0..120 {
//!     world.step(1.0 / 60.0, &mut events)?;
//! }
//! assert!(world.get(ball).unwrap().world_position().y >= 0.5);
//! # Ok::<(), SceneError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod physics;
pub mod scene;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, EngineConfig, PhysicsConfig, SimulationConfig},
        foundation::{
            math::{rotation, transform, Axis, MathError, Matrix, Quaternion, Vector},
            time::FrameTimer,
        },
        physics::{
            Bounds, Collider, ColliderRoles, ColliderShape, CollisionEvent, CollisionEventHandler,
            IgnoreEvents, RayHit, RigidBody, SegmentHit,
        },
        scene::{Entity, EntityId, Health, SceneError, Transform, World},
    };
}
