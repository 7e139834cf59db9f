//! Scene: entity records and the world that steps them
//!
//! The [`World`] is constructed explicitly by the host and passed by `&mut`
//! to whatever needs to mutate it. There is no global state.

pub mod entity;
pub mod health;
pub mod transform;
pub mod world;

pub use entity::{Entity, EntityId, EntityStore};
pub use health::Health;
pub use transform::Transform;
pub use world::{SceneError, World};
