//! Per-entity collision shape with cached world bounds

use super::bounds::Bounds;
use crate::foundation::math::Vector;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Edge length of the box given to [`ColliderShape::Point`]
pub const POINT_SIZE: f32 = 0.01;

/// Shape tag selecting the bounds rule and the narrow-phase resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Zero-volume projectile marker
    Point,
    /// Axis-aligned box; the only shape that carries roles
    Aabb,
    /// Sphere sized from the largest extent
    Sphere,
    /// The player vehicle's sphere
    PlayerSphere,
}

bitflags! {
    /// Behaviour flags for [`ColliderShape::Aabb`] colliders
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ColliderRoles: u8 {
        /// Walkable surface; bodies settle on its top face
        const GROUND = 1 << 0;
        /// Blocking wall along X or Z
        const WALL = 1 << 1;
        /// Scoring volume that consumes plain boxes
        const TRIGGER = 1 << 2;
    }
}

/// Collision descriptor owned by an entity.
///
/// World bounds and radius are derived state, recomputed every tick by
/// [`Collider::update_bounds`] from the owner's position and visual size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    shape: ColliderShape,
    roles: ColliderRoles,
    bounds: Bounds,
    radius: f32,
    offset: Vector,
    scale_fallback: Vector,
    impact_force: f32,
}

impl Collider {
    fn with_shape(shape: ColliderShape) -> Self {
        Self {
            shape,
            roles: ColliderRoles::empty(),
            bounds: Bounds::default(),
            radius: 0.0,
            offset: Vector::ZERO,
            scale_fallback: Vector::ONE,
            impact_force: 0.0,
        }
    }

    /// Projectile marker pushing boxes with `impact_force` when it lands inside one
    pub fn point(impact_force: f32) -> Self {
        Self {
            impact_force,
            ..Self::with_shape(ColliderShape::Point)
        }
    }

    /// Axis-aligned box with the given roles
    pub fn aabb(roles: ColliderRoles) -> Self {
        Self {
            roles,
            ..Self::with_shape(ColliderShape::Aabb)
        }
    }

    /// Sphere collider
    pub fn sphere() -> Self {
        Self::with_shape(ColliderShape::Sphere)
    }

    /// Player sphere whose center sits at `offset` from the owner's position
    pub fn player_sphere(offset: Vector) -> Self {
        Self {
            offset,
            ..Self::with_shape(ColliderShape::PlayerSphere)
        }
    }

    /// Size used when the owner has no visual extent
    pub fn with_scale_fallback(mut self, scale: Vector) -> Self {
        self.scale_fallback = scale;
        self
    }

    /// Shape tag
    pub fn shape(&self) -> ColliderShape {
        self.shape
    }

    /// Role flags (always empty for non-box shapes)
    pub fn roles(&self) -> ColliderRoles {
        self.roles
    }

    /// `true` for a box with none of the role flags set
    pub fn is_plain_box(&self) -> bool {
        self.shape == ColliderShape::Aabb && self.roles.is_empty()
    }

    /// Cached world bounds from the last update
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cached radius (0 for Point and Aabb)
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Cached world center
    pub fn center(&self) -> Vector {
        self.bounds.center
    }

    /// Offset from the owner's position to the collider center
    pub(crate) fn center_offset(&self) -> Vector {
        match self.shape {
            ColliderShape::PlayerSphere => self.offset,
            _ => Vector::ZERO,
        }
    }

    /// Impulse magnitude applied by a Point collider
    pub fn impact_force(&self) -> f32 {
        self.impact_force
    }

    /// Inclusive containment test against the cached bounds
    pub fn contains(&self, point: Vector) -> bool {
        self.bounds.contains(point)
    }

    /// Recompute bounds and radius from the owner's world position and its
    /// visual extent, falling back to the configured scale.
    pub fn update_bounds(&mut self, position: Vector, visual_extent: Option<Vector>) {
        let size = visual_extent.unwrap_or(self.scale_fallback);
        let center = match self.shape {
            ColliderShape::PlayerSphere => position + self.offset,
            _ => position,
        };

        let (box_size, radius) = match self.shape {
            ColliderShape::Point => (Vector::splat(POINT_SIZE), 0.0),
            ColliderShape::Aabb => (size, 0.0),
            ColliderShape::Sphere => {
                let radius = size.max_component() * 0.5;
                (Vector::splat(radius * 2.0), radius)
            }
            // Only the X extent counts; fragile for non-uniform models but
            // gameplay tuning depends on it
            ColliderShape::PlayerSphere => (Vector::splat(size.x * 2.0), size.x),
        };

        self.bounds = Bounds::new(Vector::new(center.x, center.y, center.z), box_size);
        self.radius = radius;
    }
}
