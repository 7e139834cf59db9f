//! Explicit rigid-body integrator and collision-response primitives
//!
//! Bodies are point masses: no mass, no inertia, no angular state. External
//! forces only enter through [`RigidBody::apply_impulse`]; the collision
//! engine is the only caller of the response primitives.

use crate::foundation::math::{rotation, transform, Axis, MathError, Quaternion, Vector};

/// Vertical gap kept above the ground while a body is still bouncing
pub const GROUND_CLEARANCE: f32 = 0.01;

/// Speed above which projectiles re-orient along their velocity
pub const PROJECTILE_FACING_SPEED: f32 = 0.01;

/// Semi-implicit Euler body
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    position: Vector,
    velocity: Vector,
    acceleration: Vector,
    facing: Option<Quaternion>,
    /// Whether gravity is added each tick
    pub use_gravity: bool,
    /// Fraction of speed kept after a bounce; 0 means slide/stop
    pub bounciness: f32,
    /// Speed at or below which a bounce comes to rest
    pub rest_threshold: f32,
    /// Re-orient along velocity each tick (visual only)
    pub is_projectile: bool,
}

impl RigidBody {
    /// Body at `position` with gravity, no bounce and a 0.1 rest threshold
    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            acceleration: Vector::ZERO,
            facing: None,
            use_gravity: true,
            bounciness: 0.0,
            rest_threshold: 0.1,
            is_projectile: false,
        }
    }

    /// Builder: enable or disable gravity
    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.use_gravity = enabled;
        self
    }

    /// Builder: bounciness and rest threshold
    pub fn with_bounce(mut self, bounciness: f32, rest_threshold: f32) -> Self {
        self.bounciness = bounciness;
        self.rest_threshold = rest_threshold;
        self
    }

    /// Builder: mark as a projectile
    pub fn as_projectile(mut self) -> Self {
        self.is_projectile = true;
        self
    }

    /// Builder: initial velocity
    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Current position
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Teleport the body
    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    /// Current velocity
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
    }

    /// Acceleration applied during the last tick
    pub fn acceleration(&self) -> Vector {
        self.acceleration
    }

    /// Orientation derived from velocity for projectiles, if any
    pub fn facing(&self) -> Option<Quaternion> {
        self.facing
    }

    /// Add `impulse` to the velocity unconditionally
    pub fn apply_impulse(&mut self, impulse: Vector) {
        self.velocity = self.velocity + impulse;
    }

    /// Advance one tick of `dt` seconds with gravity `gravity` along +Y
    pub fn integrate(&mut self, dt: f32, gravity: f32) -> Result<(), MathError> {
        self.acceleration = Vector::ZERO;
        if self.use_gravity {
            self.acceleration = self.acceleration + Vector::UP * gravity;
        }

        self.velocity = self.velocity + self.acceleration * dt;
        self.position = transform::translation(self.velocity * dt).transform_point(self.position)?;

        if self.is_projectile && self.velocity.magnitude() > PROJECTILE_FACING_SPEED {
            self.facing = Some(rotation::from_to_rotation(Vector::UNIT_Z, self.velocity.normalize()));
        }

        Ok(())
    }

    /// Push out along `normal` by `penetration`, then bounce or slide if the
    /// body is still moving into the contact.
    pub fn resolve_sphere_collision(&mut self, normal: Vector, penetration: f32) {
        self.position = self.position + normal * penetration;

        let into = self.velocity.dot(&normal);
        if into < 0.0 {
            if self.bounciness > 0.0 {
                self.velocity = self.velocity.reflect(&normal) * self.bounciness;
            } else {
                self.velocity = self.velocity - normal * into;
            }
        }
    }

    /// Bounce off a ground plane at `ground_height`; settles flush on it once
    /// the rebound speed drops to the rest threshold.
    pub fn stop_on_ground(&mut self, normal: Vector, ground_height: f32, half_height: f32) {
        if self.bounce(normal) {
            self.position.y = ground_height + half_height;
        } else {
            self.position.y = ground_height + half_height + GROUND_CLEARANCE;
        }
    }

    /// Bounce off a wall face at `boundary_pos` along `axis`; only that axis
    /// coordinate is snapped.
    pub fn stop_on_wall(&mut self, normal: Vector, boundary_pos: f32, axis: Axis, half_extent: f32) {
        let flush = boundary_pos + normal.component(axis) * half_extent;
        let snapped = if self.bounce(normal) {
            flush
        } else {
            flush + normal.component(axis) * GROUND_CLEARANCE
        };
        self.position = self.position.with_component(axis, snapped);
    }

    /// Reflect-and-scale; returns `true` when the body came to rest
    fn bounce(&mut self, normal: Vector) -> bool {
        self.velocity = self.velocity.reflect(&normal) * self.bounciness;
        if self.velocity.magnitude() <= self.rest_threshold {
            self.velocity = Vector::ZERO;
            self.acceleration = Vector::ZERO;
            true
        } else {
            false
        }
    }
}
