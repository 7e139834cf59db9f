//! Narrow phase and response for each shape pair

use super::CollisionOutcome;
use crate::core::config::PhysicsConfig;
use crate::foundation::math::constants::EPSILON;
use crate::foundation::math::{Axis, Vector};
use crate::physics::bounds::Bounds;
use crate::physics::collider::{Collider, ColliderRoles, ColliderShape};
use crate::physics::events::{CollisionEvent, CollisionEventHandler};
use crate::physics::rigid_body::RigidBody;
use crate::scene::{EntityId, EntityStore};

/// Damage dealt by one projectile point
const POINT_DAMAGE: i32 = 1;

/// Mutable view of the world for the duration of one collision pass
pub(crate) struct Resolver<'a> {
    entities: &'a mut EntityStore,
    config: &'a PhysicsConfig,
    events: &'a mut dyn CollisionEventHandler,
    outcome: CollisionOutcome,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        entities: &'a mut EntityStore,
        config: &'a PhysicsConfig,
        events: &'a mut dyn CollisionEventHandler,
    ) -> Self {
        Self {
            entities,
            config,
            events,
            outcome: CollisionOutcome::default(),
        }
    }

    pub(crate) fn finish(self) -> CollisionOutcome {
        self.outcome
    }

    /// Cached-bounds overlap between two live colliders
    pub(crate) fn broad_phase(&self, a: EntityId, b: EntityId) -> bool {
        match (self.collider(a), self.collider(b)) {
            (Some(ca), Some(cb)) => ca.bounds().intersects(&cb.bounds()),
            _ => false,
        }
    }

    /// Route a pair to its resolver; first match wins
    pub(crate) fn dispatch(&mut self, a: EntityId, b: EntityId) {
        use ColliderShape::{Aabb, PlayerSphere, Point, Sphere};

        let (Some(ca), Some(cb)) = (self.collider(a), self.collider(b)) else {
            return;
        };

        match (ca.shape(), cb.shape()) {
            (PlayerSphere, _) => self.player_contact(a, b),
            (_, PlayerSphere) => self.player_contact(b, a),
            (Point, _) => self.point_contact(a, b),
            (_, Point) => self.point_contact(b, a),
            (Aabb, Aabb) => self.box_box(a, b),
            (Sphere, Sphere) => self.sphere_sphere(a, b),
            (Aabb, Sphere) => self.box_sphere(a, b),
            (Sphere, Aabb) => self.box_sphere(b, a),
        }
    }

    fn box_box(&mut self, a: EntityId, b: EntityId) {
        let (Some(ca), Some(cb)) = (self.collider(a), self.collider(b)) else {
            return;
        };
        let (pa, pb) = ((a, ca), (b, cb));
        if let Some(((trigger, _), (target, _))) = role_pair(pa, pb, ColliderRoles::TRIGGER) {
            self.score(trigger, target);
        } else if let Some(((_, ground), (target, moving))) = role_pair(pa, pb, ColliderRoles::GROUND) {
            self.settle(ground.bounds(), target, moving.bounds().extents().y);
        } else if let Some(((_, wall), (target, moving))) = role_pair(pa, pb, ColliderRoles::WALL) {
            let extents = moving.bounds().extents();
            self.block(wall.bounds(), target, moving.center(), extents.x, extents.z);
        } else if ca.is_plain_box() && cb.is_plain_box() {
            self.exchange_impulse(a, ca.center(), b, cb.center());
        }
    }

    fn sphere_sphere(&mut self, a: EntityId, b: EntityId) {
        let (Some(ca), Some(cb)) = (self.collider(a), self.collider(b)) else {
            return;
        };

        let distance = Vector::distance(ca.center(), cb.center());
        let reach = ca.radius() + cb.radius();
        if distance >= reach || distance < EPSILON {
            return;
        }

        let normal = (ca.center() - cb.center()) / distance;
        let correction = (reach - distance) * 0.5;
        log::trace!("Sphere pair {:?}/{:?} overlaps by {}", a, b, reach - distance);

        if let Some(body) = self.body_mut(a) {
            body.resolve_sphere_collision(normal, correction);
        }
        if let Some(body) = self.body_mut(b) {
            body.resolve_sphere_collision(-normal, correction);
        }
    }

    fn box_sphere(&mut self, boxed: EntityId, sphere: EntityId) {
        let (Some(cb), Some(cs)) = (self.collider(boxed), self.collider(sphere)) else {
            return;
        };

        let center = cs.center();
        let radius = cs.radius();
        let closest = cb.bounds().closest_point(center);
        if Vector::distance(closest, center) > radius {
            return;
        }

        let roles = cb.roles();
        if roles.contains(ColliderRoles::GROUND) {
            self.settle(cb.bounds(), sphere, radius);
        } else if roles.contains(ColliderRoles::WALL) {
            self.block(cb.bounds(), sphere, center, radius, radius);
        } else {
            log::trace!("Box {:?} has no ground or wall role; sphere {:?} passes", boxed, sphere);
        }
    }

    fn player_contact(&mut self, player: EntityId, other: EntityId) {
        let (Some(cp), Some(co)) = (self.collider(player), self.collider(other)) else {
            return;
        };

        match co.shape() {
            ColliderShape::Sphere => {
                let distance = Vector::distance(cp.center(), co.center());
                if distance >= cp.radius() + co.radius() {
                    return;
                }

                if distance >= EPSILON {
                    let away = (co.center() - cp.center()) / distance;
                    let knockback = away * self.config.knockback_force;
                    if let Some(body) = self.body_mut(other) {
                        body.apply_impulse(knockback);
                    }
                }

                if self.deactivate(player) {
                    log::debug!("Player {:?} destroyed by {:?}", player, other);
                    self.events.on_event(&CollisionEvent::PlayerDestroyed { player, by: other });
                }
            }
            ColliderShape::Aabb if co.is_plain_box() => {
                let closest = co.bounds().closest_point(cp.center());
                if Vector::distance(closest, cp.center()) >= cp.radius() {
                    return;
                }

                let push = co.center() - cp.center();
                if push.magnitude() < EPSILON {
                    return;
                }
                let impulse = push.normalize() * self.config.push_force;
                log::trace!("Player {:?} pushes box {:?}", player, other);
                if let Some(body) = self.body_mut(other) {
                    body.apply_impulse(impulse);
                }
            }
            _ => {}
        }
    }

    fn point_contact(&mut self, point: EntityId, other: EntityId) {
        let (Some(cp), Some(co)) = (self.collider(point), self.collider(other)) else {
            return;
        };

        match co.shape() {
            ColliderShape::Sphere => {
                if Vector::distance(cp.center(), co.center()) > co.radius() {
                    return;
                }
                self.destroy(point);

                let health = self.entities.get_mut(other).and_then(|e| e.health.as_mut());
                if let Some(health) = health {
                    let remaining = health.take_damage(POINT_DAMAGE);
                    log::trace!("Point {:?} hit {:?}, {} hit points left", point, other, remaining);
                    self.events.on_event(&CollisionEvent::Damaged { target: other, remaining });
                }
            }
            ColliderShape::Aabb => {
                if !co.contains(cp.center()) {
                    return;
                }

                let toward = co.center() - cp.center();
                if toward.magnitude() >= EPSILON {
                    let impulse = toward.normalize() * cp.impact_force();
                    if let Some(body) = self.body_mut(other) {
                        body.apply_impulse(impulse);
                    }
                }
                self.destroy(point);
            }
            _ => {}
        }
    }

    fn score(&mut self, trigger: EntityId, target: EntityId) {
        if self.destroy(target) {
            log::debug!("Box {:?} scored in trigger {:?}", target, trigger);
            self.events.on_event(&CollisionEvent::Scored { trigger, target });
        }
    }

    /// Stand `target` on the top face of `ground`
    fn settle(&mut self, ground: Bounds, target: EntityId, half_height: f32) {
        if let Some(body) = self.body_mut(target) {
            body.stop_on_ground(Vector::UP, ground.max().y, half_height);
        }
    }

    /// Stop `target` at the face of `wall` with the shallower penetration
    /// along X or Z.
    fn block(&mut self, wall: Bounds, target: EntityId, center: Vector, half_x: f32, half_z: f32) {
        let pen_x = wall.penetration(center, half_x, Axis::X);
        let pen_z = wall.penetration(center, half_z, Axis::Z);
        let (axis, half_extent) = if pen_x < pen_z {
            (Axis::X, half_x)
        } else {
            (Axis::Z, half_z)
        };

        let side = if center.component(axis) >= wall.center.component(axis) {
            1.0
        } else {
            -1.0
        };
        let normal = Vector::ZERO.with_component(axis, side);
        let boundary = wall.center.component(axis) + side * wall.extents().component(axis);

        if let Some(body) = self.body_mut(target) {
            body.stop_on_wall(normal, boundary, axis, half_extent);
        }
    }

    /// Opposing impulses along the center axis, from the reflected
    /// relative velocity.
    fn exchange_impulse(&mut self, a: EntityId, center_a: Vector, b: EntityId, center_b: Vector) {
        let delta = center_b - center_a;
        if delta.magnitude() < EPSILON {
            return;
        }

        let axis = delta.normalize();
        let relative = self.velocity(a) - self.velocity(b);
        let impulse = relative.reflect(&axis) * self.config.pair_impulse_scale;

        if let Some(body) = self.body_mut(a) {
            body.apply_impulse(impulse);
        }
        if let Some(body) = self.body_mut(b) {
            body.apply_impulse(-impulse);
        }
    }

    /// Returns `false` if the entity was already inactive
    fn deactivate(&mut self, id: EntityId) -> bool {
        if !self.take_out(id) {
            return false;
        }
        self.outcome.deactivated.push(id);
        true
    }

    /// Returns `false` if the entity was already inactive
    fn destroy(&mut self, id: EntityId) -> bool {
        if !self.take_out(id) {
            return false;
        }
        self.outcome.destroyed.push(id);
        true
    }

    fn take_out(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(id) {
            Some(entity) if entity.is_active() => {
                entity.set_active(false);
                true
            }
            _ => false,
        }
    }

    /// Collider of a live, active entity
    fn collider(&self, id: EntityId) -> Option<Collider> {
        let entity = self.entities.get(id)?;
        if !entity.is_active() {
            return None;
        }
        entity.collider
    }

    fn velocity(&self, id: EntityId) -> Vector {
        self.entities
            .get(id)
            .and_then(|e| e.rigid_body.as_ref())
            .map_or(Vector::ZERO, RigidBody::velocity)
    }

    fn body_mut(&mut self, id: EntityId) -> Option<&mut RigidBody> {
        self.entities.get_mut(id)?.rigid_body.as_mut()
    }
}

type Tagged = (EntityId, Collider);

/// Orders a box pair as `(flagged, plain)` when one side carries `role` and
/// the other is a plain box.
fn role_pair(a: Tagged, b: Tagged, role: ColliderRoles) -> Option<(Tagged, Tagged)> {
    if a.1.roles().contains(role) && b.1.is_plain_box() {
        Some((a, b))
    } else if b.1.roles().contains(role) && a.1.is_plain_box() {
        Some((b, a))
    } else {
        None
    }
}
