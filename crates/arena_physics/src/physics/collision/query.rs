//! Spatial queries against the registered colliders
//!
//! Rays are continuous and unbounded except for a maximum distance. Segments
//! cover `start..end` only and serve discrete trajectory prediction.

use super::CollisionEngine;
use crate::foundation::math::constants::EPSILON;
use crate::foundation::math::{Axis, Vector};
use crate::physics::bounds::Bounds;
use crate::physics::collider::{Collider, ColliderRoles, ColliderShape};
use crate::scene::{EntityId, EntityStore};

/// Ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vector,
    /// Unit direction
    pub direction: Vector,
}

impl Ray {
    /// Create a ray; `direction` is normalized
    pub fn new(origin: Vector, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vector {
        self.origin + self.direction * t
    }
}

/// Nearest ray hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Entity that was hit
    pub entity: EntityId,
    /// Distance from the ray origin
    pub distance: f32,
    /// Hit point in world space
    pub point: Vector,
    /// Outward surface normal at the hit point
    pub normal: Vector,
}

/// First segment hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Entity that was hit
    pub entity: EntityId,
    /// Fraction of the segment travelled, in `[0, 1]`
    pub fraction: f32,
    /// Hit point in world space
    pub point: Vector,
}

/// Nearest non-negative root of `|origin + t * direction - center| = radius`
pub fn intersect_ray_sphere(ray: &Ray, center: Vector, radius: f32) -> Option<f32> {
    let (t1, t2) = sphere_roots(ray.origin, ray.direction, center, radius)?;
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// First point of `start..end` on the sphere surface, if any
pub fn segment_intersects_sphere(start: Vector, end: Vector, center: Vector, radius: f32) -> Option<Vector> {
    segment_sphere_fraction(start, end, center, radius).map(|t| start + (end - start) * t)
}

/// First point of `start..end` touching the box, if any
pub fn segment_intersects_aabb(start: Vector, end: Vector, bounds: &Bounds) -> Option<Vector> {
    bounds.intersect_segment(start, end)
}

fn segment_sphere_fraction(start: Vector, end: Vector, center: Vector, radius: f32) -> Option<f32> {
    let (t1, t2) = sphere_roots(start, end - start, center, radius)?;
    [t1, t2].into_iter().find(|t| (0.0..=1.0).contains(t))
}

fn segment_aabb_fraction(start: Vector, end: Vector, bounds: &Bounds) -> Option<f32> {
    let (t_enter, t_exit) = bounds.slab_interval(start, end - start)?;
    let t_enter = t_enter.max(0.0);
    (t_enter <= t_exit.min(1.0)).then_some(t_enter)
}

/// Both roots of the ray-sphere quadratic, smaller first
fn sphere_roots(origin: Vector, direction: Vector, center: Vector, radius: f32) -> Option<(f32, f32)> {
    let a = direction.dot(&direction);
    if a < EPSILON {
        return None;
    }

    let oc = origin - center;
    let b = 2.0 * oc.dot(&direction);
    let c = oc.dot(&oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    Some((
        (-b - sqrt_discriminant) / (2.0 * a),
        (-b + sqrt_discriminant) / (2.0 * a),
    ))
}

/// Normal of the box face nearest to `point`
fn box_face_normal(bounds: &Bounds, point: Vector) -> Vector {
    let local = point - bounds.center;
    let extents = bounds.extents();

    let mut best = (Axis::X, f32::NEG_INFINITY);
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let half = extents.component(axis);
        if half <= 0.0 {
            continue;
        }
        let depth = local.component(axis).abs() / half;
        if depth > best.1 {
            best = (axis, depth);
        }
    }

    let (axis, _) = best;
    let side = if local.component(axis) >= 0.0 { 1.0 } else { -1.0 };
    Vector::ZERO.with_component(axis, side)
}

fn is_sphere_like(shape: ColliderShape) -> bool {
    matches!(shape, ColliderShape::Sphere | ColliderShape::PlayerSphere)
}

impl CollisionEngine {
    /// Active, registered colliders other than `ignore`
    fn candidates<'s>(
        &'s self,
        entities: &'s EntityStore,
        ignore: Option<EntityId>,
    ) -> impl Iterator<Item = (EntityId, &'s Collider)> + 's {
        self.registry
            .iter()
            .copied()
            .filter(move |&id| Some(id) != ignore)
            .filter_map(move |id| {
                let entity = entities.get(id)?;
                if !entity.is_active() {
                    return None;
                }
                entity.collider.as_ref().map(|collider| (id, collider))
            })
    }

    /// Nearest hit with `0 <= distance < max_distance`.
    ///
    /// Point colliders never block rays. `filter` restricts hits to one
    /// shape; `ignore` excludes a single entity, usually the shooter.
    pub fn raycast(
        &self,
        entities: &EntityStore,
        origin: Vector,
        direction: Vector,
        max_distance: f32,
        filter: Option<ColliderShape>,
        ignore: Option<EntityId>,
    ) -> Option<RayHit> {
        let ray = Ray::new(origin, direction);
        let mut nearest: Option<RayHit> = None;

        for (id, collider) in self.candidates(entities, ignore) {
            let shape = collider.shape();
            if shape == ColliderShape::Point || filter.is_some_and(|wanted| wanted != shape) {
                continue;
            }

            let hit = if is_sphere_like(shape) {
                intersect_ray_sphere(&ray, collider.center(), collider.radius()).map(|t| {
                    let point = ray.point_at(t);
                    let outward = point - collider.center();
                    let normal = if outward.magnitude() < EPSILON {
                        -ray.direction
                    } else {
                        outward.normalize()
                    };
                    (t, point, normal)
                })
            } else {
                let bounds = collider.bounds();
                bounds.intersect_ray(ray.origin, ray.direction).map(|t| {
                    let point = ray.point_at(t);
                    (t, point, box_face_normal(&bounds, point))
                })
            };

            let Some((distance, point, normal)) = hit else {
                continue;
            };
            if distance >= max_distance {
                continue;
            }
            if nearest.map_or(true, |best| distance < best.distance) {
                nearest = Some(RayHit {
                    entity: id,
                    distance,
                    point,
                    normal,
                });
            }
        }

        if let Some(hit) = &nearest {
            log::trace!("Raycast hit {:?} at {}", hit.entity, hit.distance);
        }
        nearest
    }

    /// First collider touched by the segment `start..end`, points excluded
    pub fn segment_cast(
        &self,
        entities: &EntityStore,
        start: Vector,
        end: Vector,
        ignore: Option<EntityId>,
    ) -> Option<SegmentHit> {
        let mut first: Option<SegmentHit> = None;

        for (id, collider) in self.candidates(entities, ignore) {
            let shape = collider.shape();
            let fraction = match shape {
                ColliderShape::Point => continue,
                _ if is_sphere_like(shape) => {
                    segment_sphere_fraction(start, end, collider.center(), collider.radius())
                }
                _ => segment_aabb_fraction(start, end, &collider.bounds()),
            };

            let Some(fraction) = fraction else {
                continue;
            };
            if first.map_or(true, |best| fraction < best.fraction) {
                first = Some(SegmentHit {
                    entity: id,
                    fraction,
                    point: start + (end - start) * fraction,
                });
            }
        }
        first
    }

    /// Move `proposed` so the sphere of `moving` no longer overlaps any wall.
    ///
    /// `proposed` is the entity position; the collider offset is applied
    /// internally. Entities without a collider are returned unchanged.
    pub fn clamp_to_bounds(&self, entities: &EntityStore, moving: EntityId, proposed: Vector) -> Vector {
        let Some(entity) = entities.get(moving) else {
            return proposed;
        };
        let Some(collider) = entity.collider.as_ref() else {
            return proposed;
        };

        let offset = collider.center_offset();
        let radius = collider.radius();
        let mut center = proposed + offset;

        for (_, wall) in self.candidates(entities, Some(moving)) {
            if wall.shape() != ColliderShape::Aabb || !wall.roles().contains(ColliderRoles::WALL) {
                continue;
            }
            center = push_out_of_box(&wall.bounds(), center, radius);
        }

        center - offset
    }
}

/// Sphere center moved clear of `bounds`, or unchanged when not overlapping
fn push_out_of_box(bounds: &Bounds, center: Vector, radius: f32) -> Vector {
    let closest = bounds.closest_point(center);
    let outward = center - closest;
    let distance = outward.magnitude();

    if distance >= radius {
        return center;
    }
    if distance >= EPSILON {
        return center + outward / distance * (radius - distance);
    }

    // center inside the box: leave along the horizontal axis with the
    // shallower penetration, on the side the center is already on
    let extents = bounds.extents();
    let local = center - bounds.center;
    let pen_x = extents.x + radius - local.x.abs();
    let pen_z = extents.z + radius - local.z.abs();
    let axis = if pen_x < pen_z { Axis::X } else { Axis::Z };
    let side = if local.component(axis) >= 0.0 { 1.0 } else { -1.0 };
    let face = bounds.center.component(axis) + side * (extents.component(axis) + radius);
    center.with_component(axis, face)
}
