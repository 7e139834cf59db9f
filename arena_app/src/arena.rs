//! Arena construction: floor, walls, goal, crates, enemies and the player

use crate::config::ArenaConfig;
use arena_physics::foundation::math::Vector;
use arena_physics::physics::{Collider, ColliderRoles, RigidBody};
use arena_physics::scene::{Entity, EntityId, Health, World};
use rand::Rng;

const WALL_THICKNESS: f32 = 1.0;
const WALL_HEIGHT: f32 = 3.0;

/// Player sphere center above the vehicle origin
pub const PLAYER_OFFSET: Vector = Vector::new(0.0, 0.5, 0.0);

/// Handles to the actors the demo drives each frame
#[derive(Debug, Clone)]
pub struct Arena {
    /// The player vehicle
    pub player: EntityId,
    /// The goal trigger
    pub goal: EntityId,
    /// Enemies still alive
    pub enemies: Vec<EntityId>,
    /// Pushable crates
    pub crates: Vec<EntityId>,
}

impl Arena {
    /// Spawn a full arena into `world`
    pub fn build(world: &mut World, config: &ArenaConfig, rng: &mut impl Rng) -> Self {
        let half = config.half_size;
        spawn_floor(world, half);
        spawn_walls(world, half);

        let goal = world.spawn(
            Entity::new("goal")
                .with_position(Vector::new(0.0, 0.5, -half + 2.0))
                .with_visual_extent(Vector::new(4.0, 1.0, 2.0))
                .with_collider(Collider::aabb(ColliderRoles::TRIGGER)),
        );

        let spread = (half - 3.0).max(1.0);
        let crates = (0..config.crate_count)
            .map(|i| {
                let position = Vector::new(rng.gen_range(-spread..spread), 0.5, rng.gen_range(-spread..spread));
                world.spawn(
                    Entity::new(format!("crate_{i}"))
                        .with_visual_extent(Vector::ONE)
                        .with_rigid_body(RigidBody::new(position))
                        .with_collider(Collider::aabb(ColliderRoles::empty())),
                )
            })
            .collect();

        let enemies = (0..config.enemy_count)
            .map(|i| {
                let position = Vector::new(rng.gen_range(-spread..spread), 3.0, rng.gen_range(-spread..0.0));
                world.spawn(
                    Entity::new(format!("enemy_{i}"))
                        .with_visual_extent(Vector::splat(1.2))
                        .with_rigid_body(RigidBody::new(position).with_bounce(0.3, 0.5))
                        .with_collider(Collider::sphere())
                        .with_health(Health::new(config.enemy_health)),
                )
            })
            .collect();

        let player = world.spawn(
            Entity::new("player")
                .with_visual_extent(Vector::new(0.6, 1.0, 1.6))
                .with_rigid_body(RigidBody::new(Vector::new(0.0, 0.0, half * 0.5)).with_gravity(false))
                .with_collider(Collider::player_sphere(PLAYER_OFFSET)),
        );

        log::info!(
            "Arena built: {} crates, {} enemies, {} colliders",
            config.crate_count,
            config.enemy_count,
            world.collision().len()
        );

        Self {
            player,
            goal,
            enemies,
            crates,
        }
    }
}

fn spawn_floor(world: &mut World, half: f32) {
    world.spawn(
        Entity::new("floor")
            .with_position(Vector::new(0.0, -0.5, 0.0))
            .with_visual_extent(Vector::new(half * 2.0, 1.0, half * 2.0))
            .with_collider(Collider::aabb(ColliderRoles::GROUND)),
    );
}

fn spawn_walls(world: &mut World, half: f32) {
    let offset = half + WALL_THICKNESS * 0.5;
    let span = half * 2.0 + WALL_THICKNESS * 2.0;
    let y = WALL_HEIGHT * 0.5;

    let walls = [
        ("wall_east", Vector::new(offset, y, 0.0), Vector::new(WALL_THICKNESS, WALL_HEIGHT, span)),
        ("wall_west", Vector::new(-offset, y, 0.0), Vector::new(WALL_THICKNESS, WALL_HEIGHT, span)),
        ("wall_north", Vector::new(0.0, y, -offset), Vector::new(span, WALL_HEIGHT, WALL_THICKNESS)),
        ("wall_south", Vector::new(0.0, y, offset), Vector::new(span, WALL_HEIGHT, WALL_THICKNESS)),
    ];

    for (name, position, extent) in walls {
        world.spawn(
            Entity::new(name)
                .with_position(position)
                .with_visual_extent(extent)
                .with_collider(Collider::aabb(ColliderRoles::WALL)),
        );
    }
}
