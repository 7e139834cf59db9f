//! Headless demo loop
//!
//! Per frame: drive the player, steer enemies, fire, step the world, apply
//! game-state consequences, then move the camera. The camera runs last so it
//! always sees the final pose of the frame.

use crate::arena::{Arena, PLAYER_OFFSET};
use crate::config::AppConfig;
use crate::game_state::GameState;
use arena_physics::foundation::math::{constants::EPSILON, rotation, Vector};
use arena_physics::foundation::time::FrameTimer;
use arena_physics::physics::{Collider, ColliderShape, RigidBody, SegmentHit};
use arena_physics::scene::{Entity, EntityId, SceneError, Transform, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Range of the target-lock ray
const LOCK_RANGE: f32 = 40.0;
/// Time slice per segment of the trajectory preview
const PREVIEW_STEP: f32 = 0.05;
/// Segments in the trajectory preview
const PREVIEW_SEGMENTS: usize = 40;
/// Upward muzzle velocity added to every shot
const LOFT: f32 = 2.0;
/// Projectiles below this height are discarded
const KILL_HEIGHT: f32 = -5.0;

struct Projectile {
    id: EntityId,
    age: f32,
}

/// Why the demo stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Configured duration elapsed
    TimeUp,
    /// Every enemy was destroyed
    Cleared,
    /// The player was destroyed
    GameOver,
}

/// Demo state: the world plus the collaborators that drive it
pub struct ArenaDemo {
    config: AppConfig,
    world: World,
    arena: Arena,
    state: GameState,
    rng: StdRng,
    camera: Transform,
    heading: f32,
    fire_cooldown: f32,
    projectiles: Vec<Projectile>,
}

impl ArenaDemo {
    /// Build the world and arena from `config`
    pub fn new(config: AppConfig) -> Self {
        let mut rng = match config.arena.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = World::new(config.simulation.physics.clone());
        let arena = Arena::build(&mut world, &config.arena, &mut rng);

        Self {
            config,
            world,
            arena,
            state: GameState::new(),
            rng,
            camera: Transform::identity(),
            heading: 0.0,
            fire_cooldown: 0.0,
            projectiles: Vec::new(),
        }
    }

    /// Game state so far
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The simulated world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Run until the duration elapses, the arena is cleared or the player dies
    pub fn run(&mut self) -> Result<Finish, SceneError> {
        let engine = &self.config.simulation.engine;
        let frame_budget = engine.target_fps.map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps.max(1))));
        let max_step = engine.max_frame_time;
        let mut timer = FrameTimer::new();

        loop {
            let frame_start = Instant::now();
            let dt = timer.tick().min(max_step);

            if let Some(finish) = self.advance(dt)? {
                log::info!(
                    "Finished ({:?}) after {:.1}s: score {}, hits {}, {} frames at {:.0} fps",
                    finish,
                    self.world.elapsed(),
                    self.state.score(),
                    self.state.hits(),
                    timer.frame_count(),
                    timer.average_fps()
                );
                return Ok(finish);
            }

            if timer.frame_count() % 60 == 0 {
                log::info!(
                    "t={:.1}s score={} enemies={} projectiles={}",
                    self.world.elapsed(),
                    self.state.score(),
                    self.arena.enemies.len(),
                    self.projectiles.len()
                );
            }

            if let Some(budget) = frame_budget {
                if let Some(remaining) = budget.checked_sub(frame_start.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
        }
    }

    /// Advance one frame of `dt` seconds; returns why the demo ended, if it did
    pub fn advance(&mut self, dt: f32) -> Result<Option<Finish>, SceneError> {
        self.drive_player(dt)?;
        self.steer_enemies(dt);
        self.fire(dt);

        self.world.step(dt, &mut self.state)?;

        self.remove_defeated();
        self.expire_projectiles(dt);
        self.follow_camera();

        let finish = if self.state.is_game_over() {
            Some(Finish::GameOver)
        } else if self.arena.enemies.is_empty() && self.config.arena.enemy_count > 0 {
            Some(Finish::Cleared)
        } else if self.world.elapsed() >= self.config.arena.duration {
            Some(Finish::TimeUp)
        } else {
            None
        };
        Ok(finish)
    }

    fn player_forward(&self) -> Vector {
        Vector::new(self.heading.sin(), 0.0, self.heading.cos())
    }

    fn player_alive(&self) -> bool {
        self.world.get(self.arena.player).is_some_and(Entity::is_active)
    }

    /// Drive a wide circle, sliding along walls instead of entering them
    fn drive_player(&mut self, dt: f32) -> Result<(), SceneError> {
        if !self.player_alive() {
            return Ok(());
        }

        self.heading += self.config.arena.player_turn_rate * dt;
        let forward = self.player_forward();
        let player = self.arena.player;

        let current = self.world.entity(player)?.world_position();
        let proposed = current + forward * (self.config.arena.player_speed * dt);
        let corrected = self.world.clamp_to_bounds(player, proposed);
        self.world.move_to(player, corrected)?;

        if let Some(entity) = self.world.get_mut(player) {
            entity.transform.rotation = rotation::from_euler(self.heading, 0.0, 0.0);
        }
        Ok(())
    }

    /// Accelerate enemies toward the player along the floor
    fn steer_enemies(&mut self, dt: f32) {
        let Some(target) = self.world.get(self.arena.player).map(Entity::world_position) else {
            return;
        };
        let arena = &self.config.arena;

        for &id in &self.arena.enemies {
            let Some(entity) = self.world.get_mut(id) else {
                continue;
            };
            let mut toward = target - entity.world_position();
            toward.y = 0.0;
            if toward.magnitude() < EPSILON {
                continue;
            }
            let direction = toward.normalize();

            if let Some(body) = entity.rigid_body.as_mut() {
                body.apply_impulse(direction * (arena.enemy_acceleration * dt));

                let mut velocity = body.velocity();
                let vertical = velocity.y;
                velocity.y = 0.0;
                let speed = velocity.magnitude();
                if speed > arena.enemy_max_speed {
                    let mut capped = velocity * (arena.enemy_max_speed / speed);
                    capped.y = vertical;
                    body.set_velocity(capped);
                }
            }
            entity.transform.rotation = rotation::look_rotation(direction, Vector::UP);
        }
    }

    /// Fire at a locked enemy, or straight ahead when nothing is in range
    fn fire(&mut self, dt: f32) {
        self.fire_cooldown -= dt;
        if self.fire_cooldown > 0.0 || !self.player_alive() {
            return;
        }
        self.fire_cooldown = self.config.arena.fire_interval;

        let player = self.arena.player;
        let Some(origin) = self.world.get(player).map(Entity::world_position) else {
            return;
        };
        let muzzle = origin + PLAYER_OFFSET;
        let forward = self.player_forward();

        let aim = match self
            .world
            .raycast(muzzle, forward, LOCK_RANGE, Some(ColliderShape::Sphere), Some(player))
        {
            Some(lock) => {
                log::debug!("Locked {:?} at {:.1}", lock.entity, lock.distance);
                (lock.point - muzzle).normalize()
            }
            None => forward,
        };

        let spread = Vector::new(self.rng.gen_range(-0.05..0.05), 0.0, self.rng.gen_range(-0.05..0.05));
        let velocity = (aim + spread) * self.config.arena.projectile_speed + Vector::UP * LOFT;

        if let Some(hit) = self.predict_impact(muzzle, velocity, player) {
            log::debug!("Shot will land on {:?} at {:?}", hit.entity, hit.point);
        }

        let id = self.world.spawn(
            Entity::new("shot")
                .with_rigid_body(RigidBody::new(muzzle).with_velocity(velocity).as_projectile())
                .with_collider(Collider::point(self.config.arena.projectile_impact)),
        );
        self.projectiles.push(Projectile { id, age: 0.0 });
    }

    /// March the ballistic arc in short segments and report the first hit
    fn predict_impact(&self, start: Vector, velocity: Vector, shooter: EntityId) -> Option<SegmentHit> {
        let gravity = Vector::UP * self.world.config().gravity;
        let mut position = start;
        let mut velocity = velocity;

        for _ in 0..PREVIEW_SEGMENTS {
            velocity = velocity + gravity * PREVIEW_STEP;
            let next = position + velocity * PREVIEW_STEP;
            if let Some(hit) = self.world.segment_cast(position, next, Some(shooter)) {
                return Some(hit);
            }
            position = next;
        }
        None
    }

    fn remove_defeated(&mut self) {
        for id in self.state.take_defeated() {
            if let Some(entity) = self.world.destroy(id) {
                log::info!("{} defeated", entity.name);
            }
            self.arena.enemies.retain(|&enemy| enemy != id);
        }
    }

    fn expire_projectiles(&mut self, dt: f32) {
        let lifetime = self.config.arena.projectile_lifetime;
        let world = &mut self.world;

        self.projectiles.retain_mut(|shot| {
            let Some(entity) = world.get(shot.id) else {
                return false;
            };
            shot.age += dt;
            if shot.age > lifetime || entity.world_position().y < KILL_HEIGHT {
                world.destroy(shot.id);
                return false;
            }
            true
        });
    }

    /// Chase camera behind and above the player
    fn follow_camera(&mut self) {
        let Some(target) = self.world.get(self.arena.player).map(Entity::world_position) else {
            return;
        };
        self.camera.position = target - self.player_forward() * 8.0 + Vector::UP * 4.0;
        self.camera.look_at(target + PLAYER_OFFSET);
        log::trace!("Camera at {:?} facing {:?}", self.camera.position, self.camera.forward());
    }
}
