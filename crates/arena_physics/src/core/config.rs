//! # Simulation Configuration
//!
//! Tunable constants for the physics core plus the engine-level settings the
//! host loop reads at startup. Every struct has working defaults, so a missing
//! or partial config file never blocks a run.
//!
//! ## Configuration Categories
//!
//! - **Physics Config**: gravity and collision-response magnitudes
//! - **Engine Config**: logging and frame pacing

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use crate::config::{Config, ConfigError};

/// # Physics Configuration
///
/// Constants consumed by the integrator and the collision resolvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity along +Y in units/s² (negative pulls down)
    pub gravity: f32,
    /// Scale applied to the reflected relative velocity between two plain boxes
    pub pair_impulse_scale: f32,
    /// Impulse given to a sphere that hits the player
    pub knockback_force: f32,
    /// Impulse given to a plain box the player drives into
    pub push_force: f32,
}

impl PhysicsConfig {
    /// Create a physics configuration with the default constants
    pub fn new() -> Self {
        Self {
            gravity: -9.81,
            pair_impulse_scale: 0.1,
            knockback_force: 12.0,
            push_force: 4.0,
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the box-box impulse scale
    pub fn with_pair_impulse_scale(mut self, scale: f32) -> Self {
        self.pair_impulse_scale = scale;
        self
    }

    /// Set player contact impulses
    pub fn with_player_forces(mut self, knockback: f32, push: f32) -> Self {
        self.knockback_force = knockback;
        self.push_force = push;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.is_finite() {
            return Err(format!("Gravity must be finite, got {}", self.gravity));
        }
        for (name, value) in [
            ("pair_impulse_scale", self.pair_impulse_scale),
            ("knockback_force", self.knockback_force),
            ("push_force", self.push_force),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Host-loop behaviour: logging and frame pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Target FPS for frame rate limiting
    pub target_fps: Option<u32>,
    /// Largest time step fed to the simulation, in seconds
    pub max_frame_time: f32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: Some(60),
            max_frame_time: 0.1,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Run without frame pacing
    pub fn unlimited(mut self) -> Self {
        self.target_fps = None;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Simulation Configuration
///
/// Top-level configuration loaded by the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Physics constants
    pub physics: PhysicsConfig,
}

impl SimulationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.physics.validate()?;
        let step = self.engine.max_frame_time;
        if !step.is_finite() || step <= 0.0 {
            return Err(format!("max_frame_time must be positive, got {step}"));
        }
        Ok(())
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(reason) => {
                    log::warn!("Ignoring invalid config {}: {}", path.display(), reason);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not load config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

impl Config for SimulationConfig {}
