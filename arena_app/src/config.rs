//! Demo configuration: simulation settings plus arena layout and tuning

use arena_physics::config::Config;
use arena_physics::core::config::SimulationConfig;
use serde::{Deserialize, Serialize};

/// Arena layout and actor tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Half the edge length of the square floor
    pub half_size: f32,
    /// Hostile spheres spawned at start
    pub enemy_count: usize,
    /// Pushable crates spawned at start
    pub crate_count: usize,
    /// Hit points per enemy
    pub enemy_health: i32,
    /// Player driving speed, units/s
    pub player_speed: f32,
    /// Player turn rate, rad/s
    pub player_turn_rate: f32,
    /// Enemy steering acceleration, units/s²
    pub enemy_acceleration: f32,
    /// Enemy horizontal speed cap, units/s
    pub enemy_max_speed: f32,
    /// Seconds between shots
    pub fire_interval: f32,
    /// Muzzle speed, units/s
    pub projectile_speed: f32,
    /// Seconds before an airborne projectile is removed
    pub projectile_lifetime: f32,
    /// Push applied by a projectile landing inside a crate
    pub projectile_impact: f32,
    /// Simulated seconds before the demo stops
    pub duration: f32,
    /// RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_size: 15.0,
            enemy_count: 4,
            crate_count: 6,
            enemy_health: 3,
            player_speed: 6.0,
            player_turn_rate: 0.4,
            enemy_acceleration: 3.0,
            enemy_max_speed: 2.5,
            fire_interval: 0.75,
            projectile_speed: 18.0,
            projectile_lifetime: 3.0,
            projectile_impact: 3.0,
            duration: 20.0,
            seed: None,
        }
    }
}

/// Everything the demo reads from its config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Engine and physics settings
    pub simulation: SimulationConfig,
    /// Arena layout and tuning
    pub arena: ArenaConfig,
}

impl Config for AppConfig {}

impl AppConfig {
    /// Load `path` if given, falling back to defaults on any failure
    pub fn load(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load_from_file(path) {
            Ok(config) => match config.simulation.validate() {
                Ok(()) => {
                    log::info!("Loaded config from {}", path);
                    config
                }
                Err(reason) => {
                    log::warn!("Ignoring invalid config {}: {}", path, reason);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not load config {}: {}; using defaults", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_toml_overrides() {
        let text = "[simulation.physics]\ngravity = -4.0\n\n[arena]\nenemy_count = 1\nseed = 7\n";
        let config: AppConfig = toml::from_str(text).unwrap();
        assert_eq!(config.simulation.physics.gravity, -4.0);
        assert_eq!(config.arena.enemy_count, 1);
        assert_eq!(config.arena.seed, Some(7));
        assert_eq!(config.arena.crate_count, ArenaConfig::default().crate_count);
    }

    #[test]
    fn test_missing_path_uses_defaults() {
        assert_eq!(AppConfig::load(None), AppConfig::default());
        assert_eq!(AppConfig::load(Some("missing/arena.ron")), AppConfig::default());
    }
}
