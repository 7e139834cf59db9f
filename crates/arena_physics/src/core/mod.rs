//! # Core Module
//!
//! Shared configuration consumed by the physics core and the host loop.

pub mod config;

pub use config::{Config, ConfigError, EngineConfig, PhysicsConfig, SimulationConfig};
