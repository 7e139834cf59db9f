//! Headless arena demo: a player vehicle circles the arena, firing at
//! enemies that chase it, while crates get pushed around and scored.
//!
//! Usage: `arena_demo [config.toml|config.ron]`

mod arena;
mod config;
mod demo;
mod game_state;

use arena_physics::foundation::logging;
use config::AppConfig;
use demo::ArenaDemo;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1);
    let config = AppConfig::load(path.as_deref());
    logging::init_with_level(&config.simulation.engine.log_level);

    log::info!("Starting arena demo");
    let mut demo = ArenaDemo::new(config);

    match demo.run() {
        Ok(finish) => {
            log::info!(
                "Arena demo finished ({:?}): score {}, hits {}",
                finish,
                demo.state().score(),
                demo.state().hits()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Arena demo failed: {:?}", e);
            Err(e.into())
        }
    }
}
