//! Score keeping and game flow, fed by collision events

use arena_physics::physics::{CollisionEvent, CollisionEventHandler};
use arena_physics::scene::EntityId;

/// Score, hits and game-over state for one run
#[derive(Debug, Default, Clone)]
pub struct GameState {
    score: u32,
    hits: u32,
    game_over: bool,
    defeated: Vec<EntityId>,
}

impl GameState {
    /// Fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Crates delivered into the goal
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Projectile hits on enemies
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Set once the player has been destroyed
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Enemies that ran out of health since the last call
    pub fn take_defeated(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.defeated)
    }
}

impl CollisionEventHandler for GameState {
    fn on_event(&mut self, event: &CollisionEvent) {
        match *event {
            CollisionEvent::Scored { target, .. } => {
                self.score += 1;
                log::info!("Crate {:?} delivered, score {}", target, self.score);
            }
            CollisionEvent::PlayerDestroyed { by, .. } => {
                self.game_over = true;
                log::info!("Player destroyed by {:?}", by);
            }
            CollisionEvent::Damaged { target, remaining } => {
                self.hits += 1;
                if remaining <= 0 && !self.defeated.contains(&target) {
                    self.defeated.push(target);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_physics::scene::{Entity, EntityStore};

    #[test]
    fn test_events_update_state() {
        let mut store = EntityStore::with_key();
        let goal = store.insert(Entity::new("goal"));
        let crate_id = store.insert(Entity::new("crate"));
        let enemy = store.insert(Entity::new("enemy"));
        let player = store.insert(Entity::new("player"));

        let mut state = GameState::new();
        state.on_event(&CollisionEvent::Scored { trigger: goal, target: crate_id });
        state.on_event(&CollisionEvent::Damaged { target: enemy, remaining: 1 });
        assert!(state.take_defeated().is_empty());

        state.on_event(&CollisionEvent::Damaged { target: enemy, remaining: 0 });
        state.on_event(&CollisionEvent::Damaged { target: enemy, remaining: 0 });
        assert_eq!(state.take_defeated(), vec![enemy]);
        assert!(state.take_defeated().is_empty());

        assert!(!state.is_game_over());
        state.on_event(&CollisionEvent::PlayerDestroyed { player, by: enemy });
        assert!(state.is_game_over());
        assert_eq!(state.score(), 1);
        assert_eq!(state.hits(), 3);
    }
}
