//! Hit points for destructible entities

/// Hit points; projectile hits remove one point each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Full health with `max` points
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Remaining points
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Starting points
    pub fn max(&self) -> i32 {
        self.max
    }

    /// `true` once no points remain
    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Remove `amount` points, never going below zero; returns what is left
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.current = (self.current - amount).max(0);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut health = Health::new(2);
        assert_eq!(health.take_damage(1), 1);
        assert!(!health.is_depleted());
        assert_eq!(health.take_damage(5), 0);
        assert!(health.is_depleted());
        assert_eq!(health.max(), 2);
    }
}
