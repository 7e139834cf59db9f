//! Frame timing for the variable-step simulation loop

use std::time::{Duration, Instant};

/// Wall-clock frame timer.
///
/// Each [`FrameTimer::tick`] reports the time since the previous tick. The
/// value is passed to the simulation as-is; spikes are not clamped.
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance to the next frame and return its duration in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.record(now.duration_since(self.last_frame));
        self.last_frame = now;
        self.delta_time
    }

    fn record(&mut self, elapsed: Duration) {
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Duration of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total time accumulated over all ticks
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut timer = FrameTimer::new();
        timer.record(Duration::from_millis(250));
        timer.record(Duration::from_millis(750));

        assert_eq!(timer.frame_count(), 2);
        assert!((timer.delta_time() - 0.75).abs() < 1e-6);
        assert!((timer.total_time() - 1.0).abs() < 1e-6);
        assert!((timer.average_fps() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_tick_is_non_negative() {
        let mut timer = FrameTimer::new();
        assert!(timer.tick() >= 0.0);
        assert_eq!(timer.frame_count(), 1);
    }
}
