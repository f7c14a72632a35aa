//! Frame time for Strider
//!
//! The host delivers elapsed time in milliseconds; controllers work in seconds.

use serde::{Deserialize, Serialize};

/// Smallest step handed to per-frame integration, in seconds.
///
/// Paused or hitched frames report zero or negative deltas; they are raised to
/// this floor so integration never divides time away.
pub const MIN_DELTA_SECONDS: f32 = 0.001;

/// Convert a host frame delta in milliseconds to seconds, floored at
/// [`MIN_DELTA_SECONDS`].
pub fn delta_seconds(delta_ms: f32) -> f32 {
    // max() also maps NaN to the floor
    (delta_ms / 1000.0).max(MIN_DELTA_SECONDS)
}

/// Configuration for game time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

/// Game time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Scaled delta time for this frame in seconds
    pub delta_time: f32,
    /// Unscaled delta time in seconds
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether the game is paused
    pub paused: bool,
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update with the raw host delta (milliseconds) from the previous frame
    pub fn update(&mut self, delta_ms: f32) {
        self.unscaled_delta_time = (delta_ms / 1000.0).max(0.0);
        self.frame_count += 1;

        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
    }

    /// Pause the game
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the game
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_seconds_floor() {
        assert!((delta_seconds(16.0) - 0.016).abs() < 1e-6);
        assert_eq!(delta_seconds(0.0), MIN_DELTA_SECONDS);
        assert_eq!(delta_seconds(-40.0), MIN_DELTA_SECONDS);
        assert_eq!(delta_seconds(f32::NAN), MIN_DELTA_SECONDS);
    }

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(16.0);

        assert!((time.delta_time - 0.016).abs() < 1e-6);
        assert_eq!(time.frame_count, 1);

        time.pause();
        time.update(16.0);
        assert_eq!(time.delta_time, 0.0);
        assert_eq!(time.frame_count, 2);

        time.resume();
        time.set_time_scale(2.0);
        time.update(10.0);
        assert!((time.delta_time - 0.02).abs() < 1e-6);
        assert!((time.total_time - 0.036).abs() < 1e-6);
    }
}
