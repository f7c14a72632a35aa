//! Movement configuration and constants

use serde::{Deserialize, Serialize};

/// Vertical acceleration applied every frame, in units/s²
pub const GRAVITY: f32 = -20.0;

/// Height of the ground plane the player rests on
pub const GROUND_Y: f32 = 0.5;

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Top horizontal speed in units per second
    pub max_speed: f32,
    /// Blend rate toward the desired horizontal velocity, per second
    pub acceleration: f32,
    /// Vertical velocity set by a jump
    pub jump_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 4.0,
            acceleration: 12.0,
            jump_speed: 6.0,
        }
    }
}

impl MovementConfig {
    /// Lerp factor toward the desired velocity for a frame of `dt` seconds.
    ///
    /// Saturates at 1 for long frames, snapping straight to the desired
    /// velocity instead of overshooting.
    pub fn blend_factor(&self, dt: f32) -> f32 {
        (self.acceleration * dt).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_factor_saturates() {
        let config = MovementConfig::default();
        assert!((config.blend_factor(0.016) - 0.192).abs() < 1e-6);
        assert_eq!(config.blend_factor(0.5), 1.0);
    }
}
