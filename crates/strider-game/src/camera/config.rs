//! Camera configuration

use serde::{Deserialize, Serialize};

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting distance from the target
    pub distance: f32,
    /// Closest zoom distance
    pub min_distance: f32,
    /// Farthest zoom distance
    pub max_distance: f32,
    /// Mouse sensitivity (radians per device unit)
    pub sensitivity: f32,
    /// Pitch limit in degrees, applied symmetrically above and below the horizon
    pub pitch_limit_deg: f32,
    /// Per-frame lerp factor for yaw, pitch and distance (0-1, lower = smoother)
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 6.0,
            min_distance: 2.0,
            max_distance: 12.0,
            sensitivity: 0.002,
            pitch_limit_deg: 80.0,
            smoothing: 0.12,
        }
    }
}

impl CameraConfig {
    /// Pitch limit in radians
    pub fn pitch_limit_rad(&self) -> f32 {
        self.pitch_limit_deg.abs().to_radians()
    }

    /// Clamp a pitch angle (radians) to the configured limit
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        let limit = self.pitch_limit_rad();
        pitch.max(-limit).min(limit)
    }

    /// Clamp a distance to `[min_distance, max_distance]`.
    ///
    /// A misconfigured range with `max < min` collapses to `min`.
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.min(self.max_distance).max(self.min_distance)
    }
}
