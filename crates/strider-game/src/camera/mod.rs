//! Camera system module
//!
//! Provides a third-person orbit camera with mouse look and wheel zoom.

mod config;
mod controller;

pub use config::CameraConfig;
pub use controller::{
    OrbitCameraController, DEFAULT_TARGET_NAME, FOLLOW_SMOOTHING, LOOK_AT_HEIGHT,
    MIN_CAMERA_HEIGHT, WHEEL_ZOOM_SCALE,
};
