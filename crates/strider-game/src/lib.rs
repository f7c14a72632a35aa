//! Strider Game - per-frame controllers
//!
//! Provides keyboard movement with gravity and jumping, a third-person orbit
//! camera, and the input tracking both read from.

pub mod camera;
pub mod input;
pub mod player;

pub use camera::{CameraConfig, OrbitCameraController};
pub use input::{
    InputAction, InputBindings, InputHandler, InputSource, InputState, PointerDelta, SharedInput,
};
pub use player::{MovementConfig, PlayerController};
