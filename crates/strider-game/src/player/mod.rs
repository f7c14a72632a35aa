//! Player controller module
//!
//! Provides camera-relative keyboard movement with jumping, gravity and a flat
//! ground plane.

mod controller;
mod movement;

pub use controller::PlayerController;
pub use movement::{MovementConfig, GRAVITY, GROUND_Y};
