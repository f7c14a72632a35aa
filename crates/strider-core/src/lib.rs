//! Strider Core - Core types and utilities shared by the Strider crates
//!
//! This crate provides:
//! - Mathematical primitives (re-exported from glam)
//! - Transform component for entity positioning and orientation
//! - Frame time tracking and millisecond-to-second conversion

pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use time::{delta_seconds, GameTime, TimeConfig, MIN_DELTA_SECONDS};
pub use types::{lerp, Transform};
