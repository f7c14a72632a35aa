//! Strider Scene - the transform graph the controllers operate on
//!
//! A host engine normally owns the scene. This crate stands in for it with the
//! pieces the controllers touch: generational entity handles, one transform per
//! entity, lookup by name, and the active camera slot.

mod entity;
mod error;
mod scene;

pub use entity::Entity;
pub use error::SceneError;
pub use scene::Scene;
