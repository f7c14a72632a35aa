use crate::entity::Entity;

/// Errors returned by scene mutations that name a specific entity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("Entity {0} is not alive")]
    DeadEntity(Entity),

    #[error("Name {0:?} is already used by entity {1}")]
    DuplicateName(String, Entity),
}
