use crate::teleport::EntityId;

/// Alias for `Result<T, TravelError>`.
pub type TravelResult<T> = Result<T, TravelError>;

/// Errors that can occur when executing a teleport.
#[derive(Debug, thiserror::Error)]
pub enum TravelError {
    /// A teleport for this entity is already executing; overlapping
    /// invocations for the same entity are rejected.
    #[error("teleport already in flight for entity {0}")]
    AlreadyInFlight(EntityId),

    /// The world reported no position for the entity.
    #[error("entity not found in world: {0}")]
    UnknownEntity(EntityId),
}
