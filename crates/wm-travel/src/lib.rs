//! Safe-location search and dependent-carrying teleportation for Waymark.
//!
//! Operates on capability traits ([`VoxelWorld`], [`EntityWorld`]) that the
//! host game implements, so game-specific material rules and entity state
//! stay external. Everything here runs synchronously on the world-update
//! execution context; nothing blocks or spawns.

/// Travel configuration passed explicitly at call time.
pub mod config;
/// Error types for the travel crate.
pub mod error;
/// The travel event log.
pub mod event;
/// Voxel material categories and the partial-height table.
pub mod material;
/// Bounded expanding search for a safe standing position.
pub mod search;
/// The teleport executor and its capability traits.
pub mod teleport;

/// Re-export of [`config::TravelConfig`].
pub use config::TravelConfig;
/// Re-export of error types.
pub use error::{TravelError, TravelResult};
/// Re-export of event types.
pub use event::{TravelEvent, TravelEventKind, TravelLog};
/// Re-export of [`material::Material`].
pub use material::Material;
/// Re-export of search types.
pub use search::{SafeSearch, VoxelWorld, find_safe};
/// Re-export of teleport types.
pub use teleport::{EntityId, EntityWorld, TeleportStatus, Teleporter};
