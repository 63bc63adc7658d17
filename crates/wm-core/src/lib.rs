//! Core types for Waymark: warp records, locations, and the warp directory.
//!
//! This crate defines the data model shared by the matching and travel
//! crates. It is independent of any particular game platform — the directory
//! can be constructed programmatically or deserialized from a JSON snapshot.

/// Actors, intents, and the authorization capability.
pub mod auth;
/// The warp directory that owns all warp records.
pub mod directory;
/// Error types used throughout the crate.
pub mod error;
/// Worlds, positions, rotations, and voxel coordinates.
pub mod location;
/// Warp records and their identities.
pub mod warp;

/// Re-export of authorization types.
pub use auth::{Actor, AuthorizationResolver, Intent, InviteAuthorizer};
/// Re-export of [`directory::WarpDirectory`].
pub use directory::WarpDirectory;
/// Re-export of error types.
pub use error::{WarpError, WarpResult};
/// Re-export of location types.
pub use location::{BlockPos, Position, Rotation, WarpLocation, WorldId};
/// Re-export of warp types.
pub use warp::{PlayerId, Visibility, Warp};
