use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    /// Generate a new random world ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A continuous position within a world, in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// East/west coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// North/south coordinate.
    pub z: f64,
}

impl Position {
    /// Create a position from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to another position.
    pub fn distance_squared(&self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: Position) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// A view direction: pitch (up/down) and yaw (compass heading), in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    /// Vertical angle in degrees, negative looks up.
    pub pitch: f32,
    /// Horizontal angle in degrees.
    pub yaw: f32,
}

impl Rotation {
    /// Create a rotation from pitch and yaw.
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }
}

/// A full warp destination: world, position, and view direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarpLocation {
    /// The world the destination lies in.
    pub world: WorldId,
    /// The exact position within the world.
    pub position: Position,
    /// The view direction applied after arrival.
    pub rotation: Rotation,
}

impl WarpLocation {
    /// Create a location from world, position, and rotation.
    pub fn new(world: WorldId, position: Position, rotation: Rotation) -> Self {
        Self {
            world,
            position,
            rotation,
        }
    }

    /// The voxel containing this location's position.
    pub fn block(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }

    /// This location moved to the horizontal center of the given voxel,
    /// keeping the original rotation.
    pub fn centered_on(&self, block: BlockPos) -> WarpLocation {
        WarpLocation {
            world: self.world,
            position: Position::new(
                f64::from(block.x) + 0.5,
                f64::from(block.y),
                f64::from(block.z) + 0.5,
            ),
            rotation: self.rotation,
        }
    }
}

/// An integer voxel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// East/west voxel index.
    pub x: i32,
    /// Vertical voxel index.
    pub y: i32,
    /// North/south voxel index.
    pub z: i32,
}

impl BlockPos {
    /// Create a voxel coordinate from its components.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The voxel containing a continuous position.
    #[allow(clippy::cast_possible_truncation)]
    pub fn containing(pos: Position) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
            z: pos.z.floor() as i32,
        }
    }

    /// This voxel shifted by the given offsets.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The voxel directly above this one.
    pub fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// Chebyshev (chessboard) distance to another voxel.
    pub fn chebyshev_distance(self, other: BlockPos) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
