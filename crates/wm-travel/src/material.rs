use serde::{Deserialize, Serialize};

/// Revision of the partial-height table. Bump when game updates introduce
/// new sub-height block categories.
pub const PARTIAL_HEIGHT_TABLE_REVISION: u32 = 1;

/// A broad category of voxel material, as reported by the host game.
///
/// Only the categories the travel logic distinguishes are listed; anything
/// else maps to [`Material::Other`]. Whether a material offers footing or is
/// hazardous stays game-side, behind the injected safety predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Empty space.
    Air,
    /// A generic full-height solid block.
    Solid,
    /// Still or flowing water.
    Water,
    /// Still or flowing lava.
    Lava,
    /// A bed.
    Bed,
    /// A half-height slab.
    Slab,
    /// Any stair block.
    Stairs,
    /// A regular chest.
    Chest,
    /// A trapped chest.
    TrappedChest,
    /// An ender chest.
    EnderChest,
    /// A placed cake.
    Cake,
    /// A closed trapdoor.
    Trapdoor,
    /// An enchanting table.
    EnchantingTable,
    /// A brewing stand.
    BrewingStand,
    /// A cauldron.
    Cauldron,
    /// A mounted skull.
    Skull,
    /// A daylight detector.
    DaylightDetector,
    /// Any material the travel logic does not distinguish.
    Other,
}

/// The explicit table of solid materials shorter than one full block.
///
/// An entity can stand "inside" such a block without being enclosed, so a
/// position occupied by one of these is raised one block before any safety
/// test. Kept as data, not scattered conditionals, so it can be extended and
/// property-tested on its own.
pub const PARTIAL_HEIGHT: &[Material] = &[
    Material::Bed,
    Material::Slab,
    Material::Stairs,
    Material::Chest,
    Material::TrappedChest,
    Material::EnderChest,
    Material::Cake,
    Material::Trapdoor,
    Material::EnchantingTable,
    Material::BrewingStand,
    Material::Cauldron,
    Material::Skull,
    Material::DaylightDetector,
];

impl Material {
    /// Whether this material is solid but less than one full block tall.
    pub fn is_partial_height(self) -> bool {
        PARTIAL_HEIGHT.contains(&self)
    }
}
