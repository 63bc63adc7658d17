use wm_core::{BlockPos, WorldId};

use crate::material::Material;

/// Read access to the voxel grid of one or more worlds.
///
/// Implemented by the host game. The safety predicate carries the
/// game-specific rules — solid footing, enough vertical headroom for an
/// entity, and no hazardous material (lava, the void, etc.).
pub trait VoxelWorld {
    /// The material category occupying the given voxel.
    fn material(&self, world: WorldId, pos: BlockPos) -> Material;

    /// Whether an entity can safely stand at the given voxel.
    fn is_safe(&self, world: WorldId, pos: BlockPos) -> bool;
}

/// The outcome of a safe-location search.
///
/// A coordinate is present exactly when the search succeeded, so the
/// "position iff not NONE" invariant is carried by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeSearch {
    /// The (height-adjusted) origin itself is safe.
    Original(BlockPos),
    /// A safe position was found within the radius.
    Safe(BlockPos),
    /// No safe position exists within the radius.
    None,
}

impl SafeSearch {
    /// The found position, if any.
    pub fn position(self) -> Option<BlockPos> {
        match self {
            Self::Original(pos) | Self::Safe(pos) => Some(pos),
            Self::None => None,
        }
    }
}

/// Find the closest safe position to `origin`, within `radius` blocks.
///
/// Every candidate is height-adjusted first: a position occupied by a
/// partial-height material ([`Material::is_partial_height`]) is raised one
/// block, since an entity can occupy such a block without being enclosed.
///
/// If the adjusted origin is already safe, the search returns
/// [`SafeSearch::Original`] immediately without consulting the radius.
/// Otherwise positions are examined in shells of increasing Chebyshev
/// distance, and within a shell in lexicographic `(dx, dy, dz)` order, so
/// the scan is deterministic and reproducible. No examined or returned
/// position ever lies farther than `radius` from the origin.
pub fn find_safe(
    voxels: &impl VoxelWorld,
    world: WorldId,
    origin: BlockPos,
    radius: u32,
) -> SafeSearch {
    let origin = adjust_height(voxels, world, origin);
    if voxels.is_safe(world, origin) {
        return SafeSearch::Original(origin);
    }

    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    for shell in 1..=r {
        for dx in -shell..=shell {
            for dy in -shell..=shell {
                for dz in -shell..=shell {
                    // Only the shell surface; inner offsets were examined in
                    // earlier iterations.
                    if dx.abs().max(dy.abs()).max(dz.abs()) != shell {
                        continue;
                    }
                    let candidate =
                        adjust_height(voxels, world, origin.offset(dx, dy, dz));
                    // A raised candidate may leave the radius; skip it rather
                    // than violate the bound.
                    if candidate.chebyshev_distance(origin) > radius {
                        continue;
                    }
                    if voxels.is_safe(world, candidate) {
                        return SafeSearch::Safe(candidate);
                    }
                }
            }
        }
    }
    SafeSearch::None
}

/// Raise a position one block if it sits inside a partial-height material.
fn adjust_height(voxels: &impl VoxelWorld, world: WorldId, pos: BlockPos) -> BlockPos {
    if voxels.material(world, pos).is_partial_height() {
        pos.up()
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use proptest::prelude::*;

    use super::*;

    /// A small in-memory voxel grid: everything is `Solid` unless overridden,
    /// and only listed positions are safe.
    struct Grid {
        world: WorldId,
        materials: HashMap<BlockPos, Material>,
        safe: HashSet<BlockPos>,
    }

    impl Grid {
        fn new(world: WorldId) -> Self {
            Self {
                world,
                materials: HashMap::new(),
                safe: HashSet::new(),
            }
        }

        fn set_material(&mut self, pos: BlockPos, material: Material) {
            self.materials.insert(pos, material);
        }

        fn mark_safe(&mut self, pos: BlockPos) {
            self.safe.insert(pos);
        }
    }

    impl VoxelWorld for Grid {
        fn material(&self, world: WorldId, pos: BlockPos) -> Material {
            assert_eq!(world, self.world);
            self.materials.get(&pos).copied().unwrap_or(Material::Solid)
        }

        fn is_safe(&self, world: WorldId, pos: BlockPos) -> bool {
            assert_eq!(world, self.world);
            self.safe.contains(&pos)
        }
    }

    #[test]
    fn safe_origin_returns_original_without_searching() {
        let world = WorldId::new();
        let origin = BlockPos::new(0, 64, 0);
        let mut grid = Grid::new(world);
        grid.mark_safe(origin);
        assert_eq!(
            find_safe(&grid, world, origin, 0),
            SafeSearch::Original(origin)
        );
    }

    #[test]
    fn radius_zero_unsafe_origin_returns_none() {
        let world = WorldId::new();
        let origin = BlockPos::new(0, 64, 0);
        let grid = Grid::new(world);
        assert_eq!(find_safe(&grid, world, origin, 0), SafeSearch::None);
    }

    #[test]
    fn partial_height_origin_is_raised_before_testing() {
        let world = WorldId::new();
        let origin = BlockPos::new(0, 64, 0);
        let mut grid = Grid::new(world);
        grid.set_material(origin, Material::Stairs);
        grid.mark_safe(origin.up());
        assert_eq!(
            find_safe(&grid, world, origin, 0),
            SafeSearch::Original(origin.up())
        );
    }

    #[test]
    fn finds_nearest_shell_first() {
        let world = WorldId::new();
        let origin = BlockPos::new(0, 64, 0);
        let mut grid = Grid::new(world);
        let near = origin.offset(1, 0, 0);
        let far = origin.offset(2, 0, 0);
        grid.mark_safe(near);
        grid.mark_safe(far);
        assert_eq!(find_safe(&grid, world, origin, 3), SafeSearch::Safe(near));
    }

    #[test]
    fn scan_order_within_a_shell_is_lexicographic() {
        let world = WorldId::new();
        let origin = BlockPos::new(0, 64, 0);
        let mut grid = Grid::new(world);
        // Both in shell 1; (-1, 0, 0) precedes (1, 0, 0) in (dx, dy, dz) order.
        grid.mark_safe(origin.offset(1, 0, 0));
        grid.mark_safe(origin.offset(-1, 0, 0));
        assert_eq!(
            find_safe(&grid, world, origin, 1),
            SafeSearch::Safe(origin.offset(-1, 0, 0))
        );
    }

    #[test]
    fn never_returns_outside_radius() {
        let world = WorldId::new();
        let origin = BlockPos::new(0, 64, 0);
        let mut grid = Grid::new(world);
        grid.mark_safe(origin.offset(3, 0, 0));
        assert_eq!(find_safe(&grid, world, origin, 2), SafeSearch::None);
        assert_eq!(
            find_safe(&grid, world, origin, 3),
            SafeSearch::Safe(origin.offset(3, 0, 0))
        );
    }

    #[test]
    fn raised_candidate_that_leaves_radius_is_skipped() {
        let world = WorldId::new();
        let origin = BlockPos::new(0, 64, 0);
        let mut grid = Grid::new(world);
        // The candidate at the top edge of the radius is a slab; raising it
        // would land outside the radius, so its safe head position must not
        // be returned.
        let edge = origin.offset(0, 1, 0);
        grid.set_material(edge, Material::Slab);
        grid.mark_safe(edge.up());
        assert_eq!(find_safe(&grid, world, origin, 1), SafeSearch::None);
    }

    proptest! {
        #[test]
        fn every_result_lies_within_the_radius(
            safe_offsets in proptest::collection::vec((-5i32..=5, -5i32..=5, -5i32..=5), 0..8),
            radius in 0u32..=4,
        ) {
            let world = WorldId::new();
            let origin = BlockPos::new(0, 64, 0);
            let mut grid = Grid::new(world);
            for (dx, dy, dz) in safe_offsets {
                grid.mark_safe(origin.offset(dx, dy, dz));
            }
            if let Some(pos) = find_safe(&grid, world, origin, radius).position() {
                prop_assert!(pos.chebyshev_distance(origin) <= radius);
            }
        }
    }
}
