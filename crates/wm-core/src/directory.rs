use std::collections::HashMap;

use crate::error::{WarpError, WarpResult};
use crate::location::WorldId;
use crate::warp::{PlayerId, Visibility, Warp};

/// The central warp store. Owns all warp records.
///
/// Names are unique ignoring case; all lookups are case-insensitive.
/// Readers that need a consistent view while the directory is being mutated
/// elsewhere take an owned [`snapshot`](WarpDirectory::snapshot).
#[derive(Debug, Clone, Default)]
pub struct WarpDirectory {
    warps: HashMap<String, Warp>,
}

impl WarpDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            warps: HashMap::new(),
        }
    }

    /// Build a directory from a deserialized snapshot of warp records.
    ///
    /// Fails on the first duplicate name (ignoring case).
    pub fn from_warps(warps: impl IntoIterator<Item = Warp>) -> WarpResult<Self> {
        let mut directory = Self::new();
        for warp in warps {
            directory.add(warp)?;
        }
        Ok(directory)
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Add a warp. Rejects names already taken ignoring case.
    pub fn add(&mut self, warp: Warp) -> WarpResult<()> {
        let key = warp.name.to_lowercase();
        if self.warps.contains_key(&key) {
            return Err(WarpError::DuplicateName(warp.name.clone()));
        }
        self.warps.insert(key, warp);
        Ok(())
    }

    /// Get a warp by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Warp> {
        self.warps.get(&name.to_lowercase())
    }

    /// Get a mutable warp by name (case-insensitive).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Warp> {
        self.warps.get_mut(&name.to_lowercase())
    }

    /// Remove a warp by name (case-insensitive).
    pub fn remove(&mut self, name: &str) -> WarpResult<Warp> {
        self.warps
            .remove(&name.to_lowercase())
            .ok_or_else(|| WarpError::UnknownWarp(name.to_string()))
    }

    /// Whether a warp with the given name exists (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.warps.contains_key(&name.to_lowercase())
    }

    /// Count one visit on the named warp.
    pub fn record_visit(&mut self, name: &str) -> WarpResult<()> {
        self.get_mut(name)
            .ok_or_else(|| WarpError::UnknownWarp(name.to_string()))?
            .record_visit();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Iterate over all warps, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Warp> {
        self.warps.values()
    }

    /// An owned, filtered copy of the directory's warps.
    ///
    /// This is the consistent view handed to resolution: the caller keeps
    /// reading the copy while the directory mutates underneath.
    pub fn snapshot(&self, filter: impl Fn(&Warp) -> bool) -> Vec<Warp> {
        let mut warps: Vec<Warp> = self.warps.values().filter(|w| filter(w)).cloned().collect();
        warps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        warps
    }

    /// All warps in the given world.
    pub fn in_world(&self, world: WorldId) -> Vec<&Warp> {
        self.warps
            .values()
            .filter(|w| w.location().world == world)
            .collect()
    }

    /// All warps created by the given player.
    pub fn created_by(&self, creator: PlayerId) -> Vec<&Warp> {
        self.warps
            .values()
            .filter(|w| w.is_creator(creator))
            .collect()
    }

    /// All warp names, sorted case-insensitively.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.warps.values().map(|w| w.name.clone()).collect();
        names.sort_by_key(|n| n.to_lowercase());
        names
    }

    /// Export all warps as a sorted list, e.g. for writing a snapshot file.
    pub fn to_warps(&self) -> Vec<Warp> {
        self.snapshot(|_| true)
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// The number of warps in the directory.
    pub fn len(&self) -> usize {
        self.warps.len()
    }

    /// Whether the directory holds no warps.
    pub fn is_empty(&self) -> bool {
        self.warps.is_empty()
    }

    /// The number of warps with the given visibility.
    pub fn count_by_visibility(&self, visibility: Visibility) -> usize {
        self.warps
            .values()
            .filter(|w| w.visibility() == visibility)
            .count()
    }
}
