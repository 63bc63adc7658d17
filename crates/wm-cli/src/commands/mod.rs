pub mod list;
pub mod resolve;
pub mod show;
pub mod suggest;

use std::fs;
use std::path::Path;

use wm_core::{Warp, WarpDirectory};

/// Load a JSON snapshot (a `Vec<Warp>`) into a directory.
///
/// The whole snapshot is read up front; duplicate names (ignoring case)
/// are rejected the same way the in-game directory rejects them.
fn load_snapshot(path: &Path) -> Result<WarpDirectory, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let warps: Vec<Warp> = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid snapshot {}: {e}", path.display()))?;
    WarpDirectory::from_warps(warps).map_err(|e| e.to_string())
}
