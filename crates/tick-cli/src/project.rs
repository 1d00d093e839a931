//! `.tick` project directory discovery and initialization.

use std::path::{Path, PathBuf};

/// Name of the project data directory.
pub const TICK_DIR: &str = ".tick";

/// Walk up from `start` looking for a `.tick` directory.
#[must_use]
pub fn find_tick_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(TICK_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Path of the persisted task collection inside a project directory.
#[must_use]
pub fn tasks_path(tick_dir: &Path) -> PathBuf {
    tick_dir.join("tasks.json")
}

/// Path of the configuration file inside a project directory.
#[must_use]
pub fn config_path(tick_dir: &Path) -> PathBuf {
    tick_dir.join("config.toml")
}

/// Create the `.tick` directory under `root`, returning its path and whether
/// it was freshly created.
///
/// # Errors
///
/// Fails when the directory cannot be created.
pub fn init_dir(root: &Path) -> anyhow::Result<(PathBuf, bool)> {
    let dir = root.join(TICK_DIR);
    if dir.is_dir() {
        return Ok((dir, false));
    }
    std::fs::create_dir_all(&dir)?;
    Ok((dir, true))
}
