use anyhow::{bail, Context, Result};
use std::path::Path;

/// Hand `target` to the OS default handler for its type. Spawns detached and
/// does not check that the target exists first.
pub fn open_path(target: &Path) -> Result<()> {
    open::that_detached(target).with_context(|| format!("launch {}", target.display()))
}

/// Show `dir` in the system file browser.
pub fn reveal_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("no such folder: {}", dir.display());
    }
    open::that_detached(dir).with_context(|| format!("open folder {}", dir.display()))
}
