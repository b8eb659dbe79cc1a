// Command implementations for the CLI

pub mod scan;
pub mod tree;

use crate::ui;
use std::path::Path;

/// Fail with a clear message when the mods folder does not exist
fn ensure_mods_dir(mods_dir: &Path) -> anyhow::Result<()> {
    if !mods_dir.is_dir() {
        anyhow::bail!("Mods folder not found: {}", mods_dir.display());
    }
    Ok(())
}

/// Tell the user once when optional manifest support was compiled out
fn notice_missing_capabilities() {
    if cfg!(not(feature = "mods-toml")) {
        ui::warning(
            "Built without mods.toml support; Forge mods are read from mcmod.info or raw fields only",
        );
    }
}
