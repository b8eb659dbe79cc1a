// Tree command for printing the dependency tree of a mods folder

use crate::{report, scanner, ui};
use std::path::Path;

pub fn tree(mods_dir: &Path) -> anyhow::Result<i32> {
    super::ensure_mods_dir(mods_dir)?;
    super::notice_missing_capabilities();

    let result = scanner::scan(mods_dir);
    ui::text(&report::dependency_tree(&result.records));

    Ok(0)
}
