// Scan command for reporting on a mods folder

use crate::config::LookupConfig;
use crate::report::{self, ScanDocument};
use crate::resolver::{self, MissingDependencies};
use crate::scanner::{self, ScanResult};
use crate::{sources, ui};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ScanOptions {
    pub find_missing: bool,
    pub offline: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub async fn scan(mods_dir: &Path, options: ScanOptions) -> anyhow::Result<i32> {
    super::ensure_mods_dir(mods_dir)?;
    super::notice_missing_capabilities();

    let result = scanner::scan(mods_dir);
    if !options.json {
        announce(&result);
    }

    let missing = if options.find_missing {
        Some(find_missing(&result, options.offline).await)
    } else {
        None
    };

    let body = if options.json {
        ScanDocument::new(&result, missing.as_ref()).to_json()?
    } else {
        let tree = report::dependency_tree(&result.records);
        report::format_report(&result, missing.as_ref(), Some(&tree))
    };

    ui::text(&body);

    if let Some(path) = &options.output {
        fs::write(path, &body)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if !options.json {
            ui::success(&format!("Report saved: {}", path.display()));
        }
    }

    Ok(0)
}

fn announce(result: &ScanResult) {
    if result.is_empty() {
        ui::warning("No readable mods found");
    } else {
        ui::success(&format!("Found {} mod(s)", result.records.len()));
    }
    if let Some(version) = &result.detected_platform_version {
        ui::action(&format!("Detected Minecraft version: {}", version));
    }
    if let Some(loader) = &result.detected_loader {
        ui::action(&format!("Detected loader: {}", loader.as_str().to_uppercase()));
    }
}

async fn find_missing(result: &ScanResult, offline: bool) -> MissingDependencies {
    let mut config = LookupConfig::from_env();
    if offline {
        config = config.offline();
    }
    if !config.enabled {
        ui::warning("Online lookups disabled; missing dependencies will not include download links");
    }

    let lookup = sources::lookup_from_config(&config);
    let spinner = lookup
        .as_ref()
        .map(|_| ui::spinner("Looking up missing dependencies on Modrinth..."));

    let missing = resolver::resolve(result, lookup.as_deref()).await;

    if let Some(spinner) = &spinner {
        ui::clear_spinner(spinner);
    }
    missing
}
