// Report module for rendering scan and resolution results

use crate::constants::{self, SCHEMA_VERSION};
use crate::metadata::ModRecord;
use crate::resolver::MissingDependencies;
use crate::scanner::ScanResult;
use serde::Serialize;
use std::collections::HashSet;

const WIDTH: usize = 80;
const TITLE: &str = "modfix - Diagnostic Report";

/// Dependency tree of every mod, sorted by display name
///
/// Platform ids are hidden; each dependency is marked installed (✓) or not (✗)
/// and tagged REQUIRED or optional.
pub fn dependency_tree(records: &[ModRecord]) -> String {
    let installed_ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let mut sorted: Vec<&ModRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut lines = vec!["DEPENDENCY TREE".to_string(), "=".repeat(WIDTH)];

    for record in sorted {
        let versions: Vec<&str> = record.platform_versions.iter().map(String::as_str).collect();
        lines.push(String::new());
        lines.push(record.to_string());
        lines.push(format!(
            "   Loader: {} | MC: {}",
            record.loader.as_str().to_uppercase(),
            versions.join(", ")
        ));
        lines.push(format!("   File: {}", record.file_name()));

        if record.dependencies.is_empty() {
            lines.push("   Dependencies: None".to_string());
            continue;
        }

        lines.push("   Dependencies:".to_string());
        for dep in record
            .dependencies
            .iter()
            .filter(|dep| !constants::is_reserved(&dep.target_id))
        {
            let status = if installed_ids.contains(dep.target_id.as_str()) {
                "✓"
            } else {
                "✗"
            };
            let tag = if dep.required { "REQUIRED" } else { "optional" };
            lines.push(format!(
                "      {} {} {} ({})",
                status, dep.target_id, dep.version_constraint, tag
            ));
        }
    }

    finish(lines)
}

/// Full text report: detected platform, missing dependencies, optional tree
pub fn format_report(
    scan: &ScanResult,
    missing: Option<&MissingDependencies>,
    tree: Option<&str>,
) -> String {
    let rule = "=".repeat(WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!("{:^width$}", TITLE, width = WIDTH),
        rule.clone(),
        String::new(),
        format!("Mods scanned: {}", scan.records.len()),
    ];

    if let Some(version) = &scan.detected_platform_version {
        lines.push(format!("Minecraft Version: {}", version));
    }
    if let Some(loader) = &scan.detected_loader {
        lines.push(format!("Mod Loader: {}", loader.as_str().to_uppercase()));
    }
    if !scan.skipped.is_empty() {
        lines.push(format!("Unreadable jars: {}", scan.skipped.len()));
    }

    let missing = missing.filter(|m| !m.is_empty());
    if let Some(missing) = missing {
        lines.extend(missing_lines(missing, scan.detected_platform_version.as_deref()));
    }

    if let Some(tree) = tree {
        lines.push(String::new());
        lines.extend(tree.lines().map(str::to_string));
    }

    if missing.is_none() {
        lines.push(String::new());
        lines.push("✓ No missing dependencies detected".to_string());
    }

    lines.extend([
        String::new(),
        rule.clone(),
        "Tips:".to_string(),
        "   • Always use mods for the same Minecraft version".to_string(),
        "   • Don't mix Forge and Fabric mods".to_string(),
        "   • Check Modrinth/CurseForge for mod compatibility".to_string(),
        "   • Read mod descriptions for required dependencies".to_string(),
        rule,
    ]);

    finish(lines)
}

fn missing_lines(missing: &MissingDependencies, mc_version: Option<&str>) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "MISSING DEPENDENCIES".to_string(),
        "=".repeat(WIDTH),
    ];

    for (mod_id, deps) in missing {
        lines.push(String::new());
        lines.push(format!("✗ {} is missing:", mod_id));

        for dep in deps {
            let requirement = &dep.requirement;
            lines.push(format!(
                "   → {} {}",
                requirement.target_id, requirement.version_constraint
            ));

            let Some(artifact) = &dep.artifact else {
                lines.push("      ⚠ Search manually on Modrinth or CurseForge".to_string());
                continue;
            };

            lines.push(format!("      Mod: {}", artifact.display_name));
            lines.push(format!("      Mod Page: {}", artifact.page_url));
            match &artifact.release {
                Some(release) => {
                    lines.push(format!(
                        "      Version: {} (MC: {})",
                        release.version_number,
                        release.compatible_platform_versions.join(", ")
                    ));
                    lines.push(format!("      Version Page: {}", release.version_page_url));
                    if let Some(url) = &release.download_url {
                        lines.push(format!("      Direct Download: {}", url));
                    }
                }
                None => lines.push(format!(
                    "      ⚠ No compatible version found for MC {}",
                    mc_version.unwrap_or(constants::WILDCARD)
                )),
            }
        }
    }

    lines
}

/// Join report lines, ending with a newline
fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Machine-readable scan result for `scan --json`
#[derive(Debug, Serialize)]
pub struct ScanDocument<'a> {
    /// Schema version for the JSON output format.
    /// See constants::SCHEMA_VERSION for the current version.
    pub schema_version: u32,
    pub minecraft_version: Option<&'a str>,
    pub loader: Option<&'a str>,
    pub mods: &'a [ModRecord],
    pub missing_dependencies: Option<&'a MissingDependencies>,
}

impl<'a> ScanDocument<'a> {
    pub fn new(scan: &'a ScanResult, missing: Option<&'a MissingDependencies>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            minecraft_version: scan.detected_platform_version.as_deref(),
            loader: scan.detected_loader.map(|l| l.as_str()),
            mods: &scan.records,
            missing_dependencies: missing,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
