// Forge extractor (META-INF/mods.toml, with mcmod.info and raw-field fallbacks)

use super::extractor::ManifestExtractor;
use super::record::{DependencyRequirement, Loader, ModRecord};
use super::{ModArchive, version};
use crate::constants::{self, FORGE_ID, JAVA_ID, MINECRAFT_ID, WILDCARD};
use log::debug;
use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref TRAILING_COMMA: Regex =
        Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid");
    static ref MOD_ID_FIELD: Regex =
        Regex::new(r#"(?m)^\s*modId\s*=\s*["']([^"']+)["']"#).expect("modId pattern is valid");
    static ref DISPLAY_NAME_FIELD: Regex =
        Regex::new(r#"(?m)^\s*displayName\s*=\s*["']([^"']+)["']"#)
            .expect("displayName pattern is valid");
    static ref VERSION_FIELD: Regex =
        Regex::new(r#"(?m)^\s*version\s*=\s*["']([^"']+)["']"#).expect("version pattern is valid");
}

/// Dependency targets that describe the platform rather than another mod
const EXCLUDED: &[&str] = &[FORGE_ID, MINECRAFT_ID, JAVA_ID];

/// Legacy manifests often capitalize these (`"Forge"`)
fn is_excluded(id: &str) -> bool {
    EXCLUDED.iter().any(|excluded| excluded.eq_ignore_ascii_case(id))
}

pub struct ForgeExtractor;

impl ManifestExtractor for ForgeExtractor {
    fn name(&self) -> &'static str {
        "forge"
    }

    fn extract(&self, archive: &mut ModArchive) -> Option<ModRecord> {
        let Some(text) = archive.read_entry(constants::FORGE_MANIFEST) else {
            return read_mcmod_info(archive);
        };

        match read_mods_toml(archive, &text) {
            Ok(record) => record,
            Err(e) => {
                debug!(
                    "Falling back for {} in {}: {:#}",
                    constants::FORGE_MANIFEST,
                    archive.path().display(),
                    e
                );
                read_mcmod_info(archive).or_else(|| Some(read_raw_fields(archive, &text)))
            }
        }
    }
}

#[cfg(feature = "mods-toml")]
mod mods_toml {
    use indexmap::IndexMap;
    use log::debug;
    use serde::Deserialize;
    use toml::Value;

    #[derive(Debug, Deserialize)]
    pub struct ModsToml {
        #[serde(default)]
        pub mods: Vec<ModEntry>,
        /// `[[dependencies.<modId>]]` tables, keyed by the declaring mod.
        /// Left untyped so one malformed entry does not sink the others.
        #[serde(default)]
        pub dependencies: IndexMap<String, Value>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ModEntry {
        pub mod_id: Option<String>,
        pub display_name: Option<String>,
        pub version: Option<String>,
    }

    pub struct DependencyEntry<'a> {
        pub mod_id: &'a str,
        pub required: bool,
        pub version_range: Option<&'a str>,
    }

    impl<'a> DependencyEntry<'a> {
        /// Read one dependency table; `None` when it names no mod
        fn from_value(value: &'a Value) -> Option<Self> {
            let table = value.as_table()?;
            let mod_id = table.get("modId")?.as_str()?;

            // Newer schema uses `type`: "required", "optional", "incompatible", "discouraged"
            let mandatory = table.get("mandatory").and_then(flag);
            let kind = table.get("type").and_then(Value::as_str);
            let required = match (mandatory, kind) {
                (Some(mandatory), _) => mandatory,
                (None, Some(kind)) => kind.eq_ignore_ascii_case("required"),
                (None, None) => true,
            };

            Some(Self {
                mod_id,
                required,
                version_range: table.get("versionRange").and_then(Value::as_str),
            })
        }
    }

    /// `mandatory` as a boolean, or as the strings "true" / "false"
    fn flag(value: &Value) -> Option<bool> {
        match value {
            Value::Boolean(b) => Some(*b),
            Value::String(s) => s.trim().to_ascii_lowercase().parse().ok(),
            _ => None,
        }
    }

    /// Readable entries of one dependency list. A lone `[dependencies.x]`
    /// table counts as a list of one.
    pub fn entries(value: &Value) -> Vec<DependencyEntry<'_>> {
        let items = match value {
            Value::Array(items) => items.as_slice(),
            other => std::slice::from_ref(other),
        };

        items
            .iter()
            .filter_map(|item| {
                let entry = DependencyEntry::from_value(item);
                if entry.is_none() {
                    debug!("Skipping unreadable dependency entry: {}", item);
                }
                entry
            })
            .collect()
    }
}

/// Parse `mods.toml`. `Ok(None)` means the document is valid but declares no
/// mod; `Err` means the structured parse was not possible.
#[cfg(feature = "mods-toml")]
fn read_mods_toml(archive: &mut ModArchive, text: &str) -> anyhow::Result<Option<ModRecord>> {
    let manifest: mods_toml::ModsToml = toml::from_str(text)?;

    // One mod per jar: only the first [[mods]] entry counts
    let Some(entry) = manifest.mods.into_iter().next() else {
        return Ok(None);
    };
    let mod_id = entry
        .mod_id
        .unwrap_or_else(|| constants::UNKNOWN.to_string());

    let dependencies = manifest
        .dependencies
        .get(&mod_id)
        .map(|deps| {
            mods_toml::entries(deps)
                .into_iter()
                .filter(|dep| !is_excluded(dep.mod_id))
                .map(|dep| {
                    DependencyRequirement::new(
                        dep.mod_id,
                        dep.version_range.unwrap_or(WILDCARD),
                        dep.required,
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let minecraft_range = manifest
        .dependencies
        .values()
        .flat_map(mods_toml::entries)
        .find(|dep| dep.mod_id.eq_ignore_ascii_case(MINECRAFT_ID))
        .map(|dep| dep.version_range.unwrap_or(WILDCARD));

    let version = match entry.version {
        // ${file.jarVersion} is substituted at build time from the jar manifest
        Some(v) if v.contains("${") => archive.implementation_version(),
        other => other,
    };

    Ok(Some(ModRecord {
        id: mod_id,
        name: entry.display_name.unwrap_or_else(|| archive.stem()),
        version: version.unwrap_or_else(|| constants::UNKNOWN.to_string()),
        loader: Loader::Forge,
        platform_versions: version::normalize(minecraft_range),
        dependencies,
        source_path: archive.path().display().to_string(),
    }))
}

#[cfg(not(feature = "mods-toml"))]
fn read_mods_toml(_archive: &mut ModArchive, _text: &str) -> anyhow::Result<Option<ModRecord>> {
    anyhow::bail!("built without mods.toml support")
}

/// Pre-1.13 `mcmod.info`, often hand-written JSON with trailing commas
fn read_mcmod_info(archive: &mut ModArchive) -> Option<ModRecord> {
    let raw = archive.read_entry(constants::LEGACY_FORGE_MANIFEST)?;
    let cleaned = TRAILING_COMMA.replace_all(&raw, "$1");

    let data: Value = match serde_json::from_str(&cleaned) {
        Ok(data) => data,
        Err(e) => {
            debug!(
                "Invalid {} in {}: {}",
                constants::LEGACY_FORGE_MANIFEST,
                archive.path().display(),
                e
            );
            return None;
        }
    };

    let info = match data {
        Value::Array(items) => items.into_iter().next()?,
        Value::Object(mut map) if map.contains_key("modList") => match map.remove("modList") {
            Some(Value::Array(items)) => items.into_iter().next()?,
            _ => return None,
        },
        other => other,
    };
    let info = info.as_object()?;
    let text_field = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);

    let dependencies = info
        .get("requiredMods")
        .and_then(Value::as_array)
        .map(|mods| {
            mods.iter()
                .filter_map(Value::as_str)
                .filter(|id| !is_excluded(id))
                .map(|id| DependencyRequirement::new(id, WILDCARD, true))
                .collect()
        })
        .unwrap_or_default();

    Some(ModRecord {
        id: text_field("modid").unwrap_or_else(|| constants::UNKNOWN.to_string()),
        name: text_field("name").unwrap_or_else(|| archive.stem()),
        version: text_field("version").unwrap_or_else(|| constants::UNKNOWN.to_string()),
        loader: Loader::Forge,
        platform_versions: version::normalize(text_field("mcversion").as_deref()),
        dependencies,
        source_path: archive.path().display().to_string(),
    })
}

/// Last resort: pick the labelled fields straight out of the raw manifest.
/// Always yields a record, however little of it could be read.
fn read_raw_fields(archive: &ModArchive, text: &str) -> ModRecord {
    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    ModRecord {
        id: capture(&MOD_ID_FIELD).unwrap_or_else(|| constants::UNKNOWN.to_string()),
        name: capture(&DISPLAY_NAME_FIELD).unwrap_or_else(|| archive.stem()),
        version: capture(&VERSION_FIELD).unwrap_or_else(|| constants::UNKNOWN.to_string()),
        loader: Loader::Forge,
        platform_versions: version::wildcard(),
        dependencies: Vec::new(),
        source_path: archive.path().display().to_string(),
    }
}
