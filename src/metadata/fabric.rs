// Fabric extractor (fabric.mod.json)

use super::extractor::ManifestExtractor;
use super::record::{DependencyRequirement, Loader, ModRecord};
use super::{ModArchive, version};
use crate::constants::{self, FABRIC_LOADER_ID, JAVA_ID, MINECRAFT_ID};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct FabricModJson {
    id: Option<String>,
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    depends: IndexMap<String, Value>,
    /// Pre-1.0 schema name for `depends`
    #[serde(default)]
    requires: IndexMap<String, Value>,
    #[serde(default)]
    recommends: IndexMap<String, Value>,
}

/// Keys that describe the platform rather than another mod
const EXCLUDED: &[&str] = &[JAVA_ID, MINECRAFT_ID, FABRIC_LOADER_ID];

pub struct FabricExtractor;

impl ManifestExtractor for FabricExtractor {
    fn name(&self) -> &'static str {
        "fabric"
    }

    fn extract(&self, archive: &mut ModArchive) -> Option<ModRecord> {
        let json = archive.read_entry(constants::FABRIC_MANIFEST)?;
        let manifest: FabricModJson = match serde_json::from_str(&json) {
            Ok(m) => m,
            Err(e) => {
                debug!(
                    "Invalid {} in {}: {}",
                    constants::FABRIC_MANIFEST,
                    archive.path().display(),
                    e
                );
                return None;
            }
        };

        let mut required = manifest.depends;
        required.extend(manifest.requires);

        let platform_versions = version::normalize(
            required
                .get(MINECRAFT_ID)
                .map(constraint_text)
                .as_deref(),
        );

        let dependencies = dependency_list(&required, true)
            .chain(dependency_list(&manifest.recommends, false))
            .collect();

        Some(ModRecord {
            id: manifest.id.unwrap_or_else(|| constants::UNKNOWN.to_string()),
            name: manifest.name.unwrap_or_else(|| archive.stem()),
            version: manifest
                .version
                .unwrap_or_else(|| constants::UNKNOWN.to_string()),
            loader: Loader::Fabric,
            platform_versions,
            dependencies,
            source_path: archive.path().display().to_string(),
        })
    }
}

fn dependency_list(
    map: &IndexMap<String, Value>,
    required: bool,
) -> impl Iterator<Item = DependencyRequirement> + '_ {
    map.iter()
        .filter(|(id, _)| !EXCLUDED.contains(&id.as_str()))
        .map(move |(id, value)| DependencyRequirement::new(id, constraint_text(value), required))
}

/// Render a version predicate; arrays are alternatives joined with `||`
fn constraint_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" || "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::test_support::{extract_path, fabric_jar};
    use tempfile::TempDir;

    fn extract(manifest: &str) -> Option<ModRecord> {
        let dir = TempDir::new().unwrap();
        let path = fabric_jar(dir.path(), "test-mod-1.0.jar", manifest);
        extract_path(&FabricExtractor, &path)
    }

    #[test]
    fn test_required_and_recommended() {
        let record = extract(
            r#"{"id":"foo","version":"1.0","depends":{"bar":"*"},"recommends":{"baz":"*"}}"#,
        )
        .unwrap();

        assert_eq!(record.id, "foo");
        assert_eq!(record.version, "1.0");
        assert_eq!(record.loader, Loader::Fabric);
        assert_eq!(
            record.dependencies,
            vec![
                DependencyRequirement::new("bar", "*", true),
                DependencyRequirement::new("baz", "*", false),
            ]
        );
    }

    #[test]
    fn test_platform_ids_excluded_but_feed_versions() {
        let record = extract(
            r#"{
                "id": "sodium",
                "depends": {
                    "fabricloader": ">=0.14",
                    "minecraft": ">=1.20 <1.21",
                    "java": ">=17",
                    "fabric-api": "*"
                }
            }"#,
        )
        .unwrap();

        let ids: Vec<_> = record
            .dependencies
            .iter()
            .map(|d| d.target_id.as_str())
            .collect();
        assert_eq!(ids, vec!["fabric-api"]);
        assert_eq!(
            record.platform_versions.iter().collect::<Vec<_>>(),
            vec!["1.20", "1.21"]
        );
    }

    #[test]
    fn test_requires_overrides_depends() {
        let record = extract(
            r#"{"id":"old","depends":{"lib":"1.0","other":"*"},"requires":{"lib":"2.0"}}"#,
        )
        .unwrap();

        assert_eq!(
            record.dependencies,
            vec![
                DependencyRequirement::new("lib", "2.0", true),
                DependencyRequirement::new("other", "*", true),
            ]
        );
    }

    #[test]
    fn test_array_constraints_are_joined() {
        let record = extract(
            r#"{"id":"multi","depends":{"minecraft":["1.19.4","1.20.1"],"cloth-config":[">=11","<13"]}}"#,
        )
        .unwrap();

        assert_eq!(record.dependencies[0].version_constraint, ">=11 || <13");
        assert_eq!(
            record.platform_versions.iter().collect::<Vec<_>>(),
            vec!["1.19.4", "1.20.1"]
        );
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let record = extract("{}").unwrap();

        assert_eq!(record.id, "unknown");
        assert_eq!(record.name, "test-mod-1.0");
        assert_eq!(record.version, "unknown");
        assert!(record.dependencies.is_empty());
        assert_eq!(record.platform_versions.iter().collect::<Vec<_>>(), vec!["*"]);
        assert!(record.source_path.ends_with("test-mod-1.0.jar"));
    }

    #[test]
    fn test_malformed_json_is_none() {
        assert!(extract("{ id: foo").is_none());
    }
}
