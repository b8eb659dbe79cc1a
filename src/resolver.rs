// Resolver module for finding unmet mod dependencies

use crate::constants;
use crate::metadata::{DependencyRequirement, ModRecord};
use crate::scanner::ScanResult;
use crate::sources::{RemoteArtifact, RemoteLookup};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A required dependency that no installed mod provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmetDependency {
    #[serde(flatten)]
    pub requirement: DependencyRequirement,
    /// Download suggestion, when a lookup ran and found the project
    pub artifact: Option<RemoteArtifact>,
}

/// Unmet dependencies per mod id, in the order mods were scanned
pub type MissingDependencies = IndexMap<String, Vec<UnmetDependency>>;

/// Required dependencies of each record that nothing installed satisfies
///
/// Reserved platform ids are never unmet. Mods with nothing missing are left
/// out of the map entirely.
pub fn find_unmet(records: &[ModRecord]) -> IndexMap<String, Vec<DependencyRequirement>> {
    let installed_ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let mut unmet: IndexMap<String, Vec<DependencyRequirement>> = IndexMap::new();

    for record in records {
        for dep in record.required_dependencies() {
            if installed_ids.contains(dep.target_id.as_str()) || constants::is_reserved(&dep.target_id)
            {
                continue;
            }
            unmet.entry(record.id.clone()).or_default().push(dep.clone());
        }
    }

    unmet
}

/// Find unmet dependencies and, when possible, a download for each
///
/// Lookups need both a detected Minecraft version and loader; without them,
/// or without a `lookup`, every artifact is left empty. Each dependency id is
/// looked up at most once per call.
pub async fn resolve(scan: &ScanResult, lookup: Option<&dyn RemoteLookup>) -> MissingDependencies {
    let unmet = find_unmet(&scan.records);

    let target = match (
        lookup,
        scan.detected_platform_version.as_deref(),
        scan.detected_loader,
    ) {
        (Some(lookup), Some(version), Some(loader)) => Some((lookup, version, loader)),
        (Some(_), _, _) => {
            debug!("Skipping online lookups: Minecraft version or loader not detected");
            None
        }
        _ => None,
    };

    let mut cache: HashMap<String, Option<RemoteArtifact>> = HashMap::new();
    let mut missing = MissingDependencies::new();

    for (mod_id, deps) in unmet {
        let mut entries = Vec::with_capacity(deps.len());
        for requirement in deps {
            let artifact = match target {
                Some((lookup, version, loader)) => {
                    if let Some(cached) = cache.get(&requirement.target_id) {
                        cached.clone()
                    } else {
                        debug!(
                            "Looking up '{}' on {} for {} {}",
                            requirement.target_id,
                            lookup.name(),
                            loader,
                            version
                        );
                        let found = lookup
                            .find_best_artifact(&requirement.target_id, version, loader)
                            .await;
                        cache.insert(requirement.target_id.clone(), found.clone());
                        found
                    }
                }
                None => None,
            };

            entries.push(UnmetDependency {
                requirement,
                artifact,
            });
        }
        missing.insert(mod_id, entries);
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Loader;
    use crate::metadata::test_support::{fabric_jar, record};
    use crate::scanner;
    use crate::sources::source_trait::RemoteRelease;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Lookup stub that knows one project and records every query
    struct StubLookup {
        calls: Mutex<Vec<(String, String, Loader)>>,
    }

    impl StubLookup {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String, Loader)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl RemoteLookup for StubLookup {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn find_best_artifact(
            &self,
            mod_id: &str,
            platform_version: &str,
            loader: Loader,
        ) -> Option<RemoteArtifact> {
            self.calls
                .lock()
                .unwrap()
                .push((mod_id.to_string(), platform_version.to_string(), loader));

            match mod_id {
                "fabric-api" => Some(RemoteArtifact {
                    display_name: "Fabric API".to_string(),
                    page_url: "https://modrinth.com/mod/fabric-api".to_string(),
                    release: Some(RemoteRelease {
                        version_number: "0.92.0".to_string(),
                        version_page_url: "https://modrinth.com/mod/fabric-api/version/x".to_string(),
                        download_url: Some("https://cdn/fabric-api.jar".to_string()),
                        compatible_platform_versions: vec![platform_version.to_string()],
                        loaders: vec![loader.to_string()],
                    }),
                }),
                _ => None,
            }
        }
    }

    fn scan_of(records: Vec<ModRecord>) -> ScanResult {
        ScanResult::from_records(records)
    }

    #[test]
    fn test_satisfied_and_reserved_mods_are_omitted() {
        let records = vec![
            record(
                "content",
                Loader::Fabric,
                &["1.20.1"],
                &[("library", true), ("minecraft", true), ("fabricloader", true), ("java", true)],
            ),
            record("library", Loader::Fabric, &["1.20.1"], &[("forge", true)]),
        ];

        assert!(find_unmet(&records).is_empty());
    }

    #[test]
    fn test_reserved_ids_match_any_case() {
        let records = vec![record(
            "oldmod",
            Loader::Forge,
            &["1.12.2"],
            &[("Forge", true), ("Minecraft", true), ("baubles", true)],
        )];

        let unmet = find_unmet(&records);
        let targets: Vec<_> = unmet["oldmod"].iter().map(|d| d.target_id.as_str()).collect();
        assert_eq!(targets, vec!["baubles"]);
    }

    #[test]
    fn test_optional_dependencies_never_unmet() {
        let records = vec![record("a", Loader::Fabric, &["*"], &[("modmenu", false)])];
        assert!(find_unmet(&records).is_empty());
    }

    #[test]
    fn test_order_follows_records_and_declarations() {
        let records = vec![
            record("zeta", Loader::Forge, &["*"], &[("c", true), ("a", true)]),
            record("alpha", Loader::Forge, &["*"], &[("b", true)]),
            record("middle", Loader::Forge, &["*"], &[("zeta", true)]),
        ];

        let unmet = find_unmet(&records);
        let keys: Vec<_> = unmet.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        let zeta: Vec<_> = unmet["zeta"].iter().map(|d| d.target_id.as_str()).collect();
        assert_eq!(zeta, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_end_to_end_without_lookup() {
        let dir = TempDir::new().unwrap();
        fabric_jar(
            dir.path(),
            "mod-a.jar",
            r#"{"id":"modA","depends":{"modB":">=1.0","minecraft":"1.20.1"}}"#,
        );
        fabric_jar(dir.path(), "mod-c.jar", r#"{"id":"modC"}"#);

        let scan = scanner::scan(dir.path());
        let missing = resolve(&scan, None).await;

        assert_eq!(missing.len(), 1);
        let unmet = &missing["modA"];
        assert_eq!(unmet.len(), 1);
        assert_eq!(unmet[0].requirement.target_id, "modB");
        assert_eq!(unmet[0].requirement.version_constraint, ">=1.0");
        assert!(unmet[0].requirement.required);
        assert!(unmet[0].artifact.is_none());

        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json["modA"][0]["target_id"], "modB");
        assert_eq!(json["modA"][0]["required"], true);
        assert!(json["modA"][0]["artifact"].is_null());
    }

    #[tokio::test]
    async fn test_lookup_uses_detected_version_and_loader() {
        let scan = scan_of(vec![
            record("sodium-extra", Loader::Fabric, &["1.20.1"], &[("fabric-api", true)]),
            record("iris", Loader::Fabric, &["1.20.1"], &[("fabric-api", true), ("unheard-of", true)]),
        ]);
        let stub = StubLookup::new();

        let missing = resolve(&scan, Some(&stub)).await;

        let artifact = missing["sodium-extra"][0].artifact.as_ref().unwrap();
        assert_eq!(artifact.display_name, "Fabric API");
        assert_eq!(missing["iris"][0].artifact, missing["sodium-extra"][0].artifact);
        assert!(missing["iris"][1].artifact.is_none());

        // fabric-api is looked up once even though two mods need it
        assert_eq!(
            stub.calls(),
            vec![
                ("fabric-api".to_string(), "1.20.1".to_string(), Loader::Fabric),
                ("unheard-of".to_string(), "1.20.1".to_string(), Loader::Fabric),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_lookup_without_detected_version() {
        let scan = scan_of(vec![record("iris", Loader::Fabric, &["*"], &[("fabric-api", true)])]);
        assert_eq!(scan.detected_platform_version, None);
        let stub = StubLookup::new();

        let missing = resolve(&scan, Some(&stub)).await;

        assert!(missing["iris"][0].artifact.is_none());
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_scan_resolves_to_nothing() {
        let stub = StubLookup::new();
        assert!(resolve(&ScanResult::default(), Some(&stub)).await.is_empty());
        assert!(stub.calls().is_empty());
    }
}
