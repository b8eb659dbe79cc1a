// Trait definition for remote dependency lookups

use crate::metadata::Loader;
use serde::Serialize;

/// A project found on the remote registry for a missing dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteArtifact {
    pub display_name: String,
    pub page_url: String,
    /// `None` when the project exists but has no release for the requested
    /// Minecraft version and loader
    pub release: Option<RemoteRelease>,
}

/// A concrete release compatible with the requested version and loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteRelease {
    pub version_number: String,
    pub version_page_url: String,
    pub download_url: Option<String>,
    pub compatible_platform_versions: Vec<String>,
    pub loaders: Vec<String>,
}

/// Trait for registries that can suggest a download for a missing mod
#[async_trait::async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Find the best release of `mod_id` for a Minecraft version and loader
    ///
    /// # Returns
    /// * `None` - no project matched, or the lookup failed
    /// * `Some` without a release - project found, nothing compatible
    /// * `Some` with a release - a compatible download
    ///
    /// Failures are never returned as errors; lookups are best-effort.
    async fn find_best_artifact(
        &self,
        mod_id: &str,
        platform_version: &str,
        loader: Loader,
    ) -> Option<RemoteArtifact>;

    /// Get the source name (e.g., "modrinth")
    fn name(&self) -> &'static str;
}
