// Modrinth source implementation

use crate::config::LookupConfig;
use crate::metadata::Loader;
use crate::sources::http;
use crate::sources::source_trait::{RemoteArtifact, RemoteLookup, RemoteRelease};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    project_id: Option<String>,
    slug: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Version {
    id: String,
    version_number: String,
    #[serde(default)]
    game_versions: Vec<String>,
    #[serde(default)]
    loaders: Vec<String>,
    #[serde(default)]
    files: Vec<VersionFile>,
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    url: String,
    #[serde(default)]
    primary: bool,
}

pub struct ModrinthClient {
    config: LookupConfig,
    client: Client,
}

impl ModrinthClient {
    pub fn new(config: LookupConfig) -> anyhow::Result<Self> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?query={}&limit=1",
            self.config.api_url,
            urlencoding::encode(query)
        )
    }

    /// Release listing, filtered server-side only when both filters are set
    fn versions_url(&self, project: &str, platform_version: &str, loader: &str) -> String {
        let mut url = format!(
            "{}/project/{}/version",
            self.config.api_url,
            urlencoding::encode(project)
        );
        if !platform_version.trim().is_empty() && !loader.trim().is_empty() {
            let loader = loader.to_lowercase();
            url.push_str(&format!(
                "?game_versions={}&loaders={}",
                http::json_list_param(&[platform_version]),
                http::json_list_param(&[loader.as_str()])
            ));
        }
        url
    }

    async fn lookup(
        &self,
        mod_id: &str,
        platform_version: &str,
        loader: Loader,
    ) -> anyhow::Result<Option<RemoteArtifact>> {
        let search: SearchResponse = http::fetch_json(&self.client, &self.search_url(mod_id)).await?;
        let Some(hit) = search.hits.into_iter().next() else {
            debug!("No Modrinth project matches '{}'", mod_id);
            return Ok(None);
        };

        let project = hit.project_id.as_deref().unwrap_or(&hit.slug);
        let url = self.versions_url(project, platform_version, loader.as_str());
        let versions: Vec<Version> = http::fetch_json(&self.client, &url).await?;

        Ok(Some(build_artifact(&self.config.site_url, hit, versions)))
    }
}

/// Turn a search hit and its (newest first) releases into an artifact
fn build_artifact(site_url: &str, hit: SearchHit, versions: Vec<Version>) -> RemoteArtifact {
    let page_url = format!("{}/mod/{}", site_url, hit.slug);

    let release = versions.into_iter().next().map(|version| {
        let download_url = version
            .files
            .iter()
            .find(|file| file.primary)
            .or_else(|| version.files.first())
            .map(|file| file.url.clone());

        RemoteRelease {
            version_page_url: format!("{}/version/{}", page_url, version.id),
            version_number: version.version_number,
            download_url,
            compatible_platform_versions: version.game_versions,
            loaders: version.loaders,
        }
    });

    RemoteArtifact {
        display_name: hit.title.unwrap_or_else(|| hit.slug.clone()),
        page_url,
        release,
    }
}

#[async_trait]
impl RemoteLookup for ModrinthClient {
    fn name(&self) -> &'static str {
        "modrinth"
    }

    async fn find_best_artifact(
        &self,
        mod_id: &str,
        platform_version: &str,
        loader: Loader,
    ) -> Option<RemoteArtifact> {
        match self.lookup(mod_id, platform_version, loader).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("Modrinth lookup for '{}' failed: {:#}", mod_id, e);
                None
            }
        }
    }
}
