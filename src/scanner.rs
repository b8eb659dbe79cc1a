// Scanner module for reading every mod jar in a folder

use crate::constants::ARCHIVE_EXTENSION;
use crate::metadata::{
    Loader, ManifestExtractor, ModArchive, ModRecord, default_extractors, extract_first, version,
};
use indexmap::IndexMap;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};

/// Everything learned from one scan of a mods folder
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    pub records: Vec<ModRecord>,
    /// Most common loader among the records
    pub detected_loader: Option<Loader>,
    /// Most common concrete Minecraft version among the records
    pub detected_platform_version: Option<String>,
    /// Jars no extractor could read
    #[serde(skip)]
    pub skipped: Vec<PathBuf>,
}

impl ScanResult {
    /// Build a result from records in scan order
    ///
    /// Records sharing an id collapse to the last one scanned, kept at the
    /// position of the first. Loader and version votes are counted over every
    /// record before that collapse; ties go to the value seen first.
    pub fn from_records(records: Vec<ModRecord>) -> Self {
        let mut loader_votes: IndexMap<Loader, usize> = IndexMap::new();
        let mut version_votes: IndexMap<String, usize> = IndexMap::new();
        let mut by_id: IndexMap<String, ModRecord> = IndexMap::new();

        for record in records {
            *loader_votes.entry(record.loader).or_default() += 1;
            for token in &record.platform_versions {
                if !version::is_wildcard(token) {
                    *version_votes.entry(token.clone()).or_default() += 1;
                }
            }

            if let Some(previous) = by_id.get(&record.id) {
                warn!(
                    "Duplicate mod id '{}': {} replaces {}",
                    record.id,
                    record.file_name(),
                    previous.file_name()
                );
            }
            by_id.insert(record.id.clone(), record);
        }

        Self {
            records: by_id.into_values().collect(),
            detected_loader: majority(&loader_votes),
            detected_platform_version: majority(&version_votes),
            skipped: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Key with the highest count; the earliest inserted key wins a tie
pub fn majority<K: Clone + Eq + Hash>(counts: &IndexMap<K, usize>) -> Option<K> {
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key.clone())
}

/// Scan `dir` with the default extractor chain
pub fn scan(dir: &Path) -> ScanResult {
    scan_with(dir, &default_extractors())
}

/// Scan the jars directly inside `dir` (not recursive)
///
/// A missing or unreadable folder is logged and yields an empty result.
pub fn scan_with(dir: &Path, extractors: &[Box<dyn ManifestExtractor>]) -> ScanResult {
    let jars = match list_archives(dir) {
        Ok(jars) => jars,
        Err(e) => {
            error!("Mods folder not readable: {}: {}", dir.display(), e);
            return ScanResult::default();
        }
    };

    debug!("Scanning {} mod file(s) in {}", jars.len(), dir.display());

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for path in jars {
        let record = match ModArchive::open(&path) {
            Ok(mut archive) => extract_first(extractors, &mut archive),
            Err(e) => {
                debug!("{:#}", e);
                None
            }
        };

        match record {
            Some(record) => records.push(record),
            None => {
                debug!("No mod metadata found in {}", path.display());
                skipped.push(path);
            }
        }
    }

    let mut result = ScanResult::from_records(records);
    result.skipped = skipped;

    if let Some(version) = &result.detected_platform_version {
        info!("Detected Minecraft version: {}", version);
    }
    if let Some(loader) = &result.detected_loader {
        info!("Detected loader: {}", loader);
    }

    result
}

/// Jar files directly inside `dir`, sorted by file name
fn list_archives(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut jars: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
        })
        .collect();
    jars.sort();
    Ok(jars)
}
