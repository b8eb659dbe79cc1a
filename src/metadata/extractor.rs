// Trait definition for manifest extractors

use super::{FabricExtractor, ForgeExtractor, ModArchive, ModRecord};
use log::debug;

/// Reads one manifest format out of a mod jar
///
/// Implementations must never fail hard: a jar that is not theirs, or whose
/// manifest is malformed, yields `None` so the next extractor can try.
pub trait ManifestExtractor: Send + Sync {
    /// Short name used in logs (e.g., "fabric", "forge")
    fn name(&self) -> &'static str;

    fn extract(&self, archive: &mut ModArchive) -> Option<ModRecord>;
}

/// Extractors in the order they are tried: Fabric, then Forge
pub fn default_extractors() -> Vec<Box<dyn ManifestExtractor>> {
    vec![Box::new(FabricExtractor), Box::new(ForgeExtractor)]
}

/// Run the extractors in order and keep the first record produced
pub fn extract_first(
    extractors: &[Box<dyn ManifestExtractor>],
    archive: &mut ModArchive,
) -> Option<ModRecord> {
    extractors.iter().find_map(|extractor| {
        let record = extractor.extract(archive);
        if let Some(record) = &record {
            debug!(
                "{} read {} from {}",
                extractor.name(),
                record.id,
                archive.path().display()
            );
        }
        record
    })
}
