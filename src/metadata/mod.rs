// Metadata module for reading mod manifests out of jar archives

pub mod archive;
pub mod extractor;
pub mod fabric;
pub mod forge;
pub mod record;
pub mod version;

pub use archive::ModArchive;
pub use extractor::{ManifestExtractor, default_extractors, extract_first};
pub use fabric::FabricExtractor;
pub use forge::ForgeExtractor;
pub use record::{DependencyRequirement, Loader, ModRecord};
