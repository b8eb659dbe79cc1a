// Record types produced by the manifest extractors

use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

/// Mod loader a jar was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    Fabric,
    Forge,
}

impl Loader {
    pub fn as_str(&self) -> &'static str {
        match self {
            Loader::Fabric => "fabric",
            Loader::Forge => "forge",
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency declared by a mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRequirement {
    pub target_id: String,
    /// Raw constraint text, shown to the user but never evaluated
    pub version_constraint: String,
    pub required: bool,
}

impl DependencyRequirement {
    pub fn new(
        target_id: impl Into<String>,
        version_constraint: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            version_constraint: version_constraint.into(),
            required,
        }
    }
}

/// One installed mod, as read from its jar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    pub loader: Loader,
    /// Normalized Minecraft versions, or just `"*"` when unknown
    pub platform_versions: IndexSet<String>,
    pub dependencies: Vec<DependencyRequirement>,
    pub source_path: String,
}

impl ModRecord {
    pub fn required_dependencies(&self) -> impl Iterator<Item = &DependencyRequirement> {
        self.dependencies.iter().filter(|dep| dep.required)
    }

    /// File name of the originating jar
    pub fn file_name(&self) -> &str {
        std::path::Path::new(&self.source_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.source_path)
    }
}

impl fmt::Display for ModRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) v{}", self.name, self.id, self.version)
    }
}
