// Constants module for shared string constants

pub const FABRIC_MANIFEST: &str = "fabric.mod.json";
pub const FORGE_MANIFEST: &str = "META-INF/mods.toml";
pub const LEGACY_FORGE_MANIFEST: &str = "mcmod.info";
pub const JAR_MANIFEST: &str = "META-INF/MANIFEST.MF";
pub const ARCHIVE_EXTENSION: &str = "jar";

/// Version token meaning "any / unspecified"
pub const WILDCARD: &str = "*";
pub const UNKNOWN: &str = "unknown";

pub const MINECRAFT_ID: &str = "minecraft";
pub const JAVA_ID: &str = "java";
pub const FABRIC_LOADER_ID: &str = "fabricloader";
pub const FORGE_ID: &str = "forge";

/// Identifiers that name the host platform rather than another mod.
/// Never reported as missing, whatever the `required` flag says.
pub const RESERVED_IDS: &[&str] = &[JAVA_ID, MINECRAFT_ID, FABRIC_LOADER_ID, FORGE_ID];

pub const DEFAULT_API_URL: &str = "https://api.modrinth.com/v2";
pub const DEFAULT_SITE_URL: &str = "https://modrinth.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Schema version for the `scan --json` output format.
/// Increment only on breaking changes to ensure future integrations can safely evolve.
pub const SCHEMA_VERSION: u32 = 1;

/// Case-insensitive; legacy manifests write `"Forge"`
pub fn is_reserved(id: &str) -> bool {
    RESERVED_IDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(id))
}
