// Read-only access to the entries of a mod jar

use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// An opened jar together with the path it came from
pub struct ModArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl ModArchive {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let zip = ZipArchive::new(file)
            .with_context(|| format!("{} is not a valid jar", path.display()))?;
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        Ok(Self { path, zip })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without the `.jar` extension
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Read an entry as text, replacing invalid UTF-8
    pub fn read_entry(&mut self, name: &str) -> Option<String> {
        let mut entry = self.zip.by_name(name).ok()?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).ok()?;
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// `Implementation-Version` from `META-INF/MANIFEST.MF`, if any
    pub fn implementation_version(&mut self) -> Option<String> {
        let contents = self.read_entry(crate::constants::JAR_MANIFEST)?;

        contents
            .lines()
            .filter(|line| !line.starts_with(' '))
            .find_map(|line| line.trim().strip_prefix("Implementation-Version:"))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::test_support::write_jar;
    use tempfile::TempDir;

    #[test]
    fn test_open_rejects_zero_byte_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.jar");
        std::fs::write(&path, b"").unwrap();

        assert!(ModArchive::open(&path).is_err());
    }

    #[test]
    fn test_read_entry_and_stem() {
        let dir = TempDir::new().unwrap();
        let path = write_jar(dir.path(), "sodium-0.5.jar", &[("a/b.txt", "hello")]);

        let mut archive = ModArchive::open(&path).unwrap();
        assert_eq!(archive.stem(), "sodium-0.5");
        assert_eq!(archive.read_entry("a/b.txt").as_deref(), Some("hello"));
        assert_eq!(archive.read_entry("missing.txt"), None);
    }

    #[test]
    fn test_implementation_version() {
        let dir = TempDir::new().unwrap();
        let path = write_jar(
            dir.path(),
            "mod.jar",
            &[(
                "META-INF/MANIFEST.MF",
                "Manifest-Version: 1.0\nImplementation-Version: 4.2.1\n",
            )],
        );

        let mut archive = ModArchive::open(&path).unwrap();
        assert_eq!(archive.implementation_version().as_deref(), Some("4.2.1"));
    }
}
