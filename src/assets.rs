//! Asset loading with embedded fallbacks
//!
//! This module provides a unified interface for loading assets (palettes, config)
//! with the following behavior:
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set and path is empty/missing: seed with embedded assets, then use filesystem
//! - If an env var IS set and path has files: use filesystem with embedded fallback

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded built-in palettes (one `#RRGGBB` per line)
#[derive(RustEmbed)]
#[folder = "palettes/"]
#[include = "*.txt"]
struct EmbeddedPalettes;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const PALETTE_EXT: &str = ".txt";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Palettes,
    Config,
}

/// Report of seeding operations
#[derive(Debug, Default)]
pub struct SeedReport {
    pub palettes_seeded: Vec<String>,
    pub config_seeded: bool,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.palettes_seeded.is_empty() && !self.config_seeded
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Where a palette was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    External,
    Embedded,
}

/// Asset loader with merge behavior and optional filesystem override
pub struct AssetLoader {
    /// External palettes directory (from PALETTES_DIR env var)
    palettes_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(palettes_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            palettes_dir,
            config_file,
        }
    }

    /// Create a loader from `PALETTES_DIR` and `CONFIG_FILE`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("PALETTES_DIR").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    pub fn palettes_dir(&self) -> Option<&Path> {
        self.palettes_dir.as_deref()
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read a palette file by name (without extension)
    ///
    /// If an external path is configured, tries filesystem first, then falls back to embedded.
    pub fn read_palette(&self, name: &str) -> io::Result<(Cow<'static, [u8]>, PaletteSource)> {
        let file_name = format!("{name}{PALETTE_EXT}");

        if let Some(ref dir) = self.palettes_dir {
            let full_path = dir.join(&file_name);
            if full_path.is_file() {
                tracing::trace!(path = %full_path.display(), "Loading palette from filesystem");
                return Ok((Cow::Owned(fs::read(&full_path)?), PaletteSource::External));
            }
        }

        EmbeddedPalettes::get(&file_name)
            .map(|f| {
                tracing::trace!(palette = %name, "Loading palette from embedded assets");
                (f.data, PaletteSource::Embedded)
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Palette not found: {name}"),
                )
            })
    }

    /// Read a palette as a UTF-8 string
    pub fn read_palette_string(&self, name: &str) -> io::Result<String> {
        let (bytes, _) = self.read_palette(name)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// List all available palette names (merged view of embedded + external), sorted
    pub fn list_palettes(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = EmbeddedPalettes::iter()
            .filter_map(|f| f.strip_suffix(PALETTE_EXT).map(str::to_string))
            .collect();

        if let Some(ref dir) = self.palettes_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    if let Some(name) = entry.file_name().to_str() {
                        if let Some(stem) = name.strip_suffix(PALETTE_EXT) {
                            names.insert(stem.to_string());
                        }
                    }
                }
            }
        }

        names.into_iter().collect()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Check if a directory exists and is empty (ignoring .gitkeep)
    fn is_empty_dir(path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }
        path.read_dir()
            .map(|mut entries| {
                entries.all(|e| {
                    e.map(|entry| entry.file_name() == ".gitkeep")
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }

    /// Seed empty/missing paths with embedded assets
    ///
    /// Only operates on paths that were configured (env var was set).
    pub fn seed_if_configured(&self) -> io::Result<SeedReport> {
        let mut report = SeedReport::default();

        if let Some(ref dir) = self.palettes_dir {
            if !dir.exists() || Self::is_empty_dir(dir) {
                fs::create_dir_all(dir)?;
                for file in EmbeddedPalettes::iter() {
                    if let Some(data) = EmbeddedPalettes::get(&file) {
                        fs::write(dir.join(file.as_ref()), &*data.data)?;
                        report.palettes_seeded.push(file.to_string());
                    }
                }
                if !report.palettes_seeded.is_empty() {
                    tracing::info!(
                        dir = %dir.display(),
                        count = report.palettes_seeded.len(),
                        "Seeded palettes directory with embedded assets"
                    );
                }
            }
        }

        if let Some(ref path) = self.config_file {
            if !path.exists() {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                if let Some(data) = EmbeddedConfig::get("config.yaml") {
                    fs::write(path, &*data.data)?;
                    report.config_seeded = true;
                    tracing::info!(path = %path.display(), "Seeded config file with embedded default");
                }
            }
        }

        Ok(report)
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Palettes => {
                    let dir = self
                        .palettes_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./palettes"));
                    fs::create_dir_all(&dir)?;

                    for file in EmbeddedPalettes::iter() {
                        let path = dir.join(file.as_ref());
                        if !force && path.exists() {
                            report.skipped.push(path.display().to_string());
                            continue;
                        }
                        if let Some(data) = EmbeddedPalettes::get(&file) {
                            fs::write(&path, &*data.data)?;
                            report.written.push(path.display().to_string());
                        }
                    }
                }
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));

                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        fs::write(&path, &*data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Palettes => EmbeddedPalettes::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Config => vec!["config.yaml".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_only_lists_builtin_palettes() {
        let loader = AssetLoader::new(None, None);
        let names = loader.list_palettes();
        assert!(names.contains(&"purple_to_orange".to_string()));
        assert!(names.iter().all(|n| !n.ends_with(PALETTE_EXT)));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_external_palette_overrides_embedded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("purple_to_orange.txt"), "#010203\n").unwrap();
        fs::write(dir.path().join("mine.txt"), "#000000\n#ffffff\n").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let loader = AssetLoader::new(Some(dir.path().to_path_buf()), None);
        let (data, source) = loader.read_palette("purple_to_orange").unwrap();
        assert_eq!(&*data, b"#010203\n");
        assert_eq!(source, PaletteSource::External);

        let names = loader.list_palettes();
        assert!(names.contains(&"mine".to_string()));
        assert!(!names.contains(&"notes".to_string()));

        // falls back to embedded for names not on disk
        let (_, source) = loader.read_palette("orange_to_teal").unwrap();
        assert_eq!(source, PaletteSource::Embedded);
    }

    #[test]
    fn test_missing_palette() {
        let loader = AssetLoader::new(None, None);
        let err = loader.read_palette("does_not_exist").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_seed_empty_dir_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let palettes = dir.path().join("palettes");
        let config = dir.path().join("conf").join("config.yaml");

        let loader = AssetLoader::new(Some(palettes.clone()), Some(config.clone()));
        let report = loader.seed_if_configured().unwrap();

        assert!(!report.is_empty());
        assert!(report.config_seeded);
        assert_eq!(
            report.palettes_seeded.len(),
            AssetLoader::list_embedded(AssetCategory::Palettes).len()
        );
        assert!(config.exists());

        // Second run has nothing to do
        let report = loader.seed_if_configured().unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_init_skips_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.yaml");
        fs::write(&config, "render: {}\n").unwrap();

        let loader = AssetLoader::new(None, Some(config.clone()));
        let report = loader.init(&[AssetCategory::Config], false).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert!(report.written.is_empty());

        let report = loader.init(&[AssetCategory::Config], true).unwrap();
        assert_eq!(report.written.len(), 1);
        assert_ne!(fs::read_to_string(&config).unwrap(), "render: {}\n");
    }
}
