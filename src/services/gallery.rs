use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use utoipa::ToSchema;

use crate::error::{ApiError, RenderError};

/// A generated image in the gallery
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GalleryItem {
    pub filename: String,
    /// URL the image is served from (`/generated/<filename>`)
    pub image_url: String,
    /// Modification time, RFC 3339
    #[schema(value_type = String, format = DateTime)]
    pub created: DateTime<Utc>,
    /// File size in bytes
    pub size: u64,
}

impl GalleryItem {
    pub fn image_url(filename: &str) -> String {
        format!("/generated/{filename}")
    }
}

/// Storage for generated PNGs
#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// Store a PNG under `filename`
    async fn save(&self, filename: &str, png: &[u8]) -> Result<GalleryItem, ApiError>;

    /// All stored images, newest first
    async fn list(&self) -> Result<Vec<GalleryItem>, ApiError>;

    /// Read a stored image
    async fn read(&self, filename: &str) -> Result<Vec<u8>, ApiError>;
}

/// Reject anything that is not a bare `*.png` file name.
pub fn validate_filename(filename: &str) -> Result<(), ApiError> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let valid = PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+\.png$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(filename));

    if !valid || filename.contains("..") {
        return Err(ApiError::BadRequest(format!("Invalid filename: {filename}")));
    }
    Ok(())
}

/// Gallery backed by a directory on disk
pub struct DirectoryGallery {
    dir: PathBuf,
}

impl DirectoryGallery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item(filename: String, metadata: &std::fs::Metadata) -> GalleryItem {
        let created = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        GalleryItem {
            image_url: GalleryItem::image_url(&filename),
            filename,
            created,
            size: metadata.len(),
        }
    }
}

#[async_trait]
impl GalleryStore for DirectoryGallery {
    async fn save(&self, filename: &str, png: &[u8]) -> Result<GalleryItem, ApiError> {
        validate_filename(filename)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(RenderError::from)?;

        let path = self.dir.join(filename);
        tokio::fs::write(&path, png)
            .await
            .map_err(RenderError::from)?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(RenderError::from)?;

        tracing::info!(path = %path.display(), bytes = png.len(), "Saved generated image");
        Ok(Self::item(filename.to_string(), &metadata))
    }

    async fn list(&self) -> Result<Vec<GalleryItem>, ApiError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // Nothing generated yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RenderError::from(e).into()),
        };

        let mut items = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(RenderError::from)? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.ends_with(".png") {
                continue;
            }
            let metadata = match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) => metadata,
                // Deleted since the directory was read
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(file = %name, "Gallery entry vanished while listing");
                    continue;
                }
                Err(e) => return Err(RenderError::from(e).into()),
            };
            if metadata.is_file() {
                items.push(Self::item(name, &metadata));
            }
        }

        items.sort_by(|a, b| {
            b.created
                .cmp(&a.created)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        Ok(items)
    }

    async fn read(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        validate_filename(filename)?;
        let path = self.dir.join(filename);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ApiError::NotFound(format!("Image not found: {filename}")))
            }
            Err(e) => Err(RenderError::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("wave_4A_x_none_20250101_120000_abcd1234.png").is_ok());
        assert!(validate_filename("../secret.png").is_err());
        assert!(validate_filename("a..png").is_err());
        assert!(validate_filename("dir/file.png").is_err());
        assert!(validate_filename("image.jpg").is_err());
        assert!(validate_filename("").is_err());
    }

    #[tokio::test]
    async fn test_save_list_read() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(dir.path().join("generated"));

        let item = gallery.save("one.png", b"first").await.unwrap();
        assert_eq!(item.image_url, "/generated/one.png");
        assert_eq!(item.size, 5);

        std::fs::write(dir.path().join("generated").join("notes.txt"), "x").unwrap();

        let items = gallery.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "one.png");

        assert_eq!(gallery.read("one.png").await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(dir.path().join("nope"));
        assert!(gallery.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(dir.path());

        assert!(matches!(
            gallery.read("missing.png").await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            gallery.read("../escape.png").await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_skips_entries_that_vanish() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(dir.path());

        gallery.save("kept.png", b"a").await.unwrap();
        // Listed by read_dir, but its target is gone
        std::os::unix::fs::symlink(dir.path().join("deleted.png"), dir.path().join("gone.png"))
            .unwrap();

        let items = gallery.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "kept.png");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(dir.path());

        gallery.save("old.png", b"a").await.unwrap();
        let old = std::fs::File::options()
            .write(true)
            .open(dir.path().join("old.png"))
            .unwrap();
        old.set_modified(std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000))
            .unwrap();
        gallery.save("new.png", b"b").await.unwrap();

        let names: Vec<_> = gallery
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.filename)
            .collect();
        assert_eq!(names, vec!["new.png", "old.png"]);
    }
}
