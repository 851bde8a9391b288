use image::{imageops::FilterType, DynamicImage};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::APP_DIR_NAME;
use crate::error::{GalleryError, Result};

/// Size of generated thumbnails (longest edge)
const THUMBNAIL_SIZE: u32 = 256;

/// Get the thumbnail cache directory
/// Returns ~/.cache/ultrabots-gallery/thumbnails on Linux
pub fn thumbnail_cache_dir() -> Result<PathBuf> {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .ok_or(GalleryError::NoCacheDir)?;

    path.push(APP_DIR_NAME);
    path.push("thumbnails");

    // Ensure the directory exists
    fs::create_dir_all(&path)?;

    Ok(path)
}

/// Get the thumbnail path for a source image (doesn't generate, just returns the expected path)
///
/// Thumbnails are keyed by a BLAKE3 hash of the source path bytes, so the
/// same file name in two seasons never collides and keys survive upgrades.
pub fn thumbnail_path(cache_dir: &Path, source: &Path) -> PathBuf {
    let hash = blake3::hash(source.as_os_str().as_encoded_bytes());
    cache_dir.join(format!("{}.jpg", hash.to_hex()))
}

/// Return the cached thumbnail for `source`, generating it if needed
pub fn ensure_thumbnail(cache_dir: &Path, source: &Path) -> Result<PathBuf> {
    let thumbnail_path = thumbnail_path(cache_dir, source);
    if thumbnail_path.exists() {
        return Ok(thumbnail_path);
    }

    if !source.exists() {
        return Err(GalleryError::ImageNotFound {
            path: source.to_path_buf(),
        });
    }

    let img = image::open(source)?;

    // Resize to thumbnail size, keeping the aspect ratio
    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);

    // JPEG has no alpha channel
    DynamicImage::ImageRgb8(thumbnail.to_rgb8()).save(&thumbnail_path)?;

    log::debug!("Generated thumbnail: {}", thumbnail_path.display());
    Ok(thumbnail_path)
}
