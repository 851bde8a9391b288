/// Modal image preloading
/// Decodes the full image off the UI thread so it can be swapped in
/// without showing a half-loaded frame
use image::imageops::FilterType;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

/// Longest edge of a modal preview
pub const PREVIEW_MAX_SIZE: u32 = 1280;

/// Decoded RGBA pixels ready to hand to the renderer
#[derive(Clone)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Preload an image for the modal viewer
pub async fn preload_image(path: PathBuf, max_size: u32) -> Result<PreviewImage> {
    // Spawn blocking task for CPU-bound work
    tokio::task::spawn_blocking(move || decode_preview(&path, max_size)).await?
}

/// Blocking version of preview decoding
pub fn decode_preview(path: &Path, max_size: u32) -> Result<PreviewImage> {
    if !path.exists() {
        return Err(GalleryError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut img = image::open(path)?;

    if img.width() > max_size || img.height() > max_size {
        img = img.resize(max_size, max_size, FilterType::Lanczos3);
    }

    let rgba = img.to_rgba8();
    Ok(PreviewImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
