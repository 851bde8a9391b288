/// Season folder scanning
///
/// Each season is a folder of images. Images inside a subfolder take the
/// subfolder's name as their category; images directly in the season
/// folder are "general". An optional captions.json next to the images
/// overrides titles, descriptions and categories.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{GalleryConfig, SeasonConfig};
use crate::error::Result;
use crate::media::thumbnail;
use crate::state::data::{GalleryItem, Season, DEFAULT_CATEGORY};

/// Supported image extensions (lowercase)
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Per-season caption overrides file
const CAPTIONS_FILE: &str = "captions.json";

/// One entry of captions.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptionEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Check if this is an image file by extension
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Turn a file stem into a caption: "first-robot_reveal" -> "First Robot Reveal"
pub fn humanize(stem: &str) -> String {
    stem.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(crate::state::data::capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read captions.json from a season folder.
/// A missing file is normal; an invalid one is logged and ignored.
pub fn load_captions(dir: &Path) -> HashMap<String, CaptionEntry> {
    let path = dir.join(CAPTIONS_FILE);
    if !path.exists() {
        return HashMap::new();
    }

    let parsed = std::fs::read_to_string(&path)
        .map_err(crate::error::GalleryError::from)
        .and_then(|json| Ok(serde_json::from_str(&json)?));

    match parsed {
        Ok(captions) => captions,
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            HashMap::new()
        }
    }
}

/// Collect the items of one season folder, in walk order
pub fn scan_items(dir: &Path) -> Vec<GalleryItem> {
    let captions = load_captions(dir);
    let mut items = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_image(path) {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        let components: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        let key = components.join("/");
        let file_name = components.last().cloned().unwrap_or_default();

        let folder_category = if components.len() > 1 {
            components[0].clone()
        } else {
            DEFAULT_CATEGORY.to_string()
        };

        let caption = captions
            .get(&key)
            .or_else(|| captions.get(&file_name))
            .cloned()
            .unwrap_or_default();

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut item = GalleryItem::new(
            caption.category.unwrap_or(folder_category),
            path.to_path_buf(),
            caption.title.unwrap_or_else(|| humanize(&stem)),
        );
        item.description = caption.description;
        items.push(item);
    }

    items
}

/// Load one season. A missing folder gives an empty season.
pub fn scan_season(season: &SeasonConfig, dir: &Path) -> Season {
    let mut result = Season::empty(&season.id, &season.name, dir);

    if !dir.is_dir() {
        log::warn!("Season {} folder not found: {}", season.id, dir.display());
        return result;
    }

    result.items = scan_items(dir);
    log::info!("Season {}: {} images", season.id, result.items.len());
    result
}

/// Attach cached thumbnails. Items whose thumbnail fails keep using
/// their full image in the grid.
pub fn attach_thumbnails(seasons: &mut [Season], cache_dir: &Path) {
    for item in seasons.iter_mut().flat_map(|s| s.items.iter_mut()) {
        match thumbnail::ensure_thumbnail(cache_dir, &item.image_path) {
            Ok(path) => item.thumbnail = Some(path),
            Err(e) => log::warn!("Thumbnail failed for {}: {}", item.image_path.display(), e),
        }
    }
}

/// Scan every configured season and build thumbnails
pub fn scan_gallery_blocking(config: &GalleryConfig, cache_dir: Option<&Path>) -> Vec<Season> {
    let mut seasons: Vec<Season> = config
        .seasons
        .iter()
        .map(|season| scan_season(season, &config.season_dir(season)))
        .collect();

    if let Some(cache_dir) = cache_dir {
        attach_thumbnails(&mut seasons, cache_dir);
    }

    seasons
}

/// Async function to scan the whole gallery
/// Runs in a background thread to avoid blocking the UI
pub async fn scan_gallery(config: GalleryConfig) -> Result<Vec<Season>> {
    tokio::task::spawn_blocking(move || {
        let cache_dir: Option<PathBuf> = match thumbnail::thumbnail_cache_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                log::warn!("Thumbnails disabled: {}", e);
                None
            }
        };
        scan_gallery_blocking(&config, cache_dir.as_deref())
    })
    .await
    .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::tempdir;

    fn write_image(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbImage::from_pixel(32, 16, Rgb([10, 120, 200])).save(path).unwrap();
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a.JPG")));
        assert!(is_image(Path::new("dir/b.webp")));
        assert!(!is_image(Path::new("captions.json")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("first-robot_reveal"), "First Robot Reveal");
        assert_eq!(humanize("team"), "Team");
        assert_eq!(humanize("--"), "");
    }

    #[test]
    fn test_scan_categories_and_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_image(&root.join("kickoff.png"));
        write_image(&root.join("competition/finals.png"));
        write_image(&root.join("competition/alliance-selection.png"));
        write_image(&root.join("outreach/library_demo.png"));
        fs::write(root.join("notes.txt"), "skip me").unwrap();

        let items = scan_items(root);
        let summary: Vec<(&str, &str)> = items
            .iter()
            .map(|i| (i.category.as_str(), i.caption.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("competition", "Alliance Selection"),
                ("competition", "Finals"),
                ("general", "Kickoff"),
                ("outreach", "Library Demo"),
            ]
        );
    }

    #[test]
    fn test_captions_override() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_image(&root.join("build/arm.png"));
        write_image(&root.join("pit.png"));
        fs::write(
            root.join(CAPTIONS_FILE),
            r#"{
                "build/arm.png": { "title": "Arm Prototype", "description": "Third iteration" },
                "pit.png": { "category": "competition" }
            }"#,
        )
        .unwrap();

        let items = scan_items(root);
        assert_eq!(items[0].caption, "Arm Prototype");
        assert_eq!(items[0].description.as_deref(), Some("Third iteration"));
        assert_eq!(items[0].category, "build");
        assert_eq!(items[1].caption, "Pit");
        assert_eq!(items[1].category, "competition");
    }

    #[test]
    fn test_invalid_captions_are_ignored() {
        let dir = tempdir().unwrap();
        write_image(&dir.path().join("a.png"));
        fs::write(dir.path().join(CAPTIONS_FILE), "[1, 2").unwrap();

        let items = scan_items(dir.path());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].caption, "A");
    }

    #[test]
    fn test_missing_season_folder_is_empty() {
        let season = SeasonConfig {
            id: "2023".to_string(),
            name: "2023 Season".to_string(),
            image_path: "2023".to_string(),
        };
        let result = scan_season(&season, Path::new("/nonexistent/images/2023"));
        assert_eq!(result.id, "2023");
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_scan_gallery_with_thumbnails() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("images");
        write_image(&root.join("2025/team/photo.png"));
        let cache = dir.path().join("cache");
        fs::create_dir_all(&cache).unwrap();

        let config = GalleryConfig {
            gallery_root: root,
            ..GalleryConfig::default()
        };
        let seasons = scan_gallery_blocking(&config, Some(&cache));

        assert_eq!(seasons.len(), 3);
        assert_eq!(seasons[0].items.len(), 1);
        assert!(seasons[1].items.is_empty());
        let thumb = seasons[0].items[0].thumbnail.as_ref().unwrap();
        assert!(thumb.starts_with(&cache));
        assert!(thumb.exists());
    }
}
