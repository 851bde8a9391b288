/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the folder scanner and the UI layer.
use std::path::PathBuf;

/// Category assigned to images that sit directly in a season folder
pub const DEFAULT_CATEGORY: &str = "general";

/// Represents a single photo in a season
///
/// There is no persistent id: an item is identified by its position
/// in its season's item list.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    /// Category tag used by the filter tabs (e.g., "competition")
    pub category: String,
    /// Full path to the full-size image
    pub image_path: PathBuf,
    /// Caption title shown under the image
    pub caption: String,
    /// Optional longer caption text
    pub description: Option<String>,
    /// Path to the cached grid thumbnail (None if generation failed)
    pub thumbnail: Option<PathBuf>,
}

impl GalleryItem {
    /// Create an item with no description and no thumbnail yet
    pub fn new(category: impl Into<String>, image_path: impl Into<PathBuf>, caption: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            image_path: image_path.into(),
            caption: caption.into(),
            description: None,
            thumbnail: None,
        }
    }

    /// Image to show in the grid: the thumbnail when there is one
    pub fn grid_image(&self) -> &PathBuf {
        self.thumbnail.as_ref().unwrap_or(&self.image_path)
    }
}

/// A year of gallery content
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    /// Year string (e.g., "2025")
    pub id: String,
    /// Title shown above the grid (e.g., "2025 Season")
    pub display_name: String,
    /// Items in display order
    pub items: Vec<GalleryItem>,
    /// Folder the items were loaded from
    pub image_path_prefix: PathBuf,
}

impl Season {
    /// Create a season with no items
    pub fn empty(id: impl Into<String>, display_name: impl Into<String>, prefix: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            items: Vec::new(),
            image_path_prefix: prefix.into(),
        }
    }
}

/// Which category of the current season is shown
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every item of the season
    #[default]
    All,
    /// Only items whose category equals the tag
    Tag(String),
}

impl CategoryFilter {
    /// Build a filter from a tab value; `"all"` selects everything
    pub fn from_tag(tag: &str) -> Self {
        if tag == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Tag(tag.to_string())
        }
    }

    /// Does this filter let the item through?
    pub fn matches(&self, item: &GalleryItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Tag(tag) => item.category == *tag,
        }
    }

    /// Label for the filter tab
    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Tag(tag) => capitalize(tag),
        }
    }
}

/// Upper-case the first character ("competition" -> "Competition")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_tag() {
        assert_eq!(CategoryFilter::from_tag("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_tag("outreach"),
            CategoryFilter::Tag("outreach".to_string())
        );
    }

    #[test]
    fn test_filter_matches() {
        let item = GalleryItem::new("build", "/tmp/a.jpg", "A");
        assert!(CategoryFilter::All.matches(&item));
        assert!(CategoryFilter::from_tag("build").matches(&item));
        assert!(!CategoryFilter::from_tag("team").matches(&item));
    }

    #[test]
    fn test_labels() {
        assert_eq!(CategoryFilter::All.label(), "All");
        assert_eq!(CategoryFilter::from_tag("competition").label(), "Competition");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_grid_image_prefers_thumbnail() {
        let mut item = GalleryItem::new("team", "/photos/a.jpg", "A");
        assert_eq!(item.grid_image(), &PathBuf::from("/photos/a.jpg"));
        item.thumbnail = Some(PathBuf::from("/cache/1.jpg"));
        assert_eq!(item.grid_image(), &PathBuf::from("/cache/1.jpg"));
    }
}
