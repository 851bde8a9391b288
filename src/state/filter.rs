/// Category filtering of a season's items
use super::data::{CategoryFilter, GalleryItem};

/// Positions of the items that pass `filter`, in their original order.
pub fn visible_positions(items: &[GalleryItem], filter: &CategoryFilter) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(position, _)| position)
        .collect()
}

/// Distinct categories across `items`, in order of first appearance
pub fn categories<'a>(items: impl IntoIterator<Item = &'a GalleryItem>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|c| *c == item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(tags: &[&str]) -> Vec<GalleryItem> {
        tags.iter()
            .enumerate()
            .map(|(i, tag)| GalleryItem::new(*tag, format!("/img/{}.jpg", i), format!("Photo {}", i)))
            .collect()
    }

    #[test]
    fn test_all_keeps_everything_in_order() {
        let items = items(&["a", "b", "a", "c"]);
        assert_eq!(visible_positions(&items, &CategoryFilter::All), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_tag_filter_is_stable_subset() {
        let items = items(&["c", "a", "b", "a", "c", "a"]);
        let filter = CategoryFilter::from_tag("a");
        let visible = visible_positions(&items, &filter);

        assert_eq!(visible, vec![1, 3, 5]);
        assert!(visible.len() < items.len());
        assert!(visible.windows(2).all(|w| w[0] < w[1]));
        assert!(visible.iter().all(|&p| items[p].category == "a"));
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let items = items(&["a", "b"]);
        assert!(visible_positions(&items, &CategoryFilter::from_tag("z")).is_empty());
        assert!(visible_positions(&[], &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let items = items(&["team", "build", "team", "outreach", "build"]);
        assert_eq!(categories(&items), vec!["team", "build", "outreach"]);
    }
}
