/// The gallery controller
///
/// Owns every piece of gallery state: the season list, the active
/// category filter, the visible set derived from both, the modal viewer
/// and the in-flight visual transitions. The app holds exactly one and
/// mutates it from its update loop.
use std::path::PathBuf;

use super::data::{CategoryFilter, GalleryItem, Season};
use super::filter::{categories, visible_positions};
use super::modal::ModalViewer;
use super::season::{SeasonNav, SeasonSelector};
use super::transition::Transition;

/// Request to preload an image before it replaces the one in the modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Generation the load completion must report back
    pub generation: u64,
    /// Season position of the item being loaded
    pub position: usize,
    /// File to preload
    pub image_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GalleryController {
    seasons: SeasonSelector,
    filter: CategoryFilter,
    /// Every category present in any season, first-seen order
    categories: Vec<String>,
    /// Season positions of the items passing the filter, in display order
    visible: Vec<usize>,
    modal: ModalViewer,
    season_fade: Transition,
    image_swap: Transition,
    /// Item being preloaded for the modal
    swap_target: Option<usize>,
    /// Preload finished, fade-out running
    swap_fading: bool,
    /// Item whose image and caption are currently in the modal
    displayed: Option<usize>,
}

impl GalleryController {
    /// Build a controller showing the newest season with no filter
    pub fn new(seasons: Vec<Season>) -> Self {
        let categories = categories(seasons.iter().flat_map(|s| s.items.iter()));
        let mut controller = Self {
            seasons: SeasonSelector::new(seasons),
            filter: CategoryFilter::All,
            categories,
            visible: Vec::new(),
            modal: ModalViewer::default(),
            season_fade: Transition::default(),
            image_swap: Transition::default(),
            swap_target: None,
            swap_fading: false,
            displayed: None,
        };
        controller.recompute_visible();
        controller
    }

    /// Swap in a freshly scanned season list.
    ///
    /// Transition generations carry over and anything in flight is
    /// cancelled, so completions issued against the old seasons can never
    /// match a request made against the new ones. The filter is kept when
    /// its category still exists and falls back to `All` otherwise.
    pub fn replace_seasons(&mut self, seasons: Vec<Season>) {
        let filter = std::mem::take(&mut self.filter);
        let mut season_fade = self.season_fade;
        let mut image_swap = self.image_swap;
        season_fade.cancel();
        image_swap.cancel();

        *self = Self::new(seasons);
        self.season_fade = season_fade;
        self.image_swap = image_swap;

        let filter = match filter {
            CategoryFilter::Tag(tag) if !self.categories.contains(&tag) => CategoryFilter::All,
            filter => filter,
        };
        self.apply_filter(filter);
    }

    // ========== Seasons ==========

    pub fn seasons(&self) -> &[Season] {
        self.seasons.seasons()
    }

    pub fn current_season_index(&self) -> usize {
        self.seasons.current_index()
    }

    pub fn current_season(&self) -> Option<&Season> {
        self.seasons.current()
    }

    pub fn season_nav(&self) -> SeasonNav {
        self.seasons.nav()
    }

    /// Switch seasons. Out-of-range indices are ignored and return None.
    ///
    /// The visible set is recomputed immediately and the modal is closed.
    /// The returned generation identifies the fade that hides the grid
    /// until `finish_season_fade` is called with it.
    pub fn select_season(&mut self, index: usize) -> Option<u64> {
        if !self.seasons.select(index) {
            return None;
        }
        self.close();
        self.recompute_visible();
        let generation = self.season_fade.begin();
        log::debug!(
            "Season {} selected ({} visible items)",
            index,
            self.visible.len()
        );
        Some(generation)
    }

    /// Step to the next newer season, if there is one
    pub fn show_newer(&mut self) -> Option<u64> {
        let index = self.seasons.newer_index()?;
        self.select_season(index)
    }

    /// Step to the next older season, if there is one
    pub fn show_older(&mut self) -> Option<u64> {
        let index = self.seasons.older_index()?;
        self.select_season(index)
    }

    /// End the season fade. Stale generations are ignored.
    pub fn finish_season_fade(&mut self, generation: u64) -> bool {
        self.season_fade.finish(generation)
    }

    /// Is the grid hidden for a season fade?
    pub fn is_season_fading(&self) -> bool {
        self.season_fade.is_pending()
    }

    // ========== Category filter ==========

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Replace the active filter and recompute the visible set.
    ///
    /// An open modal stays on its item when the item is still visible
    /// and closes otherwise.
    pub fn apply_filter(&mut self, filter: CategoryFilter) {
        let shown = self.current_position();
        self.filter = filter;
        self.recompute_visible();

        if let Some(position) = shown {
            match self.visible.iter().position(|&p| p == position) {
                Some(index) => {
                    self.modal.open(index, self.visible.len());
                }
                None => {
                    self.close();
                }
            }
        }
    }

    fn recompute_visible(&mut self) {
        self.visible = match self.seasons.current() {
            Some(season) => visible_positions(&season.items, &self.filter),
            None => Vec::new(),
        };
    }

    /// Season positions of the visible items, in display order
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Visible items with their season positions
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, &GalleryItem)> + '_ {
        let items = self.current_season().map(|s| s.items.as_slice()).unwrap_or(&[]);
        self.visible
            .iter()
            .filter_map(move |&p| items.get(p).map(|item| (p, item)))
    }

    fn item(&self, position: usize) -> Option<&GalleryItem> {
        self.current_season()?.items.get(position)
    }

    // ========== Modal viewer ==========

    pub fn modal_is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// Open the modal on the item at season `position`.
    ///
    /// Items outside the visible set are rejected. Opening while already
    /// open closes the current view and reopens on the new item.
    pub fn open(&mut self, position: usize) -> bool {
        let Some(index) = self.visible.iter().position(|&p| p == position) else {
            return false;
        };
        if self.modal.is_open() {
            self.close();
        }
        if !self.modal.open(index, self.visible.len()) {
            return false;
        }
        self.displayed = Some(position);
        log::debug!("Modal opened on item {}", position);
        true
    }

    /// Advance to the next visible item (wrapping)
    pub fn next(&mut self) -> Option<ImageRequest> {
        let index = self.modal.next(self.visible.len())?;
        self.request_image(index)
    }

    /// Go back to the previous visible item (wrapping)
    pub fn prev(&mut self) -> Option<ImageRequest> {
        let index = self.modal.prev(self.visible.len())?;
        self.request_image(index)
    }

    /// Preload the bounded image for the item already on screen
    pub fn refresh_image(&mut self) -> Option<ImageRequest> {
        let index = self.modal.index()?;
        self.request_image(index)
    }

    fn request_image(&mut self, index: usize) -> Option<ImageRequest> {
        let position = *self.visible.get(index)?;
        let image_path = self.item(position)?.image_path.clone();
        let generation = self.image_swap.begin();
        self.swap_target = Some(position);
        self.swap_fading = false;
        Some(ImageRequest {
            generation,
            position,
            image_path,
        })
    }

    /// The preload for `generation` finished: start the fade-out.
    /// Returns false if a newer request or a close superseded it.
    pub fn image_loaded(&mut self, generation: u64) -> bool {
        if !self.image_swap.is_current(generation) {
            return false;
        }
        self.swap_fading = true;
        true
    }

    /// Fade-out done: the preloaded item becomes the displayed item.
    pub fn finish_image_swap(&mut self, generation: u64) -> bool {
        if !self.image_swap.finish(generation) {
            return false;
        }
        self.swap_fading = false;
        if let Some(position) = self.swap_target.take() {
            self.displayed = Some(position);
        }
        true
    }

    pub fn is_image_fading(&self) -> bool {
        self.swap_fading
    }

    /// Generation of the image load still in flight, if any
    pub fn image_swap_in_flight(&self) -> Option<u64> {
        self.image_swap.in_flight()
    }

    /// Is the load in flight for the item already on screen?
    pub fn is_refreshing_displayed(&self) -> bool {
        self.swap_target.is_some() && self.swap_target == self.displayed
    }

    /// Close the modal and drop any image swap in flight
    pub fn close(&mut self) -> bool {
        self.image_swap.cancel();
        self.swap_target = None;
        self.swap_fading = false;
        self.displayed = None;
        self.modal.close()
    }

    /// Season position the modal is navigated to (may still be loading)
    pub fn current_position(&self) -> Option<usize> {
        let index = self.modal.index()?;
        self.visible.get(index).copied()
    }

    /// Season position whose image and caption are on screen
    pub fn displayed_position(&self) -> Option<usize> {
        self.displayed
    }

    pub fn displayed_item(&self) -> Option<&GalleryItem> {
        self.item(self.displayed?)
    }

    /// "3 / 12" style counter for the modal
    pub fn modal_counter(&self) -> Option<(usize, usize)> {
        self.modal.index().map(|i| (i + 1, self.visible.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(id: &str, tags: &[&str]) -> Season {
        let mut season = Season::empty(id, format!("{} Season", id), format!("images/{}", id));
        season.items = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| GalleryItem::new(*tag, format!("images/{}/{}.jpg", id, i), format!("Photo {}", i)))
            .collect();
        season
    }

    fn site_gallery() -> GalleryController {
        GalleryController::new(vec![
            season("2025", &["A", "B", "A", "C"]),
            season("2024", &[]),
            season("2023", &[]),
        ])
    }

    #[test]
    fn test_starts_on_newest_season_showing_all() {
        let g = site_gallery();
        assert_eq!(g.current_season_index(), 0);
        assert_eq!(g.visible(), &[0, 1, 2, 3]);
        assert_eq!(g.categories(), &["A", "B", "C"]);
        assert!(!g.modal_is_open());
    }

    #[test]
    fn test_select_season_sets_index_and_nav() {
        let mut g = site_gallery();
        for index in [1, 2, 0, 2] {
            assert!(g.select_season(index).is_some());
            assert_eq!(g.current_season_index(), index);
            let nav = g.season_nav();
            assert_eq!(nav.newer.enabled, index != 0);
            assert_eq!(nav.older.enabled, index != 2);
        }
        assert!(g.select_season(3).is_none());
        assert_eq!(g.current_season_index(), 2);
    }

    #[test]
    fn test_newer_older_stop_at_boundaries() {
        let mut g = site_gallery();
        assert!(g.show_newer().is_none());
        assert!(g.show_older().is_some());
        assert!(g.show_older().is_some());
        assert!(g.show_older().is_none());
        assert_eq!(g.current_season_index(), 2);
    }

    #[test]
    fn test_empty_season_keeps_modal_closed() {
        let mut g = site_gallery();
        g.select_season(1);

        assert!(g.visible().is_empty());
        for position in 0..4 {
            assert!(!g.open(position));
        }
        assert!(!g.modal_is_open());
        assert!(g.next().is_none());
        assert!(g.prev().is_none());
    }

    #[test]
    fn test_filter_then_navigate() {
        let mut g = GalleryController::new(vec![season("2025", &["A", "B", "A"])]);
        g.apply_filter(CategoryFilter::from_tag("A"));
        assert_eq!(g.visible(), &[0, 2]);

        let first = g.visible()[0];
        assert!(g.open(first));
        let request = g.next().unwrap();

        assert_eq!(request.position, 2);
        assert_eq!(g.current_position(), Some(2));
        assert!(g.image_loaded(request.generation));
        assert!(g.finish_image_swap(request.generation));
        assert_eq!(g.displayed_position(), Some(2));
        assert_eq!(g.displayed_item().unwrap().caption, "Photo 2");
    }

    #[test]
    fn test_filter_present_tag_is_strict_ordered_subset() {
        let mut g = site_gallery();
        g.apply_filter(CategoryFilter::from_tag("A"));
        let items = &g.current_season().unwrap().items;

        assert!(g.visible().len() < items.len());
        assert!(g.visible().windows(2).all(|w| w[0] < w[1]));
        assert!(g.visible_items().all(|(_, item)| item.category == "A"));
    }

    #[test]
    fn test_filter_is_global_across_seasons() {
        let mut g = GalleryController::new(vec![
            season("2025", &["A", "B"]),
            season("2024", &["B", "A", "B"]),
        ]);
        g.apply_filter(CategoryFilter::from_tag("B"));
        g.select_season(1);
        assert_eq!(g.visible(), &[0, 2]);
    }

    #[test]
    fn test_open_invisible_item_is_rejected() {
        let mut g = site_gallery();
        g.apply_filter(CategoryFilter::from_tag("A"));

        assert!(!g.open(1));
        assert!(!g.open(3));
        assert!(!g.open(99));
        assert!(!g.modal_is_open());
        assert_eq!(g.current_position(), None);
    }

    #[test]
    fn test_next_cycle_returns_to_start() {
        let mut g = site_gallery();
        g.open(2);
        let n = g.visible().len();
        for _ in 0..n {
            g.next();
        }
        assert_eq!(g.current_position(), Some(2));
    }

    #[test]
    fn test_prev_next_identity() {
        let mut g = site_gallery();
        g.open(0);
        g.prev();
        assert_eq!(g.current_position(), Some(3));
        g.next();
        assert_eq!(g.current_position(), Some(0));
    }

    #[test]
    fn test_stale_image_swap_is_ignored() {
        let mut g = site_gallery();
        g.open(0);
        let first = g.next().unwrap();
        let second = g.next().unwrap();

        assert!(!g.image_loaded(first.generation));
        assert!(!g.finish_image_swap(first.generation));
        assert_eq!(g.displayed_position(), Some(0));

        assert!(g.image_loaded(second.generation));
        assert!(g.is_image_fading());
        assert!(g.finish_image_swap(second.generation));
        assert_eq!(g.displayed_position(), Some(2));
    }

    #[test]
    fn test_close_cancels_swap() {
        let mut g = site_gallery();
        g.open(0);
        let request = g.next().unwrap();
        assert!(g.close());
        assert!(!g.image_loaded(request.generation));
        assert!(!g.finish_image_swap(request.generation));
        assert!(!g.close());
        assert_eq!(g.displayed_item(), None);
    }

    #[test]
    fn test_reopen_closes_then_opens_new_item() {
        let mut g = site_gallery();
        g.open(0);
        let request = g.next().unwrap();
        assert!(g.open(3));

        assert_eq!(g.current_position(), Some(3));
        assert_eq!(g.displayed_position(), Some(3));
        assert!(!g.finish_image_swap(request.generation));
    }

    #[test]
    fn test_filter_while_open_keeps_or_closes() {
        let mut g = site_gallery();
        g.open(2);
        g.apply_filter(CategoryFilter::from_tag("A"));
        assert_eq!(g.current_position(), Some(2));
        assert_eq!(g.modal_counter(), Some((2, 2)));

        g.apply_filter(CategoryFilter::from_tag("B"));
        assert!(!g.modal_is_open());
    }

    #[test]
    fn test_season_change_closes_modal_and_fades() {
        let mut g = site_gallery();
        g.open(1);
        let first = g.select_season(1).unwrap();
        let second = g.select_season(0).unwrap();

        assert!(!g.modal_is_open());
        assert!(g.is_season_fading());
        assert!(!g.finish_season_fade(first));
        assert!(g.is_season_fading());
        assert!(g.finish_season_fade(second));
        assert!(!g.is_season_fading());
    }

    #[test]
    fn test_no_seasons_is_inert() {
        let mut g = GalleryController::new(Vec::new());
        assert!(g.visible().is_empty());
        assert!(g.select_season(0).is_none());
        assert!(!g.open(0));
        g.apply_filter(CategoryFilter::from_tag("A"));
        assert!(g.visible_items().next().is_none());
    }

    #[test]
    fn test_rescan_keeps_generations_moving_forward() {
        let mut g = GalleryController::new(vec![season("2025", &["A", "B"])]);
        g.open(0);
        let stale = g.next().unwrap();

        g.replace_seasons(vec![season("2025", &["A", "B"])]);
        assert!(!g.modal_is_open());
        assert!(!g.is_season_fading());

        g.open(0);
        let fresh = g.next().unwrap();
        assert!(fresh.generation > stale.generation);
        assert!(!g.image_loaded(stale.generation));
        assert!(!g.finish_image_swap(stale.generation));
        assert_eq!(g.displayed_position(), Some(0));
    }

    #[test]
    fn test_rescan_drops_filter_for_missing_category() {
        let mut g = site_gallery();
        g.apply_filter(CategoryFilter::from_tag("C"));
        g.replace_seasons(vec![season("2025", &["A", "B"])]);
        assert_eq!(g.filter(), &CategoryFilter::All);
        assert_eq!(g.visible(), &[0, 1]);

        g.apply_filter(CategoryFilter::from_tag("B"));
        g.replace_seasons(vec![season("2025", &["B", "A", "B"])]);
        assert_eq!(g.filter(), &CategoryFilter::from_tag("B"));
        assert_eq!(g.visible(), &[0, 2]);
    }

    #[test]
    fn test_refresh_image_keeps_item_and_swaps_in_place() {
        let mut g = site_gallery();
        g.open(1);
        let request = g.refresh_image().unwrap();

        assert_eq!(request.position, 1);
        assert!(g.is_refreshing_displayed());
        assert_eq!(g.image_swap_in_flight(), Some(request.generation));
        assert!(g.image_loaded(request.generation));
        assert!(g.finish_image_swap(request.generation));
        assert_eq!(g.displayed_position(), Some(1));
        assert_eq!(g.image_swap_in_flight(), None);
    }
}
