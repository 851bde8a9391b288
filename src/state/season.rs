/// Season selection and the newer/older navigation buttons
use super::data::Season;

/// Label on the "newer" button when there is no newer season
const NEWER_FALLBACK_LABEL: &str = "Next Year";
/// Label on the "older" button when there is no older season
const OLDER_FALLBACK_LABEL: &str = "Previous Year";

/// State of one navigation button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    pub enabled: bool,
}

/// Both season navigation buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonNav {
    /// Steps towards index 0 (the newest season)
    pub newer: NavButton,
    /// Steps towards the last index (the oldest season)
    pub older: NavButton,
}

/// Tracks which season is shown. Seasons are fixed at construction;
/// only the current index changes.
#[derive(Debug, Clone)]
pub struct SeasonSelector {
    seasons: Vec<Season>,
    current: usize,
}

impl SeasonSelector {
    /// Start on the newest season (index 0)
    pub fn new(seasons: Vec<Season>) -> Self {
        Self { seasons, current: 0 }
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The season being shown, None only when no seasons are configured
    pub fn current(&self) -> Option<&Season> {
        self.seasons.get(self.current)
    }

    /// Switch to `index`. Out of range is a no-op and returns false.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.seasons.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Index of the next newer season, if any
    pub fn newer_index(&self) -> Option<usize> {
        self.current.checked_sub(1)
    }

    /// Index of the next older season, if any
    pub fn older_index(&self) -> Option<usize> {
        let next = self.current + 1;
        (next < self.seasons.len()).then_some(next)
    }

    /// Button labels and enabled state for the current index
    pub fn nav(&self) -> SeasonNav {
        let newer = match self.newer_index() {
            Some(i) => NavButton {
                label: self.seasons[i].id.clone(),
                enabled: true,
            },
            None => NavButton {
                label: NEWER_FALLBACK_LABEL.to_string(),
                enabled: false,
            },
        };
        let older = match self.older_index() {
            Some(i) => NavButton {
                label: self.seasons[i].id.clone(),
                enabled: true,
            },
            None => NavButton {
                label: OLDER_FALLBACK_LABEL.to_string(),
                enabled: false,
            },
        };
        SeasonNav { newer, older }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> SeasonSelector {
        SeasonSelector::new(vec![
            Season::empty("2025", "2025 Season", "images/2025"),
            Season::empty("2024", "2024 Season", "images/2024"),
            Season::empty("2023", "2023 Season", "images/2023"),
        ])
    }

    #[test]
    fn test_select_in_range() {
        let mut s = selector();
        for index in [2, 0, 1, 1, 2] {
            assert!(s.select(index));
            assert_eq!(s.current_index(), index);
        }
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut s = selector();
        s.select(1);
        assert!(!s.select(3));
        assert!(!s.select(usize::MAX));
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_nav_disabled_exactly_at_boundaries() {
        let mut s = selector();
        for index in 0..s.len() {
            s.select(index);
            let nav = s.nav();
            assert_eq!(nav.newer.enabled, index != 0);
            assert_eq!(nav.older.enabled, index != s.len() - 1);
        }
    }

    #[test]
    fn test_nav_labels_show_adjacent_years() {
        let mut s = selector();
        let nav = s.nav();
        assert_eq!(nav.newer.label, "Next Year");
        assert_eq!(nav.older.label, "2024");

        s.select(1);
        let nav = s.nav();
        assert_eq!(nav.newer.label, "2025");
        assert_eq!(nav.older.label, "2023");

        s.select(2);
        assert_eq!(s.nav().older.label, "Previous Year");
    }

    #[test]
    fn test_no_seasons() {
        let mut s = SeasonSelector::new(Vec::new());
        assert!(s.current().is_none());
        assert!(!s.select(0));
        assert!(!s.nav().newer.enabled);
        assert!(!s.nav().older.enabled);
    }
}
