/// State management module
///
/// This module holds all gallery state, with no UI types:
/// - Shared data structures (data.rs)
/// - Season selection and navigation buttons (season.rs)
/// - Category filtering (filter.rs)
/// - The modal viewer state machine (modal.rs)
/// - Generation-tagged transitions (transition.rs)
/// - The controller tying them together (gallery.rs)

pub mod data;
pub mod filter;
pub mod gallery;
pub mod modal;
pub mod season;
pub mod transition;

pub use data::{CategoryFilter, GalleryItem, Season};
pub use gallery::{GalleryController, ImageRequest};
