/// Gallery media module
///
/// This module handles:
/// - Scanning season folders into gallery items (scan.rs)
/// - Generating and caching grid thumbnails (thumbnail.rs)
/// - Preloading full images for the modal viewer (preview.rs)

pub mod preview;
pub mod scan;
pub mod thumbnail;
