/// Events timeline module
///
/// This module handles:
/// - Reading and sorting the static events feed (feed.rs)
/// - Persisting per-event reminders (reminders.rs)

pub mod feed;
pub mod reminders;

pub use feed::{Timeline, TimelineEntry};
pub use reminders::ReminderStore;
