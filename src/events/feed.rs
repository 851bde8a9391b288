//! Events feed parsing and timeline building.
//!
//! The feed is a static JSON file of the form
//! `{ "events": [ { "date": "2025-03-14", "title": ..., "type": ..., ... } ] }`.
//! Events are sorted by date, given a stable id, and grouped by month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{GalleryError, Result};
use crate::state::data::capitalize;

/// Date format used by the feed
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shown when the feed has the wrong shape
pub const FORMAT_ERROR_MESSAGE: &str = "Unable to load events. Data format error.";
/// Heading shown when the feed is valid but has no events
pub const EMPTY_TITLE: &str = "No upcoming events";
/// Body shown when the feed is valid but has no events
pub const EMPTY_BODY: &str = "Check back soon for new events!";

/// One event exactly as it appears in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventRecord {
    /// Parsed date, None if the feed date is malformed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// An event ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// Stable id used as the reminder key
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    /// Event type, "meeting" when the feed has none
    pub kind: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl TimelineEntry {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// "JAN", "FEB", ...
    pub fn month_abbr(&self) -> String {
        self.date.format("%b").to_string().to_uppercase()
    }

    /// "Monday", "Tuesday", ...
    pub fn weekday(&self) -> String {
        self.date.format("%A").to_string()
    }

    /// Capitalized type for the badge
    pub fn badge(&self) -> String {
        capitalize(&self.kind)
    }
}

/// Events sharing a calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    /// "January 2025"
    pub label: String,
    pub entries: Vec<TimelineEntry>,
}

/// The rendered timeline, months in chronological order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    pub months: Vec<MonthGroup>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.months.iter().flat_map(|m| m.entries.iter())
    }
}

/// Parse the feed JSON.
///
/// The document must be an object with an `events` array. Individual
/// events that cannot be read are skipped with a warning.
pub fn parse_feed(json: &str) -> Result<Vec<EventRecord>> {
    let document: serde_json::Value = serde_json::from_str(json)?;

    let events = document
        .get("events")
        .and_then(|events| events.as_array())
        .ok_or_else(|| GalleryError::InvalidFeed {
            message: "expected an object with an 'events' array".to_string(),
        })?;

    let records = events
        .iter()
        .enumerate()
        .filter_map(|(i, value)| match EventRecord::deserialize(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping event {} in feed: {}", i, e);
                None
            }
        })
        .collect();

    Ok(records)
}

/// Sort events ascending by date. Stable; malformed dates go last.
pub fn sort_events(events: &mut [EventRecord]) {
    events.sort_by_key(|e| match e.parsed_date() {
        Some(date) => (false, date),
        None => (true, NaiveDate::MIN),
    });
}

/// Synthesize the id for the event at sorted position `index`:
/// `event-{date}-{safe title}-{index}`
pub fn event_id(record: &EventRecord, index: usize) -> String {
    let title = match record.title.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => "event",
    };
    format!("event-{}-{}-{}", record.date, safe_title(title), index)
}

/// Lowercase, whitespace runs to '-', drop anything outside [a-z0-9-]
fn safe_title(title: &str) -> String {
    let lower = title.to_lowercase();
    let dashed = lower.split_whitespace().collect::<Vec<_>>().join("-");
    let leading = if lower.starts_with(char::is_whitespace) { "-" } else { "" };
    let trailing = if lower.ends_with(char::is_whitespace) && !dashed.is_empty() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", leading, dashed, trailing)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Sort, assign ids and group by month. Events with malformed dates
/// keep their index (so later ids are stable) but are not shown.
pub fn build_timeline(mut records: Vec<EventRecord>) -> Timeline {
    sort_events(&mut records);

    let mut months: Vec<MonthGroup> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let Some(date) = record.parsed_date() else {
            log::warn!(
                "Invalid date format for event \"{}\": {}. Skipping.",
                record.title.as_deref().unwrap_or("Untitled"),
                record.date
            );
            continue;
        };

        let entry = TimelineEntry {
            id: event_id(record, index),
            date,
            title: record
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled Event".to_string()),
            kind: record
                .kind
                .clone()
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| "meeting".to_string()),
            time: record.time.clone(),
            location: record.location.clone(),
            description: record.description.clone(),
        };

        let label = date.format("%B %Y").to_string();
        match months.last_mut() {
            Some(group) if group.label == label => group.entries.push(entry),
            _ => months.push(MonthGroup {
                label,
                entries: vec![entry],
            }),
        }
    }

    Timeline { months }
}

/// Read and build the timeline from the feed file
pub async fn load_timeline(path: PathBuf) -> Result<Timeline> {
    let json = tokio::fs::read_to_string(&path).await?;
    let records = parse_feed(&json)?;
    let timeline = build_timeline(records);
    log::info!(
        "Loaded {} events from {}",
        timeline.entries().count(),
        path.display()
    );
    Ok(timeline)
}

/// User-facing message for a feed that could not be loaded
pub fn fallback_message(error: &GalleryError) -> String {
    match error {
        GalleryError::InvalidFeed { .. } => FORMAT_ERROR_MESSAGE.to_string(),
        other => format!("Unable to load events. {}. Please try again later.", other),
    }
}
