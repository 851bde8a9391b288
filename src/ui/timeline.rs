/// Events page: month-grouped timeline with reminder buttons
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Border, Color, Element, Length, Theme};
use std::collections::HashSet;

use crate::events::feed::{EMPTY_BODY, EMPTY_TITLE};
use crate::events::{Timeline, TimelineEntry};
use crate::Message;

/// What the events page currently has to show
#[derive(Debug, Clone)]
pub enum TimelineState {
    Loading,
    Loaded(Timeline),
    /// User-facing fallback message
    Failed(String),
}

pub fn view<'a>(state: &'a TimelineState, reminded: &'a HashSet<String>) -> Element<'a, Message> {
    match state {
        TimelineState::Loading => fallback(text("Loading events...").size(18).into()),
        TimelineState::Failed(message) => fallback(text(message).size(18).into()),
        TimelineState::Loaded(timeline) if timeline.is_empty() => fallback(
            column![text(EMPTY_TITLE).size(22), text(EMPTY_BODY)]
                .spacing(6)
                .align_x(Alignment::Center)
                .into(),
        ),
        TimelineState::Loaded(timeline) => {
            let months = timeline.months.iter().fold(Column::new().spacing(12), |col, month| {
                let col = col.push(text(&month.label).size(24));
                month
                    .entries
                    .iter()
                    .fold(col, |col, entry| col.push(card(entry, reminded.contains(&entry.id))))
            });
            scrollable(months.padding(8)).height(Length::Fill).into()
        }
    }
}

fn fallback(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content).center_x(Length::Fill).padding(40).into()
}

fn card(entry: &TimelineEntry, reminder_set: bool) -> Element<'_, Message> {
    let date = column![
        text(entry.day().to_string()).size(32),
        text(entry.month_abbr()).size(14),
        text(entry.weekday()).size(12),
    ]
    .align_x(Alignment::Center)
    .width(90);

    let mut details = column![
        text(entry.badge()).size(12).color(Color::from_rgb8(0xf3, 0x9c, 0x12)),
        text(&entry.title).size(20),
    ]
    .spacing(4);

    let mut meta = row![].spacing(16);
    if let Some(time) = &entry.time {
        meta = meta.push(text(format!("🕒 {}", time)).size(14));
    }
    if let Some(location) = &entry.location {
        meta = meta.push(text(format!("📍 {}", location)).size(14));
    }
    details = details.push(meta);

    if let Some(description) = &entry.description {
        details = details.push(text(description).size(14));
    }

    let reminder = if reminder_set {
        button(text("✓ Reminder Set")).style(button::success)
    } else {
        button(text("🔔 Add Reminder"))
            .on_press(Message::ReminderRequested {
                event_id: entry.id.clone(),
                title: entry.title.clone(),
            })
            .style(button::primary)
    };
    details = details.push(row![horizontal_space(), reminder]);

    container(row![date, details].spacing(16).align_y(Alignment::Start))
        .width(Length::Fill)
        .padding(12)
        .style(|theme: &Theme| container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            border: Border {
                radius: 6.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}
