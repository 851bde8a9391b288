/// View functions
///
/// Everything here only reads state and builds widgets; all mutation
/// happens in `GalleryApp::update`.
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, horizontal_space, row, stack, text};
use iced::{Alignment, Border, Color, Element, Length, Theme};

pub mod gallery;
pub mod modal;
pub mod timeline;

use crate::Message;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Gallery,
    Events,
}

/// Team name, page switcher and folder picker
pub fn top_bar(page: Page) -> Element<'static, Message> {
    let tab = |label: &'static str, target: Page| {
        let style = if page == target {
            button::primary
        } else {
            button::secondary
        };
        button(text(label)).on_press(Message::PageSelected(target)).style(style)
    };

    row![
        text("Lake City Ultrabots").size(22),
        horizontal_space(),
        tab("Gallery", Page::Gallery),
        tab("Events", Page::Events),
        button(text("Open Gallery Folder"))
            .on_press(Message::OpenGalleryFolder)
            .style(button::text),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// Show `message` in the bottom-right corner over `base`
pub fn toast_overlay<'a>(base: Element<'a, Message>, message: Option<&'a str>) -> Element<'a, Message> {
    let Some(message) = message else {
        return base;
    };

    let toast = container(text(message).size(14).color(Color::WHITE))
        .padding([12, 20])
        .max_width(300.0)
        .style(|_theme: &Theme| container::Style {
            background: Some(Color::from_rgb8(0x2c, 0x3e, 0x50).into()),
            border: Border {
                radius: 4.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    stack![
        base,
        container(toast)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Right)
            .align_y(Vertical::Bottom)
            .padding(20),
    ]
    .into()
}
