/// Modal image viewer overlay
use iced::widget::image::Handle;
use iced::widget::{button, center, column, container, horizontal_space, image, mouse_area, opaque, row, stack, text};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Theme};

use crate::input::Input;
use crate::state::GalleryController;
use crate::Message;

/// Image opacity while fading out before a swap
const FADED_OPACITY: f32 = 0.2;

/// Lay the modal over `base` when it is open.
///
/// The backdrop is opaque to the widgets below it, so the grid cannot be
/// scrolled or clicked while the modal is up; a click on the backdrop
/// itself closes the modal.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    gallery: &'a GalleryController,
    image_handle: Option<&'a Handle>,
) -> Element<'a, Message> {
    if !gallery.modal_is_open() {
        return base;
    }

    let backdrop = center(opaque(content(gallery, image_handle))).style(|_theme: &Theme| container::Style {
        background: Some(
            Color {
                a: 0.85,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    });

    stack![
        base,
        opaque(mouse_area(backdrop).on_press(Message::Input(Input::BackdropClicked)))
    ]
    .into()
}

fn content<'a>(gallery: &'a GalleryController, image_handle: Option<&'a Handle>) -> Element<'a, Message> {
    let close = button(text("×").size(28))
        .on_press(Message::Input(Input::CloseClicked))
        .style(button::text);

    let picture: Element<'a, Message> = match image_handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .opacity(if gallery.is_image_fading() { FADED_OPACITY } else { 1.0 })
            .into(),
        None => center(text("Image unavailable").size(18)).into(),
    };

    let prev = button(text("‹").size(36))
        .on_press(Message::Input(Input::PrevClicked))
        .style(button::text);
    let next = button(text("›").size(36))
        .on_press(Message::Input(Input::NextClicked))
        .style(button::text);

    let mut caption = column![].spacing(4);
    if let Some(item) = gallery.displayed_item() {
        caption = caption.push(text(&item.caption).size(20));
        if let Some(description) = &item.description {
            caption = caption.push(text(description).size(15));
        }
    }

    let counter = gallery
        .modal_counter()
        .map(|(n, total)| format!("{} / {}", n, total))
        .unwrap_or_default();

    container(
        column![
            row![horizontal_space(), close],
            row![prev, picture, next]
                .align_y(Alignment::Center)
                .height(Length::FillPortion(1)),
            row![caption, horizontal_space(), text(counter).size(14)].align_y(Alignment::End),
        ]
        .spacing(8),
    )
    .width(Length::Fill)
    .max_width(1100.0)
    .height(Length::Fixed(760.0))
    .padding(16)
    .style(|_theme: &Theme| container::Style {
        background: Some(Color::from_rgb8(0x1e, 0x1f, 0x24).into()),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    })
    .into()
}
