/// Gallery page: season header, category tabs and the thumbnail grid
use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, image, row, scrollable, text, Row};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::{CategoryFilter, GalleryController, GalleryItem};
use crate::Message;

/// Grid tile size in logical pixels
const TILE_WIDTH: f32 = 220.0;
const TILE_HEIGHT: f32 = 160.0;

pub fn view(gallery: &GalleryController) -> Element<'_, Message> {
    column![season_header(gallery), category_tabs(gallery), grid(gallery)]
        .spacing(16)
        .into()
}

/// Season title, newer/older buttons and the season dots
fn season_header(gallery: &GalleryController) -> Element<'_, Message> {
    let nav = gallery.season_nav();
    let title = gallery
        .current_season()
        .map(|s| s.display_name.clone())
        .unwrap_or_default();

    let newer = button(text(format!("‹ {}", nav.newer.label)))
        .on_press_maybe(nav.newer.enabled.then_some(Message::ShowNewerSeason))
        .style(button::secondary);
    let older = button(text(format!("{} ›", nav.older.label)))
        .on_press_maybe(nav.older.enabled.then_some(Message::ShowOlderSeason))
        .style(button::secondary);

    let dots: Row<'_, Message> = gallery
        .seasons()
        .iter()
        .enumerate()
        .fold(Row::new().spacing(6), |dots, (index, season)| {
            let symbol = if index == gallery.current_season_index() { "●" } else { "○" };
            dots.push(
                button(text(symbol))
                    .on_press(Message::SelectSeason(index))
                    .style(button::text)
                    .padding(2),
            )
            .push(text(&season.id).size(12))
        });

    column![
        row![newer, horizontal_space(), text(title).size(28), horizontal_space(), older]
            .align_y(Alignment::Center),
        container(dots).center_x(Length::Fill),
    ]
    .spacing(8)
    .into()
}

/// "All" plus one tab per category
fn category_tabs(gallery: &GalleryController) -> Element<'_, Message> {
    let filters = std::iter::once(CategoryFilter::All).chain(
        gallery
            .categories()
            .iter()
            .map(|c| CategoryFilter::Tag(c.clone())),
    );

    filters
        .fold(Row::new().spacing(8), |tabs, filter| {
            let style = if *gallery.filter() == filter {
                button::primary
            } else {
                button::secondary
            };
            tabs.push(
                button(text(filter.label()))
                    .on_press(Message::FilterSelected(filter))
                    .style(style),
            )
        })
        .into()
}

fn grid(gallery: &GalleryController) -> Element<'_, Message> {
    // Grid stays hidden while a season fade is running
    if gallery.is_season_fading() {
        return container(text(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .into();
    }

    let tiles: Vec<Element<'_, Message>> = gallery
        .visible_items()
        .map(|(position, item)| tile(position, item))
        .collect();

    if tiles.is_empty() {
        return container(text("No photos for this season yet. Check back soon!").size(18))
            .center_x(Length::Fill)
            .padding(40)
            .into();
    }

    scrollable(Wrap::with_elements(tiles).spacing(12.0).line_spacing(12.0))
        .height(Length::Fill)
        .into()
}

fn tile(position: usize, item: &GalleryItem) -> Element<'_, Message> {
    let thumbnail = image(Handle::from_path(item.grid_image()))
        .width(TILE_WIDTH)
        .height(TILE_HEIGHT)
        .content_fit(ContentFit::Cover);

    button(
        column![thumbnail, text(&item.caption).size(14)]
            .spacing(4)
            .width(TILE_WIDTH),
    )
    .on_press(Message::ItemActivated(position))
    .style(button::text)
    .padding(0)
    .into()
}
