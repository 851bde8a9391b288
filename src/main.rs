use iced::widget::image::Handle;
use iced::widget::{column, text};
use iced::{event, keyboard, touch, Element, Event, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashSet;
use std::time::Duration;

mod config;
mod error;
mod events;
mod input;
mod media;
mod state;
mod ui;

use config::GalleryConfig;
use events::feed::{fallback_message, load_timeline};
use events::{ReminderStore, Timeline};
use input::{Command, Input, InputRouter};
use media::preview::{preload_image, PreviewImage, PREVIEW_MAX_SIZE};
use media::scan::scan_gallery;
use state::transition::Transition;
use state::{CategoryFilter, GalleryController, ImageRequest, Season};
use ui::timeline::TimelineState;
use ui::Page;

/// Main application state
struct GalleryApp {
    config: GalleryConfig,
    /// All gallery state (seasons, filter, modal)
    gallery: GalleryController,
    router: InputRouter,
    page: Page,
    /// Image currently shown in the modal
    modal_image: Option<Handle>,
    /// Preloaded image waiting for its fade to finish
    pending_image: Option<Handle>,
    timeline: TimelineState,
    /// Reminder database (None if it could not be opened)
    reminders: Option<ReminderStore>,
    /// Event ids with a reminder set
    reminded: HashSet<String>,
    toast: Option<String>,
    toast_transition: Transition,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    PageSelected(Page),
    /// User clicked the "Open Gallery Folder" button
    OpenGalleryFolder,
    /// Background folder scan completed
    GalleryScanned(Result<Vec<Season>, String>),
    SelectSeason(usize),
    ShowNewerSeason,
    ShowOlderSeason,
    SeasonFadeFinished(u64),
    FilterSelected(CategoryFilter),
    /// A grid tile was clicked (season position)
    ItemActivated(usize),
    /// Keyboard, pointer or touch input for the modal
    Input(Input),
    PreviewLoaded {
        generation: u64,
        result: Result<Handle, String>,
    },
    ImageSwapReady(u64),
    TimelineLoaded(Result<Timeline, String>),
    ReminderRequested {
        event_id: String,
        title: String,
    },
    ToastExpired(u64),
}

impl GalleryApp {
    /// Create a new instance of the application
    fn new(config: GalleryConfig) -> (Self, Task<Message>) {
        let reminders = open_reminders(&config);
        let router = InputRouter::new(config.swipe_threshold);

        // Seasons show up with their labels right away and fill in once scanned
        let placeholders = config
            .seasons
            .iter()
            .map(|s| Season::empty(&s.id, &s.name, config.season_dir(s)))
            .collect();

        let tasks = Task::batch([
            scan_task(config.clone()),
            Task::perform(load_timeline(config.events_feed.clone()), |result| {
                Message::TimelineLoaded(result.map_err(|e| fallback_message(&e)))
            }),
        ]);

        let status = format!("Scanning {}...", config.gallery_root.display());

        (
            GalleryApp {
                config,
                gallery: GalleryController::new(placeholders),
                router,
                page: Page::default(),
                modal_image: None,
                pending_image: None,
                timeline: TimelineState::Loading,
                reminders,
                reminded: HashSet::new(),
                toast: None,
                toast_transition: Transition::default(),
                status,
            },
            tasks,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PageSelected(page) => {
                if page != self.page {
                    self.close_modal();
                    self.page = page;
                }
                Task::none()
            }
            Message::OpenGalleryFolder => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Gallery Folder")
                    .pick_folder();

                if let Some(folder_path) = folder {
                    self.status = format!("Scanning {}...", folder_path.display());
                    self.config.gallery_root = folder_path;
                    return scan_task(self.config.clone());
                }

                Task::none()
            }
            Message::GalleryScanned(Ok(seasons)) => {
                let total: usize = seasons.iter().map(|s| s.items.len()).sum();

                self.close_modal();
                self.gallery.replace_seasons(seasons);

                self.status = format!(
                    "{} photos in {} seasons.",
                    total,
                    self.gallery.seasons().len()
                );
                log::info!("Gallery ready: {}", self.status);
                Task::none()
            }
            Message::GalleryScanned(Err(e)) => {
                log::error!("Gallery scan failed: {}", e);
                self.status = format!("Could not scan gallery: {}", e);
                Task::none()
            }
            Message::SelectSeason(index) => {
                let generation = self.gallery.select_season(index);
                self.after_season_change(generation)
            }
            Message::ShowNewerSeason => {
                let generation = self.gallery.show_newer();
                self.after_season_change(generation)
            }
            Message::ShowOlderSeason => {
                let generation = self.gallery.show_older();
                self.after_season_change(generation)
            }
            Message::SeasonFadeFinished(generation) => {
                self.gallery.finish_season_fade(generation);
                Task::none()
            }
            Message::FilterSelected(filter) => {
                self.gallery.apply_filter(filter);
                if !self.gallery.modal_is_open() {
                    self.clear_modal_images();
                }
                Task::none()
            }
            Message::ItemActivated(position) => {
                if !self.gallery.open(position) {
                    return Task::none();
                }
                // Thumbnail right away, bounded full image once decoded
                self.pending_image = None;
                self.modal_image = self
                    .gallery
                    .displayed_item()
                    .map(|item| Handle::from_path(item.grid_image()));

                match self.gallery.refresh_image() {
                    Some(request) => preload_task(request),
                    None => Task::none(),
                }
            }
            Message::Input(input) => {
                match self.router.route(input, self.gallery.modal_is_open()) {
                    Some(command) => self.run_command(command),
                    None => Task::none(),
                }
            }
            Message::PreviewLoaded { generation, result } => {
                if !self.gallery.image_loaded(generation) {
                    return Task::none();
                }
                self.pending_image = match result {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        log::warn!("Preload failed: {}", e);
                        // Keep the thumbnail if this was the item on screen
                        if self.gallery.is_refreshing_displayed() {
                            self.modal_image.clone()
                        } else {
                            None
                        }
                    }
                };
                delay(
                    self.config.timing.image_fade_ms,
                    Message::ImageSwapReady(generation),
                )
            }
            Message::ImageSwapReady(generation) => {
                if self.gallery.finish_image_swap(generation) {
                    self.modal_image = self.pending_image.take();
                }
                Task::none()
            }
            Message::TimelineLoaded(Ok(timeline)) => {
                if let Some(store) = &self.reminders {
                    match store.all() {
                        Ok(all) => self.reminded = all.into_keys().collect(),
                        Err(e) => log::error!("Could not read reminders: {}", e),
                    }
                }
                self.timeline = TimelineState::Loaded(timeline);
                Task::none()
            }
            Message::TimelineLoaded(Err(message)) => {
                log::error!("Events feed: {}", message);
                self.timeline = TimelineState::Failed(message);
                Task::none()
            }
            Message::ReminderRequested { event_id, title } => {
                let saved = match &self.reminders {
                    Some(store) => store.set_reminder(&event_id).map_err(|e| e.to_string()),
                    None => Err("reminder database unavailable".to_string()),
                };
                match saved {
                    Ok(_) => {
                        self.reminded.insert(event_id);
                        self.show_toast(format!("Reminder set for: {}", title))
                    }
                    Err(e) => {
                        log::error!("Error saving event reminder: {}", e);
                        self.show_toast("Error: Could not save reminder preference.".to_string())
                    }
                }
            }
            Message::ToastExpired(generation) => {
                if self.toast_transition.finish(generation) {
                    self.toast = None;
                }
                Task::none()
            }
        }
    }

    fn run_command(&mut self, command: Command) -> Task<Message> {
        let request = match command {
            Command::Close => {
                self.close_modal();
                return Task::none();
            }
            Command::Next => self.gallery.next(),
            Command::Prev => self.gallery.prev(),
        };

        match request {
            Some(request) => preload_task(request),
            None => Task::none(),
        }
    }

    /// Start the fade timer for a season change, if one happened
    fn after_season_change(&mut self, generation: Option<u64>) -> Task<Message> {
        let Some(generation) = generation else {
            return Task::none();
        };
        self.clear_modal_images();
        delay(
            self.config.timing.season_fade_ms,
            Message::SeasonFadeFinished(generation),
        )
    }

    fn close_modal(&mut self) {
        self.gallery.close();
        self.clear_modal_images();
    }

    fn clear_modal_images(&mut self) {
        self.modal_image = None;
        self.pending_image = None;
    }

    fn show_toast(&mut self, message: String) -> Task<Message> {
        self.toast = Some(message);
        let generation = self.toast_transition.begin();
        delay(self.config.timing.toast_ms, Message::ToastExpired(generation))
    }

    /// Global input listeners; the router decides whether they apply
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => match named {
                keyboard::key::Named::ArrowLeft => Some(Message::Input(Input::ArrowLeft)),
                keyboard::key::Named::ArrowRight => Some(Message::Input(Input::ArrowRight)),
                keyboard::key::Named::Escape => Some(Message::Input(Input::Escape)),
                _ => None,
            },
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                Some(Message::Input(Input::TouchStarted { x: position.x }))
            }
            Event::Touch(touch::Event::FingerLifted { position, .. }) => {
                Some(Message::Input(Input::TouchEnded { x: position.x }))
            }
            _ => None,
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page: Element<Message> = match self.page {
            Page::Gallery => ui::gallery::view(&self.gallery),
            Page::Events => ui::timeline::view(&self.timeline, &self.reminded),
        };

        let content: Element<Message> = column![ui::top_bar(self.page), page, text(&self.status).size(14)]
            .spacing(16)
            .padding(20)
            .into();

        let content = if self.page == Page::Gallery {
            ui::modal::overlay(content, &self.gallery, self.modal_image.as_ref())
        } else {
            content
        };

        ui::toast_overlay(content, self.toast.as_deref())
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    let (config, config_warning) = GalleryConfig::load_or_default();

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Some(warning) = config_warning {
        log::warn!("{}", warning);
    }
    log::info!(
        "Gallery root {} with {} seasons",
        config.gallery_root.display(),
        config.seasons.len()
    );

    iced::application("Ultrabots Gallery", GalleryApp::update, GalleryApp::view)
        .subscription(GalleryApp::subscription)
        .theme(GalleryApp::theme)
        .centered()
        .run_with(move || GalleryApp::new(config))
}

/// Open the reminder store, falling back to a session-only store
fn open_reminders(config: &GalleryConfig) -> Option<ReminderStore> {
    let opened = match &config.reminders_db {
        Some(path) => ReminderStore::open(path),
        None => ReminderStore::open_default(),
    };

    match opened {
        Ok(store) => Some(store),
        Err(e) => {
            log::error!("Reminders will not be saved: {}", e);
            ReminderStore::open_in_memory().ok()
        }
    }
}

fn scan_task(config: GalleryConfig) -> Task<Message> {
    Task::perform(scan_gallery(config), |result| {
        Message::GalleryScanned(result.map_err(|e| e.to_string()))
    })
}

fn preload_task(request: ImageRequest) -> Task<Message> {
    let generation = request.generation;
    Task::perform(
        preload_image(request.image_path, PREVIEW_MAX_SIZE),
        move |result| Message::PreviewLoaded {
            generation,
            result: result.map(to_handle).map_err(|e| e.to_string()),
        },
    )
}

fn to_handle(preview: PreviewImage) -> Handle {
    Handle::from_rgba(preview.width, preview.height, preview.rgba)
}

/// Emit `message` after `millis` milliseconds
fn delay(millis: u64, message: Message) -> Task<Message> {
    Task::perform(tokio::time::sleep(Duration::from_millis(millis)), move |_| {
        message.clone()
    })
}
