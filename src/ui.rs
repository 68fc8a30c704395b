use iced::alignment::Horizontal;
use iced::keyboard::{self, key::Named, Key};
use iced::widget::{
    operation, scrollable, text_input, Column, Container, Grid, Id, Row, Scrollable, Stack, Text,
};
use iced::{Color, Element, Event, Length, Subscription, Task};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::{config_path, load_config, API_KEY_ENV};
use crate::icons;
use crate::image_cache::{ImageCache, ImageSize};
use crate::input::Action;
use crate::messages::Message;
use crate::pixabay::{PixabayClient, SearchError};
use crate::session::{Effect, FetchKind, FetchRequest, SearchSession, Transition};
use crate::notifications::ToastQueue;
use crate::ui_components::{
    accent_button, render_card, render_load_more, render_loader, render_toasts, render_viewer,
};
use crate::ui_theme::*;
use crate::viewer::Lightbox;

pub struct Gallery {
    session: SearchSession,
    client: PixabayClient,
    image_cache: Option<ImageCache>,
    query_input: String,
    previews: HashMap<u64, PathBuf>,
    full_images: HashMap<u64, PathBuf>,
    pending_downloads: HashSet<(u64, ImageSize)>,
    lightbox: Lightbox,
    toasts: ToastQueue,
    spinner_tick: usize,
    cols: usize,
    window_width: f32,
    scroll_id: Id,
    scroll_offset: f32,
    scroll_animation: Option<ScrollAnimation>,
}

impl Gallery {
    pub fn new() -> (Self, Task<Message>) {
        let config = load_config();

        let api_key = config.api_key.clone().unwrap_or_else(|| {
            let location = config_path()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|_| "config.json".to_string());
            warn!(
                "No Pixabay API key configured. Set {} or \"api_key\" in {}",
                API_KEY_ENV, location
            );
            String::new()
        });

        info!("Showing {} results per page", config.per_page);

        let image_cache = match ImageCache::new() {
            Ok(cache) => Some(cache),
            Err(err) => {
                warn!("Image cache unavailable, previews disabled: {:#}", err);
                None
            }
        };

        let mut gallery = Self {
            session: SearchSession::new(config.per_page),
            client: PixabayClient::with_base_url(api_key, config.base_url),
            image_cache,
            query_input: String::new(),
            previews: HashMap::new(),
            full_images: HashMap::new(),
            pending_downloads: HashSet::new(),
            lightbox: Lightbox::default(),
            toasts: ToastQueue::default(),
            spinner_tick: 0,
            cols: 3,
            window_width: DEFAULT_WINDOW_WIDTH,
            scroll_id: Id::unique(),
            scroll_offset: 0.0,
            scroll_animation: None,
        };
        gallery.update_columns();

        (gallery, Task::none())
    }

    pub fn title(&self) -> String {
        let query = &self.session.state().query;
        if query.is_empty() {
            String::from("Image Finder")
        } else {
            format!("Image Finder - {}", query)
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                self.query_input = value;
                Task::none()
            }
            Message::Submit => {
                let transition = self.session.submit(&self.query_input);
                self.apply(transition)
            }
            Message::LoadMore => {
                let transition = self.session.load_more();
                self.apply(transition)
            }
            Message::SearchCompleted(request, result) => {
                let transition = self.session.complete(&request, result);
                self.apply(transition)
            }
            Message::ImageFetched { id, size, result } => {
                self.pending_downloads.remove(&(id, size));
                match result {
                    Ok(path) => match size {
                        ImageSize::Preview => {
                            if self.session.images().iter().any(|image| image.id == id) {
                                self.previews.insert(id, path);
                            }
                        }
                        ImageSize::Full => {
                            self.full_images.insert(id, path);
                        }
                    },
                    Err(err) => warn!("Failed to fetch {:?} image {}: {}", size, id, err),
                }
                Task::none()
            }
            Message::OpenViewer(index) => {
                if self.lightbox.open(index) {
                    self.fetch_full_image(index)
                } else {
                    Task::none()
                }
            }
            Message::Input(action) => self.handle_viewer_action(action),
            Message::GalleryScrolled(viewport) => {
                let offset = viewport.absolute_offset().y;
                // The user took over the scrollbar mid-animation.
                if self.scroll_animation.is_some() && (offset - self.scroll_offset).abs() > 1.0 {
                    self.scroll_animation = None;
                }
                self.scroll_offset = offset;
                Task::none()
            }
            Message::ScrollFrame(now) => self.advance_scroll(now),
            Message::WindowResized(width, _height) => {
                self.window_width = width;
                self.update_columns();
                Task::none()
            }
            Message::SpinnerTick => {
                self.spinner_tick = self.spinner_tick.wrapping_add(1);
                Task::none()
            }
            Message::ExpireToasts(now) => {
                self.toasts.expire(now);
                Task::none()
            }
            Message::DismissToast(index) => {
                self.toasts.dismiss(index);
                Task::none()
            }
        }
    }

    /// Turn a session transition into view changes and background work.
    fn apply(&mut self, transition: Transition) -> Task<Message> {
        let mut tasks = Vec::new();

        for effect in transition.effects {
            match effect {
                Effect::Notify(notification) => self.toasts.push(notification, Instant::now()),
                Effect::ClearInput => self.query_input.clear(),
                Effect::RefreshViewer => {
                    self.lightbox.refresh(self.session.images().len());
                    tasks.push(self.fetch_missing_previews());
                }
                Effect::ScrollToNewCards => self.scroll_to_new_cards(Instant::now()),
            }
        }

        if let Some(request) = transition.request {
            if request.kind == FetchKind::Search {
                self.scroll_offset = 0.0;
                self.scroll_animation = None;
                tasks.push(operation::scroll_to(
                    self.scroll_id.clone(),
                    scrollable::AbsoluteOffset { x: 0.0, y: 0.0 },
                ));
            }
            tasks.push(self.perform_search(request));
        }

        Task::batch(tasks)
    }

    fn perform_search(&self, request: FetchRequest) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move {
                let fetch = request.clone();
                let result = tokio::task::spawn_blocking(move || {
                    client.search(&fetch.query, fetch.page, fetch.page_size)
                })
                .await
                .unwrap_or_else(|e| Err(SearchError::Transport(format!("Task join error: {}", e))));
                (request, result)
            },
            |(request, result)| Message::SearchCompleted(request, result),
        )
    }

    fn fetch_missing_previews(&mut self) -> Task<Message> {
        let ids: HashSet<u64> = self.session.images().iter().map(|image| image.id).collect();
        self.previews.retain(|id, _| ids.contains(id));
        self.full_images.retain(|id, _| ids.contains(id));

        let wanted: Vec<(u64, String)> = self
            .session
            .images()
            .iter()
            .filter(|image| !self.previews.contains_key(&image.id))
            .map(|image| (image.id, image.preview_url.clone()))
            .collect();

        let tasks: Vec<_> = wanted
            .into_iter()
            .filter_map(|(id, url)| {
                self.download(
                    id,
                    ImageSize::Preview,
                    url,
                    PREVIEW_MAX_WIDTH,
                    PREVIEW_MAX_HEIGHT,
                )
            })
            .collect();
        Task::batch(tasks)
    }

    fn fetch_full_image(&mut self, index: usize) -> Task<Message> {
        let Some(image) = self.session.images().get(index) else {
            return Task::none();
        };
        if self.full_images.contains_key(&image.id) {
            return Task::none();
        }
        let (id, url) = (image.id, image.full_url.clone());
        self.download(id, ImageSize::Full, url, FULL_MAX_WIDTH, FULL_MAX_HEIGHT)
            .unwrap_or_else(Task::none)
    }

    fn download(
        &mut self,
        id: u64,
        size: ImageSize,
        url: String,
        max_width: u32,
        max_height: u32,
    ) -> Option<Task<Message>> {
        let cache = self.image_cache.clone()?;
        if !self.pending_downloads.insert((id, size)) {
            return None;
        }

        Some(Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    cache
                        .fetch(size, id, &url, max_width, max_height)
                        .map_err(|err| format!("{:#}", err))
                })
                .await
                .unwrap_or_else(|e| Err(format!("Task join error: {}", e)))
            },
            move |result| Message::ImageFetched { id, size, result },
        ))
    }

    /// Starts easing the gallery down by about two card rows from wherever
    /// the last viewport report left it.
    fn scroll_to_new_cards(&mut self, now: Instant) {
        let from = self.scroll_offset;
        self.scroll_animation = Some(ScrollAnimation {
            from,
            to: from + 2.0 * (CARD_HEIGHT + ITEM_SPACING),
            started: now,
        });
    }

    fn advance_scroll(&mut self, now: Instant) -> Task<Message> {
        let Some(animation) = self.scroll_animation else {
            return Task::none();
        };
        let (offset, finished) = animation.offset_at(now);
        if finished {
            self.scroll_animation = None;
        }
        self.scroll_offset = offset;
        operation::scroll_to(
            self.scroll_id.clone(),
            scrollable::AbsoluteOffset { x: 0.0, y: offset },
        )
    }

    fn handle_viewer_action(&mut self, action: Action) -> Task<Message> {
        if !self.lightbox.is_open() {
            return Task::none();
        }
        let moved = match action {
            Action::Close => {
                self.lightbox.close();
                None
            }
            Action::Next => self.lightbox.next(),
            Action::Prev => self.lightbox.prev(),
        };
        match moved {
            Some(index) => self.fetch_full_image(index),
            None => Task::none(),
        }
    }

    fn update_columns(&mut self) {
        self.cols = column_count(self.window_width);
    }

    pub fn view(&self) -> Element<'_, Message> {
        let column = Column::new()
            .push(self.render_search_bar())
            .push(self.render_results())
            .spacing(ITEM_SPACING);

        let main_content: Element<'_, Message> = Container::new(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(PAGE_PADDING)
            .style(|_theme| iced::widget::container::Style {
                background: Some(COLOR_BACKGROUND.into()),
                text_color: Some(Color::WHITE),
                ..Default::default()
            })
            .into();

        let mut layers = Stack::new().push(main_content);
        if let Some(viewer) = self.render_viewer_layer() {
            layers = layers.push(viewer);
        }
        if !self.toasts.is_empty() {
            layers = layers.push(render_toasts(&self.toasts));
        }
        layers.into()
    }

    fn render_search_bar(&self) -> Element<'_, Message> {
        let input = text_input("Search images...", &self.query_input)
            .on_input(Message::QueryChanged)
            .on_submit(Message::Submit)
            .padding(10)
            .size(FONT_BODY)
            .width(Length::Fixed(SEARCH_INPUT_WIDTH));

        let label = Row::new()
            .push(icons::search_icon(FONT_BODY))
            .push(Text::new("Search").size(FONT_BODY))
            .spacing(8)
            .align_y(iced::Alignment::Center);
        let search_button = accent_button(label)
            .on_press(Message::Submit)
            .padding([10, 20]);

        Container::new(
            Row::new()
                .push(input)
                .push(search_button)
                .spacing(12)
                .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .into()
    }

    fn render_results(&self) -> Element<'_, Message> {
        let images = self.session.images();
        let mut column = Column::new().width(Length::Fill);

        if images.is_empty() && !self.session.is_loading() {
            column = column.push(
                Container::new(
                    Text::new("Type a query and press Enter to find photos")
                        .size(FONT_TITLE)
                        .color(COLOR_TEXT_DIM),
                )
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(PAGE_PADDING * 2.0),
            );
        } else {
            let mut grid = Grid::new()
                .columns(self.cols)
                .spacing(ITEM_SPACING)
                .height(Length::Shrink);
            for (i, image) in images.iter().enumerate() {
                grid = grid.push(render_card(i, image, self.previews.get(&image.id)));
            }

            let grid_width = self.cols as f32 * (CARD_WIDTH + ITEM_SPACING) - ITEM_SPACING;
            column = column.push(
                Container::new(Container::new(grid).max_width(grid_width))
                    .width(Length::Fill)
                    .center_x(Length::Fill),
            );
        }

        if self.session.is_loading() {
            column = column.push(render_loader(self.spinner_tick));
        }
        if self.session.load_more_visible() {
            column = column.push(render_load_more(!self.session.is_loading()));
        }

        Scrollable::new(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .id(self.scroll_id.clone())
            .on_scroll(Message::GalleryScrolled)
            .into()
    }

    fn render_viewer_layer(&self) -> Option<Element<'_, Message>> {
        let index = self.lightbox.current()?;
        let image = self.session.images().get(index)?;
        let path = self
            .full_images
            .get(&image.id)
            .or_else(|| self.previews.get(&image.id));
        Some(render_viewer(image, path, index, self.session.images().len()))
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let window_events = iced::event::listen_with(|event, _status, _window| match event {
            Event::Window(iced::window::Event::Resized(size)) => {
                Some(Message::WindowResized(size.width, size.height))
            }
            _ => None,
        });

        let keyboard = iced::event::listen_with(|event, status, _window| {
            if let iced::event::Status::Captured = status {
                return None;
            }

            match event {
                Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match key.as_ref() {
                    Key::Named(Named::ArrowLeft) => Some(Message::Input(Action::Prev)),
                    Key::Named(Named::ArrowRight) => Some(Message::Input(Action::Next)),
                    Key::Named(Named::Escape) => Some(Message::Input(Action::Close)),
                    _ => None,
                },
                _ => None,
            }
        });

        let mut subscriptions = vec![keyboard, window_events];

        if self.session.is_loading() {
            subscriptions.push(
                iced::time::every(Duration::from_millis(SPINNER_TICK_MS))
                    .map(|_| Message::SpinnerTick),
            );
        }
        if self.scroll_animation.is_some() {
            subscriptions.push(
                iced::time::every(Duration::from_millis(SCROLL_FRAME_MS))
                    .map(Message::ScrollFrame),
            );
        }
        if !self.toasts.is_empty() {
            subscriptions.push(
                iced::time::every(Duration::from_millis(TOAST_CHECK_MS))
                    .map(Message::ExpireToasts),
            );
        }

        Subscription::batch(subscriptions)
    }
}

/// Ease-out scroll between two offsets, sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
}

impl ScrollAnimation {
    /// Offset at `now`, and whether the target has been reached.
    fn offset_at(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        let progress = (elapsed.as_secs_f32()
            / Duration::from_millis(SCROLL_DURATION_MS).as_secs_f32())
        .clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - progress).powi(3);
        (self.from + (self.to - self.from) * eased, progress >= 1.0)
    }
}

/// Number of card columns that fit into a window of the given width.
fn column_count(window_width: f32) -> usize {
    let available_width = window_width - 2.0 * PAGE_PADDING;
    let item_space = CARD_WIDTH + ITEM_SPACING;
    let cols = ((available_width + ITEM_SPACING) / item_space).floor() as usize;
    cols.max(1)
}
