use tracing_subscriber::EnvFilter;

mod config;
mod icons;
mod image_cache;
mod input;
mod messages;
mod model;
mod notifications;
mod pixabay;
mod session;
mod ui;
mod ui_components;
mod ui_theme;
mod viewer;

use iced_fonts::FONTAWESOME_FONT_BYTES;
use ui::Gallery;
use ui_theme::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

fn main() -> iced::Result {
    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "image_finder=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    iced::application(Gallery::new, Gallery::update, Gallery::view)
        .title(|gallery: &Gallery| gallery.title())
        .subscription(Gallery::subscription)
        .font(FONTAWESOME_FONT_BYTES)
        .window(iced::window::Settings {
            size: iced::Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            min_size: Some(iced::Size::new(480.0, 400.0)),
            ..Default::default()
        })
        .run()
}
