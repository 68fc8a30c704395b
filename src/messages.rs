use std::path::PathBuf;
use std::time::Instant;

use crate::image_cache::ImageSize;
use crate::input::Action;
use crate::model::ResultPage;
use crate::pixabay::SearchError;
use crate::session::FetchRequest;

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    Submit,
    LoadMore,
    SearchCompleted(FetchRequest, Result<ResultPage, SearchError>),
    ImageFetched {
        id: u64,
        size: ImageSize,
        result: Result<PathBuf, String>,
    },
    OpenViewer(usize),
    Input(Action),
    GalleryScrolled(iced::widget::scrollable::Viewport),
    ScrollFrame(Instant),
    WindowResized(f32, f32),
    SpinnerTick,
    ExpireToasts(Instant),
    DismissToast(usize),
}
