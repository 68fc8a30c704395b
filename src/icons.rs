use iced::{Color, Element};
use iced_fonts::fontawesome;

pub fn search_icon<'a, Message: 'a>(size: f32) -> Element<'a, Message> {
    fontawesome::magnifying_glass()
        .size(size)
        .color(Color::WHITE)
        .into()
}

pub fn close_icon<'a, Message: 'a>(size: f32) -> Element<'a, Message> {
    fontawesome::xmark().size(size).color(Color::WHITE).into()
}

pub fn prev_icon<'a, Message: 'a>(size: f32) -> Element<'a, Message> {
    fontawesome::chevron_left()
        .size(size)
        .color(Color::WHITE)
        .into()
}

pub fn next_icon<'a, Message: 'a>(size: f32) -> Element<'a, Message> {
    fontawesome::chevron_right()
        .size(size)
        .color(Color::WHITE)
        .into()
}
