use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, mouse_area, Button, Column, Container, Image, Row, Text};
use iced::{mouse, Background, Border, Color, ContentFit, Element, Length};
use iced_anim::{spring::Motion, AnimationBuilder};
use std::path::PathBuf;

use crate::icons;
use crate::input::Action;
use crate::messages::Message;
use crate::model::ImageResult;
use crate::notifications::{Severity, ToastQueue};
use crate::ui_theme::*;

/// Image from the local cache, or a text placeholder while it downloads.
pub fn render_image<'a>(
    path: Option<&PathBuf>,
    width: Length,
    height: Length,
    fallback_text: &'static str,
) -> Element<'a, Message> {
    if let Some(path) = path {
        return Image::new(path.clone())
            .width(width)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into();
    }

    Container::new(
        Text::new(fallback_text)
            .size(FONT_LABEL)
            .color(COLOR_TEXT_DIM),
    )
    .width(width)
    .height(height)
    .center_x(width)
    .center_y(height)
    .style(|_theme| iced::widget::container::Style {
        background: Some(COLOR_PANEL.into()),
        ..Default::default()
    })
    .into()
}

pub fn render_card<'a>(
    index: usize,
    image: &'a ImageResult,
    preview: Option<&PathBuf>,
) -> Element<'a, Message> {
    let picture = render_image(
        preview,
        Length::Fill,
        Length::Fixed(CARD_IMAGE_HEIGHT),
        "Loading...",
    );

    let info = Row::new()
        .push(render_info_item("Likes", image.likes))
        .push(render_info_item("Views", image.views))
        .push(render_info_item("Comments", image.comments))
        .push(render_info_item("Downloads", image.downloads))
        .height(Length::Fixed(CARD_INFO_HEIGHT))
        .align_y(iced::Alignment::Center)
        .padding([4, 8]);

    let card = Container::new(Column::new().push(picture).push(info))
        .width(Length::Fill)
        .height(Length::Fixed(CARD_HEIGHT))
        .style(|_theme| iced::widget::container::Style {
            background: Some(COLOR_PANEL.into()),
            border: Border {
                color: COLOR_TEXT_DIM,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        });

    mouse_area(card)
        .on_press(Message::OpenViewer(index))
        .interaction(mouse::Interaction::Pointer)
        .into()
}

fn render_info_item<'a>(label: &'static str, value: u64) -> Element<'a, Message> {
    Column::new()
        .push(Text::new(label).size(FONT_LABEL).color(COLOR_TEXT_MUTED))
        .push(
            Text::new(value.to_string())
                .size(FONT_LABEL)
                .color(COLOR_TEXT_BRIGHT),
        )
        .width(Length::FillPortion(1))
        .align_x(Horizontal::Center)
        .spacing(2)
        .into()
}

/// Three dots; the lit one moves with every spinner tick.
pub fn render_loader<'a>(spinner_tick: usize) -> Element<'a, Message> {
    let lit = spinner_tick % 3;
    let mut dots = Row::new().spacing(10);
    for i in 0..3 {
        let target = if i == lit { COLOR_ACCENT } else { COLOR_TEXT_DIM };
        let dot: Element<'a, Message> = AnimationBuilder::new(target, move |color| {
            Container::new(Text::new(""))
                .width(Length::Fixed(12.0))
                .height(Length::Fixed(12.0))
                .style(move |_| iced::widget::container::Style {
                    background: Some(color.into()),
                    border: Border {
                        radius: 6.0.into(),
                        ..Border::default()
                    },
                    ..Default::default()
                })
                .into()
        })
        .animation(Motion::SNAPPY)
        .into();
        dots = dots.push(dot);
    }

    Container::new(dots)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(PAGE_PADDING)
        .into()
}

/// Disabled while a page is being fetched.
pub fn render_load_more<'a>(enabled: bool) -> Element<'a, Message> {
    let label = Text::new("Load more").size(FONT_BODY);
    let mut btn = accent_button(label).padding([10, 32]);
    if enabled {
        btn = btn.on_press(Message::LoadMore);
    }

    Container::new(btn)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(PAGE_PADDING)
        .into()
}

pub fn accent_button<'a>(content: impl Into<Element<'a, Message>>) -> Button<'a, Message> {
    button(content).style(|_theme, status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => COLOR_SOFT_WHITE,
            button::Status::Disabled => COLOR_TEXT_DIM,
            button::Status::Active => COLOR_ACCENT,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: COLOR_ABYSS_DARK,
            border: Border {
                radius: 6.0.into(),
                ..Border::default()
            },
            ..button::Style::default()
        }
    })
}

fn icon_button<'a>(content: Element<'a, Message>, action: Action) -> Element<'a, Message> {
    button(content)
        .on_press(Message::Input(action))
        .padding(12)
        .style(|_theme, status| button::Style {
            background: match status {
                button::Status::Hovered | button::Status::Pressed => {
                    Some(Background::Color(COLOR_PANEL))
                }
                _ => None,
            },
            text_color: Color::WHITE,
            border: Border {
                radius: 24.0.into(),
                ..Border::default()
            },
            ..button::Style::default()
        })
        .into()
}

pub fn render_toasts<'a>(toasts: &'a ToastQueue) -> Element<'a, Message> {
    let mut column = Column::new().spacing(8).width(Length::Fixed(TOAST_WIDTH));

    for (i, toast) in toasts.iter().enumerate() {
        let notification = &toast.notification;
        let color = match notification.severity {
            Severity::Error => COLOR_ERROR,
            Severity::Success => COLOR_SUCCESS,
            Severity::Info => COLOR_INFO,
        };

        let body = Column::new()
            .push(
                Text::new(notification.title.as_str())
                    .size(FONT_BODY)
                    .color(Color::WHITE),
            )
            .push(
                Text::new(notification.message.as_str())
                    .size(FONT_LABEL + 2.0)
                    .color(Color::WHITE),
            )
            .spacing(4);

        let boxed = Container::new(body)
            .width(Length::Fill)
            .padding(12)
            .style(move |_| iced::widget::container::Style {
                background: Some(color.into()),
                border: Border {
                    radius: 4.0.into(),
                    ..Border::default()
                },
                ..Default::default()
            });

        column = column.push(mouse_area(boxed).on_press(Message::DismissToast(i)));
    }

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Shrink)
        .align_x(Horizontal::Right)
        .padding(PAGE_PADDING)
        .into()
}

pub fn render_viewer<'a>(
    image: &'a ImageResult,
    path: Option<&PathBuf>,
    position: usize,
    total: usize,
) -> Element<'a, Message> {
    let counter = Text::new(format!("{} / {}", position + 1, total))
        .size(FONT_BODY)
        .color(COLOR_TEXT_MUTED);

    let top_bar = Row::new()
        .push(Container::new(counter).width(Length::Fill))
        .push(icon_button(icons::close_icon(24.0), Action::Close))
        .align_y(iced::Alignment::Center);

    let picture = Container::new(render_image(
        path,
        Length::Fill,
        Length::Fill,
        "Loading...",
    ))
    .width(Length::Fill)
    .height(Length::Fill);

    let middle = Row::new()
        .push(icon_button(icons::prev_icon(32.0), Action::Prev))
        .push(picture)
        .push(icon_button(icons::next_icon(32.0), Action::Next))
        .align_y(Vertical::Center)
        .spacing(12)
        .height(Length::Fill);

    let caption = Text::new(image.tag_list().join(", "))
        .size(FONT_BODY)
        .color(COLOR_TEXT_BRIGHT)
        .width(Length::Fill)
        .align_x(Horizontal::Center);

    Container::new(
        Column::new()
            .push(top_bar)
            .push(middle)
            .push(caption)
            .spacing(12),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(PAGE_PADDING)
    .style(|_| iced::widget::container::Style {
        background: Some(COLOR_OVERLAY_STRONG.into()),
        ..Default::default()
    })
    .into()
}
