// SPDX-License-Identifier: MPL-2.0
//! Detail modal: full prompt, copy button and the embedded post.

use super::Message;
use crate::diagnostics::DismissSource;
use crate::domain::gallery::PromptItem;
use crate::embed::{EmbeddedPost, MountNode, MountPoint, Notice, FALLBACK_LINK_LABEL};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::font::Weight;
use iced::widget::{
    button, center, container, mouse_area, opaque, scrollable, text, Column, Container, Row, Space,
};
use iced::{alignment, Element, Font, Length};

pub const CLOSE_LABEL: &str = "×";
pub const COPY_LABEL: &str = "コピー";
const PROMPT_LABEL: &str = "プロンプト";
const OPEN_POST_LABEL: &str = "Xで見る →";

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// The modal layered over the page. Clicking the dimmed area closes it,
/// clicks on the body do not.
pub fn view<'a>(item: &'a PromptItem, mount: &'a MountPoint) -> Element<'a, Message> {
    let body = Container::new(scrollable(content(item, mount)))
        .width(Length::Fixed(sizing::MODAL_WIDTH))
        .max_height(sizing::MODAL_MAX_HEIGHT)
        .padding(spacing::LG)
        .style(styles::container::modal);

    opaque(
        mouse_area(center(opaque(body)).style(styles::container::backdrop))
            .on_press(Message::CloseModal(DismissSource::Backdrop)),
    )
}

fn content<'a>(item: &'a PromptItem, mount: &'a MountPoint) -> Column<'a, Message> {
    let close = button(
        text(CLOSE_LABEL)
            .size(typography::TITLE_MD)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fixed(sizing::CLOSE_BUTTON))
    .height(Length::Fixed(sizing::CLOSE_BUTTON))
    .style(styles::button::close)
    .on_press(Message::CloseModal(DismissSource::CloseButton));

    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(text(item.category()).size(typography::TITLE_SM).font(BOLD))
        .push(Space::new().width(Length::Fill))
        .push(close);

    let prompt_header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(
            text(PROMPT_LABEL)
                .size(typography::BODY_SM)
                .color(palette::GRAY_500),
        )
        .push(Space::new().width(Length::Fill))
        .push(
            button(text(COPY_LABEL).size(typography::BODY_SM))
                .padding([spacing::XXS, spacing::SM])
                .style(styles::button::primary)
                .on_press(Message::CopyPrompt),
        );

    let prompt = Container::new(text(item.prompt()).size(typography::BODY))
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(styles::container::prompt_box);

    Column::new()
        .spacing(spacing::MD)
        .push(header)
        .push(
            Column::new()
                .spacing(spacing::XS)
                .push(prompt_header)
                .push(prompt),
        )
        .push(embed_area(mount))
}

/// Renders whatever the embed renderer put into the mount point.
fn embed_area(mount: &MountPoint) -> Element<'_, Message> {
    let nodes = mount.nodes().iter().map(node);
    let height = if mount.post().is_some() {
        Length::Shrink
    } else {
        Length::Fixed(sizing::EMBED_MIN_HEIGHT)
    };
    Container::new(
        Column::with_children(nodes)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center),
    )
    .padding([spacing::SM, 0.0])
    .center_x(Length::Fill)
    .center_y(height)
    .into()
}

fn node(node: &MountNode) -> Element<'_, Message> {
    match node {
        MountNode::Notice(notice) => notice_text(*notice),
        MountNode::Pending { .. } => notice_text(Notice::Loading),
        MountNode::Post(post) => embedded_post(post),
        MountNode::FallbackLink { url } => button(text(FALLBACK_LINK_LABEL).size(typography::BODY))
            .padding(0)
            .style(styles::button::link)
            .on_press(Message::OpenLink(url.clone()))
            .into(),
    }
}

fn notice_text<'a>(notice: Notice) -> Element<'a, Message> {
    text(notice.text())
        .size(typography::BODY_SM)
        .color(palette::GRAY_500)
        .into()
}

fn embedded_post(post: &EmbeddedPost) -> Element<'_, Message> {
    let mut author = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(text(&post.author_name).size(typography::BODY).font(BOLD));
    if let Some(handle) = &post.author_handle {
        author = author.push(
            text(format!("@{handle}"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_500),
        );
    }

    let paragraphs = post
        .paragraphs
        .iter()
        .map(|p| text(p).size(typography::BODY).into());

    let mut footer = Row::new().spacing(spacing::SM).align_y(alignment::Vertical::Center);
    if let Some(date) = &post.date {
        footer = footer.push(
            text(date)
                .size(typography::CAPTION)
                .color(palette::GRAY_500),
        );
    }
    footer = footer.push(Space::new().width(Length::Fill)).push(
        button(text(OPEN_POST_LABEL).size(typography::CAPTION))
            .padding(0)
            .style(styles::button::link)
            .on_press(Message::OpenLink(post.permalink.clone())),
    );

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(author)
            .push(Column::with_children(paragraphs).spacing(spacing::XS))
            .push(footer),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::embedded_post)
    .into()
}
