// SPDX-License-Identifier: MPL-2.0
//! Card grid.

use super::Message;
use crate::domain::gallery::PromptItem;
use crate::media::{ThumbnailCache, ThumbnailState};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::font::Weight;
use iced::widget::{button, container, image, scrollable, text, Column, Container, Row, Space};
use iced::{alignment, ContentFit, Element, Font, Length};

pub const EMPTY_LABEL: &str = "該当するプロンプトがありません";
const IMAGE_LOADING_LABEL: &str = "読み込み中...";
const IMAGE_MISSING_LABEL: &str = "画像を表示できません";

pub struct ViewContext<'a> {
    pub items: &'a [PromptItem],
    /// Indices into `items`, already filtered.
    pub visible: &'a [usize],
    pub thumbnails: &'a ThumbnailCache,
    pub columns: u16,
    pub card_prompt_chars: usize,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    if ctx.visible.is_empty() {
        return Container::new(text(EMPTY_LABEL).color(palette::GRAY_500))
            .width(Length::Fill)
            .padding(spacing::XL)
            .align_x(alignment::Horizontal::Center)
            .into();
    }

    let columns = usize::from(ctx.columns.max(1));
    let mut grid = Column::new().spacing(spacing::MD);

    for chunk in ctx.visible.chunks(columns) {
        let mut row = Row::new().spacing(spacing::MD);
        for &index in chunk {
            if let Some(item) = ctx.items.get(index) {
                row = row.push(card(&ctx, index, item));
            }
        }
        // Keep card widths stable on the last, shorter row.
        for _ in chunk.len()..columns {
            row = row.push(Space::new().width(Length::Fill));
        }
        grid = grid.push(row);
    }

    scrollable(grid.padding([0.0, spacing::XS]))
        .height(Length::Fill)
        .into()
}

fn card<'a>(ctx: &ViewContext<'a>, index: usize, item: &'a PromptItem) -> Element<'a, Message> {
    let category = text(item.category())
        .size(typography::BODY)
        .font(Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        });

    let excerpt = text(item.card_prompt(ctx.card_prompt_chars))
        .size(typography::BODY_SM)
        .color(palette::GRAY_200);

    let body = Column::new()
        .spacing(spacing::XS)
        .push(thumbnail(ctx.thumbnails, item.id()))
        .push(category)
        .push(excerpt);

    button(body)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(styles::button::card)
        .on_press(Message::OpenItem(index))
        .into()
}

fn thumbnail<'a>(thumbnails: &ThumbnailCache, id: &str) -> Element<'a, Message> {
    match thumbnails.peek(id) {
        Some(ThumbnailState::Ready(thumb)) => image(thumb.handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        state => placeholder(placeholder_label(state)),
    }
}

/// Only a failed fetch counts as missing; an unknown id has not arrived yet.
fn placeholder_label(state: Option<&ThumbnailState>) -> &'static str {
    match state {
        Some(ThumbnailState::Failed) => IMAGE_MISSING_LABEL,
        _ => IMAGE_LOADING_LABEL,
    }
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(typography::CAPTION))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
        .style(styles::container::image_placeholder)
        .into()
}
