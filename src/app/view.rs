// SPDX-License-Identifier: MPL-2.0
//! Window layout: header, gallery, modal and toasts.

use super::{Message, APP_TITLE};
use crate::catalog::Catalog;
use crate::media::ThumbnailCache;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::gallery;
use crate::ui::notifications::{self, Toast};
use iced::font::Weight;
use iced::widget::{text, Column, Container, Stack};
use iced::{Element, Font, Length};

pub const SUBTITLE: &str = "画像・動画生成プロンプト コレクション";

pub struct ViewContext<'a> {
    pub catalog: &'a Catalog,
    pub gallery: &'a gallery::State,
    pub thumbnails: &'a ThumbnailCache,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = Column::new()
        .spacing(spacing::XXS)
        .push(text(APP_TITLE).size(typography::TITLE_LG).font(Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        }))
        .push(
            text(SUBTITLE)
                .size(typography::BODY)
                .color(palette::GRAY_500),
        );

    let content = ctx
        .gallery
        .view(gallery::ViewContext {
            catalog: ctx.catalog,
            thumbnails: ctx.thumbnails,
        })
        .map(Message::Gallery);

    let page = Container::new(
        Column::new()
            .spacing(spacing::LG)
            .push(header)
            .push(content),
    )
    .padding(spacing::XL)
    .width(Length::Fill)
    .height(Length::Fill);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(page);
    if let Some(modal) = ctx.gallery.view_modal(ctx.catalog) {
        layers = layers.push(modal.map(Message::Gallery));
    }
    layers
        .push(Toast::view_overlay(ctx.notifications).map(Message::Notification))
        .into()
}
