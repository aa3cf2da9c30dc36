// SPDX-License-Identifier: MPL-2.0
//! Category and tag filter chips.

use super::Message;
use crate::domain::gallery::FilterSelection;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Column, Row};
use iced::{alignment::Vertical, Element};

pub const SHOW_ALL_LABEL: &str = "すべて";
pub const TAGS_LABEL: &str = "タグ";

pub struct ViewContext<'a> {
    pub categories: &'a [String],
    pub tags: &'a [String],
    pub selection: &'a FilterSelection,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut categories = Row::new()
        .spacing(spacing::XS)
        .push(chip(SHOW_ALL_LABEL, !ctx.selection.is_active(), Message::ShowAll));

    for category in ctx.categories {
        let selected = ctx.selection.category() == Some(category.as_str());
        categories = categories.push(chip(
            category,
            selected,
            Message::SelectCategory(Some(category.clone())),
        ));
    }

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(categories.wrap().vertical_spacing(spacing::XS));

    if !ctx.tags.is_empty() {
        let mut tags = Row::new()
            .spacing(spacing::XS)
            .align_y(Vertical::Center)
            .push(
                text(TAGS_LABEL)
                    .size(typography::BODY_SM)
                    .color(palette::GRAY_500),
            );
        for tag in ctx.tags {
            let selected = ctx.selection.tag() == Some(tag.as_str());
            // A selected tag chip toggles the tag off.
            let next = if selected { None } else { Some(tag.clone()) };
            tags = tags.push(chip(&format!("#{tag}"), selected, Message::SelectTag(next)));
        }
        column = column.push(tags.wrap().vertical_spacing(spacing::XS));
    }

    column.into()
}

fn chip<'a>(label: &str, selected: bool, on_press: Message) -> Element<'a, Message> {
    button(text(label.to_owned()).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::chip(selected))
        .on_press(on_press)
        .into()
}
