// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK},
    radius, shadow,
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Dimmed layer behind the modal.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_HOVER,
            ..BLACK
        })),
        ..Default::default()
    }
}

/// Modal body.
pub fn modal(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();
    let base = extended.background.base.color;
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base
        })),
        text_color: Some(extended.background.base.text),
        border: Border {
            color: extended.background.strong.color,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Box holding the full prompt text.
pub fn prompt_box(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(extended.background.weak.color)),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Placeholder shown where a card image is missing or still loading.
pub fn image_placeholder(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(extended.background.strong.color)),
        text_color: Some(palette::GRAY_500),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Rendered embedded post.
pub fn embedded_post(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(extended.background.weak.color)),
        border: Border {
            color: extended.background.strong.color,
            width: 1.0,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}
