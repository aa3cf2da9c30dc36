// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Primary action (copy).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border, shadow) = match status {
        button::Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        _ => (palette::PRIMARY_500, palette::PRIMARY_600, shadow::SM),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Filter chip. Selected chips use the brand color.
pub fn chip(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        if selected {
            return primary(theme, status);
        }

        let extended = theme.extended_palette();
        let background = match status {
            button::Status::Hovered => extended.background.strong.color,
            _ => extended.background.weak.color,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: extended.background.base.text,
            border: Border {
                color: extended.background.strong.color,
                width: 1.0,
                radius: radius::FULL.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Whole-card button: no chrome of its own, lifts on hover.
pub fn card(theme: &Theme, status: button::Status) -> button::Style {
    let extended = theme.extended_palette();
    let hovered = matches!(status, button::Status::Hovered);
    button::Style {
        background: Some(Background::Color(extended.background.weak.color)),
        text_color: extended.background.base.text,
        border: Border {
            color: if hovered {
                palette::PRIMARY_400
            } else {
                Color::TRANSPARENT
            },
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: if hovered { shadow::LG } else { shadow::SM },
        snap: true,
    }
}

/// Round close button on the modal.
pub fn close(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_HOVER,
        _ => opacity::OVERLAY_MEDIUM,
    };
    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Text-only link.
pub fn link(_theme: &Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Hovered => WHITE,
        _ => palette::LINK,
    };
    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_chip_matches_primary() {
        let theme = Theme::Dark;
        let chip = chip(true)(&theme, button::Status::Active);
        let primary = primary(&theme, button::Status::Active);
        assert_eq!(chip.background, primary.background);
    }

    #[test]
    fn unselected_chip_is_pill_shaped() {
        let style = chip(false)(&Theme::Light, button::Status::Active);
        assert_eq!(style.border.radius, radius::FULL.into());
    }

    #[test]
    fn link_uses_link_color() {
        let style = link(&Theme::Dark, button::Status::Active);
        assert_eq!(style.text_color, palette::LINK);
        assert!(style.background.is_none());
    }
}
