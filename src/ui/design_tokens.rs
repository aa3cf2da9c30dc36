// SPDX-License-Identifier: MPL-2.0
//! Visual constants shared by the gallery widgets and styles.
//!
//! Sizes are logical pixels on a 4px step. Colors that have to match the
//! published gallery (muted notice gray, link cyan) are given as 8-bit RGB.

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    /// Muted notices inside the embed area.
    pub const GRAY_500: Color = Color::from_rgb8(0x88, 0x88, 0x88);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    // Selected chips and the copy button
    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);

    /// Outbound links to the original post.
    pub const LINK: Color = Color::from_rgb8(0x6f, 0xe3, 0xff);

    // Toast accents
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HOVER: f32 = 0.8;
    pub const OPAQUE: f32 = 1.0;

    /// Modal body, so the dimmed grid shows through slightly.
    pub const SURFACE: f32 = 0.95;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    // Cards
    pub const CARD_IMAGE_HEIGHT: f32 = 220.0;

    // Modal
    pub const MODAL_WIDTH: f32 = 640.0;
    pub const MODAL_MAX_HEIGHT: f32 = 760.0;
    /// Reserved height of the embedded post area so the modal does not jump.
    pub const EMBED_MIN_HEIGHT: f32 = 140.0;
    pub const CLOSE_BUTTON: f32 = 32.0;

    // Component widths
    pub const TOAST_WIDTH: f32 = 320.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Page title
    pub const TITLE_LG: f32 = 30.0;

    /// Page subtitle, modal category heading
    pub const TITLE_MD: f32 = 20.0;

    /// Card category heading
    pub const TITLE_SM: f32 = 18.0;

    /// Modal prompt text
    pub const BODY_LG: f32 = 16.0;

    /// Standard body
    pub const BODY: f32 = 14.0;

    /// Card prompt excerpt (0.9em of body)
    pub const BODY_SM: f32 = 13.0;

    /// Badges, attribution lines
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    /// Thin border - card outlines, filter chips
    pub const WIDTH_SM: f32 = 1.0;

    /// Medium border - selected chips, toast accents
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XXS < spacing::XS);
    assert!(spacing::XS < spacing::SM);
    assert!(spacing::SM < spacing::MD);
    assert!(spacing::MD < spacing::LG);
    assert!(spacing::LG < spacing::XL);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    // The embed area and a card image must both fit inside the modal.
    assert!(sizing::MODAL_MAX_HEIGHT > sizing::EMBED_MIN_HEIGHT + sizing::CARD_IMAGE_HEIGHT);
    assert!(sizing::TOAST_WIDTH < sizing::MODAL_WIDTH);
    assert!(opacity::SURFACE > opacity::OVERLAY_HOVER);
};
