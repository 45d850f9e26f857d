//! Timeline palette and metrics.

use clipline_core::Color;

/// Colors and fixed layout metrics of the timeline strip.
pub struct Theme;

impl Theme {
    // ── Layout ─────────────────────────────────────────────────
    pub const CLIP_TOP: f32 = 20.0;
    pub const CLIP_HEIGHT: f32 = 40.0;
    /// Label baseline offset from the clip's left edge and the surface top.
    pub const LABEL_INSET: f32 = 5.0;
    pub const LABEL_BASELINE: f32 = 45.0;
    pub const FONT_SIZE: f32 = 12.0;
    /// Full width of the playhead band.
    pub const PLAYHEAD_BAND: f32 = 10.0;
    pub const STROKE: f32 = 1.0;

    // ── Colors ─────────────────────────────────────────────────
    pub fn background() -> Color {
        Color::from_rgb24(0x2a2a2a)
    }

    pub fn grid() -> Color {
        Color::from_rgb24(0x444444)
    }

    pub fn label() -> Color {
        Color::WHITE
    }

    pub fn playhead() -> Color {
        Color::from_rgb24(0xff5252)
    }

    /// Fill of the playhead grab band.
    pub fn playhead_band() -> Color {
        Self::playhead().with_alpha(0.35)
    }
}

/// Convert a core color to egui's sRGBA.
pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}
