//! Timeline renderer.
//!
//! Draws the whole strip every frame from the timeline, the cursor and the
//! view. There is no dirty tracking. Drawing goes through [`DrawSurface`] in
//! content coordinates, so the same pass feeds egui or a recorded
//! [`DisplayList`](crate::surface::DisplayList).

use clipline_core::{format_time, Color, Rect, Vec2};
use clipline_timeline::Timeline;

use crate::theme::Theme;
use crate::view::ViewState;

/// Minimal 2D drawing target.
pub trait DrawSurface {
    /// Set the logical size of the drawable content.
    fn resize(&mut self, width: f32, height: f32);
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Draw `text` with its baseline-left corner at `pos`.
    fn draw_text(&mut self, pos: Vec2, text: &str, size: f32, color: Color);
}

/// What one render pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub pixels_per_second: f32,
    pub content_width: f32,
    pub playhead_x: f32,
    pub grid_lines: usize,
    pub clips_drawn: usize,
    /// `current / total` as `mm:ss / mm:ss`.
    pub readout: String,
}

/// Stateless timeline painter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame onto `surface`, which keeps its current height.
    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        timeline: &Timeline,
        cursor_secs: f64,
        view: &ViewState,
    ) -> FrameSummary {
        let total = timeline.total_length_secs();
        let pps = view.pixels_per_second(total);
        let content_width = view.content_width(total);
        let height = surface.height();

        surface.resize(content_width, height);
        surface.fill_rect(Rect::new(0.0, 0.0, content_width, height), Theme::background());

        let mut grid_lines = 0;
        let mut second = 0.0_f64;
        while second < total {
            let x = second as f32 * pps;
            surface.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, height), Theme::STROKE, Theme::grid());
            grid_lines += 1;
            second += 1.0;
        }

        let mut clips_drawn = 0;
        for (span, clip) in timeline.iter() {
            let left = span.start.to_seconds_f64() as f32 * pps;
            let right = span.end().to_seconds_f64() as f32 * pps;
            surface.fill_rect(
                Rect::from_x_span(left, right, Theme::CLIP_TOP, Theme::CLIP_HEIGHT),
                clip.color,
            );
            surface.draw_text(
                Vec2::new(left + Theme::LABEL_INSET, Theme::LABEL_BASELINE),
                &clip.name,
                Theme::FONT_SIZE,
                Theme::label(),
            );
            clips_drawn += 1;
        }

        let playhead_x = cursor_secs as f32 * pps;
        surface.stroke_line(
            Vec2::new(playhead_x, 0.0),
            Vec2::new(playhead_x, height),
            Theme::STROKE,
            Theme::playhead(),
        );
        surface.fill_rect(
            Rect::new(playhead_x - Theme::PLAYHEAD_BAND / 2.0, 0.0, Theme::PLAYHEAD_BAND, height),
            Theme::playhead_band(),
        );

        FrameSummary {
            pixels_per_second: pps,
            content_width,
            playhead_x,
            grid_lines,
            clips_drawn,
            readout: format!("{} / {}", format_time(cursor_secs), format_time(total)),
        }
    }
}
