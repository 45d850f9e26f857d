//! [`DrawSurface`] implementations: a recording display list and an egui
//! painter adapter.

use clipline_core::{Color, Rect, Vec2};
use egui::{Align2, FontId, Painter, Pos2, Stroke};

use crate::render::DrawSurface;
use crate::theme::to_color32;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    StrokeLine { from: Vec2, to: Vec2, width: f32, color: Color },
    Text { pos: Vec2, text: String, size: f32, color: Color },
}

/// Headless surface that records commands. A resize clears it, like a
/// canvas does.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every label, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for DisplayList {
    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_owned(),
            size,
            color,
        });
    }
}

/// Draws content coordinates into an egui viewport scrolled by `pan`.
///
/// The painter should already be clipped to the viewport; content outside it
/// is submitted and clipped by egui.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    /// Screen position of content x = 0, y = 0.
    origin: Pos2,
    width: f32,
    height: f32,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, viewport: egui::Rect, pan: f32) -> Self {
        Self {
            painter,
            origin: Pos2::new(viewport.left() - pan, viewport.top()),
            width: viewport.width(),
            height: viewport.height(),
        }
    }

    fn to_screen(&self, point: Vec2) -> Pos2 {
        Pos2::new(self.origin.x + point.x, self.origin.y + point.y)
    }
}

impl DrawSurface for PainterSurface<'_> {
    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = egui::Rect::from_min_max(self.to_screen(rect.min()), self.to_screen(rect.max()));
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(width, to_color32(color)),
        );
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        self.painter.text(
            self.to_screen(pos),
            Align2::LEFT_BOTTOM,
            text,
            FontId::proportional(size),
            to_color32(color),
        );
    }
}
