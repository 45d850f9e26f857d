//! egui widget hosting the timeline strip.

use clipline_core::Clock;
use clipline_media::MediaEngine;
use clipline_timeline::ClipId;
use egui::{CursorIcon, Sense, Ui, Vec2};
use tracing::warn;

use crate::gesture::{classify, GestureMode};
use crate::render::FrameSummary;
use crate::session::Session;
use crate::surface::PainterSurface;

/// Timeline strip bound to a session for one frame.
///
/// Pointer presses are routed through the session's gesture router, and
/// clips dragged in with a [`ClipId`] payload are appended on release.
pub struct TimelinePanel<'a, E: MediaEngine, C: Clock> {
    session: &'a mut Session<E, C>,
}

impl<'a, E: MediaEngine, C: Clock> TimelinePanel<'a, E, C> {
    pub fn new(session: &'a mut Session<E, C>) -> Self {
        Self { session }
    }

    pub fn show(self, ui: &mut Ui) -> FrameSummary {
        let session = self.session;
        let height = session.config().timeline_height;
        let (response, painter) =
            ui.allocate_painter(Vec2::new(ui.available_width(), height), Sense::click_and_drag());
        let rect = response.rect;
        session.set_container_width(rect.width());

        // Classify at the press position, not where the drag was detected.
        if response.drag_started() {
            let origin = ui.input(|i| i.pointer.press_origin());
            if let Some(origin) = origin.or(response.interact_pointer_pos()) {
                session.pointer_down(origin.x - rect.left());
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                session.pointer_move(pos.x - rect.left());
            }
        }
        if response.drag_stopped() {
            session.pointer_up();
        }

        if let Some(id) = response.dnd_release_payload::<ClipId>() {
            if let Err(err) = session.append_to_timeline(*id) {
                warn!(error = %err, "Dropped clip could not be appended");
            }
        }

        match session.gesture_mode() {
            GestureMode::Scrubbing => ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal),
            GestureMode::Panning { .. } => ui.ctx().set_cursor_icon(CursorIcon::Grabbing),
            GestureMode::Idle => {
                if let Some(pos) = response.hover_pos() {
                    let hover = classify(
                        pos.x - rect.left(),
                        session.view(),
                        session.cursor_secs(),
                        session.total_secs(),
                        session.config().scrub_tolerance_px,
                    );
                    if hover == GestureMode::Scrubbing {
                        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
                    }
                }
            }
        }

        let mut surface = PainterSurface::new(&painter, rect, session.view().pan());
        session.render(&mut surface)
    }
}
