//! Pointer gesture routing for the timeline strip.
//!
//! One pointer, one gesture per press. The press is classified exactly once:
//! near the playhead it scrubs, anywhere else it pans. The router only
//! computes what should change; the session applies it.

use clipline_core::RationalTime;
use tracing::debug;

use crate::view::ViewState;

/// What the current press is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureMode {
    Idle,
    /// Dragging the playhead.
    Scrubbing,
    /// Dragging the view; remembers where the drag began.
    Panning { start_x: f32, start_pan: f32 },
}

/// Change requested by a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    None,
    /// Move the playback cursor to this (already clamped) time.
    Scrub(RationalTime),
    /// Set the view pan to this offset (the view clamps it).
    Pan(f32),
}

/// Decide scrub vs. pan for a press at surface x `pointer_x`.
///
/// Content x is `pointer_x + pan`; the playhead sits at
/// `cursor * pixels_per_second`. A press within `tolerance` pixels of it
/// (inclusive) scrubs.
pub fn classify(
    pointer_x: f32,
    view: &ViewState,
    cursor_secs: f64,
    total_secs: f64,
    tolerance: f32,
) -> GestureMode {
    let content_x = pointer_x + view.pan();
    let playhead_x = view.time_to_x(cursor_secs, total_secs);
    if (content_x - playhead_x).abs() <= tolerance {
        GestureMode::Scrubbing
    } else {
        GestureMode::Panning {
            start_x: pointer_x,
            start_pan: view.pan(),
        }
    }
}

/// Routes pointer down/move/up into scrub or pan effects.
#[derive(Debug, Clone)]
pub struct GestureRouter {
    mode: GestureMode,
    tolerance: f32,
}

impl GestureRouter {
    /// Create a router with a playhead grab band of `tolerance` pixels on
    /// each side.
    pub fn new(tolerance: f32) -> Self {
        Self {
            mode: GestureMode::Idle,
            tolerance,
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Start a gesture. A press while a gesture is active restarts
    /// classification.
    pub fn pointer_down(
        &mut self,
        pointer_x: f32,
        view: &ViewState,
        cursor_secs: f64,
        total_secs: f64,
    ) -> GestureMode {
        self.mode = classify(pointer_x, view, cursor_secs, total_secs, self.tolerance);
        debug!(pointer_x, pan = view.pan(), mode = ?self.mode, "Gesture classified");
        self.mode
    }

    /// Continue the active gesture.
    pub fn pointer_move(
        &self,
        pointer_x: f32,
        view: &ViewState,
        total: RationalTime,
    ) -> GestureEffect {
        match self.mode {
            GestureMode::Idle => GestureEffect::None,
            GestureMode::Scrubbing => {
                let content_x = pointer_x + view.pan();
                let seconds = view.x_to_time(content_x, total.to_seconds_f64());
                let time = RationalTime::from_seconds_f64(seconds).clamp(RationalTime::ZERO, total);
                GestureEffect::Scrub(time)
            }
            GestureMode::Panning { start_x, start_pan } => {
                GestureEffect::Pan(start_pan - (pointer_x - start_x))
            }
        }
    }

    /// End the active gesture. Safe to call with no gesture active.
    pub fn pointer_up(&mut self) {
        if self.mode != GestureMode::Idle {
            debug!(mode = ?self.mode, "Gesture ended");
        }
        self.mode = GestureMode::Idle;
    }
}
