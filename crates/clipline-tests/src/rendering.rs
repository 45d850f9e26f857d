//! Integration tests for the render pass and view geometry.

use clipline_core::{format_time, Rect};
use clipline_ui::{DisplayList, DrawCommand, DrawSurface, Theme};
use proptest::prelude::*;

use crate::support::{abc_session, session};

#[test]
fn format_time_readouts() {
    assert_eq!(format_time(65.0), "01:05");
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(f64::NAN), "00:00");
    assert_eq!(format_time(59.9), "00:59");
}

#[test]
fn frame_follows_cursor_and_clips() {
    let (mut session, clock) = abc_session();
    session.play();
    clock.advance_secs(2.0);
    session.tick();

    let mut surface = DisplayList::new(0.0, session.config().timeline_height);
    let summary = session.render(&mut surface);
    assert_eq!(summary.pixels_per_second, 50.0);
    assert_eq!(surface.width(), 450.0);
    assert_eq!(summary.playhead_x, 100.0);
    assert_eq!(summary.readout, "00:02 / 00:09");
    assert_eq!(summary.grid_lines, 9);
    assert_eq!(surface.texts(), ["A.mp4", "B.png", "C.mp4"]);

    // Every clip rect is painted in that clip's own color.
    let clip_fills: Vec<_> = surface
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::FillRect { rect, color } if rect.y == Theme::CLIP_TOP => Some((*rect, *color)),
            _ => None,
        })
        .collect();
    let expected: Vec<_> = session
        .timeline()
        .iter()
        .map(|(span, clip)| {
            let left = span.start.to_seconds_f64() as f32 * 50.0;
            let right = span.end().to_seconds_f64() as f32 * 50.0;
            (Rect::from_x_span(left, right, 20.0, 40.0), clip.color)
        })
        .collect();
    assert_eq!(clip_fills, expected);
}

#[test]
fn playhead_band_spans_full_height() {
    let (session, _clock) = abc_session();
    let mut surface = DisplayList::new(0.0, 80.0);
    session.render(&mut surface);
    let band = surface.commands().iter().find_map(|cmd| match cmd {
        DrawCommand::FillRect { rect, color } if *color == Theme::playhead_band() => Some(*rect),
        _ => None,
    });
    assert_eq!(band, Some(Rect::new(-5.0, 0.0, 10.0, 80.0)));
}

#[test]
fn zoom_widens_content_past_viewport() {
    let (mut session, _clock) = abc_session();
    session.set_zoom(100.0);
    let mut surface = DisplayList::new(0.0, 80.0);
    let summary = session.render(&mut surface);
    assert_eq!(summary.content_width, 900.0);
    assert_eq!(session.view().max_pan(session.total_secs()), 500.0);
}

#[test]
fn empty_session_renders() {
    let (session, _clock) = session();
    let mut surface = DisplayList::new(0.0, 80.0);
    let summary = session.render(&mut surface);
    assert_eq!(summary.clips_drawn, 0);
    assert_eq!(summary.readout, "00:00 / 00:00");
}

proptest! {
    #[test]
    fn pixels_per_second_respects_both_bounds(
        container in 1.0f32..4_000.0,
        total_ms in 1u32..600_000,
        zoom in 1.0f32..500.0,
    ) {
        let (mut session, _clock) = session();
        session.set_container_width(container);
        session.set_zoom(zoom);
        let total = total_ms as f64 / 1000.0;
        let pps = session.view().pixels_per_second(total);
        prop_assert!(pps >= zoom);
        prop_assert!(pps as f64 >= (container as f64 / total) * (1.0 - 1e-6));
        prop_assert!(session.view().content_width(total) >= container * (1.0 - 1e-4));
    }
}
