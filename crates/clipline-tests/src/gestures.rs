//! Integration tests for pointer gestures driving the cursor and the view.

use clipline_core::MediaKind;
use clipline_playback::PlaybackState;
use clipline_ui::GestureMode;

use crate::support::{abc_session, append, media, session};

// The ABC timeline is 9s in a 400px container: 50px/s (the default zoom
// beats the 44.4px/s fit), 450px of content, so pan is limited to 50px.

#[test]
fn pan_moves_view_opposite_to_pointer() {
    let (mut session, _clock) = abc_session();
    assert_eq!(session.view().pan(), 0.0);

    assert!(matches!(session.pointer_down(200.0), GestureMode::Panning { .. }));
    session.pointer_move(150.0);
    assert_eq!(session.view().pan(), 50.0);
    session.pointer_up();
}

#[test]
fn pan_is_clamped_to_content() {
    let (mut session, _clock) = abc_session();
    session.pointer_down(300.0);
    session.pointer_move(0.0);
    assert_eq!(session.view().pan(), 50.0);
    session.pointer_move(390.0);
    assert_eq!(session.view().pan(), 0.0);
    session.pointer_up();
}

#[test]
fn pan_does_not_move_cursor() {
    let (mut session, _clock) = abc_session();
    session.pointer_down(200.0);
    session.pointer_move(100.0);
    session.pointer_up();
    assert_eq!(session.cursor_secs(), 0.0);
    assert_eq!(session.state(), PlaybackState::Idle);
}

#[test]
fn scrub_gesture_retargets_playback() {
    let (mut session, clock) = abc_session();
    session.play();
    clock.advance_secs(0.5);
    session.tick();

    // Playhead at 0.5s -> 25px.
    assert_eq!(session.pointer_down(27.0), GestureMode::Scrubbing);
    session.pointer_move(250.0);
    assert_eq!(
        session.state(),
        PlaybackState::PlayingImage {
            index: 1,
            started_at: -0.5
        }
    );
    assert_eq!(session.engine().subscription_count(), 0);

    // Dragging further inside B only rebases its timer.
    session.pointer_move(300.0);
    assert_eq!(session.cursor_secs(), 6.0);
    assert!(matches!(session.state(), PlaybackState::PlayingImage { index: 1, .. }));
    session.pointer_up();
    assert_eq!(session.gesture_mode(), GestureMode::Idle);
}

#[test]
fn scrub_accounts_for_pan() {
    let (mut session, _clock) = abc_session();
    // Move the playhead to 8s (400px), then pan it into reach.
    session.pointer_down(0.0);
    session.pointer_move(400.0);
    session.pointer_up();
    assert_eq!(session.cursor_secs(), 8.0);

    session.pointer_down(300.0);
    session.pointer_move(250.0);
    session.pointer_up();
    assert_eq!(session.view().pan(), 50.0);

    // Content x 400 is now at surface x 350.
    assert_eq!(session.pointer_down(352.0), GestureMode::Scrubbing);
    session.pointer_move(400.0);
    assert_eq!(session.cursor_secs(), 9.0);
    assert_eq!(session.state(), PlaybackState::Ended);
}

#[test]
fn scrub_is_clamped_to_timeline() {
    let (mut session, _clock) = abc_session();
    session.pointer_down(3.0);
    session.pointer_move(-500.0);
    assert_eq!(session.cursor_secs(), 0.0);
    session.pointer_move(5_000.0);
    assert_eq!(session.cursor_secs(), 9.0);
}

#[test]
fn classification_is_fixed_per_press() {
    let (mut session, _clock) = abc_session();
    assert!(matches!(session.pointer_down(100.0), GestureMode::Panning { .. }));
    // Passing over the playhead does not turn the pan into a scrub.
    session.pointer_move(0.0);
    session.pointer_move(2.0);
    assert_eq!(session.cursor_secs(), 0.0);
    assert!(matches!(session.gesture_mode(), GestureMode::Panning { .. }));
}

#[test]
fn release_without_press_is_noop() {
    let (mut session, _clock) = session();
    session.pointer_up();
    session.pointer_move(10.0);
    assert_eq!(session.gesture_mode(), GestureMode::Idle);
    append(&mut session, media("a.png", MediaKind::Image, 1.0));
    session.pointer_up();
    assert_eq!(session.view().pan(), 0.0);
}
