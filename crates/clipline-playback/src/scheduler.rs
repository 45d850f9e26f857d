//! Playback scheduler: the state machine that decides which clip is live.
//!
//! Transitions:
//! - `Idle`/`Paused`/`Ended` --play--> `PlayingVideo` | `PlayingImage` at the cursor
//! - `PlayingVideo(i)` --engine end signal--> start(i + 1)
//! - `PlayingImage(i)` --timer elapsed--> start(i + 1)
//! - start(i) with `i` out of range --> `Ended`
//! - any playing state --pause--> `Paused(i)`
//!
//! Every playing state owns exactly one resource: an end-of-playback
//! [`Subscription`] for video, an [`ImageTimer`] for stills. Entering any
//! state first goes through [`Scheduler::release`], which detaches or drops
//! whatever the previous state owned, so at most one is ever armed.
//!
//! The scheduler is also the only writer of the playback cursor.

use clipline_core::{Clock, MediaKind, RationalTime};
use clipline_media::{EngineEvent, MediaEngine, Subscription};
use clipline_timeline::{Location, Timeline};
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::timer::{ImageTimer, TimerPoll};

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackState {
    /// Nothing started yet, or nothing to play.
    Idle,
    /// Entry `index` is a video playing in the media engine.
    PlayingVideo { index: usize },
    /// Entry `index` is a still; `started_at` is the clock reading (seconds)
    /// at which its local time was zero.
    PlayingImage { index: usize, started_at: f64 },
    /// Paused inside entry `index`.
    Paused { index: usize },
    /// Played past the last entry.
    Ended,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        matches!(self, Self::PlayingVideo { .. } | Self::PlayingImage { .. })
    }

    /// Entry the state refers to, if any.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::PlayingVideo { index }
            | Self::PlayingImage { index, .. }
            | Self::Paused { index } => Some(index),
            Self::Idle | Self::Ended => None,
        }
    }
}

/// Internal state carrying the resource each state owns.
#[derive(Debug)]
enum Active {
    Idle,
    Video {
        index: usize,
        subscription: Subscription,
    },
    Image {
        index: usize,
        timer: ImageTimer,
    },
    Paused {
        index: usize,
    },
    Ended,
}

impl Active {
    fn state(&self) -> PlaybackState {
        match self {
            Self::Idle => PlaybackState::Idle,
            Self::Video { index, .. } => PlaybackState::PlayingVideo { index: *index },
            Self::Image { index, timer } => PlaybackState::PlayingImage {
                index: *index,
                started_at: timer.started_at(),
            },
            Self::Paused { index } => PlaybackState::Paused { index: *index },
            Self::Ended => PlaybackState::Ended,
        }
    }
}

/// Drives the media engine through the timeline and owns the playback cursor.
pub struct Scheduler<E: MediaEngine, C: Clock> {
    engine: E,
    clock: C,
    active: Active,
    cursor: RationalTime,
    poll_interval: Duration,
}

impl<E: MediaEngine, C: Clock> Scheduler<E, C> {
    /// Create an idle scheduler. `poll_interval` is the image timer tick.
    pub fn new(engine: E, clock: C, poll_interval: Duration) -> Self {
        Self {
            engine,
            clock,
            active: Active::Idle,
            cursor: RationalTime::ZERO,
            poll_interval,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.active.state()
    }

    pub fn is_playing(&self) -> bool {
        self.state().is_playing()
    }

    /// Global playhead time.
    pub fn cursor(&self) -> RationalTime {
        self.cursor
    }

    /// [`Scheduler::cursor`] in float seconds.
    pub fn cursor_secs(&self) -> f64 {
        self.cursor.to_seconds_f64()
    }

    /// Number of armed timers plus attached subscriptions owned by the
    /// current state. Never more than one.
    pub fn armed_resources(&self) -> usize {
        match self.active {
            Active::Video { .. } | Active::Image { .. } => 1,
            Active::Idle | Active::Paused { .. } | Active::Ended => 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start playback at entry `index` from its beginning.
    ///
    /// Out of range ends playback. On an empty timeline this does nothing.
    pub fn start(&mut self, timeline: &Timeline, index: usize) {
        if timeline.is_empty() {
            debug!("Start ignored: timeline is empty");
            return;
        }
        self.start_at(timeline, index, RationalTime::ZERO);
    }

    /// Play from the cursor. Restarts from zero after the end.
    pub fn play(&mut self, timeline: &Timeline) {
        if timeline.is_empty() {
            debug!("Play ignored: timeline is empty");
            return;
        }
        if self.is_playing() {
            return;
        }
        if matches!(self.active, Active::Ended) || self.cursor >= timeline.total_length() {
            self.cursor = RationalTime::ZERO;
        }
        match timeline.locate(self.cursor) {
            Location::Within { index, offset } => self.start_at(timeline, index, offset),
            Location::PastEnd => self.finish(timeline),
        }
    }

    /// Pause at the cursor, releasing the active timer or subscription.
    pub fn pause(&mut self, timeline: &Timeline) {
        if !self.is_playing() {
            return;
        }
        self.sync_cursor(timeline);
        let from = self.release();
        self.engine.pause();
        if let Some(index) = from.index() {
            self.active = Active::Paused { index };
        }
        debug!(?from, to = ?self.state(), cursor = %self.cursor, "Playback transition");
    }

    /// Play/pause control.
    pub fn toggle(&mut self, timeline: &Timeline) {
        if self.is_playing() {
            self.pause(timeline);
        } else {
            self.play(timeline);
        }
    }

    /// Set the cursor from outside (scrubbing). The target is clamped to
    /// `[0, total]`.
    ///
    /// While playing, a target inside the live clip only seeks; a target in
    /// another clip retargets playback there, and the end finishes playback.
    /// While not playing, the cursor moves and the clip under it is cued;
    /// the very end counts as having finished.
    pub fn scrub_to(&mut self, timeline: &Timeline, time: RationalTime) {
        let target = time.clamp(RationalTime::ZERO, timeline.total_length());
        let location = timeline.locate(target);
        let now = self.clock.now();
        let live = match &self.active {
            Active::Video { index, .. } | Active::Image { index, .. } => Some(*index),
            Active::Idle | Active::Paused { .. } | Active::Ended => None,
        };

        match (live, location) {
            (Some(live), Location::Within { index, offset }) if live == index => {
                match &mut self.active {
                    Active::Video { .. } => self.engine.seek(offset.to_seconds_f64()),
                    Active::Image { timer, .. } => timer.rebase(now, offset.to_seconds_f64()),
                    Active::Idle | Active::Paused { .. } | Active::Ended => {}
                }
                self.cursor = target;
            }
            (Some(_), Location::Within { index, offset }) => self.start_at(timeline, index, offset),
            (Some(_), Location::PastEnd) => self.finish(timeline),
            (None, Location::Within { index, offset }) => self.cue(timeline, index, offset),
            (None, Location::PastEnd) if !timeline.is_empty() && !matches!(self.active, Active::Ended) => {
                self.finish(timeline)
            }
            (None, Location::PastEnd) => self.cursor = target,
        }
        trace!(cursor = %self.cursor, state = ?self.state(), "Scrubbed");
    }

    /// Advance time-driven state. Call once per frame/tick.
    ///
    /// Checks the image timer (at its own interval) and refreshes the cursor
    /// from whichever time source owns the live clip.
    pub fn tick(&mut self, timeline: &Timeline) {
        let now = self.clock.now();
        let elapsed = match &mut self.active {
            Active::Image { index, timer } => (timer.poll(now) == TimerPoll::Elapsed).then_some(*index),
            _ => None,
        };
        if let Some(index) = elapsed {
            debug!(index, "Image display time elapsed");
            self.start(timeline, index + 1);
            return;
        }
        self.sync_cursor(timeline);
    }

    /// Drain and handle all queued engine signals.
    pub fn pump_events(&mut self, timeline: &Timeline) {
        while let Some(event) = self.engine.poll_event() {
            self.handle_event(timeline, event);
        }
    }

    /// React to one engine signal.
    pub fn handle_event(&mut self, timeline: &Timeline, event: EngineEvent) {
        match event {
            EngineEvent::Ended(subscription) => match self.active {
                Active::Video {
                    index,
                    subscription: live,
                } if live == subscription => {
                    debug!(index, "Video reached end");
                    self.start(timeline, index + 1);
                }
                _ => trace!(id = subscription.id(), "Ignoring end signal for detached subscription"),
            },
            EngineEvent::MetadataReady { source, duration } => {
                trace!(source = %source.display_name(), duration, "Metadata ready");
            }
        }
    }

    /// Enter the playing state for entry `index`, `offset` into it.
    fn start_at(&mut self, timeline: &Timeline, index: usize, offset: RationalTime) {
        let from = self.release();
        let (Some(clip), Some(start)) = (timeline.entry(index), timeline.start_of(index)) else {
            self.finish(timeline);
            return;
        };
        self.cursor = start + offset;
        let offset_secs = offset.to_seconds_f64();

        match clip.kind {
            MediaKind::Video => {
                self.engine.set_source(&clip.source);
                if offset_secs > 0.0 {
                    self.engine.seek(offset_secs);
                }
                let subscription = self.engine.subscribe_ended();
                self.engine.play();
                self.active = Active::Video {
                    index,
                    subscription,
                };
            }
            MediaKind::Image => {
                self.engine.present_still(&clip.source);
                let timer = ImageTimer::arm(
                    self.clock.now(),
                    offset_secs,
                    clip.duration_secs(),
                    self.poll_interval,
                );
                self.active = Active::Image { index, timer };
            }
        }
        debug!(?from, to = ?self.state(), clip = %clip.name, cursor = %self.cursor, "Playback transition");
    }

    /// Show entry `index` without playing it.
    fn cue(&mut self, timeline: &Timeline, index: usize, offset: RationalTime) {
        let (Some(clip), Some(start)) = (timeline.entry(index), timeline.start_of(index)) else {
            return;
        };
        let reload = self.engine_source_differs(index);
        self.release();
        match clip.kind {
            MediaKind::Video => {
                if reload {
                    self.engine.set_source(&clip.source);
                }
                self.engine.seek(offset.to_seconds_f64());
            }
            MediaKind::Image => self.engine.present_still(&clip.source),
        }
        self.cursor = start + offset;
        self.active = Active::Paused { index };
    }

    /// Whether the engine must be reloaded to cue entry `index`.
    fn engine_source_differs(&self, index: usize) -> bool {
        !matches!(self.active, Active::Paused { index: cued } if cued == index)
    }

    /// Stop the engine and move to `Ended` with the cursor at the end.
    fn finish(&mut self, timeline: &Timeline) {
        let from = self.release();
        self.engine.stop();
        self.cursor = timeline.total_length();
        self.active = Active::Ended;
        info!(?from, total = %self.cursor, "Playback ended");
    }

    /// Tear down whatever the current state owns and leave `Idle` in its
    /// place. Returns the state that was left.
    fn release(&mut self) -> PlaybackState {
        let previous = std::mem::replace(&mut self.active, Active::Idle);
        let state = previous.state();
        match previous {
            Active::Video { subscription, .. } => {
                self.engine.unsubscribe(subscription);
                self.engine.pause();
            }
            Active::Image { timer, .. } => drop(timer),
            Active::Idle | Active::Paused { .. } | Active::Ended => {}
        }
        state
    }

    /// Refresh the cursor from the live clip's time source.
    fn sync_cursor(&mut self, timeline: &Timeline) {
        let (index, local) = match &self.active {
            Active::Video { index, .. } => (*index, self.engine.current_time()),
            Active::Image { index, timer } => (*index, timer.elapsed(self.clock.now())),
            Active::Idle | Active::Paused { .. } | Active::Ended => return,
        };
        if let Some(span) = timeline.span(index) {
            let local = RationalTime::from_seconds_f64(local).clamp(RationalTime::ZERO, span.duration);
            self.cursor = span.start + local;
        }
    }
}
