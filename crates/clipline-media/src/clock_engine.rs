//! Media engine that plays a virtual clock instead of decoding.
//!
//! Sources must be registered with their duration before they are loaded.
//! Playback position advances with the supplied [`Clock`]; reaching the end
//! of a registered duration emits one `Ended` per attached subscription.

use clipline_core::{Clock, MediaSource};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

use crate::engine::{EngineEvent, MediaEngine, Subscription};

/// Virtual-clock media engine.
pub struct ClockEngine<C: Clock> {
    clock: C,
    durations: HashMap<MediaSource, f64>,
    source: Option<MediaSource>,
    still: Option<MediaSource>,
    /// Position at the last anchor point.
    position: f64,
    /// Clock reading when playback last (re)started; `None` while paused.
    anchor: Option<f64>,
    subscriptions: Vec<Subscription>,
    next_subscription: u64,
    events: VecDeque<EngineEvent>,
}

impl<C: Clock> ClockEngine<C> {
    /// Create an engine reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            durations: HashMap::new(),
            source: None,
            still: None,
            position: 0.0,
            anchor: None,
            subscriptions: Vec::new(),
            next_subscription: 1,
            events: VecDeque::new(),
        }
    }

    /// Register the playable duration of a source.
    pub fn register(&mut self, source: MediaSource, duration: f64) {
        self.durations.insert(source, duration.max(0.0));
    }

    /// Currently loaded video source.
    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    /// Still image currently presented.
    pub fn still(&self) -> Option<&MediaSource> {
        self.still.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Number of attached end-of-playback subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn loaded_duration(&self) -> Option<f64> {
        self.source
            .as_ref()
            .and_then(|source| self.durations.get(source).copied())
    }

    fn position_now(&self) -> f64 {
        let position = match self.anchor {
            Some(anchor) => self.position + (self.clock.now_secs() - anchor),
            None => self.position,
        };
        match self.loaded_duration() {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    /// Emit `Ended` if playback ran past the loaded duration.
    fn check_end(&mut self) {
        let Some(duration) = self.loaded_duration() else {
            return;
        };
        if self.anchor.is_some() && self.position_now() >= duration {
            self.position = duration;
            self.anchor = None;
            debug!(subscribers = self.subscriptions.len(), "Source reached end");
            for subscription in &self.subscriptions {
                self.events.push_back(EngineEvent::Ended(*subscription));
            }
        }
    }
}

impl<C: Clock> MediaEngine for ClockEngine<C> {
    fn set_source(&mut self, source: &MediaSource) {
        self.source = Some(source.clone());
        self.still = None;
        self.position = 0.0;
        self.anchor = None;
        if let Some(duration) = self.durations.get(source).copied() {
            self.events.push_back(EngineEvent::MetadataReady {
                source: source.clone(),
                duration,
            });
        }
    }

    fn play(&mut self) {
        if self.source.is_none() || self.anchor.is_some() {
            return;
        }
        // Playing from the end restarts, like a media element does.
        if self
            .loaded_duration()
            .is_some_and(|duration| self.position >= duration)
        {
            self.position = 0.0;
        }
        self.anchor = Some(self.clock.now_secs());
    }

    fn pause(&mut self) {
        self.position = self.position_now();
        self.anchor = None;
    }

    fn seek(&mut self, seconds: f64) {
        let upper = self.loaded_duration().unwrap_or(f64::INFINITY);
        self.position = if seconds.is_finite() {
            seconds.clamp(0.0, upper)
        } else {
            0.0
        };
        if self.anchor.is_some() {
            self.anchor = Some(self.clock.now_secs());
        }
    }

    fn current_time(&self) -> f64 {
        self.position_now()
    }

    fn present_still(&mut self, source: &MediaSource) {
        self.source = None;
        self.anchor = None;
        self.position = 0.0;
        self.still = Some(source.clone());
    }

    fn stop(&mut self) {
        self.source = None;
        self.still = None;
        self.anchor = None;
        self.position = 0.0;
    }

    fn subscribe_ended(&mut self) -> Subscription {
        let subscription = Subscription::from_raw(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(subscription);
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscriptions.retain(|s| *s != subscription);
        trace!(id = subscription.id(), "Subscription detached");
    }

    fn poll_event(&mut self) -> Option<EngineEvent> {
        self.check_end();
        self.events.pop_front()
    }
}
