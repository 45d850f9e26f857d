//! Contract between playback and the media decode/render engine.
//!
//! Engine signals are queued by the engine and drained with
//! [`MediaEngine::poll_event`]. End-of-playback signals carry the
//! [`Subscription`] they were emitted for, so a signal that arrives after its
//! subscription was detached can be recognized and dropped.

use clipline_core::MediaSource;

/// Handle for one end-of-playback subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    /// Wrap a raw id. Engines hand these out; ids must not repeat.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A signal emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The loaded source played to its end.
    Ended(Subscription),
    /// Container metadata for the loaded source is available.
    MetadataReady { source: MediaSource, duration: f64 },
}

/// Media decode/render engine driven by the playback scheduler.
pub trait MediaEngine {
    /// Load a source, replacing whatever was loaded. Position resets to zero.
    fn set_source(&mut self, source: &MediaSource);

    fn play(&mut self);

    fn pause(&mut self);

    /// Seek within the loaded source, in seconds.
    fn seek(&mut self, seconds: f64);

    /// Playback position within the loaded source, in seconds.
    fn current_time(&self) -> f64;

    /// Show a still image on the static image surface. Stops any video.
    fn present_still(&mut self, source: &MediaSource);

    /// Stop playback and unload everything.
    fn stop(&mut self);

    /// Attach an end-of-playback subscription.
    fn subscribe_ended(&mut self) -> Subscription;

    /// Detach a subscription. Unknown subscriptions are ignored.
    fn unsubscribe(&mut self, subscription: Subscription);

    /// Next queued signal, if any.
    fn poll_event(&mut self) -> Option<EngineEvent>;
}
