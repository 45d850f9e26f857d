//! Preview session: the one owner of clips, timeline, playback and view.
//!
//! Every mutation goes through here. The cursor is written only by the
//! scheduler (directly during playback, through [`Session::pointer_move`]
//! when scrubbing), and the pan only through [`ViewState::set_pan`].

use clipline_core::{ClipLineError, Clock, PreviewConfig, RationalTime, Result};
use clipline_media::{IngestReport, MediaEngine, ProbedMedia};
use clipline_playback::{PlaybackState, Scheduler};
use clipline_timeline::{Clip, ClipId, ClipStore, Timeline};
use std::sync::Arc;
use tracing::{info, warn};

use crate::gesture::{GestureEffect, GestureMode, GestureRouter};
use crate::render::{DrawSurface, FrameSummary, Renderer};
use crate::view::ViewState;

/// Session state for one previewer window.
pub struct Session<E: MediaEngine, C: Clock> {
    config: PreviewConfig,
    store: ClipStore,
    timeline: Timeline,
    scheduler: Scheduler<E, C>,
    view: ViewState,
    gestures: GestureRouter,
    renderer: Renderer,
}

impl<E: MediaEngine, C: Clock> Session<E, C> {
    pub fn new(engine: E, clock: C, config: PreviewConfig) -> Self {
        let config = config.validate();
        Self {
            scheduler: Scheduler::new(engine, clock, config.poll_interval()),
            view: ViewState::new(&config),
            gestures: GestureRouter::new(config.scrub_tolerance_px),
            renderer: Renderer::new(),
            store: ClipStore::new(),
            timeline: Timeline::new(),
            config,
        }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn store(&self) -> &ClipStore {
        &self.store
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn gesture_mode(&self) -> GestureMode {
        self.gestures.mode()
    }

    pub fn state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    pub fn scheduler(&self) -> &Scheduler<E, C> {
        &self.scheduler
    }

    pub fn engine(&self) -> &E {
        self.scheduler.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.scheduler.engine_mut()
    }

    pub fn cursor_secs(&self) -> f64 {
        self.scheduler.cursor_secs()
    }

    pub fn total_secs(&self) -> f64 {
        self.timeline.total_length_secs()
    }

    // ── Clips ──────────────────────────────────────────────────

    /// Turn probed media into a stored clip.
    pub fn add_media(&mut self, media: ProbedMedia) -> Result<Arc<Clip>> {
        let clip = Clip::new(media.name, media.source, media.kind, media.duration)?;
        info!(clip = %clip.name, kind = %clip.kind, duration = %clip.duration, "Clip added");
        Ok(self.store.insert(clip))
    }

    /// Store every accepted file of an ingestion batch. Returns the new clip
    /// ids in batch order.
    pub fn add_report(&mut self, report: IngestReport) -> Vec<ClipId> {
        for skipped in &report.skipped {
            warn!(error = %skipped, "File skipped during ingestion");
        }
        report
            .accepted
            .into_iter()
            .filter_map(|media| match self.add_media(media) {
                Ok(clip) => Some(clip.id),
                Err(err) => {
                    warn!(error = %err, "Rejected probed media");
                    None
                }
            })
            .collect()
    }

    /// Append a stored clip to the end of the timeline. Playback in progress
    /// is not affected.
    pub fn append_to_timeline(&mut self, id: ClipId) -> Result<usize> {
        let clip = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| ClipLineError::NotFound(format!("clip {}", id)))?;
        let index = self.timeline.append(clip);
        let total = self.total_secs();
        self.view.set_pan(self.view.pan(), total);
        Ok(index)
    }

    // ── Transport ──────────────────────────────────────────────

    pub fn play(&mut self) {
        self.scheduler.play(&self.timeline);
    }

    pub fn pause(&mut self) {
        self.scheduler.pause(&self.timeline);
    }

    pub fn toggle_playback(&mut self) {
        self.scheduler.toggle(&self.timeline);
    }

    /// Move the cursor directly, as a scrub would. Out-of-range targets are
    /// clamped.
    pub fn scrub_to(&mut self, time: RationalTime) {
        self.scheduler.scrub_to(&self.timeline, time);
    }

    /// Drain engine signals and advance timers. Call once per frame.
    pub fn tick(&mut self) {
        self.scheduler.pump_events(&self.timeline);
        self.scheduler.tick(&self.timeline);
    }

    // ── View ───────────────────────────────────────────────────

    pub fn set_zoom(&mut self, zoom: f32) {
        let total = self.total_secs();
        self.view.set_requested_zoom(zoom, total);
    }

    pub fn set_container_width(&mut self, width: f32) {
        let total = self.total_secs();
        self.view.set_container_width(width, total);
    }

    // ── Pointer ────────────────────────────────────────────────

    /// Press at surface x (viewport-relative).
    pub fn pointer_down(&mut self, x: f32) -> GestureMode {
        let cursor = self.cursor_secs();
        let total = self.total_secs();
        self.gestures.pointer_down(x, &self.view, cursor, total)
    }

    pub fn pointer_move(&mut self, x: f32) {
        match self
            .gestures
            .pointer_move(x, &self.view, self.timeline.total_length())
        {
            GestureEffect::None => {}
            GestureEffect::Scrub(time) => self.scrub_to(time),
            GestureEffect::Pan(pan) => {
                let total = self.total_secs();
                self.view.set_pan(pan, total);
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.gestures.pointer_up();
    }

    // ── Drawing ────────────────────────────────────────────────

    /// Render the timeline strip. Reads state only.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> FrameSummary {
        self.renderer
            .render(surface, &self.timeline, self.cursor_secs(), &self.view)
    }
}
