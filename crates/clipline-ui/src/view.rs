//! Timeline view geometry: zoom-to-fit and pan.

use clipline_core::PreviewConfig;

/// Smallest total length used when fitting to width, so an empty timeline
/// never divides by zero.
const FIT_EPSILON_SECS: f64 = 1e-3;

/// Zoom, pan and viewport width of the timeline strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    requested_zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    pan: f32,
    container_width: f32,
}

impl ViewState {
    pub fn new(config: &PreviewConfig) -> Self {
        Self {
            requested_zoom: config.default_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            pan: 0.0,
            container_width: 0.0,
        }
    }

    /// Zoom the user asked for, in pixels per second.
    pub fn requested_zoom(&self) -> f32 {
        self.requested_zoom
    }

    /// Horizontal scroll of the viewport into the content, in pixels.
    pub fn pan(&self) -> f32 {
        self.pan
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Effective scale: the larger of the requested zoom and the zoom that
    /// makes `total_secs` exactly fill the container.
    pub fn pixels_per_second(&self, total_secs: f64) -> f32 {
        let fit = self.container_width as f64 / total_secs.max(FIT_EPSILON_SECS);
        (fit as f32).max(self.requested_zoom)
    }

    /// Width of the whole timeline at the effective scale.
    pub fn content_width(&self, total_secs: f64) -> f32 {
        total_secs.max(0.0) as f32 * self.pixels_per_second(total_secs)
    }

    /// Largest valid pan for `total_secs` of content.
    pub fn max_pan(&self, total_secs: f64) -> f32 {
        (self.content_width(total_secs) - self.container_width).max(0.0)
    }

    /// Set the pan, clamped to `[0, max_pan]`.
    pub fn set_pan(&mut self, pan: f32, total_secs: f64) {
        let pan = if pan.is_finite() { pan } else { 0.0 };
        self.pan = pan.clamp(0.0, self.max_pan(total_secs));
    }

    /// Set the requested zoom, clamped to the configured range. Re-clamps
    /// the pan, since the content width changes with it.
    pub fn set_requested_zoom(&mut self, zoom: f32, total_secs: f64) {
        if zoom.is_finite() {
            self.requested_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
        self.set_pan(self.pan, total_secs);
    }

    pub fn set_container_width(&mut self, width: f32, total_secs: f64) {
        self.container_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.set_pan(self.pan, total_secs);
    }

    /// Content x of a global time.
    pub fn time_to_x(&self, seconds: f64, total_secs: f64) -> f32 {
        seconds as f32 * self.pixels_per_second(total_secs)
    }

    /// Global time (unclamped) under a content x.
    pub fn x_to_time(&self, content_x: f32, total_secs: f64) -> f64 {
        content_x as f64 / self.pixels_per_second(total_secs) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(container: f32) -> ViewState {
        let mut view = ViewState::new(&PreviewConfig::default());
        view.set_container_width(container, 0.0);
        view
    }

    #[test]
    fn test_fit_wins_when_timeline_is_short() {
        let view = view(900.0);
        // 9s into 900px needs 100px/s, above the default 50.
        assert_eq!(view.pixels_per_second(9.0), 100.0);
        assert_eq!(view.content_width(9.0), 900.0);
        assert_eq!(view.max_pan(9.0), 0.0);
    }

    #[test]
    fn test_requested_zoom_wins_when_larger() {
        let mut view = view(400.0);
        view.set_requested_zoom(120.0, 9.0);
        assert_eq!(view.pixels_per_second(9.0), 120.0);
        assert_eq!(view.max_pan(9.0), 9.0 * 120.0 - 400.0);
    }

    #[test]
    fn test_empty_timeline_has_finite_scale() {
        let view = view(400.0);
        let pps = view.pixels_per_second(0.0);
        assert!(pps.is_finite());
        assert_eq!(view.content_width(0.0), 0.0);
    }

    #[test]
    fn test_pan_is_clamped() {
        let mut view = view(400.0);
        view.set_pan(-30.0, 9.0);
        assert_eq!(view.pan(), 0.0);
        view.set_pan(1_000.0, 9.0);
        assert_eq!(view.pan(), 50.0);
    }

    #[test]
    fn test_zoom_is_clamped_and_reclamps_pan() {
        let mut view = view(400.0);
        view.set_requested_zoom(10_000.0, 9.0);
        assert_eq!(view.requested_zoom(), 500.0);
        view.set_pan(4_000.0, 9.0);
        assert_eq!(view.pan(), 4_000.0);
        view.set_requested_zoom(50.0, 9.0);
        assert_eq!(view.pan(), 50.0);
        view.set_requested_zoom(f32::NAN, 9.0);
        assert_eq!(view.requested_zoom(), 50.0);
    }
}
