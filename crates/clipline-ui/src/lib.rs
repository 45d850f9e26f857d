//! Clipline UI - timeline view, gestures and drawing
//!
//! Provides:
//! - Zoom-to-fit view geometry with a clamped pan
//! - Scrub vs. pan gesture routing
//! - A renderer over a minimal drawing-surface trait
//! - The preview session tying clips, timeline, playback and view together
//! - An egui timeline panel

pub mod gesture;
pub mod panel;
pub mod render;
pub mod session;
pub mod surface;
pub mod theme;
pub mod view;

pub use gesture::{classify, GestureEffect, GestureMode, GestureRouter};
pub use panel::TimelinePanel;
pub use render::{DrawSurface, FrameSummary, Renderer};
pub use session::Session;
pub use surface::{DisplayList, DrawCommand, PainterSurface};
pub use theme::{to_color32, Theme};
pub use view::ViewState;
