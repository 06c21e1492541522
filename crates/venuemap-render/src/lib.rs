//! VenueMap Render Library
//!
//! Paints venue templates onto any [`Surface`]: scaled, color-filled
//! polygons with fitted labels and selection highlights.
//! The default build also provides a Vello-backed surface.

pub mod label;
mod options;
mod recording;
mod renderer;
mod surface;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use label::{LabelLayout, LabelOverflow, fit_label};
pub use options::RenderOptions;
pub use recording::{CHAR_WIDTH_FACTOR, DrawCommand, RecordingSurface};
pub use renderer::{MapRenderer, RenderResult, RenderStats, RendererError, render};
pub use surface::{Surface, TextAlign, TextBaseline};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
