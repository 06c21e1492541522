//! Drawing surface abstraction.

use kurbo::{BezPath, Point, Size};
use peniko::Color;
use serde::Serialize;

/// Horizontal text alignment relative to the text origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
}

/// Vertical text alignment relative to the text origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// A caller-owned 2D drawing context.
///
/// Implementations can record commands, build a Vello scene, or forward to
/// a browser canvas. All coordinates are surface units.
pub trait Surface {
    /// Current pixel size.
    fn size(&self) -> Size;

    /// Set the pixel size. Resets the backing buffer.
    fn resize(&mut self, size: Size);

    /// Clear everything painted so far.
    fn clear(&mut self);

    /// Fill a closed path.
    fn fill(&mut self, path: &BezPath, color: Color);

    /// Stroke a path outline.
    fn stroke(&mut self, path: &BezPath, color: Color, width: f64);

    /// Set the font size used by `measure_text` and `fill_text`.
    fn set_font_size(&mut self, size: f64);

    /// Width of `text` at the current font size.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Draw a single line of text anchored at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, color: Color, align: TextAlign, baseline: TextBaseline);
}
