//! Headless surface that records draw calls.

use crate::surface::{Surface, TextAlign, TextBaseline};
use kurbo::{BezPath, PathEl, Point, Size};
use peniko::Color;
use serde::Serialize;
use venuemap_core::SerializableColor;

/// Estimated glyph advance as a share of the font size.
pub const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// A recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize {
        size: Size,
    },
    Clear,
    Fill {
        points: Vec<Point>,
        color: SerializableColor,
    },
    Stroke {
        points: Vec<Point>,
        color: SerializableColor,
        width: f64,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f64,
        color: SerializableColor,
        align: TextAlign,
        baseline: TextBaseline,
    },
}

impl DrawCommand {
    /// Fill, stroke or text.
    pub fn is_paint(&self) -> bool {
        matches!(self, Self::Fill { .. } | Self::Stroke { .. } | Self::Text { .. })
    }
}

/// Surface that keeps every call in a list instead of painting pixels.
///
/// Text widths are estimated as `chars × font_size × CHAR_WIDTH_FACTOR`.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    font_size: f64,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            size: Size::ZERO,
            font_size: 10.0,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Number of fill, stroke and text calls.
    pub fn paint_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_paint()).count()
    }

    pub fn fills(&self) -> impl Iterator<Item = (&[Point], SerializableColor)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { points, color } => Some((points.as_slice(), *color)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[Point], SerializableColor, f64)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { points, color, width } => Some((points.as_slice(), *color, *width)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, SerializableColor)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, origin, color, .. } => Some((text.as_str(), *origin, *color)),
            _ => None,
        })
    }
}

/// Vertices of a polyline path, in order.
fn path_points(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::QuadTo(_, p) => Some(*p),
            PathEl::CurveTo(_, _, p) => Some(*p),
            PathEl::ClosePath => None,
        })
        .collect()
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.commands.push(DrawCommand::Resize { size });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            points: path_points(path),
            color: color.into(),
        });
    }

    fn stroke(&mut self, path: &BezPath, color: Color, width: f64) {
        self.commands.push(DrawCommand::Stroke {
            points: path_points(path),
            color: color.into(),
            width,
        });
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * CHAR_WIDTH_FACTOR
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Color, align: TextAlign, baseline: TextBaseline) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font_size: self.font_size,
            color: color.into(),
            align,
            baseline,
        });
    }
}
