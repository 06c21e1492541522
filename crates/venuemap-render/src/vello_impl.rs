//! Vello-based surface implementation.

use crate::surface::{Surface, TextAlign, TextBaseline};
use kurbo::{Affine, BezPath, Point, Size, Stroke};
use parley::layout::{Layout, PositionedLayoutItem};
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

/// Generic family used for labels; resolved against system fonts.
const LABEL_FONT_FAMILY: &str = "sans-serif";

/// Surface that encodes draw calls into a Vello scene for GPU rendering.
pub struct VelloSurface {
    /// The Vello scene being built.
    scene: Scene,
    size: Size,
    font_size: f64,
    /// Font context for text layout (cached across frames).
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloSurface {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            size: Size::ZERO,
            font_size: 10.0,
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn layout_text(&mut self, text: &str, brush: Brush) -> Layout<Brush> {
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(self.font_size as f32));
        builder.push_default(StyleProperty::Brush(brush));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(
            LABEL_FONT_FAMILY.into(),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());
        layout
    }
}

impl Surface for VelloSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.scene.reset();
    }

    fn clear(&mut self) {
        self.scene.reset();
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, path);
    }

    fn stroke(&mut self, path: &BezPath, color: Color, width: f64) {
        let stroke = Stroke::new(width);
        self.scene.stroke(&stroke, Affine::IDENTITY, color, None, path);
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let layout = self.layout_text(text, Brush::Solid(Color::BLACK));
        layout.width() as f64
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Color, align: TextAlign, baseline: TextBaseline) {
        if text.is_empty() {
            return;
        }
        let brush = Brush::Solid(color);
        let layout = self.layout_text(text, brush.clone());

        let width = layout.width() as f64;
        let height = layout.height() as f64;
        let x = match align {
            TextAlign::Start => origin.x,
            TextAlign::Center => origin.x - width / 2.0,
            TextAlign::End => origin.x - width,
        };
        let y = match baseline {
            TextBaseline::Top => origin.y,
            TextBaseline::Middle => origin.y - height / 2.0,
            TextBaseline::Bottom => origin.y - height,
        };
        let text_transform = Affine::translate((x, y));

        // Adapted from Parley's vello example
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut gx = glyph_run.offset();
                let gy = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let placed = vello::Glyph {
                            id: glyph.id,
                            x: gx + glyph.x,
                            y: gy - glyph.y,
                        };
                        gx += glyph.advance;
                        placed
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render;
    use crate::options::RenderOptions;
    use kurbo::{Rect, Shape as KurboShape};
    use venuemap_core::{Area, SelectionSet, VenueTemplate};

    #[test]
    fn test_surface_creation() {
        let surface = VelloSurface::new();
        assert!(surface.scene().encoding().is_empty());
    }

    #[test]
    fn test_fill_encodes_and_clear_resets() {
        let mut surface = VelloSurface::new();
        let path = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
        surface.fill(&path, Color::WHITE);
        assert!(!surface.scene().encoding().is_empty());

        surface.clear();
        assert!(surface.scene().encoding().is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = VenueTemplate::new("t", 400.0, 200.0).with_area(Area::new(
            "a",
            "A",
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)],
        ));
        let mut surface = VelloSurface::new();
        let options = RenderOptions::default().with_labels(false);
        render(&mut surface, &template, &SelectionSet::new(), &options).unwrap();

        assert_eq!(surface.size(), Size::new(800.0, 400.0));
        assert!(!surface.scene().encoding().is_empty());
    }
}
