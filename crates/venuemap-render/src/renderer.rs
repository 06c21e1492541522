//! Venue map renderer.

use crate::label::fit_label;
use crate::options::RenderOptions;
use crate::surface::{Surface, TextAlign, TextBaseline};
use kurbo::{Point, Shape as KurboShape, Vec2};
use peniko::Color;
use thiserror::Error;
use venuemap_core::geometry::{polygon_bounds, polygon_path, widest_chord_midpoint};
use venuemap_core::{Area, MapLayout, SelectionSet, TemplateError, VenueTemplate};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error(transparent)]
    InvalidTemplate(#[from] TemplateError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Offset of the label shadow pass.
const SHADOW_OFFSET: Vec2 = Vec2::new(1.0, 1.0);

/// What a render call painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    pub areas_drawn: usize,
    /// Areas with fewer than three or non-finite vertices.
    pub areas_skipped: usize,
    pub labels_drawn: usize,
    /// Labels dropped because they could not fit even after truncation.
    pub labels_omitted: usize,
}

/// Paints venue templates onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    options: RenderOptions,
}

impl MapRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Clear and repaint `surface` with the template.
    ///
    /// The surface is resized to the scaled template first. On an invalid
    /// template nothing at all is done to the surface.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        template: &VenueTemplate,
        selection: &SelectionSet,
    ) -> RenderResult<RenderStats> {
        let options = &self.options;
        let layout = MapLayout::fit(template, options.max_render_size)?;

        surface.resize(layout.size);
        surface.clear();
        surface.stroke(&layout.frame().to_path(0.1), options.frame_color.into(), options.frame_width);

        let mut stats = RenderStats::default();
        let ordered = template.draw_order(&options.boundary_names);

        for area in &ordered {
            if !fits_surface(area, &layout) {
                log::debug!("Skipping malformed area {} ({} vertices)", area.id, area.vertices.len());
                stats.areas_skipped += 1;
                continue;
            }
            self.paint_area(surface, area, &layout, selection.contains(&area.id));
            stats.areas_drawn += 1;
        }

        // Labels go on top of every fill so later areas never cover them.
        if options.show_labels {
            for area in ordered.iter().filter(|a| fits_surface(a, &layout)) {
                match self.paint_label(surface, area, &layout) {
                    LabelOutcome::Drawn => stats.labels_drawn += 1,
                    LabelOutcome::Omitted => stats.labels_omitted += 1,
                    LabelOutcome::NotEligible => {}
                }
            }
        }

        log::debug!(
            "Rendered template {} at scale {:.4}: {:?}",
            template.id,
            layout.scale,
            stats
        );
        Ok(stats)
    }

    fn paint_area<S: Surface + ?Sized>(&self, surface: &mut S, area: &Area, layout: &MapLayout, selected: bool) {
        let options = &self.options;
        let path = polygon_path(&area.vertices, layout.transform());

        if selected {
            surface.fill(&path, options.highlight_color.into());
            surface.stroke(&path, options.stroke_color.into(), options.highlight_stroke_width);
        } else {
            surface.fill(&path, area.fill_or(options.default_fill).into());
            surface.stroke(&path, options.stroke_color.into(), options.stroke_width);
        }
    }

    /// Label anchor in surface units.
    fn label_anchor(&self, area: &Area, display_name: &str, layout: &MapLayout) -> Option<Point> {
        let anchor = if self.options.is_stage(display_name) {
            widest_chord_midpoint(&area.vertices)
        } else {
            area.centroid()
        };
        anchor.map(|p| layout.to_surface(p)).filter(|p| p.is_finite())
    }

    fn paint_label<S: Surface + ?Sized>(&self, surface: &mut S, area: &Area, layout: &MapLayout) -> LabelOutcome {
        let options = &self.options;
        let display_name = options.display_name(&area.name);
        if display_name.trim().is_empty() {
            return LabelOutcome::NotEligible;
        }

        let scaled: Vec<Point> = area.vertices.iter().map(|&p| layout.to_surface(p)).collect();
        let Some(bounds) = polygon_bounds(&scaled) else {
            return LabelOutcome::NotEligible;
        };
        if bounds.width() <= options.min_label_box.width || bounds.height() <= options.min_label_box.height {
            return LabelOutcome::NotEligible;
        }
        let Some(anchor) = self.label_anchor(area, display_name, layout) else {
            return LabelOutcome::NotEligible;
        };

        let label = match fit_label(surface, display_name, bounds, options) {
            Ok(label) => label,
            Err(e) => {
                log::debug!("Omitting label for area {}: {}", area.id, e);
                return LabelOutcome::Omitted;
            }
        };

        surface.set_font_size(label.font_size);
        let shadow: Color = options.label_shadow_color.into();
        let foreground: Color = options.label_color.into();
        for (line, center) in label.positioned_lines(anchor) {
            surface.fill_text(line, center + SHADOW_OFFSET, shadow, TextAlign::Center, TextBaseline::Middle);
        }
        for (line, center) in label.positioned_lines(anchor) {
            surface.fill_text(line, center, foreground, TextAlign::Center, TextBaseline::Middle);
        }
        LabelOutcome::Drawn
    }
}

/// Well-formed, and still finite once scaled to the surface.
fn fits_surface(area: &Area, layout: &MapLayout) -> bool {
    area.is_renderable() && area.vertices.iter().all(|&p| layout.to_surface(p).is_finite())
}

enum LabelOutcome {
    Drawn,
    Omitted,
    NotEligible,
}

/// Render with explicit options.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    template: &VenueTemplate,
    selection: &SelectionSet,
    options: &RenderOptions,
) -> RenderResult<RenderStats> {
    MapRenderer::new(options.clone()).render(surface, template, selection)
}
