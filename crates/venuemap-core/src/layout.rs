//! Layout module for fitting a template onto a drawing surface.

use crate::template::{TemplateError, TemplateResult, VenueTemplate};
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Default longest-side size of a rendered map, in surface units.
pub const DEFAULT_MAX_RENDER_SIZE: f64 = 800.0;

/// MapLayout holds the uniform scale from template design-space to surface units.
///
/// The longer template dimension maps to exactly `max_render_size`; the
/// shorter one scales proportionally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Uniform design-space to surface scale.
    pub scale: f64,
    /// Surface size after scaling.
    pub size: Size,
}

impl MapLayout {
    /// Fit a template inside a `max_render_size` square.
    pub fn fit(template: &VenueTemplate, max_render_size: f64) -> TemplateResult<Self> {
        template.validate()?;
        if !(max_render_size.is_finite() && max_render_size > 0.0) {
            return Err(TemplateError::InvalidRenderSize(max_render_size));
        }

        let scale_x = max_render_size / template.canvas_width;
        let scale_y = max_render_size / template.canvas_height;
        let scale = scale_x.min(scale_y);
        let size = Size::new(template.canvas_width * scale, template.canvas_height * scale);

        // Tiny but positive dimensions overflow the scale.
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !(usable(scale) && usable(size.width) && usable(size.height)) {
            return Err(TemplateError::InvalidTemplate {
                width: template.canvas_width,
                height: template.canvas_height,
            });
        }

        Ok(Self { scale, size })
    }

    /// Transform from design-space to surface coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    /// Inverse transform for pointer input.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale)
    }

    /// Convert a design-space point to surface coordinates.
    pub fn to_surface(&self, point: Point) -> Point {
        self.transform() * point
    }

    /// Convert a surface point back to design-space.
    pub fn to_template(&self, point: Point) -> Point {
        self.inverse_transform() * point
    }

    /// Full scaled canvas rectangle.
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }
}
