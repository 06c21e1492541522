//! Venue templates and their polygonal areas.

use crate::color::SerializableColor;
use crate::geometry;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of an area, unique within its template.
pub type AreaId = String;

/// Zone name that marks an area as the outer boundary.
pub const BOUNDARY_ZONE: &str = "boundary";

/// Template errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid template: dimensions must be positive (got {width} x {height})")]
    InvalidTemplate { width: f64, height: f64 },
    #[error("Invalid render size: {0}")]
    InvalidRenderSize(f64),
    #[error("Template JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// One polygonal zone of a template (a seating section, the stage, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(rename = "templateAreaId")]
    pub id: AreaId,
    #[serde(default)]
    pub name: String,
    /// Vertices in template design-space.
    #[serde(default)]
    pub vertices: Vec<Point>,
    /// CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Legend grouping tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Area {
    pub fn new(id: impl Into<AreaId>, name: impl Into<String>, vertices: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vertices,
            fill_color: None,
            zone: None,
        }
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// At least three finite vertices.
    pub fn is_renderable(&self) -> bool {
        geometry::is_valid_polygon(&self.vertices)
    }

    /// Parsed fill color, if present and valid.
    pub fn fill(&self) -> Option<SerializableColor> {
        let raw = self.fill_color.as_deref()?;
        let parsed = SerializableColor::parse_css(raw);
        if parsed.is_none() {
            log::warn!("Area {}: unparsable fill color {:?}", self.id, raw);
        }
        parsed
    }

    /// Fill color, falling back to the given default.
    pub fn fill_or(&self, default: SerializableColor) -> SerializableColor {
        self.fill().unwrap_or(default)
    }

    /// Centroid in design-space.
    pub fn centroid(&self) -> Option<Point> {
        geometry::polygon_centroid(&self.vertices)
    }

    /// Bounding box in design-space.
    pub fn bounds(&self) -> Option<Rect> {
        geometry::polygon_bounds(&self.vertices)
    }

    /// Whether this area is the venue's outer perimeter.
    pub fn is_boundary(&self, boundary_names: &[String]) -> bool {
        let name = self.name.trim();
        boundary_names.iter().any(|b| b.trim().eq_ignore_ascii_case(name))
            || self
                .zone
                .as_deref()
                .is_some_and(|z| z.trim().eq_ignore_ascii_case(BOUNDARY_ZONE))
    }

    /// Hit test in design-space.
    pub fn contains(&self, point: Point) -> bool {
        geometry::contains_point(&self.vertices, point)
    }
}

/// Legend entry for one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneEntry {
    pub zone: String,
    /// Fill color of the first area seen in this zone.
    pub color: Option<SerializableColor>,
    pub area_count: usize,
}

/// A reusable floor-plan definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueTemplate {
    #[serde(rename = "templateId", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_count: Option<usize>,
    #[serde(rename = "mapWidth")]
    pub canvas_width: f64,
    #[serde(rename = "mapHeight")]
    pub canvas_height: f64,
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl VenueTemplate {
    pub fn new(id: impl Into<String>, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            area_count: None,
            canvas_width,
            canvas_height,
            areas: Vec::new(),
        }
    }

    pub fn with_area(mut self, area: Area) -> Self {
        self.areas.push(area);
        self
    }

    pub fn from_json(json: &str) -> TemplateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> TemplateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the design-space dimensions.
    pub fn validate(&self) -> TemplateResult<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.canvas_width) && valid(self.canvas_height) {
            Ok(())
        } else {
            Err(TemplateError::InvalidTemplate {
                width: self.canvas_width,
                height: self.canvas_height,
            })
        }
    }

    pub fn area(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    /// Areas in paint order: boundary areas first, everything else in list order.
    pub fn draw_order(&self, boundary_names: &[String]) -> Vec<&Area> {
        let mut ordered: Vec<&Area> = self.areas.iter().collect();
        // sort_by_key is stable
        ordered.sort_by_key(|a| !a.is_boundary(boundary_names));
        ordered
    }

    /// Top-most renderable area containing a design-space point.
    pub fn area_at(&self, point: Point, boundary_names: &[String]) -> Option<&Area> {
        self.draw_order(boundary_names)
            .into_iter()
            .rev()
            .find(|a| a.is_renderable() && a.contains(point))
    }

    /// Distinct zones in first-seen order.
    pub fn zones(&self) -> Vec<ZoneEntry> {
        let mut entries: Vec<ZoneEntry> = Vec::new();
        for area in &self.areas {
            let Some(zone) = area.zone.as_deref() else {
                continue;
            };
            match entries.iter_mut().find(|e| e.zone == zone) {
                Some(entry) => entry.area_count += 1,
                None => entries.push(ZoneEntry {
                    zone: zone.to_string(),
                    color: area.fill(),
                    area_count: 1,
                }),
            }
        }
        entries
    }
}
