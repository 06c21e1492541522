//! Render options.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use venuemap_core::SerializableColor;
use venuemap_core::layout::DEFAULT_MAX_RENDER_SIZE;

/// Tunable rendering parameters.
///
/// Deserializable from JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Longest side of the rendered map, in surface units.
    pub max_render_size: f64,
    /// Draw area labels.
    pub show_labels: bool,

    /// Fill for selected areas.
    #[serde(with = "css_color")]
    pub highlight_color: SerializableColor,
    pub highlight_stroke_width: f64,
    /// Outline for unselected areas.
    #[serde(with = "css_color")]
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    /// Fill for areas with no usable color.
    #[serde(with = "css_color")]
    pub default_fill: SerializableColor,
    /// Rectangle stroked around the whole map.
    #[serde(with = "css_color")]
    pub frame_color: SerializableColor,
    pub frame_width: f64,

    #[serde(with = "css_color")]
    pub label_color: SerializableColor,
    #[serde(with = "css_color")]
    pub label_shadow_color: SerializableColor,
    pub max_font_size: f64,
    pub min_font_size: f64,
    /// Last-resort size when truncation at `min_font_size` leaves too few characters.
    pub fallback_font_size: f64,
    /// Line advance as a multiple of the font size.
    pub line_height: f64,
    /// Share of the area's box width the widest word may take.
    pub label_width_ratio: f64,
    /// Share of the area's box height the whole label block may take.
    pub label_height_ratio: f64,
    /// Words wider than this share of the box width get truncated.
    pub truncate_width_ratio: f64,
    pub min_truncated_chars: usize,
    /// Areas whose scaled box is not larger than this get no label.
    pub min_label_box: Size,

    /// Display name anchored on the widest horizontal chord.
    pub stage_keyword: String,
    /// Names marking the outer boundary area.
    pub boundary_names: Vec<String>,
    /// Display-name substitutions, keys matched case-insensitively.
    pub label_aliases: BTreeMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_render_size: DEFAULT_MAX_RENDER_SIZE,
            show_labels: true,
            highlight_color: SerializableColor::rgb(0xFF, 0xC1, 0x07), // Amber
            highlight_stroke_width: 3.0,
            stroke_color: SerializableColor::rgb(0x33, 0x33, 0x33),
            stroke_width: 1.0,
            default_fill: SerializableColor::neutral_gray(),
            frame_color: SerializableColor::rgb(0x66, 0x66, 0x66),
            frame_width: 1.0,
            label_color: SerializableColor::rgb(0x1F, 0x29, 0x37),
            label_shadow_color: SerializableColor::white(),
            max_font_size: 20.0,
            min_font_size: 10.0,
            fallback_font_size: 6.0,
            line_height: 1.2,
            label_width_ratio: 0.7,
            label_height_ratio: 0.3,
            truncate_width_ratio: 0.9,
            min_truncated_chars: 4,
            min_label_box: Size::new(30.0, 20.0),
            stage_keyword: "stage".to_string(),
            boundary_names: vec!["outer boundary".to_string(), "boundary".to_string()],
            label_aliases: BTreeMap::new(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_render_size(mut self, size: f64) -> Self {
        self.max_render_size = size;
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn with_alias(mut self, name: impl Into<String>, display: impl Into<String>) -> Self {
        self.label_aliases.insert(name.into(), display.into());
        self
    }

    /// Name shown for an area after alias substitution.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        let key = name.trim().to_lowercase();
        self.label_aliases
            .iter()
            .find(|(k, _)| k.trim().to_lowercase() == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or(name)
    }

    /// Whether a display name selects the widest-chord anchor.
    pub fn is_stage(&self, display_name: &str) -> bool {
        display_name.trim().to_lowercase() == self.stage_keyword.trim().to_lowercase()
    }
}

/// Colors as CSS strings in config files.
mod css_color {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use venuemap_core::SerializableColor;

    pub fn serialize<S: Serializer>(color: &SerializableColor, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SerializableColor, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SerializableColor::parse_css(&raw).ok_or_else(|| D::Error::custom(format!("invalid color: {raw}")))
    }
}
