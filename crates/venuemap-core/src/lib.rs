//! VenueMap Core Library
//!
//! Platform-agnostic data structures and geometry for venue seating maps:
//! templates, areas, selection state, layout and template storage.

pub mod color;
pub mod geometry;
pub mod layout;
pub mod selection;
pub mod storage;
pub mod template;

pub use color::SerializableColor;
pub use layout::MapLayout;
pub use selection::SelectionSet;
pub use template::{Area, AreaId, TemplateError, TemplateResult, VenueTemplate, ZoneEntry};
