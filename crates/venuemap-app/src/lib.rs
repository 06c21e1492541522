//! VenueMap command-line shell.
//!
//! Loads templates from JSON files or a template store, renders them through
//! the recording surface and reports the result as JSON.

mod cli;
mod commands;

pub use cli::{Cli, Command, SourceArgs};
pub use commands::{AppError, AppResult, AreaSummary, InspectReport, RenderReport, run};
