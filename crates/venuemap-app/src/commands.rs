//! Command implementations.

use crate::cli::{Cli, Command, SourceArgs};
use kurbo::{Point, Rect, Size};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use venuemap_core::storage::{FileTemplateStore, StorageError, TemplateStore};
use venuemap_core::{SelectionSet, TemplateError, VenueTemplate, ZoneEntry};
use venuemap_render::{DrawCommand, MapRenderer, RecordingSurface, RenderOptions, RenderStats, RendererError, Surface};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid render options: {0}")]
    Options(#[source] serde_json::Error),
    #[error("Failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;

/// Output of `render`.
#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub template_id: String,
    pub size: Size,
    pub stats: RenderStats,
    pub commands: Vec<DrawCommand>,
}

/// One area in the `inspect` output.
#[derive(Debug, Serialize)]
pub struct AreaSummary {
    pub id: String,
    pub name: String,
    pub vertices: usize,
    pub renderable: bool,
    pub boundary: bool,
    pub centroid: Option<Point>,
    pub bounds: Option<Rect>,
}

/// Output of `inspect`.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub areas: Vec<AreaSummary>,
    pub zones: Vec<ZoneEntry>,
}

/// Run a parsed command line; returns the text to print.
pub fn run(cli: Cli) -> AppResult<String> {
    match cli.command {
        Command::Render {
            source,
            select,
            options,
            max_size,
            no_labels,
        } => {
            let template = load_template(&source)?;
            let mut options = match options {
                Some(path) => load_options(&path)?,
                None => RenderOptions::default(),
            };
            if let Some(size) = max_size {
                options.max_render_size = size;
            }
            if no_labels {
                options.show_labels = false;
            }
            let selection = SelectionSet::from_ids(select.into_iter().filter(|s| !s.trim().is_empty()));
            to_json(&render_report(&template, &selection, options)?)
        }
        Command::Inspect { source } => {
            let template = load_template(&source)?;
            to_json(&inspect_report(&template, &RenderOptions::default().boundary_names))
        }
        Command::Import { file, store } => {
            let template = read_template_file(&file)?;
            template.validate()?;
            let store = FileTemplateStore::new(store)?;
            pollster::block_on(store.save(&template))?;
            log::info!("Imported template {} into {}", template.id, store.base_path().display());
            Ok(template.id)
        }
        Command::List { store } => {
            let store = FileTemplateStore::new(store)?;
            let ids = pollster::block_on(store.list())?;
            Ok(ids.join("\n"))
        }
    }
}

/// Render into a recording surface.
pub fn render_report(
    template: &VenueTemplate,
    selection: &SelectionSet,
    options: RenderOptions,
) -> AppResult<RenderReport> {
    let renderer = MapRenderer::new(options);
    let mut surface = RecordingSurface::new();
    let stats = renderer.render(&mut surface, template, selection)?;
    log::info!(
        "Rendered {}: {} areas, {} skipped, {} labels",
        template.id,
        stats.areas_drawn,
        stats.areas_skipped,
        stats.labels_drawn
    );
    Ok(RenderReport {
        template_id: template.id.clone(),
        size: surface.size(),
        stats,
        commands: surface.take_commands(),
    })
}

pub fn inspect_report(template: &VenueTemplate, boundary_names: &[String]) -> InspectReport {
    let areas = template
        .areas
        .iter()
        .map(|area| AreaSummary {
            id: area.id.clone(),
            name: area.name.clone(),
            vertices: area.vertices.len(),
            renderable: area.is_renderable(),
            boundary: area.is_boundary(boundary_names),
            centroid: area.centroid(),
            bounds: area.is_renderable().then(|| area.bounds()).flatten(),
        })
        .collect();

    InspectReport {
        id: template.id.clone(),
        name: template.name.clone(),
        description: template.description.clone(),
        width: template.canvas_width,
        height: template.canvas_height,
        areas,
        zones: template.zones(),
    }
}

fn load_template(source: &SourceArgs) -> AppResult<VenueTemplate> {
    match &source.store {
        Some(dir) => {
            let store = FileTemplateStore::new(dir)?;
            Ok(pollster::block_on(store.load(&source.template))?)
        }
        None => read_template_file(Path::new(&source.template)),
    }
}

fn read_template_file(path: &Path) -> AppResult<VenueTemplate> {
    let json = read_file(path)?;
    Ok(VenueTemplate::from_json(&json)?)
}

fn load_options(path: &Path) -> AppResult<RenderOptions> {
    let json = read_file(path)?;
    RenderOptions::from_json(&json).map_err(AppError::Options)
}

fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(AppError::Output)
}
