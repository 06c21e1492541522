//! Template sources.
//!
//! Hosts fetch templates from somewhere (a REST backend, a directory of JSON
//! exports, fixtures in memory); the renderer only ever sees the loaded
//! [`VenueTemplate`].

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryTemplateStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileTemplateStore;

use crate::template::VenueTemplate;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Template id conflict: {0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for template storage backends.
///
/// Templates are keyed by their `id`.
pub trait TemplateStore: Send + Sync {
    /// Save a template under its own id.
    fn save(&self, template: &VenueTemplate) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a template.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<VenueTemplate>>;

    /// Delete a template. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all template ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a template exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

fn require_id(template: &VenueTemplate) -> StorageResult<String> {
    if template.id.trim().is_empty() {
        Err(StorageError::Other("template has no id".to_string()))
    } else {
        Ok(template.id.clone())
    }
}
