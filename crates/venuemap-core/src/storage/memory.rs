//! In-memory template store.

use super::{BoxFuture, StorageError, StorageResult, TemplateStore, require_id};
use crate::template::VenueTemplate;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for tests and fixtures.
#[derive(Default)]
pub struct MemoryTemplateStore {
    templates: RwLock<HashMap<String, VenueTemplate>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn save(&self, template: &VenueTemplate) -> BoxFuture<'_, StorageResult<()>> {
        let template = template.clone();
        Box::pin(async move {
            let id = require_id(&template)?;
            let mut templates = self
                .templates
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            templates.insert(id, template);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<VenueTemplate>> {
        let id = id.to_string();
        Box::pin(async move {
            let templates = self
                .templates
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            templates.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut templates = self
                .templates
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            templates.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let templates = self
                .templates
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            let mut ids: Vec<String> = templates.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let templates = self
                .templates
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(templates.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_save_and_load() {
        let store = MemoryTemplateStore::new();
        let template = VenueTemplate::new("hall", 100.0, 50.0);

        block_on(store.save(&template)).unwrap();
        let loaded = block_on(store.load("hall")).unwrap();

        assert_eq!(loaded, template);
    }

    #[test]
    fn test_not_found() {
        let store = MemoryTemplateStore::new();
        let result = block_on(store.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_rejects_empty_id() {
        let store = MemoryTemplateStore::new();
        let result = block_on(store.save(&VenueTemplate::new("  ", 1.0, 1.0)));

        assert!(matches!(result, Err(StorageError::Other(_))));
    }

    #[test]
    fn test_delete_and_list() {
        let store = MemoryTemplateStore::new();
        block_on(store.save(&VenueTemplate::new("b", 1.0, 1.0))).unwrap();
        block_on(store.save(&VenueTemplate::new("a", 1.0, 1.0))).unwrap();

        assert_eq!(block_on(store.list()).unwrap(), vec!["a".to_string(), "b".to_string()]);

        block_on(store.delete("a")).unwrap();
        assert!(!block_on(store.exists("a")).unwrap());
        assert!(block_on(store.exists("b")).unwrap());
    }
}
