//! File-based template store for native platforms.
//!
//! Each template lives in `<encoded id>.json`. Ids are percent-encoded so
//! that distinct ids never share a file and `list` can recover them exactly.

use super::{BoxFuture, StorageError, StorageResult, TemplateStore, require_id};
use crate::template::VenueTemplate;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fs;
use std::path::{Path, PathBuf};

/// Bytes escaped in file names: everything except ASCII alphanumerics, `-` and `_`.
const FILE_NAME: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

fn encode_id(id: &str) -> String {
    utf8_percent_encode(id, FILE_NAME).to_string()
}

/// Template id for a file stem, if the stem is one this store would write.
fn decode_stem(stem: &str) -> Option<String> {
    let id = percent_decode_str(stem).decode_utf8().ok()?.into_owned();
    (encode_id(&id) == stem).then_some(id)
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
}

fn read_template(path: &Path) -> StorageResult<VenueTemplate> {
    let json = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;
    VenueTemplate::from_json(&json).map_err(|e| {
        StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Stores each template as a JSON file in a directory.
pub struct FileTemplateStore {
    base_path: PathBuf,
}

impl FileTemplateStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| io_error("create", &base_path, e))?;
        Ok(Self { base_path })
    }

    fn template_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", encode_id(id)))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl TemplateStore for FileTemplateStore {
    fn save(&self, template: &VenueTemplate) -> BoxFuture<'_, StorageResult<()>> {
        let prepared = require_id(template).and_then(|id| {
            template
                .to_json()
                .map(|json| (id, json))
                .map_err(|e| StorageError::Serialization(e.to_string()))
        });

        Box::pin(async move {
            let (id, json) = prepared?;
            let path = self.template_path(&id);
            // Case-insensitive filesystems can still fold two encodings together.
            if path.exists() {
                if let Ok(existing) = read_template(&path) {
                    if existing.id != id {
                        return Err(StorageError::Conflict(format!(
                            "{} already holds template {:?}, refusing to store {:?}",
                            path.display(),
                            existing.id,
                            id
                        )));
                    }
                }
            }
            log::debug!("Saving template {:?} to {}", id, path.display());
            fs::write(&path, json).map_err(|e| io_error("write", &path, e))
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<VenueTemplate>> {
        let path = self.template_path(id);
        let id = id.to_string();

        Box::pin(async move {
            if !path.is_file() {
                return Err(StorageError::NotFound(id));
            }
            let template = read_template(&path)?;
            if template.id != id {
                return Err(StorageError::Conflict(format!(
                    "{} holds template {:?}, expected {:?}",
                    path.display(),
                    template.id,
                    id
                )));
            }
            Ok(template)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.template_path(id);

        Box::pin(async move {
            match fs::remove_file(&path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(io_error("delete", &path, e)),
                _ => Ok(()),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.base_path).map_err(|e| io_error("list", &self.base_path, e))?;

            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|e| e == "json"))
                .filter_map(|path| {
                    let stem = path.file_stem()?.to_str()?;
                    let id = decode_stem(stem);
                    if id.is_none() {
                        log::debug!("Ignoring foreign file {}", path.display());
                    }
                    id
                })
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.template_path(id);
        Box::pin(async move { Ok(path.is_file()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use crate::template::Area;
    use pollster::block_on;
    use tempfile::tempdir;

    fn sample(id: &str) -> VenueTemplate {
        VenueTemplate::new(id, 400.0, 300.0).with_area(
            Area::new(
                "a1",
                "Section A",
                vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 80.0)],
            )
            .with_fill("#3b82f6"),
        )
    }

    #[test]
    fn test_file_store_save_load() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();

        block_on(store.save(&sample("hall"))).unwrap();
        let loaded = block_on(store.load("hall")).unwrap();

        assert_eq!(loaded, sample("hall"));
    }

    #[test]
    fn test_file_store_not_found() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();

        let result = block_on(store.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let result = block_on(store.load("broken"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_store_list_ignores_other_files() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        block_on(store.save(&sample("t2"))).unwrap();
        block_on(store.save(&sample("t1"))).unwrap();

        let list = block_on(store.list()).unwrap();
        assert_eq!(list, vec!["t1".to_string(), "t2".to_string()]);
    }

    #[test]
    fn test_file_store_delete() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();

        block_on(store.save(&sample("gone"))).unwrap();
        assert!(block_on(store.exists("gone")).unwrap());

        block_on(store.delete("gone")).unwrap();
        assert!(!block_on(store.exists("gone")).unwrap());
    }

    #[test]
    fn test_file_store_encodes_id() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();

        let template = sample("venue/main:hall*1");
        block_on(store.save(&template)).unwrap();

        assert!(dir.path().join("venue%2Fmain%3Ahall%2A1.json").exists());
        let loaded = block_on(store.load("venue/main:hall*1")).unwrap();
        assert_eq!(loaded.id, template.id);
        assert_eq!(block_on(store.list()).unwrap(), vec!["venue/main:hall*1".to_string()]);
    }

    #[test]
    fn test_file_store_similar_ids_kept_apart() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();

        block_on(store.save(&VenueTemplate::new("venue/main", 10.0, 10.0))).unwrap();
        block_on(store.save(&VenueTemplate::new("venue_main", 20.0, 10.0))).unwrap();
        block_on(store.save(&VenueTemplate::new("venue%2Fmain", 30.0, 10.0))).unwrap();

        let list = block_on(store.list()).unwrap();
        assert_eq!(list, vec!["venue%2Fmain", "venue/main", "venue_main"]);

        let slash = block_on(store.load("venue/main")).unwrap();
        assert_eq!(slash.id, "venue/main");
        assert!((slash.canvas_width - 10.0).abs() < f64::EPSILON);
        let underscore = block_on(store.load("venue_main")).unwrap();
        assert!((underscore.canvas_width - 20.0).abs() < f64::EPSILON);
        let literal = block_on(store.load("venue%2Fmain")).unwrap();
        assert!((literal.canvas_width - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_file_store_refuses_to_overwrite_other_id() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();
        // A file already claimed by another template
        fs::write(dir.path().join("hall.json"), sample("annex").to_json().unwrap()).unwrap();

        let result = block_on(store.save(&sample("hall")));
        assert!(matches!(result, Err(StorageError::Conflict(_))));
        assert!(matches!(block_on(store.load("hall")), Err(StorageError::Conflict(_))));
    }

    #[test]
    fn test_file_store_delete_missing_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path()).unwrap();
        assert!(block_on(store.delete("never-saved")).is_ok());
    }
}
