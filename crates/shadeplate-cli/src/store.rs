//! Template store backed by a directory of JSON files
//!
//! Each template lives in `<dir>/<id>.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use shadeplate_rules::{Template, TemplateStore};
use thiserror::Error;

/// Errors from the directory store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid template file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid template id '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },
}

/// Check an id before it becomes part of a file path
pub fn validate_template_id(id: &str) -> Result<(), StoreError> {
    let reject = |reason: &'static str| -> Result<(), StoreError> {
        Err(StoreError::InvalidId {
            id: id.to_string(),
            reason,
        })
    };

    if id.is_empty() {
        return reject("id cannot be empty");
    }
    if id.contains('/') || id.contains('\\') {
        return reject("id cannot contain path separators");
    }
    if id.contains("..") {
        return reject("id cannot contain '..'");
    }
    if id.starts_with('.') {
        return reject("id cannot start with '.'");
    }
    if id.contains('\0') {
        return reject("id cannot contain null bytes");
    }
    Ok(())
}

/// Turn a display name into a file-safe id
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("template");
    }
    slug
}

/// Directory of `<id>.json` template files
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open a store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        if !dir.exists() {
            log::info!("creating template store at {}", dir.display());
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(JsonDirStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_template_id(id)?;
        Ok(self.dir.join(format!("{}.json", id)))
    }
}

impl TemplateStore for JsonDirStore {
    type Error = StoreError;

    fn save(&mut self, template: &Template) -> Result<(), StoreError> {
        let path = self.path_for(template.id())?;
        let json = serde_json::to_string_pretty(template).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("saved template '{}' to {}", template.id(), path.display());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let path = self.path_for(id)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn ids(&self) -> Result<Vec<String>, StoreError> {
        let io_err = |source: io::Error| StoreError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_template_id(stem).is_ok() {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadeplate_color::HexColor;
    use shadeplate_rules::Palette;

    fn template(id: &str) -> Template {
        let palette: Palette = [
            ("Base", HexColor::new(0x33, 0x66, 0xCC)),
            ("Shadow", HexColor::new(0x1A, 0x33, 0x66)),
        ]
        .into_iter()
        .collect();
        Template::from_palette(id, "Card", &palette).unwrap()
    }

    #[test]
    fn test_validate_template_id() {
        assert!(validate_template_id("card-1").is_ok());
        for bad in ["", "a/b", "a\\b", "..", "x..y", ".hidden", "nul\0"] {
            assert!(validate_template_id(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Blue Card"), "blue-card");
        assert_eq!(slugify("  Hero / Banner!! "), "hero-banner");
        assert_eq!(slugify("???"), "template");
    }

    #[test]
    fn test_save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::open(dir.path().join("templates")).unwrap();

        store.save(&template("b")).unwrap();
        store.save(&template("a")).unwrap();
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();
        assert_eq!(store.ids().unwrap(), ["a", "b"]);

        let loaded = store.load("a").unwrap().unwrap();
        assert_eq!(loaded, template("a"));
        assert!(store.load("missing").unwrap().is_none());

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.ids().unwrap(), ["b"]);
    }

    #[test]
    fn test_rejects_traversal_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.load("../etc/passwd"),
            Err(StoreError::InvalidId { .. })
        ));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("bad.json"), "{\"id\":\"bad\"").unwrap();
        assert!(matches!(store.load("bad"), Err(StoreError::Json { .. })));
    }
}
