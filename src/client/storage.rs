use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::ClientError;

/// String key/value store persisted as one JSON object on disk.
///
/// Plays the part of browser local storage for the client: best effort,
/// not authoritative. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, items: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.load()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.store(&items)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.store(&items)?;
        }
        Ok(())
    }
}
