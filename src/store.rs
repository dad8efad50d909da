use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Key-value persistence port. One serialized document per collection key.
///
/// The contract mirrors browser local storage: `load` returns the stored
/// document or falls back when the key was never written or no longer
/// decodes; `save` is fire-and-forget and swallows write errors. Nothing
/// here ever surfaces a failure to the caller.
pub trait StorePort {
    fn load_raw(&self, key: &str) -> Option<String>;
    fn save_raw(&self, key: &str, value: &str);

    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.load_raw(key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or(default),
            None => default,
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(raw) = serde_json::to_string_pretty(value) {
            self.save_raw(key, &raw);
        }
    }
}

/// File-backed store: `<data dir>/<key>.json` per collection.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open() -> Result<Self> {
        let dir = Self::default_dir();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn at(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn default_dir() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "skillhire") {
            proj_dirs.data_dir().to_path_buf()
        } else {
            // Fallback to current directory
            PathBuf::from(".skillhire")
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorePort for JsonFileStore {
    fn load_raw(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn save_raw(&self, key: &str, value: &str) {
        let _ = std::fs::write(self.key_path(key), value);
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorePort for MemoryStore {
    fn load_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save_raw(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}
