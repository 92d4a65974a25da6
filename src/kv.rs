// Flat key-value persistence layer for user preferences

use eyre::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A raw stored preference value: booleans natively, everything else as its
/// raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Text(String),
}

impl RawValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

/// Flat string-keyed storage behind the preferences store.
pub trait KvBackend {
    /// Stored value for a key, if any.
    fn get(&self, key: &str) -> Option<RawValue>;

    /// Store a value for a key, replacing any existing one.
    fn set(&mut self, key: &str, value: RawValue) -> Result<()>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store a default for a key only if nothing is stored yet.
    fn register_default(&mut self, key: &str, value: RawValue) -> Result<()> {
        if self.contains(key) {
            return Ok(());
        }
        self.set(key, value)
    }
}

/// In-memory key-value layer for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryKv {
    values: HashMap<String, RawValue>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Option<RawValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: RawValue) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed key-value layer: one JSON object per file.
///
/// The file is read once at open and written through on every set, under an
/// exclusive lock so that app variants sharing a storage container don't
/// interleave writes. A missing or unreadable file is treated as empty.
pub struct FileKv {
    path: PathBuf,
    values: HashMap<String, RawValue>,
}

impl FileKv {
    /// Open the key-value file at the given path, creating parent directories
    /// as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create preferences directory")?;
        }

        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!(file = ?path, error = ?e, "Unreadable preferences file, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        debug!(file = ?path, count = values.len(), "Opened preferences file");
        Ok(Self { path, values })
    }

    /// Preferences file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)
            .context("Failed to open preferences file for writing")?;

        // Exclusive lock before truncating, so a concurrent writer holding
        // the lock isn't cut off mid-write; released when the file drops
        file.lock_exclusive().context("Failed to acquire file lock")?;
        file.set_len(0)?;

        let json = serde_json::to_string(&self.values)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }
}

impl KvBackend for FileKv {
    fn get(&self, key: &str) -> Option<RawValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: RawValue) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.persist()
    }
}
