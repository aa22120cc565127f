//! Persistence port: key-value storage for session history and streak
//!
//! Two logical records live in the store:
//! - `progress`: append-only JSON array of session records
//! - `streakData`: the current streak state
//!
//! Keys can be namespaced per user (`alice:progress`).

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::types::{SessionRecord, StreakState};
use crate::{Error, Result};

/// Key holding the session history
pub const PROGRESS_KEY: &str = "progress";

/// Key holding the streak state
pub const STREAK_KEY: &str = "streakData";

/// Storage backend with get/set/remove over named string values
pub trait KeyValueStore: Send {
    /// Read a key; absent keys are `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key. Characters outside [A-Za-z0-9_-] become '_'.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::storage(key, e))?;

        // Write then rename so a crash never leaves a half-written file
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| Error::storage(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| Error::storage(key, e))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::storage(key, e)),
        }
    }
}

/// Typed access to session history and streak over any backend
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
    namespace: Option<String>,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl ProgressStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            namespace: None,
        }
    }

    /// Scope all keys to one user/device
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    fn key(&self, base: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, base),
            None => base.to_string(),
        }
    }

    /// Full session history, oldest first
    pub fn sessions(&self) -> Result<Vec<SessionRecord>> {
        let key = self.key(PROGRESS_KEY);
        match self.backend.get(&key)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| Error::serialization(key, e)),
            None => Ok(Vec::new()),
        }
    }

    /// Append one record to the history
    pub fn append_session(&mut self, record: &SessionRecord) -> Result<()> {
        let mut sessions = self.sessions()?;
        sessions.push(record.clone());

        let key = self.key(PROGRESS_KEY);
        let json = serde_json::to_string(&sessions).map_err(|e| Error::serialization(&key, e))?;
        self.backend.set(&key, &json)?;
        debug!(id = %record.id, total = sessions.len(), "session appended");
        Ok(())
    }

    /// Current streak; absent means no sessions yet
    pub fn streak(&self) -> Result<StreakState> {
        let key = self.key(STREAK_KEY);
        match self.backend.get(&key)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| Error::serialization(key, e)),
            None => Ok(StreakState::default()),
        }
    }

    pub fn save_streak(&mut self, streak: &StreakState) -> Result<()> {
        let key = self.key(STREAK_KEY);
        let json = serde_json::to_string(streak).map_err(|e| Error::serialization(&key, e))?;
        self.backend.set(&key, &json)
    }

    /// Delete history and streak
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(&self.key(PROGRESS_KEY))?;
        self.backend.remove(&self.key(STREAK_KEY))?;
        debug!(namespace = ?self.namespace, "progress cleared");
        Ok(())
    }
}
