//! Concurrency-safe habit store persisted to a single JSON file.
//!
//! Every operation takes one lock over the whole mapping, so operations are
//! fully serialized with respect to each other. Nothing is written to disk
//! until [`HabitStore::save`] is called.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{HabitError, PersistenceError};
use crate::habit::Habit;

type HabitMap = HashMap<String, Habit>;

/// Key-value store of habits keyed by name.
#[derive(Debug)]
pub struct HabitStore {
    /// `None` for a transient store that is never persisted.
    path: Option<PathBuf>,
    data: Mutex<HabitMap>,
}

impl HabitStore {
    /// Open the store file at `path`.
    ///
    /// A missing file yields an empty store bound to `path`. An empty path
    /// yields a transient store that never touches the filesystem.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or does not
    /// decode into a habit mapping.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(Self::in_memory());
        }

        let data = match fs::File::open(path) {
            Ok(file) => {
                let data: HabitMap = serde_json::from_reader(std::io::BufReader::new(file))
                    .map_err(|source| {
                        if source.is_io() {
                            PersistenceError::Read {
                                path: path.to_path_buf(),
                                source: source.into(),
                            }
                        } else {
                            PersistenceError::Decode {
                                path: path.to_path_buf(),
                                source,
                            }
                        }
                    })?;
                debug!(path = %path.display(), habits = data.len(), "opened habit store");
                data
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no habit store yet, starting empty");
                HabitMap::new()
            }
            Err(source) => {
                return Err(PersistenceError::Open {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            data: Mutex::new(data),
        })
    }

    /// Create a transient store that is never persisted.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Mutex::new(HabitMap::new()),
        }
    }

    /// Path the store saves to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get a copy of the habit stored under `name`.
    pub fn get(&self, name: &str) -> Option<Habit> {
        self.lock().get(name).cloned()
    }

    /// Insert or fully replace the habit stored under `name`.
    pub fn set(&self, name: impl Into<String>, habit: Habit) {
        self.lock().insert(name.into(), habit);
    }

    /// Insert or replace a habit under its own name.
    pub fn add(&self, habit: Habit) {
        let mut data = self.lock();
        data.insert(habit.name.clone(), habit);
    }

    /// Remove the habit stored under `name`; absent names are ignored.
    pub fn delete(&self, name: &str) {
        self.lock().remove(name);
    }

    /// Snapshot of every stored habit, keyed by name.
    pub fn all(&self) -> HashMap<String, Habit> {
        self.lock().clone()
    }

    /// Snapshot of every stored habit, sorted by name.
    pub fn habits(&self) -> Vec<Habit> {
        let mut habits: Vec<Habit> = self.lock().values().cloned().collect();
        habits.sort_by(|a, b| a.name.cmp(&b.name));
        habits
    }

    /// Number of stored habits.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no habits are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Write the full mapping to the store path, replacing any existing file.
    ///
    /// # Errors
    /// Returns an error if the mapping cannot be encoded or the file cannot
    /// be written.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let data = self.lock();
        self.persist(&data)
    }

    /// Apply a transition to the habit stored under `name` and persist it,
    /// holding the lock for the whole read-modify-write.
    ///
    /// `transition` receives the current record (if any) and returns the new
    /// record plus a value handed back to the caller. If it fails nothing is
    /// changed. If persisting fails the previous record is restored.
    ///
    /// # Errors
    /// Returns the transition's error, or a persistence error.
    pub fn update<T, F>(&self, name: &str, transition: F) -> Result<T, HabitError>
    where
        F: FnOnce(Option<&Habit>) -> Result<(Habit, T), HabitError>,
    {
        let mut data = self.lock();
        let (habit, out) = transition(data.get(name))?;
        let previous = data.insert(name.to_string(), habit);

        if let Err(e) = self.persist(&data) {
            warn!(habit = name, error = %e, "failed to persist habit, rolling back");
            match previous {
                Some(previous) => data.insert(name.to_string(), previous),
                None => data.remove(name),
            };
            return Err(e.into());
        }
        Ok(out)
    }

    fn lock(&self) -> MutexGuard<'_, HabitMap> {
        // Every mutation is a single map insert/remove, so a poisoned map is
        // still consistent.
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write `data` to a uniquely named temp file next to the store file and
    /// rename it over the store file.
    fn persist(&self, data: &HabitMap) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let contents = serde_json::to_vec_pretty(data).map_err(|source| {
            PersistenceError::Encode {
                path: path.clone(),
                source,
            }
        })?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|source| PersistenceError::Create {
            path: path.clone(),
            source,
        })?;
        let write_error = |source: std::io::Error| PersistenceError::Write {
            path: path.clone(),
            source,
        };
        temp.write_all(&contents).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;
        temp.persist(path).map_err(|e| write_error(e.error))?;

        debug!(path = %path.display(), habits = data.len(), "saved habit store");
        Ok(())
    }
}
