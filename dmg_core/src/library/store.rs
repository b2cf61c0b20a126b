//! File-backed library with the three save policies

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{display_name, normalize_name, version_name, LibraryEntry, LibraryError, LIBRARY_VERSION};

/// One library file and its decoded entries
///
/// Every mutation rewrites the whole file; when the write fails the
/// in-memory entries are left as they were.
#[derive(Debug, Clone)]
pub struct Library<T> {
    path: PathBuf,
    entries: Vec<T>,
}

impl<T: LibraryEntry> Library<T> {
    /// Open `<dir>/<kind>_library.json`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, LibraryError> {
        Self::load(dir.as_ref().join(T::FILE_NAME))
    }

    /// Read a library file; a missing file is an empty library
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Library {
                path,
                entries: Vec::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let payload: Value = serde_json::from_str(&content)?;
        let entries = decode_entries::<T>(&payload)?;

        tracing::info!(
            path = %path.display(),
            count = entries.len(),
            kind = T::KIND,
            "loaded library"
        );
        Ok(Library { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| display_name(e, i))
            .collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        let wanted = normalize_name(name);
        self.names()
            .iter()
            .position(|n| normalize_name(n) == wanted)
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        self.position(name).map(|i| &self.entries[i])
    }

    /// Add `entry` under its own name; the name must be free
    pub fn save_new(&mut self, entry: &T) -> Result<(), LibraryError> {
        let name = checked_name(entry)?;
        if self.position(&name).is_some() {
            return Err(LibraryError::DuplicateName {
                kind: T::KIND,
                name,
            });
        }

        let mut entries = self.entries.clone();
        entries.push(entry.clone());
        self.commit(entries)?;
        tracing::info!(kind = T::KIND, name = %name, "saved new library entry");
        Ok(())
    }

    /// Overwrite the entry named `selected` with `entry`
    ///
    /// Fails when `selected` is not in the library or when a different
    /// entry already uses `entry`'s name.
    pub fn update_existing(&mut self, selected: &str, entry: &T) -> Result<(), LibraryError> {
        let name = checked_name(entry)?;
        let index = self
            .position(selected)
            .ok_or_else(|| LibraryError::NotFound {
                kind: T::KIND,
                name: selected.to_string(),
            })?;

        let target = normalize_name(&name);
        let clash = self
            .names()
            .iter()
            .enumerate()
            .any(|(i, n)| i != index && normalize_name(n) == target);
        if clash {
            return Err(LibraryError::DuplicateName {
                kind: T::KIND,
                name,
            });
        }

        let mut entries = self.entries.clone();
        entries[index] = entry.clone();
        self.commit(entries)?;
        tracing::info!(kind = T::KIND, selected, "updated library entry");
        Ok(())
    }

    /// Save a copy renamed `"<name> vN"`; returns the name used
    pub fn save_new_version(&mut self, entry: &T) -> Result<String, LibraryError> {
        let root = match entry.name().trim() {
            "" => T::DEFAULT_NAME,
            trimmed => trimmed,
        };
        let name = version_name(root, &self.names());

        let mut copy = entry.clone();
        copy.set_name(name.clone());
        let mut entries = self.entries.clone();
        entries.push(copy);
        self.commit(entries)?;
        tracing::info!(kind = T::KIND, name = %name, "saved library version");
        Ok(name)
    }

    pub fn delete(&mut self, name: &str) -> Result<T, LibraryError> {
        let index = self.position(name).ok_or_else(|| LibraryError::NotFound {
            kind: T::KIND,
            name: name.to_string(),
        })?;

        let mut entries = self.entries.clone();
        let removed = entries.remove(index);
        self.commit(entries)?;
        tracing::info!(kind = T::KIND, name, "deleted library entry");
        Ok(removed)
    }

    /// Write `entries` to disk, then adopt them
    fn commit(&mut self, entries: Vec<T>) -> Result<(), LibraryError> {
        let mut payload = Map::new();
        payload.insert("version".to_string(), Value::from(LIBRARY_VERSION));
        payload.insert(T::KEY.to_string(), serde_json::to_value(&entries)?);
        let text = serde_json::to_string_pretty(&payload)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, text)?;
        fs::rename(&temp, &self.path)?;

        self.entries = entries;
        Ok(())
    }
}

fn checked_name<T: LibraryEntry>(entry: &T) -> Result<String, LibraryError> {
    let name = entry.name().trim();
    if name.is_empty() {
        return Err(LibraryError::EmptyName(T::KIND));
    }
    Ok(name.to_string())
}

fn decode_entries<T: LibraryEntry>(payload: &Value) -> Result<Vec<T>, LibraryError> {
    let object = payload
        .as_object()
        .ok_or(LibraryError::Malformed(T::KIND))?;
    let list = match object.get(T::KEY) {
        None => return Ok(Vec::new()),
        Some(Value::Array(list)) => list,
        Some(_) => return Err(LibraryError::Malformed(T::KIND)),
    };

    let entries = list
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_object())
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(kind = T::KIND, index, error = %e, "skipping undecodable library entry");
                None
            }
        })
        .collect();
    Ok(entries)
}
