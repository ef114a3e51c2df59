//! Session Store
//!
//! Holds the single current identity and mirrors it into a durable,
//! namespaced slot so a restart (or the next HTTP request) can pick it up.

use crate::{PortalError, PortalResult};
use bliss_core::{BlissError, ErrorContext, Identity, DEFAULT_SESSION_KEY};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Durable key/value slot the session is mirrored into
pub trait SessionSlot {
    /// Raw value stored under `key`, if any
    fn read(&self, key: &str) -> PortalResult<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> PortalResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn clear(&mut self, key: &str) -> PortalResult<()>;
}

/// In-process slot
///
/// Clones share the same entries, so handing a clone to a second store
/// behaves like reopening the slot after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-populated with one raw entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let slot = Self::new();
        if let Ok(mut entries) = slot.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        slot
    }

    fn entries(&self) -> PortalResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| PortalError::session("Memory slot lock poisoned"))
    }
}

impl SessionSlot for MemorySlot {
    fn read(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> PortalResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> PortalResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

fn storage_error(operation: &str, path: &Path, source: std::io::Error) -> PortalError {
    PortalError::Core(BlissError::Storage {
        message: format!("Session slot {} failed for {}: {}", operation, path.display(), source),
        source: Some(Box::new(source)),
        context: ErrorContext::new("file_slot")
            .with_operation(operation)
            .with_metadata("path", &path.display().to_string())
            .with_suggestion("Check that the session directory is writable"),
    })
}

/// One JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    storage_dir: PathBuf,
}

impl FileSlot {
    /// Create the slot, creating `storage_dir` if it doesn't exist
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> PortalResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)
            .map_err(|e| storage_error("create_dir", &storage_dir, e))?;

        debug!("Session slot directory: {}", storage_dir.display());
        Ok(Self { storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", key))
    }
}

impl SessionSlot for FileSlot {
    fn read(&self, key: &str) -> PortalResult<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| storage_error("read", &path, e))?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> PortalResult<()> {
        let path = self.entry_path(key);
        std::fs::write(&path, value).map_err(|e| storage_error("write", &path, e))?;
        debug!("Wrote session slot {}", path.display());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> PortalResult<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| storage_error("clear", &path, e))?;
        }
        Ok(())
    }
}

/// The single source of truth for "who is signed in"
///
/// Built once at the application root (once per request on the web) and
/// passed to whoever needs it; there is no global instance.
#[derive(Debug)]
pub struct SessionStore<S: SessionSlot> {
    slot: S,
    key: String,
    current: Option<Identity>,
}

impl<S: SessionSlot> SessionStore<S> {
    /// Open the store over `slot` using the default namespace key
    pub fn open(slot: S) -> Self {
        Self::open_with_key(slot, DEFAULT_SESSION_KEY)
    }

    /// Open the store and rehydrate the identity stored under `key`
    ///
    /// Absent, unreadable or malformed slot content yields no session.
    pub fn open_with_key(slot: S, key: &str) -> Self {
        let current = Self::rehydrate(&slot, key);
        Self {
            slot,
            key: key.to_string(),
            current,
        }
    }

    fn rehydrate(slot: &S, key: &str) -> Option<Identity> {
        let raw = match slot.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read session slot, starting signed out");
                return None;
            }
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) if identity.is_well_formed() => {
                debug!(user = %identity.display_string(), "Session restored");
                Some(identity)
            }
            Ok(_) => {
                warn!(key, "Stored session has no user id, ignoring it");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Stored session is malformed, ignoring it");
                None
            }
        }
    }

    /// Persist `identity` and make it current
    ///
    /// Replaces any previous identity. If the slot write fails the current
    /// identity is left untouched.
    pub fn login(&mut self, identity: Identity) -> PortalResult<()> {
        if !identity.is_well_formed() {
            return Err(PortalError::validation("Identity must have a non-empty id"));
        }

        let serialized = serde_json::to_string(&identity)?;
        self.slot.write(&self.key, &serialized)?;

        info!(user = %identity.display_string(), "Signed in");
        self.current = Some(identity);
        Ok(())
    }

    /// Forget the current identity and clear the slot
    ///
    /// The in-memory identity is dropped even if clearing the slot fails.
    pub fn logout(&mut self) -> PortalResult<()> {
        if let Some(identity) = self.current.take() {
            info!(user = %identity.display_string(), "Signed out");
        }
        self.slot.clear(&self.key)
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Give the slot back, e.g. to attach a cookie jar to a response
    pub fn into_slot(self) -> S {
        self.slot
    }
}
