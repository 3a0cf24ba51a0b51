//! Plugin enablement store.
//!
//! Users can switch individual extension plugins off. Those choices live in
//! a local persistent store that is not guaranteed to exist: headless test
//! runs and minimal installs have no storage backend at all.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use pacer_core::{PacerError, PluginId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<StoreError> for PacerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(reason) => PacerError::StoreUnavailable(reason),
            other => PacerError::StorageError(other.to_string()),
        }
    }
}

/// Per-user plugin enablement. Plugins without an override are enabled.
#[async_trait]
pub trait PluginStateStore: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Every explicit enable/disable choice recorded so far.
    async fn enabled_overrides(&self) -> Result<HashMap<PluginId, bool>, StoreError>;

    async fn set_enabled(&self, id: &PluginId, enabled: bool) -> Result<(), StoreError>;

    async fn is_enabled(&self, id: &PluginId) -> Result<bool, StoreError> {
        Ok(self
            .enabled_overrides()
            .await?
            .get(id)
            .copied()
            .unwrap_or(true))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    overrides: RwLock<HashMap<PluginId, bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: impl IntoIterator<Item = (PluginId, bool)>) -> Self {
        Self {
            overrides: RwLock::new(overrides.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PluginStateStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn enabled_overrides(&self) -> Result<HashMap<PluginId, bool>, StoreError> {
        Ok(self.overrides.read().await.clone())
    }

    async fn set_enabled(&self, id: &PluginId, enabled: bool) -> Result<(), StoreError> {
        self.overrides.write().await.insert(id.clone(), enabled);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Overrides persisted as a JSON object `{ "<plugin id>": <bool> }`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<HashMap<PluginId, bool>, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Plugin state file missing; no overrides");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Write through a sibling temp file and rename over `path`.
///
/// The temp file is removed again if either step fails.
async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let written = match fs::write(&tmp_path, bytes).await {
        Ok(()) => fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };
    if written.is_err() {
        if let Err(e) = fs::remove_file(&tmp_path).await {
            debug!(path = %tmp_path.display(), error = %e, "No temp file to clean up");
        }
    }
    written
}

#[async_trait]
impl PluginStateStore for JsonFileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn enabled_overrides(&self) -> Result<HashMap<PluginId, bool>, StoreError> {
        self.read().await
    }

    async fn set_enabled(&self, id: &PluginId, enabled: bool) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut overrides = self.read().await?;
        overrides.insert(id.clone(), enabled);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        // Sorted output keeps the file diffable.
        let sorted: std::collections::BTreeMap<_, _> = overrides.into_iter().collect();
        let json = serde_json::to_string_pretty(&sorted)?;
        write_atomic(&self.path, json.as_bytes()).await?;

        info!(plugin = %id, enabled, path = %self.path.display(), "Saved plugin state");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unavailable
// ---------------------------------------------------------------------------

/// Stand-in for environments without any storage backend.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableStore {
    fn default() -> Self {
        Self::new("no storage backend configured")
    }
}

#[async_trait]
impl PluginStateStore for UnavailableStore {
    fn name(&self) -> &str {
        "none"
    }

    async fn enabled_overrides(&self) -> Result<HashMap<PluginId, bool>, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    async fn set_enabled(&self, _id: &PluginId, _enabled: bool) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}
