use crate::errors::StorageError;
use crate::models::{HealthState, Preferences, Theme};
use std::{
    collections::HashMap,
    future::Future,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::fs;
use tracing::{error, warn};

pub const HEALTH_DATA_KEY: &str = "healthDashboardData";
pub const THEME_KEY: &str = "theme";
pub const SIDEBAR_KEY: &str = "sidebarCollapsed";

/// String slots keyed by name; the dashboard keeps one record per slot.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// One file per slot inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.slot"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        let tmp = path.with_extension("slot.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

/// Process-local slots, used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.put(key, value);
        store
    }

    pub fn put(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
    }

    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    /// Makes every following `set` fail, as a full or read-only disk would.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded").into());
        }
        self.put(key, value);
        Ok(())
    }
}

/// Reads the persisted record over the defaults. Absent, unreadable, or
/// malformed data yields the defaults.
pub async fn load_state<S: KeyValueStore>(store: &S) -> HealthState {
    let mut state = match store.get(HEALTH_DATA_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<HealthState>(&raw) {
            Ok(state) => state,
            Err(err) => {
                error!("failed to parse health data: {err}");
                HealthState::default()
            }
        },
        Ok(None) => HealthState::default(),
        Err(err) => {
            error!("failed to read health data: {err}");
            HealthState::default()
        }
    };
    state.sanitize();
    state
}

pub async fn persist_state<S: KeyValueStore>(store: &S, state: &HealthState) -> Result<(), StorageError> {
    let payload = serde_json::to_string(state)?;
    store.set(HEALTH_DATA_KEY, &payload).await
}

pub async fn load_preferences<S: KeyValueStore>(store: &S) -> Preferences {
    let theme = match store.get(THEME_KEY).await {
        Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
            warn!(value = %raw.trim(), "ignoring unknown theme");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(err) => {
            error!("failed to read theme: {err}");
            Theme::default()
        }
    };
    let sidebar_collapsed = match store.get(SIDEBAR_KEY).await {
        Ok(Some(raw)) => raw.trim() == "true",
        Ok(None) => false,
        Err(err) => {
            error!("failed to read sidebar preference: {err}");
            false
        }
    };
    Preferences {
        theme,
        sidebar_collapsed,
    }
}

pub async fn persist_preferences<S: KeyValueStore>(
    store: &S,
    prefs: &Preferences,
) -> Result<(), StorageError> {
    store.set(THEME_KEY, prefs.theme.as_str()).await?;
    let collapsed = if prefs.sidebar_collapsed { "true" } else { "false" };
    store.set(SIDEBAR_KEY, collapsed).await
}
