use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::store::kv::KeyValue;
use crate::store::session::write_json_atomic;

pub const SHOW_DISCUSSION_SIDEBAR_KEY: &str = "showDiscussionSidebar";

/// Durable key-value store, not keyed by course and not tied to a login
/// session. Holds cross-session preferences like the discussion sidebar
/// default. Same degrade-to-absent policy as the session store.
pub struct DurableStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl DurableStore {
    pub fn open() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("courser");
        Self::open_at(base.join("preferences.json"))
    }

    pub fn open_at(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self { path, values }
    }
}

impl KeyValue for DurableStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        let _ = write_json_atomic(&self.path, &self.values);
    }
}

/// Default is visible; only a literal `"false"` hides the sidebar. Absent or
/// malformed values fall back to the default, never error.
pub fn show_discussion_sidebar(store: &dyn KeyValue) -> bool {
    !matches!(
        store.get(SHOW_DISCUSSION_SIDEBAR_KEY).as_deref(),
        Some("false")
    )
}

pub fn set_show_discussion_sidebar(store: &mut dyn KeyValue, visible: bool) {
    let value = if visible { "true" } else { "false" };
    store.set(SHOW_DISCUSSION_SIDEBAR_KEY, value);
}
