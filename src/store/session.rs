use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::store::kv::KeyValue;

/// Stored state from a previous run of the same login session is kept; a
/// different session id or a stamp past this horizon reads as empty.
const SESSION_EXPIRY_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
struct SessionEnvelope {
    session_id: String,
    started_at: DateTime<Utc>,
    values: HashMap<String, String>,
}

/// Session-scoped key-value store. Backed by a JSON file in the runtime dir
/// so state survives a restart within the same login session but not across
/// sessions. Read/write failures degrade to "key absent"; they never
/// propagate.
pub struct SessionStore {
    path: PathBuf,
    session_id: String,
    values: HashMap<String, String>,
    started_at: DateTime<Utc>,
}

impl SessionStore {
    pub fn open() -> Self {
        let base = dirs::runtime_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("courser");
        Self::open_at(base.join("session.json"), current_session_id())
    }

    pub fn open_at(path: PathBuf, session_id: String) -> Self {
        let now = Utc::now();
        let (values, started_at) = match read_envelope(&path) {
            Some(env)
                if env.session_id == session_id
                    && now - env.started_at < Duration::hours(SESSION_EXPIRY_HOURS) =>
            {
                (env.values, env.started_at)
            }
            _ => (HashMap::new(), now),
        };
        Self {
            path,
            session_id,
            values,
            started_at,
        }
    }

    fn persist(&self) {
        let envelope = SessionEnvelope {
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            values: self.values.clone(),
        };
        let _ = write_atomic(&self.path, &envelope);
    }
}

impl KeyValue for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

fn current_session_id() -> String {
    env::var("XDG_SESSION_ID").unwrap_or_else(|_| "local".to_string())
}

fn read_envelope(path: &PathBuf) -> Option<SessionEnvelope> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub(crate) fn write_atomic<T: Serialize>(path: &PathBuf, data: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)?;
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub(crate) use write_atomic as write_json_atomic;
