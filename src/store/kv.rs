use std::collections::HashMap;

/// Key-value port behind the persisted UI state. Implementations differ in
/// lifetime (session-scoped vs durable); the engine only sees this trait, so
/// tests run against the in-memory fake. Values are literal strings
/// (`"open"`/`"closed"`, `"true"`/`"false"`); anything unparseable reads as
/// absent.
pub trait KeyValue {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
