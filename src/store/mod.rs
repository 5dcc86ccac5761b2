pub mod kv;
pub mod prefs;
pub mod session;
