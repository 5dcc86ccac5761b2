// Library target exists solely for the integration tests in tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// tests can import types via `courser::nav::*` / `courser::focus::*`.
#![allow(dead_code)]

pub mod app;
pub mod config;
pub mod event;
pub mod focus;
pub mod model;
pub mod nav;
pub mod store;
pub mod ui;
