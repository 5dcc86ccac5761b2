pub mod deferred;
pub mod traversal;
pub mod tray;
