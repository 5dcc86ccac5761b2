pub mod content;
pub mod dropdown;
pub mod nav_strip;
pub mod tray;
