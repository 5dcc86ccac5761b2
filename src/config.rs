use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ui::layout::DEFAULT_BREAKPOINT;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_course")]
    pub course: String,
    #[serde(default = "default_width_breakpoint")]
    pub width_breakpoint: u16,
    #[serde(default = "default_rtl")]
    pub rtl: bool,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_course() -> String {
    "demo".to_string()
}
fn default_width_breakpoint() -> u16 {
    DEFAULT_BREAKPOINT
}
fn default_rtl() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            course: default_course(),
            width_breakpoint: default_width_breakpoint(),
            rtl: default_rtl(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("courser")
            .join("config.toml")
    }

    /// Clamp values that would make the layout degenerate. Called after
    /// deserialization so a hand-edited config cannot wedge the UI.
    pub fn normalize(&mut self) {
        self.width_breakpoint = self.width_breakpoint.clamp(20, 300);
    }
}
