use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scroll::SnapSettings;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "scrolldeck";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<SnapConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Snap tuning overrides. These are UX constants carried over from the
/// original deck; unset fields fall back to `SnapSettings::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inertia: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f32>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `scrolldeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Scrolldeck configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Snap settings with config overrides applied over the defaults.
    pub fn snap_settings(&self) -> SnapSettings {
        let mut settings = SnapSettings::default();
        if let Some(snap) = &self.snap {
            if let Some(threshold) = snap.threshold {
                settings.threshold = threshold;
            }
            if let Some(inertia) = snap.inertia {
                settings.inertia = inertia;
            }
            if let Some(delay) = snap.delay {
                settings.delay = delay;
            }
        }
        settings
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "snap.threshold" => {
                let threshold: f32 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid snap.threshold: {value}"))?;
                // At threshold 0 every fraction rounds up, so quantizing an
                // already snapped value would step it forward again; the
                // lower bound is exclusive to keep the snap a fixed point
                // on its own output.
                if !(threshold > 0.0 && threshold <= 1.0) {
                    anyhow::bail!(
                        "Invalid snap.threshold: {value}. Must be greater than 0 and at most 1."
                    );
                }
                self.snap.get_or_insert_with(SnapConfig::default).threshold = Some(threshold);
            }
            "snap.inertia" => {
                let inertia: bool = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid snap.inertia: {value}. Must be 'true' or 'false'."))?;
                self.snap.get_or_insert_with(SnapConfig::default).inertia = Some(inertia);
            }
            "snap.delay" => {
                let delay: f32 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid snap.delay: {value}"))?;
                if delay < 0.0 {
                    anyhow::bail!("Invalid snap.delay: {value}. Must be non-negative.");
                }
                self.snap.get_or_insert_with(SnapConfig::default).delay = Some(delay);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, snap.threshold, snap.inertia, snap.delay"
            ),
        }
        Ok(())
    }
}
