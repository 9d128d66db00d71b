//! Runtime configuration, loadable from a TOML file.
//!
//! Every section is optional; a missing section falls back to the stock
//! economy (toy and treat in the shop, one hour notification cooldown).

use crate::domain::rules::EconomyRules;
use crate::domain::shop::ShopCatalog;
use crate::error::{PetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PetframeConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: Option<String>,
    pub economy: EconomyRules,
    pub shop: ShopCatalog,
    pub frame: FrameSettings,
    pub service: ServiceSettings,
}

impl PetframeConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| PetError::ConfigError(e.to_string()))?;
        config.economy.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}

/// How the frame response is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Endpoint every button posts back to.
    pub base_url: String,
    pub image_url: String,
    pub title: String,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            base_url: "https://your-vercel-url.vercel.app/api/frame".to_string(),
            image_url: "https://example.com/pet.png".to_string(),
            title: "Your Virtual Pet".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// How many times a request is recomputed after losing a write race.
    pub max_conflict_retries: u32,
    pub notification_message: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            max_conflict_retries: 3,
            notification_message:
                "Your pet needs attention! Come back to feed and play with it.".to_string(),
        }
    }
}
