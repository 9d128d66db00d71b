use super::pet::StatBounds;
use crate::error::{PetError, Result};
use serde::{Deserialize, Serialize};

/// What happens to an action the economy does not recognise, or a purchase
/// of an item the shop does not sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// Pass the state through untouched and report a no-op.
    #[default]
    Ignore,
    /// Fail the request with `UnknownAction` / `UnknownItem`.
    Reject,
}

/// Tunable numbers of the pet economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyRules {
    pub bounds: StatBounds,
    pub initial_hunger: u8,
    pub initial_happiness: u8,
    pub initial_coins: u64,
    pub feed_reward: u64,
    pub play_reward: u64,
    /// Hunger or happiness at or below this value needs attention.
    pub attention_threshold: u8,
    /// Milliseconds that must pass (strictly) between two notifications.
    pub notify_cooldown_ms: i64,
    pub unknown_policy: UnknownPolicy,
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self {
            bounds: StatBounds::default(),
            initial_hunger: 5,
            initial_happiness: 5,
            initial_coins: 0,
            feed_reward: 1,
            play_reward: 2,
            attention_threshold: 2,
            notify_cooldown_ms: 3_600_000,
            unknown_policy: UnknownPolicy::Ignore,
        }
    }
}

impl EconomyRules {
    pub fn validate(&self) -> Result<()> {
        if self.bounds.min > self.bounds.max {
            return Err(PetError::ConfigError(format!(
                "stat bounds are inverted: {} > {}",
                self.bounds.min, self.bounds.max
            )));
        }
        if !self.bounds.contains(self.initial_hunger) || !self.bounds.contains(self.initial_happiness) {
            return Err(PetError::ConfigError(
                "initial hunger/happiness must lie within the stat bounds".to_string(),
            ));
        }
        if self.notify_cooldown_ms < 0 {
            return Err(PetError::ConfigError(
                "notify_cooldown_ms must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
