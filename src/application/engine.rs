use crate::domain::action::Action;
use crate::domain::pet::{Fid, PetState, Versioned};
use crate::domain::rules::{EconomyRules, UnknownPolicy};
use crate::domain::shop::ShopCatalog;
use crate::error::{PetError, Result};
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

/// The snapshot a request starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Freshly initialised pet; the caller must insert it.
    New(PetState),
    /// Pet loaded from the store; the caller must update it at this version.
    Existing(Versioned<PetState>),
}

impl Snapshot {
    pub fn pet(&self) -> &PetState {
        match self {
            Snapshot::New(pet) => pet,
            Snapshot::Existing(versioned) => &versioned.value,
        }
    }

    /// Version the store must still hold for the write to succeed.
    pub fn expected_version(&self) -> Option<u64> {
        match self {
            Snapshot::New(_) => None,
            Snapshot::Existing(versioned) => Some(versioned.version),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Snapshot::New(_))
    }
}

/// Why an action left the pet untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoopReason {
    UnknownAction(String),
    UnknownItem(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Noop(NoopReason),
}

/// Result of applying one action to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub state: PetState,
    pub outcome: Outcome,
}

/// Everything the caller needs after one engine step: the state to persist,
/// whether it is an insert, and whether to fire an attention notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: PetState,
    pub is_new: bool,
    pub outcome: Outcome,
    pub notify: bool,
}

/// Pure state-transition function of the pet economy.
///
/// The engine performs no I/O. It is cheap to clone and safe to share: the
/// catalog sits behind an `Arc` and is never mutated.
#[derive(Debug, Clone)]
pub struct EconomyEngine {
    rules: EconomyRules,
    catalog: Arc<ShopCatalog>,
}

impl Default for EconomyEngine {
    fn default() -> Self {
        Self::new(EconomyRules::default(), Arc::new(ShopCatalog::default()))
    }
}

impl EconomyEngine {
    pub fn new(rules: EconomyRules, catalog: Arc<ShopCatalog>) -> Self {
        Self { rules, catalog }
    }

    pub fn rules(&self) -> &EconomyRules {
        &self.rules
    }

    pub fn catalog(&self) -> &ShopCatalog {
        &self.catalog
    }

    /// Builds a fresh pet for an unknown `fid`. The variant is drawn here and
    /// nowhere else.
    pub fn initialize<R: Rng + ?Sized>(&self, fid: Fid, rng: &mut R) -> PetState {
        PetState::new(fid, rng.r#gen()).with_stats(
            self.rules.initial_hunger,
            self.rules.initial_happiness,
            self.rules.initial_coins,
        )
    }

    /// Turns a store lookup into the snapshot the request works from.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        fid: Fid,
        loaded: Option<Versioned<PetState>>,
        rng: &mut R,
    ) -> Snapshot {
        match loaded {
            Some(versioned) => Snapshot::Existing(versioned),
            None => Snapshot::New(self.initialize(fid, rng)),
        }
    }

    /// Applies `action` to a copy of `state`.
    ///
    /// A rejected purchase returns `InsufficientFunds` and the input is left
    /// exactly as it was. Unknown actions and items are a `Noop` under
    /// `UnknownPolicy::Ignore` and an error under `UnknownPolicy::Reject`.
    pub fn apply(&self, state: &PetState, action: &Action) -> Result<Applied> {
        let bounds = self.rules.bounds;
        let mut next = state.clone();

        match action {
            Action::Feed => {
                next.hunger = bounds.clamp(i64::from(next.hunger) - 1);
                next.happiness = bounds.clamp(i64::from(next.happiness));
                next.coins = next.coins.saturating_add(self.rules.feed_reward);
            }
            Action::Play => {
                next.happiness = bounds.clamp(i64::from(next.happiness) + 1);
                next.hunger = bounds.clamp(i64::from(next.hunger));
                next.coins = next.coins.saturating_add(self.rules.play_reward);
            }
            Action::Buy(item_id) => {
                let Some(item) = item_id.as_deref().and_then(|id| self.catalog.get(id)) else {
                    return self.unknown(state, NoopReason::UnknownItem(item_id.clone()));
                };
                if next.coins < item.cost {
                    return Err(PetError::InsufficientFunds {
                        item: item_id.clone().unwrap_or_default(),
                        cost: item.cost,
                        coins: next.coins,
                    });
                }
                next.coins -= item.cost;
                next.hunger = bounds.clamp(i64::from(next.hunger) + i64::from(item.effect.hunger));
                next.happiness =
                    bounds.clamp(i64::from(next.happiness) + i64::from(item.effect.happiness));
            }
            Action::Other(name) => {
                return self.unknown(state, NoopReason::UnknownAction(name.clone()));
            }
        }

        Ok(Applied {
            state: next,
            outcome: Outcome::Applied,
        })
    }

    fn unknown(&self, state: &PetState, reason: NoopReason) -> Result<Applied> {
        match (self.rules.unknown_policy, reason) {
            (UnknownPolicy::Reject, NoopReason::UnknownAction(name)) => {
                Err(PetError::UnknownAction(name))
            }
            (UnknownPolicy::Reject, NoopReason::UnknownItem(item)) => {
                Err(PetError::UnknownItem(item.unwrap_or_default()))
            }
            (UnknownPolicy::Ignore, reason) => Ok(Applied {
                state: state.clone(),
                outcome: Outcome::Noop(reason),
            }),
        }
    }

    /// Whether `state` should trigger an attention notification at `now`
    /// (epoch milliseconds). Pets without a cooldown timer never do.
    pub fn should_notify(&self, state: &PetState, now: i64) -> bool {
        let Some(last_notified) = state.last_notified else {
            return false;
        };
        let threshold = self.rules.attention_threshold;
        let needs_attention = state.hunger <= threshold || state.happiness <= threshold;
        needs_attention && now.saturating_sub(last_notified) > self.rules.notify_cooldown_ms
    }

    /// Evaluates the gate and, when it fires, stamps `last_notified = now`
    /// into the returned state so the timer is persisted with the same write.
    pub fn gate_notification(&self, mut state: PetState, now: i64) -> (PetState, bool) {
        let fire = self.should_notify(&state, now);
        if fire {
            state.last_notified = Some(now);
        }
        (state, fire)
    }

    /// One full request: apply the action, then run the attention gate on the
    /// post-action stats.
    pub fn step(&self, snapshot: &Snapshot, action: &Action, now: i64) -> Result<Transition> {
        let applied = self.apply(snapshot.pet(), action)?;
        let (state, notify) = self.gate_notification(applied.state, now);

        debug!(
            fid = %state.fid,
            %action,
            hunger = state.hunger,
            happiness = state.happiness,
            coins = state.coins,
            notify,
            "economy step"
        );

        Ok(Transition {
            state,
            is_new: snapshot.is_new(),
            outcome: applied.outcome,
            notify,
        })
    }
}
