use super::engine::{EconomyEngine, Outcome, Snapshot};
use crate::config::ServiceSettings;
use crate::domain::action::Action;
use crate::domain::pet::{Fid, PetState, Versioned};
use crate::domain::ports::{NotifierBox, PetStoreBox};
use crate::error::{PetError, Result};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

/// Raw request parameters as they arrive at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PetRequest {
    #[serde(default)]
    pub fid: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    /// Request time in epoch milliseconds; the wall clock when absent.
    #[serde(default)]
    pub now: Option<i64>,
}

impl PetRequest {
    pub fn new(fid: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            fid: Some(fid.into()),
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn at(mut self, now: i64) -> Self {
        self.now = Some(now);
        self
    }
}

/// A request that went through: the persisted pet and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub pet: PetState,
    pub version: u64,
    pub created: bool,
    pub outcome: Outcome,
    pub notified: bool,
}

/// Drives one request end to end: load the snapshot, run the economy engine,
/// persist the result with a compare-and-swap, then notify.
///
/// The store and notifier are injected at construction and released by
/// [`PetService::shutdown`].
pub struct PetService {
    engine: EconomyEngine,
    store: PetStoreBox,
    notifier: NotifierBox,
    settings: ServiceSettings,
    rng: Mutex<StdRng>,
}

impl PetService {
    pub fn new(
        engine: EconomyEngine,
        store: PetStoreBox,
        notifier: NotifierBox,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            engine,
            store,
            notifier,
            settings,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the variant RNG with a seeded one for reproducible runs.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn engine(&self) -> &EconomyEngine {
        &self.engine
    }

    /// Processes one request.
    ///
    /// Rejected actions return the engine's error and nothing is written, not
    /// even a freshly initialised pet. A lost write race reloads the snapshot
    /// and recomputes, up to `max_conflict_retries` times.
    pub async fn handle(&self, request: PetRequest) -> Result<Handled> {
        let fid = Fid::from_param(request.fid.as_deref())?;
        let action = Action::parse(request.action.as_deref(), request.item.as_deref());
        let now = request
            .now
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        let mut attempt = 0;
        loop {
            let loaded = self.store.load(&fid).await?;
            let snapshot = self.resolve(fid.clone(), loaded);
            let transition = self.engine.step(&snapshot, &action, now).inspect_err(|e| {
                if e.is_user_facing() {
                    warn!(%fid, %action, error = %e, "action rejected");
                }
            })?;

            if let Snapshot::Existing(current) = &snapshot
                && current.value == transition.state
            {
                return Ok(Handled {
                    pet: transition.state,
                    version: current.version,
                    created: false,
                    outcome: transition.outcome,
                    notified: false,
                });
            }

            match self
                .store
                .upsert(transition.state.clone(), snapshot.expected_version())
                .await
            {
                Ok(version) => {
                    if transition.notify {
                        info!(%fid, "pet needs attention, notifying owner");
                        self.notifier
                            .notify(&fid, &self.settings.notification_message)
                            .await;
                    }
                    return Ok(Handled {
                        pet: transition.state,
                        version,
                        created: transition.is_new,
                        outcome: transition.outcome,
                        notified: transition.notify,
                    });
                }
                Err(PetError::Conflict { .. }) if attempt < self.settings.max_conflict_retries => {
                    attempt += 1;
                    warn!(%fid, attempt, "write conflict, recomputing");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn resolve(&self, fid: Fid, loaded: Option<Versioned<PetState>>) -> Snapshot {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.engine.resolve(fid, loaded, &mut *rng)
    }

    /// Current snapshot of a pet without touching it.
    pub async fn get(&self, fid: &Fid) -> Result<Option<PetState>> {
        Ok(self.store.load(fid).await?.map(|versioned| versioned.value))
    }

    /// Consumes the service, returns every persisted pet and closes the store.
    pub async fn shutdown(self) -> Result<Vec<PetState>> {
        let mut pets = self.store.all_pets().await?;
        pets.sort_by(|a, b| a.fid.cmp(&b.fid));
        self.store.close().await?;
        Ok(pets)
    }
}
