use super::pet::{Fid, PetState, Versioned};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence port for pet snapshots.
///
/// Every stored snapshot carries a version token. `upsert` is a
/// compare-and-swap on that token so concurrent requests for the same pet
/// cannot silently overwrite each other.
#[async_trait]
pub trait PetStore: Send + Sync {
    async fn load(&self, fid: &Fid) -> Result<Option<Versioned<PetState>>>;

    /// Writes `pet` if the stored version still equals `expected`
    /// (`None` meaning "no row yet") and returns the new version.
    /// Fails with `PetError::Conflict` otherwise.
    async fn upsert(&self, pet: PetState, expected: Option<u64>) -> Result<u64>;

    async fn all_pets(&self) -> Result<Vec<PetState>>;

    /// Releases the backend. Stores without resources to release keep the default.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Delivery port for attention notifications. Fire-and-forget: failures are
/// the implementation's concern and never reach the pet state.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, fid: &Fid, message: &str);
}

pub type PetStoreBox = Box<dyn PetStore>;
pub type NotifierBox = Box<dyn Notifier>;
pub type PetStoreFactory = Box<dyn Fn() -> PetStoreBox + Send + Sync>;
