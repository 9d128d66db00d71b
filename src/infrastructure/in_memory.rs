use crate::domain::pet::{Fid, PetState, Versioned};
use crate::domain::ports::PetStore;
use crate::error::{PetError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for pet snapshots.
///
/// Uses `Arc<RwLock<HashMap<Fid, Versioned<PetState>>>>`; the version check
/// and the write happen under one write lock, which makes `upsert` atomic.
/// Clones share the same map.
#[derive(Default, Clone)]
pub struct InMemoryPetStore {
    pets: Arc<RwLock<HashMap<Fid, Versioned<PetState>>>>,
}

impl InMemoryPetStore {
    /// Creates a new, empty in-memory pet store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetStore for InMemoryPetStore {
    async fn load(&self, fid: &Fid) -> Result<Option<Versioned<PetState>>> {
        let pets = self.pets.read().await;
        Ok(pets.get(fid).cloned())
    }

    async fn upsert(&self, pet: PetState, expected: Option<u64>) -> Result<u64> {
        let mut pets = self.pets.write().await;
        match (pets.entry(pet.fid.clone()), expected) {
            (Entry::Vacant(slot), None) => {
                slot.insert(Versioned::new(1, pet));
                Ok(1)
            }
            (Entry::Occupied(mut slot), Some(version)) if slot.get().version == version => {
                let next = version + 1;
                slot.insert(Versioned::new(next, pet));
                Ok(next)
            }
            _ => Err(PetError::Conflict {
                fid: pet.fid.to_string(),
            }),
        }
    }

    async fn all_pets(&self) -> Result<Vec<PetState>> {
        let pets = self.pets.read().await;
        Ok(pets.values().map(|versioned| versioned.value.clone()).collect())
    }
}
