use crate::domain::pet::{Fid, PetState, Versioned};
use crate::domain::ports::PetStore;
use crate::error::{PetError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Column Family for storing pet snapshots.
pub const CF_PETS: &str = "pets";

/// On-disk record: the snapshot plus its version token.
#[derive(Serialize, Deserialize)]
struct StoredPet {
    version: u64,
    pet: PetState,
}

/// A persistent pet store backed by RocksDB.
///
/// Snapshots live in the `pets` column family keyed by fid, JSON encoded.
/// Writers serialise on an async mutex so the version check and the put in
/// `upsert` cannot interleave with another writer in this process.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBPetStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBPetStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `pets` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_pets = ColumnFamilyDescriptor::new(CF_PETS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_pets])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn read(&self, fid: &Fid) -> Result<Option<StoredPet>> {
        let cf = self.pets_cf()?;
        match self.db.get_pinned_cf(cf, fid.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).map_err(PetError::store)?,
            )),
            None => Ok(None),
        }
    }

    fn pets_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PETS).ok_or_else(|| {
            PetError::store(std::io::Error::other("Pets column family not found"))
        })
    }
}

#[async_trait]
impl PetStore for RocksDBPetStore {
    async fn load(&self, fid: &Fid) -> Result<Option<Versioned<PetState>>> {
        Ok(self
            .read(fid)?
            .map(|stored| Versioned::new(stored.version, stored.pet)))
    }

    async fn upsert(&self, pet: PetState, expected: Option<u64>) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let current = self.read(&pet.fid)?.map(|stored| stored.version);
        if current != expected {
            return Err(PetError::Conflict {
                fid: pet.fid.to_string(),
            });
        }

        let version = expected.map_or(1, |v| v + 1);
        let key = pet.fid.as_str().as_bytes().to_vec();
        let value = serde_json::to_vec(&StoredPet { version, pet }).map_err(PetError::store)?;

        let cf = self.pets_cf()?;
        self.db.put_cf(cf, key, value)?;
        Ok(version)
    }

    async fn all_pets(&self) -> Result<Vec<PetState>> {
        let cf = self.pets_cf()?;
        let mut pets = Vec::new();

        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let stored: StoredPet = serde_json::from_slice(&value).map_err(PetError::store)?;
            pets.push(stored.pet);
        }

        Ok(pets)
    }

    async fn close(&self) -> Result<()> {
        debug!("flushing pet store");
        self.db.flush_cf(self.pets_cf()?)?;
        Ok(())
    }
}
