use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetError {
    #[error("Missing user ID")]
    MissingIdentifier,
    #[error("Invalid user ID: {0:?}")]
    InvalidIdentifier(String),
    #[error("Not enough coins: {item} costs {cost}, pet has {coins}")]
    InsufficientFunds { item: String, cost: u64, coins: u64 },
    #[error("Unknown shop item: {0}")]
    UnknownItem(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Concurrent update conflict for pet {fid}")]
    Conflict { fid: String },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Store error: {0}")]
    StoreError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl PetError {
    /// Wraps a failure of the backing pet store.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PetError::StoreError(Box::new(err))
    }

    /// Whether the failure is caused by the request itself rather than by a
    /// collaborator. User-facing failures map to 400-class responses.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PetError::MissingIdentifier
                | PetError::InvalidIdentifier(_)
                | PetError::InsufficientFunds { .. }
                | PetError::UnknownItem(_)
                | PetError::UnknownAction(_)
        )
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PetError {
    fn from(err: rocksdb::Error) -> Self {
        PetError::store(err)
    }
}

impl From<serde_json::Error> for PetError {
    fn from(err: serde_json::Error) -> Self {
        PetError::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PetError>;
