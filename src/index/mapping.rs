//! Mapping store using RocksDB
//!
//! The single source of truth for "does this key exist and where". Values are
//! bincode-serialized [`VolumeTarget`]s. RocksDB provides durability and
//! concurrent access; it offers no compare-and-swap, so check-then-act
//! sequences at the call site are not atomic as a pair.

use crate::common::Result;
use crate::index::placement::VolumeTarget;
use rocksdb::{Options, DB};
use std::path::Path;

pub struct MappingStore {
    db: DB,
}

impl MappingStore {
    /// Open or create the mapping store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }

    /// Look up the stored target for a key
    pub fn get(&self, key: &[u8]) -> Result<Option<VolumeTarget>> {
        match self.db.get(key)? {
            Some(bytes) => {
                let target: VolumeTarget = bincode::deserialize(&bytes)
                    .map_err(|e| crate::Error::MappingCorrupted(e.to_string()))?;
                Ok(Some(target))
            }
            None => Ok(None),
        }
    }

    /// Does a mapping exist for this key?
    pub fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.db.get(key)?.is_some())
    }

    /// Store the target chosen for a key (overwrites)
    pub fn put(&self, key: &[u8], target: &VolumeTarget) -> Result<()> {
        let value = bincode::serialize(target)
            .map_err(|e| crate::Error::Internal(format!("serialize error: {}", e)))?;
        self.db.put(key, value)?;
        Ok(())
    }

    /// Drop the mapping for a key
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        self.db.delete(key)?;
        Ok(())
    }

    /// List all mapped keys
    pub fn keys(&self) -> Result<Vec<Vec<u8>>> {
        let mut keys = Vec::new();
        for item in self.db.iterator(rocksdb::IteratorMode::Start) {
            let (key, _) = item?;
            keys.push(key.to_vec());
        }
        Ok(keys)
    }

    /// Flush to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
