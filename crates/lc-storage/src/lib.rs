use anyhow::{Context, Result};
use rocksdb::{DB, Options};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

mod alias;
mod entry;
mod wallet_store;

pub use alias::{DEFAULT_NODE_ALIAS, NODE_ALIAS_KEY, NodeAliasStore};
pub use entry::{DEFAULT_WALLET_ALIAS, RawWalletEntry, WalletEntry, normalize, normalize_address};
pub use wallet_store::{WALLETS_KEY, WalletStore, dedupe};

/// String key-value persistence the console keeps its local state in.
///
/// Implementations must be safe to share across tasks; every call completes
/// synchronously.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any encoding. Useful for simulating
    /// state left behind by older clients.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    pub fn open_default(path: &str) -> Result<Self> {
        let mut options = Options::default();
        options.create_if_missing(true);
        let db = DB::open(&options, path).with_context(|| format!("failed to open console store at {path}"))?;
        Ok(Self { db: Arc::new(db) })
    }

    fn key_for(key: &str) -> String {
        format!("console:{key}")
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(Self::key_for(key).as_bytes())
            .with_context(|| format!("failed to read {key}"))?;
        match value {
            Some(raw) => Ok(Some(String::from_utf8(raw).with_context(|| format!("{key} is not valid UTF-8"))?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .put(Self::key_for(key).as_bytes(), value.as_bytes())
            .with_context(|| format!("failed to write {key}"))?;
        Ok(())
    }
}
