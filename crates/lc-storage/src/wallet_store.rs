use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use crate::KeyValueStore;
use crate::entry::{RawWalletEntry, WalletEntry, normalize, normalize_address};

pub const WALLETS_KEY: &str = "wallets";

/// Normalize and collapse entries by address. An address keeps the position
/// of its first occurrence and the contents of its last one.
pub fn dedupe(entries: impl IntoIterator<Item = RawWalletEntry>) -> Vec<WalletEntry> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<WalletEntry> = Vec::new();

    for entry in entries.into_iter().filter_map(|raw| normalize(&raw)) {
        match positions.get(&entry.address) {
            Some(&index) => unique[index] = entry,
            None => {
                positions.insert(entry.address.clone(), unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}

fn with_alias_hint(mut raw: RawWalletEntry, alias_hint: Option<&str>) -> Option<WalletEntry> {
    if let Some(hint) = alias_hint.filter(|hint| !hint.is_empty()) {
        raw.alias = Some(hint.to_owned());
    }
    normalize(&raw)
}

/// The persisted wallet collection. Sole owner of the `wallets` key.
pub struct WalletStore {
    kv: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl WalletStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    fn read_raw(&self) -> Vec<RawWalletEntry> {
        let stored = match self.kv.get(WALLETS_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("failed to read stored wallets, treating as empty: {err:#}");
                return Vec::new();
            }
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&stored) {
            Ok(values) => values,
            Err(err) => {
                warn!("stored wallet collection is corrupt, treating as empty: {err}");
                return Vec::new();
            }
        };

        // Individual malformed records are dropped, the rest survive.
        values
            .into_iter()
            .filter_map(|value| serde_json::from_value::<RawWalletEntry>(value).ok())
            .collect()
    }

    fn write(&self, entries: &[WalletEntry]) -> Result<()> {
        let encoded = serde_json::to_string(entries).context("failed to encode wallet collection")?;
        self.kv
            .set(WALLETS_KEY, &encoded)
            .context("failed to persist wallet collection")
    }

    pub fn list_all(&self) -> Vec<WalletEntry> {
        dedupe(self.read_raw())
    }

    pub fn get(&self, address: &str) -> Option<WalletEntry> {
        let address = normalize_address(address);
        self.list_all().into_iter().find(|entry| entry.address == address)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.get(address).is_some()
    }

    /// Insert or overwrite by address. The alias comes from `alias_hint`,
    /// then from the record itself. Returns `None` when the record was
    /// invalid and nothing was stored.
    pub fn upsert(&self, raw: RawWalletEntry, alias_hint: Option<&str>) -> Result<Option<WalletEntry>> {
        let Some(entry) = with_alias_hint(raw, alias_hint) else {
            debug!("ignoring wallet upsert without a usable address");
            return Ok(None);
        };

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut wallets = self.list_all();
        match wallets.iter_mut().find(|existing| existing.address == entry.address) {
            Some(existing) => *existing = entry.clone(),
            None => wallets.push(entry.clone()),
        }
        self.write(&wallets)?;
        debug!(address = %entry.address, alias = %entry.alias, "wallet upserted");

        Ok(Some(entry))
    }

    /// Store the record only when its address is not stored yet. The check
    /// and the write happen under one lock, so a concurrent upsert of the
    /// same address is never overwritten. Returns the entry held for the
    /// address afterwards, or `None` when the record was invalid.
    pub fn insert_if_absent(&self, raw: RawWalletEntry, alias_hint: Option<&str>) -> Result<Option<WalletEntry>> {
        let Some(entry) = with_alias_hint(raw, alias_hint) else {
            debug!("ignoring wallet insert without a usable address");
            return Ok(None);
        };

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut wallets = self.list_all();
        if let Some(existing) = wallets.iter().find(|existing| existing.address == entry.address) {
            return Ok(Some(existing.clone()));
        }
        wallets.push(entry.clone());
        self.write(&wallets)?;
        debug!(address = %entry.address, alias = %entry.alias, "wallet inserted");

        Ok(Some(entry))
    }

    /// Returns whether an entry was removed.
    pub fn remove(&self, address: &str) -> Result<bool> {
        let address = normalize_address(address);
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut wallets = self.list_all();
        let before = wallets.len();
        wallets.retain(|entry| entry.address != address);
        if wallets.len() == before {
            return Ok(false);
        }
        self.write(&wallets)?;
        debug!(address = %address, "wallet removed");
        Ok(true)
    }

    /// Returns whether an entry was renamed. Unknown addresses and blank
    /// aliases leave the store untouched.
    pub fn rename(&self, address: &str, new_alias: &str) -> Result<bool> {
        let address = normalize_address(address);
        let new_alias = new_alias.trim();
        if new_alias.is_empty() {
            return Ok(false);
        }

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut wallets = self.list_all();
        let Some(entry) = wallets.iter_mut().find(|entry| entry.address == address) else {
            return Ok(false);
        };
        entry.alias = new_alias.to_owned();
        self.write(&wallets)?;
        debug!(address = %address, alias = %new_alias, "wallet renamed");
        Ok(true)
    }

    /// Rewrite the persisted collection in canonical form and return it.
    pub fn compact(&self) -> Result<Vec<WalletEntry>> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let raw = self.read_raw();
        let raw_count = raw.len();
        let wallets = dedupe(raw);
        self.write(&wallets)?;
        debug!(raw_count, cleaned_count = wallets.len(), "wallet collection compacted");
        Ok(wallets)
    }
}
