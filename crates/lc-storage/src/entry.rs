use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WALLET_ALIAS: &str = "Wallet";

/// A canonical wallet record: non-empty lowercase address, keys possibly
/// empty for watch-only entries.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub alias: String,
    pub address: String,
    pub public_key: String,
    pub private_key: String,
}

impl WalletEntry {
    pub fn has_private_key(&self) -> bool {
        !self.private_key.is_empty()
    }
}

// Key material must never reach a log line through `{:?}`.
impl fmt::Debug for WalletEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletEntry")
            .field("alias", &self.alias)
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("private_key", &redacted(&self.private_key))
            .finish()
    }
}

/// A wallet record as it arrives from storage or the node, before
/// normalization.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWalletEntry {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl RawWalletEntry {
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    pub fn keys(mut self, public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self.private_key = Some(private_key.into());
        self
    }
}

impl fmt::Debug for RawWalletEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawWalletEntry")
            .field("alias", &self.alias)
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("private_key", &redacted(self.private_key.as_deref().unwrap_or_default()))
            .finish()
    }
}

impl From<WalletEntry> for RawWalletEntry {
    fn from(entry: WalletEntry) -> Self {
        Self {
            alias: Some(entry.alias),
            address: Some(entry.address),
            public_key: Some(entry.public_key),
            private_key: Some(entry.private_key),
        }
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "<none>" } else { "<redacted>" }
}

pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Canonicalize a raw record. `None` means the record has no usable address
/// and must be dropped.
pub fn normalize(raw: &RawWalletEntry) -> Option<WalletEntry> {
    let address = normalize_address(raw.address.as_deref().unwrap_or_default());
    if address.is_empty() {
        return None;
    }

    let alias = raw
        .alias
        .as_deref()
        .filter(|alias| !alias.is_empty())
        .unwrap_or(DEFAULT_WALLET_ALIAS);

    Some(WalletEntry {
        alias: alias.to_owned(),
        address,
        public_key: raw.public_key.clone().unwrap_or_default(),
        private_key: raw.private_key.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases_address() {
        let entry = normalize(&RawWalletEntry::with_address("  AbC123\t")).unwrap();
        assert_eq!(entry.address, "abc123");
        assert_eq!(entry.alias, DEFAULT_WALLET_ALIAS);
        assert_eq!(entry.public_key, "");
        assert_eq!(entry.private_key, "");
    }

    #[test]
    fn blank_addresses_are_invalid() {
        for address in ["", "   ", "\n\t"] {
            assert!(normalize(&RawWalletEntry::with_address(address)).is_none());
        }
        assert!(normalize(&RawWalletEntry::default()).is_none());
    }

    #[test]
    fn empty_alias_falls_back_to_default() {
        let raw = RawWalletEntry {
            alias: Some(String::new()),
            ..RawWalletEntry::with_address("abc")
        };
        assert_eq!(normalize(&raw).unwrap().alias, DEFAULT_WALLET_ALIAS);
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            RawWalletEntry::with_address(" MiXeD ").keys("pk", "sk"),
            RawWalletEntry {
                alias: Some("Savings".to_owned()),
                ..RawWalletEntry::with_address("ABCDEF")
            },
            RawWalletEntry::with_address("already-clean"),
        ];

        for raw in samples {
            let once = normalize(&raw).unwrap();
            let twice = normalize(&RawWalletEntry::from(once.clone())).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let entry = normalize(&RawWalletEntry::with_address("abc").keys("pk", "super-secret")).unwrap();
        let rendered = format!("{entry:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
