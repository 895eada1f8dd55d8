use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input address the node stamps on block-reward transactions.
pub const MINING_REWARD_ADDRESS: &str = "+--official-mining-reward--+";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletInfoResponse {
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "units::deserialize")]
    pub balance: u64,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletCreateResponse {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletImportRequest {
    pub private_key: String,
    pub set_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletImportResponse {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub set_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletBalanceResponse {
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "units::deserialize")]
    pub balance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactRequest {
    pub recipient: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionInput {
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "units::deserialize")]
    pub fee: u64,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A transaction as the node serializes it, both in blocks and as the
/// pending record returned by `wallet/transact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub input: TransactionInput,
    #[serde(default, deserialize_with = "units::map")]
    pub output: BTreeMap<String, u64>,
}

impl TransactionRecord {
    pub fn is_mining_reward(&self) -> bool {
        self.input.address == MINING_REWARD_ADDRESS
    }

    pub fn total_output(&self) -> u64 {
        self.output.values().fold(0, |acc, v| acc.saturating_add(*v))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeEstimateResponse {
    #[serde(default, deserialize_with = "units::deserialize")]
    pub fee: u64,
    #[serde(default, deserialize_with = "units::optional")]
    pub total_required: Option<u64>,
    #[serde(default, deserialize_with = "units::deserialize")]
    pub balance: u64,
    #[serde(default)]
    pub insufficient: Option<bool>,
}

/// Node configuration as served by `GET /config`. Missing and null fields
/// fall back to the console defaults one by one, as do an empty coin or unit
/// name and a zero rate, so a fetch always yields a complete value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawNodeConfig")]
pub struct NodeConfig {
    pub auto_mine: bool,
    pub miner_name: String,
    pub miner_address: String,
    pub default_wallet_address: String,
    pub refresh_interval_seconds: u64,
    pub coin_name: String,
    pub unit_name: String,
    pub units_per_coin: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            auto_mine: false,
            miner_name: String::new(),
            miner_address: String::new(),
            default_wallet_address: String::new(),
            refresh_interval_seconds: 0,
            coin_name: "COIN".to_owned(),
            unit_name: "unit".to_owned(),
            units_per_coin: 1,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawNodeConfig {
    auto_mine: Option<bool>,
    miner_name: Option<String>,
    miner_address: Option<String>,
    default_wallet_address: Option<String>,
    #[serde(deserialize_with = "units::optional")]
    refresh_interval_seconds: Option<u64>,
    coin_name: Option<String>,
    unit_name: Option<String>,
    #[serde(deserialize_with = "units::optional")]
    units_per_coin: Option<u64>,
}

impl From<RawNodeConfig> for NodeConfig {
    fn from(raw: RawNodeConfig) -> Self {
        let defaults = NodeConfig::default();
        let non_empty = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
        Self {
            auto_mine: raw.auto_mine.unwrap_or(defaults.auto_mine),
            miner_name: raw.miner_name.unwrap_or(defaults.miner_name),
            miner_address: raw.miner_address.unwrap_or(defaults.miner_address),
            default_wallet_address: raw.default_wallet_address.unwrap_or(defaults.default_wallet_address),
            refresh_interval_seconds: raw.refresh_interval_seconds.unwrap_or(defaults.refresh_interval_seconds),
            coin_name: non_empty(raw.coin_name).unwrap_or(defaults.coin_name),
            unit_name: non_empty(raw.unit_name).unwrap_or(defaults.unit_name),
            units_per_coin: raw
                .units_per_coin
                .filter(|rate| *rate > 0)
                .unwrap_or(defaults.units_per_coin),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub last_hash: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub data: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "units::map")]
    pub output: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "units::deserialize")]
    pub fee: u64,
}

impl FeedEntry {
    pub fn is_pending(&self) -> bool {
        self.status == "mempool"
    }

    pub fn total_output(&self) -> u64 {
        self.output.values().fold(0, |acc, v| acc.saturating_add(*v))
    }

    /// Confirmations relative to the chain tip; pending entries have none.
    pub fn confirmations(&self, chain_height: u64) -> u64 {
        if self.is_pending() {
            return 0;
        }
        chain_height.saturating_sub(self.height.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionsFeed {
    #[serde(default)]
    pub mempool: Vec<FeedEntry>,
    #[serde(default)]
    pub confirmed: Vec<FeedEntry>,
    #[serde(default)]
    pub height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Lenient decoding of base-unit amounts.
///
/// The node emits integers, but amounts that went through float arithmetic
/// on its side arrive as `12.0`; negative, null and non-finite values read
/// as zero.
pub mod units {
    use serde::{Deserialize, Deserializer};
    use std::collections::BTreeMap;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawUnits {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    impl RawUnits {
        fn into_units(self) -> u64 {
            match self {
                RawUnits::Unsigned(value) => value,
                RawUnits::Signed(value) => u64::try_from(value).unwrap_or(0),
                RawUnits::Float(value) if value.is_finite() && value > 0.0 => value.round() as u64,
                RawUnits::Float(_) => 0,
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawUnits>::deserialize(deserializer)?;
        Ok(raw.map(RawUnits::into_units).unwrap_or(0))
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawUnits>::deserialize(deserializer)?;
        Ok(raw.map(RawUnits::into_units))
    }

    pub fn map<'de, D>(deserializer: D) -> Result<BTreeMap<String, u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, Option<RawUnits>>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(|(address, value)| (address, value.map(RawUnits::into_units).unwrap_or(0)))
            .collect())
    }
}
