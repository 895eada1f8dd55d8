use lc_api_types::NodeConfig;
use lc_node_client::NodeClient;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{info, warn};

use crate::amount::{AmountFormatter, DisplayMode};
use crate::error::{ConsoleError, ConsoleResult};

/// Fields an operator may change from the console. Everything else in
/// [`NodeConfig`] is owned by the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub auto_mine: Option<bool>,
    pub miner_name: Option<String>,
    pub miner_address: Option<String>,
    pub refresh_interval_seconds: Option<u64>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The full configuration that results from applying this update.
    pub fn apply_to(&self, base: &NodeConfig) -> NodeConfig {
        let mut next = base.clone();
        if let Some(auto_mine) = self.auto_mine {
            next.auto_mine = auto_mine;
        }
        if let Some(miner_name) = &self.miner_name {
            next.miner_name = miner_name.trim().to_owned();
        }
        if let Some(miner_address) = &self.miner_address {
            next.miner_address = miner_address.trim().to_owned();
        }
        if let Some(interval) = self.refresh_interval_seconds {
            next.refresh_interval_seconds = interval;
        }
        next
    }
}

#[derive(Debug, Default)]
struct ConfigInner {
    node: NodeConfig,
    mode: DisplayMode,
}

/// Process-wide display configuration.
///
/// The node-owned part is only ever replaced as a whole; the display mode
/// is local and never sent anywhere.
pub struct ConfigState {
    node: Arc<dyn NodeClient>,
    inner: RwLock<ConfigInner>,
}

impl ConfigState {
    pub fn new(node: Arc<dyn NodeClient>) -> Self {
        Self {
            node,
            inner: RwLock::new(ConfigInner::default()),
        }
    }

    pub fn current(&self) -> NodeConfig {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).node.clone()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).mode
    }

    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).mode = mode;
    }

    pub fn formatter(&self) -> AmountFormatter {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        AmountFormatter::new(&inner.node, inner.mode)
    }

    /// `None` when auto refresh is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        match self.current().refresh_interval_seconds {
            0 => None,
            seconds => Some(Duration::from_secs(seconds)),
        }
    }

    /// Replace the node-owned configuration with what the node reports.
    pub async fn load(&self) -> ConsoleResult<NodeConfig> {
        let fetched = self.node.get_config().await.map_err(|err| {
            warn!("config load failed: {err:#}");
            ConsoleError::transport(err)
        })?;

        self.inner.write().unwrap_or_else(PoisonError::into_inner).node = fetched.clone();
        info!(
            coin = %fetched.coin_name,
            unit = %fetched.unit_name,
            units_per_coin = fetched.units_per_coin,
            refresh_interval_seconds = fetched.refresh_interval_seconds,
            "config loaded"
        );
        Ok(fetched)
    }

    /// Send the full intended configuration; local state changes only once
    /// the node accepted it.
    pub async fn save(&self, update: &ConfigUpdate) -> ConsoleResult<NodeConfig> {
        let intended = update.apply_to(&self.current());
        self.node.save_config(&intended).await.map_err(|err| {
            warn!("config save failed: {err:#}");
            ConsoleError::transport(err)
        })?;

        self.inner.write().unwrap_or_else(PoisonError::into_inner).node = intended.clone();
        info!(
            auto_mine = intended.auto_mine,
            refresh_interval_seconds = intended.refresh_interval_seconds,
            "config saved"
        );
        Ok(intended)
    }
}
