use futures::future::join_all;
use lc_node_client::NodeClient;
use std::sync::Arc;
use tracing::warn;

/// Per-address balance lookups that never fail.
///
/// An unreachable wallet shows up with a zero balance instead of taking the
/// rest of the list down with it.
pub struct BalanceAggregator {
    node: Arc<dyn NodeClient>,
}

impl BalanceAggregator {
    pub fn new(node: Arc<dyn NodeClient>) -> Self {
        Self { node }
    }

    pub async fn fetch_balance(&self, address: &str) -> u64 {
        match self.node.wallet_balance(address).await {
            Ok(balance) => balance,
            Err(err) => {
                warn!(address, "balance fetch failed, showing zero: {err:#}");
                0
            }
        }
    }

    /// Fetch concurrently; results line up with `addresses`.
    pub async fn fetch_all<'a, I>(&self, addresses: I) -> Vec<u64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        join_all(addresses.into_iter().map(|address| self.fetch_balance(address))).await
    }
}
