use lc_api_types::WalletImportRequest;
use lc_node_client::NodeClient;
use lc_storage::{RawWalletEntry, WalletEntry, WalletStore, normalize_address};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::coordinator::WalletListCoordinator;
use crate::error::{ConsoleError, ConsoleResult};

/// Alias given to an active wallet the console had never seen before.
pub const NODE_WALLET_ALIAS: &str = "Node wallet";

/// The wallet the node currently signs with, as the console knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWallet {
    pub entry: WalletEntry,
    pub balance: u64,
}

/// Reconciles the node's active wallet into the local store and tracks
/// whether the node answered the last time it was asked.
pub struct SyncController {
    node: Arc<dyn NodeClient>,
    store: Arc<WalletStore>,
    coordinator: Arc<WalletListCoordinator>,
    online: watch::Sender<bool>,
}

impl SyncController {
    pub fn new(node: Arc<dyn NodeClient>, store: Arc<WalletStore>, coordinator: Arc<WalletListCoordinator>) -> Self {
        let (online, _) = watch::channel(false);
        Self {
            node,
            store,
            coordinator,
            online,
        }
    }

    pub fn is_online(&self) -> bool {
        *self.online.borrow()
    }

    pub fn subscribe_online(&self) -> watch::Receiver<bool> {
        self.online.subscribe()
    }

    /// Ask the node for its active wallet, remember it if it is new, and
    /// rebuild the wallet list.
    ///
    /// A transport failure marks the node offline and leaves the store alone.
    pub async fn pull_active_wallet(&self) -> ConsoleResult<ActiveWallet> {
        let info = match self.node.wallet_info().await {
            Ok(info) => info,
            Err(err) => {
                self.set_online(false);
                warn!("active wallet pull failed: {err:#}");
                return Err(ConsoleError::transport(err));
            }
        };
        self.set_online(true);

        let address = normalize_address(&info.address);
        if address.is_empty() {
            return Err(ConsoleError::Transport("node reported an active wallet without an address".to_owned()));
        }

        // A wallet the store already knows keeps its alias and keys, even if
        // it was written while this pull was in flight.
        let raw = RawWalletEntry::with_address(address.as_str()).keys(info.public_key, info.private_key);
        let entry = self
            .store
            .insert_if_absent(raw, Some(NODE_WALLET_ALIAS))
            .map_err(ConsoleError::storage)?
            .ok_or_else(|| ConsoleError::Internal(format!("active wallet {address} was not stored")))?;

        self.coordinator.refresh().await?;

        Ok(ActiveWallet {
            entry,
            balance: info.balance,
        })
    }

    /// Import `private_key` on the node, make it the active wallet and pull it
    /// back. When `alias` is given and the wallet is new, it is stored under
    /// that alias instead of the default.
    pub async fn set_active_wallet(&self, private_key: &str, alias: Option<&str>) -> ConsoleResult<ActiveWallet> {
        let private_key = private_key.trim();
        if private_key.is_empty() {
            return Err(ConsoleError::validation("private key is required"));
        }

        let imported = self
            .node
            .wallet_import(WalletImportRequest {
                private_key: private_key.to_owned(),
                set_active: true,
            })
            .await
            .map_err(|err| {
                warn!("wallet activation failed: {err:#}");
                ConsoleError::transport(err)
            })?;
        info!(address = %imported.address, "active wallet switched");

        if let Some(alias) = alias.map(str::trim).filter(|alias| !alias.is_empty()) {
            let raw = RawWalletEntry::with_address(imported.address.as_str()).keys(imported.public_key, private_key);
            self.store
                .insert_if_absent(raw, Some(alias))
                .map_err(ConsoleError::storage)?;
        }

        self.pull_active_wallet().await
    }

    fn set_online(&self, online: bool) {
        self.online.send_if_modified(|current| {
            let changed = *current != online;
            *current = online;
            changed
        });
    }
}
