//! Single-flight rebuild of the displayed wallet list.
//!
//! The first caller installs a shared future and spawns the pipeline; every
//! caller that arrives while it runs awaits that same future. The pipeline is
//! detached from its callers, so it always runs to completion, and a drop
//! guard owned by the task clears the slot whether it succeeds, fails or
//! panics.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use lc_storage::{WalletEntry, WalletStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::balance::BalanceAggregator;
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletListItem {
    pub entry: WalletEntry,
    pub balance: u64,
}

impl WalletListItem {
    pub fn address(&self) -> &str {
        &self.entry.address
    }

    pub fn alias(&self) -> &str {
        &self.entry.alias
    }
}

/// One consistent view of every stored wallet and the sum of their balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub items: Vec<WalletListItem>,
    pub total: u64,
}

impl Snapshot {
    pub fn find(&self, address: &str) -> Option<&WalletListItem> {
        let address = lc_storage::normalize_address(address);
        self.items.iter().find(|item| item.entry.address == address)
    }
}

type SharedRefresh = Shared<BoxFuture<'static, ConsoleResult<Snapshot>>>;
type InFlightSlot = Arc<Mutex<Option<(u64, SharedRefresh)>>>;

struct ClearInFlight {
    slot: InFlightSlot,
    generation: u64,
}

impl Drop for ClearInFlight {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(slot.as_ref(), Some((generation, _)) if *generation == self.generation) {
            *slot = None;
        }
    }
}

pub struct WalletListCoordinator {
    store: Arc<WalletStore>,
    balances: Arc<BalanceAggregator>,
    in_flight: InFlightSlot,
    generations: AtomicU64,
    published: Arc<watch::Sender<Option<Snapshot>>>,
}

impl WalletListCoordinator {
    pub fn new(store: Arc<WalletStore>, balances: Arc<BalanceAggregator>) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            store,
            balances,
            in_flight: Arc::new(Mutex::new(None)),
            generations: AtomicU64::new(0),
            published: Arc::new(published),
        }
    }

    /// Rebuild the wallet list, or join the rebuild already running.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn refresh(&self) -> ConsoleResult<Snapshot> {
        let pending = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some((generation, pending)) => {
                    debug!(generation, "joining in-flight wallet list refresh");
                    pending.clone()
                }
                None => {
                    let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
                    let pending = self.start_pipeline(generation);
                    *slot = Some((generation, pending.clone()));
                    pending
                }
            }
        };
        pending.await
    }

    /// The last snapshot any pipeline published.
    pub fn latest(&self) -> Option<Snapshot> {
        self.published.borrow().clone()
    }

    /// Observe published snapshots. Each change is a whole snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.published.subscribe()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    // Called with the slot locked; the spawned task cannot clear the slot
    // before it has been installed.
    fn start_pipeline(&self, generation: u64) -> SharedRefresh {
        let store = Arc::clone(&self.store);
        let balances = Arc::clone(&self.balances);
        let published = Arc::clone(&self.published);
        let guard = ClearInFlight {
            slot: Arc::clone(&self.in_flight),
            generation,
        };

        let task = tokio::spawn(async move {
            let _guard = guard;
            let snapshot = build_snapshot(&store, &balances).await?;
            published.send_replace(Some(snapshot.clone()));
            Ok::<_, ConsoleError>(snapshot)
        });

        async move {
            task.await
                .unwrap_or_else(|err| Err(ConsoleError::Internal(format!("wallet list refresh aborted: {err}"))))
        }
        .boxed()
        .shared()
    }
}

async fn build_snapshot(store: &WalletStore, balances: &BalanceAggregator) -> ConsoleResult<Snapshot> {
    let wallets = store.compact().map_err(ConsoleError::storage)?;
    let fetched = balances
        .fetch_all(wallets.iter().map(|entry| entry.address.as_str()))
        .await;

    let items: Vec<WalletListItem> = wallets
        .into_iter()
        .zip(fetched)
        .map(|(entry, balance)| WalletListItem { entry, balance })
        .collect();
    let total = items.iter().fold(0_u64, |acc, item| acc.saturating_add(item.balance));

    info!(wallets = items.len(), total, "wallet list refreshed");
    Ok(Snapshot { items, total })
}
