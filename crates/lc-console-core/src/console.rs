use lc_api_types::{Block, WalletImportRequest};
use lc_node_client::{FeedQuery, NodeClient};
use lc_storage::{KeyValueStore, NodeAliasStore, RawWalletEntry, WalletEntry, WalletStore, normalize_address};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::amount::{AmountFormatter, DisplayMode};
use crate::balance::BalanceAggregator;
use crate::chain::search_blocks;
use crate::config::{ConfigState, ConfigUpdate};
use crate::coordinator::{Snapshot, WalletListCoordinator};
use crate::error::{ConsoleError, ConsoleResult};
use crate::render::{
    ActiveWalletView, BlockView, ChainView, ConfigView, CreatedWalletView, FeeEstimate, FeeQuote, FeedView,
    TransactReceipt, WalletDetailView, WalletListView,
};
use crate::sync::{ActiveWallet, SyncController};

pub const NEW_WALLET_ALIAS: &str = "New wallet";
pub const IMPORTED_WALLET_ALIAS: &str = "Imported wallet";

#[derive(Debug, Clone)]
struct FeeDraft {
    // Number of the estimate request that owns this draft.
    request: u64,
    recipient: String,
    amount_input: String,
    estimate: FeeEstimate,
}

/// Every amount currently on screen, rebuilt from cached data.
#[derive(Debug, Clone)]
pub struct AmountDisplays {
    pub amount_label: String,
    pub wallets: Option<WalletListView>,
    pub active: Option<ActiveWalletView>,
    pub fee: Option<String>,
    pub chain: ChainView,
}

impl fmt::Display for AmountDisplays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(active) = &self.active {
            writeln!(f, "{active}")?;
        }
        if let Some(wallets) = &self.wallets {
            writeln!(f, "{wallets}")?;
        }
        if let Some(fee) = &self.fee {
            writeln!(f, "{fee}")?;
        }
        writeln!(f, "{}", self.amount_label)?;
        write!(f, "{}", self.chain)
    }
}

/// The ledger console: one instance per process, owning every piece of
/// client-side state.
pub struct Console {
    node: Arc<dyn NodeClient>,
    store: Arc<WalletStore>,
    node_alias: NodeAliasStore,
    config: Arc<ConfigState>,
    coordinator: Arc<WalletListCoordinator>,
    sync: Arc<SyncController>,
    chain: Arc<RwLock<Vec<Block>>>,
    last_active: Arc<RwLock<Option<ActiveWallet>>>,
    fee_draft: Mutex<Option<FeeDraft>>,
    fee_requests: AtomicU64,
    auto_refresh: Mutex<Option<JoinHandle<()>>>,
}

impl Console {
    pub fn new(node: Arc<dyn NodeClient>, kv: Arc<dyn KeyValueStore>) -> Self {
        let store = Arc::new(WalletStore::new(Arc::clone(&kv)));
        let balances = Arc::new(BalanceAggregator::new(Arc::clone(&node)));
        let coordinator = Arc::new(WalletListCoordinator::new(Arc::clone(&store), balances));
        let sync = Arc::new(SyncController::new(
            Arc::clone(&node),
            Arc::clone(&store),
            Arc::clone(&coordinator),
        ));

        Self {
            config: Arc::new(ConfigState::new(Arc::clone(&node))),
            node_alias: NodeAliasStore::new(kv),
            node,
            store,
            coordinator,
            sync,
            chain: Arc::new(RwLock::new(Vec::new())),
            last_active: Arc::new(RwLock::new(None)),
            fee_draft: Mutex::new(None),
            fee_requests: AtomicU64::new(0),
            auto_refresh: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn formatter(&self) -> AmountFormatter {
        self.config.formatter()
    }

    pub fn is_online(&self) -> bool {
        self.sync.is_online()
    }

    pub fn subscribe_online(&self) -> watch::Receiver<bool> {
        self.sync.subscribe_online()
    }

    pub fn subscribe_wallets(&self) -> watch::Receiver<Option<Snapshot>> {
        self.coordinator.subscribe()
    }

    /// First contact with the node. Nothing here is fatal; every failure is
    /// logged and can be retried through the individual operations.
    pub async fn initialize(&self) {
        if let Err(err) = self.store.compact() {
            warn!("initial wallet compaction failed: {err:#}");
        }
        if let Err(err) = self.pull_active_wallet().await {
            warn!("initial active wallet pull failed: {err}");
        }
        if let Err(err) = self.load_chain().await {
            warn!("initial chain load failed: {err}");
        }
        if let Err(err) = self.load_config().await {
            warn!("initial config load failed: {err}");
        }
    }

    // wallets

    pub async fn wallet_list(&self) -> ConsoleResult<WalletListView> {
        let snapshot = self.coordinator.refresh().await?;
        Ok(WalletListView::build(&snapshot, &self.formatter()))
    }

    pub async fn wallet_detail(&self, address: &str) -> ConsoleResult<WalletDetailView> {
        let address = normalize_address(address);
        let snapshot = match self.coordinator.latest() {
            Some(snapshot) if snapshot.find(&address).is_some() => snapshot,
            _ => self.coordinator.refresh().await?,
        };
        let item = snapshot
            .find(&address)
            .ok_or_else(|| ConsoleError::validation(format!("no wallet stored for {address}")))?;
        Ok(WalletDetailView::build(item, &self.formatter()))
    }

    pub async fn pull_active_wallet(&self) -> ConsoleResult<ActiveWalletView> {
        let active = self.sync.pull_active_wallet().await?;
        let view = self.active_view(&active, &self.formatter());
        self.remember_active(active);
        Ok(view)
    }

    pub async fn create_wallet(&self) -> ConsoleResult<CreatedWalletView> {
        let created = self.node.wallet_create().await.map_err(ConsoleError::transport)?;
        let raw = RawWalletEntry::with_address(created.address.as_str())
            .keys(created.public_key.as_str(), created.private_key.as_str());
        self.store
            .upsert(raw, Some(NEW_WALLET_ALIAS))
            .map_err(ConsoleError::storage)?;
        info!(address = %created.address, "wallet created");

        self.coordinator.refresh().await?;
        Ok(CreatedWalletView {
            address: created.address,
            public_key: created.public_key,
            private_key: created.private_key,
        })
    }

    pub async fn import_wallet(
        &self,
        private_key: &str,
        set_active: bool,
        alias: Option<&str>,
    ) -> ConsoleResult<WalletEntry> {
        let private_key = private_key.trim();
        if private_key.is_empty() {
            return Err(ConsoleError::validation("private key is required"));
        }
        let alias = alias
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .unwrap_or(IMPORTED_WALLET_ALIAS);

        let imported = self
            .node
            .wallet_import(WalletImportRequest {
                private_key: private_key.to_owned(),
                set_active,
            })
            .await
            .map_err(ConsoleError::transport)?;

        let raw = RawWalletEntry::with_address(imported.address.as_str()).keys(imported.public_key, private_key);
        let entry = self
            .store
            .upsert(raw, Some(alias))
            .map_err(ConsoleError::storage)?
            .ok_or_else(|| ConsoleError::Transport("node returned an imported wallet without an address".to_owned()))?;
        info!(address = %entry.address, set_active, "wallet imported");

        self.coordinator.refresh().await?;
        self.pull_active_quietly().await;
        Ok(entry)
    }

    /// Make a stored wallet the node's active one. Watch-only entries have
    /// nothing to import and are refused.
    pub async fn set_active(&self, address: &str) -> ConsoleResult<ActiveWalletView> {
        let entry = self
            .store
            .get(address)
            .ok_or_else(|| ConsoleError::validation(format!("no wallet stored for {}", normalize_address(address))))?;
        if !entry.has_private_key() {
            return Err(ConsoleError::validation(format!(
                "no private key stored for {}",
                entry.address
            )));
        }

        let active = self.sync.set_active_wallet(&entry.private_key, Some(&entry.alias)).await?;
        let view = self.active_view(&active, &self.formatter());
        self.remember_active(active);
        Ok(view)
    }

    pub async fn remove_wallet(&self, address: &str) -> ConsoleResult<bool> {
        let removed = self.store.remove(address).map_err(ConsoleError::storage)?;
        self.coordinator.refresh().await?;
        Ok(removed)
    }

    pub async fn rename_wallet(&self, address: &str, alias: &str) -> ConsoleResult<bool> {
        if alias.trim().is_empty() {
            return Err(ConsoleError::validation("alias must not be empty"));
        }
        let renamed = self.store.rename(address, alias).map_err(ConsoleError::storage)?;
        self.coordinator.refresh().await?;
        Ok(renamed)
    }

    // transfers and mining

    pub async fn transact(&self, recipient: &str, amount_input: &str) -> ConsoleResult<TransactReceipt> {
        let fmt = self.formatter();
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(ConsoleError::validation("recipient is required"));
        }
        let amount = fmt.parse_input(amount_input)?;

        let record = self
            .node
            .wallet_transact(recipient, amount)
            .await
            .map_err(ConsoleError::transport)?;
        info!(tx_id = %record.id, amount, fee = record.input.fee, "transaction submitted");

        let receipt = TransactReceipt::build(&record, &fmt);
        self.after_ledger_change().await;
        Ok(receipt)
    }

    /// Quote the fee for a draft transfer. Never fails: missing input or an
    /// unreachable node are states of the estimate, not errors.
    ///
    /// The draft is claimed before the node is asked, and the answer is only
    /// kept if no newer estimate started in the meantime.
    pub async fn estimate_fee(&self, recipient: &str, amount_input: &str) -> FeeEstimate {
        let units = self.formatter().preview_units(amount_input);
        let recipient = recipient.trim();
        let request = self.fee_requests.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut draft = self.fee_draft.lock().unwrap_or_else(PoisonError::into_inner);
            // Same inputs keep showing the last quote until the new one lands.
            let estimate = draft
                .as_ref()
                .filter(|previous| previous.recipient == recipient && previous.amount_input == amount_input)
                .map_or(FeeEstimate::Incomplete, |previous| previous.estimate);
            *draft = Some(FeeDraft {
                request,
                recipient: recipient.to_owned(),
                amount_input: amount_input.to_owned(),
                estimate,
            });
        }

        let estimate = if recipient.is_empty() || units == 0 {
            FeeEstimate::Incomplete
        } else {
            match self.node.estimate_fee(recipient, units).await {
                Ok(response) => {
                    let total_required = response.total_required.unwrap_or(units.saturating_add(response.fee));
                    FeeEstimate::Quote(FeeQuote {
                        fee: response.fee,
                        total_required,
                        balance: response.balance,
                        exceeds_balance: total_required > response.balance,
                    })
                }
                Err(err) => {
                    debug!("fee estimate unavailable: {err:#}");
                    FeeEstimate::Unavailable
                }
            }
        };

        let mut draft = self.fee_draft.lock().unwrap_or_else(PoisonError::into_inner);
        match draft.as_mut() {
            Some(current) if current.request == request => current.estimate = estimate,
            _ => debug!(request, "discarding superseded fee estimate"),
        }
        estimate
    }

    pub async fn mine(&self) -> ConsoleResult<BlockView> {
        let block = self.node.mine().await.map_err(ConsoleError::transport)?;
        info!(hash = %block.hash, txs = block.data.len(), "block mined");
        self.after_ledger_change().await;

        let chain = self.chain.read().unwrap_or_else(PoisonError::into_inner);
        let height = chain
            .iter()
            .position(|cached| cached.hash == block.hash)
            .unwrap_or(chain.len());
        Ok(BlockView::build(height as u64, &block, &self.formatter()))
    }

    // chain and feed

    pub async fn load_chain(&self) -> ConsoleResult<ChainView> {
        reload_chain(self.node.as_ref(), &self.chain).await?;
        Ok(self.chain_view(""))
    }

    /// Search the cached chain without asking the node.
    pub fn chain_view(&self, query: &str) -> ChainView {
        let chain = self.chain.read().unwrap_or_else(PoisonError::into_inner);
        let matches = search_blocks(&chain, query);
        ChainView::build(chain.len(), &matches, &self.formatter())
    }

    pub async fn load_feed(&self, address: Option<&str>, limit: Option<u32>) -> ConsoleResult<FeedView> {
        let query = FeedQuery {
            address: address.map(str::trim).filter(|a| !a.is_empty()).map(str::to_owned),
            limit: limit.filter(|limit| *limit > 0),
        };
        let feed = self
            .node
            .transactions_feed(&query)
            .await
            .map_err(ConsoleError::transport)?;
        debug!(
            pending = feed.mempool.len(),
            confirmed = feed.confirmed.len(),
            height = feed.height,
            "transaction feed loaded"
        );
        Ok(FeedView::build(&feed, &self.formatter()))
    }

    // configuration

    pub fn config_view(&self) -> ConfigView {
        ConfigView::build(&self.config.current(), &self.formatter())
    }

    pub async fn load_config(&self) -> ConsoleResult<ConfigView> {
        self.config.load().await?;
        self.apply_auto_refresh();
        self.refresh_amount_displays().await;
        Ok(self.config_view())
    }

    pub async fn save_config(&self, update: &ConfigUpdate) -> ConsoleResult<ConfigView> {
        self.config.save(update).await?;
        self.apply_auto_refresh();
        self.refresh_amount_displays().await;
        Ok(self.config_view())
    }

    /// Switch the primary representation. Purely local: everything already
    /// on screen is rebuilt from cached data.
    pub fn set_display_mode(&self, mode: DisplayMode) -> AmountDisplays {
        self.config.set_display_mode(mode);
        info!(mode = %mode, "display mode changed");
        self.render_amounts()
    }

    pub fn render_amounts(&self) -> AmountDisplays {
        let fmt = self.formatter();
        let active = self
            .last_active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|active| self.active_view(active, &fmt));
        let fee = self
            .fee_draft
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|draft| draft.estimate.describe(&fmt));

        AmountDisplays {
            amount_label: fmt.amount_label(),
            wallets: self
                .coordinator
                .latest()
                .map(|snapshot| WalletListView::build(&snapshot, &fmt)),
            active,
            fee,
            chain: self.chain_view(""),
        }
    }

    /// Refetch what amounts are shown for and render them again. Used after
    /// the node configuration changed.
    pub async fn refresh_amount_displays(&self) -> AmountDisplays {
        if self.pull_active_quietly().await.is_none() {
            if let Err(err) = self.coordinator.refresh().await {
                warn!("wallet list refresh failed: {err}");
            }
        }
        self.reestimate_fee().await;
        self.render_amounts()
    }

    // node alias

    pub fn node_alias(&self) -> String {
        self.node_alias.get()
    }

    pub fn set_node_alias(&self, alias: &str) -> ConsoleResult<String> {
        self.node_alias.set(alias).map_err(ConsoleError::storage)
    }

    // auto refresh

    /// (Re)schedule the periodic chain reload and active wallet pull from
    /// the current refresh interval. Any previous schedule is cancelled; an
    /// interval of zero leaves none running.
    pub fn apply_auto_refresh(&self) {
        let mut slot = self.auto_refresh.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let Some(period) = self.config.refresh_interval() else {
            debug!("auto refresh disabled");
            return;
        };

        let node = Arc::clone(&self.node);
        let chain = Arc::clone(&self.chain);
        let sync = Arc::clone(&self.sync);
        let last_active = Arc::clone(&self.last_active);
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(err) = reload_chain(node.as_ref(), &chain).await {
                    warn!("auto refresh chain reload failed: {err}");
                }
                match sync.pull_active_wallet().await {
                    Ok(active) => *last_active.write().unwrap_or_else(PoisonError::into_inner) = Some(active),
                    Err(err) => warn!("auto refresh wallet pull failed: {err}"),
                }
            }
        }));
        info!(seconds = period.as_secs(), "auto refresh scheduled");
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.auto_refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    fn active_view(&self, active: &ActiveWallet, fmt: &AmountFormatter) -> ActiveWalletView {
        ActiveWalletView::build(active, &self.node_alias(), self.is_online(), fmt)
    }

    fn remember_active(&self, active: ActiveWallet) {
        *self.last_active.write().unwrap_or_else(PoisonError::into_inner) = Some(active);
    }

    async fn pull_active_quietly(&self) -> Option<ActiveWalletView> {
        match self.pull_active_wallet().await {
            Ok(view) => Some(view),
            Err(err) => {
                warn!("active wallet pull failed: {err}");
                None
            }
        }
    }

    async fn after_ledger_change(&self) {
        let (pulled, reloaded) = tokio::join!(
            self.pull_active_quietly(),
            reload_chain(self.node.as_ref(), &self.chain)
        );
        if let Err(err) = reloaded {
            warn!("chain reload failed: {err}");
        }
        debug!(active_pulled = pulled.is_some(), "ledger state reloaded");
    }

    // Re-reads the draft inputs under the current configuration and mode.
    async fn reestimate_fee(&self) {
        let draft = self
            .fee_draft
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|draft| (draft.recipient.clone(), draft.amount_input.clone()));
        if let Some((recipient, amount_input)) = draft {
            self.estimate_fee(&recipient, &amount_input).await;
        }
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        if let Some(task) = self.auto_refresh.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            task.abort();
        }
    }
}

async fn reload_chain(node: &dyn NodeClient, cache: &RwLock<Vec<Block>>) -> ConsoleResult<usize> {
    let chain = node.blockchain().await.map_err(ConsoleError::transport)?;
    let blocks = chain.len();
    *cache.write().unwrap_or_else(PoisonError::into_inner) = chain;
    debug!(blocks, "chain reloaded");
    Ok(blocks)
}

/// A user action, decoupled from whatever surface issued it.
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    Wallets,
    WalletDetail { address: String },
    ActiveWallet,
    CreateWallet,
    ImportWallet {
        private_key: String,
        set_active: bool,
        alias: Option<String>,
    },
    SetActive { address: String },
    RemoveWallet { address: String },
    RenameWallet { address: String, alias: String },
    Transact { recipient: String, amount: String },
    EstimateFee { recipient: String, amount: String },
    Mine,
    Chain { query: Option<String> },
    Feed { address: Option<String>, limit: Option<u32> },
    ShowConfig,
    LoadConfig,
    SaveConfig(ConfigUpdate),
    SetDisplayMode(DisplayMode),
    NodeAlias,
    SetNodeAlias(String),
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Wallets(WalletListView),
    WalletDetail(WalletDetailView),
    Active(ActiveWalletView),
    Created(CreatedWalletView),
    Imported { address: String, set_active: bool },
    Removed { address: String, removed: bool },
    Renamed { address: String, renamed: bool },
    Sent(TransactReceipt),
    Fee(String),
    Mined(BlockView),
    Chain(ChainView),
    Feed(FeedView),
    Config(ConfigView),
    Amounts(AmountDisplays),
    NodeAlias(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Wallets(view) => write!(f, "{view}"),
            Outcome::WalletDetail(view) => write!(f, "{view}"),
            Outcome::Active(view) => write!(f, "{view}"),
            Outcome::Created(view) => write!(f, "{view}"),
            Outcome::Imported { address, set_active } => {
                let note = if *set_active { "Wallet imported and set active" } else { "Wallet imported" };
                write!(f, "{note}: {address}")
            }
            Outcome::Removed { address, removed: true } => write!(f, "Wallet removed: {address}"),
            Outcome::Removed { address, removed: false } | Outcome::Renamed { address, renamed: false } => {
                write!(f, "No wallet stored for {address}")
            }
            Outcome::Renamed { address, renamed: true } => write!(f, "Wallet renamed: {address}"),
            Outcome::Sent(receipt) => write!(f, "{receipt}"),
            Outcome::Fee(text) => f.write_str(text),
            Outcome::Mined(block) => write!(f, "Block mined\n{block}"),
            Outcome::Chain(view) => write!(f, "{view}"),
            Outcome::Feed(view) => write!(f, "{view}"),
            Outcome::Config(view) => write!(f, "{view}"),
            Outcome::Amounts(view) => write!(f, "{view}"),
            Outcome::NodeAlias(alias) => write!(f, "Node alias: {alias}"),
        }
    }
}

impl Console {
    pub async fn dispatch(&self, command: Command) -> ConsoleResult<Outcome> {
        debug!(command = command_name(&command), "dispatching");
        let outcome = match command {
            Command::Wallets => Outcome::Wallets(self.wallet_list().await?),
            Command::WalletDetail { address } => Outcome::WalletDetail(self.wallet_detail(&address).await?),
            Command::ActiveWallet => Outcome::Active(self.pull_active_wallet().await?),
            Command::CreateWallet => Outcome::Created(self.create_wallet().await?),
            Command::ImportWallet {
                private_key,
                set_active,
                alias,
            } => {
                let entry = self.import_wallet(&private_key, set_active, alias.as_deref()).await?;
                Outcome::Imported {
                    address: entry.address,
                    set_active,
                }
            }
            Command::SetActive { address } => Outcome::Active(self.set_active(&address).await?),
            Command::RemoveWallet { address } => {
                let removed = self.remove_wallet(&address).await?;
                Outcome::Removed {
                    address: normalize_address(&address),
                    removed,
                }
            }
            Command::RenameWallet { address, alias } => {
                let renamed = self.rename_wallet(&address, &alias).await?;
                Outcome::Renamed {
                    address: normalize_address(&address),
                    renamed,
                }
            }
            Command::Transact { recipient, amount } => Outcome::Sent(self.transact(&recipient, &amount).await?),
            Command::EstimateFee { recipient, amount } => {
                let estimate = self.estimate_fee(&recipient, &amount).await;
                Outcome::Fee(estimate.describe(&self.formatter()))
            }
            Command::Mine => Outcome::Mined(self.mine().await?),
            Command::Chain { query } => {
                self.load_chain().await?;
                Outcome::Chain(self.chain_view(query.as_deref().unwrap_or_default()))
            }
            Command::Feed { address, limit } => Outcome::Feed(self.load_feed(address.as_deref(), limit).await?),
            Command::ShowConfig => Outcome::Config(self.config_view()),
            Command::LoadConfig => Outcome::Config(self.load_config().await?),
            Command::SaveConfig(update) => Outcome::Config(self.save_config(&update).await?),
            Command::SetDisplayMode(mode) => Outcome::Amounts(self.set_display_mode(mode)),
            Command::NodeAlias => Outcome::NodeAlias(self.node_alias()),
            Command::SetNodeAlias(alias) => Outcome::NodeAlias(self.set_node_alias(&alias)?),
        };
        Ok(outcome)
    }
}

// Private keys travel inside some commands; only the name is ever printed.
impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(command_name(self))
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Wallets => "wallets",
        Command::WalletDetail { .. } => "wallet_detail",
        Command::ActiveWallet => "active_wallet",
        Command::CreateWallet => "create_wallet",
        Command::ImportWallet { .. } => "import_wallet",
        Command::SetActive { .. } => "set_active",
        Command::RemoveWallet { .. } => "remove_wallet",
        Command::RenameWallet { .. } => "rename_wallet",
        Command::Transact { .. } => "transact",
        Command::EstimateFee { .. } => "estimate_fee",
        Command::Mine => "mine",
        Command::Chain { .. } => "chain",
        Command::Feed { .. } => "feed",
        Command::ShowConfig => "show_config",
        Command::LoadConfig => "load_config",
        Command::SaveConfig(_) => "save_config",
        Command::SetDisplayMode(_) => "set_display_mode",
        Command::NodeAlias => "node_alias",
        Command::SetNodeAlias(_) => "set_node_alias",
    }
}
