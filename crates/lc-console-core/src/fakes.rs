use anyhow::{Result, bail};
use async_trait::async_trait;
use lc_api_types::{
    Block, FeeEstimateResponse, NodeConfig, TransactionInput, TransactionRecord, TransactionsFeed,
    WalletCreateResponse, WalletImportRequest, WalletImportResponse, WalletInfoResponse,
};
use lc_node_client::{FeedQuery, NodeClient};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory ledger node for exercising the console without a network.
#[derive(Default)]
pub(crate) struct FakeNode {
    offline: AtomicBool,
    balance_delay: Mutex<Option<Duration>>,
    balances: Mutex<HashMap<String, u64>>,
    failing_balances: Mutex<HashSet<String>>,
    balance_calls: Mutex<HashMap<String, usize>>,
    active: Mutex<Option<WalletInfoResponse>>,
    wallet_info_calls: AtomicUsize,
    config: Mutex<NodeConfig>,
    saved_configs: Mutex<Vec<NodeConfig>>,
    imports: Mutex<Vec<WalletImportRequest>>,
    transacts: Mutex<Vec<(String, u64)>>,
    fee_calls: AtomicUsize,
    fee_delays: Mutex<VecDeque<Duration>>,
    chain: Mutex<Vec<Block>>,
    feed: Mutex<TransactionsFeed>,
    created: AtomicUsize,
}

impl FakeNode {
    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub(crate) fn set_balance_delay(&self, delay: Duration) {
        *self.balance_delay.lock().unwrap() = Some(delay);
    }

    pub(crate) fn set_balance(&self, address: &str, balance: u64) {
        self.balances.lock().unwrap().insert(address.to_owned(), balance);
    }

    pub(crate) fn fail_balance(&self, address: &str) {
        self.failing_balances.lock().unwrap().insert(address.to_owned());
    }

    pub(crate) fn balance_calls(&self, address: &str) -> usize {
        self.balance_calls.lock().unwrap().get(address).copied().unwrap_or(0)
    }

    pub(crate) fn total_balance_calls(&self) -> usize {
        self.balance_calls.lock().unwrap().values().sum()
    }

    pub(crate) fn set_active(&self, address: &str, balance: u64, public_key: &str, private_key: &str) {
        *self.active.lock().unwrap() = Some(WalletInfoResponse {
            address: address.to_owned(),
            balance,
            public_key: public_key.to_owned(),
            private_key: private_key.to_owned(),
        });
    }

    pub(crate) fn wallet_info_calls(&self) -> usize {
        self.wallet_info_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn set_config(&self, config: NodeConfig) {
        *self.config.lock().unwrap() = config;
    }

    pub(crate) fn saved_configs(&self) -> Vec<NodeConfig> {
        self.saved_configs.lock().unwrap().clone()
    }

    pub(crate) fn imports(&self) -> Vec<WalletImportRequest> {
        self.imports.lock().unwrap().clone()
    }

    pub(crate) fn transacts(&self) -> Vec<(String, u64)> {
        self.transacts.lock().unwrap().clone()
    }

    pub(crate) fn fee_calls(&self) -> usize {
        self.fee_calls.load(Ordering::SeqCst)
    }

    /// Delays for the next fee estimates, one per call in order.
    pub(crate) fn queue_fee_delays(&self, delays: impl IntoIterator<Item = Duration>) {
        self.fee_delays.lock().unwrap().extend(delays);
    }

    pub(crate) fn set_chain(&self, chain: Vec<Block>) {
        *self.chain.lock().unwrap() = chain;
    }

    pub(crate) fn set_feed(&self, feed: TransactionsFeed) {
        *self.feed.lock().unwrap() = feed;
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }

    fn active_balance(&self) -> u64 {
        self.active.lock().unwrap().as_ref().map(|info| info.balance).unwrap_or(0)
    }
}

#[async_trait]
impl NodeClient for FakeNode {
    async fn wallet_info(&self) -> Result<WalletInfoResponse> {
        self.wallet_info_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        match self.active.lock().unwrap().clone() {
            Some(info) => Ok(info),
            None => bail!("no active wallet"),
        }
    }

    async fn wallet_create(&self) -> Result<WalletCreateResponse> {
        self.ensure_online()?;
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(WalletCreateResponse {
            address: format!("created-{n}"),
            public_key: format!("created-pk-{n}"),
            private_key: format!("created-sk-{n}"),
        })
    }

    async fn wallet_import(&self, req: WalletImportRequest) -> Result<WalletImportResponse> {
        self.ensure_online()?;
        self.imports.lock().unwrap().push(req.clone());
        let address = format!("addr-{}", req.private_key);
        let public_key = format!("pk-{}", req.private_key);
        if req.set_active {
            let balance = self.balances.lock().unwrap().get(&address).copied().unwrap_or(0);
            self.set_active(&address, balance, &public_key, &req.private_key);
        }
        Ok(WalletImportResponse {
            address,
            public_key,
            set_active: req.set_active,
        })
    }

    async fn wallet_balance(&self, address: &str) -> Result<u64> {
        *self.balance_calls.lock().unwrap().entry(address.to_owned()).or_default() += 1;
        let delay = *self.balance_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.ensure_online()?;
        if self.failing_balances.lock().unwrap().contains(address) {
            bail!("balance lookup for {address} timed out");
        }
        Ok(self.balances.lock().unwrap().get(address).copied().unwrap_or(0))
    }

    async fn wallet_transact(&self, recipient: &str, amount: u64) -> Result<TransactionRecord> {
        self.ensure_online()?;
        if amount > self.active_balance() {
            bail!("Amount exceeds balance");
        }
        self.transacts.lock().unwrap().push((recipient.to_owned(), amount));
        Ok(TransactionRecord {
            id: format!("tx-{}", self.transacts.lock().unwrap().len()),
            input: TransactionInput {
                fee: 25,
                ..TransactionInput::default()
            },
            output: BTreeMap::from([(recipient.to_owned(), amount)]),
        })
    }

    async fn estimate_fee(&self, _recipient: &str, amount: u64) -> Result<FeeEstimateResponse> {
        self.fee_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.fee_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.ensure_online()?;
        Ok(FeeEstimateResponse {
            fee: 25,
            total_required: Some(amount + 25),
            balance: self.active_balance(),
            insufficient: Some(amount + 25 > self.active_balance()),
        })
    }

    async fn get_config(&self) -> Result<NodeConfig> {
        self.ensure_online()?;
        Ok(self.config.lock().unwrap().clone())
    }

    async fn save_config(&self, config: &NodeConfig) -> Result<NodeConfig> {
        self.ensure_online()?;
        self.saved_configs.lock().unwrap().push(config.clone());
        *self.config.lock().unwrap() = config.clone();
        Ok(config.clone())
    }

    async fn blockchain(&self) -> Result<Vec<Block>> {
        self.ensure_online()?;
        Ok(self.chain.lock().unwrap().clone())
    }

    async fn mine(&self) -> Result<Block> {
        self.ensure_online()?;
        let mut chain = self.chain.lock().unwrap();
        let block = Block {
            hash: format!("mined-{}", chain.len()),
            last_hash: chain.last().map(|b| b.hash.clone()).unwrap_or_default(),
            ..Block::default()
        };
        chain.push(block.clone());
        Ok(block)
    }

    async fn transactions_feed(&self, _query: &FeedQuery) -> Result<TransactionsFeed> {
        self.ensure_online()?;
        Ok(self.feed.lock().unwrap().clone())
    }
}
