//! Presentation-ready views. Every amount is formatted at build time from a
//! single [`AmountFormatter`], so switching the display mode means building
//! the view again from the same data, never refetching it.

use lc_api_types::{Block, FeedEntry, NodeConfig, TransactionRecord, TransactionsFeed};
use std::fmt;

use crate::amount::{AmountFormatter, DisplayMode};
use crate::chain::BlockMatch;
use crate::coordinator::{Snapshot, WalletListItem};
use crate::sync::ActiveWallet;

pub const MISSING_PRIVATE_KEY: &str = "Not stored for this entry";

const BLOCK_HASH_PREVIEW: usize = 12;

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() { placeholder.to_owned() } else { value.to_owned() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRow {
    pub alias: String,
    pub address: String,
    pub balance: String,
    pub can_activate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletListView {
    pub rows: Vec<WalletRow>,
    pub total: String,
}

impl WalletListView {
    pub fn build(snapshot: &Snapshot, fmt: &AmountFormatter) -> Self {
        let rows = snapshot
            .items
            .iter()
            .map(|item| WalletRow {
                alias: item.alias().to_owned(),
                address: item.address().to_owned(),
                balance: fmt.format_primary(item.balance),
                can_activate: item.entry.has_private_key(),
            })
            .collect();
        Self {
            rows,
            total: fmt.format_primary(snapshot.total),
        }
    }
}

impl fmt::Display for WalletListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "No wallets stored.")?;
        }
        for row in &self.rows {
            let watch_only = if row.can_activate { "" } else { " [watch-only]" };
            writeln!(f, "{}  {}  Balance: {}{watch_only}", row.alias, row.address, row.balance)?;
        }
        write!(f, "Total: {}", self.total)
    }
}

/// Everything stored for one wallet, keys included.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletDetailView {
    pub alias: String,
    pub address: String,
    pub balance: String,
    pub public_key: String,
    pub private_key: String,
    pub can_activate: bool,
}

impl WalletDetailView {
    pub fn build(item: &WalletListItem, fmt: &AmountFormatter) -> Self {
        let entry = &item.entry;
        Self {
            alias: or_placeholder(&entry.alias, "Wallet detail"),
            address: entry.address.clone(),
            balance: fmt.format_with_secondary(item.balance),
            public_key: entry.public_key.clone(),
            private_key: or_placeholder(&entry.private_key, MISSING_PRIVATE_KEY),
            can_activate: entry.has_private_key(),
        }
    }
}

impl fmt::Debug for WalletDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletDetailView")
            .field("alias", &self.alias)
            .field("address", &self.address)
            .field("balance", &self.balance)
            .field("can_activate", &self.can_activate)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for WalletDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.alias)?;
        writeln!(f, "Address:     {}", self.address)?;
        writeln!(f, "Balance:     {}", self.balance)?;
        writeln!(f, "Public key:  {}", self.public_key)?;
        writeln!(f, "Private key: {}", self.private_key)?;
        let activation = if self.can_activate { "available" } else { "unavailable" };
        write!(f, "Set active:  {activation}")
    }
}

/// Credentials of a freshly created wallet. Shown once, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct CreatedWalletView {
    pub address: String,
    pub public_key: String,
    pub private_key: String,
}

impl fmt::Debug for CreatedWalletView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedWalletView")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CreatedWalletView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wallet created")?;
        writeln!(f, "Address:     {}", self.address)?;
        writeln!(f, "Public key:  {}", self.public_key)?;
        write!(f, "Private key: {}", self.private_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWalletView {
    pub node_alias: String,
    pub online: bool,
    pub alias: String,
    pub address: String,
    pub balance: String,
    pub public_key: String,
}

impl ActiveWalletView {
    pub fn build(active: &ActiveWallet, node_alias: &str, online: bool, fmt: &AmountFormatter) -> Self {
        Self {
            node_alias: node_alias.to_owned(),
            online,
            alias: active.entry.alias.clone(),
            address: active.entry.address.clone(),
            balance: fmt.format_primary(active.balance),
            public_key: or_placeholder(&active.entry.public_key, "-"),
        }
    }
}

impl fmt::Display for ActiveWalletView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.online { "online" } else { "offline" };
        writeln!(f, "Node: {} ({status})", self.node_alias)?;
        writeln!(f, "Active wallet: {} {}", self.alias, self.address)?;
        writeln!(f, "Balance:    {}", self.balance)?;
        write!(f, "Public key: {}", self.public_key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    pub fee: u64,
    pub total_required: u64,
    pub balance: u64,
    pub exceeds_balance: bool,
}

/// Live fee estimate for the transfer being drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeEstimate {
    /// Recipient or amount missing; nothing was asked.
    Incomplete,
    /// The node could not quote.
    Unavailable,
    Quote(FeeQuote),
}

impl FeeEstimate {
    pub fn describe(&self, fmt: &AmountFormatter) -> String {
        match self {
            FeeEstimate::Incomplete => "Fee: -".to_owned(),
            FeeEstimate::Unavailable => "Fee: n/a".to_owned(),
            FeeEstimate::Quote(quote) => {
                let suffix = if quote.exceeds_balance { " (exceeds balance)" } else { "" };
                format!(
                    "Fee: {} | Total: {}{suffix}",
                    fmt.format_with_secondary(quote.fee),
                    fmt.format_with_secondary(quote.total_required)
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactReceipt {
    pub tx_id: String,
    pub fee: String,
}

impl TransactReceipt {
    pub fn build(record: &TransactionRecord, fmt: &AmountFormatter) -> Self {
        Self {
            tx_id: record.id.clone(),
            fee: fmt.format_with_secondary(record.input.fee),
        }
    }
}

impl fmt::Display for TransactReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction sent. Fee: {}", self.fee)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxView {
    pub id: String,
    pub reward: bool,
    pub from: String,
    pub fee: String,
    pub outputs: Vec<(String, String)>,
}

impl TxView {
    pub fn build(tx: &TransactionRecord, fmt: &AmountFormatter) -> Self {
        Self {
            id: or_placeholder(&tx.id, "n/a"),
            reward: tx.is_mining_reward(),
            from: or_placeholder(&tx.input.address, "genesis"),
            fee: fmt.format_with_secondary(tx.input.fee),
            outputs: tx
                .output
                .iter()
                .map(|(address, amount)| (address.clone(), fmt.format_with_secondary(*amount)))
                .collect(),
        }
    }
}

impl fmt::Display for TxView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.reward { "Reward" } else { "Transfer" };
        writeln!(f, "  tx: {} [{kind}]", self.id)?;
        write!(f, "    From: {} | Fee: {}", self.from, self.fee)?;
        for (address, amount) in &self.outputs {
            write!(f, "\n    -> {address}: {amount}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    pub height: u64,
    pub hash: String,
    pub txs: Vec<TxView>,
}

impl BlockView {
    pub fn build(height: u64, block: &Block, fmt: &AmountFormatter) -> Self {
        Self {
            height,
            hash: block.hash.clone(),
            txs: block.data.iter().map(|tx| TxView::build(tx, fmt)).collect(),
        }
    }
}

impl fmt::Display for BlockView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Height {}  {}  Txs: {}", self.height, self.hash, self.txs.len())?;
        for tx in &self.txs {
            write!(f, "\n{tx}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainView {
    pub block_count: usize,
    pub blocks: Vec<BlockView>,
}

impl ChainView {
    /// `block_count` is the whole chain; `matches` may be a filtered subset.
    pub fn build(block_count: usize, matches: &[BlockMatch<'_>], fmt: &AmountFormatter) -> Self {
        Self {
            block_count,
            blocks: matches
                .iter()
                .map(|found| BlockView::build(found.height, found.block, fmt))
                .collect(),
        }
    }
}

impl fmt::Display for ChainView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} blocks", self.block_count)?;
        for block in &self.blocks {
            write!(f, "\n{block}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    pub id: String,
    pub pending: bool,
    pub location: String,
    pub confirmations: Option<u64>,
    pub amount: String,
    pub fee: String,
    pub outputs: Vec<(String, String)>,
}

impl FeedRow {
    pub fn build(entry: &FeedEntry, chain_height: u64, fmt: &AmountFormatter) -> Self {
        let pending = entry.is_pending();
        let location = if pending {
            "Awaiting inclusion".to_owned()
        } else {
            let block = entry
                .block_hash
                .as_deref()
                .map(|hash| hash.chars().take(BLOCK_HASH_PREVIEW).collect::<String>())
                .unwrap_or_else(|| "n/a".to_owned());
            format!("Height {} | Block {block}", entry.height.unwrap_or_default())
        };
        Self {
            id: entry.id.clone().filter(|id| !id.is_empty()).unwrap_or_else(|| "n/a".to_owned()),
            pending,
            location,
            confirmations: (!pending).then(|| entry.confirmations(chain_height)),
            amount: fmt.format_with_secondary(entry.total_output()),
            fee: fmt.format_with_secondary(entry.fee),
            outputs: entry
                .output
                .iter()
                .map(|(address, amount)| (address.clone(), fmt.format_with_secondary(*amount)))
                .collect(),
        }
    }
}

impl fmt::Display for FeedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.pending { "Pending" } else { "Confirmed" };
        write!(f, "  tx: {} [{status}] {}", self.id, self.location)?;
        if let Some(confirmations) = self.confirmations {
            write!(f, " | Confirmations: {confirmations}")?;
        }
        write!(f, "\n    Amount: {} | Fee: {}", self.amount, self.fee)?;
        if self.outputs.is_empty() {
            write!(f, "\n    No outputs")?;
        }
        for (address, amount) in &self.outputs {
            write!(f, "\n    -> {address}: {amount}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub height: u64,
    pub pending: Vec<FeedRow>,
    pub confirmed: Vec<FeedRow>,
}

impl FeedView {
    pub fn build(feed: &TransactionsFeed, fmt: &AmountFormatter) -> Self {
        let rows = |entries: &[FeedEntry]| -> Vec<FeedRow> {
            entries.iter().map(|entry| FeedRow::build(entry, feed.height, fmt)).collect()
        };
        Self {
            height: feed.height,
            pending: rows(&feed.mempool),
            confirmed: rows(&feed.confirmed),
        }
    }
}

impl fmt::Display for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mempool: {} pending", self.pending.len())?;
        if self.pending.is_empty() {
            writeln!(f, "  No mempool found.")?;
        }
        for row in &self.pending {
            writeln!(f, "{row}")?;
        }
        write!(f, "Confirmed: {} recent", self.confirmed.len())?;
        if self.confirmed.is_empty() {
            write!(f, "\n  No confirmed found.")?;
        }
        for row in &self.confirmed {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigView {
    pub config: NodeConfig,
    pub display_mode: DisplayMode,
    pub amount_label: String,
}

impl ConfigView {
    pub fn build(config: &NodeConfig, fmt: &AmountFormatter) -> Self {
        Self {
            config: config.clone(),
            display_mode: fmt.mode(),
            amount_label: fmt.amount_label(),
        }
    }
}

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(f, "Auto mine:        {}", c.auto_mine)?;
        writeln!(f, "Miner name:       {}", or_placeholder(&c.miner_name, "-"))?;
        writeln!(f, "Miner address:    {}", or_placeholder(&c.miner_address, "-"))?;
        writeln!(f, "Default wallet:   {}", or_placeholder(&c.default_wallet_address, "-"))?;
        writeln!(f, "Refresh interval: {}s", c.refresh_interval_seconds)?;
        writeln!(f, "Coin:             {} = {} {}", c.coin_name, c.units_per_coin, c.unit_name)?;
        write!(f, "Display mode:     {} ({})", self.display_mode, self.amount_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_api_types::{MINING_REWARD_ADDRESS, TransactionInput};
    use lc_storage::WalletEntry;
    use std::collections::BTreeMap;

    fn fmt(mode: DisplayMode) -> AmountFormatter {
        let config = NodeConfig {
            coin_name: "PYTH".to_owned(),
            unit_name: "pipu".to_owned(),
            units_per_coin: 100,
            ..NodeConfig::default()
        };
        AmountFormatter::new(&config, mode)
    }

    fn item(address: &str, private_key: &str, balance: u64) -> WalletListItem {
        WalletListItem {
            entry: WalletEntry {
                alias: "Main".to_owned(),
                address: address.to_owned(),
                public_key: "pk".to_owned(),
                private_key: private_key.to_owned(),
            },
            balance,
        }
    }

    #[test]
    fn wallet_list_rerenders_in_either_mode() {
        let snapshot = Snapshot {
            items: vec![item("a", "sk", 250), item("b", "", 50)],
            total: 300,
        };

        let coin = WalletListView::build(&snapshot, &fmt(DisplayMode::Coin));
        assert_eq!(coin.rows[0].balance, "2.5 PYTH");
        assert_eq!(coin.total, "3 PYTH");
        assert!(!coin.rows[1].can_activate);

        let unit = WalletListView::build(&snapshot, &fmt(DisplayMode::Unit));
        assert_eq!(unit.total, "300 pipu");
        assert!(unit.to_string().ends_with("Total: 300 pipu"));
    }

    #[test]
    fn detail_without_key_disables_activation() {
        let view = WalletDetailView::build(&item("a", "", 250), &fmt(DisplayMode::Coin));
        assert_eq!(view.private_key, MISSING_PRIVATE_KEY);
        assert!(!view.can_activate);
        assert_eq!(view.balance, "2.5 PYTH (250 pipu)");
    }

    #[test]
    fn detail_debug_hides_key() {
        let view = WalletDetailView::build(&item("a", "very-secret", 1), &fmt(DisplayMode::Coin));
        assert!(!format!("{view:?}").contains("very-secret"));
        assert!(view.to_string().contains("very-secret"));
    }

    #[test]
    fn fee_estimate_texts() {
        let fmt = fmt(DisplayMode::Coin);
        assert_eq!(FeeEstimate::Incomplete.describe(&fmt), "Fee: -");
        assert_eq!(FeeEstimate::Unavailable.describe(&fmt), "Fee: n/a");
        let quote = FeeEstimate::Quote(FeeQuote {
            fee: 25,
            total_required: 125,
            balance: 100,
            exceeds_balance: true,
        });
        assert_eq!(
            quote.describe(&fmt),
            "Fee: 0.25 PYTH (25 pipu) | Total: 1.25 PYTH (125 pipu) (exceeds balance)"
        );
    }

    #[test]
    fn reward_transactions_are_labelled() {
        let tx = TransactionRecord {
            id: String::new(),
            input: TransactionInput {
                address: MINING_REWARD_ADDRESS.to_owned(),
                ..TransactionInput::default()
            },
            output: BTreeMap::from([("miner".to_owned(), 5_000)]),
        };
        let view = TxView::build(&tx, &fmt(DisplayMode::Unit));
        assert!(view.reward);
        assert_eq!(view.id, "n/a");
        assert_eq!(view.outputs, vec![("miner".to_owned(), "5,000 pipu (50 PYTH)".to_owned())]);
        assert!(view.to_string().contains("[Reward]"));
    }

    #[test]
    fn feed_rows_count_confirmations() {
        let feed = TransactionsFeed {
            mempool: vec![FeedEntry {
                id: Some("p1".to_owned()),
                status: "mempool".to_owned(),
                ..FeedEntry::default()
            }],
            confirmed: vec![FeedEntry {
                id: Some("c1".to_owned()),
                status: "confirmed".to_owned(),
                height: Some(7),
                block_hash: Some("0123456789abcdef".to_owned()),
                output: BTreeMap::from([("x".to_owned(), 100), ("y".to_owned(), 50)]),
                fee: 10,
                ..FeedEntry::default()
            }],
            height: 10,
        };

        let view = FeedView::build(&feed, &fmt(DisplayMode::Coin));
        assert_eq!(view.pending[0].confirmations, None);
        assert_eq!(view.pending[0].location, "Awaiting inclusion");
        let confirmed = &view.confirmed[0];
        assert_eq!(confirmed.confirmations, Some(3));
        assert_eq!(confirmed.location, "Height 7 | Block 0123456789ab");
        assert_eq!(confirmed.amount, "1.5 PYTH (150 pipu)");
    }

    #[test]
    fn config_view_shows_amount_label() {
        let config = NodeConfig::default();
        let view = ConfigView::build(&config, &fmt(DisplayMode::Unit));
        assert_eq!(view.amount_label, "Amount (pipu)");
        assert!(view.to_string().contains("Default wallet:   -"));
    }
}
