use anyhow::Result;
use async_trait::async_trait;
use lc_api_types::{
    Block, FeeEstimateResponse, NodeConfig, TransactionRecord, TransactionsFeed, WalletCreateResponse,
    WalletImportRequest, WalletImportResponse, WalletInfoResponse,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub address: Option<String>,
    pub limit: Option<u32>,
}

/// Everything the console asks of the remote ledger node.
///
/// Every method is a suspension point. Transport failures and non-success
/// responses come back as errors; the caller decides whether to absorb them.
#[async_trait]
pub trait NodeClient: Send + Sync {
    async fn wallet_info(&self) -> Result<WalletInfoResponse>;
    async fn wallet_create(&self) -> Result<WalletCreateResponse>;
    async fn wallet_import(&self, req: WalletImportRequest) -> Result<WalletImportResponse>;
    /// Balance of an arbitrary address in base units. A miss is `0`, not an error.
    async fn wallet_balance(&self, address: &str) -> Result<u64>;
    async fn wallet_transact(&self, recipient: &str, amount: u64) -> Result<TransactionRecord>;
    async fn estimate_fee(&self, recipient: &str, amount: u64) -> Result<FeeEstimateResponse>;
    async fn get_config(&self) -> Result<NodeConfig>;
    async fn save_config(&self, config: &NodeConfig) -> Result<NodeConfig>;
    async fn blockchain(&self) -> Result<Vec<Block>>;
    async fn mine(&self) -> Result<Block>;
    async fn transactions_feed(&self, query: &FeedQuery) -> Result<TransactionsFeed>;
}
