use anyhow::{Context, Result};
use async_trait::async_trait;
use lc_api_types::{
    Block, ErrorResponse, FeeEstimateResponse, NodeConfig, TransactRequest, TransactionRecord, TransactionsFeed,
    WalletBalanceResponse, WalletCreateResponse, WalletImportRequest, WalletImportResponse, WalletInfoResponse,
};
use lc_node_client::{FeedQuery, NodeClient};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_NODE_URL: &str = "http://localhost:5000";

/// HTTP adapter for the ledger node's JSON API.
///
/// Reads `LEDGER_NODE_URL` from environment at construction time when no
/// endpoint is given (default: `http://localhost:5000`).
pub struct HttpNodeClient {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpNodeClient {
    pub fn new(endpoint: Option<String>) -> Result<Self> {
        let endpoint = endpoint
            .or_else(|| std::env::var("LEDGER_NODE_URL").ok())
            .unwrap_or_else(|| DEFAULT_NODE_URL.to_string());
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, op: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("{op} transport"))?;
        decode(response, op).await
    }
}

/// Turn a node response into `T`, lifting `{"error": ...}` bodies into the
/// error message.
async fn decode<T: DeserializeOwned>(response: reqwest::Response, op: &str) -> Result<T> {
    let status = response.status();
    let text = response.text().await.with_context(|| format!("{op} read body"))?;

    if !status.is_success() {
        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&text) {
            anyhow::bail!("{op} HTTP {status}: {}", err.error);
        }
        anyhow::bail!("{op} HTTP {status}: {text}");
    }

    serde_json::from_str(&text).with_context(|| format!("{op} parse"))
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn wallet_info(&self) -> Result<WalletInfoResponse> {
        self.get_json("/wallet/info", "wallet_info").await
    }

    async fn wallet_create(&self) -> Result<WalletCreateResponse> {
        let response = self
            .http
            .post(self.url("/wallet/create"))
            .send()
            .await
            .context("wallet_create transport")?;
        decode(response, "wallet_create").await
    }

    async fn wallet_import(&self, req: WalletImportRequest) -> Result<WalletImportResponse> {
        let response = self
            .http
            .post(self.url("/wallet/import"))
            .json(&req)
            .send()
            .await
            .context("wallet_import transport")?;
        decode(response, "wallet_import").await
    }

    async fn wallet_balance(&self, address: &str) -> Result<u64> {
        let response = self
            .http
            .get(self.url("/wallet/balance"))
            .query(&[("address", address)])
            .send()
            .await
            .context("wallet_balance transport")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            // Unknown address reads as an empty wallet.
            debug!(address, "balance lookup missed");
            return Ok(0);
        }

        let body: WalletBalanceResponse = decode(response, "wallet_balance").await?;
        Ok(body.balance)
    }

    async fn wallet_transact(&self, recipient: &str, amount: u64) -> Result<TransactionRecord> {
        let body = TransactRequest {
            recipient: recipient.to_owned(),
            amount,
        };
        let response = self
            .http
            .post(self.url("/wallet/transact"))
            .json(&body)
            .send()
            .await
            .context("wallet_transact transport")?;
        decode(response, "wallet_transact").await
    }

    async fn estimate_fee(&self, recipient: &str, amount: u64) -> Result<FeeEstimateResponse> {
        let amount = amount.to_string();
        let response = self
            .http
            .get(self.url("/wallet/estimate_fee"))
            .query(&[("amount", amount.as_str()), ("recipient", recipient)])
            .send()
            .await
            .context("estimate_fee transport")?;
        decode(response, "estimate_fee").await
    }

    async fn get_config(&self) -> Result<NodeConfig> {
        self.get_json("/config", "get_config").await
    }

    async fn save_config(&self, config: &NodeConfig) -> Result<NodeConfig> {
        let response = self
            .http
            .post(self.url("/config"))
            .json(config)
            .send()
            .await
            .context("save_config transport")?;
        decode(response, "save_config").await
    }

    async fn blockchain(&self) -> Result<Vec<Block>> {
        self.get_json("/blockchain", "blockchain").await
    }

    async fn mine(&self) -> Result<Block> {
        self.get_json("/blockchain/mine", "mine").await
    }

    async fn transactions_feed(&self, query: &FeedQuery) -> Result<TransactionsFeed> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(address) = query.address.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            params.push(("address", address.to_owned()));
        }
        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            params.push(("limit", limit.to_string()));
        }

        let response = self
            .http
            .get(self.url("/transactions/feed"))
            .query(&params)
            .send()
            .await
            .context("transactions_feed transport")?;
        decode(response, "transactions_feed").await
    }
}
