//! Client-side state of the ledger console: the local wallet cache, its
//! reconciliation with the node, and amount rendering.

pub mod amount;
pub mod balance;
pub mod chain;
pub mod config;
pub mod console;
pub mod coordinator;
pub mod error;
pub mod render;
pub mod sync;

#[cfg(test)]
mod fakes;

pub use amount::{AmountFormatter, DisplayMode};
pub use balance::BalanceAggregator;
pub use chain::{BlockMatch, search_blocks};
pub use config::{ConfigState, ConfigUpdate};
pub use console::{AmountDisplays, Command, Console, IMPORTED_WALLET_ALIAS, NEW_WALLET_ALIAS, Outcome};
pub use coordinator::{Snapshot, WalletListCoordinator, WalletListItem};
pub use error::{ConsoleError, ConsoleResult};
pub use render::{FeeEstimate, FeeQuote};
pub use sync::{ActiveWallet, NODE_WALLET_ALIAS, SyncController};
