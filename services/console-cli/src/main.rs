use clap::{Parser, Subcommand};
use lc_console_core::render::WalletListView;
use lc_console_core::{Command, Console, ConfigUpdate, DisplayMode};
use lc_node_http::HttpNodeClient;
use lc_storage::{InMemoryStore, KeyValueStore, RocksDbStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ledger-console", about = "Wallet console for a ledger node")]
struct Cli {
    /// Base URL of the ledger node.
    #[arg(long, env = "LEDGER_NODE_URL")]
    node_url: Option<String>,

    /// Directory for the local wallet cache.
    #[arg(long, default_value = "./console_data", env = "LEDGER_CONSOLE_DATA_DIR")]
    data_dir: PathBuf,

    /// Keep the wallet cache in memory; nothing survives the process.
    #[arg(long)]
    in_memory: bool,

    /// Primary amount representation: "coin" or "unit".
    #[arg(long, default_value = "coin", env = "LEDGER_CONSOLE_DISPLAY")]
    display: DisplayMode,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List stored wallets with their balances.
    Wallets,
    /// Show one stored wallet, keys included.
    Show { address: String },
    /// Pull the node's active wallet.
    Active,
    /// Create a wallet on the node and store it.
    Create,
    /// Import a wallet from its private key.
    Import {
        #[arg(env = "LEDGER_IMPORT_KEY", hide_env_values = true)]
        private_key: String,
        /// Make it the node's active wallet.
        #[arg(long)]
        set_active: bool,
        #[arg(long)]
        alias: Option<String>,
    },
    /// Make a stored wallet the node's active one.
    Activate { address: String },
    /// Forget a stored wallet.
    Remove { address: String },
    Rename { address: String, alias: String },
    /// Send from the active wallet. The amount is read in the display mode.
    Send { recipient: String, amount: String },
    /// Estimate the fee of a transfer.
    Fee { recipient: String, amount: String },
    /// Mine a block.
    Mine,
    /// Show the chain, optionally filtered.
    Chain {
        #[arg(long)]
        search: Option<String>,
    },
    /// Pending and recently confirmed transactions.
    Feed {
        #[arg(long)]
        address: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Fetch and show the node configuration.
    Config,
    /// Change the node configuration.
    SetConfig {
        #[arg(long)]
        auto_mine: Option<bool>,
        #[arg(long)]
        miner_name: Option<String>,
        #[arg(long)]
        miner_address: Option<String>,
        /// Seconds between automatic refreshes; 0 disables them.
        #[arg(long)]
        refresh_interval: Option<u64>,
    },
    /// Show the node alias, or set it.
    Alias { value: Option<String> },
    /// Keep refreshing on the node's interval until Ctrl-C.
    Watch,
}

impl Action {
    fn into_command(self) -> Option<Command> {
        let command = match self {
            Action::Wallets => Command::Wallets,
            Action::Show { address } => Command::WalletDetail { address },
            Action::Active => Command::ActiveWallet,
            Action::Create => Command::CreateWallet,
            Action::Import {
                private_key,
                set_active,
                alias,
            } => Command::ImportWallet {
                private_key,
                set_active,
                alias,
            },
            Action::Activate { address } => Command::SetActive { address },
            Action::Remove { address } => Command::RemoveWallet { address },
            Action::Rename { address, alias } => Command::RenameWallet { address, alias },
            Action::Send { recipient, amount } => Command::Transact { recipient, amount },
            Action::Fee { recipient, amount } => Command::EstimateFee { recipient, amount },
            Action::Mine => Command::Mine,
            Action::Chain { search } => Command::Chain { query: search },
            Action::Feed { address, limit } => Command::Feed {
                address,
                limit: Some(limit),
            },
            Action::Config => Command::LoadConfig,
            Action::SetConfig {
                auto_mine,
                miner_name,
                miner_address,
                refresh_interval,
            } => Command::SaveConfig(ConfigUpdate {
                auto_mine,
                miner_name,
                miner_address,
                refresh_interval_seconds: refresh_interval,
            }),
            Action::Alias { value: None } => Command::NodeAlias,
            Action::Alias { value: Some(value) } => Command::SetNodeAlias(value),
            Action::Watch => return None,
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let node = Arc::new(HttpNodeClient::new(cli.node_url)?);
    info!(endpoint = node.endpoint(), "using ledger node");

    let kv: Arc<dyn KeyValueStore> = if cli.in_memory {
        Arc::new(InMemoryStore::new())
    } else {
        let path = cli.data_dir.to_string_lossy();
        info!(path = %path, "opening wallet cache");
        Arc::new(RocksDbStore::open_default(&path)?)
    };

    let console = Console::new(node, kv);
    console.config().set_display_mode(cli.display);

    match cli.action.into_command() {
        Some(command) => {
            // Amount labels come from the node; fall back to defaults offline.
            if let Err(err) = console.config().load().await {
                warn!("using default amount labels: {err}");
            }
            let outcome = console.dispatch(command).await?;
            println!("{outcome}");
        }
        None => watch(&console).await?,
    }

    Ok(())
}

async fn watch(console: &Console) -> anyhow::Result<()> {
    console.initialize().await;
    if !console.is_auto_refreshing() {
        warn!("node has auto refresh disabled; showing current state only");
    }
    println!("{}", console.render_amounts());

    let mut wallets = console.subscribe_wallets();
    let mut online = console.subscribe_online();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            changed = wallets.changed() => {
                changed?;
                let snapshot = wallets.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    println!("{}", WalletListView::build(&snapshot, &console.formatter()));
                }
            }
            changed = online.changed() => {
                changed?;
                let now_online = *online.borrow_and_update();
                info!(online = now_online, "node connectivity changed");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ledger-console").chain(args.iter().copied())).expect("valid arguments")
    }

    #[test]
    fn import_maps_to_command() {
        let cli = parse(&["--in-memory", "import", "k1", "--set-active", "--alias", "Main"]);
        assert!(cli.in_memory);
        assert_eq!(
            cli.action.into_command(),
            Some(Command::ImportWallet {
                private_key: "k1".to_owned(),
                set_active: true,
                alias: Some("Main".to_owned()),
            })
        );
    }

    #[test]
    fn display_mode_flag_parses() {
        let cli = parse(&["--display", "unit", "wallets"]);
        assert_eq!(cli.display, DisplayMode::Unit);
        assert_eq!(cli.action.into_command(), Some(Command::Wallets));
    }

    #[test]
    fn set_config_collects_only_given_fields() {
        let cli = parse(&["set-config", "--refresh-interval", "0"]);
        assert_eq!(
            cli.action.into_command(),
            Some(Command::SaveConfig(ConfigUpdate {
                refresh_interval_seconds: Some(0),
                ..ConfigUpdate::default()
            }))
        );
    }

    #[test]
    fn watch_is_handled_by_the_binary() {
        assert_eq!(parse(&["watch"]).action.into_command(), None);
    }

    #[test]
    fn feed_keeps_default_limit() {
        let cli = parse(&["feed"]);
        assert_eq!(
            cli.action.into_command(),
            Some(Command::Feed {
                address: None,
                limit: Some(50),
            })
        );
    }
}
