use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

use crate::KeyValueStore;

pub const NODE_ALIAS_KEY: &str = "node_alias";
pub const DEFAULT_NODE_ALIAS: &str = "Unnamed";

/// Free-text label the operator gives the node this console talks to.
pub struct NodeAliasStore {
    kv: Arc<dyn KeyValueStore>,
}

impl NodeAliasStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn get(&self) -> String {
        match self.kv.get(NODE_ALIAS_KEY) {
            Ok(Some(alias)) if !alias.trim().is_empty() => alias,
            Ok(_) => DEFAULT_NODE_ALIAS.to_owned(),
            Err(err) => {
                warn!("failed to read node alias: {err:#}");
                DEFAULT_NODE_ALIAS.to_owned()
            }
        }
    }

    /// Store the trimmed alias, or the default when it is blank. Returns
    /// what was stored.
    pub fn set(&self, alias: &str) -> Result<String> {
        let alias = match alias.trim() {
            "" => DEFAULT_NODE_ALIAS,
            trimmed => trimmed,
        };
        self.kv.set(NODE_ALIAS_KEY, alias)?;
        Ok(alias.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;

    #[test]
    fn defaults_when_absent_or_blank() -> Result<()> {
        let aliases = NodeAliasStore::new(Arc::new(InMemoryStore::new()));
        assert_eq!(aliases.get(), DEFAULT_NODE_ALIAS);

        assert_eq!(aliases.set("   ")?, DEFAULT_NODE_ALIAS);
        assert_eq!(aliases.get(), DEFAULT_NODE_ALIAS);
        Ok(())
    }

    #[test]
    fn stores_trimmed_value() -> Result<()> {
        let kv = Arc::new(InMemoryStore::new());
        let aliases = NodeAliasStore::new(kv.clone());

        assert_eq!(aliases.set("  basement miner ")?, "basement miner");
        assert_eq!(kv.get(NODE_ALIAS_KEY)?.as_deref(), Some("basement miner"));
        assert_eq!(aliases.get(), "basement miner");
        Ok(())
    }
}
