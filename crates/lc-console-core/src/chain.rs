use lc_api_types::{Block, TransactionRecord};

/// A block together with its position in the chain, genesis being 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch<'a> {
    pub height: u64,
    pub block: &'a Block,
}

/// Blocks matching `query`, newest first.
///
/// A block matches on its own hash or on any transaction's id, input address
/// or output address, case-insensitively. A blank query matches everything.
pub fn search_blocks<'a>(chain: &'a [Block], query: &str) -> Vec<BlockMatch<'a>> {
    let query = query.trim().to_lowercase();
    chain
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, block)| query.is_empty() || block_matches(block, &query))
        .map(|(height, block)| BlockMatch {
            height: height as u64,
            block,
        })
        .collect()
}

fn block_matches(block: &Block, query: &str) -> bool {
    contains(&block.hash, query) || block.data.iter().any(|tx| tx_matches(tx, query))
}

fn tx_matches(tx: &TransactionRecord, query: &str) -> bool {
    contains(&tx.id, query)
        || contains(&tx.input.address, query)
        || tx.output.keys().any(|address| contains(address, query))
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_api_types::{MINING_REWARD_ADDRESS, TransactionInput};
    use std::collections::BTreeMap;

    fn tx(id: &str, from: &str, to: &str) -> TransactionRecord {
        TransactionRecord {
            id: id.to_owned(),
            input: TransactionInput {
                address: from.to_owned(),
                ..TransactionInput::default()
            },
            output: BTreeMap::from([(to.to_owned(), 10)]),
        }
    }

    fn chain() -> Vec<Block> {
        vec![
            Block {
                hash: "genesis_hash".to_owned(),
                ..Block::default()
            },
            Block {
                hash: "AAA111".to_owned(),
                data: vec![tx("t1", MINING_REWARD_ADDRESS, "minerAddr")],
                ..Block::default()
            },
            Block {
                hash: "bbb222".to_owned(),
                data: vec![tx("T2", "alice", "Bob")],
                ..Block::default()
            },
        ]
    }

    fn heights(matches: &[BlockMatch<'_>]) -> Vec<u64> {
        matches.iter().map(|m| m.height).collect()
    }

    #[test]
    fn blank_query_lists_everything_newest_first() {
        let chain = chain();
        assert_eq!(heights(&search_blocks(&chain, "  ")), vec![2, 1, 0]);
    }

    #[test]
    fn matches_hashes_ids_and_addresses_ignoring_case() {
        let chain = chain();
        assert_eq!(heights(&search_blocks(&chain, "aaa")), vec![1]);
        assert_eq!(heights(&search_blocks(&chain, "t2")), vec![2]);
        assert_eq!(heights(&search_blocks(&chain, "ALICE")), vec![2]);
        assert_eq!(heights(&search_blocks(&chain, "bob")), vec![2]);
        assert_eq!(heights(&search_blocks(&chain, "official-mining")), vec![1]);
        assert!(search_blocks(&chain, "nobody").is_empty());
    }

    #[test]
    fn heights_are_chain_positions_not_result_positions() {
        let chain = chain();
        let found = search_blocks(&chain, "minerAddr");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].height, 1);
        assert!(found[0].block.data[0].is_mining_reward());
    }
}
