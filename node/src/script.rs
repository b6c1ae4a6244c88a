//! JSON block scripts for replaying validator activity against a node.
//!
//! ```json
//! { "blocks": [
//!     { "absent": ["bob"], "byzantine": [],
//!       "stake": [{ "username": "carol", "delta_lino": 5000 }],
//!       "txs": [{ "type": "vote", "username": "carol", "voted_validators": ["alice"] }],
//!       "distribute_inflation": true } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use stakeset_transactions::ValidatorMsg;
use stakeset_types::{AccountKey, Coin};
use stakeset_validator::ValidatorUpdate;
use tracing::debug;

use crate::app::{TxResult, ValidatorApp};
use crate::NodeError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlockScript {
    pub blocks: Vec<ScriptBlock>,
}

/// One block. Names in `absent` and `byzantine` are resolved against the
/// committing set as it stands before the block begins.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScriptBlock {
    #[serde(default)]
    pub absent: Vec<AccountKey>,
    #[serde(default)]
    pub byzantine: Vec<AccountKey>,
    /// Stake moves applied after begin-block, before the transactions.
    #[serde(default)]
    pub stake: Vec<StakeChange>,
    #[serde(default)]
    pub txs: Vec<ValidatorMsg>,
    #[serde(default)]
    pub distribute_inflation: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeChange {
    pub username: AccountKey,
    pub delta_lino: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResult {
    pub height: u64,
    pub tx_results: Vec<TxResult>,
    pub validator_updates: Vec<ValidatorUpdate>,
}

impl BlockScript {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, NodeError> {
        serde_json::from_str(s).map_err(|e| NodeError::Script(e.to_string()))
    }

    /// Run every block in order, stopping at the first error.
    pub fn replay(&self, app: &mut ValidatorApp) -> Result<Vec<BlockResult>, NodeError> {
        self.blocks.iter().map(|block| block.apply(app)).collect()
    }
}

impl ScriptBlock {
    pub fn apply(&self, app: &mut ValidatorApp) -> Result<BlockResult, NodeError> {
        let height = app.height();
        let vote_infos = app.vote_infos(&self.absent)?;
        let evidence = app.evidence_for(&self.byzantine)?;
        app.begin_block(&vote_infos, &evidence)?;

        for change in &self.stake {
            app.change_stake(&change.username, Coin::from_lino(change.delta_lino))?;
        }

        let mut tx_results = Vec::with_capacity(self.txs.len());
        for tx in &self.txs {
            tx_results.push(app.deliver_tx(tx)?);
        }

        if self.distribute_inflation {
            app.distribute_inflation()?;
        }

        let validator_updates = app.end_block()?;
        debug!(height, txs = tx_results.len(), updates = validator_updates.len(), "block applied");
        Ok(BlockResult {
            height,
            tx_results,
            validator_updates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_blocks() {
        let script = BlockScript::from_json_str(
            r#"{ "blocks": [
                {},
                { "absent": ["bob"], "distribute_inflation": true,
                  "txs": [{ "type": "revoke", "username": "bob" }] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(script.blocks.len(), 2);
        assert!(script.blocks[0].txs.is_empty());
        assert!(!script.blocks[0].distribute_inflation);
        assert_eq!(script.blocks[1].absent, vec![AccountKey::from("bob")]);
        assert!(matches!(script.blocks[1].txs[0], ValidatorMsg::Revoke(_)));
    }

    #[test]
    fn malformed_script_is_a_script_error() {
        assert!(matches!(
            BlockScript::from_json_str(r#"{ "blocks": 3 }"#),
            Err(NodeError::Script(_))
        ));
    }
}
