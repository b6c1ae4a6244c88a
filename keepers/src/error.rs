use stakeset_types::{AccountKey, Coin, Duty};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeeperError {
    #[error("account not found: {0}")]
    AccountNotFound(AccountKey),

    #[error("insufficient stake for {username}: need {needed}, have {available}")]
    InsufficientStake {
        username: AccountKey,
        needed: Coin,
        available: Coin,
    },

    #[error("{username} holds duty {current:?}, cannot take {requested:?}")]
    DutyConflict {
        username: AccountKey,
        current: Duty,
        requested: Duty,
    },

    /// A stake-change hook failed. `fatal` marks state corruption that must
    /// halt the chain.
    #[error("stake hook failed: {reason}")]
    Hook { reason: String, fatal: bool },

    #[error("{0}")]
    Other(String),
}

impl KeeperError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Hook { fatal: true, .. })
    }
}
