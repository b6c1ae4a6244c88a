use stakeset_keepers::KeeperError;
use stakeset_store::StoreError;
use stakeset_transactions::TransactionError;
use stakeset_types::{AccountKey, Coin};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("validator {0} is already registered")]
    ValidatorAlreadyExists(AccountKey),

    #[error("validator {0} not found")]
    ValidatorNotFound(AccountKey),

    #[error("validator list not found")]
    ValidatorListNotFound,

    #[error("consensus key is already registered by {owner}")]
    ValidatorPubKeyAlreadyExists { owner: AccountKey },

    #[error("{0} cannot cover the validator deposit")]
    InsufficientDeposit(AccountKey),

    #[error("insufficient stake for {username}: need {needed}, have {available}")]
    InsufficientStake {
        username: AccountKey,
        needed: Coin,
        available: Coin,
    },

    #[error("{0} does not hold the voter duty")]
    InvalidVoterDuty(AccountKey),

    #[error("invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("invalid website: {0}")]
    InvalidWebsite(String),

    #[error("invalid voted validators: {0}")]
    InvalidVotedValidators(String),

    #[error("keeper error: {0}")]
    Keeper(KeeperError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A record that must exist by construction is missing or inconsistent.
    #[error("validator state corrupted: {0}")]
    StateCorrupted(String),
}

impl ValidatorError {
    /// Errors after which the chain must halt instead of rejecting the
    /// transaction.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::StateCorrupted(_) | Self::Store(_) => true,
            Self::Keeper(e) => e.is_fatal(),
            _ => false,
        }
    }
}

impl From<KeeperError> for ValidatorError {
    fn from(e: KeeperError) -> Self {
        match e {
            KeeperError::InsufficientStake {
                username,
                needed,
                available,
            } => Self::InsufficientStake {
                username,
                needed,
                available,
            },
            other => Self::Keeper(other),
        }
    }
}

impl From<TransactionError> for ValidatorError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::InvalidUsername(name) => Self::InvalidUsername(name),
            e @ TransactionError::InvalidWebsite { .. } => Self::InvalidWebsite(e.to_string()),
            TransactionError::InvalidVotedValidators { reason } => {
                Self::InvalidVotedValidators(reason)
            }
        }
    }
}

/// Convert back into a keeper error for a stake-hook caller, keeping fatality.
impl From<ValidatorError> for KeeperError {
    fn from(e: ValidatorError) -> Self {
        match e {
            ValidatorError::Keeper(inner) => inner,
            other => KeeperError::Hook {
                fatal: other.is_fatal(),
                reason: other.to_string(),
            },
        }
    }
}
