use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("link is {len} bytes, limit is {limit}")]
    InvalidWebsite { len: usize, limit: usize },

    #[error("invalid voted validators: {reason}")]
    InvalidVotedValidators { reason: String },
}
