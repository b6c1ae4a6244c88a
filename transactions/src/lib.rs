//! Validator messages and their stateless validation.
//!
//! Message types:
//! - **Register**: become a validator candidate (or leave jail)
//! - **Revoke**: give up the validator role
//! - **Vote**: split the voter's stake across a set of validators
//! - **Update**: change a validator's published link

pub mod error;
pub mod register;
pub mod revoke;
pub mod update;
pub mod validation;
pub mod vote;

pub use error::TransactionError;
pub use register::RegisterMsg;
pub use revoke::RevokeMsg;
pub use update::UpdateMsg;
pub use validation::validate_basic;
pub use vote::VoteMsg;

use serde::{Deserialize, Serialize};
use stakeset_types::AccountKey;

/// The closed set of messages the validator module accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidatorMsg {
    Register(RegisterMsg),
    Revoke(RevokeMsg),
    Vote(VoteMsg),
    Update(UpdateMsg),
}

impl ValidatorMsg {
    /// The account that must sign this message.
    pub fn signer(&self) -> &AccountKey {
        match self {
            Self::Register(msg) => &msg.username,
            Self::Revoke(msg) => &msg.username,
            Self::Vote(msg) => &msg.username,
            Self::Update(msg) => &msg.username,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::Revoke(_) => "revoke",
            Self::Vote(_) => "vote",
            Self::Update(_) => "update",
        }
    }
}
