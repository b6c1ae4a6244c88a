//! Vote message.

use serde::{Deserialize, Serialize};
use stakeset_types::AccountKey;

/// Replace the voter's election votes with an even split of its stake
/// across `voted_validators`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteMsg {
    pub username: AccountKey,
    pub voted_validators: Vec<AccountKey>,
}

impl VoteMsg {
    pub fn new<I, K>(username: impl Into<AccountKey>, voted_validators: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<AccountKey>,
    {
        Self {
            username: username.into(),
            voted_validators: voted_validators.into_iter().map(Into::into).collect(),
        }
    }
}
