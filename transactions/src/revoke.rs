//! Revoke message.

use serde::{Deserialize, Serialize};
use stakeset_types::AccountKey;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeMsg {
    pub username: AccountKey,
}

impl RevokeMsg {
    pub fn new(username: impl Into<AccountKey>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
