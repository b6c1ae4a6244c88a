//! Update message.

use serde::{Deserialize, Serialize};
use stakeset_types::AccountKey;

/// Replace a validator's published link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMsg {
    pub username: AccountKey,
    pub link: String,
}

impl UpdateMsg {
    pub fn new(username: impl Into<AccountKey>, link: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            link: link.into(),
        }
    }
}
