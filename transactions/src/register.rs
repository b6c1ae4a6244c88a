//! Register message.

use serde::{Deserialize, Serialize};
use stakeset_types::{AccountKey, PublicKey};

/// Register `username` as a validator candidate with a consensus key.
///
/// On a jailed username this is the way back out of jail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMsg {
    pub username: AccountKey,
    pub pub_key: PublicKey,
    #[serde(default)]
    pub link: String,
}

impl RegisterMsg {
    pub fn new(username: impl Into<AccountKey>, pub_key: PublicKey, link: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            pub_key,
            link: link.into(),
        }
    }
}
