//! Account keeper trait.

use crate::KeeperError;
use stakeset_types::{AccountKey, Coin};

/// Spendable account balances.
pub trait AccountKeeper {
    fn add_coin_to_username(&self, username: &AccountKey, amount: Coin) -> Result<(), KeeperError>;
}
