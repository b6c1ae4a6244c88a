//! Nullable account keeper.

use stakeset_keepers::{AccountKeeper, KeeperError};
use stakeset_types::{AccountKey, Coin};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Records every credit and keeps running balances.
pub struct NullAccounts {
    balances: Mutex<BTreeMap<AccountKey, Coin>>,
    payouts: Mutex<Vec<(AccountKey, Coin)>>,
    fail_for: Mutex<Option<AccountKey>>,
}

impl NullAccounts {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(BTreeMap::new()),
            payouts: Mutex::new(Vec::new()),
            fail_for: Mutex::new(None),
        }
    }

    pub fn balance(&self, username: &AccountKey) -> Coin {
        self.balances
            .lock()
            .unwrap()
            .get(username)
            .copied()
            .unwrap_or(Coin::ZERO)
    }

    /// Every credit in call order.
    pub fn payouts(&self) -> Vec<(AccountKey, Coin)> {
        self.payouts.lock().unwrap().clone()
    }

    /// Make credits to `username` fail from now on.
    pub fn fail_for(&self, username: Option<AccountKey>) {
        *self.fail_for.lock().unwrap() = username;
    }
}

impl Default for NullAccounts {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountKeeper for NullAccounts {
    fn add_coin_to_username(&self, username: &AccountKey, amount: Coin) -> Result<(), KeeperError> {
        if self.fail_for.lock().unwrap().as_ref() == Some(username) {
            return Err(KeeperError::AccountNotFound(username.clone()));
        }
        *self
            .balances
            .lock()
            .unwrap()
            .entry(username.clone())
            .or_insert(Coin::ZERO) += amount;
        self.payouts.lock().unwrap().push((username.clone(), amount));
        Ok(())
    }
}
