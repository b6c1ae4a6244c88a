//! Nullable global pool keeper.

use stakeset_keepers::{GlobalKeeper, KeeperError};
use stakeset_types::Coin;
use std::sync::Mutex;

/// A fixed per-period inflation amount plus a running inflation pool.
pub struct NullGlobal {
    hourly_inflation: Mutex<Coin>,
    inflation_pool: Mutex<Coin>,
}

impl NullGlobal {
    pub fn new(hourly_inflation: Coin) -> Self {
        Self {
            hourly_inflation: Mutex::new(hourly_inflation),
            inflation_pool: Mutex::new(Coin::ZERO),
        }
    }

    /// Total credited through [`GlobalKeeper::add_to_validator_inflation_pool`].
    pub fn inflation_pool(&self) -> Coin {
        *self.inflation_pool.lock().unwrap()
    }
}

impl Default for NullGlobal {
    fn default() -> Self {
        Self::new(Coin::ZERO)
    }
}

impl GlobalKeeper for NullGlobal {
    fn get_validator_hourly_inflation(&self) -> Result<Coin, KeeperError> {
        Ok(*self.hourly_inflation.lock().unwrap())
    }

    fn add_to_validator_inflation_pool(&self, amount: Coin) -> Result<(), KeeperError> {
        *self.inflation_pool.lock().unwrap() += amount;
        Ok(())
    }
}
