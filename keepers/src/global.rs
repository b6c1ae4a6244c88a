//! Global pool keeper trait.

use crate::KeeperError;
use stakeset_types::Coin;

/// Bookkeeping for the validator inflation pool.
pub trait GlobalKeeper {
    /// Amount to distribute to validators for the current inflation period.
    fn get_validator_hourly_inflation(&self) -> Result<Coin, KeeperError>;

    /// Return slashed stake to the validator inflation pool.
    fn add_to_validator_inflation_pool(&self, amount: Coin) -> Result<(), KeeperError>;
}
