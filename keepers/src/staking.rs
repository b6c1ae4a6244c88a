//! Staking keeper trait.

use crate::KeeperError;
use stakeset_types::{AccountKey, Coin, Duty};

/// The generic staking ledger: stake balances, duties, slashing, interest.
pub trait StakingKeeper {
    /// Current staked amount of `username`.
    fn get_lino_stake(&self, username: &AccountKey) -> Result<Coin, KeeperError>;

    fn get_voter_duty(&self, username: &AccountKey) -> Result<Duty, KeeperError>;

    /// Switch `username` to `duty`, freezing `frozen` of its stake.
    fn assign_duty(&self, username: &AccountKey, duty: Duty, frozen: Coin)
        -> Result<(), KeeperError>;

    /// Release the current duty; frozen stake returns after `pending_sec`.
    fn unassign_duty(&self, username: &AccountKey, pending_sec: i64) -> Result<(), KeeperError>;

    /// Slash up to `amount` of stake and return the amount actually taken.
    ///
    /// Implementations may call [`crate::StakingHooks::after_slashing`]
    /// before returning.
    fn slash_stake(&self, username: &AccountKey, amount: Coin) -> Result<Coin, KeeperError>;

    fn claim_interest(&self, username: &AccountKey) -> Result<(), KeeperError>;
}
