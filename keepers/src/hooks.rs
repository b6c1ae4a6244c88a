//! Stake-change notifications.

use crate::KeeperError;
use stakeset_types::AccountKey;

/// Called by the staking ledger after a user's stake changes, so vote
/// weights derived from that stake can follow.
pub trait StakingHooks {
    fn after_adding_stake(&self, username: &AccountKey) -> Result<(), KeeperError>;

    fn after_subtracting_stake(&self, username: &AccountKey) -> Result<(), KeeperError>;

    fn after_slashing(&self, username: &AccountKey) -> Result<(), KeeperError>;
}
