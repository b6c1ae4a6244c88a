//! Staking hooks that keep election votes in step with stake.

use std::sync::Arc;

use stakeset_keepers::{KeeperError, StakingHooks};
use stakeset_store::ValidatorStore;
use stakeset_types::AccountKey;
use tracing::debug;

use crate::ValidatorManager;

/// Re-splits a user's election votes whenever the staking ledger reports a
/// change to that user's stake.
pub struct ValidatorHooks {
    manager: Arc<ValidatorManager>,
    store: Arc<dyn ValidatorStore>,
}

impl ValidatorHooks {
    pub fn new(manager: Arc<ValidatorManager>, store: Arc<dyn ValidatorStore>) -> Self {
        Self { manager, store }
    }

    fn stake_changed(&self, username: &AccountKey, event: &'static str) -> Result<(), KeeperError> {
        debug!(%username, event, "stake changed");
        self.manager
            .on_stake_change(self.store.as_ref(), username)
            .map_err(KeeperError::from)
    }
}

impl StakingHooks for ValidatorHooks {
    fn after_adding_stake(&self, username: &AccountKey) -> Result<(), KeeperError> {
        self.stake_changed(username, "add")
    }

    fn after_subtracting_stake(&self, username: &AccountKey) -> Result<(), KeeperError> {
        self.stake_changed(username, "subtract")
    }

    fn after_slashing(&self, username: &AccountKey) -> Result<(), KeeperError> {
        self.stake_changed(username, "slash")
    }
}
