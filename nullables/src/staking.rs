//! Nullable staking ledger with stake-change hooks.

use stakeset_keepers::{KeeperError, StakingHooks, StakingKeeper};
use stakeset_types::{AccountKey, Coin, Duty};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

#[derive(Clone, Debug, Default)]
struct StakeEntry {
    stake: Coin,
    duty: Duty,
    frozen: Coin,
}

/// An in-memory staking ledger.
///
/// Stake changes made through [`NullStaking::add_stake`],
/// [`NullStaking::subtract_stake`] and [`StakingKeeper::slash_stake`] fire
/// the registered [`StakingHooks`] after the ledger lock is released, so a
/// hook may call straight back into this ledger.
pub struct NullStaking {
    entries: Mutex<BTreeMap<AccountKey, StakeEntry>>,
    hooks: Mutex<Option<Weak<dyn StakingHooks>>>,
    interest_claims: Mutex<Vec<AccountKey>>,
    fail_interest_claims: Mutex<bool>,
    unassigned: Mutex<Vec<(AccountKey, i64)>>,
}

impl NullStaking {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            hooks: Mutex::new(None),
            interest_claims: Mutex::new(Vec::new()),
            fail_interest_claims: Mutex::new(false),
            unassigned: Mutex::new(Vec::new()),
        }
    }

    /// Register hooks. Only a weak reference is kept; the caller owns them.
    pub fn set_hooks(&self, hooks: &Arc<dyn StakingHooks>) {
        *self.hooks.lock().unwrap() = Some(Arc::downgrade(hooks));
    }

    /// Set a user's stake directly, without firing hooks.
    pub fn set_stake(&self, username: &AccountKey, stake: Coin) {
        self.entries
            .lock()
            .unwrap()
            .entry(username.clone())
            .or_default()
            .stake = stake;
    }

    pub fn set_duty(&self, username: &AccountKey, duty: Duty) {
        self.entries
            .lock()
            .unwrap()
            .entry(username.clone())
            .or_default()
            .duty = duty;
    }

    /// Frozen amount of the user's current duty.
    pub fn frozen(&self, username: &AccountKey) -> Coin {
        self.entries
            .lock()
            .unwrap()
            .get(username)
            .map(|e| e.frozen)
            .unwrap_or(Coin::ZERO)
    }

    pub fn add_stake(&self, username: &AccountKey, amount: Coin) -> Result<(), KeeperError> {
        self.entries
            .lock()
            .unwrap()
            .entry(username.clone())
            .or_default()
            .stake += amount;
        match self.hooks() {
            Some(hooks) => hooks.after_adding_stake(username),
            None => Ok(()),
        }
    }

    pub fn subtract_stake(&self, username: &AccountKey, amount: Coin) -> Result<(), KeeperError> {
        {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries
                .get_mut(username)
                .ok_or_else(|| KeeperError::AccountNotFound(username.clone()))?;
            if entry.stake < amount {
                return Err(KeeperError::InsufficientStake {
                    username: username.clone(),
                    needed: amount,
                    available: entry.stake,
                });
            }
            entry.stake -= amount;
        }
        match self.hooks() {
            Some(hooks) => hooks.after_subtracting_stake(username),
            None => Ok(()),
        }
    }

    pub fn interest_claims(&self) -> Vec<AccountKey> {
        self.interest_claims.lock().unwrap().clone()
    }

    /// Make every subsequent [`StakingKeeper::claim_interest`] fail.
    pub fn fail_interest_claims(&self, fail: bool) {
        *self.fail_interest_claims.lock().unwrap() = fail;
    }

    /// `(username, pending_sec)` for every released duty.
    pub fn unassigned(&self) -> Vec<(AccountKey, i64)> {
        self.unassigned.lock().unwrap().clone()
    }

    fn hooks(&self) -> Option<Arc<dyn StakingHooks>> {
        self.hooks.lock().unwrap().as_ref().and_then(Weak::upgrade)
    }
}

impl Default for NullStaking {
    fn default() -> Self {
        Self::new()
    }
}

impl StakingKeeper for NullStaking {
    fn get_lino_stake(&self, username: &AccountKey) -> Result<Coin, KeeperError> {
        self.entries
            .lock()
            .unwrap()
            .get(username)
            .map(|e| e.stake)
            .ok_or_else(|| KeeperError::AccountNotFound(username.clone()))
    }

    fn get_voter_duty(&self, username: &AccountKey) -> Result<Duty, KeeperError> {
        self.entries
            .lock()
            .unwrap()
            .get(username)
            .map(|e| e.duty)
            .ok_or_else(|| KeeperError::AccountNotFound(username.clone()))
    }

    fn assign_duty(
        &self,
        username: &AccountKey,
        duty: Duty,
        frozen: Coin,
    ) -> Result<(), KeeperError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .get_mut(username)
            .ok_or_else(|| KeeperError::AccountNotFound(username.clone()))?;
        if !entry.duty.is_voter() {
            return Err(KeeperError::DutyConflict {
                username: username.clone(),
                current: entry.duty,
                requested: duty,
            });
        }
        if entry.stake < frozen {
            return Err(KeeperError::InsufficientStake {
                username: username.clone(),
                needed: frozen,
                available: entry.stake,
            });
        }
        entry.duty = duty;
        entry.frozen = frozen;
        Ok(())
    }

    fn unassign_duty(&self, username: &AccountKey, pending_sec: i64) -> Result<(), KeeperError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .get_mut(username)
            .ok_or_else(|| KeeperError::AccountNotFound(username.clone()))?;
        entry.duty = Duty::Pending;
        self.unassigned
            .lock()
            .unwrap()
            .push((username.clone(), pending_sec));
        Ok(())
    }

    fn slash_stake(&self, username: &AccountKey, amount: Coin) -> Result<Coin, KeeperError> {
        let actual = {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries
                .get_mut(username)
                .ok_or_else(|| KeeperError::AccountNotFound(username.clone()))?;
            let actual = amount.min(entry.stake);
            entry.stake -= actual;
            actual
        };
        debug!(%username, slashed = %actual, "stake slashed");
        if let Some(hooks) = self.hooks() {
            hooks.after_slashing(username)?;
        }
        Ok(actual)
    }

    fn claim_interest(&self, username: &AccountKey) -> Result<(), KeeperError> {
        if *self.fail_interest_claims.lock().unwrap() {
            return Err(KeeperError::Other(format!("interest claim for {username} rejected")));
        }
        self.interest_claims.lock().unwrap().push(username.clone());
        Ok(())
    }
}
