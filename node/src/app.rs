//! The block pipeline around the validator manager.
//!
//! Per block: [`ValidatorApp::begin_block`] → [`ValidatorApp::deliver_tx`]
//! for each transaction → [`ValidatorApp::end_block`]. Inflation is paid on
//! its own tick through [`ValidatorApp::distribute_inflation`].
//!
//! A fatal validator error halts the chain; every later call returns
//! [`NodeError::Halted`].

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stakeset_keepers::StakingHooks;
use stakeset_nullables::{NullAccounts, NullGlobal, NullParams, NullStaking, NullValidatorStore};
use stakeset_store::ValidatorStore;
use stakeset_store_lmdb::{check_integrity, LmdbEnvironment, LmdbValidatorStore};
use stakeset_transactions::ValidatorMsg;
use stakeset_types::{AccountKey, Coin};
use stakeset_validator::{
    handle, Evidence, ValidatorError, ValidatorHooks, ValidatorManager, ValidatorUpdate, VoteInfo,
};
use tracing::{error, info, warn};

use crate::config::{NodeConfig, StoreBackend};
use crate::NodeError;

/// Outcome of one delivered transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TxResult {
    Accepted,
    Rejected { error: String },
}

pub struct ValidatorApp {
    manager: Arc<ValidatorManager>,
    store: Arc<dyn ValidatorStore>,
    staking: Arc<NullStaking>,
    accounts: Arc<NullAccounts>,
    _hooks: Arc<dyn StakingHooks>,
    height: u64,
    halted: Option<String>,
}

impl ValidatorApp {
    /// Open the configured store and initialise genesis if it is empty.
    pub fn open(config: &NodeConfig) -> Result<Self, NodeError> {
        let store: Arc<dyn ValidatorStore> = match config.store {
            StoreBackend::Memory => Arc::new(NullValidatorStore::new()),
            StoreBackend::Lmdb => Arc::new(open_lmdb(&config.data_dir, config.lmdb_map_size)?),
        };
        Self::with_store(config, store)
    }

    /// Build the app over an existing store.
    pub fn with_store(
        config: &NodeConfig,
        store: Arc<dyn ValidatorStore>,
    ) -> Result<Self, NodeError> {
        let staking = Arc::new(NullStaking::new());
        for account in &config.genesis.accounts {
            staking.set_stake(&account.username, Coin::from_lino(account.stake_lino));
            staking.set_duty(&account.username, account.duty);
        }
        let accounts = Arc::new(NullAccounts::new());
        let manager = Arc::new(ValidatorManager::new(
            Arc::new(NullParams::new(config.params.clone())),
            staking.clone(),
            Arc::new(NullGlobal::new(Coin::from_lino(
                config.genesis.hourly_inflation_lino,
            ))),
            accounts.clone(),
        ));
        let hooks: Arc<dyn StakingHooks> =
            Arc::new(ValidatorHooks::new(manager.clone(), store.clone()));
        staking.set_hooks(&hooks);

        if store.get_validator_list()?.is_none() {
            manager.init_genesis(store.as_ref())?;
            for v in &config.genesis.validators {
                manager.register_validator(store.as_ref(), &v.username, v.pub_key, &v.link)?;
            }
            info!(validators = config.genesis.validators.len(), "genesis applied");
        } else {
            info!("existing validator state loaded");
        }

        Ok(Self {
            manager,
            store,
            staking,
            accounts,
            _hooks: hooks,
            height: 0,
            halted: None,
        })
    }

    pub fn manager(&self) -> &ValidatorManager {
        &self.manager
    }

    pub fn store(&self) -> &dyn ValidatorStore {
        self.store.as_ref()
    }

    pub fn accounts(&self) -> &NullAccounts {
        &self.accounts
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// The validator set to hand the consensus engine at genesis.
    pub fn init_validators(&self) -> Result<Vec<ValidatorUpdate>, NodeError> {
        self.ensure_running()?;
        Ok(self.manager.get_init_validators(self.store())?)
    }

    pub fn begin_block(
        &mut self,
        vote_infos: &[VoteInfo],
        evidence: &[Evidence],
    ) -> Result<(), NodeError> {
        self.ensure_running()?;
        let result = self
            .manager
            .on_begin_block(self.store.as_ref(), vote_infos, evidence);
        result.map_err(|e| self.halt(e))
    }

    /// Deliver one transaction. Ordinary failures reject the transaction;
    /// fatal ones halt the chain.
    pub fn deliver_tx(&mut self, msg: &ValidatorMsg) -> Result<TxResult, NodeError> {
        self.ensure_running()?;
        match handle(&self.manager, self.store.as_ref(), msg) {
            Ok(()) => Ok(TxResult::Accepted),
            Err(e) if e.is_fatal() => Err(self.halt(e)),
            Err(e) => {
                warn!(
                    height = self.height,
                    tx = msg.name(),
                    signer = %msg.signer(),
                    error = %e,
                    "transaction rejected"
                );
                Ok(TxResult::Rejected {
                    error: e.to_string(),
                })
            }
        }
    }

    /// Finish the block and return the validator updates for it.
    pub fn end_block(&mut self) -> Result<Vec<ValidatorUpdate>, NodeError> {
        self.ensure_running()?;
        let result = self.manager.get_validator_updates(self.store.as_ref());
        let updates = result.map_err(|e| self.halt(e))?;
        self.height += 1;
        Ok(updates)
    }

    pub fn distribute_inflation(&mut self) -> Result<(), NodeError> {
        self.ensure_running()?;
        let result = self
            .manager
            .distribute_inflation_to_validator(self.store.as_ref());
        result.map_err(|e| self.halt(e))
    }

    /// Move stake in the in-process ledger; hooks update election votes.
    pub fn change_stake(&mut self, username: &AccountKey, delta: Coin) -> Result<(), NodeError> {
        self.ensure_running()?;
        let result = if delta.is_negative() {
            self.staking.subtract_stake(username, -delta)
        } else {
            self.staking.add_stake(username, delta)
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => Err(self.halt(ValidatorError::from(e))),
            Err(e) => Err(NodeError::Keeper(e)),
        }
    }

    /// Signing info for every committing validator, marking `absent` ones
    /// as not having signed.
    pub fn vote_infos(&self, absent: &[AccountKey]) -> Result<Vec<VoteInfo>, NodeError> {
        let committing = self.manager.get_committing_validators(self.store())?;
        committing
            .iter()
            .map(|name| {
                let v = self.manager.get_validator(self.store(), name)?;
                Ok::<_, NodeError>(VoteInfo {
                    address: v.address,
                    signed_last_block: !absent.contains(name),
                })
            })
            .collect()
    }

    /// Evidence against the named validators.
    pub fn evidence_for(&self, byzantine: &[AccountKey]) -> Result<Vec<Evidence>, NodeError> {
        byzantine
            .iter()
            .map(|name| {
                let v = self.manager.get_validator(self.store(), name)?;
                Ok::<_, NodeError>(Evidence { address: v.address })
            })
            .collect()
    }

    fn ensure_running(&self) -> Result<(), NodeError> {
        match &self.halted {
            Some(reason) => Err(NodeError::Halted {
                height: self.height,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn halt(&mut self, e: ValidatorError) -> NodeError {
        let reason = e.to_string();
        error!(height = self.height, error = %reason, "chain halted");
        self.halted = Some(reason.clone());
        NodeError::Halted {
            height: self.height,
            reason,
        }
    }
}

fn open_lmdb(data_dir: &Path, map_size: usize) -> Result<LmdbValidatorStore, NodeError> {
    let env = LmdbEnvironment::open(data_dir, map_size)?;
    let report = check_integrity(&env)?;
    if !report.is_healthy() {
        return Err(NodeError::Config(format!(
            "validator store at {} failed integrity check: {}",
            data_dir.display(),
            report.errors.join("; ")
        )));
    }
    Ok(LmdbValidatorStore::new(Arc::new(env)))
}
