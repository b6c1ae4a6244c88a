//! Begin-block bookkeeping: signing statistics and punishment.

use serde::{Deserialize, Serialize};
use stakeset_store::{Tier, ValidatorStore};
use stakeset_types::{AccountKey, Coin, ConsensusAddress, PunishType};
use tracing::{debug, info, warn};

use crate::staged::Staged;
use crate::{balancer, ValidatorError, ValidatorManager};

/// Whether a committing validator signed the previous block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteInfo {
    pub address: ConsensusAddress,
    pub signed_last_block: bool,
}

/// Byzantine behaviour reported by the consensus engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub address: ConsensusAddress,
}

impl ValidatorManager {
    /// Snapshot the committing set, update signing stats, then punish.
    pub fn on_begin_block(
        &self,
        store: &dyn ValidatorStore,
        vote_infos: &[VoteInfo],
        evidence: &[Evidence],
    ) -> Result<(), ValidatorError> {
        let mut staged = Staged::open(store)?;
        let committing = staged.list().committing();
        staged.list_mut().pre_block_validators = committing;
        staged.commit()?;

        self.update_signing_stats(store, vote_infos)?;
        self.fire_incompetent_validator(store, evidence)
    }

    /// Count a produced block for every committing validator that signed,
    /// and an absence for every one that did not.
    pub fn update_signing_stats(
        &self,
        store: &dyn ValidatorStore,
        vote_infos: &[VoteInfo],
    ) -> Result<(), ValidatorError> {
        let mut staged = Staged::open(store)?;
        for name in staged.list().committing() {
            let mut validator = staged.listed_validator(&name)?;
            let signed = vote_infos
                .iter()
                .find(|info| info.address == validator.address)
                .is_some_and(|info| info.signed_last_block);
            if signed {
                validator.produced_blocks += 1;
                validator.absent_commit = (validator.absent_commit - 1).max(0);
            } else {
                validator.absent_commit += 1;
            }
            staged.put_validator(validator);
        }
        staged.commit()
    }

    /// Punish every committing validator named in `evidence`, or absent for
    /// longer than the limit.
    pub fn fire_incompetent_validator(
        &self,
        store: &dyn ValidatorStore,
        evidence: &[Evidence],
    ) -> Result<(), ValidatorError> {
        let params = self.params();
        let committing = Staged::open(store)?.list().committing();
        for name in committing {
            let Some(validator) = store.get_validator(&name)? else {
                return Err(ValidatorError::StateCorrupted(format!(
                    "committing validator {} has no record",
                    name
                )));
            };
            if evidence.iter().any(|e| e.address == validator.address) {
                self.punish_committing_validator(
                    store,
                    &name,
                    params.penalty_byzantine,
                    PunishType::Byzantine,
                )?;
            } else if validator.absent_commit > params.absent_commit_limitation {
                self.punish_committing_validator(
                    store,
                    &name,
                    params.penalty_miss_commit,
                    PunishType::AbsentCommit,
                )?;
            }
        }
        Ok(())
    }

    /// Slash `penalty` from `username` and jail it when the punishment is
    /// Byzantine, its stake drops below the minimum deposit, or it has been
    /// slashed too often.
    pub fn punish_committing_validator(
        &self,
        store: &dyn ValidatorStore,
        username: &AccountKey,
        penalty: Coin,
        punish_type: PunishType,
    ) -> Result<(), ValidatorError> {
        let params = self.params();
        // Stake hooks may rewrite election votes, so slash before staging.
        let slashed = self.staking.slash_stake(username, penalty)?;
        self.global.add_to_validator_inflation_pool(slashed)?;

        let mut staged = Staged::open(store)?;
        let mut validator = staged
            .validator(username)?
            .ok_or_else(|| ValidatorError::ValidatorNotFound(username.clone()))?;
        validator.num_slash += 1;
        if punish_type == PunishType::AbsentCommit {
            validator.absent_commit = 0;
        }
        let num_slash = validator.num_slash;
        staged.put_validator(validator);

        let remaining = self.staking.get_lino_stake(username)?;
        info!(
            validator = %username,
            punish_type = %punish_type,
            %slashed,
            %remaining,
            num_slash,
            "validator punished"
        );

        let jail = punish_type == PunishType::Byzantine
            || remaining < params.validator_min_deposit
            || num_slash > params.slash_limitation;
        if jail {
            match staged.list().tier_of(username) {
                Some(Tier::Jail) => debug!(validator = %username, "already jailed"),
                Some(_) => {
                    balancer::move_validator(&mut staged, username, Tier::Jail)?;
                    balancer::balance(&mut staged, &params)?;
                    info!(validator = %username, "validator jailed");
                }
                None => warn!(validator = %username, "punished validator is not listed"),
            }
        }
        staged.commit()
    }
}
