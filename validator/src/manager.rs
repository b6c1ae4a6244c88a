//! Validator lifecycle: genesis, registration, revocation, votes, queries.

use std::collections::HashSet;
use std::sync::Arc;

use stakeset_keepers::{AccountKeeper, GlobalKeeper, ParamKeeper, StakingKeeper};
use stakeset_store::{
    ElectionVoteList, ReceivedVotesStatus, Tier, Validator, ValidatorList, ValidatorStore,
};
use stakeset_types::{AccountKey, Coin, Duty, PublicKey, ValidatorParams};
use tracing::{info, warn};

use crate::staged::Staged;
use crate::{balancer, votes, ValidatorError};

/// Owns the validator tiers and election votes on top of a [`ValidatorStore`].
///
/// The manager holds only its collaborators. Every operation takes the store
/// explicitly, stages its changes, and commits them in one batch on success.
pub struct ValidatorManager {
    pub(crate) params: Arc<dyn ParamKeeper>,
    pub(crate) staking: Arc<dyn StakingKeeper>,
    pub(crate) global: Arc<dyn GlobalKeeper>,
    pub(crate) accounts: Arc<dyn AccountKeeper>,
}

impl ValidatorManager {
    pub fn new(
        params: Arc<dyn ParamKeeper>,
        staking: Arc<dyn StakingKeeper>,
        global: Arc<dyn GlobalKeeper>,
        accounts: Arc<dyn AccountKeeper>,
    ) -> Self {
        Self {
            params,
            staking,
            global,
            accounts,
        }
    }

    pub fn params(&self) -> ValidatorParams {
        self.params.validator_params()
    }

    /// Write an empty validator list.
    pub fn init_genesis(&self, store: &dyn ValidatorStore) -> Result<(), ValidatorError> {
        store.put_validator_list(&ValidatorList::default())?;
        info!("validator list initialised");
        Ok(())
    }

    /// Register `username` as a validator candidate, or bring it back from
    /// jail if it is jailed.
    pub fn register_validator(
        &self,
        store: &dyn ValidatorStore,
        username: &AccountKey,
        pub_key: PublicKey,
        link: &str,
    ) -> Result<(), ValidatorError> {
        let params = self.params();
        let mut staged = Staged::open(store)?;

        if staged.list().tier_of(username) == Some(Tier::Jail) {
            self.rejoin_from_jail(&mut staged, &params, username)?;
            return staged.commit();
        }

        if is_legal(&mut staged, username)? {
            return Err(ValidatorError::ValidatorAlreadyExists(username.clone()));
        }
        if !self.staking.get_voter_duty(username)?.is_voter() {
            return Err(ValidatorError::InvalidVoterDuty(username.clone()));
        }

        let address = pub_key.address();
        let listed: Vec<AccountKey> = staged.list().all_listed().cloned().collect();
        for name in listed {
            if staged.listed_validator(&name)?.address == address {
                return Err(ValidatorError::ValidatorPubKeyAlreadyExists { owner: name });
            }
        }

        let stake = self.staking.get_lino_stake(username)?;
        // Past assign_duty only state corruption can fail the register.
        self.staking.claim_interest(username)?;
        if let Err(e) =
            self.staking
                .assign_duty(username, Duty::Validator, params.validator_min_deposit)
        {
            warn!(validator = %username, error = %e, "validator deposit rejected");
            return Err(ValidatorError::InsufficientDeposit(username.clone()));
        }

        let mut validator = Validator::new(username.clone(), pub_key, link);
        validator.received_votes = match staged.validator(username)? {
            Some(previous) => previous.received_votes,
            None => outstanding_votes(store, username)?,
        };
        staged.put_validator(validator);
        staged.list_mut().insert(Tier::Candidate, username.clone());
        balancer::react(&mut staged, username, true)?;
        balancer::balance(&mut staged, &params)?;

        self.stage_votes(&mut staged, &params, username, std::slice::from_ref(username), stake)?;
        staged.commit()?;
        info!(validator = %username, %address, %stake, "validator registered");
        Ok(())
    }

    fn rejoin_from_jail(
        &self,
        staged: &mut Staged<'_>,
        params: &ValidatorParams,
        username: &AccountKey,
    ) -> Result<(), ValidatorError> {
        let stake = self.staking.get_lino_stake(username)?;
        if stake < params.validator_min_deposit {
            return Err(ValidatorError::InsufficientDeposit(username.clone()));
        }
        balancer::move_validator(staged, username, Tier::Candidate)?;
        balancer::react(staged, username, true)?;
        balancer::balance(staged, params)?;
        info!(validator = %username, %stake, "validator rejoined from jail");
        Ok(())
    }

    /// Revoke `username`. Its record stays until it leaves the committing set
    /// at a block boundary.
    pub fn revoke_validator(
        &self,
        store: &dyn ValidatorStore,
        username: &AccountKey,
    ) -> Result<(), ValidatorError> {
        let params = self.params();
        let mut staged = Staged::open(store)?;
        let mut validator = staged
            .validator(username)?
            .filter(|v| !v.has_revoked)
            .ok_or_else(|| ValidatorError::ValidatorNotFound(username.clone()))?;

        validator.has_revoked = true;
        validator.committing_power = 0;
        staged.put_validator(validator);
        let tier = staged.list_mut().remove(username);
        balancer::balance(&mut staged, &params)?;

        self.staking
            .unassign_duty(username, params.validator_revoke_pending_sec)?;
        staged.commit()?;
        info!(
            validator = %username,
            tier = %tier.map(|t| t.to_string()).unwrap_or_else(|| "unlisted".into()),
            "validator revoked"
        );
        Ok(())
    }

    /// Point all of `voter`'s stake at `voted`, split evenly.
    pub fn vote_validator(
        &self,
        store: &dyn ValidatorStore,
        voter: &AccountKey,
        voted: &[AccountKey],
    ) -> Result<(), ValidatorError> {
        let params = self.params();
        if voted.is_empty() {
            return Err(ValidatorError::InvalidVotedValidators(
                "no validators named".into(),
            ));
        }
        if voted.len() > params.max_voted_validators {
            return Err(ValidatorError::InvalidVotedValidators(format!(
                "{} named, limit is {}",
                voted.len(),
                params.max_voted_validators
            )));
        }
        let mut seen = HashSet::with_capacity(voted.len());
        if let Some(dup) = voted.iter().find(|name| !seen.insert(*name)) {
            return Err(ValidatorError::InvalidVotedValidators(format!(
                "{} named twice",
                dup
            )));
        }

        let mut staged = Staged::open(store)?;
        for name in voted {
            if !is_legal(&mut staged, name)? {
                return Err(ValidatorError::ValidatorNotFound(name.clone()));
            }
        }
        let stake = self.staking.get_lino_stake(voter)?;
        self.stage_votes(&mut staged, &params, voter, voted, stake)?;
        self.staking.claim_interest(voter)?;
        staged.commit()?;
        info!(%voter, validators = voted.len(), %stake, "election votes cast");
        Ok(())
    }

    fn stage_votes(
        &self,
        staged: &mut Staged<'_>,
        params: &ValidatorParams,
        voter: &AccountKey,
        voted: &[AccountKey],
        stake: Coin,
    ) -> Result<(), ValidatorError> {
        let (deltas, list) = votes::election_vote_updates(staged, voter, voted, stake)?;
        votes::apply_deltas(staged, params, voter, &deltas)?;
        staged.put_election_votes(voter.clone(), list);
        Ok(())
    }

    /// Replace the link of an existing validator record.
    pub fn update_validator(
        &self,
        store: &dyn ValidatorStore,
        username: &AccountKey,
        link: &str,
    ) -> Result<(), ValidatorError> {
        let mut staged = Staged::open(store)?;
        let mut validator = staged
            .validator(username)?
            .ok_or_else(|| ValidatorError::ValidatorNotFound(username.clone()))?;
        validator.link = link.to_string();
        staged.put_validator(validator);
        staged.commit()?;
        info!(validator = %username, "validator link updated");
        Ok(())
    }

    /// Re-split `username`'s existing election votes over its current stake.
    pub fn on_stake_change(
        &self,
        store: &dyn ValidatorStore,
        username: &AccountKey,
    ) -> Result<(), ValidatorError> {
        let params = self.params();
        let mut staged = Staged::open(store)?;
        let names = staged.election_votes(username)?.validator_names();
        if names.is_empty() {
            return Ok(());
        }
        let stake = self.staking.get_lino_stake(username)?;
        let (deltas, list) = votes::election_vote_updates(&mut staged, username, &names, stake)?;
        votes::apply_deltas(&mut staged, &params, username, &deltas)?;
        staged.put_election_votes(username.clone(), list);
        staged.commit()
    }

    pub fn get_validator(
        &self,
        store: &dyn ValidatorStore,
        username: &AccountKey,
    ) -> Result<Validator, ValidatorError> {
        store
            .get_validator(username)?
            .ok_or_else(|| ValidatorError::ValidatorNotFound(username.clone()))
    }

    pub fn get_validator_list(&self, store: &dyn ValidatorStore) -> Result<ValidatorList, ValidatorError> {
        store
            .get_validator_list()?
            .ok_or(ValidatorError::ValidatorListNotFound)
    }

    /// A voter's election votes; empty if it never voted.
    pub fn get_election_vote_list(
        &self,
        store: &dyn ValidatorStore,
        voter: &AccountKey,
    ) -> Result<ElectionVoteList, ValidatorError> {
        Ok(store.get_election_vote_list(voter)?.unwrap_or_default())
    }

    pub fn get_committing_validators(
        &self,
        store: &dyn ValidatorStore,
    ) -> Result<Vec<AccountKey>, ValidatorError> {
        Ok(self.get_validator_list(store)?.committing())
    }

    /// Oncall, Standby, then Candidates.
    pub fn get_all_validators(&self, store: &dyn ValidatorStore) -> Result<Vec<AccountKey>, ValidatorError> {
        Ok(self.get_validator_list(store)?.all_validators())
    }

    pub fn get_committing_validator_vote_status(
        &self,
        store: &dyn ValidatorStore,
    ) -> Result<Vec<ReceivedVotesStatus>, ValidatorError> {
        let mut staged = Staged::open(store)?;
        let committing = staged.list().committing();
        committing
            .into_iter()
            .map(|name| {
                let validator = staged.listed_validator(&name)?;
                Ok(ReceivedVotesStatus {
                    validator_name: name,
                    received_votes: validator.received_votes,
                })
            })
            .collect()
    }

    /// Whether `username` has a record that has not been revoked.
    pub fn is_legal_validator(
        &self,
        store: &dyn ValidatorStore,
        username: &AccountKey,
    ) -> Result<bool, ValidatorError> {
        Ok(store
            .get_validator(username)?
            .is_some_and(|v| !v.has_revoked))
    }
}

fn is_legal(staged: &mut Staged<'_>, username: &AccountKey) -> Result<bool, ValidatorError> {
    Ok(staged
        .validator(username)?
        .is_some_and(|v| !v.has_revoked))
}

/// Sum of the shares every voter still points at `username`. Lists outlive a
/// deleted record, so a fresh registration starts from these.
fn outstanding_votes(
    store: &dyn ValidatorStore,
    username: &AccountKey,
) -> Result<Coin, ValidatorError> {
    Ok(store
        .iter_election_vote_lists()?
        .iter()
        .fold(Coin::ZERO, |acc, (_, list)| acc + list.vote_for(username)))
}
