//! Validator record and the validator storage trait.

use crate::{ElectionVoteList, StoreError, ValidatorList, WriteBatch};
use serde::{Deserialize, Serialize};
use stakeset_types::{AccountKey, Coin, ConsensusAddress, PublicKey};

/// Per-validator information, keyed by username.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub username: AccountKey,
    pub pub_key: PublicKey,
    /// Consensus address derived from `pub_key`; evidence is matched against it.
    pub address: ConsensusAddress,
    /// Power reported to the consensus engine. Depends only on the tier and
    /// `received_votes`.
    pub committing_power: i64,
    /// Sum of every voter's share currently pointed at this validator.
    pub received_votes: Coin,
    /// Set once by revoke and never cleared.
    pub has_revoked: bool,
    pub absent_commit: i64,
    pub produced_blocks: i64,
    /// Punishments since the validator last entered jail.
    pub num_slash: i64,
    pub link: String,
}

impl Validator {
    /// A fresh record with zero power, votes, and counters.
    pub fn new(username: AccountKey, pub_key: PublicKey, link: impl Into<String>) -> Self {
        Self {
            username,
            address: pub_key.address(),
            pub_key,
            committing_power: 0,
            received_votes: Coin::ZERO,
            has_revoked: false,
            absent_commit: 0,
            produced_blocks: 0,
            num_slash: 0,
            link: link.into(),
        }
    }
}

/// Persistent storage for validator records, the singleton validator list,
/// and per-voter election vote lists.
///
/// Reads return `Ok(None)` for absent keys. All writes go through
/// [`ValidatorStore::apply`], which must persist a batch atomically.
pub trait ValidatorStore {
    fn get_validator(&self, username: &AccountKey) -> Result<Option<Validator>, StoreError>;

    fn get_validator_list(&self) -> Result<Option<ValidatorList>, StoreError>;

    fn get_election_vote_list(
        &self,
        voter: &AccountKey,
    ) -> Result<Option<ElectionVoteList>, StoreError>;

    /// All election vote lists, in voter order.
    fn iter_election_vote_lists(&self) -> Result<Vec<(AccountKey, ElectionVoteList)>, StoreError>;

    /// Persist every operation in `batch`, or none of them.
    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError>;

    fn has_validator(&self, username: &AccountKey) -> Result<bool, StoreError> {
        self.get_validator(username).map(|v| v.is_some())
    }

    fn put_validator(&self, validator: &Validator) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.put_validator(validator.clone());
        self.apply(batch)
    }

    fn put_validator_list(&self, list: &ValidatorList) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.put_validator_list(list.clone());
        self.apply(batch)
    }

    fn put_election_vote_list(
        &self,
        voter: &AccountKey,
        list: &ElectionVoteList,
    ) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.put_election_vote_list(voter.clone(), list.clone());
        self.apply(batch)
    }

    fn delete_validator(&self, username: &AccountKey) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.delete_validator(username.clone());
        self.apply(batch)
    }
}
