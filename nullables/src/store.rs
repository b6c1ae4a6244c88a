//! Nullable validator store — thread-safe in-memory storage for testing.

use stakeset_store::{
    BatchOp, ElectionVoteList, StoreError, Validator, ValidatorList, ValidatorStore, WriteBatch,
};
use stakeset_types::AccountKey;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    validators: BTreeMap<AccountKey, Validator>,
    list: Option<ValidatorList>,
    votes: BTreeMap<AccountKey, ElectionVoteList>,
}

/// An in-memory [`ValidatorStore`].
///
/// A batch is applied under one lock, so readers never observe half of it.
/// [`NullValidatorStore::fail_writes`] makes every subsequent `apply` fail
/// without touching state.
pub struct NullValidatorStore {
    state: Mutex<State>,
    fail_writes: Mutex<bool>,
    applied_batches: Mutex<u64>,
}

impl NullValidatorStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            fail_writes: Mutex::new(false),
            applied_batches: Mutex::new(0),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Number of batches committed so far.
    pub fn applied_batches(&self) -> u64 {
        *self.applied_batches.lock().unwrap()
    }

    pub fn validator_count(&self) -> usize {
        self.state.lock().unwrap().validators.len()
    }
}

impl Default for NullValidatorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorStore for NullValidatorStore {
    fn get_validator(&self, username: &AccountKey) -> Result<Option<Validator>, StoreError> {
        Ok(self.state.lock().unwrap().validators.get(username).cloned())
    }

    fn get_validator_list(&self) -> Result<Option<ValidatorList>, StoreError> {
        Ok(self.state.lock().unwrap().list.clone())
    }

    fn get_election_vote_list(
        &self,
        voter: &AccountKey,
    ) -> Result<Option<ElectionVoteList>, StoreError> {
        Ok(self.state.lock().unwrap().votes.get(voter).cloned())
    }

    fn iter_election_vote_lists(&self) -> Result<Vec<(AccountKey, ElectionVoteList)>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .votes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::BatchRejected("null store configured to fail writes".into()));
        }
        let mut state = self.state.lock().unwrap();
        for op in batch.into_ops() {
            match op {
                BatchOp::PutValidator(v) => {
                    state.validators.insert(v.username.clone(), v);
                }
                BatchOp::DeleteValidator(name) => {
                    state.validators.remove(&name);
                }
                BatchOp::PutValidatorList(list) => {
                    state.list = Some(list);
                }
                BatchOp::PutElectionVoteList(voter, list) => {
                    state.votes.insert(voter, list);
                }
            }
        }
        *self.applied_batches.lock().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakeset_types::PublicKey;

    fn validator(name: &str) -> Validator {
        Validator::new(AccountKey::from(name), PublicKey([name.len() as u8; 32]), "")
    }

    #[test]
    fn batch_applies_in_order() {
        let store = NullValidatorStore::new();
        let mut batch = WriteBatch::new();
        batch.put_validator(validator("alice"));
        batch.delete_validator(AccountKey::from("alice"));
        batch.put_validator(validator("bob"));
        store.apply(batch).unwrap();

        assert!(!store.has_validator(&AccountKey::from("alice")).unwrap());
        assert!(store.has_validator(&AccountKey::from("bob")).unwrap());
        assert_eq!(store.applied_batches(), 1);
    }

    #[test]
    fn failing_store_leaves_state_untouched() {
        let store = NullValidatorStore::new();
        store.fail_writes(true);
        assert!(store.put_validator(&validator("alice")).is_err());
        assert_eq!(store.validator_count(), 0);
        assert_eq!(store.applied_batches(), 0);
    }
}
