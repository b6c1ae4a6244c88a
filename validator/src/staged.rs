//! A read-through write overlay over a [`ValidatorStore`].
//!
//! Each manager operation stages its reads and writes here and commits them
//! as one [`WriteBatch`] at the end. An operation that returns early with an
//! error simply drops the overlay, leaving the store untouched.

use std::collections::BTreeMap;

use stakeset_store::{ElectionVoteList, Validator, ValidatorList, ValidatorStore, WriteBatch};
use stakeset_types::AccountKey;

use crate::ValidatorError;

enum Slot {
    Clean(Option<Validator>),
    Dirty(Validator),
    Deleted,
}

impl Slot {
    fn get(&self) -> Option<&Validator> {
        match self {
            Slot::Clean(v) => v.as_ref(),
            Slot::Dirty(v) => Some(v),
            Slot::Deleted => None,
        }
    }
}

pub(crate) struct Staged<'a> {
    store: &'a dyn ValidatorStore,
    list: ValidatorList,
    list_dirty: bool,
    validators: BTreeMap<AccountKey, Slot>,
    votes: BTreeMap<AccountKey, ElectionVoteList>,
}

impl<'a> Staged<'a> {
    /// Load the validator list. A missing list means genesis never ran.
    pub(crate) fn open(store: &'a dyn ValidatorStore) -> Result<Self, ValidatorError> {
        let list = store
            .get_validator_list()?
            .ok_or(ValidatorError::ValidatorListNotFound)?;
        Ok(Self {
            store,
            list,
            list_dirty: false,
            validators: BTreeMap::new(),
            votes: BTreeMap::new(),
        })
    }

    pub(crate) fn list(&self) -> &ValidatorList {
        &self.list
    }

    pub(crate) fn list_mut(&mut self) -> &mut ValidatorList {
        self.list_dirty = true;
        &mut self.list
    }

    pub(crate) fn validator(&mut self, username: &AccountKey) -> Result<Option<Validator>, ValidatorError> {
        if let Some(slot) = self.validators.get(username) {
            return Ok(slot.get().cloned());
        }
        let loaded = self.store.get_validator(username)?;
        self.validators
            .insert(username.clone(), Slot::Clean(loaded.clone()));
        Ok(loaded)
    }

    /// A validator that invariants guarantee exists, such as any listed name.
    pub(crate) fn listed_validator(&mut self, username: &AccountKey) -> Result<Validator, ValidatorError> {
        self.validator(username)?.ok_or_else(|| {
            ValidatorError::StateCorrupted(format!("listed validator {} has no record", username))
        })
    }

    pub(crate) fn put_validator(&mut self, validator: Validator) {
        self.validators
            .insert(validator.username.clone(), Slot::Dirty(validator));
    }

    pub(crate) fn delete_validator(&mut self, username: &AccountKey) {
        self.validators.insert(username.clone(), Slot::Deleted);
    }

    /// The voter's current election votes; empty if it never voted.
    pub(crate) fn election_votes(&mut self, voter: &AccountKey) -> Result<ElectionVoteList, ValidatorError> {
        if let Some(list) = self.votes.get(voter) {
            return Ok(list.clone());
        }
        Ok(self.store.get_election_vote_list(voter)?.unwrap_or_default())
    }

    pub(crate) fn put_election_votes(&mut self, voter: AccountKey, list: ElectionVoteList) {
        self.votes.insert(voter, list);
    }

    /// Write every staged change in one batch.
    pub(crate) fn commit(self) -> Result<(), ValidatorError> {
        let mut batch = WriteBatch::new();
        for (name, slot) in self.validators {
            match slot {
                Slot::Clean(_) => {}
                Slot::Dirty(v) => batch.put_validator(v),
                Slot::Deleted => batch.delete_validator(name),
            }
        }
        for (voter, list) in self.votes {
            batch.put_election_vote_list(voter, list);
        }
        if self.list_dirty {
            batch.put_validator_list(self.list);
        }
        if batch.is_empty() {
            return Ok(());
        }
        self.store.apply(batch)?;
        Ok(())
    }
}
