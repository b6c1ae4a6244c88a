//! Write batching: groups the writes of one operation so a backend can
//! persist them together.
//!
//! ```ignore
//! let mut batch = WriteBatch::new();
//! batch.put_validator(validator);
//! batch.put_validator_list(list);
//! store.apply(batch)?;
//! ```

use crate::{ElectionVoteList, Validator, ValidatorList};
use stakeset_types::AccountKey;

/// A single pending write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOp {
    PutValidator(Validator),
    DeleteValidator(AccountKey),
    PutValidatorList(ValidatorList),
    PutElectionVoteList(AccountKey, ElectionVoteList),
}

/// An ordered list of writes. Later operations on the same key win.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_validator(&mut self, validator: Validator) {
        self.ops.push(BatchOp::PutValidator(validator));
    }

    pub fn delete_validator(&mut self, username: AccountKey) {
        self.ops.push(BatchOp::DeleteValidator(username));
    }

    pub fn put_validator_list(&mut self, list: ValidatorList) {
        self.ops.push(BatchOp::PutValidatorList(list));
    }

    pub fn put_election_vote_list(&mut self, voter: AccountKey, list: ElectionVoteList) {
        self.ops.push(BatchOp::PutElectionVoteList(voter, list));
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}
