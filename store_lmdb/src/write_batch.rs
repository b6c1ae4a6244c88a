//! Write batching — applies a [`stakeset_store::WriteBatch`] inside a single
//! LMDB write transaction, so either every operation lands or none does.
//!
//! If the batch is dropped without calling [`LmdbWriteBatch::commit`], all
//! operations are rolled back (the underlying LMDB transaction is aborted).

use heed::RwTxn;

use stakeset_store::BatchOp;

use crate::environment::{LmdbEnvironment, VALIDATOR_LIST_KEY};
use crate::LmdbError;

pub struct LmdbWriteBatch<'a> {
    txn: RwTxn<'a>,
    env: &'a LmdbEnvironment,
}

impl<'a> LmdbWriteBatch<'a> {
    pub(crate) fn new(env: &'a LmdbEnvironment) -> Result<Self, LmdbError> {
        let txn = env.env().write_txn()?;
        Ok(Self { txn, env })
    }

    pub fn apply_op(&mut self, op: &BatchOp) -> Result<(), LmdbError> {
        match op {
            BatchOp::PutValidator(v) => {
                let bytes = bincode::serialize(v)?;
                self.env
                    .validators_db
                    .put(&mut self.txn, v.username.as_str().as_bytes(), &bytes)?;
            }
            BatchOp::DeleteValidator(name) => {
                self.env
                    .validators_db
                    .delete(&mut self.txn, name.as_str().as_bytes())?;
            }
            BatchOp::PutValidatorList(list) => {
                let bytes = bincode::serialize(list)?;
                self.env
                    .validator_list_db
                    .put(&mut self.txn, VALIDATOR_LIST_KEY, &bytes)?;
            }
            BatchOp::PutElectionVoteList(voter, list) => {
                let bytes = bincode::serialize(list)?;
                self.env
                    .election_votes_db
                    .put(&mut self.txn, voter.as_str().as_bytes(), &bytes)?;
            }
        }
        Ok(())
    }

    /// Commit all operations atomically.
    pub fn commit(self) -> Result<(), LmdbError> {
        self.txn.commit()?;
        Ok(())
    }
}
