//! LMDB implementation of ValidatorStore.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use stakeset_store::{ElectionVoteList, StoreError, Validator, ValidatorList, ValidatorStore, WriteBatch};
use stakeset_types::AccountKey;

use crate::environment::{LmdbEnvironment, VALIDATOR_LIST_KEY};
use crate::LmdbError;

pub struct LmdbValidatorStore {
    env: Arc<LmdbEnvironment>,
}

impl LmdbValidatorStore {
    pub fn new(env: Arc<LmdbEnvironment>) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &Arc<LmdbEnvironment> {
        &self.env
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LmdbError> {
    Ok(bincode::deserialize(bytes)?)
}

fn decode_key(bytes: &[u8]) -> Result<AccountKey, LmdbError> {
    std::str::from_utf8(bytes)
        .map(AccountKey::from)
        .map_err(|e| LmdbError::Serialization(e.to_string()))
}

impl ValidatorStore for LmdbValidatorStore {
    fn get_validator(&self, username: &AccountKey) -> Result<Option<Validator>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        match self
            .env
            .validators_db
            .get(&rtxn, username.as_str().as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn get_validator_list(&self) -> Result<Option<ValidatorList>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        match self
            .env
            .validator_list_db
            .get(&rtxn, VALIDATOR_LIST_KEY)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn get_election_vote_list(
        &self,
        voter: &AccountKey,
    ) -> Result<Option<ElectionVoteList>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        match self
            .env
            .election_votes_db
            .get(&rtxn, voter.as_str().as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn iter_election_vote_lists(&self) -> Result<Vec<(AccountKey, ElectionVoteList)>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let iter = self
            .env
            .election_votes_db
            .iter(&rtxn)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            results.push((decode_key(key)?, decode(val)?));
        }
        Ok(results)
    }

    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let op_count = batch.len();
        let mut txn = self.env.write_batch()?;
        for op in batch.ops() {
            txn.apply_op(op)?;
        }
        txn.commit()?;
        debug!(ops = op_count, "applied write batch");
        Ok(())
    }
}
