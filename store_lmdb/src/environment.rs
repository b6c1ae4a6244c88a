//! LMDB environment setup.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::info;

use crate::write_batch::LmdbWriteBatch;
use crate::LmdbError;

/// Databases every stakeset environment carries.
pub const DATABASE_NAMES: &[&str] = &["validators", "validator_list", "election_votes", "meta"];

/// Schema version written into the `meta` database on first open.
pub const SCHEMA_VERSION: u32 = 1;

pub(crate) const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

/// Key of the singleton record in the `validator_list` database.
pub(crate) const VALIDATOR_LIST_KEY: &[u8] = b"validator_list";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Env,
    pub(crate) validators_db: Database<Bytes, Bytes>,
    pub(crate) validator_list_db: Database<Bytes, Bytes>,
    pub(crate) election_votes_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per path by this process and
        // the memory map is never accessed outside heed's transactions.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(DATABASE_NAMES.len() as u32)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let validators_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("validators"))?;
        let validator_list_db =
            env.create_database::<Bytes, Bytes>(&mut wtxn, Some("validator_list"))?;
        let election_votes_db =
            env.create_database::<Bytes, Bytes>(&mut wtxn, Some("election_votes"))?;
        let meta_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("meta"))?;

        let stored_version = match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => Some(decode_version(bytes)?),
            None => None,
        };
        match stored_version {
            Some(v) if v > SCHEMA_VERSION => {
                return Err(LmdbError::Heed(format!(
                    "database schema version {} is newer than supported version {}",
                    v, SCHEMA_VERSION
                )));
            }
            Some(_) => {}
            None => {
                meta_db.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_be_bytes())?;
            }
        }
        wtxn.commit()?;

        info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env,
            validators_db,
            validator_list_db,
            election_votes_db,
            meta_db,
        })
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Begin a write batch spanning every database.
    pub fn write_batch(&self) -> Result<LmdbWriteBatch<'_>, LmdbError> {
        LmdbWriteBatch::new(self)
    }

    pub fn schema_version(&self) -> Result<u32, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let bytes = self
            .meta_db
            .get(&rtxn, SCHEMA_VERSION_KEY)?
            .ok_or_else(|| LmdbError::NotFound("meta key 'schema_version'".into()))?;
        decode_version(bytes)
    }
}

fn decode_version(bytes: &[u8]) -> Result<u32, LmdbError> {
    let buf: [u8; 4] = bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization("invalid schema version bytes length".into()))?;
    Ok(u32::from_be_bytes(buf))
}
