//! LMDB database integrity checks.
//!
//! Run on startup to detect corruption early, before the node begins
//! processing blocks.

use std::collections::HashSet;
use std::path::Path;

use stakeset_store::{Tier, Validator, ValidatorList};

use crate::environment::{LmdbEnvironment, VALIDATOR_LIST_KEY};
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub validators: u64,
    pub election_vote_lists: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decode every validator record and cross-check the validator list.
///
/// Undecodable records, names listed in more than one tier, and listed names
/// without a record are reported rather than causing a hard error.
pub fn check_integrity(env: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport::default();
    let rtxn = env.env().read_txn()?;

    let mut known = HashSet::new();
    for entry in env.validators_db.iter(&rtxn)? {
        let (key, val) = entry?;
        report.validators += 1;
        match bincode::deserialize::<Validator>(val) {
            Ok(v) => {
                if v.username.as_str().as_bytes() != key {
                    report
                        .errors
                        .push(format!("validator record under wrong key: {}", v.username));
                }
                known.insert(v.username);
            }
            Err(e) => report
                .errors
                .push(format!("undecodable validator record: {}", e)),
        }
    }

    report.election_vote_lists = env.election_votes_db.len(&rtxn)?;

    if let Some(bytes) = env.validator_list_db.get(&rtxn, VALIDATOR_LIST_KEY)? {
        match bincode::deserialize::<ValidatorList>(bytes) {
            Ok(list) => {
                let mut seen = HashSet::new();
                for tier in Tier::ALL {
                    for name in list.members(tier) {
                        if !seen.insert(name.clone()) {
                            report
                                .errors
                                .push(format!("{} listed in more than one tier", name));
                        }
                        if !known.contains(name) {
                            report
                                .errors
                                .push(format!("{} listed as {} without a record", name, tier));
                        }
                    }
                }
            }
            Err(e) => report
                .errors
                .push(format!("undecodable validator list: {}", e)),
        }
    }

    Ok(report)
}

/// Check if the LMDB data directory looks valid before opening.
///
/// Returns `Ok(())` for a fresh (nonexistent) directory. Returns an error
/// if the directory exists but `data.mdb` is missing, which suggests
/// corruption or misconfiguration.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let data_file = path.join("data.mdb");
    if !data_file.exists() {
        return Err(format!(
            "LMDB directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbValidatorStore;
    use stakeset_store::ValidatorStore;
    use stakeset_types::{AccountKey, PublicKey};
    use std::sync::Arc;

    #[test]
    fn check_data_dir_fresh_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(&dir.path().join("missing")).is_ok());
        assert!(check_data_dir(dir.path()).is_err());
    }

    #[test]
    fn consistent_store_is_healthy() {
        let dir = tempfile::tempdir().unwrap();
        let env = Arc::new(LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).unwrap());
        let store = LmdbValidatorStore::new(env.clone());

        let alice = Validator::new(AccountKey::from("alice"), PublicKey([1; 32]), "");
        store.put_validator(&alice).unwrap();
        let mut list = ValidatorList::default();
        list.insert(Tier::Oncall, alice.username.clone());
        store.put_validator_list(&list).unwrap();

        let report = check_integrity(&env).unwrap();
        assert!(report.is_healthy(), "{:?}", report.errors);
        assert_eq!(report.validators, 1);
    }

    #[test]
    fn dangling_list_entry_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let env = Arc::new(LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).unwrap());
        let store = LmdbValidatorStore::new(env.clone());

        let mut list = ValidatorList::default();
        list.insert(Tier::Standby, AccountKey::from("ghost"));
        list.insert(Tier::Jail, AccountKey::from("ghost"));
        store.put_validator_list(&list).unwrap();

        let report = check_integrity(&env).unwrap();
        assert!(!report.is_healthy());
        assert_eq!(report.errors.len(), 3);
    }
}
