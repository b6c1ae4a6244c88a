//! Validator set updates handed to the consensus engine.

use serde::{Deserialize, Serialize};
use stakeset_store::ValidatorStore;
use stakeset_types::PublicKey;
use tracing::info;

use crate::staged::Staged;
use crate::{ValidatorError, ValidatorManager};

/// One `(pub_key, power)` entry. Power 0 removes the key from the set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorUpdate {
    pub pub_key: PublicKey,
    pub power: i64,
}

impl ValidatorManager {
    /// The committing set at genesis, Oncall then Standby.
    pub fn get_init_validators(
        &self,
        store: &dyn ValidatorStore,
    ) -> Result<Vec<ValidatorUpdate>, ValidatorError> {
        let mut staged = Staged::open(store)?;
        let committing = staged.list().committing();
        committing
            .iter()
            .map(|name| {
                let v = staged.listed_validator(name)?;
                Ok(ValidatorUpdate {
                    pub_key: v.pub_key,
                    power: v.committing_power,
                })
            })
            .collect()
    }

    /// Zero out every validator that left the committing set during this
    /// block, delete the revoked ones, then report the current set.
    pub fn get_validator_updates(
        &self,
        store: &dyn ValidatorStore,
    ) -> Result<Vec<ValidatorUpdate>, ValidatorError> {
        let mut staged = Staged::open(store)?;
        let committing = staged.list().committing();
        let mut updates = Vec::with_capacity(committing.len());

        let departed: Vec<_> = staged
            .list()
            .pre_block_validators
            .iter()
            .filter(|name| !committing.contains(name))
            .cloned()
            .collect();
        for name in departed {
            let v = staged.validator(&name)?.ok_or_else(|| {
                ValidatorError::StateCorrupted(format!(
                    "pre-block validator {} has no record",
                    name
                ))
            })?;
            updates.push(ValidatorUpdate {
                pub_key: v.pub_key,
                power: 0,
            });
            if v.has_revoked {
                staged.delete_validator(&name);
                info!(validator = %name, "revoked validator deleted");
            }
        }

        for name in &committing {
            let v = staged.listed_validator(name)?;
            updates.push(ValidatorUpdate {
                pub_key: v.pub_key,
                power: v.committing_power,
            });
        }
        staged.commit()?;
        Ok(updates)
    }
}
