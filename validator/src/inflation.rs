//! Weighted inflation payouts to committing validators.

use stakeset_store::ValidatorStore;
use stakeset_types::Coin;
use tracing::{debug, info};

use crate::{ValidatorError, ValidatorManager};

impl ValidatorManager {
    /// Split the period's validator inflation across Oncall and Standby by
    /// tier weight. Each payout takes its weighted share of what is left, so
    /// the whole amount is paid out.
    pub fn distribute_inflation_to_validator(
        &self,
        store: &dyn ValidatorStore,
    ) -> Result<(), ValidatorError> {
        let inflation = self.global.get_validator_hourly_inflation()?;
        let params = self.params();
        let list = self.get_validator_list(store)?;

        let weighted = list
            .oncall
            .iter()
            .map(|name| (name, params.oncall_inflation_weight))
            .chain(
                list.standby
                    .iter()
                    .map(|name| (name, params.standby_inflation_weight)),
            );
        let total_weight = list.oncall.len() as i64 * params.oncall_inflation_weight
            + list.standby.len() as i64 * params.standby_inflation_weight;
        if total_weight == 0 {
            debug!(%inflation, "no committing validators, inflation kept");
            return Ok(());
        }

        let mut remaining = inflation;
        let mut consumed = 0i64;
        for (name, weight) in weighted {
            let share = total_weight - consumed;
            let pay = if share == 0 {
                Coin::ZERO
            } else {
                remaining.checked_mul_ratio(weight, share).ok_or_else(|| {
                    ValidatorError::StateCorrupted(format!(
                        "inflation share overflows: {} * {} / {}",
                        remaining, weight, share
                    ))
                })?
            };
            self.accounts.add_coin_to_username(name, pay)?;
            remaining -= pay;
            consumed += weight;
            debug!(validator = %name, %pay, "inflation paid");
        }
        info!(
            %inflation,
            validators = list.oncall.len() + list.standby.len(),
            "validator inflation distributed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakeset_nullables::{NullAccounts, NullGlobal, NullParams, NullStaking, NullValidatorStore};
    use stakeset_store::{Tier, ValidatorList};
    use stakeset_types::{AccountKey, ValidatorParams};
    use std::sync::Arc;

    fn setup(
        oncall: &[&str],
        standby: &[&str],
        inflation: Coin,
    ) -> (NullValidatorStore, Arc<NullAccounts>, ValidatorManager) {
        let accounts = Arc::new(NullAccounts::new());
        let manager = ValidatorManager::new(
            Arc::new(NullParams::new(ValidatorParams::default())),
            Arc::new(NullStaking::new()),
            Arc::new(NullGlobal::new(inflation)),
            accounts.clone(),
        );
        let store = NullValidatorStore::new();
        let mut list = ValidatorList::default();
        for name in oncall {
            list.insert(Tier::Oncall, (*name).into());
        }
        for name in standby {
            list.insert(Tier::Standby, (*name).into());
        }
        store.put_validator_list(&list).unwrap();
        (store, accounts, manager)
    }

    #[test]
    fn weighted_split_pays_everything() {
        let (store, accounts, manager) = setup(&["aa1", "aa2"], &["bb1"], Coin::new(100));
        manager.distribute_inflation_to_validator(&store).unwrap();
        assert_eq!(
            accounts.payouts(),
            vec![
                (AccountKey::from("aa1"), Coin::new(40)),
                (AccountKey::from("aa2"), Coin::new(40)),
                (AccountKey::from("bb1"), Coin::new(20)),
            ]
        );
    }

    #[test]
    fn remainder_goes_to_later_validators() {
        let (store, accounts, manager) = setup(&["aa1", "aa2", "aa3"], &[], Coin::new(10));
        manager.distribute_inflation_to_validator(&store).unwrap();
        let paid: Vec<Coin> = accounts.payouts().into_iter().map(|(_, c)| c).collect();
        assert_eq!(paid, vec![Coin::new(3), Coin::new(3), Coin::new(4)]);
    }

    #[test]
    fn empty_set_pays_nothing() {
        let (store, accounts, manager) = setup(&[], &[], Coin::new(100));
        manager.distribute_inflation_to_validator(&store).unwrap();
        assert!(accounts.payouts().is_empty());
    }

    #[test]
    fn overflowing_share_is_corruption() {
        let (store, accounts, manager) = setup(&["aa1"], &[], Coin::new(i128::MAX));
        let err = manager.distribute_inflation_to_validator(&store).unwrap_err();
        assert!(matches!(err, ValidatorError::StateCorrupted(_)));
        assert!(err.is_fatal());
        assert!(accounts.payouts().is_empty());
    }

    #[test]
    fn failed_payout_stops_distribution() {
        let (store, accounts, manager) = setup(&["aa1", "aa2"], &["bb1"], Coin::new(100));
        accounts.fail_for(Some("aa2".into()));
        assert!(manager.distribute_inflation_to_validator(&store).is_err());
        assert_eq!(accounts.payouts().len(), 1);
    }
}
