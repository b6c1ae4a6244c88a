use proptest::prelude::*;

use std::collections::HashSet;
use std::sync::Arc;

use stakeset_keepers::StakingHooks;
use stakeset_nullables::{NullAccounts, NullGlobal, NullParams, NullStaking, NullValidatorStore};
use stakeset_store::{Tier, ValidatorStore};
use stakeset_types::{AccountKey, Coin, PublicKey, PunishType, ValidatorParams};
use stakeset_validator::{ValidatorHooks, ValidatorManager};

const MIN_DEPOSIT: i64 = 1_000;

#[derive(Clone, Debug)]
enum Op {
    Register { who: usize, stake: i64 },
    Vote { voter: usize, targets: Vec<usize> },
    Revoke { who: usize },
    Punish { who: usize, penalty: i64, byzantine: bool },
    AddStake { who: usize, amount: i64 },
    BlockBoundary,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8, MIN_DEPOSIT..MIN_DEPOSIT * 5).prop_map(|(who, stake)| Op::Register { who, stake }),
        (8usize..12, prop::collection::vec(0usize..8, 1..4))
            .prop_map(|(voter, targets)| Op::Vote { voter, targets }),
        (0usize..8).prop_map(|who| Op::Revoke { who }),
        (0usize..8, 0i64..2_000, any::<bool>())
            .prop_map(|(who, penalty, byzantine)| Op::Punish { who, penalty, byzantine }),
        (0usize..12, 1i64..500).prop_map(|(who, amount)| Op::AddStake { who, amount }),
        Just(Op::BlockBoundary),
    ]
}

struct World {
    store: Arc<NullValidatorStore>,
    staking: Arc<NullStaking>,
    manager: Arc<ValidatorManager>,
    _hooks: Arc<dyn StakingHooks>,
    params: ValidatorParams,
}

fn world(oncall: usize, standby: usize) -> World {
    let params = ValidatorParams {
        oncall_size: oncall,
        standby_size: standby,
        validator_min_deposit: Coin::from_lino(MIN_DEPOSIT),
        slash_limitation: 2,
        ..ValidatorParams::default()
    };
    let staking = Arc::new(NullStaking::new());
    let manager = Arc::new(ValidatorManager::new(
        Arc::new(NullParams::new(params.clone())),
        staking.clone(),
        Arc::new(NullGlobal::default()),
        Arc::new(NullAccounts::new()),
    ));
    let store = Arc::new(NullValidatorStore::new());
    manager.init_genesis(store.as_ref()).unwrap();
    let hooks: Arc<dyn StakingHooks> = Arc::new(ValidatorHooks::new(manager.clone(), store.clone()));
    staking.set_hooks(&hooks);
    for i in 0..12 {
        staking.set_stake(&name(i), Coin::from_lino(MIN_DEPOSIT * 2));
    }
    World {
        store,
        staking,
        manager,
        _hooks: hooks,
        params,
    }
}

fn name(i: usize) -> AccountKey {
    AccountKey::from(format!("acct{i}"))
}

impl World {
    /// Apply `op`. Rejections are allowed, but a rejected transaction must
    /// not commit anything.
    fn apply(&self, op: &Op) -> Result<(), TestCaseError> {
        let store = self.store.as_ref();
        let batches = self.store.applied_batches();
        let (result, is_tx) = match op {
            Op::Register { who, stake } => {
                self.staking.set_stake(&name(*who), Coin::from_lino(*stake));
                let r = self.manager.register_validator(
                    store,
                    &name(*who),
                    PublicKey([*who as u8 + 1; 32]),
                    "",
                );
                (r, true)
            }
            Op::Vote { voter, targets } => {
                let mut seen = HashSet::new();
                let voted: Vec<AccountKey> = targets
                    .iter()
                    .filter(|t| seen.insert(**t))
                    .map(|t| name(*t))
                    .collect();
                (self.manager.vote_validator(store, &name(*voter), &voted), true)
            }
            Op::Revoke { who } => (self.manager.revoke_validator(store, &name(*who)), true),
            Op::Punish {
                who,
                penalty,
                byzantine,
            } => {
                let listed = self
                    .manager
                    .get_validator_list(store)
                    .unwrap()
                    .tier_of(&name(*who))
                    .is_some_and(|t| t.is_committing());
                if !listed {
                    return Ok(());
                }
                let kind = if *byzantine {
                    PunishType::Byzantine
                } else {
                    PunishType::AbsentCommit
                };
                let r = self.manager.punish_committing_validator(
                    store,
                    &name(*who),
                    Coin::from_lino(*penalty),
                    kind,
                );
                (r, false)
            }
            Op::AddStake { who, amount } => {
                let r = self
                    .staking
                    .add_stake(&name(*who), Coin::from_lino(*amount))
                    .map_err(Into::into);
                (r, false)
            }
            Op::BlockBoundary => {
                let r = self
                    .manager
                    .on_begin_block(store, &[], &[])
                    .and_then(|_| self.manager.get_validator_updates(store).map(|_| ()));
                (r, false)
            }
        };
        if result.is_err() && is_tx {
            prop_assert_eq!(
                self.store.applied_batches(),
                batches,
                "rejected {:?} committed a batch",
                op
            );
        }
        Ok(())
    }

    fn check_invariants(&self) -> Result<(), TestCaseError> {
        let store = self.store.as_ref();
        let list = self.manager.get_validator_list(store).unwrap();
        prop_assert!(list.oncall.len() <= self.params.oncall_size);
        prop_assert!(list.standby.len() <= self.params.standby_size);

        let mut seen = HashSet::new();
        for member in list.all_listed() {
            prop_assert!(seen.insert(member.clone()), "{} listed twice", member);
        }

        for (tier, lowest, lowest_votes) in [
            (Tier::Oncall, &list.lowest_oncall, list.lowest_oncall_votes),
            (Tier::Standby, &list.lowest_standby, list.lowest_standby_votes),
        ] {
            let votes: Vec<Coin> = list
                .members(tier)
                .iter()
                .map(|m| store.get_validator(m).unwrap().unwrap().received_votes)
                .collect();
            match votes.iter().min() {
                Some(min) => {
                    prop_assert_eq!(*min, lowest_votes);
                    prop_assert!(list.members(tier).contains(lowest));
                }
                None => {
                    prop_assert_eq!(lowest_votes, Coin::ZERO);
                    prop_assert!(lowest.is_empty());
                }
            }
        }

        for member in &list.oncall {
            let v = store.get_validator(member).unwrap().unwrap();
            prop_assert_eq!(v.committing_power, stakeset_validator::oncall_power(v.received_votes));
        }
        for member in &list.standby {
            prop_assert_eq!(store.get_validator(member).unwrap().unwrap().committing_power, 1);
        }
        for member in list.candidates.iter().chain(list.jail.iter()) {
            prop_assert_eq!(store.get_validator(member).unwrap().unwrap().committing_power, 0);
        }
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Tier sizes, disjointness, lowest caches and tier powers hold after
    /// every operation.
    #[test]
    fn tier_invariants_hold(
        oncall in 1usize..4,
        standby in 0usize..3,
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let w = world(oncall, standby);
        for op in &ops {
            w.apply(op)?;
            w.check_invariants()?;
        }
    }

    /// A fresh vote splits the voter's stake evenly, losing less than one
    /// raw unit per validator.
    #[test]
    fn vote_conserves_stake(
        stake in 1i128..10_000_000_000,
        count in 1usize..4,
    ) {
        let w = world(3, 3);
        for i in 0..count {
            w.staking.set_stake(&name(i), Coin::from_lino(MIN_DEPOSIT));
            w.manager
                .register_validator(w.store.as_ref(), &name(i), PublicKey([i as u8 + 1; 32]), "")
                .unwrap();
        }
        let voter = name(10);
        w.staking.set_stake(&voter, Coin::new(stake));
        let voted: Vec<AccountKey> = (0..count).map(name).collect();
        w.manager.vote_validator(w.store.as_ref(), &voter, &voted).unwrap();

        let total = w.manager.get_election_vote_list(w.store.as_ref(), &voter).unwrap().total();
        prop_assert_eq!(total.raw(), (stake / count as i128) * count as i128);
        prop_assert!(stake - total.raw() < count as i128);
    }

    /// Voting twice for the same set changes nothing.
    #[test]
    fn revote_is_zero_net(
        stake_lino in 1i64..1_000_000,
        count in 1usize..4,
    ) {
        let w = world(2, 1);
        for i in 0..count {
            w.staking.set_stake(&name(i), Coin::from_lino(MIN_DEPOSIT + i as i64));
            w.manager
                .register_validator(w.store.as_ref(), &name(i), PublicKey([i as u8 + 1; 32]), "")
                .unwrap();
        }
        let voter = name(10);
        w.staking.set_stake(&voter, Coin::from_lino(stake_lino));
        let voted: Vec<AccountKey> = (0..count).map(name).collect();
        w.manager.vote_validator(w.store.as_ref(), &voter, &voted).unwrap();
        let list_before = w.manager.get_validator_list(w.store.as_ref()).unwrap();
        let votes_before: Vec<Coin> = voted
            .iter()
            .map(|v| w.manager.get_validator(w.store.as_ref(), v).unwrap().received_votes)
            .collect();

        w.manager.vote_validator(w.store.as_ref(), &voter, &voted).unwrap();
        let votes_after: Vec<Coin> = voted
            .iter()
            .map(|v| w.manager.get_validator(w.store.as_ref(), v).unwrap().received_votes)
            .collect();
        prop_assert_eq!(votes_before, votes_after);
        prop_assert_eq!(list_before, w.manager.get_validator_list(w.store.as_ref()).unwrap());
    }

    /// After a stake change the hook leaves the list summing to the new split.
    #[test]
    fn stake_hook_conserves_stake(
        initial in 1i64..100_000,
        added in 1i64..100_000,
    ) {
        let w = world(2, 1);
        for i in 0..3 {
            w.staking.set_stake(&name(i), Coin::from_lino(MIN_DEPOSIT));
            w.manager
                .register_validator(w.store.as_ref(), &name(i), PublicKey([i as u8 + 1; 32]), "")
                .unwrap();
        }
        let voter = name(10);
        w.staking.set_stake(&voter, Coin::from_lino(initial));
        let voted: Vec<AccountKey> = (0..3).map(name).collect();
        w.manager.vote_validator(w.store.as_ref(), &voter, &voted).unwrap();

        w.staking.add_stake(&voter, Coin::from_lino(added)).unwrap();
        let stake = Coin::from_lino(initial + added).raw();
        let total = w.manager.get_election_vote_list(w.store.as_ref(), &voter).unwrap().total();
        prop_assert_eq!(total.raw(), (stake / 3) * 3);

        let received: i128 = voted
            .iter()
            .map(|v| w.manager.get_validator(w.store.as_ref(), v).unwrap().received_votes.raw())
            .sum();
        prop_assert_eq!(received, Coin::from_lino(MIN_DEPOSIT).raw() * 3 + total.raw());
    }
}
