use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use std::sync::Arc;

use stakeset_nullables::{NullAccounts, NullGlobal, NullParams, NullStaking, NullValidatorStore};
use stakeset_types::{AccountKey, Coin, PublicKey, ValidatorParams};
use stakeset_validator::ValidatorManager;

fn setup(validators: usize) -> (NullValidatorStore, Arc<NullStaking>, ValidatorManager) {
    let params = ValidatorParams {
        validator_min_deposit: Coin::from_lino(1),
        ..ValidatorParams::default()
    };
    let staking = Arc::new(NullStaking::new());
    let manager = ValidatorManager::new(
        Arc::new(NullParams::new(params)),
        staking.clone(),
        Arc::new(NullGlobal::new(Coin::from_lino(10_000))),
        Arc::new(NullAccounts::new()),
    );
    let store = NullValidatorStore::new();
    manager.init_genesis(&store).unwrap();
    for i in 0..validators {
        let name = AccountKey::from(format!("val{i}"));
        staking.set_stake(&name, Coin::from_lino(100 + i as i64));
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&(i as u64).to_le_bytes());
        manager
            .register_validator(&store, &name, PublicKey(key), "")
            .unwrap();
    }
    (store, staking, manager)
}

fn bench_vote_reshuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("vote_reshuffle");

    for validators in [10, 50, 200] {
        let (store, staking, manager) = setup(validators);
        let voter = AccountKey::from("voter");
        staking.set_stake(&voter, Coin::from_lino(1_000_000));
        let low = AccountKey::from("val0");
        let high = AccountKey::from(format!("val{}", validators - 1));

        group.bench_with_input(
            BenchmarkId::new("vote_validator", validators),
            &validators,
            |b, _| {
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    let target = if flip { &low } else { &high };
                    manager
                        .vote_validator(&store, black_box(&voter), std::slice::from_ref(target))
                        .unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_inflation(c: &mut Criterion) {
    let mut group = c.benchmark_group("inflation");

    for validators in [10, 50] {
        let (store, _staking, manager) = setup(validators);
        group.bench_with_input(
            BenchmarkId::new("distribute", validators),
            &validators,
            |b, _| {
                b.iter(|| manager.distribute_inflation_to_validator(black_box(&store)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_vote_reshuffle, bench_inflation);
criterion_main!(benches);
