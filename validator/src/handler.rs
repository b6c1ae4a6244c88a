//! Transaction dispatch.

use stakeset_store::ValidatorStore;
use stakeset_transactions::{validate_basic, ValidatorMsg};

use crate::{ValidatorError, ValidatorManager};

/// Validate `msg` and apply it through `manager`.
pub fn handle(
    manager: &ValidatorManager,
    store: &dyn ValidatorStore,
    msg: &ValidatorMsg,
) -> Result<(), ValidatorError> {
    validate_basic(msg)?;
    match msg {
        ValidatorMsg::Register(m) => {
            manager.register_validator(store, &m.username, m.pub_key, &m.link)
        }
        ValidatorMsg::Revoke(m) => manager.revoke_validator(store, &m.username),
        ValidatorMsg::Vote(m) => manager.vote_validator(store, &m.username, &m.voted_validators),
        ValidatorMsg::Update(m) => manager.update_validator(store, &m.username, &m.link),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakeset_nullables::{NullAccounts, NullGlobal, NullParams, NullStaking, NullValidatorStore};
    use stakeset_transactions::{RegisterMsg, UpdateMsg, VoteMsg};
    use stakeset_types::{AccountKey, Coin, PublicKey};
    use std::sync::Arc;

    #[test]
    fn messages_reach_the_manager() {
        let staking = Arc::new(NullStaking::new());
        let manager = ValidatorManager::new(
            Arc::new(NullParams::default()),
            staking.clone(),
            Arc::new(NullGlobal::default()),
            Arc::new(NullAccounts::new()),
        );
        let store = NullValidatorStore::new();
        manager.init_genesis(&store).unwrap();
        staking.set_stake(&AccountKey::from("alice"), Coin::from_lino(300_000));

        let register = ValidatorMsg::Register(RegisterMsg::new("alice", PublicKey([1; 32]), ""));
        handle(&manager, &store, &register).unwrap();
        handle(
            &manager,
            &store,
            &ValidatorMsg::Update(UpdateMsg::new("alice", "https://alice.example")),
        )
        .unwrap();
        let v = manager.get_validator(&store, &"alice".into()).unwrap();
        assert_eq!(v.link, "https://alice.example");
    }

    #[test]
    fn stateless_checks_run_first() {
        let manager = ValidatorManager::new(
            Arc::new(NullParams::default()),
            Arc::new(NullStaking::new()),
            Arc::new(NullGlobal::default()),
            Arc::new(NullAccounts::new()),
        );
        let store = NullValidatorStore::new();
        let vote = ValidatorMsg::Vote(VoteMsg::new("voter", Vec::<&str>::new()));
        assert!(matches!(
            handle(&manager, &store, &vote),
            Err(ValidatorError::InvalidVotedValidators(_))
        ));
        let long = ValidatorMsg::Update(UpdateMsg::new("alice", "x".repeat(301)));
        assert!(matches!(
            handle(&manager, &store, &long),
            Err(ValidatorError::InvalidWebsite(_))
        ));
    }
}
