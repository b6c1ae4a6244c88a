//! Message validation logic.

use std::collections::HashSet;

use crate::error::TransactionError;
use crate::ValidatorMsg;
use stakeset_types::{AccountKey, MAXIMUM_LINK_URL, MAX_VOTED_VALIDATORS};

/// Validate a message's basic structure (usernames, link length, vote list).
///
/// This performs stateless validation only. Stateful checks (duty, stake,
/// existing registrations) are done by the validator manager.
pub fn validate_basic(msg: &ValidatorMsg) -> Result<(), TransactionError> {
    check_username(msg.signer())?;

    match msg {
        ValidatorMsg::Register(m) => check_link(&m.link),
        ValidatorMsg::Update(m) => check_link(&m.link),
        ValidatorMsg::Revoke(_) => Ok(()),
        ValidatorMsg::Vote(m) => check_voted_validators(&m.voted_validators),
    }
}

fn check_username(username: &AccountKey) -> Result<(), TransactionError> {
    if !username.is_valid() {
        return Err(TransactionError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

fn check_link(link: &str) -> Result<(), TransactionError> {
    if link.len() > MAXIMUM_LINK_URL {
        return Err(TransactionError::InvalidWebsite {
            len: link.len(),
            limit: MAXIMUM_LINK_URL,
        });
    }
    Ok(())
}

fn check_voted_validators(voted: &[AccountKey]) -> Result<(), TransactionError> {
    if voted.is_empty() {
        return Err(TransactionError::InvalidVotedValidators {
            reason: "no validators named".into(),
        });
    }
    if voted.len() > MAX_VOTED_VALIDATORS {
        return Err(TransactionError::InvalidVotedValidators {
            reason: format!("{} named, limit is {}", voted.len(), MAX_VOTED_VALIDATORS),
        });
    }
    let mut seen = HashSet::with_capacity(voted.len());
    for name in voted {
        if !name.is_valid() {
            return Err(TransactionError::InvalidVotedValidators {
                reason: format!("invalid username {:?}", name.as_str()),
            });
        }
        if !seen.insert(name) {
            return Err(TransactionError::InvalidVotedValidators {
                reason: format!("{} named twice", name),
            });
        }
    }
    Ok(())
}
