//! Election vote deltas.
//!
//! A voter's stake is split evenly across the validators it names. Changing
//! the named set, or the stake behind it, is expressed as signed deltas
//! against each validator's received votes.

use stakeset_store::{ElectionVote, ElectionVoteList};
use stakeset_types::{AccountKey, Coin, ValidatorParams};
use tracing::{debug, warn};

use crate::balancer;
use crate::staged::Staged;
use crate::ValidatorError;

/// The list a voter with `stake` holds after naming `validators`.
pub fn split_stake(stake: Coin, validators: &[AccountKey]) -> Result<ElectionVoteList, ValidatorError> {
    let share = stake
        .checked_div_int(validators.len() as i64)
        .ok_or_else(|| ValidatorError::InvalidVotedValidators("no validators named".into()))?;
    Ok(ElectionVoteList {
        election_votes: validators
            .iter()
            .map(|name| ElectionVote {
                validator_name: name.clone(),
                vote: share,
            })
            .collect(),
    })
}

/// Signed deltas that turn `previous` into `next`, in first-seen order.
///
/// Every previous entry is retracted in full; each new share is folded into
/// its validator's retraction or appended.
pub fn vote_deltas(previous: &ElectionVoteList, next: &ElectionVoteList) -> Vec<ElectionVote> {
    let mut deltas: Vec<ElectionVote> = previous
        .election_votes
        .iter()
        .map(|v| ElectionVote {
            validator_name: v.validator_name.clone(),
            vote: -v.vote,
        })
        .collect();

    for vote in &next.election_votes {
        match deltas
            .iter_mut()
            .find(|d| d.validator_name == vote.validator_name)
        {
            Some(delta) => delta.vote += vote.vote,
            None => deltas.push(vote.clone()),
        }
    }
    deltas
}

/// Recompute `voter`'s list for `validators` with `stake` and return the
/// deltas along with the new list.
pub(crate) fn election_vote_updates(
    staged: &mut Staged<'_>,
    voter: &AccountKey,
    validators: &[AccountKey],
    stake: Coin,
) -> Result<(Vec<ElectionVote>, ElectionVoteList), ValidatorError> {
    let previous = staged.election_votes(voter)?;
    if validators.is_empty() {
        if previous.is_empty() {
            return Ok((Vec::new(), previous));
        }
        return Err(ValidatorError::InvalidVotedValidators(
            "no validators named".into(),
        ));
    }
    let next = split_stake(stake, validators)?;
    Ok((vote_deltas(&previous, &next), next))
}

/// Add each delta to its validator's received votes and rebalance after
/// every change.
pub(crate) fn apply_deltas(
    staged: &mut Staged<'_>,
    params: &ValidatorParams,
    voter: &AccountKey,
    deltas: &[ElectionVote],
) -> Result<(), ValidatorError> {
    for delta in deltas {
        if delta.vote.is_zero() {
            continue;
        }
        let Some(mut validator) = staged.validator(&delta.validator_name)? else {
            warn!(
                %voter,
                validator = %delta.validator_name,
                delta = %delta.vote,
                "vote delta for deleted validator skipped"
            );
            continue;
        };
        validator.received_votes += delta.vote;
        debug!(
            %voter,
            validator = %delta.validator_name,
            delta = %delta.vote,
            received_votes = %validator.received_votes,
            "received votes updated"
        );
        staged.put_validator(validator);
        balancer::react(staged, &delta.validator_name, delta.vote.is_positive())?;
        balancer::balance(staged, params)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[(&str, i128)]) -> ElectionVoteList {
        ElectionVoteList {
            election_votes: entries
                .iter()
                .map(|(name, vote)| ElectionVote {
                    validator_name: (*name).into(),
                    vote: Coin::new(*vote),
                })
                .collect(),
        }
    }

    #[test]
    fn split_truncates_remainder() {
        let names: Vec<AccountKey> = vec!["val1".into(), "val2".into(), "val3".into()];
        let split = split_stake(Coin::new(10), &names).unwrap();
        assert_eq!(split.total(), Coin::new(9));
        assert!(split.election_votes.iter().all(|v| v.vote == Coin::new(3)));
    }

    #[test]
    fn split_of_nothing_is_rejected() {
        assert!(matches!(
            split_stake(Coin::new(10), &[]),
            Err(ValidatorError::InvalidVotedValidators(_))
        ));
    }

    #[test]
    fn deltas_net_out_overlap() {
        let previous = list(&[("val1", 50), ("val2", 50)]);
        let next = list(&[("val2", 30), ("val3", 30), ("val4", 30)]);
        let deltas = vote_deltas(&previous, &next);
        assert_eq!(deltas, list(&[("val1", -50), ("val2", -20), ("val3", 30), ("val4", 30)]).election_votes);
    }

    #[test]
    fn revoting_same_set_nets_zero() {
        let previous = list(&[("val1", 50), ("val2", 50)]);
        let deltas = vote_deltas(&previous, &previous);
        assert!(deltas.iter().all(|d| d.vote.is_zero()));
    }

    #[test]
    fn first_vote_is_all_positive() {
        let deltas = vote_deltas(&ElectionVoteList::default(), &list(&[("val1", 7)]));
        assert_eq!(deltas, list(&[("val1", 7)]).election_votes);
    }
}
