//! Tier balancing.
//!
//! [`balance`] restores the tier size limits and refreshes the lowest-vote
//! caches. [`react`] is the targeted move applied to one validator after its
//! received votes changed; callers always follow it with a full [`balance`].
//!
//! Lowest and highest are picked by scanning a tier in list order and
//! keeping the first validator with the extreme vote count.

use stakeset_store::{Tier, Validator};
use stakeset_types::{AccountKey, Coin, ValidatorParams, DECIMALS, VALIDATOR_MAX_POWER};
use tracing::{debug, info};

use crate::staged::Staged;
use crate::ValidatorError;

/// Consensus power of an Oncall validator holding `votes`.
pub fn oncall_power(votes: Coin) -> i64 {
    let power = (votes.raw() / DECIMALS).clamp(1, VALIDATOR_MAX_POWER as i128);
    power as i64
}

fn apply_tier_power(validator: &mut Validator, tier: Tier) {
    validator.committing_power = match tier {
        Tier::Oncall => oncall_power(validator.received_votes),
        Tier::Standby => 1,
        Tier::Candidate | Tier::Jail => 0,
    };
    if tier == Tier::Jail {
        validator.absent_commit = 0;
        validator.num_slash = 0;
    }
}

/// Move `username` into `to` and set the power that tier implies.
pub(crate) fn move_validator(
    staged: &mut Staged<'_>,
    username: &AccountKey,
    to: Tier,
) -> Result<(), ValidatorError> {
    let mut validator = staged.listed_validator(username)?;
    let from = staged.list_mut().move_to(username, to);
    apply_tier_power(&mut validator, to);
    info!(
        validator = %username,
        from = %from.map(|t| t.to_string()).unwrap_or_else(|| "unlisted".into()),
        to = %to,
        power = validator.committing_power,
        "validator changed tier"
    );
    staged.put_validator(validator);
    Ok(())
}

/// Recompute the power of `username` for the tier it already occupies.
fn refresh_power(staged: &mut Staged<'_>, username: &AccountKey, tier: Tier) -> Result<(), ValidatorError> {
    let mut validator = staged.listed_validator(username)?;
    let before = validator.committing_power;
    apply_tier_power(&mut validator, tier);
    if validator.committing_power != before {
        staged.put_validator(validator);
    }
    Ok(())
}

fn extreme(
    staged: &mut Staged<'_>,
    tier: Tier,
    better: fn(Coin, Coin) -> bool,
) -> Result<Option<(AccountKey, Coin)>, ValidatorError> {
    let members = staged.list().members(tier).to_vec();
    let mut best: Option<(AccountKey, Coin)> = None;
    for name in members {
        let votes = staged.listed_validator(&name)?.received_votes;
        match &best {
            Some((_, current)) if !better(votes, *current) => {}
            _ => best = Some((name, votes)),
        }
    }
    Ok(best)
}

fn lowest(staged: &mut Staged<'_>, tier: Tier) -> Result<Option<(AccountKey, Coin)>, ValidatorError> {
    extreme(staged, tier, |candidate, current| candidate < current)
}

fn highest(staged: &mut Staged<'_>, tier: Tier) -> Result<Option<(AccountKey, Coin)>, ValidatorError> {
    extreme(staged, tier, |candidate, current| candidate > current)
}

/// Run the full balance pass.
pub(crate) fn balance(staged: &mut Staged<'_>, params: &ValidatorParams) -> Result<(), ValidatorError> {
    while staged.list().oncall.len() > params.oncall_size {
        match lowest(staged, Tier::Oncall)? {
            Some((name, _)) => move_validator(staged, &name, Tier::Standby)?,
            None => break,
        }
    }

    while staged.list().standby.len() > params.standby_size {
        match lowest(staged, Tier::Standby)? {
            Some((name, _)) => move_validator(staged, &name, Tier::Candidate)?,
            None => break,
        }
    }

    while staged.list().oncall.len() < params.oncall_size {
        let next = match highest(staged, Tier::Standby)? {
            Some(found) => Some(found),
            None => highest(staged, Tier::Candidate)?,
        };
        match next {
            Some((name, _)) => move_validator(staged, &name, Tier::Oncall)?,
            None => break,
        }
    }

    while staged.list().standby.len() < params.standby_size {
        match highest(staged, Tier::Candidate)? {
            Some((name, _)) => move_validator(staged, &name, Tier::Standby)?,
            None => break,
        }
    }

    let (lowest_oncall, lowest_oncall_votes) = lowest(staged, Tier::Oncall)?.unwrap_or_default();
    let (lowest_standby, lowest_standby_votes) =
        lowest(staged, Tier::Standby)?.unwrap_or_default();

    let list = staged.list();
    if list.lowest_oncall != lowest_oncall
        || list.lowest_oncall_votes != lowest_oncall_votes
        || list.lowest_standby != lowest_standby
        || list.lowest_standby_votes != lowest_standby_votes
    {
        let list = staged.list_mut();
        list.lowest_oncall = lowest_oncall;
        list.lowest_oncall_votes = lowest_oncall_votes;
        list.lowest_standby = lowest_standby;
        list.lowest_standby_votes = lowest_standby_votes;
    }

    let list = staged.list();
    debug!(
        oncall = list.oncall.len(),
        standby = list.standby.len(),
        candidates = list.candidates.len(),
        jail = list.jail.len(),
        lowest_oncall_votes = %list.lowest_oncall_votes,
        lowest_standby_votes = %list.lowest_standby_votes,
        "validator list balanced"
    );
    Ok(())
}

/// Reposition `username` after its received votes grew (`increased`) or
/// shrank, judged against the cached lowest votes of each tier.
pub(crate) fn react(
    staged: &mut Staged<'_>,
    username: &AccountKey,
    increased: bool,
) -> Result<(), ValidatorError> {
    let Some(tier) = staged.list().tier_of(username) else {
        return Ok(());
    };
    let votes = staged.listed_validator(username)?.received_votes;
    let lowest_oncall = staged.list().lowest_oncall_votes;
    let lowest_standby = staged.list().lowest_standby_votes;

    match (tier, increased) {
        (Tier::Oncall, true) => refresh_power(staged, username, tier)?,
        (Tier::Oncall, false) => {
            refresh_power(staged, username, tier)?;
            if votes < lowest_standby {
                move_validator(staged, username, Tier::Candidate)?;
            } else if votes < lowest_oncall {
                move_validator(staged, username, Tier::Standby)?;
            }
        }
        (Tier::Standby, true) => {
            if votes > lowest_oncall {
                move_validator(staged, username, Tier::Oncall)?;
            }
        }
        (Tier::Standby, false) => {
            if votes < lowest_standby {
                move_validator(staged, username, Tier::Candidate)?;
            }
        }
        (Tier::Candidate, true) => {
            if votes > lowest_oncall {
                move_validator(staged, username, Tier::Oncall)?;
            } else if votes > lowest_standby {
                move_validator(staged, username, Tier::Standby)?;
            }
        }
        (Tier::Candidate, false) | (Tier::Jail, _) => {}
    }
    Ok(())
}
