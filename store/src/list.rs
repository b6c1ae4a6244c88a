//! The singleton validator list and the tier enum.

use serde::{Deserialize, Serialize};
use stakeset_types::{AccountKey, Coin};
use std::fmt;

/// The four disjoint positions a listed validator can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Full-power block producers.
    Oncall,
    /// Power-1 backups that still sign blocks.
    Standby,
    /// Registered but not committing.
    Candidate,
    /// Punished; only re-registration moves a validator out.
    Jail,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Oncall, Tier::Standby, Tier::Candidate, Tier::Jail];

    /// Whether members of this tier are part of the committing set.
    pub fn is_committing(&self) -> bool {
        matches!(self, Self::Oncall | Self::Standby)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oncall => write!(f, "oncall"),
            Self::Standby => write!(f, "standby"),
            Self::Candidate => write!(f, "candidate"),
            Self::Jail => write!(f, "jail"),
        }
    }
}

/// Tier membership of every listed validator.
///
/// A username appears in at most one of the four sequences. The lowest-vote
/// caches are only refreshed by the balancer, so they may lag membership
/// changes made in between.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorList {
    pub oncall: Vec<AccountKey>,
    pub standby: Vec<AccountKey>,
    pub candidates: Vec<AccountKey>,
    pub jail: Vec<AccountKey>,
    /// `oncall ++ standby` as of the start of the current block.
    pub pre_block_validators: Vec<AccountKey>,
    pub lowest_oncall_votes: Coin,
    pub lowest_oncall: AccountKey,
    pub lowest_standby_votes: Coin,
    pub lowest_standby: AccountKey,
}

impl ValidatorList {
    pub fn members(&self, tier: Tier) -> &[AccountKey] {
        match tier {
            Tier::Oncall => &self.oncall,
            Tier::Standby => &self.standby,
            Tier::Candidate => &self.candidates,
            Tier::Jail => &self.jail,
        }
    }

    fn members_mut(&mut self, tier: Tier) -> &mut Vec<AccountKey> {
        match tier {
            Tier::Oncall => &mut self.oncall,
            Tier::Standby => &mut self.standby,
            Tier::Candidate => &mut self.candidates,
            Tier::Jail => &mut self.jail,
        }
    }

    /// The tier `username` currently occupies, if any.
    pub fn tier_of(&self, username: &AccountKey) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|tier| self.members(*tier).contains(username))
    }

    /// Append `username` to `tier`. The caller must have removed it from any
    /// other tier first.
    pub fn insert(&mut self, tier: Tier, username: AccountKey) {
        self.members_mut(tier).push(username);
    }

    /// Remove `username` from whichever tier holds it, preserving the order
    /// of the remaining members.
    pub fn remove(&mut self, username: &AccountKey) -> Option<Tier> {
        let tier = self.tier_of(username)?;
        self.members_mut(tier).retain(|name| name != username);
        Some(tier)
    }

    /// Move `username` to `to`, returning the tier it left.
    pub fn move_to(&mut self, username: &AccountKey, to: Tier) -> Option<Tier> {
        let from = self.remove(username);
        self.insert(to, username.clone());
        from
    }

    /// Oncall then Standby, in list order.
    pub fn committing(&self) -> Vec<AccountKey> {
        self.oncall.iter().chain(self.standby.iter()).cloned().collect()
    }

    /// Oncall, Standby, then Candidates. Jailed validators are excluded.
    pub fn all_validators(&self) -> Vec<AccountKey> {
        self.oncall
            .iter()
            .chain(self.standby.iter())
            .chain(self.candidates.iter())
            .cloned()
            .collect()
    }

    /// Every listed username, jail included.
    pub fn all_listed(&self) -> impl Iterator<Item = &AccountKey> {
        self.oncall
            .iter()
            .chain(self.standby.iter())
            .chain(self.candidates.iter())
            .chain(self.jail.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> AccountKey {
        AccountKey::from(s)
    }

    #[test]
    fn move_to_keeps_tiers_disjoint() {
        let mut list = ValidatorList::default();
        list.insert(Tier::Candidate, key("alice"));
        list.insert(Tier::Candidate, key("bob"));

        assert_eq!(list.move_to(&key("alice"), Tier::Oncall), Some(Tier::Candidate));
        assert_eq!(list.tier_of(&key("alice")), Some(Tier::Oncall));
        assert_eq!(list.candidates, vec![key("bob")]);
        assert_eq!(list.all_listed().count(), 2);
    }

    #[test]
    fn remove_unlisted_is_none() {
        let mut list = ValidatorList::default();
        assert_eq!(list.remove(&key("ghost")), None);
    }

    #[test]
    fn committing_is_oncall_then_standby() {
        let mut list = ValidatorList::default();
        list.insert(Tier::Standby, key("carol"));
        list.insert(Tier::Oncall, key("alice"));
        list.insert(Tier::Candidate, key("dave"));
        list.insert(Tier::Jail, key("erin"));
        assert_eq!(list.committing(), vec![key("alice"), key("carol")]);
        assert_eq!(
            list.all_validators(),
            vec![key("alice"), key("carol"), key("dave")]
        );
    }
}
