//! Per-voter election vote records.

use serde::{Deserialize, Serialize};
use stakeset_types::{AccountKey, Coin};

/// One voter's share pointed at one validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionVote {
    pub validator_name: AccountKey,
    pub vote: Coin,
}

/// The full set of shares a voter currently casts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionVoteList {
    pub election_votes: Vec<ElectionVote>,
}

impl ElectionVoteList {
    pub fn is_empty(&self) -> bool {
        self.election_votes.is_empty()
    }

    /// Sum of every share in the list.
    pub fn total(&self) -> Coin {
        self.election_votes
            .iter()
            .fold(Coin::ZERO, |acc, v| acc + v.vote)
    }

    /// The share pointed at `validator`, zero when the list does not name it.
    pub fn vote_for(&self, validator: &AccountKey) -> Coin {
        self.election_votes
            .iter()
            .filter(|v| &v.validator_name == validator)
            .fold(Coin::ZERO, |acc, v| acc + v.vote)
    }

    /// The validators this list votes for, in list order.
    pub fn validator_names(&self) -> Vec<AccountKey> {
        self.election_votes
            .iter()
            .map(|v| v.validator_name.clone())
            .collect()
    }
}

/// Query view: a validator's name and its received votes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedVotesStatus {
    pub validator_name: AccountKey,
    pub received_votes: Coin,
}
