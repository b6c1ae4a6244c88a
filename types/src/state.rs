//! State enums for staking duties and punishments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a staked account currently performs.
///
/// Every account with stake starts as a [`Duty::Voter`]; registering as a
/// validator or app swaps the duty and freezes part of the stake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duty {
    #[default]
    Voter,
    Validator,
    App,
    /// Duty was released and the frozen stake is waiting out its cooldown.
    Pending,
}

impl Duty {
    pub fn is_voter(&self) -> bool {
        matches!(self, Self::Voter)
    }
}

/// Why a committing validator is being punished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunishType {
    /// Missed too many block signatures.
    AbsentCommit,
    /// Double-signed or otherwise reported by consensus evidence.
    Byzantine,
}

impl fmt::Display for PunishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbsentCommit => write!(f, "absent_commit"),
            Self::Byzantine => write!(f, "byzantine"),
        }
    }
}
