//! Validator parameters and protocol-wide limits.
//!
//! The parameter set is read from the parameter keeper on every operation, so
//! changes take effect at the next call instead of being cached.

use crate::coin::Coin;
use serde::{Deserialize, Serialize};

/// Longest accepted validator link, in bytes.
pub const MAXIMUM_LINK_URL: usize = 300;

/// Upper bound on names in a single vote message. The tighter state-level
/// bound is [`ValidatorParams::max_voted_validators`].
pub const MAX_VOTED_VALIDATORS: usize = 50;

/// Ceiling on the committing power reported for an Oncall validator.
pub const VALIDATOR_MAX_POWER: i64 = 100_000_000_000;

/// Parameters governing validator tiers, punishment, and inflation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorParams {
    // ── Tier sizes ───────────────────────────────────────────────────────
    /// Number of Oncall seats (full-power block producers).
    pub oncall_size: usize,

    /// Number of Standby seats (power 1 backups).
    pub standby_size: usize,

    // ── Inflation ────────────────────────────────────────────────────────
    /// Inflation weight of one Oncall seat.
    pub oncall_inflation_weight: i64,

    /// Inflation weight of one Standby seat.
    pub standby_inflation_weight: i64,

    // ── Punishment ───────────────────────────────────────────────────────
    /// Missed signatures tolerated before an absent-commit punishment.
    /// Default: 600 blocks (~30 minutes).
    pub absent_commit_limitation: i64,

    /// Stake slashed for byzantine behavior.
    pub penalty_byzantine: Coin,

    /// Stake slashed for exceeding the absent-commit limitation.
    pub penalty_miss_commit: Coin,

    /// Punishments tolerated before a validator is jailed.
    pub slash_limitation: i64,

    // ── Deposits ─────────────────────────────────────────────────────────
    /// Stake frozen by the validator duty, and the floor below which a
    /// punished validator is jailed.
    pub validator_min_deposit: Coin,

    /// Cooldown in seconds before a revoked validator's frozen stake returns.
    /// Default: 7 days.
    pub validator_revoke_pending_sec: i64,

    // ── Voting ───────────────────────────────────────────────────────────
    /// Maximum number of validators one voter may back at once.
    pub max_voted_validators: usize,
}

impl Default for ValidatorParams {
    fn default() -> Self {
        Self {
            oncall_size: 22,
            standby_size: 7,
            oncall_inflation_weight: 2,
            standby_inflation_weight: 1,
            absent_commit_limitation: 600,
            penalty_byzantine: Coin::from_lino(1_000),
            penalty_miss_commit: Coin::from_lino(200),
            slash_limitation: 5,
            validator_min_deposit: Coin::from_lino(200_000),
            validator_revoke_pending_sec: 7 * 24 * 3600,
            max_voted_validators: 3,
        }
    }
}
