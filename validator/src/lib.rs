//! Validator tier management for a proof-of-stake chain.
//!
//! Registered validators sit in one of four tiers:
//! - **Oncall**: full-power block producers, power follows received votes
//! - **Standby**: backup signers with power 1
//! - **Candidate**: registered but not committing
//! - **Jail**: punished, leaves only by registering again
//!
//! Voters split their stake evenly across the validators they name. Every
//! change to a validator's received votes re-settles the tiers.
//!
//! ## Module overview
//!
//! - [`manager`] — Registration, revocation, votes and queries.
//! - [`balancer`] — Tier size limits and per-validator repositioning.
//! - [`votes`] — Election vote splits and deltas.
//! - [`punish`] — Signing statistics, slashing and jail.
//! - [`abci`] — Validator set updates for the consensus engine.
//! - [`inflation`] — Weighted inflation payouts.
//! - [`hooks`] — Stake-change hooks.
//! - [`handler`] — Message dispatch.

pub mod abci;
pub mod balancer;
pub mod error;
pub mod handler;
pub mod hooks;
pub mod inflation;
pub mod manager;
pub mod punish;
mod staged;
pub mod votes;

pub use abci::ValidatorUpdate;
pub use balancer::oncall_power;
pub use error::ValidatorError;
pub use handler::handle;
pub use hooks::ValidatorHooks;
pub use manager::ValidatorManager;
pub use punish::{Evidence, VoteInfo};
pub use votes::{split_stake, vote_deltas};
