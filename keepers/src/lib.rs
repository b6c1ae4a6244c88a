//! Collaborator traits consumed by the validator manager.
//!
//! Parameters, the staking ledger, global inflation pools, and account
//! balances all live outside the validator core. The core talks to them only
//! through these traits, so tests and the node can plug in their own
//! implementations.

pub mod account;
pub mod error;
pub mod global;
pub mod hooks;
pub mod param;
pub mod staking;

pub use account::AccountKeeper;
pub use error::KeeperError;
pub use global::GlobalKeeper;
pub use hooks::StakingHooks;
pub use param::ParamKeeper;
pub use staking::StakingKeeper;
