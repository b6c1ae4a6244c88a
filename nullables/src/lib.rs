//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator of the validator core (storage, parameters, staking,
//! global pools, accounts) is abstracted behind a trait. This crate provides
//! in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests. The daemon also
//! uses them as its in-process economic ledger.

pub mod accounts;
pub mod global;
pub mod params;
pub mod staking;
pub mod store;

pub use accounts::NullAccounts;
pub use global::NullGlobal;
pub use params::NullParams;
pub use staking::NullStaking;
pub use store::NullValidatorStore;
