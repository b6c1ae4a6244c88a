//! Fundamental types for stakeset.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account keys, coin amounts, consensus keys, validator parameters, and duty enums.

pub mod account;
pub mod coin;
pub mod error;
pub mod keys;
pub mod params;
pub mod state;

pub use account::AccountKey;
pub use coin::{Coin, DECIMALS};
pub use error::TypesError;
pub use keys::{ConsensusAddress, PublicKey};
pub use params::{
    ValidatorParams, MAXIMUM_LINK_URL, MAX_VOTED_VALIDATORS, VALIDATOR_MAX_POWER,
};
pub use state::{Duty, PunishType};
