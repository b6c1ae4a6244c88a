//! stakeset node: runs the validator manager over a store.
//!
//! The node wires the validator tier manager to its keepers and a store,
//! then drives it block by block:
//! - begin-block signing stats and punishment
//! - transaction delivery (register, revoke, vote, update)
//! - inflation payouts
//! - end-block validator updates for the consensus engine
//!
//! A fatal error halts the node rather than letting a block commit half
//! applied.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod script;

pub use app::{TxResult, ValidatorApp};
pub use config::{GenesisAccount, GenesisConfig, GenesisValidator, NodeConfig, StoreBackend};
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use script::{BlockResult, BlockScript, ScriptBlock, StakeChange};
