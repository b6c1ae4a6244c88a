//! Validator records and the abstract storage trait.
//!
//! Every storage backend (LMDB, in-memory for testing) implements
//! [`ValidatorStore`]. The rest of the codebase depends only on the trait.

pub mod batch;
pub mod election;
pub mod error;
pub mod list;
pub mod validator;

pub use batch::{BatchOp, WriteBatch};
pub use election::{ElectionVote, ElectionVoteList, ReceivedVotesStatus};
pub use error::StoreError;
pub use list::{Tier, ValidatorList};
pub use validator::{Validator, ValidatorStore};
