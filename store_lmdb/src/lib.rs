//! LMDB storage backend for stakeset.
//!
//! Implements [`stakeset_store::ValidatorStore`] using the `heed` LMDB
//! bindings. Validator records, the validator list, and election vote lists
//! each live in their own database within a single environment.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod validator;
pub mod write_batch;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_integrity, IntegrityReport};
pub use validator::LmdbValidatorStore;
