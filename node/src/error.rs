use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("validator error: {0}")]
    Validator(#[from] stakeset_validator::ValidatorError),

    #[error("store error: {0}")]
    Store(#[from] stakeset_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] stakeset_store_lmdb::LmdbError),

    #[error("keeper error: {0}")]
    Keeper(#[from] stakeset_keepers::KeeperError),

    #[error("config error: {0}")]
    Config(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The chain stopped at `height` and accepts no further blocks.
    #[error("chain halted at height {height}: {reason}")]
    Halted { height: u64, reason: String },
}
