//! Parameter keeper trait.

use stakeset_types::ValidatorParams;

/// Source of the current validator parameters.
pub trait ParamKeeper {
    fn validator_params(&self) -> ValidatorParams;
}
