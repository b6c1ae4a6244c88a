//! Nullable parameter keeper.

use stakeset_keepers::ParamKeeper;
use stakeset_types::ValidatorParams;
use std::sync::Mutex;

/// Parameters that can be swapped at any point in a test.
pub struct NullParams {
    params: Mutex<ValidatorParams>,
}

impl NullParams {
    pub fn new(params: ValidatorParams) -> Self {
        Self {
            params: Mutex::new(params),
        }
    }

    pub fn set(&self, params: ValidatorParams) {
        *self.params.lock().unwrap() = params;
    }
}

impl Default for NullParams {
    fn default() -> Self {
        Self::new(ValidatorParams::default())
    }
}

impl ParamKeeper for NullParams {
    fn validator_params(&self) -> ValidatorParams {
        self.params.lock().unwrap().clone()
    }
}
