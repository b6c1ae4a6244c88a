//! Account key type: the on-chain username.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum username length in bytes.
pub const MINIMUM_USERNAME_LENGTH: usize = 3;

/// Maximum username length in bytes.
pub const MAXIMUM_USERNAME_LENGTH: usize = 20;

/// A username identifying an account, a voter, and a validator.
///
/// Construction never fails; call [`AccountKey::is_valid`] before trusting a
/// key that came off the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountKey(String);

impl AccountKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A valid username is 3 to 20 characters of `[a-z0-9.-]`, starts with a
    /// lowercase letter, ends with a letter or digit, and never has two
    /// separators (`.` or `-`) next to each other.
    pub fn is_valid(&self) -> bool {
        let bytes = self.0.as_bytes();
        if bytes.len() < MINIMUM_USERNAME_LENGTH || bytes.len() > MAXIMUM_USERNAME_LENGTH {
            return false;
        }
        if !bytes[0].is_ascii_lowercase() {
            return false;
        }
        let last = bytes[bytes.len() - 1];
        if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
            return false;
        }

        let is_separator = |b: u8| b == b'.' || b == b'-';
        let mut prev_separator = false;
        for &b in bytes {
            let separator = is_separator(b);
            if !(separator || b.is_ascii_lowercase() || b.is_ascii_digit()) {
                return false;
            }
            if separator && prev_separator {
                return false;
            }
            prev_separator = separator;
        }
        true
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
