//! Coin amounts.
//!
//! Amounts are fixed-point integers in raw coin units. One LINO is
//! [`DECIMALS`] raw units. The type is signed because vote deltas and
//! retractions are carried as coins too.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Raw units per LINO.
pub const DECIMALS: i128 = 100_000;

/// Serialized as a decimal string of raw units in human-readable formats
/// (TOML has no 128-bit integers) and as a plain `i128` otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coin(i128);

impl Coin {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: i128) -> Self {
        Self(raw)
    }

    /// A whole number of LINO.
    pub fn from_lino(lino: i64) -> Self {
        Self(lino as i128 * DECIMALS)
    }

    pub fn raw(&self) -> i128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divide by an integer count, truncating toward zero. Returns `None`
    /// for a zero divisor.
    pub fn checked_div_int(self, divisor: i64) -> Option<Self> {
        self.0.checked_div(divisor as i128).map(Self)
    }

    /// `self * numerator / denominator`, truncating. Returns `None` on a zero
    /// denominator or overflow.
    pub fn checked_mul_ratio(self, numerator: i64, denominator: i64) -> Option<Self> {
        self.0
            .checked_mul(numerator as i128)?
            .checked_div(denominator as i128)
            .map(Self)
    }
}

impl Add for Coin {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Coin {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Coin {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Coin {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Coin {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} coin", self.0)
    }
}

impl std::str::FromStr for Coin {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Serialize for Coin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.0.to_string())
        } else {
            serializer.serialize_i128(self.0)
        }
    }
}

struct CoinVisitor;

impl<'de> Visitor<'de> for CoinVisitor {
    type Value = Coin;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer amount of raw coin units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Coin, E> {
        Ok(Coin(v as i128))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Coin, E> {
        Ok(Coin(v as i128))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Coin, E> {
        Ok(Coin(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Coin, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Coin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(CoinVisitor)
        } else {
            deserializer.deserialize_i128(CoinVisitor)
        }
    }
}
