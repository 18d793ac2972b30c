use crate::error::Error;
use std::{fmt, ops::{Mul, Neg}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The sign joining the two operands of a sum: `left + right` or `left - right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    /// `left - right`.
    Minus,

    /// `left + right`.
    Plus,
}

impl Sign {
    /// Returns the sign as the floating-point number `1.0` or `-1.0`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Plus => 1.0,
            Self::Minus => -1.0,
        }
    }

    /// Multiplies the given value by this sign.
    ///
    /// For [`Sign::Minus`], this is a plain IEEE-754 negation, so `0.0` becomes `-0.0`.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }

    /// Returns true if this is [`Sign::Plus`].
    pub fn is_plus(self) -> bool {
        matches!(self, Self::Plus)
    }
}

/// `s₁s₂`, as used when regrouping nested sums.
impl Mul for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        if self == rhs {
            Self::Plus
        } else {
            Self::Minus
        }
    }
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

impl TryFrom<i32> for Sign {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Plus),
            -1 => Ok(Self::Minus),
            _ => Err(Error::InvalidSign(value)),
        }
    }
}

impl From<Sign> for i32 {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}
