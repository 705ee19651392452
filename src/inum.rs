use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive};
use std::{convert::TryFrom, fmt, str::FromStr};

use crate::{from_as, from_fn};

/// `Inum`s are either `i64` or `BigInt`s (i.e., big integers).
///
/// Values that fit into an `i64` are always stored as [`Inum::I64`] when built through
/// the `From` impls or [`FromStr`], but equality compares numeric values regardless.
#[derive(Clone, Debug)]
pub enum Inum {
    I64(i64),
    Int(BigInt),
}

use Inum::*;

from_fn!(Inum, i64, I64);
from_fn!(Inum, u64, |u| {
    let i = u as i64;
    if i >= 0 {
        Inum::from(i)
    } else {
        Inum::Int(BigInt::from(u))
    }
});

from_fn!(Inum, BigInt, |i: BigInt| {
    i.to_i64().map_or_else(|| Int(i), I64)
});

from_fn!(Inum, i128, |i: i128| {
    if let Ok(small) = i64::try_from(i) {
        I64(small)
    } else {
        Int(BigInt::from(i))
    }
});

from_fn!(Inum, u128, |u: u128| {
    if let Ok(small) = i64::try_from(u) {
        I64(small)
    } else {
        Int(BigInt::from(u))
    }
});

from_as!(Inum, isize, i64);
from_as!(Inum, usize, u64);

impl From<Inum> for BigInt {
    fn from(i: Inum) -> BigInt { i.into_int() }
}

impl TryFrom<Inum> for i64 {
    type Error = BigInt;

    fn try_from(i: Inum) -> Result<Self, BigInt> {
        match i {
            Inum::I64(i) => Ok(i),
            Inum::Int(i) => i.to_i64().ok_or(i),
        }
    }
}

impl TryFrom<Inum> for u64 {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> { n.to_u64().ok_or(n) }
}

impl PartialEq for Inum {
    fn eq(&self, other: &Inum) -> bool {
        match (self, other) {
            (I64(a), I64(b)) => a == b,
            (a, b) => a.to_int() == b.to_int(),
        }
    }
}

impl Eq for Inum {}

impl PartialEq<i64> for Inum {
    fn eq(&self, other: &i64) -> bool {
        match self {
            I64(i) => i.eq(other),
            Int(i) => i.eq(&BigInt::from(*other)),
        }
    }
}

impl fmt::Display for Inum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            I64(i) => write!(f, "{}", i),
            Int(i) => write!(f, "{}", i),
        }
    }
}

impl FromStr for Inum {
    type Err = ();

    /// Parses an optionally negative run of ASCII decimal digits. Anything else,
    /// including a leading `+` or surrounding whitespace, is rejected.
    fn from_str(s: &str) -> Result<Inum, ()> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        match s.parse::<i64>() {
            Ok(i) => Ok(I64(i)),
            Err(_) => BigInt::from_str_radix(s, 10).map(Inum::from).map_err(|_| ()),
        }
    }
}

impl Inum {
    /// Consumes `self` to produce a `BigInt`.
    pub fn into_int(self) -> BigInt {
        match self {
            Inum::I64(i) => BigInt::from(i),
            Inum::Int(i) => i,
        }
    }

    /// Produces a `BigInt`.
    pub fn to_int(&self) -> BigInt {
        match self {
            Inum::I64(i) => BigInt::from(*i),
            Inum::Int(i) => i.clone(),
        }
    }

    /// Produces an `i64` if the value fits, otherwise returns `None`.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Inum::I64(i) => Some(*i),
            Inum::Int(i) => i.to_i64(),
        }
    }

    /// Produces a `u64` if the value is non-negative and fits, otherwise returns `None`.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Inum::I64(i) => u64::try_from(*i).ok(),
            Inum::Int(i) => i.to_u64(),
        }
    }

    /// Produces an `i128` if the value fits, otherwise returns `None`.
    pub fn to_i128(&self) -> Option<i128> {
        match self {
            Inum::I64(i) => Some(*i as i128),
            Inum::Int(i) => i.to_i128(),
        }
    }

    /// Produces a `u128` if the value is non-negative and fits, otherwise returns `None`.
    pub fn to_u128(&self) -> Option<u128> {
        match self {
            Inum::I64(i) => u128::try_from(*i).ok(),
            Inum::Int(i) => i.to_u128(),
        }
    }

    /// The nearest `f64`. Very large magnitudes become infinite.
    pub fn to_f64(&self) -> f64 {
        match self {
            Inum::I64(i) => *i as f64,
            Inum::Int(i) => i.to_f64().unwrap_or(std::f64::NAN),
        }
    }
}

#[macro_export]
macro_rules! from_prims {
    ($to:tt) => {
        from_as!($to, i32, i64);
        from_as!($to, i16, i64);
        from_as!($to, i8, i64);

        from_as!($to, u32, i64);
        from_as!($to, u16, i64);
        from_as!($to, u8, i64);
    };
}

from_prims!(Inum);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_small_bigints() {
        match Inum::from(BigInt::from(7)) {
            I64(7) => (),
            other => panic!("expected I64(7), got {:?}", other),
        }
        assert_eq!(Int(BigInt::from(7)), I64(7));
    }

    #[test]
    fn u64_overflow_becomes_big() {
        let n = Inum::from(u64::max_value());
        match &n {
            Int(_) => (),
            other => panic!("expected a BigInt, got {:?}", other),
        }
        assert_eq!(n.to_u64(), Some(u64::max_value()));
        assert_eq!(n.to_i64(), None);
    }

    #[test]
    fn parse() {
        assert_eq!("0".parse::<Inum>(), Ok(I64(0)));
        assert_eq!("-42".parse::<Inum>(), Ok(I64(-42)));
        assert_eq!(
            "123456789012345678901234567890".parse::<Inum>().map(|i| i.to_string()),
            Ok("123456789012345678901234567890".to_string())
        );

        assert!("".parse::<Inum>().is_err());
        assert!("-".parse::<Inum>().is_err());
        assert!("+1".parse::<Inum>().is_err());
        assert!("1.0".parse::<Inum>().is_err());
        assert!(" 1".parse::<Inum>().is_err());
    }

    #[test]
    fn i128_bounds() {
        let big = Inum::from(i128::min_value());
        assert_eq!(big.to_i128(), Some(i128::min_value()));
        assert_eq!(Inum::from(5i128), I64(5));
    }
}
