//! Conversions between native Rust data and [`Value`].

use crate::{
    encoding::{decode_with, encode_with, Options},
    inum::Inum,
    vecmap::VecMap,
    Value::{self, *},
};
use failure::{bail, format_err, Error};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use std::{
    collections::{BTreeMap, HashMap},
    convert::TryFrom,
    hash::{BuildHasher, Hash},
};

/// A value representable as a [`Value`].
pub trait Repr: Sized {
    /// Converts value into a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::rep::*;
    ///
    /// let v = 1u8.to_value();
    /// ```
    fn to_value(&self) -> Value;

    /// Consumes value, converting it into a [`Value`].
    fn into_value(self) -> Value { self.to_value() }

    /// Converts a [`Value`] back into `Self`.
    ///
    /// # Arguments
    ///
    /// `v: Value` - The value to be converted.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::rep::*;
    ///
    /// let v = "foo".to_string().into_value();
    ///
    /// assert_eq!(String::from_value(v).unwrap(), "foo");
    /// ```
    fn from_value(v: Value) -> Result<Self, Error>;
}

/// Encodes a native value.
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// assert_eq!(encode_rep(&vec![Some(true), None], &Options::default()), "L2:BT1:N0:");
/// ```
pub fn encode_rep<T: Repr>(t: &T, opts: &Options) -> String { encode_with(&t.to_value(), opts) }

/// Decodes text straight into a native value.
///
/// Decoding errors are [`CodecError`](crate::errors::CodecError)s and can be recovered
/// with `downcast_ref`.
pub fn decode_rep<T: Repr>(s: &str, opts: &Options) -> Result<T, Error> {
    T::from_value(decode_with(s, opts)?)
}

/// Pops the next value from an iterator and converts it.
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// let fields = &mut decode("L4:Sadd4:F2.50:").unwrap().into_seq().unwrap().into_iter();
///
/// let op: String = pop_value(fields).unwrap();
/// let amount: f64 = pop_value(fields).unwrap();
///
/// assert_eq!((op.as_str(), amount), ("add", 2.5));
/// assert!(pop_value::<f64, _>(fields).is_err());
/// ```
pub fn pop_value<T: Repr, I: Iterator<Item = Value>>(iter: &mut I) -> Result<T, Error> {
    match iter.next() {
        Some(v) => T::from_value(v),
        None => bail!("Ran out of values"),
    }
}

fn mismatch<T>(expected: &str, found: &Value) -> Result<T, Error> {
    bail!("Expected `{}`, found `{}`", expected, found.type_name())
}

/// Integers may arrive as integral floats, since that is how most peers send them.
fn to_inum(v: &Value) -> Result<Inum, Error> {
    match v {
        Int(i) => Ok(i.clone()),
        Float(f) if f.is_finite() && f.fract() == 0.0 => BigInt::from_f64(*f)
            .map(Inum::from)
            .ok_or_else(|| format_err!("Float {} has no integer value", f)),
        Float(f) => bail!("Float {} is not integral", f),
        other => mismatch("Int", other),
    }
}

impl Repr for Value {
    fn to_value(&self) -> Value { self.clone() }

    fn into_value(self) -> Value { self }

    fn from_value(v: Value) -> Result<Self, Error> { Ok(v) }
}

impl Repr for bool {
    fn to_value(&self) -> Value { Bool(*self) }

    fn from_value(v: Value) -> Result<Self, Error> {
        match v {
            Bool(b) => Ok(b),
            other => mismatch("Bool", &other),
        }
    }
}

impl Repr for () {
    fn to_value(&self) -> Value { Null }

    fn from_value(v: Value) -> Result<Self, Error> {
        match v {
            Null => Ok(()),
            other => mismatch("Null", &other),
        }
    }
}

impl Repr for Inum {
    fn to_value(&self) -> Value { Int(self.clone()) }

    fn into_value(self) -> Value { Int(self) }

    fn from_value(v: Value) -> Result<Self, Error> { to_inum(&v) }
}

impl Repr for BigInt {
    fn to_value(&self) -> Value { Value::from(self.clone()) }

    fn from_value(v: Value) -> Result<Self, Error> { Ok(to_inum(&v)?.into_int()) }
}

macro_rules! int_repr {
    ($($t:ty),*) => {
        $(
            impl Repr for $t {
                fn to_value(&self) -> Value { Value::from(*self) }

                fn from_value(v: Value) -> Result<Self, Error> {
                    let i = to_inum(&v)?;
                    match i.to_i128().and_then(|n| <$t>::try_from(n).ok()) {
                        Some(n) => Ok(n),
                        None => match i.to_u128().and_then(|n| <$t>::try_from(n).ok()) {
                            Some(n) => Ok(n),
                            None => bail!("{} is out of range for `{}`", i, stringify!($t)),
                        },
                    }
                }
            }
        )*
    };
}

int_repr!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Repr for f64 {
    fn to_value(&self) -> Value { Float(*self) }

    fn from_value(v: Value) -> Result<Self, Error> {
        match v {
            Float(f) => Ok(f),
            Int(i) => Ok(i.to_f64()),
            other => mismatch("Float", &other),
        }
    }
}

impl Repr for f32 {
    fn to_value(&self) -> Value { Float(*self as f64) }

    fn from_value(v: Value) -> Result<Self, Error> { Ok(f64::from_value(v)? as f32) }
}

impl Repr for String {
    fn to_value(&self) -> Value { Text(self.clone()) }

    fn into_value(self) -> Value { Text(self) }

    fn from_value(v: Value) -> Result<Self, Error> {
        match v {
            Text(s) => Ok(s),
            other => mismatch("Text", &other),
        }
    }
}

impl Repr for char {
    fn to_value(&self) -> Value { Text(self.to_string()) }

    fn from_value(v: Value) -> Result<Self, Error> {
        let s = String::from_value(v)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => bail!("Expected a single character, found {:?}", s),
        }
    }
}

impl<T: Repr> Repr for Option<T> {
    fn to_value(&self) -> Value { self.as_ref().map_or(Null, T::to_value) }

    fn into_value(self) -> Value { self.map_or(Null, T::into_value) }

    fn from_value(v: Value) -> Result<Self, Error> {
        match v {
            Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Repr> Repr for Vec<T> {
    fn to_value(&self) -> Value { Seq(self.iter().map(T::to_value).collect()) }

    fn into_value(self) -> Value { Seq(self.into_iter().map(T::into_value).collect()) }

    fn from_value(v: Value) -> Result<Self, Error> {
        v.into_seq()?.into_iter().map(T::from_value).collect()
    }
}

impl<K: Repr, V: Repr> Repr for VecMap<K, V> {
    fn to_value(&self) -> Value {
        Map(self
            .iter()
            .map(|(k, v)| (k.to_value(), v.to_value()))
            .collect())
    }

    fn into_value(self) -> Value {
        Map(self
            .into_iter()
            .map(|(k, v)| (k.into_value(), v.into_value()))
            .collect())
    }

    fn from_value(v: Value) -> Result<Self, Error> {
        v.into_map()?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

impl<K, V, S> Repr for HashMap<K, V, S>
where
    K: Repr + Eq + Hash,
    V: Repr,
    S: BuildHasher + Default,
{
    fn to_value(&self) -> Value {
        Map(self
            .iter()
            .map(|(k, v)| (k.to_value(), v.to_value()))
            .collect())
    }

    fn from_value(v: Value) -> Result<Self, Error> {
        v.into_map()?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

impl<K: Repr + Ord, V: Repr> Repr for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Map(self
            .iter()
            .map(|(k, v)| (k.to_value(), v.to_value()))
            .collect())
    }

    fn from_value(v: Value) -> Result<Self, Error> {
        v.into_map()?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::IntegerTag;

    #[test]
    fn ints_survive_the_float_wire() {
        let opts = Options::default();
        let enc = encode_rep(&vec![1u8, 2, 255], &opts);
        assert_eq!(enc, "L2:F12:F24:F2550:");
        let dec: Vec<u8> = decode_rep(&enc, &opts).unwrap();
        assert_eq!(dec, vec![1, 2, 255]);
    }

    #[test]
    fn out_of_range() {
        assert!(u8::from_value(Value::from(256)).is_err());
        assert!(u32::from_value(Value::from(-1)).is_err());
        assert!(i64::from_value(Value::from(1.5)).is_err());
        assert!(i64::from_value(Value::from("1")).is_err());
        assert_eq!(i8::from_value(Value::from(-128)).unwrap(), -128);
        assert_eq!(u128::from_value(Value::from(u128::max_value())).unwrap(), u128::max_value());
    }

    #[test]
    fn large_integral_floats() {
        let n = BigInt::from_value(Value::from(1e40)).unwrap();
        assert_eq!(n.to_string(), format!("{:.0}", 1e40));
        assert!(BigInt::from_value(Value::from(std::f64::INFINITY)).is_err());
    }

    #[test]
    fn option_and_unit() {
        assert_eq!(Option::<bool>::from_value(Null).unwrap(), None);
        assert_eq!(Option::<bool>::from_value(Bool(true)).unwrap(), Some(true));
        assert!(<()>::from_value(Bool(true)).is_err());
    }

    #[test]
    fn chars() {
        assert_eq!(char::from_value(Value::from("x")).unwrap(), 'x');
        assert!(char::from_value(Value::from("xy")).is_err());
        assert!(char::from_value(Value::from("")).is_err());
    }

    #[test]
    fn hashmap_round_trip() {
        let mut m: HashMap<String, Vec<i64>> = HashMap::new();
        m.insert("a".into(), vec![1, -2]);
        m.insert("b".into(), vec![]);

        let opts = Options::new().with_integers(IntegerTag::Int);
        let dec: HashMap<String, Vec<i64>> = decode_rep(&encode_rep(&m, &opts), &opts).unwrap();
        assert_eq!(dec, m);
    }

    #[test]
    fn decode_errors_downcast() {
        let err = decode_rep::<Vec<u8>>("X", &Options::default()).unwrap_err();
        let codec = err.downcast_ref::<crate::errors::CodecError>().unwrap();
        assert_eq!(codec.kind(), crate::errors::ErrorKind::MalformedInput);
    }
}
