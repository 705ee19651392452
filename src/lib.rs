//! # repy_serial
//!
//! A codec for the RePy serialization format: a small, length-prefixed text encoding of
//! dynamically-typed values, used by browser clients and servers to exchange
//! request and response payloads.
//!
//! # Usage
//!
//! Build a [`Value`], [`encode`] it into a string, hand the string to whatever transport
//! you use, and [`decode`] it on the other side.
//!
//! ```
//! use repy_serial::prelude::*;
//!
//! let request = Value::Map(VecMap::from(vec![(
//!     Value::from("get_groups"),
//!     Value::from(vec![Value::from("alice"), Value::Null]),
//! )]));
//!
//! // encode
//! let encoded = encode(&request);
//!
//! // and then immediately decode, because this is an example
//! let decoded = decode(&encoded).unwrap();
//!
//! assert_eq!(request, decoded);
//! ```
//!
//! Native Rust data can be converted with the [`Repr`](rep::Repr) trait:
//!
//! ```
//! use repy_serial::prelude::*;
//! use std::collections::BTreeMap;
//!
//! let mut counts = BTreeMap::new();
//! counts.insert("vessels".to_string(), 4.5);
//!
//! let encoded = encode_rep(&counts, &Options::default());
//! let decoded: BTreeMap<String, f64> = decode_rep(&encoded, &Options::default()).unwrap();
//!
//! assert_eq!(counts, decoded);
//! ```
//!
//! # An overview of the value model
//!
//! | Variant        | Payload                          |
//! | ---            | ---                              |
//! | [`Value::Null`]  | none                           |
//! | [`Value::Bool`]  | [`bool`]                       |
//! | [`Value::Int`]   | [`Inum`], an `i64` or a `BigInt` |
//! | [`Value::Float`] | [`f64`]                        |
//! | [`Value::Text`]  | [`String`]                     |
//! | [`Value::Seq`]   | ordered [`Vec`] of values      |
//! | [`Value::Map`]   | [`VecMap`] of value pairs      |
//!
//! Lists, tuples, sets and frozensets of the peers all become [`Value::Seq`]. Map keys
//! are values too, not just strings.
//!
//! # Wire format
//!
//! Every encoded value starts with a one character *tag*, followed by a *body*.
//!
//! | Tag | Body                                                        |
//! | --- | ---                                                         |
//! | `N` | empty                                                       |
//! | `B` | `T` or `F`                                                  |
//! | `I` | decimal digits, optionally preceded by `-`                  |
//! | `F` | a decimal float, `NaN`, `Infinity` or `-Infinity`           |
//! | `S` | the raw characters of the string, unescaped                 |
//! | `L` | `<len>:<element>` for each element, then the sentinel `0:`  |
//! | `D` | `<len>:` then the key sequence, then the value sequence     |
//!
//! `<len>` is the decimal length of what follows the colon, so no content ever needs
//! escaping: a string may contain `5:L0:` and still decode verbatim. The length of the
//! key sequence of a `D` counts the sequence without its `L` tag by default; see
//! [`KeyPrefix`](encoding::KeyPrefix).
//!
//! The decoder also accepts `T`, `s` and `f` as sequence tags (tuples, sets and
//! frozensets); the encoder only writes `L`.
//!
//! ```
//! use repy_serial::prelude::*;
//!
//! assert_eq!(encode(&Value::Seq(vec![])), "L0:");
//! assert_eq!(encode(&Value::Map(VecMap::new())), "D2:L0:L0:");
//! assert_eq!(encode(&Value::from(vec!["ab"])), "L3:Sab0:");
//! ```

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod encoding;
pub mod errors;
pub mod float;
pub mod inum;
pub mod prelude;
pub mod rep;
pub mod util;
pub mod vecmap;

use bytes::Bytes;
use errors::CodecError;
use failure::{bail, Error};
use float::float_eq;
use inum::*;
use num_bigint::BigInt;
use std::convert::TryFrom;
use vecmap::*;

#[derive(Clone, Debug)]
/// [`Value`] and its variants.
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// Null. Corresponds to [`None`].
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::{Value::Int, *};
    ///
    /// let k_num = Int(Inum::I64(1));
    /// ```
    Int(Inum),
    /// Double precision floating point number.
    Float(f64),
    /// Text.
    Text(String),
    /// Ordered sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::{Value::Seq, *};
    ///
    /// let seq = Seq(vec![1, 2, 3, 4].into_iter().map(Value::from).collect());
    /// ```
    Seq(Vec<Value>),
    /// Map from values to values, in insertion order.
    ///
    /// ```
    /// use repy_serial::prelude::{Value::Map, *};
    ///
    /// let vmap = VecMap::from(vec![(Value::from("hello world"), Value::from(1))]);
    ///
    /// let map = Map(vmap);
    /// ```
    Map(VecMap<Value, Value>),
}

use Value::*;

impl Value {
    /// Converts a [`Value`] to a slice of values.
    /// This will return an [`Error`] if the value is not a [`Value::Seq`].
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// let v = Value::from(vec![1, 2, 3]);
    ///
    /// assert_eq!(v.to_seq().unwrap().len(), 3);
    /// ```
    pub fn to_seq(&self) -> Result<&[Value], Error> {
        match self {
            Seq(s) => Ok(s),
            _ => bail!("This value is not a `Seq`"),
        }
    }

    /// Consumes a [`Value`], converting it into a vector of values.
    /// This will return an [`Error`] if the value is not a [`Value::Seq`].
    pub fn into_seq(self) -> Result<Vec<Value>, Error> {
        match self {
            Seq(s) => Ok(s),
            _ => bail!("This value is not a `Seq`"),
        }
    }

    /// Converts a [`Value`] to a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    pub fn to_map(&self) -> Result<&VecMap<Value, Value>, Error> {
        match self {
            Map(m) => Ok(m),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Consumes a [`Value`], converting it into a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// let m = decode("D6:L2:Sk0:L2:BT0:").unwrap().into_map().unwrap();
    ///
    /// assert_eq!(m.get(&Value::from("k")), Some(&Value::Bool(true)));
    /// ```
    pub fn into_map(self) -> Result<VecMap<Value, Value>, Error> {
        match self {
            Map(m) => Ok(m),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Consumes the value, converting it to a value of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// let num: u8 = Value::from(1).into_rep().unwrap();
    ///
    /// assert_eq!(num, 1);
    /// ```
    pub fn into_rep<T: rep::Repr>(self) -> Result<T, Error> { T::from_value(self) }

    /// Builds a [`Value::Text`] from a byte string.
    ///
    /// The format only carries text, so a byte string that is not valid UTF-8 has no
    /// corresponding variant and yields [`CodecError::UnsupportedType`].
    ///
    /// # Example
    ///
    /// ```
    /// use bytes::Bytes;
    /// use repy_serial::prelude::*;
    ///
    /// let text = Value::from_utf8(Bytes::from_static(b"hello")).unwrap();
    /// assert_eq!(text, Value::from("hello"));
    ///
    /// let err = Value::from_utf8(Bytes::from_static(&[0xff, 0xfe])).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    /// ```
    pub fn from_utf8(bytes: Bytes) -> Result<Value, CodecError> {
        match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(Text(s)),
            Err(e) => Err(CodecError::UnsupportedType(format!(
                "byte string is not valid UTF-8 ({})",
                e.utf8_error()
            ))),
        }
    }

    /// Indicates whether a value is [`Null`].
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Tries to convert a value to an [`Inum`].
    /// This will return an [`Error`] if the value is not a [`Value::Int`].
    pub fn to_inum(&self) -> Result<&Inum, Error> {
        match self {
            Int(i) => Ok(i),
            _ => bail!("Value is not `Int`, cannot convert to `Inum`"),
        }
    }

    /// Tries to convert a value to an [`f64`]. Integers are widened.
    /// This will return an [`Error`] if the value is not numeric.
    pub fn to_f64(&self) -> Result<f64, Error> {
        match self {
            Float(f) => Ok(*f),
            Int(i) => Ok(i.to_f64()),
            _ => bail!("Value is not numeric"),
        }
    }

    /// Tries to convert a value to a [`bool`].
    /// This will return an [`Error`] if the value is not a [`Value::Bool`].
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// assert!(Value::from(true).to_bool().unwrap());
    /// ```
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self {
            Bool(b) => Ok(*b),
            _ => bail!("Value is not `Bool`"),
        }
    }

    /// Tries to convert a value to a `&str`.
    /// This will return an [`Error`] if the value is not a [`Value::Text`].
    pub fn to_text(&self) -> Result<&str, Error> {
        match self {
            Text(s) => Ok(s),
            _ => bail!("Value is not `Text`"),
        }
    }

    /// The name of the variant, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Null => "Null",
            Bool(_) => "Bool",
            Int(_) => "Int",
            Float(_) => "Float",
            Text(_) => "Text",
            Seq(_) => "Seq",
            Map(_) => "Map",
        }
    }
}

/// Structural equality. `Int` and `Float` never compare equal to each other, floats
/// compare numerically with NaN equal to itself, and maps ignore pair order.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => float_eq(*a, *b),
            (Text(a), Text(b)) => a == b,
            (Seq(a), Seq(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn fmt_map(m: &VecMap<Value, Value>, indent: usize) -> String {
            let mut map_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    map_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                map_string.push_str(&format!(
                    "{key}: {value}",
                    key = fmt_helper(k, indent + 2),
                    value = fmt_helper(v, indent + 2),
                ));

                if i == m.len() - 1 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            map_string.push('}');

            map_string
        }

        fn fmt_helper(v: &Value, indent: usize) -> String {
            match v {
                Null => "null".to_owned(),
                Bool(b) => b.to_string(),
                Text(s) => format!("{:?}", s),
                Float(x) => float::format_float(*x),
                Int(i) => i.to_string(),
                Seq(s) => {
                    let mut seq_string: String = "[".to_owned();
                    for (i, v) in s.iter().enumerate() {
                        if i != 0 {
                            seq_string.push_str(", ");
                        }
                        seq_string.push_str(&fmt_helper(v, indent));
                    }
                    seq_string.push(']');

                    seq_string
                }
                Map(m) => fmt_map(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl Default for Value {
    fn default() -> Self { Null }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Text(s.to_owned()) }
}

impl From<()> for Value {
    fn from(_: ()) -> Value { Null }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Value { o.map_or(Null, T::into) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Seq(v.into_iter().map(T::into).collect()) }
}

impl<K: Into<Value>, V: Into<Value>> From<VecMap<K, V>> for Value {
    fn from(m: VecMap<K, V>) -> Value {
        Map(m.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<Bytes> for Value {
    type Error = CodecError;

    fn try_from(bytes: Bytes) -> Result<Value, CodecError> { Value::from_utf8(bytes) }
}

from_fn!(Value, bool, Bool);
from_fn!(Value, Inum, Int);
from_fn!(Value, f64, Float);
from_fn!(Value, String, Text);
from_fn!(Value, char, |c: char| Text(c.to_string()));
from_as!(Value, f32, f64);

// Integers
compose_from!(Value, Inum, BigInt);
compose_from!(Value, Inum, isize);
compose_from!(Value, Inum, usize);
compose_from!(Value, Inum, i64);
compose_from!(Value, Inum, u64);
compose_from!(Value, Inum, i128);
compose_from!(Value, Inum, u128);
from_prims!(Value);

pub use encoding::{decode, decode_with, encode, encode_with};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());

        assert!(Value::from(5).to_inum().is_ok());

        assert!(Value::from(true).to_bool().unwrap());

        assert_eq!(Value::from("word").to_text().unwrap(), "word");

        assert!(Value::from(1.5).to_bool().is_err());
    }

    #[test]
    fn int_and_float_differ() {
        assert_ne!(Value::from(1), Value::from(1.0));
        assert_eq!(Value::from(1.0), Value::Float(1.0));
        assert_eq!(Value::from(0.0), Value::from(-0.0));
        assert_eq!(Value::from(std::f64::NAN), Value::from(std::f64::NAN));
    }

    #[test]
    fn maps_ignore_order() {
        let a = Value::from(VecMap::from(vec![("x", 1), ("y", 2)]));
        let b = Value::from(VecMap::from(vec![("y", 2), ("x", 1)]));
        assert_eq!(a, b);
    }

    #[test]
    fn seqs_respect_order() {
        assert_ne!(Value::from(vec![1, 2]), Value::from(vec![2, 1]));
    }

    #[test]
    fn from_option() {
        assert_eq!(Value::from(None::<i32>), Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }

    #[test]
    fn display() {
        let v = Value::from(vec![Value::from(1), Value::from("a"), Null, Value::from(2.5)]);
        assert_eq!(v.to_string(), "[1, \"a\", null, 2.5]");

        let m = Value::from(VecMap::from(vec![("k", true)]));
        assert_eq!(m.to_string(), "{\n  \"k\": true\n}");
    }
}
