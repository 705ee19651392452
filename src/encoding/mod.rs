//! # RePy text encoder and decoder
//!
//! Encode and decode functions, and the [`Options`] that tune them.
//!
//! # Example
//!
//! ```
//! use repy_serial::prelude::*;
//!
//! let value = Value::from(vec![Value::from("groups"), Value::from(3)]);
//!
//! // by default integers travel as floats, as the browser client sends them
//! assert_eq!(encode(&value), "L7:Sgroups2:F30:");
//!
//! // tag them as integers instead
//! let opts = Options::new().with_integers(IntegerTag::Int);
//! let enc = encode_with(&value, &opts);
//! assert_eq!(enc, "L7:Sgroups2:I30:");
//!
//! // Note: decoding returns a `Result`
//! let dec = decode_with(&enc, &opts).unwrap();
//! assert_eq!(dec, value);
//! ```

use crate::{errors::CodecError, util::text_len, vecmap::VecMap, Value};
use bytes::Bytes;
use log::debug;

pub mod ser;
pub use ser::*;
mod de;
use de::Decoder;
mod constants;
use constants::*;
pub use constants::DEFAULT_MAX_DEPTH;

/// How [`Value::Int`] is tagged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerTag {
    /// `F`, like a float. JavaScript peers have a single number type and always send
    /// integers this way; integers decode back as [`Value::Float`].
    Float,
    /// `I`. Integers decode back as [`Value::Int`].
    Int,
}

/// What the length prefix of a map's key sequence counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// The key sequence without its `L` tag. The empty map is `D2:L0:L0:`.
    Body,
    /// The whole key sequence, tag included. The empty map is `D3:L0:L0:`. This is how
    /// the JavaScript and Python peers frame maps.
    Whole,
}

/// What a length prefix counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Unicode scalar values.
    Chars,
    /// UTF-16 code units, what JavaScript's `String.length` counts.
    Utf16,
    /// UTF-8 bytes.
    Bytes,
}

/// Encoder and decoder options.
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// let opts = Options::new()
///     .with_max_depth(8)
///     .with_max_input_len(1 << 20)
///     .with_unit(LengthUnit::Bytes);
///
/// assert_eq!(opts.max_depth, 8);
/// assert_eq!(opts.max_input_len, Some(1 << 20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum container nesting accepted by the decoder.
    pub max_depth: usize,
    /// Maximum input length, in `unit`s, accepted by the decoder.
    pub max_input_len: Option<usize>,
    /// How integers are tagged by the encoder.
    pub integers: IntegerTag,
    /// What the length prefix of map keys counts.
    pub key_prefix: KeyPrefix,
    /// What every length prefix counts.
    pub unit: LengthUnit,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
            integers: IntegerTag::Float,
            key_prefix: KeyPrefix::Body,
            unit: LengthUnit::Chars,
        }
    }
}

impl Options {
    /// Creates the default options.
    pub fn new() -> Self { Self::default() }

    /// Options that interoperate with the JavaScript and Python peers: integers as
    /// floats, whole-sequence key prefixes and UTF-16 lengths.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// let legacy = Options::legacy();
    ///
    /// assert_eq!(encode_with(&Value::Map(VecMap::new()), &legacy), "D3:L0:L0:");
    /// assert_eq!(encode_with(&Value::from("\u{1F600}"), &legacy), "S\u{1F600}");
    /// assert_eq!(encode_with(&Value::from(vec!["\u{1F600}"]), &legacy), "L3:S\u{1F600}0:");
    /// ```
    pub fn legacy() -> Self {
        Options {
            key_prefix: KeyPrefix::Whole,
            unit: LengthUnit::Utf16,
            ..Self::default()
        }
    }

    /// Set the maximum nesting depth for decoding.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum input length for decoding.
    pub fn with_max_input_len(mut self, len: usize) -> Self {
        self.max_input_len = Some(len);
        self
    }

    /// Set how integers are tagged.
    pub fn with_integers(mut self, integers: IntegerTag) -> Self {
        self.integers = integers;
        self
    }

    /// Set what the length prefix of map keys counts.
    pub fn with_key_prefix(mut self, key_prefix: KeyPrefix) -> Self {
        self.key_prefix = key_prefix;
        self
    }

    /// Set what length prefixes count.
    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }
}

/// Encode a value, appending its text to `out`.
///
/// # Arguments
///
/// * `t: T` - The value to be encoded.
/// * `out: &mut S` - Where the encoder output will be stored.
/// * `opts: &Options` - Encoder options.
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// // output buffer
/// let out = &mut String::from("payload=");
///
/// encode_into(&Value::Null, out, &Options::default());
///
/// assert_eq!(*out, "payload=N");
/// ```
pub fn encode_into<T: Ser, S: Serializer>(t: T, out: &mut S, opts: &Options) { t.ser(out, opts) }

/// Encodes a [`Value`] with the default [`Options`].
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// assert_eq!(encode(&Value::from(true)), "BT");
/// ```
pub fn encode(v: &Value) -> String { encode_with(v, &Options::default()) }

/// Encodes a [`Value`] with the given [`Options`].
pub fn encode_with(v: &Value, opts: &Options) -> String {
    let mut out = String::new();
    v.ser(&mut out, opts);
    out.finalize()
}

/// Encodes a [`Value`] into a byte body, e.g. for an HTTP request.
pub fn encode_bytes(v: &Value, opts: &Options) -> Bytes { Bytes::from(encode_with(v, opts)) }

/// Decodes text into a [`Value`] with the default [`Options`].
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// assert_eq!(decode("L0:").unwrap(), Value::Seq(vec![]));
///
/// // Did the decoding succeed?
/// match decode("L5:ab") {
///     Ok(_) => panic!("the declared length does not fit"),
///     Err(e) => assert_eq!(e.kind(), ErrorKind::MalformedInput),
/// }
/// ```
pub fn decode(s: &str) -> Result<Value, CodecError> { decode_with(s, &Options::default()) }

/// Decodes text into a [`Value`] with the given [`Options`].
///
/// Fails with [`CodecError::MalformedInput`] if `s` does not match the wire grammar, and
/// with [`CodecError::ResourceLimit`] if it is longer than `opts.max_input_len` or nests
/// deeper than `opts.max_depth`. No partial value is ever returned.
pub fn decode_with(s: &str, opts: &Options) -> Result<Value, CodecError> {
    let res = check_input_len(s, opts).and_then(|()| Decoder::new(opts).value(s, 0));
    if let Err(e) = &res {
        debug!("rejected input of {} bytes: {}", s.len(), e);
    }
    res
}

/// Decodes a byte body into a [`Value`]. Bodies that are not UTF-8 are malformed.
///
/// # Example
///
/// ```
/// use repy_serial::prelude::*;
///
/// let body = encode_bytes(&Value::from("hi"), &Options::default());
///
/// assert_eq!(decode_bytes(&body, &Options::default()).unwrap(), Value::from("hi"));
/// assert!(decode_bytes(&[b'S', 0xff], &Options::default()).is_err());
/// ```
pub fn decode_bytes(bs: &[u8], opts: &Options) -> Result<Value, CodecError> {
    match std::str::from_utf8(bs) {
        Ok(s) => decode_with(s, opts),
        Err(e) => {
            let err = CodecError::MalformedInput(format!("input is not valid UTF-8 ({})", e));
            debug!("rejected input of {} bytes: {}", bs.len(), err);
            Err(err)
        }
    }
}

fn check_input_len(s: &str, opts: &Options) -> Result<(), CodecError> {
    match opts.max_input_len {
        // byte length bounds every unit from above
        Some(max) if s.len() > max && text_len(s, opts.unit) > max => {
            Err(CodecError::ResourceLimit(format!(
                "input is longer than the maximum of {} {:?}",
                max, opts.unit
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::ErrorKind, Inum};
    use num_bigint::BigInt;

    fn int_opts() -> Options { Options::new().with_integers(IntegerTag::Int) }

    #[test]
    fn constants() {
        assert_eq!(encode(&Value::Null), "N");
        assert_eq!(encode(&Value::from(true)), "BT");
        assert_eq!(encode(&Value::from(false)), "BF");
    }

    #[test]
    fn integers_as_floats() {
        assert_eq!(encode(&Value::from(0)), "F0");
        assert_eq!(encode(&Value::from(-17)), "F-17");
        assert_eq!(decode("F-17").unwrap(), Value::from(-17.0));
    }

    #[test]
    fn integers_as_integers() {
        assert_eq!(encode_with(&Value::from(-17), &int_opts()), "I-17");

        let big = BigInt::from(u64::max_value()) * BigInt::from(1000);
        let enc = encode_with(&Value::from(big.clone()), &int_opts());
        assert_eq!(enc, "I18446744073709551615000");
        assert_eq!(decode(&enc).unwrap(), Value::Int(Inum::Int(big)));
    }

    #[test]
    fn floats() {
        assert_eq!(encode(&Value::from(2.5)), "F2.5");
        assert_eq!(encode(&Value::from(3.0)), "F3");
        assert_eq!(encode(&Value::from(std::f64::NAN)), "FNaN");
        assert_eq!(decode("F1e+21").unwrap(), Value::from(1e21));
    }

    #[test]
    fn text_is_unescaped() {
        assert_eq!(encode(&Value::from("a:b0:")), "Sa:b0:");
        assert_eq!(decode("S").unwrap(), Value::from(""));
    }

    #[test]
    fn small_seq() {
        let v = Value::from(vec![Value::Null, Value::from("xyz")]);
        assert_eq!(encode(&v), "L1:N4:Sxyz0:");
    }

    #[test]
    fn nested_seq_lengths() {
        let v = Value::from(vec![Value::from(vec![Value::Null])]);
        // inner is "L1:N0:", six characters
        assert_eq!(encode(&v), "L6:L1:N0:0:");
    }

    #[test]
    fn small_map() {
        let m = Value::from(VecMap::from(vec![("a", "b")]));
        // keys "L2:Sa0:" has a body of six characters
        assert_eq!(encode(&m), "D6:L2:Sa0:L2:Sb0:");

        let whole = Options::new().with_key_prefix(KeyPrefix::Whole);
        assert_eq!(encode_with(&m, &whole), "D7:L2:Sa0:L2:Sb0:");
        assert_eq!(decode_with("D7:L2:Sa0:L2:Sb0:", &whole).unwrap(), m);
    }

    #[test]
    fn map_keys_keep_their_type() {
        let m = Value::from(VecMap::from(vec![
            (Value::Null, Value::from(1.5)),
            (Value::from(vec![Value::from(true)]), Value::from("x")),
        ]));
        assert_eq!(decode(&encode(&m)).unwrap(), m);
    }

    #[test]
    fn synonym_sequence_tags() {
        let expected = Value::from(vec![Value::Null]);
        for tag in &["L", "T", "s", "f"] {
            assert_eq!(decode(&format!("{}1:N0:", tag)).unwrap(), expected);
        }
        // maps accept them for their key and value lists too
        assert_eq!(
            decode("D2:T0:s0:").unwrap(),
            Value::Map(VecMap::new())
        );
    }

    #[test]
    fn length_units() {
        let v = Value::from(vec!["\u{e9}"]);
        assert_eq!(encode(&v), "L2:S\u{e9}0:");
        assert_eq!(
            encode_with(&v, &Options::new().with_unit(LengthUnit::Bytes)),
            "L3:S\u{e9}0:"
        );
        assert_eq!(
            encode_with(&v, &Options::new().with_unit(LengthUnit::Utf16)),
            "L2:S\u{e9}0:"
        );
        // a byte length landing inside a character
        let bytes = Options::new().with_unit(LengthUnit::Bytes);
        assert_eq!(
            decode_with("L2:S\u{e9}0:", &bytes).unwrap_err().kind(),
            ErrorKind::MalformedInput
        );
    }

    #[test]
    fn input_len_limit() {
        let opts = Options::new().with_max_input_len(3);
        assert!(decode_with("L0:", &opts).is_ok());
        assert_eq!(
            decode_with("L1:N0:", &opts).unwrap_err().kind(),
            ErrorKind::ResourceLimit
        );

        // four bytes, one char
        let chars = Options::new().with_max_input_len(2);
        assert!(decode_with("S\u{1F600}", &chars).is_ok());
    }

    #[test]
    fn encode_into_appends() {
        let mut out = String::from("x");
        encode_into(&Value::from(vec![1.5]), &mut out, &Options::default());
        assert_eq!(out, "xL4:F1.50:");
    }

    #[test]
    fn bytes_bodies() {
        let v = Value::from(vec!["k"]);
        let body = encode_bytes(&v, &Options::default());
        assert_eq!(&body[..], b"L2:Sk0:");
        assert_eq!(decode_bytes(&body, &Options::default()).unwrap(), v);
        assert_eq!(
            decode_bytes(&[0xc3], &Options::default()).unwrap_err().kind(),
            ErrorKind::MalformedInput
        );
    }
}
