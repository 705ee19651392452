pub use crate::{
    encoding::{
        decode, decode_bytes, decode_with, encode, encode_bytes, encode_into, encode_with,
        IntegerTag, KeyPrefix, LengthUnit, Options,
    },
    errors::{CodecError, ErrorKind},
    inum::Inum,
    rep::*,
    vecmap::VecMap,
    Value,
};
pub use num_bigint::BigInt;
pub use num_traits::Num;
pub use std::{convert::TryFrom, str::FromStr};
