use std::{error::Error, fmt};

/// The kind of a [`CodecError`], without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A native value has no corresponding [`Value`](crate::Value) variant.
    UnsupportedType,
    /// The input does not match the wire grammar.
    MalformedInput,
    /// Nesting depth or input size exceeds the configured bound.
    ResourceLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An error encountered when encoding or decoding fails.
///
/// The codec never recovers from these; a failed decode yields no partial value.
pub enum CodecError {
    /// A native value has no corresponding [`Value`](crate::Value) variant.
    UnsupportedType(String),
    /// The input does not match the wire grammar.
    MalformedInput(String),
    /// Nesting depth or input size exceeds the configured bound.
    ResourceLimit(String),
}

impl CodecError {
    /// Creates a new [`CodecError::MalformedInput`].
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The message associated with the error.
    pub fn malformed(s: &str) -> Self { CodecError::MalformedInput(s.to_string()) }

    /// Creates a new [`CodecError::UnsupportedType`].
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The message associated with the error.
    pub fn unsupported(s: &str) -> Self { CodecError::UnsupportedType(s.to_string()) }

    /// Creates a new [`CodecError::ResourceLimit`].
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The message associated with the error.
    pub fn limit(s: &str) -> Self { CodecError::ResourceLimit(s.to_string()) }

    /// The kind of this error.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// let err = decode("X").unwrap_err();
    ///
    /// assert_eq!(err.kind(), ErrorKind::MalformedInput);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            CodecError::MalformedInput(_) => ErrorKind::MalformedInput,
            CodecError::ResourceLimit(_) => ErrorKind::ResourceLimit,
        }
    }

    /// The message associated with the error.
    pub fn message(&self) -> &str {
        match self {
            CodecError::UnsupportedType(s)
            | CodecError::MalformedInput(s)
            | CodecError::ResourceLimit(s) => s,
        }
    }
}

impl Error for CodecError {}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::UnsupportedType => "unsupported type",
            ErrorKind::MalformedInput => "malformed input",
            ErrorKind::ResourceLimit => "resource limit exceeded",
        };
        f.write_str(name)
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{kind}: {error}",
            kind = self.kind(),
            error = self.message(),
        )
    }
}
