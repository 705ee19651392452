use super::*;
use crate::{
    errors::CodecError,
    float::parse_float,
    util::split_at_len,
    Inum, Value,
};
use log::trace;

/// Recursive descent over one input string.
///
/// Every container passes an exact slice to its children, so no parser ever looks past
/// the payload its length prefix declared.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decoder<'o> {
    opts: &'o Options,
}

type Res<T> = Result<T, CodecError>;

fn malformed<T>(msg: String) -> Res<T> { Err(CodecError::MalformedInput(msg)) }

/// Splits `s` after its first character.
#[inline]
fn split_tag(s: &str) -> Option<(char, &str)> {
    let c = s.chars().next()?;
    Some((c, &s[c.len_utf8()..]))
}

impl<'o> Decoder<'o> {
    pub(crate) fn new(opts: &'o Options) -> Self { Decoder { opts } }

    /// Decodes `input`, which holds exactly one encoded value.
    /// `depth` is the number of containers enclosing it.
    pub(crate) fn value(&self, input: &str, depth: usize) -> Res<Value> {
        let (tag, body) = match split_tag(input) {
            Some(split) => split,
            None => return malformed("expected a value, found empty input".to_owned()),
        };

        match tag {
            TAG_NULL => {
                if body.is_empty() {
                    Ok(Value::Null)
                } else {
                    malformed(format!("malformed null body {:?}", body))
                }
            }
            TAG_BOOL => match body {
                BODY_TRUE => Ok(Value::Bool(true)),
                BODY_FALSE => Ok(Value::Bool(false)),
                _ => malformed(format!("malformed boolean body {:?}", body)),
            },
            TAG_INT => match body.parse::<Inum>() {
                Ok(i) => Ok(Value::Int(i)),
                Err(()) => malformed(format!("malformed integer body {:?}", body)),
            },
            TAG_FLOAT => match parse_float(body) {
                Some(f) => Ok(Value::Float(f)),
                None => malformed(format!("malformed float body {:?}", body)),
            },
            TAG_TEXT => Ok(Value::Text(body.to_owned())),
            TAG_MAP => self.map(body, self.enter(depth)?),
            c if is_seq_tag(c) => self.seq(body, self.enter(depth)?).map(Value::Seq),
            unknown => malformed(format!("unknown type tag {:?}", unknown)),
        }
    }

    /// Checks the nesting bound before entering a container.
    fn enter(&self, depth: usize) -> Res<usize> {
        let depth = depth + 1;
        if depth > self.opts.max_depth {
            Err(CodecError::ResourceLimit(format!(
                "nesting exceeds the maximum depth of {}",
                self.opts.max_depth
            )))
        } else {
            Ok(depth)
        }
    }

    /// Decodes the body of a sequence, i.e. everything after its tag.
    fn seq(&self, body: &str, depth: usize) -> Res<Vec<Value>> {
        trace!("decoding sequence at depth {}", depth);

        let mut out = Vec::new();
        let mut rest = body;
        while rest != SENTINEL {
            if rest.is_empty() {
                return malformed("sequence is missing its `0:` terminator".to_owned());
            }
            let (len, after_len) = self.read_len(rest)?;
            let (elem, after_elem) = self.take(after_len, len)?;
            out.push(self.value(elem, depth)?);
            rest = after_elem;
        }
        Ok(out)
    }

    /// Decodes a tagged sequence in map position, i.e. the key or value list of a map.
    fn tagged_seq(&self, input: &str, depth: usize, what: &str) -> Res<Vec<Value>> {
        match split_tag(input) {
            Some((tag, body)) if is_seq_tag(tag) => self.seq(body, depth),
            _ => malformed(format!("map {} are not a sequence", what)),
        }
    }

    /// Decodes the body of a map.
    fn map(&self, body: &str, depth: usize) -> Res<Value> {
        trace!("decoding map at depth {}", depth);

        let (len, rest) = self.read_len(body)?;
        let (keys, vals) = match self.opts.key_prefix {
            KeyPrefix::Whole => {
                let (keys_str, vals_str) = self.take(rest, len)?;
                (self.tagged_seq(keys_str, depth, "keys")?, vals_str)
            }
            KeyPrefix::Body => match split_tag(rest) {
                Some((tag, after_tag)) if is_seq_tag(tag) => {
                    let (keys_body, vals_str) = self.take(after_tag, len)?;
                    (self.seq(keys_body, depth)?, vals_str)
                }
                _ => return malformed("map keys are not a sequence".to_owned()),
            },
        };
        let vals = self.tagged_seq(vals, depth, "values")?;

        if keys.len() != vals.len() {
            return malformed(format!(
                "map has {} keys but {} values",
                keys.len(),
                vals.len()
            ));
        }

        Ok(Value::Map(keys.into_iter().zip(vals).collect()))
    }

    /// Reads a decimal length and its `:` separator.
    fn read_len<'a>(&self, input: &'a str) -> Res<(usize, &'a str)> {
        let sep = match input.find(LEN_SEP) {
            Some(sep) => sep,
            None => return malformed(format!("missing `{}` after length", LEN_SEP)),
        };
        let digits = &input[..sep];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return malformed(format!("malformed length {:?}", digits));
        }
        match digits.parse::<usize>() {
            Ok(len) => Ok((len, &input[sep + LEN_SEP.len_utf8()..])),
            Err(_) => malformed(format!("length {} is out of range", digits)),
        }
    }

    /// Splits off the first `len` units of `input`.
    fn take<'a>(&self, input: &'a str, len: usize) -> Res<(&'a str, &'a str)> {
        match split_at_len(input, len, self.opts.unit) {
            Some(split) => Ok(split),
            None => malformed(format!(
                "declared length {} does not fit the remaining input",
                len
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn kind(s: &str) -> ErrorKind {
        Decoder::new(&Options::default())
            .value(s, 0)
            .unwrap_err()
            .kind()
    }

    #[test]
    fn read_len() {
        let opts = Options::default();
        let de = Decoder::new(&opts);
        assert_eq!(de.read_len("12:abc").unwrap(), (12, "abc"));
        assert_eq!(de.read_len("0:").unwrap(), (0, ""));
        assert!(de.read_len("12").is_err());
        assert!(de.read_len(":").is_err());
        assert!(de.read_len("-1:").is_err());
        assert!(de.read_len("+1:").is_err());
        assert!(de.read_len("99999999999999999999999:").is_err());
    }

    #[test]
    fn scalar_bodies() {
        assert_eq!(kind("N0"), ErrorKind::MalformedInput);
        assert_eq!(kind("BX"), ErrorKind::MalformedInput);
        assert_eq!(kind("BTT"), ErrorKind::MalformedInput);
        assert_eq!(kind("I"), ErrorKind::MalformedInput);
        assert_eq!(kind("I1.5"), ErrorKind::MalformedInput);
        assert_eq!(kind("F"), ErrorKind::MalformedInput);
        assert_eq!(kind("Fabc"), ErrorKind::MalformedInput);
        assert_eq!(kind(""), ErrorKind::MalformedInput);
        assert_eq!(kind("\u{e9}"), ErrorKind::MalformedInput);
    }

    #[test]
    fn missing_terminator() {
        assert_eq!(kind("L"), ErrorKind::MalformedInput);
        assert_eq!(kind("L2:BT"), ErrorKind::MalformedInput);
        assert_eq!(kind("L2:BT0"), ErrorKind::MalformedInput);
        // an empty element is not a value
        assert_eq!(kind("L0:0:"), ErrorKind::MalformedInput);
    }

    #[test]
    fn map_sides_must_be_sequences() {
        assert_eq!(kind("D2:S0:L0:"), ErrorKind::MalformedInput);
        assert_eq!(kind("D2:L0:N"), ErrorKind::MalformedInput);
        assert_eq!(kind("D2:L0:"), ErrorKind::MalformedInput);
        assert_eq!(kind("D"), ErrorKind::MalformedInput);
    }

    #[test]
    fn depth_is_counted_per_container() {
        let opts = Options::new().with_max_depth(2);
        let de = Decoder::new(&opts);
        assert!(de.value("L3:L0:0:", 0).is_ok());
        assert_eq!(
            de.value("L8:L3:L0:0:0:", 0).unwrap_err().kind(),
            ErrorKind::ResourceLimit
        );
        assert_eq!(
            Decoder::new(&Options::new().with_max_depth(0))
                .value("L0:", 0)
                .unwrap_err()
                .kind(),
            ErrorKind::ResourceLimit
        );
    }
}
