use super::*;
use crate::{float::format_float, util::text_len, Inum, Value};

/// A sink for encoded text.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a character to the output value.
    fn put_char(&mut self, c: char);
    /// Add a string slice to the output value.
    fn put_str(&mut self, s: &str);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for String {
    type Out = Self;

    fn put_char(&mut self, c: char) { self.push(c) }

    fn put_str(&mut self, s: &str) { self.push_str(s) }

    fn finalize(self) -> Self::Out { self }
}

/// Convenience methods for [`Serializer`], one per variant of the value model.
pub trait SerializerExt: Serializer {
    /// Add `N`.
    fn put_null(&mut self);
    /// Add `BT` or `BF`.
    fn put_bool(&mut self, b: bool);
    /// Add an integer, tagged according to `opts.integers`.
    fn put_inum(&mut self, i: &Inum, opts: &Options);
    /// Add an `F` float.
    fn put_f64(&mut self, f: f64);
    /// Add an `S` string.
    fn put_text(&mut self, s: &str);
    /// Add an `L` sequence.
    fn put_seq<'a, I>(&mut self, items: I, opts: &Options)
    where
        I: IntoIterator<Item = &'a Value>;
    /// Add a `D` map.
    fn put_map(&mut self, m: &VecMap<Value, Value>, opts: &Options);
    /// Add `<len>:<payload>`, with `len` measured in `opts.unit`.
    fn put_framed(&mut self, payload: &str, opts: &Options);
}

impl<S: Serializer> SerializerExt for S {
    fn put_null(&mut self) { self.put_char(TAG_NULL) }

    fn put_bool(&mut self, b: bool) {
        self.put_char(TAG_BOOL);
        self.put_str(if b { BODY_TRUE } else { BODY_FALSE });
    }

    fn put_inum(&mut self, i: &Inum, opts: &Options) {
        match opts.integers {
            IntegerTag::Int => self.put_char(TAG_INT),
            IntegerTag::Float => self.put_char(TAG_FLOAT),
        }
        self.put_str(&i.to_string());
    }

    fn put_f64(&mut self, f: f64) {
        self.put_char(TAG_FLOAT);
        self.put_str(&format_float(f));
    }

    fn put_text(&mut self, s: &str) {
        self.put_char(TAG_TEXT);
        self.put_str(s);
    }

    fn put_seq<'a, I>(&mut self, items: I, opts: &Options)
    where
        I: IntoIterator<Item = &'a Value>,
    {
        self.put_char(TAG_LIST);
        for item in items {
            let mut elem = String::new();
            item.ser(&mut elem, opts);
            self.put_framed(&elem, opts);
        }
        self.put_str(SENTINEL);
    }

    fn put_map(&mut self, m: &VecMap<Value, Value>, opts: &Options) {
        let mut keys = String::new();
        keys.put_seq(m.keys(), opts);

        self.put_char(TAG_MAP);
        match opts.key_prefix {
            KeyPrefix::Whole => self.put_framed(&keys, opts),
            KeyPrefix::Body => {
                let body = &keys[TAG_LIST.len_utf8()..];
                self.put_str(&text_len(body, opts.unit).to_string());
                self.put_char(LEN_SEP);
                self.put_str(&keys);
            }
        }

        self.put_seq(m.values(), opts);
    }

    fn put_framed(&mut self, payload: &str, opts: &Options) {
        self.put_str(&text_len(payload, opts.unit).to_string());
        self.put_char(LEN_SEP);
        self.put_str(payload);
    }
}

/// A value that can be serialized.
pub trait Ser {
    /// Writes the encoding of `self` to `s`.
    fn ser<S: Serializer>(&self, s: &mut S, opts: &Options);
}

impl<T: Ser + ?Sized> Ser for &T {
    fn ser<S: Serializer>(&self, s: &mut S, opts: &Options) { (**self).ser(s, opts) }
}

impl Ser for Value {
    fn ser<S: Serializer>(&self, s: &mut S, opts: &Options) {
        match self {
            Value::Null => s.put_null(),
            Value::Bool(b) => s.put_bool(*b),
            Value::Int(i) => s.put_inum(i, opts),
            Value::Float(f) => s.put_f64(*f),
            Value::Text(t) => s.put_text(t),
            Value::Seq(items) => s.put_seq(items, opts),
            Value::Map(m) => s.put_map(m, opts),
        }
    }
}
