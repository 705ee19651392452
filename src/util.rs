use crate::encoding::LengthUnit;

/// Measures `s` in the given unit.
///
/// # Arguments
///
/// * `s: &str` - The text to be measured.
/// * `unit: LengthUnit` - What a length counts.
///
/// # Example
///
/// ```
/// use repy_serial::{encoding::LengthUnit, util::text_len};
///
/// // one code point, two UTF-16 code units, four UTF-8 bytes
/// let clef = "\u{1D11E}";
///
/// assert_eq!(text_len(clef, LengthUnit::Chars), 1);
/// assert_eq!(text_len(clef, LengthUnit::Utf16), 2);
/// assert_eq!(text_len(clef, LengthUnit::Bytes), 4);
/// ```
pub fn text_len(s: &str, unit: LengthUnit) -> usize {
    match unit {
        LengthUnit::Bytes => s.len(),
        LengthUnit::Chars => s.chars().count(),
        LengthUnit::Utf16 => s.chars().map(char::len_utf16).sum(),
    }
}

/// Splits `s` after `n` units. Returns `None` if `s` is shorter than `n` units or if the
/// split would land inside a character.
///
/// # Example
///
/// ```
/// use repy_serial::{encoding::LengthUnit, util::split_at_len};
///
/// assert_eq!(split_at_len("héllo", 2, LengthUnit::Chars), Some(("hé", "llo")));
/// assert_eq!(split_at_len("héllo", 2, LengthUnit::Bytes), None);
/// assert_eq!(split_at_len("hé", 3, LengthUnit::Chars), None);
/// ```
pub fn split_at_len(s: &str, n: usize, unit: LengthUnit) -> Option<(&str, &str)> {
    let idx = match unit {
        LengthUnit::Bytes => n,
        LengthUnit::Chars => {
            if n == 0 {
                0
            } else {
                let (i, c) = s.char_indices().nth(n - 1)?;
                i + c.len_utf8()
            }
        }
        LengthUnit::Utf16 => {
            let mut units = 0;
            let mut idx = 0;
            for c in s.chars() {
                if units >= n {
                    break;
                }
                units += c.len_utf16();
                idx += c.len_utf8();
            }
            if units != n {
                return None;
            }
            idx
        }
    };

    if idx <= s.len() && s.is_char_boundary(idx) {
        Some(s.split_at(idx))
    } else {
        None
    }
}

#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_surrogates() {
        let s = "a\u{1F600}b";
        assert_eq!(text_len(s, LengthUnit::Utf16), 4);
        assert_eq!(split_at_len(s, 3, LengthUnit::Utf16), Some(("a\u{1F600}", "b")));
        // would split the surrogate pair
        assert_eq!(split_at_len(s, 2, LengthUnit::Utf16), None);
        assert_eq!(split_at_len(s, 5, LengthUnit::Utf16), None);
    }

    #[test]
    fn zero_and_full() {
        for unit in &[LengthUnit::Chars, LengthUnit::Utf16, LengthUnit::Bytes] {
            assert_eq!(split_at_len("abc", 0, *unit), Some(("", "abc")));
            assert_eq!(split_at_len("abc", 3, *unit), Some(("abc", "")));
            assert_eq!(split_at_len("", 0, *unit), Some(("", "")));
        }
    }
}
