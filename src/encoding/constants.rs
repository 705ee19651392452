/// [`Null`](crate::Value::Null) tag.
pub(crate) const TAG_NULL: char = 'N';
/// Boolean tag.
pub(crate) const TAG_BOOL: char = 'B';
/// Integer tag.
pub(crate) const TAG_INT: char = 'I';
/// Float tag.
pub(crate) const TAG_FLOAT: char = 'F';
/// Text tag.
pub(crate) const TAG_TEXT: char = 'S';
/// Sequence tag, the only one the encoder writes.
pub(crate) const TAG_LIST: char = 'L';
/// Tuple tag, decoded as a sequence.
pub(crate) const TAG_TUPLE: char = 'T';
/// Set tag, decoded as a sequence.
pub(crate) const TAG_SET: char = 's';
/// Frozenset tag, decoded as a sequence.
pub(crate) const TAG_FROZENSET: char = 'f';
/// Map tag.
pub(crate) const TAG_MAP: char = 'D';

/// Body of `true`.
pub(crate) const BODY_TRUE: &str = "T";
/// Body of `false`.
pub(crate) const BODY_FALSE: &str = "F";

/// Separates a length from the payload it measures.
pub(crate) const LEN_SEP: char = ':';
/// Ends the element list of a sequence.
pub(crate) const SENTINEL: &str = "0:";

/// Default bound on container nesting when decoding.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[inline]
pub(crate) fn is_seq_tag(c: char) -> bool {
    c == TAG_LIST || c == TAG_TUPLE || c == TAG_SET || c == TAG_FROZENSET
}
