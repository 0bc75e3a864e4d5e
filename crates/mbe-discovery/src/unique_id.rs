//! Unique descriptor addresses
//!
//! Provides [`UniqueId`], the canonical hierarchical address of a descriptor
//! node: an ordered, immutable sequence of `(type, value)` segments. The
//! string encoding — slash-separated `[type:value]` tokens with reserved
//! characters percent-escaped — is the only externally observable wire
//! format of the discovery engine.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Segment type of the engine root, the only reserved segment type
pub const ENGINE_SEGMENT_TYPE: &str = "engine";

/// One typed segment of a unique id
///
/// The type identifies the node kind the segment addresses; the value is an
/// opaque identifier chosen by the resolver that created the segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    segment_type: String,
    value: String,
}

impl Segment {
    /// Create a segment
    #[inline]
    #[must_use]
    pub fn new(segment_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            segment_type: segment_type.into(),
            value: value.into(),
        }
    }

    /// Segment type
    #[inline]
    #[must_use]
    pub fn segment_type(&self) -> &str {
        &self.segment_type
    }

    /// Segment value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered, immutable sequence of typed segments addressing a tree node
///
/// Equality is structural. Append and remove-last are the only supported
/// edits; both return new ids, never mutate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueId {
    segments: Vec<Segment>,
}

impl UniqueId {
    /// Create a root id with a single segment
    #[must_use]
    pub fn root(segment_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::new(segment_type, value)],
        }
    }

    /// Create the root id of an engine
    #[inline]
    #[must_use]
    pub fn for_engine(engine_id: impl Into<String>) -> Self {
        Self::root(ENGINE_SEGMENT_TYPE, engine_id)
    }

    /// Append a segment, returning the extended id
    #[must_use]
    pub fn append(&self, segment_type: impl Into<String>, value: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::new(segment_type, value));
        Self { segments }
    }

    /// Remove the last segment, returning the shortened id
    ///
    /// # Errors
    /// [`UniqueIdError::CannotRemoveOnlySegment`] when only the root segment
    /// remains; an empty unique id is not representable.
    pub fn remove_last(&self) -> Result<Self, UniqueIdError> {
        if self.segments.len() <= 1 {
            return Err(UniqueIdError::CannotRemoveOnlySegment(self.to_string()));
        }
        Ok(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// All segments, root first
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The last segment; its type identifies the addressed node kind
    #[inline]
    #[must_use]
    pub fn last_segment(&self) -> &Segment {
        self.segments
            .last()
            .unwrap_or_else(|| unreachable!("unique id is never empty"))
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this id is a (non-strict) prefix of another
    #[must_use]
    pub fn is_prefix_of(&self, other: &UniqueId) -> bool {
        if self.segments.len() > other.segments.len() {
            return false;
        }
        self.segments == other.segments[..self.segments.len()]
    }
}

impl Display for UniqueId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(
                f,
                "[{}:{}]",
                segment.segment_type,
                encode(&segment.value)
            )?;
        }
        Ok(())
    }
}

impl FromStr for UniqueId {
    type Err = UniqueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(UniqueIdError::Empty);
        }
        let segments = s
            .split('/')
            .map(|token| {
                let inner = token
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| UniqueIdError::MalformedSegment(token.to_string()))?;
                let (segment_type, value) = inner
                    .split_once(':')
                    .ok_or_else(|| UniqueIdError::MalformedSegment(token.to_string()))?;
                if segment_type.is_empty() {
                    return Err(UniqueIdError::MalformedSegment(token.to_string()));
                }
                Ok(Segment::new(segment_type, decode(value)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }
}

impl Serialize for UniqueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UniqueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(D::Error::custom)
    }
}

/// Percent-encode the reserved characters of the segment-value alphabet
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '[' => out.push_str("%5B"),
            ']' => out.push_str("%5D"),
            '/' => out.push_str("%2F"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`encode`], accepting any `%XX` byte escape
fn decode(value: &str) -> Result<String, UniqueIdError> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes
                .get(i + 1..i + 3)
                .ok_or_else(|| UniqueIdError::InvalidEncoding(value.to_string()))?;
            let hex = std::str::from_utf8(escape)
                .map_err(|_| UniqueIdError::InvalidEncoding(value.to_string()))?;
            let byte = u8::from_str_radix(hex, 16)
                .map_err(|_| UniqueIdError::InvalidEncoding(value.to_string()))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| UniqueIdError::InvalidEncoding(value.to_string()))
}

/// Errors for unique-id edits and parsing
#[derive(Debug, thiserror::Error)]
pub enum UniqueIdError {
    /// Parsed an empty string
    #[error("unique id must contain at least one segment")]
    Empty,

    /// Remove-last on a single-segment id
    #[error("cannot remove the only segment from '{0}'")]
    CannotRemoveOnlySegment(String),

    /// Token is not of the form `[type:value]`
    #[error("malformed unique id segment '{0}'")]
    MalformedSegment(String),

    /// Broken percent escape or invalid UTF-8 after decoding
    #[error("invalid percent encoding in '{0}'")]
    InvalidEncoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn engine_root_formats_as_single_segment() {
        let id = UniqueId::for_engine("microbenchmark-engine");
        assert_eq!(id.to_string(), "[engine:microbenchmark-engine]");
    }

    #[test]
    fn append_extends_and_keeps_original() {
        let root = UniqueId::for_engine("e");
        let child = root.append("class", "com.acme.Bench");

        assert_eq!(root.depth(), 1);
        assert_eq!(child.depth(), 2);
        assert_eq!(child.last_segment().segment_type(), "class");
        assert_eq!(child.last_segment().value(), "com.acme.Bench");
    }

    #[test]
    fn remove_last_undoes_append() {
        let root = UniqueId::for_engine("e");
        let child = root.append("class", "com.acme.Bench");

        assert_eq!(child.remove_last().unwrap(), root);
    }

    #[test]
    fn remove_last_rejects_single_segment() {
        let root = UniqueId::for_engine("e");
        assert!(matches!(
            root.remove_last(),
            Err(UniqueIdError::CannotRemoveOnlySegment(_))
        ));
    }

    #[test]
    fn is_prefix_of_detects_ancestry() {
        let root = UniqueId::for_engine("e");
        let class = root.append("class", "Bench");
        let method = class.append("method", "run()");
        let other = root.append("class", "Other");

        assert!(root.is_prefix_of(&method));
        assert!(class.is_prefix_of(&method));
        assert!(class.is_prefix_of(&class));
        assert!(!method.is_prefix_of(&class));
        assert!(!other.is_prefix_of(&method));
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let id = UniqueId::for_engine("e").append("fixture", "[foo=b]");
        assert_eq!(id.to_string(), "[engine:e]/[fixture:%5Bfoo=b%5D]");
    }

    #[test]
    fn full_address_round_trips() {
        let encoded = "[engine:microbenchmark-engine]\
                       /[class:com.acme.Bench]\
                       /[method:run(com.acme.Bench$State)]\
                       /[fixture:%5Bn=10%5D]";
        let id: UniqueId = encoded.parse().unwrap();

        assert_eq!(id.depth(), 4);
        assert_eq!(id.last_segment().value(), "[n=10]");
        assert_eq!(id.to_string(), encoded);
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!("".parse::<UniqueId>(), Err(UniqueIdError::Empty)));
    }

    #[test]
    fn parse_rejects_missing_brackets() {
        assert!(matches!(
            "engine:e".parse::<UniqueId>(),
            Err(UniqueIdError::MalformedSegment(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(matches!(
            "[engine]".parse::<UniqueId>(),
            Err(UniqueIdError::MalformedSegment(_))
        ));
    }

    #[test]
    fn parse_rejects_broken_escape() {
        assert!(matches!(
            "[engine:e%5]".parse::<UniqueId>(),
            Err(UniqueIdError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn value_may_contain_colons() {
        let id: UniqueId = "[class:a:b:c]".parse().unwrap();
        assert_eq!(id.last_segment().segment_type(), "class");
        assert_eq!(id.last_segment().value(), "a:b:c");
    }

    #[test]
    fn serde_round_trips_through_string_form() {
        let id = UniqueId::for_engine("e").append("fixture", "[n=1]");
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"[engine:e]/[fixture:%5Bn=1%5D]\"");
        let back: UniqueId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    proptest! {
        #[test]
        fn string_encoding_round_trips(
            segments in prop::collection::vec(
                ("[a-z][a-z0-9_-]{0,7}", any::<String>()),
                1..6,
            )
        ) {
            let mut iter = segments.into_iter();
            let (first_type, first_value) = iter.next().unwrap();
            let mut id = UniqueId::root(first_type, first_value);
            for (segment_type, value) in iter {
                id = id.append(segment_type, value);
            }

            let parsed: UniqueId = id.to_string().parse().unwrap();
            prop_assert_eq!(parsed, id);
        }
    }
}
