use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::{self, Display, Formatter};

use crate::error::CodecError;

// -----------------------------------------------------------------------------
// TagPath

/// A dot-joined location in an encoded tag tree.
///
/// Keys in a tree scope are flat strings. Nesting other than struct fields
/// (which open their own compound and restart the scope) is expressed by
/// joining the parent path and the child segment with `.`, so the second
/// element of a list stored under `scores` lives at `scores.1`.
///
/// Two bare suffixes are reserved for synthetic keys: `size` announces a
/// collection length and `mark` a nullable presence flag. Both attach
/// without the separator. The size of a list at `scores` is `scoressize`,
/// and the marker of a nullable value at `position` is `positionmark`. At
/// the root the owner path is empty, leaving the bare keys `size` and
/// `mark`.
///
/// # Examples
///
/// ```
/// use vc_codec::TagPath;
///
/// let scores = TagPath::root().child("scores").unwrap();
///
/// assert_eq!(scores.as_str(), "scores");
/// assert_eq!(scores.index(1).as_str(), "scores.1");
/// assert_eq!(scores.size_key(), "scoressize");
///
/// // Names that could shadow a sibling's synthetic key never compose.
/// assert!(TagPath::root().child("chunksize").is_err());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TagPath(String);

impl TagPath {
    /// The character joining path segments.
    pub const SEPARATOR: char = '.';

    /// Bare suffixes claimed by synthetic keys.
    pub const RESERVED_SUFFIXES: [&'static str; 2] = ["size", "mark"];

    /// Returns the empty path addressing the scope itself.
    #[inline]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the scope root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the composed key this path addresses.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins a named segment onto this path.
    ///
    /// The name must be expressible as a path segment: separators would
    /// make the joined key ambiguous, and a name ending in a reserved
    /// suffix could collide with a sibling's synthetic key. A field named
    /// `scoressize` next to a list field `scores` would be
    /// indistinguishable from that list's size key, so the whole suffix
    /// family is rejected up front.
    pub fn child(&self, name: &str) -> Result<Self, CodecError> {
        if name.is_empty() {
            return Err(CodecError::InvalidName {
                name: name.to_string(),
                detail: "the name is empty",
            });
        }
        if name.contains(Self::SEPARATOR) {
            return Err(CodecError::InvalidName {
                name: name.to_string(),
                detail: "the name contains the path separator",
            });
        }
        for suffix in Self::RESERVED_SUFFIXES {
            if name.ends_with(suffix) {
                return Err(CodecError::ReservedName {
                    name: name.to_string(),
                    suffix,
                });
            }
        }
        Ok(self.join(name))
    }

    /// Joins a list element index onto this path.
    #[inline]
    pub fn index(&self, index: usize) -> Self {
        self.join(&format!("{index}"))
    }

    /// Returns the synthetic key holding a collection size at this path.
    #[inline]
    pub fn size_key(&self) -> String {
        format!("{}size", self.0)
    }

    /// Returns the synthetic key holding a presence marker at this path.
    #[inline]
    pub fn mark_key(&self) -> String {
        format!("{}mark", self.0)
    }

    fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}{}{}", self.0, Self::SEPARATOR, segment))
        }
    }
}

impl Display for TagPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
