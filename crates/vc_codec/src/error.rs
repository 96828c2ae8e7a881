use alloc::string::{String, ToString};
use core::error;
use core::fmt::{self, Display, Formatter};

use vc_nbt::{KindError, LookupError, TagKind};
use vc_packet::PacketError;

use crate::path::TagPath;
use crate::value::Value;

// -----------------------------------------------------------------------------
// CodecError

/// Any failure raised while encoding, decoding, or storing values.
///
/// Errors that point into a tag tree carry the composed key they refer to.
/// Paths are scope local: a failure inside a nested struct names the key
/// relative to that struct's own compound, not to the outermost root.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A store operation would have overwritten an existing entry.
    DuplicateKey { key: String },
    /// The value shape does not match the schema it was encoded against.
    UnsupportedValue {
        path: String,
        expected: &'static str,
        received: &'static str,
    },
    /// The schema contains a construct with no defined encoding.
    UnsupportedSchema { path: String, detail: &'static str },
    /// Required retrieval found nothing stored under the key.
    AbsentValue { key: String },
    /// The byte stream ended early or carried malformed primitive data.
    InvalidPacket { source: PacketError },
    /// The tag kind has no entry in the I/O registry.
    UnregisteredKind { kind: TagKind },
    /// A kind discriminant byte outside the known tag table.
    UnknownTagId { id: u8 },
    /// A required tag is missing from the tree.
    MissingKey { path: String },
    /// A stored tag has a different kind than the schema expects.
    WrongKind {
        path: String,
        expected: TagKind,
        received: TagKind,
    },
    /// A field name ending in a suffix claimed by synthetic keys.
    ReservedName { name: String, suffix: &'static str },
    /// A field name the path composer cannot represent.
    InvalidName { name: String, detail: &'static str },
    /// Well-formed data that violates a schema constraint.
    InvalidData { path: String, detail: String },
}

impl CodecError {
    pub(crate) fn mismatch(path: &TagPath, expected: &'static str, received: &Value) -> Self {
        Self::UnsupportedValue {
            path: path.as_str().to_string(),
            expected,
            received: received.kind_name(),
        }
    }

    pub(crate) fn nested_nullable(path: &TagPath) -> Self {
        Self::UnsupportedSchema {
            path: path.as_str().to_string(),
            detail: "a nullable schema cannot wrap another nullable schema",
        }
    }
}

/// Writes `message`, locating it at `path` unless the path is the root.
fn write_at(f: &mut Formatter<'_>, path: &str, message: fmt::Arguments<'_>) -> fmt::Result {
    if path.is_empty() {
        write!(f, "{message} at the root")
    } else {
        write!(f, "{message} at `{path}`")
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key } => {
                write!(f, "a value is already stored under key `{key}`")
            }
            Self::UnsupportedValue {
                path,
                expected,
                received,
            } => write_at(
                f,
                path,
                format_args!("schema mismatch: expected a {expected} value, received {received}"),
            ),
            Self::UnsupportedSchema { path, detail } => {
                write_at(f, path, format_args!("unsupported schema: {detail}"))
            }
            Self::AbsentValue { key } => write!(f, "no value stored under key `{key}`"),
            Self::InvalidPacket { source } => write!(f, "invalid packet: {source}"),
            Self::UnregisteredKind { kind } => {
                write!(f, "tag kind {kind} has no registered codec")
            }
            Self::UnknownTagId { id } => write!(f, "unknown tag id `{id}`"),
            Self::MissingKey { path } => write!(f, "missing tag at `{path}`"),
            Self::WrongKind {
                path,
                expected,
                received,
            } => write_at(
                f,
                path,
                format_args!("tag kind mismatch: expected {expected}, received {received}"),
            ),
            Self::ReservedName { name, suffix } => {
                write!(f, "field name `{name}` ends with reserved suffix `{suffix}`")
            }
            Self::InvalidName { name, detail } => {
                write!(f, "invalid field name `{name}`: {detail}")
            }
            Self::InvalidData { path, detail } => {
                write_at(f, path, format_args!("invalid data: {detail}"))
            }
        }
    }
}

impl error::Error for CodecError {}

impl From<PacketError> for CodecError {
    #[inline]
    fn from(source: PacketError) -> Self {
        Self::InvalidPacket { source }
    }
}

impl From<LookupError> for CodecError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::Missing { key } => Self::MissingKey { path: key },
            LookupError::Mismatched {
                key,
                expected,
                received,
            } => Self::WrongKind {
                path: key,
                expected,
                received,
            },
        }
    }
}

impl From<KindError> for CodecError {
    fn from(error: KindError) -> Self {
        Self::WrongKind {
            path: String::new(),
            expected: error.expected,
            received: error.received,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::{String, ToString};

    use vc_nbt::{LookupError, TagKind};
    use vc_packet::PacketError;

    use super::CodecError;

    #[test]
    fn display_names_the_key() {
        let error = CodecError::DuplicateKey {
            key: "Player".to_string(),
        };
        assert_eq!(
            format!("{error}"),
            "a value is already stored under key `Player`"
        );

        let error = CodecError::WrongKind {
            path: "health".to_string(),
            expected: TagKind::Int,
            received: TagKind::String,
        };
        assert_eq!(
            format!("{error}"),
            "tag kind mismatch: expected Int, received String at `health`"
        );
    }

    #[test]
    fn display_falls_back_to_the_root() {
        let error = CodecError::WrongKind {
            path: String::new(),
            expected: TagKind::Compound,
            received: TagKind::Int,
        };
        assert_eq!(
            format!("{error}"),
            "tag kind mismatch: expected Compound, received Int at the root"
        );
    }

    #[test]
    fn converts_lookup_errors() {
        let missing = LookupError::Missing {
            key: "scores".to_string(),
        };
        assert_eq!(
            CodecError::from(missing),
            CodecError::MissingKey {
                path: "scores".to_string(),
            }
        );

        let mismatched = LookupError::Mismatched {
            key: "name".to_string(),
            expected: TagKind::String,
            received: TagKind::Byte,
        };
        assert_eq!(
            CodecError::from(mismatched),
            CodecError::WrongKind {
                path: "name".to_string(),
                expected: TagKind::String,
                received: TagKind::Byte,
            }
        );
    }

    #[test]
    fn converts_packet_errors() {
        let error = CodecError::from(PacketError::UnexpectedEnd {
            needed: 4,
            remaining: 1,
        });
        assert!(matches!(error, CodecError::InvalidPacket { .. }));
    }
}
