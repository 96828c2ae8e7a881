use core::{error, fmt};

// -----------------------------------------------------------------------------
// TagKind

/// An enumeration of the "kinds" of a [`Tag`](crate::Tag).
///
/// Each kind corresponds to one [`Tag`](crate::Tag) variant and carries the
/// classic numeric id of the format (`End = 0` through `LongArray = 12`).
/// The id doubles as the wire discriminant when tags are embedded in flat
/// byte streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagKind {
    /// Number of kinds, and one past the largest valid [`id`](TagKind::id).
    pub const COUNT: usize = 13;

    /// Returns the numeric id of this kind.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns the kind with the given numeric id, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_nbt::TagKind;
    ///
    /// assert_eq!(TagKind::from_id(10), Some(TagKind::Compound));
    /// assert_eq!(TagKind::from_id(13), None);
    /// ```
    pub const fn from_id(id: u8) -> Option<TagKind> {
        Some(match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            _ => return None,
        })
    }

    /// Returns the kind name, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "End",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
            Self::IntArray => "IntArray",
            Self::LongArray => "LongArray",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// KindError

/// Error returned when a [`Tag`](crate::Tag) is not the expected [`TagKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindError {
    pub expected: TagKind,
    pub received: TagKind,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tag kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for KindError {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TagKind;

    #[test]
    fn ids_round_trip() {
        for id in 0..TagKind::COUNT as u8 {
            let kind = TagKind::from_id(id).unwrap();
            assert_eq!(kind.id(), id);
        }
        assert_eq!(TagKind::from_id(TagKind::COUNT as u8), None);
        assert_eq!(TagKind::from_id(u8::MAX), None);
    }
}
