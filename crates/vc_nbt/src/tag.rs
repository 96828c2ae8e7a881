use alloc::string::String;
use alloc::vec::Vec;

use crate::{Compound, KindError, TagKind};

// -----------------------------------------------------------------------------
// Tag

/// A single tree value: one of the thirteen tree-native kinds.
///
/// `End` is the sentinel kind. It terminates compound payloads on the wire
/// and stands for "no value" where a tag is required structurally; it is not
/// a value callers normally store.
///
/// # Examples
///
/// ```
/// use vc_nbt::{Tag, TagKind};
///
/// let tag = Tag::from("Steve");
/// assert_eq!(tag.kind(), TagKind::String);
/// assert_eq!(tag.as_string(), Ok("Steve"));
/// assert!(tag.as_int().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

// Helper macro that implements by-value accessor methods like `as_int`.
macro_rules! impl_scalar_cast {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Returns the inner value if this tag is the matching kind.
        #[inline]
        pub const fn $name(&self) -> Result<$ty, KindError> {
            match self {
                Self::$kind(value) => Ok(*value),
                _ => Err(KindError {
                    expected: TagKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

// Helper macro that implements by-reference accessor methods like `as_list`.
macro_rules! impl_ref_cast {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Returns a reference to the inner value if this tag is the matching kind.
        #[inline]
        pub const fn $name(&self) -> Result<&$ty, KindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(KindError {
                    expected: TagKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl Tag {
    /// Returns the [`TagKind`] of this value (a fast discriminator).
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::End => TagKind::End,
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
            Self::IntArray(_) => TagKind::IntArray,
            Self::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Check for the sentinel kind, can be used in const context.
    #[inline]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    impl_scalar_cast!(as_byte: Byte => i8);
    impl_scalar_cast!(as_short: Short => i16);
    impl_scalar_cast!(as_int: Int => i32);
    impl_scalar_cast!(as_long: Long => i64);
    impl_scalar_cast!(as_float: Float => f32);
    impl_scalar_cast!(as_double: Double => f64);

    impl_ref_cast!(as_byte_array: ByteArray => Vec<i8>);
    impl_ref_cast!(as_int_array: IntArray => Vec<i32>);
    impl_ref_cast!(as_long_array: LongArray => Vec<i64>);
    impl_ref_cast!(as_list: List => Vec<Tag>);
    impl_ref_cast!(as_compound: Compound => Compound);

    /// Returns the inner string slice if this tag is a [`TagKind::String`].
    #[inline]
    pub fn as_string(&self) -> Result<&str, KindError> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(KindError {
                expected: TagKind::String,
                received: self.kind(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

// Helper macro for the direct value-to-variant conversions.
macro_rules! impl_from {
    ($ty:ty => $kind:ident) => {
        impl From<$ty> for Tag {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::$kind(value)
            }
        }
    };
}

impl_from!(i8 => Byte);
impl_from!(i16 => Short);
impl_from!(i32 => Int);
impl_from!(i64 => Long);
impl_from!(f32 => Float);
impl_from!(f64 => Double);
impl_from!(Vec<i8> => ByteArray);
impl_from!(String => String);
impl_from!(Vec<Tag> => List);
impl_from!(Compound => Compound);
impl_from!(Vec<i32> => IntArray);
impl_from!(Vec<i64> => LongArray);

impl From<bool> for Tag {
    /// Booleans are stored as bytes; `true` is `1`, `false` is `0`.
    #[inline]
    fn from(value: bool) -> Self {
        Self::Byte(value as i8)
    }
}

impl From<&str> for Tag {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::{Tag, TagKind};

    #[test]
    fn casts_match_kind() {
        let tag = Tag::Long(-7);
        assert_eq!(tag.kind(), TagKind::Long);
        assert_eq!(tag.as_long(), Ok(-7));

        let err = tag.as_short().unwrap_err();
        assert_eq!(err.expected, TagKind::Short);
        assert_eq!(err.received, TagKind::Long);
    }

    #[test]
    fn ref_casts_borrow_inner() {
        let tag = Tag::List(vec![Tag::Int(1), Tag::Int(2)]);
        assert_eq!(tag.as_list().unwrap().len(), 2);
        assert!(tag.as_compound().is_err());
    }

    #[test]
    fn conversions_pick_variants() {
        assert_eq!(Tag::from(true), Tag::Byte(1));
        assert_eq!(Tag::from("text"), Tag::String("text".into()));
        assert_eq!(Tag::from(vec![1_i64, 2]).kind(), TagKind::LongArray);
        assert!(!Tag::from(0_i8).is_end());
    }
}
