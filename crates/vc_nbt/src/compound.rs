use alloc::string::String;
use alloc::vec::Vec;
use core::{error, fmt};

use vc_utils::default;
use vc_utils::hash::hash_map::{Iter, Keys};
use vc_utils::hash::{FixedHashState, HashMap};

use crate::{Tag, TagKind};

// -----------------------------------------------------------------------------
// Compound

/// A tree node with named children: a map from string key to [`Tag`].
///
/// This is the "object" kind of the tree. Children are addressed by exact
/// key only; enumeration order of [`keys`](Compound::keys) and
/// [`iter`](Compound::iter) is unspecified (stable within one binary, not
/// sorted, not insertion order).
///
/// The typed `put_*` methods wrap a plain value into the matching [`Tag`]
/// variant. The typed `get_*` methods unwrap it again and report, through
/// [`LookupError`], whether the key was missing or held a different kind.
///
/// # Examples
///
/// ```
/// use vc_nbt::Compound;
///
/// let mut tree = Compound::new();
/// tree.put_int("health", 20);
/// tree.put_string("name", "Steve");
///
/// assert_eq!(tree.get_int("health"), Ok(20));
/// assert!(tree.contains_key("name"));
///
/// let err = tree.get_long("health").unwrap_err();
/// assert_eq!(err.to_string(), "tag kind mismatch under key `health`: expected Long, received Int");
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Compound {
    entries: HashMap<String, Tag>,
}

// Helper macro that implements typed store methods like `put_int`.
macro_rules! impl_put_method {
    ($name:ident : $variant:ident($ty:ty)) => {
        /// Store a value under `key`, replacing and returning any previous value.
        #[inline]
        pub fn $name(&mut self, key: impl Into<String>, value: $ty) -> Option<Tag> {
            self.entries.insert(key.into(), Tag::$variant(value))
        }
    };
}

// Helper macro that implements by-value read methods like `get_int`.
macro_rules! impl_get_method {
    ($name:ident : $variant:ident => $ty:ty) => {
        /// Read the value of the matching kind stored under `key`.
        #[inline]
        pub fn $name(&self, key: &str) -> Result<$ty, LookupError> {
            match self.entries.get(key) {
                Some(Tag::$variant(value)) => Ok(*value),
                Some(other) => Err(LookupError::Mismatched {
                    key: String::from(key),
                    expected: TagKind::$variant,
                    received: other.kind(),
                }),
                None => Err(LookupError::Missing {
                    key: String::from(key),
                }),
            }
        }
    };
}

// Helper macro that implements by-reference read methods like `get_list`.
macro_rules! impl_get_ref_method {
    ($name:ident : $variant:ident => $ty:ty) => {
        /// Read the value of the matching kind stored under `key`.
        #[inline]
        pub fn $name(&self, key: &str) -> Result<$ty, LookupError> {
            match self.entries.get(key) {
                Some(Tag::$variant(value)) => Ok(value),
                Some(other) => Err(LookupError::Mismatched {
                    key: String::from(key),
                    expected: TagKind::$variant,
                    received: other.kind(),
                }),
                None => Err(LookupError::Missing {
                    key: String::from(key),
                }),
            }
        }
    };
}

impl Compound {
    /// Creates an empty tree node.
    pub fn new() -> Self {
        Self { entries: default() }
    }

    /// Creates an empty tree node with space for at least `capacity` children.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Returns the number of children.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a child is stored under `key`.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the child stored under `key`, whatever its kind.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    /// Store a tag under `key`, replacing and returning any previous value.
    #[inline]
    pub fn put(&mut self, key: impl Into<String>, tag: Tag) -> Option<Tag> {
        self.entries.insert(key.into(), tag)
    }

    /// Removes and returns the child stored under `key`.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }

    /// Iterates over `(key, tag)` pairs in unspecified order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, String, Tag> {
        self.entries.iter()
    }

    /// Iterates over keys in unspecified order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, String, Tag> {
        self.entries.keys()
    }

    /// Store a boolean under `key` as a [`TagKind::Byte`] of `0` or `1`.
    #[inline]
    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) -> Option<Tag> {
        self.entries.insert(key.into(), Tag::Byte(value as i8))
    }

    /// Store a string under `key`.
    #[inline]
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<Tag> {
        self.entries.insert(key.into(), Tag::String(value.into()))
    }

    impl_put_method!(put_byte: Byte(i8));
    impl_put_method!(put_short: Short(i16));
    impl_put_method!(put_int: Int(i32));
    impl_put_method!(put_long: Long(i64));
    impl_put_method!(put_float: Float(f32));
    impl_put_method!(put_double: Double(f64));
    impl_put_method!(put_byte_array: ByteArray(Vec<i8>));
    impl_put_method!(put_int_array: IntArray(Vec<i32>));
    impl_put_method!(put_long_array: LongArray(Vec<i64>));
    impl_put_method!(put_list: List(Vec<Tag>));
    impl_put_method!(put_compound: Compound(Compound));

    /// Read a boolean stored under `key`: any nonzero byte reads as `true`.
    #[inline]
    pub fn get_bool(&self, key: &str) -> Result<bool, LookupError> {
        Ok(self.get_byte(key)? != 0)
    }

    impl_get_method!(get_byte: Byte => i8);
    impl_get_method!(get_short: Short => i16);
    impl_get_method!(get_int: Int => i32);
    impl_get_method!(get_long: Long => i64);
    impl_get_method!(get_float: Float => f32);
    impl_get_method!(get_double: Double => f64);

    impl_get_ref_method!(get_string: String => &str);
    impl_get_ref_method!(get_byte_array: ByteArray => &[i8]);
    impl_get_ref_method!(get_int_array: IntArray => &[i32]);
    impl_get_ref_method!(get_long_array: LongArray => &[i64]);
    impl_get_ref_method!(get_list: List => &[Tag]);
    impl_get_ref_method!(get_compound: Compound => &Compound);
}

// -----------------------------------------------------------------------------
// LookupError

/// Error returned by the typed `get_*` methods of [`Compound`].
///
/// Distinguishes a key with no value at all from a key holding a value of
/// another kind; decoders treat the two very differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No value is stored under the key.
    Missing { key: String },
    /// A value is stored under the key, but of another kind.
    Mismatched {
        key: String,
        expected: TagKind,
        received: TagKind,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { key } => {
                write!(f, "no value under key `{key}`")
            }
            Self::Mismatched {
                key,
                expected,
                received,
            } => {
                write!(
                    f,
                    "tag kind mismatch under key `{key}`: expected {expected}, received {received}"
                )
            }
        }
    }
}

impl error::Error for LookupError {}

// -----------------------------------------------------------------------------
// Tests
