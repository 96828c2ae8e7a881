use alloc::string::String;
use alloc::vec::Vec;
use core::{error, fmt};

// -----------------------------------------------------------------------------
// PacketBuf

/// A byte buffer with sequential write and read halves.
///
/// Writes append to the end; reads consume from an internal cursor that
/// starts at the beginning. All multi-byte values use network byte order.
/// Strings are written as a `u32` byte-length prefix followed by UTF-8
/// bytes.
///
/// The buffer has no notion of a missing value: whatever order values were
/// written in is the order they must be read back in.
///
/// # Examples
///
/// ```
/// use vc_packet::{PacketBuf, PacketError};
///
/// let mut buf = PacketBuf::new();
/// buf.write_i16(-2);
/// buf.write_f64(0.5);
///
/// assert_eq!(buf.read_i16(), Ok(-2));
/// assert_eq!(buf.read_f64(), Ok(0.5));
/// assert_eq!(
///     buf.read_i16(),
///     Err(PacketError::UnexpectedEnd { needed: 2, remaining: 0 })
/// );
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PacketBuf {
    data: Vec<u8>,
    cursor: usize,
}

// Helper macro that implements fixed-width append methods like `write_i32`.
macro_rules! impl_write_method {
    ($name:ident : $ty:ty) => {
        /// Append the value at its fixed width, in network byte order.
        #[inline]
        pub fn $name(&mut self, value: $ty) {
            self.data.extend_from_slice(&value.to_be_bytes());
        }
    };
}

// Helper macro that implements fixed-width read methods like `read_i32`.
macro_rules! impl_read_method {
    ($name:ident : $ty:ty) => {
        /// Read the next value at its fixed width, advancing the cursor.
        #[inline]
        pub fn $name(&mut self) -> Result<$ty, PacketError> {
            Ok(<$ty>::from_be_bytes(
                self.read_array::<{ size_of::<$ty>() }>()?,
            ))
        }
    };
}

impl PacketBuf {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer over received bytes, with the cursor at the start.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    /// Consumes the buffer, returning all written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// All bytes held by the buffer, read or not.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Total number of bytes held by the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no bytes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position, in bytes from the start.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Returns `true` once every written byte has been read.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Append a boolean as one byte, `1` for `true` and `0` for `false`.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    /// Append raw bytes without a length prefix.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a string as a `u32` byte-length prefix plus UTF-8 bytes.
    pub fn write_str(&mut self, value: &str) -> Result<(), PacketError> {
        let Ok(len) = u32::try_from(value.len()) else {
            return Err(PacketError::StringTooLong { len: value.len() });
        };
        self.write_u32(len);
        self.data.extend_from_slice(value.as_bytes());
        Ok(())
    }

    impl_write_method!(write_u8: u8);
    impl_write_method!(write_i8: i8);
    impl_write_method!(write_i16: i16);
    impl_write_method!(write_i32: i32);
    impl_write_method!(write_i64: i64);
    impl_write_method!(write_u32: u32);
    impl_write_method!(write_f32: f32);
    impl_write_method!(write_f64: f64);

    /// Read one byte as a boolean; any nonzero byte reads as `true`.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, PacketError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read the next `len` raw bytes, advancing the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8], PacketError> {
        let remaining = self.remaining();
        if remaining < len {
            return Err(PacketError::UnexpectedEnd {
                needed: len,
                remaining,
            });
        }
        let start = self.cursor;
        self.cursor += len;
        Ok(&self.data[start..self.cursor])
    }

    /// Read back a string written by [`write_str`](PacketBuf::write_str).
    pub fn read_str(&mut self) -> Result<String, PacketError> {
        let len = self.read_u32()? as usize;
        let position = self.cursor;
        let bytes = self.read_bytes(len)?;
        match core::str::from_utf8(bytes) {
            Ok(text) => Ok(String::from(text)),
            Err(_) => Err(PacketError::InvalidUtf8 { position }),
        }
    }

    impl_read_method!(read_u8: u8);
    impl_read_method!(read_i8: i8);
    impl_read_method!(read_i16: i16);
    impl_read_method!(read_i32: i32);
    impl_read_method!(read_i64: i64);
    impl_read_method!(read_u32: u32);
    impl_read_method!(read_f32: f32);
    impl_read_method!(read_f64: f64);

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PacketError> {
        let slice = self.read_bytes(N)?;
        let mut array = [0_u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }
}

// -----------------------------------------------------------------------------
// PacketError

/// Error produced by the read half of [`PacketBuf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    /// The cursor reached the end of the buffer mid-value.
    UnexpectedEnd { needed: usize, remaining: usize },
    /// A string's bytes were not valid UTF-8.
    InvalidUtf8 { position: usize },
    /// A string was too long for its `u32` length prefix.
    StringTooLong { len: usize },
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd { needed, remaining } => {
                write!(
                    f,
                    "unexpected end of packet: needed {needed} bytes, {remaining} remaining"
                )
            }
            Self::InvalidUtf8 { position } => {
                write!(f, "packet string at byte {position} is not valid UTF-8")
            }
            Self::StringTooLong { len } => {
                write!(f, "string of {len} bytes does not fit a u32 length prefix")
            }
        }
    }
}

impl error::Error for PacketError {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::{PacketBuf, PacketError};

    #[test]
    fn primitives_round_trip_in_order() {
        let mut buf = PacketBuf::new();
        buf.write_bool(true);
        buf.write_i8(-1);
        buf.write_i16(-300);
        buf.write_i32(70_000);
        buf.write_i64(-5_000_000_000);
        buf.write_u32(0xDEAD_BEEF);
        buf.write_f32(0.25);
        buf.write_f64(-2.5);

        assert_eq!(buf.read_bool(), Ok(true));
        assert_eq!(buf.read_i8(), Ok(-1));
        assert_eq!(buf.read_i16(), Ok(-300));
        assert_eq!(buf.read_i32(), Ok(70_000));
        assert_eq!(buf.read_i64(), Ok(-5_000_000_000));
        assert_eq!(buf.read_u32(), Ok(0xDEAD_BEEF));
        assert_eq!(buf.read_f32(), Ok(0.25));
        assert_eq!(buf.read_f64(), Ok(-2.5));
        assert!(buf.is_exhausted());
    }

    #[test]
    fn values_use_network_byte_order() {
        let mut buf = PacketBuf::new();
        buf.write_i32(1);
        assert_eq!(buf.as_slice(), &[0, 0, 0, 1]);
    }

    #[test]
    fn strings_are_length_prefixed() {
        let mut buf = PacketBuf::new();
        buf.write_str("héllo").unwrap();

        assert_eq!(buf.as_slice()[..4], [0, 0, 0, 6]);
        assert_eq!(buf.read_str().unwrap(), "héllo");
    }

    #[test]
    fn short_reads_report_what_was_missing() {
        let mut buf = PacketBuf::from_vec(vec![0, 1]);
        assert_eq!(
            buf.read_i32(),
            Err(PacketError::UnexpectedEnd {
                needed: 4,
                remaining: 2,
            })
        );
    }

    #[test]
    fn truncated_strings_fail() {
        let mut buf = PacketBuf::new();
        buf.write_u32(10);
        buf.write_bytes(b"abc");
        assert_eq!(
            buf.read_str(),
            Err(PacketError::UnexpectedEnd {
                needed: 10,
                remaining: 3,
            })
        );
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut buf = PacketBuf::new();
        buf.write_u32(2);
        buf.write_bytes(&[0xFF, 0xFE]);
        assert_eq!(buf.read_str(), Err(PacketError::InvalidUtf8 { position: 4 }));
    }

    #[test]
    fn cursor_tracks_position() {
        let mut buf = PacketBuf::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(buf.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert_eq!(buf.position(), 3);
        assert_eq!(buf.remaining(), 1);
        assert!(!buf.is_exhausted());
    }
}
