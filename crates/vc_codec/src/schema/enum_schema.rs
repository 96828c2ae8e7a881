use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::CodecError;
use crate::path::TagPath;

// -----------------------------------------------------------------------------
// EnumSchema

/// A container for an enum's declared variants.
///
/// Variants carry no payload. On the wire an enum value is its ordinal in
/// declaration order, so reordering or removing variants is a breaking
/// change while appending is not.
///
/// # Examples
///
/// ```rust
/// use vc_codec::EnumSchema;
///
/// let info = EnumSchema::new("GameMode", vec!["Survival", "Creative"]);
///
/// assert_eq!(info.variant_at(1), Some("Creative"));
/// assert_eq!(info.index_of("Survival"), Some(0));
/// assert!(!info.contains_ordinal(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    name: &'static str,
    variant_names: Box<[&'static str]>,
}

impl EnumSchema {
    /// Creates a new [`EnumSchema`].
    ///
    /// The order of internal variants is fixed, depends on the input order.
    pub fn new(name: &'static str, variant_names: Vec<&'static str>) -> Self {
        Self {
            name,
            variant_names: variant_names.into(),
        }
    }

    /// Returns the enum name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the variant name for the given ordinal, if in range.
    pub fn variant_at(&self, ordinal: u32) -> Option<&'static str> {
        self.variant_names.get(ordinal as usize).copied()
    }

    /// Returns `true` if `ordinal` addresses a declared variant.
    #[inline]
    pub fn contains_ordinal(&self, ordinal: u32) -> bool {
        (ordinal as usize) < self.variant_names.len()
    }

    /// Returns the ordinal for the given variant name, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.variant_names
            .iter()
            .position(|s| *s == name)
            .map(|index| index as u32)
    }

    /// Returns the list of variant names in declaration order.
    #[inline]
    pub fn variant_names(&self) -> &[&'static str] {
        &self.variant_names
    }

    /// Returns the number of variants.
    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variant_names.len()
    }

    pub(crate) fn encode_ordinal(&self, path: &TagPath, ordinal: u32) -> Result<i32, CodecError> {
        if self.contains_ordinal(ordinal) {
            Ok(ordinal as i32)
        } else {
            Err(self.ordinal_error(path, i64::from(ordinal)))
        }
    }

    pub(crate) fn decode_ordinal(&self, path: &TagPath, raw: i32) -> Result<u32, CodecError> {
        match u32::try_from(raw) {
            Ok(ordinal) if self.contains_ordinal(ordinal) => Ok(ordinal),
            _ => Err(self.ordinal_error(path, i64::from(raw))),
        }
    }

    fn ordinal_error(&self, path: &TagPath, ordinal: i64) -> CodecError {
        CodecError::InvalidData {
            path: path.as_str().to_string(),
            detail: format!(
                "ordinal {ordinal} is out of range for enum `{}` with {} variants",
                self.name,
                self.variant_len(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::EnumSchema;
    use crate::error::CodecError;
    use crate::path::TagPath;

    #[test]
    fn ordinals_follow_declaration_order() {
        let info = EnumSchema::new("GameMode", vec!["Survival", "Creative", "Spectator"]);

        assert_eq!(info.variant_len(), 3);
        assert_eq!(info.variant_at(0), Some("Survival"));
        assert_eq!(info.variant_at(3), None);
        assert_eq!(info.index_of("Spectator"), Some(2));
        assert_eq!(info.index_of("Hardcore"), None);
    }

    #[test]
    fn rejects_out_of_range_ordinals() {
        let info = EnumSchema::new("GameMode", vec!["Survival", "Creative"]);
        let path = TagPath::root().child("mode").unwrap();

        assert_eq!(info.encode_ordinal(&path, 1), Ok(1));
        assert_eq!(info.decode_ordinal(&path, 0), Ok(0));

        assert!(matches!(
            info.encode_ordinal(&path, 2),
            Err(CodecError::InvalidData { .. })
        ));
        assert!(matches!(
            info.decode_ordinal(&path, -1),
            Err(CodecError::InvalidData { .. })
        ));
    }
}
