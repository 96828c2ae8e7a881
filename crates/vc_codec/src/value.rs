use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use vc_nbt::Tag;

use crate::error::CodecError;
use crate::path::TagPath;
use crate::schema::StructSchema;

// -----------------------------------------------------------------------------
// Value

/// A schema-shaped value ready for encoding.
///
/// `Value` is the exchange shape between typed Rust data and the two wire
/// formats: [`Schematic::to_value`] produces it and the tree and packet
/// codecs consume it against a matching [`Schema`]. Struct fields and
/// list elements are positional, names live in the schema alone.
///
/// [`Schema`]: crate::Schema
/// [`Schematic::to_value`]: crate::Schematic::to_value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Unit,
    /// A variant ordinal in declaration order.
    Enum(u32),
    List(Vec<Value>),
    Nullable(Option<Box<Value>>),
    /// Field values in schema declaration order.
    Struct(Vec<Value>),
    /// A pre-built tag, dispatched through the I/O registry.
    Tag(Tag),
}

impl Value {
    /// Wraps a present nullable value.
    #[inline]
    pub fn some(value: Value) -> Self {
        Self::Nullable(Some(Box::new(value)))
    }

    /// The absent nullable value.
    #[inline]
    pub const fn none() -> Self {
        Self::Nullable(None)
    }

    /// Returns `true` for the absent nullable value.
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Nullable(None))
    }

    /// Returns the shape name used in mismatch reports.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Byte(_) => "Byte",
            Self::Short(_) => "Short",
            Self::Int(_) => "Int",
            Self::Long(_) => "Long",
            Self::Float(_) => "Float",
            Self::Double(_) => "Double",
            Self::Char(_) => "Char",
            Self::String(_) => "String",
            Self::Unit => "Unit",
            Self::Enum(_) => "Enum",
            Self::List(_) => "List",
            Self::Nullable(_) => "Nullable",
            Self::Struct(_) => "Struct",
            Self::Tag(_) => "Tag",
        }
    }

    pub(crate) fn expect_nullable(&self, path: &TagPath) -> Result<Option<&Value>, CodecError> {
        match self {
            Self::Nullable(inner) => Ok(inner.as_deref()),
            other => Err(CodecError::mismatch(path, "Nullable", other)),
        }
    }

    pub(crate) fn expect_list(&self, path: &TagPath) -> Result<&[Value], CodecError> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(CodecError::mismatch(path, "List", other)),
        }
    }

    pub(crate) fn expect_struct(
        &self,
        path: &TagPath,
        info: &StructSchema,
    ) -> Result<&[Value], CodecError> {
        let Self::Struct(fields) = self else {
            return Err(CodecError::mismatch(path, "Struct", self));
        };
        if fields.len() != info.field_len() {
            return Err(CodecError::InvalidData {
                path: path.as_str().to_string(),
                detail: format!(
                    "struct `{}` declares {} fields, the value carries {}",
                    info.name(),
                    info.field_len(),
                    fields.len(),
                ),
            });
        }
        Ok(fields)
    }
}

macro_rules! impl_from {
    ($( $variant:ident: $ty:ty ),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from! {
    Bool: bool,
    Byte: i8,
    Short: i16,
    Int: i32,
    Long: i64,
    Float: f32,
    Double: f64,
    Char: char,
    String: String,
    Tag: Tag,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Option<Value>> for Value {
    #[inline]
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(value) => Self::some(value),
            None => Self::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn nullable_helpers() {
        assert!(Value::none().is_absent());
        assert!(!Value::some(Value::Int(1)).is_absent());
        assert!(!Value::Int(1).is_absent());

        assert_eq!(Value::from(None), Value::none());
        assert_eq!(Value::from(Some(Value::Int(1))), Value::some(Value::Int(1)));
    }

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(3i32), Value::Int(3));
        assert_eq!(Value::from('x'), Value::Char('x'));
        assert_eq!(Value::from("hi"), Value::String("hi".into()));
    }
}
