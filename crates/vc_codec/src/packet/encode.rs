use alloc::format;
use alloc::string::ToString;

use vc_packet::PacketBuf;

use crate::error::CodecError;
use crate::path::TagPath;
use crate::registry::TagIoRegistry;
use crate::schema::{Schema, StructSchema};
use crate::value::Value;

// -----------------------------------------------------------------------------
// PacketEncoder

/// Encodes schema-shaped values into a flat byte stream.
///
/// Scalars are written big-endian at their fixed width, strings and
/// lists behind an `i32` length, nullables behind a one-byte presence
/// marker. Struct fields follow each other in declaration order with
/// nothing in between.
///
/// # Examples
///
/// ```rust
/// use vc_codec::{PacketEncoder, Schema, TagIoRegistry, Value};
/// use vc_packet::PacketBuf;
///
/// let schema = Schema::list(Schema::Byte);
/// let value = Value::List(vec![Value::Byte(1), Value::Byte(2), Value::Byte(3)]);
///
/// let registry = TagIoRegistry::standard();
/// let mut buf = PacketBuf::new();
/// PacketEncoder::new(&registry).encode(&schema, &value, &mut buf).unwrap();
///
/// assert_eq!(buf.as_slice(), [0, 0, 0, 3, 1, 2, 3]);
/// ```
pub struct PacketEncoder<'a> {
    registry: &'a TagIoRegistry,
}

impl<'a> PacketEncoder<'a> {
    /// Creates an encoder resolving tag payloads through `registry`.
    #[inline]
    pub const fn new(registry: &'a TagIoRegistry) -> Self {
        Self { registry }
    }

    /// Appends `value` to `buf` in schema order.
    pub fn encode(
        &self,
        schema: &Schema,
        value: &Value,
        buf: &mut PacketBuf,
    ) -> Result<(), CodecError> {
        self.encode_value(&TagPath::root(), schema, value, buf)
    }

    fn encode_value(
        &self,
        path: &TagPath,
        schema: &Schema,
        value: &Value,
        buf: &mut PacketBuf,
    ) -> Result<(), CodecError> {
        match schema {
            Schema::List(element) => self.encode_list(path, element, value, buf),
            Schema::Nullable(inner) => self.encode_nullable(path, inner, value, buf),
            Schema::Struct(info) => self.encode_struct(path, info, value, buf),
            Schema::Tag => {
                let Value::Tag(tag) = value else {
                    return Err(CodecError::mismatch(path, "Tag", value));
                };
                self.registry.write_tag(tag, buf)
            }
            _ => write_leaf(path, schema, value, buf),
        }
    }

    fn encode_struct(
        &self,
        path: &TagPath,
        info: &StructSchema,
        value: &Value,
        buf: &mut PacketBuf,
    ) -> Result<(), CodecError> {
        let fields = value.expect_struct(path, info)?;
        for (field, value) in info.iter().zip(fields) {
            self.encode_value(&path.child(field.name())?, field.schema(), value, buf)?;
        }
        Ok(())
    }

    fn encode_list(
        &self,
        path: &TagPath,
        element: &Schema,
        value: &Value,
        buf: &mut PacketBuf,
    ) -> Result<(), CodecError> {
        let items = value.expect_list(path)?;
        let Ok(size) = i32::try_from(items.len()) else {
            return Err(CodecError::InvalidData {
                path: path.as_str().to_string(),
                detail: format!("a list of {} elements exceeds the size range", items.len()),
            });
        };

        buf.write_i32(size);
        for (index, item) in items.iter().enumerate() {
            self.encode_value(&path.index(index), element, item, buf)?;
        }
        Ok(())
    }

    fn encode_nullable(
        &self,
        path: &TagPath,
        inner: &Schema,
        value: &Value,
        buf: &mut PacketBuf,
    ) -> Result<(), CodecError> {
        if inner.is_nullable() {
            return Err(CodecError::nested_nullable(path));
        }
        match value.expect_nullable(path)? {
            None => {
                buf.write_u8(0);
                Ok(())
            }
            Some(value) => {
                buf.write_u8(1);
                self.encode_value(path, inner, value, buf)
            }
        }
    }
}

fn write_leaf(
    path: &TagPath,
    schema: &Schema,
    value: &Value,
    buf: &mut PacketBuf,
) -> Result<(), CodecError> {
    match (schema, value) {
        (Schema::Bool, Value::Bool(value)) => buf.write_bool(*value),
        (Schema::Byte, Value::Byte(value)) => buf.write_i8(*value),
        (Schema::Short, Value::Short(value)) => buf.write_i16(*value),
        (Schema::Int, Value::Int(value)) => buf.write_i32(*value),
        (Schema::Long, Value::Long(value)) => buf.write_i64(*value),
        (Schema::Float, Value::Float(value)) => buf.write_f32(*value),
        (Schema::Double, Value::Double(value)) => buf.write_f64(*value),
        (Schema::Char, Value::Char(value)) => buf.write_u32(*value as u32),
        (Schema::String, Value::String(value)) => buf.write_str(value)?,
        (Schema::Unit, Value::Unit) => buf.write_u8(0),
        (Schema::Enum(info), Value::Enum(ordinal)) => {
            buf.write_i32(info.encode_ordinal(path, *ordinal)?);
        }
        (schema, value) => return Err(CodecError::mismatch(path, schema.kind().name(), value)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vc_nbt::Tag;
    use vc_packet::PacketBuf;

    use super::PacketEncoder;
    use crate::error::CodecError;
    use crate::registry::TagIoRegistry;
    use crate::schema::{Field, Schema, StructSchema};
    use crate::value::Value;

    fn encode(schema: &Schema, value: &Value) -> Result<PacketBuf, CodecError> {
        let registry = TagIoRegistry::standard();
        let mut buf = PacketBuf::new();
        PacketEncoder::new(&registry).encode(schema, value, &mut buf)?;
        Ok(buf)
    }

    #[test]
    fn lists_are_a_count_then_raw_elements() {
        let schema = Schema::list(Schema::Byte);
        let value = Value::List(vec![Value::Byte(1), Value::Byte(2), Value::Byte(3)]);

        let buf = encode(&schema, &value).unwrap();
        assert_eq!(buf.as_slice(), [0, 0, 0, 3, 1, 2, 3]);
    }

    #[test]
    fn nullables_are_a_marker_then_the_value() {
        let schema = Schema::nullable(Schema::Int);

        let buf = encode(&schema, &Value::none()).unwrap();
        assert_eq!(buf.as_slice(), [0]);

        let buf = encode(&schema, &Value::some(Value::Int(7))).unwrap();
        assert_eq!(buf.as_slice(), [1, 0, 0, 0, 7]);
    }

    #[test]
    fn struct_fields_follow_declaration_order() {
        let schema = Schema::Struct(StructSchema::new(
            "Pair",
            vec![
                Field::new("a", Schema::Byte),
                Field::new("b", Schema::Short),
            ],
        ));
        let value = Value::Struct(vec![Value::Byte(1), Value::Short(2)]);

        let buf = encode(&schema, &value).unwrap();
        assert_eq!(buf.as_slice(), [1, 0, 2]);
    }

    #[test]
    fn tags_carry_their_kind_discriminant() {
        let buf = encode(&Schema::Tag, &Value::Tag(Tag::Int(5))).unwrap();
        assert_eq!(buf.as_slice(), [3, 0, 0, 0, 5]);
    }

    #[test]
    fn rejects_mismatched_values() {
        assert!(matches!(
            encode(&Schema::list(Schema::Int), &Value::Int(1)),
            Err(CodecError::UnsupportedValue { .. })
        ));
    }

    #[test]
    fn rejects_nested_nullable_schemas() {
        let schema = Schema::nullable(Schema::nullable(Schema::Int));
        assert!(matches!(
            encode(&schema, &Value::none()),
            Err(CodecError::UnsupportedSchema { .. })
        ));
    }
}
