use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use vc_packet::PacketBuf;

use crate::error::CodecError;
use crate::path::TagPath;
use crate::registry::TagIoRegistry;
use crate::schema::{Schema, StructSchema};
use crate::value::Value;

// -----------------------------------------------------------------------------
// PacketDecoder

/// Decodes byte streams produced by [`PacketEncoder`] back into values.
///
/// The stream is consumed strictly in schema order. A decoder walking a
/// different schema than the encoder wrote does not fail cleanly, it
/// misreads: the stream carries no names to resynchronize on. Use the
/// tree encoding where the two sides may disagree.
///
/// [`PacketEncoder`]: crate::packet::PacketEncoder
pub struct PacketDecoder<'a> {
    registry: &'a TagIoRegistry,
}

impl<'a> PacketDecoder<'a> {
    /// Creates a decoder resolving tag payloads through `registry`.
    #[inline]
    pub const fn new(registry: &'a TagIoRegistry) -> Self {
        Self { registry }
    }

    /// Reads the next value from `buf` in schema order.
    pub fn decode(&self, schema: &Schema, buf: &mut PacketBuf) -> Result<Value, CodecError> {
        self.decode_value(&TagPath::root(), schema, buf)
    }

    fn decode_value(
        &self,
        path: &TagPath,
        schema: &Schema,
        buf: &mut PacketBuf,
    ) -> Result<Value, CodecError> {
        match schema {
            Schema::Bool => Ok(Value::Bool(buf.read_bool()?)),
            Schema::Byte => Ok(Value::Byte(buf.read_i8()?)),
            Schema::Short => Ok(Value::Short(buf.read_i16()?)),
            Schema::Int => Ok(Value::Int(buf.read_i32()?)),
            Schema::Long => Ok(Value::Long(buf.read_i64()?)),
            Schema::Float => Ok(Value::Float(buf.read_f32()?)),
            Schema::Double => Ok(Value::Double(buf.read_f64()?)),
            Schema::Char => {
                let code = buf.read_u32()?;
                match char::from_u32(code) {
                    Some(value) => Ok(Value::Char(value)),
                    None => Err(CodecError::InvalidData {
                        path: path.as_str().to_string(),
                        detail: format!("invalid char code point {code}"),
                    }),
                }
            }
            Schema::String => Ok(Value::String(buf.read_str()?)),
            Schema::Unit => {
                buf.read_u8()?;
                Ok(Value::Unit)
            }
            Schema::Enum(info) => Ok(Value::Enum(info.decode_ordinal(path, buf.read_i32()?)?)),
            Schema::List(element) => self.decode_list(path, element, buf),
            Schema::Nullable(inner) => self.decode_nullable(path, inner, buf),
            Schema::Struct(info) => self.decode_struct(path, info, buf),
            Schema::Tag => Ok(Value::Tag(self.registry.read_tag(buf)?)),
        }
    }

    fn decode_struct(
        &self,
        path: &TagPath,
        info: &StructSchema,
        buf: &mut PacketBuf,
    ) -> Result<Value, CodecError> {
        let mut fields = Vec::with_capacity(info.field_len());
        for field in info.iter() {
            fields.push(self.decode_value(&path.child(field.name())?, field.schema(), buf)?);
        }
        Ok(Value::Struct(fields))
    }

    fn decode_list(
        &self,
        path: &TagPath,
        element: &Schema,
        buf: &mut PacketBuf,
    ) -> Result<Value, CodecError> {
        let size = buf.read_i32()?;
        let Ok(len) = usize::try_from(size) else {
            return Err(CodecError::InvalidData {
                path: path.as_str().to_string(),
                detail: format!("negative list size {size}"),
            });
        };

        let mut items = Vec::new();
        for index in 0..len {
            items.push(self.decode_value(&path.index(index), element, buf)?);
        }
        Ok(Value::List(items))
    }

    fn decode_nullable(
        &self,
        path: &TagPath,
        inner: &Schema,
        buf: &mut PacketBuf,
    ) -> Result<Value, CodecError> {
        if inner.is_nullable() {
            return Err(CodecError::nested_nullable(path));
        }
        match buf.read_u8()? {
            0 => Ok(Value::none()),
            1 => Ok(Value::some(self.decode_value(path, inner, buf)?)),
            other => Err(CodecError::InvalidData {
                path: path.as_str().to_string(),
                detail: format!("invalid presence marker {other}"),
            }),
        }
    }
}
