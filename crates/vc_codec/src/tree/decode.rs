use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use vc_nbt::{Compound, Tag, TagKind};

use crate::error::CodecError;
use crate::path::TagPath;
use crate::registry::TagIoRegistry;
use crate::schema::{Schema, StructSchema};
use crate::value::Value;

// -----------------------------------------------------------------------------
// TagDecoder

/// Decodes tag trees produced by [`TagEncoder`] back into values.
///
/// Decoding never walks the tree, it probes. Every field's presence is
/// announced by a key the decoder can compute from the schema alone: the
/// value key itself, a list's size key, or a nullable's marker key. Keys
/// the schema does not mention are ignored, so data written by a newer
/// schema still decodes. An announced but missing required field is an
/// error.
///
/// [`TagEncoder`]: crate::tree::TagEncoder
pub struct TagDecoder<'a> {
    registry: &'a TagIoRegistry,
}

impl<'a> TagDecoder<'a> {
    /// Creates a decoder resolving tag payloads through `registry`.
    #[inline]
    pub const fn new(registry: &'a TagIoRegistry) -> Self {
        Self { registry }
    }

    /// Decodes `tag` against `schema` into a value.
    pub fn decode(&self, schema: &Schema, tag: &Tag) -> Result<Value, CodecError> {
        self.decode_root(&TagPath::root(), schema, tag)
    }

    fn decode_root(
        &self,
        path: &TagPath,
        schema: &Schema,
        tag: &Tag,
    ) -> Result<Value, CodecError> {
        match schema {
            Schema::Struct(info) => self.decode_struct(info, tag.as_compound()?),
            Schema::List(element) => self.decode_list(path, element, tag.as_compound()?),
            Schema::Nullable(inner) => {
                if inner.is_nullable() {
                    return Err(CodecError::nested_nullable(path));
                }
                if tag.is_end() {
                    Ok(Value::none())
                } else {
                    Ok(Value::some(self.decode_root(path, inner, tag)?))
                }
            }
            Schema::Tag => {
                self.registry.ensure(tag.kind())?;
                Ok(Value::Tag(tag.clone()))
            }
            _ => leaf_value(path, schema, tag),
        }
    }

    fn decode_struct(&self, info: &StructSchema, tree: &Compound) -> Result<Value, CodecError> {
        let mut fields = Vec::with_capacity(info.field_len());

        for field in info.iter() {
            let path = TagPath::root().child(field.name())?;
            if is_present(tree, &path, field.schema()) {
                fields.push(self.decode_field(&path, field.schema(), tree)?);
            } else if field.schema().is_nullable() {
                // Declared but unannounced nullable fields decode as absent.
                fields.push(Value::none());
            } else {
                return Err(CodecError::MissingKey {
                    path: path.as_str().to_string(),
                });
            }
        }
        Ok(Value::Struct(fields))
    }

    fn decode_field(
        &self,
        path: &TagPath,
        schema: &Schema,
        tree: &Compound,
    ) -> Result<Value, CodecError> {
        match schema {
            Schema::Bool => Ok(Value::Bool(tree.get_bool(path.as_str())?)),
            Schema::Byte => Ok(Value::Byte(tree.get_byte(path.as_str())?)),
            Schema::Short => Ok(Value::Short(tree.get_short(path.as_str())?)),
            Schema::Int => Ok(Value::Int(tree.get_int(path.as_str())?)),
            Schema::Long => Ok(Value::Long(tree.get_long(path.as_str())?)),
            Schema::Float => Ok(Value::Float(tree.get_float(path.as_str())?)),
            Schema::Double => Ok(Value::Double(tree.get_double(path.as_str())?)),
            Schema::Char => char_value(path, tree.get_int(path.as_str())?),
            Schema::String => Ok(Value::String(tree.get_string(path.as_str())?.to_string())),
            Schema::Unit => {
                tree.get_byte(path.as_str())?;
                Ok(Value::Unit)
            }
            Schema::Enum(info) => Ok(Value::Enum(
                info.decode_ordinal(path, tree.get_int(path.as_str())?)?,
            )),
            Schema::List(element) => self.decode_list(path, element, tree),
            Schema::Nullable(inner) => self.decode_nullable(path, inner, tree),
            Schema::Struct(info) => self.decode_struct(info, tree.get_compound(path.as_str())?),
            Schema::Tag => {
                let Some(tag) = tree.get(path.as_str()) else {
                    return Err(CodecError::MissingKey {
                        path: path.as_str().to_string(),
                    });
                };
                self.registry.ensure(tag.kind())?;
                Ok(Value::Tag(tag.clone()))
            }
        }
    }

    fn decode_list(
        &self,
        path: &TagPath,
        element: &Schema,
        tree: &Compound,
    ) -> Result<Value, CodecError> {
        let size = tree.get_int(&path.size_key())?;
        let Ok(len) = usize::try_from(size) else {
            return Err(CodecError::InvalidData {
                path: path.size_key(),
                detail: format!("negative list size {size}"),
            });
        };

        let mut items = Vec::new();
        for index in 0..len {
            items.push(self.decode_field(&path.index(index), element, tree)?);
        }
        Ok(Value::List(items))
    }

    fn decode_nullable(
        &self,
        path: &TagPath,
        inner: &Schema,
        tree: &Compound,
    ) -> Result<Value, CodecError> {
        if inner.is_nullable() {
            return Err(CodecError::nested_nullable(path));
        }
        match tree.get_byte(&path.mark_key())? {
            0 => Ok(Value::none()),
            1 => Ok(Value::some(self.decode_field(path, inner, tree)?)),
            other => Err(CodecError::InvalidData {
                path: path.mark_key(),
                detail: format!("invalid presence marker {other}"),
            }),
        }
    }
}

// Presence probes per schema shape. Lists are announced by their size
// key and nullables by their marker, everything else by its value key.
fn is_present(tree: &Compound, path: &TagPath, schema: &Schema) -> bool {
    match schema {
        Schema::List(_) => tree.contains_key(&path.size_key()),
        Schema::Nullable(_) => tree.contains_key(&path.mark_key()),
        _ => tree.contains_key(path.as_str()),
    }
}

fn leaf_value(path: &TagPath, schema: &Schema, tag: &Tag) -> Result<Value, CodecError> {
    match (schema, tag) {
        (Schema::Bool, Tag::Byte(value)) => Ok(Value::Bool(*value != 0)),
        (Schema::Byte, Tag::Byte(value)) => Ok(Value::Byte(*value)),
        (Schema::Short, Tag::Short(value)) => Ok(Value::Short(*value)),
        (Schema::Int, Tag::Int(value)) => Ok(Value::Int(*value)),
        (Schema::Long, Tag::Long(value)) => Ok(Value::Long(*value)),
        (Schema::Float, Tag::Float(value)) => Ok(Value::Float(*value)),
        (Schema::Double, Tag::Double(value)) => Ok(Value::Double(*value)),
        (Schema::Char, Tag::Int(code)) => char_value(path, *code),
        (Schema::String, Tag::String(value)) => Ok(Value::String(value.clone())),
        (Schema::Unit, Tag::Byte(_)) => Ok(Value::Unit),
        (Schema::Enum(info), Tag::Int(raw)) => Ok(Value::Enum(info.decode_ordinal(path, *raw)?)),
        (schema, tag) => Err(CodecError::WrongKind {
            path: path.as_str().to_string(),
            expected: leaf_kind(schema),
            received: tag.kind(),
        }),
    }
}

// The tag kind a leaf schema is stored as.
fn leaf_kind(schema: &Schema) -> TagKind {
    match schema {
        Schema::Bool | Schema::Byte | Schema::Unit => TagKind::Byte,
        Schema::Short => TagKind::Short,
        Schema::Int | Schema::Char | Schema::Enum(_) => TagKind::Int,
        Schema::Long => TagKind::Long,
        Schema::Float => TagKind::Float,
        Schema::Double => TagKind::Double,
        Schema::String => TagKind::String,
        _ => TagKind::Compound,
    }
}

fn char_value(path: &TagPath, code: i32) -> Result<Value, CodecError> {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(Value::Char)
        .ok_or_else(|| CodecError::InvalidData {
            path: path.as_str().to_string(),
            detail: format!("invalid char code point {code}"),
        })
}
