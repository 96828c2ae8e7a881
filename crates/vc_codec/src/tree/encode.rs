use alloc::format;
use alloc::string::ToString;

use vc_nbt::{Compound, Tag};

use crate::error::CodecError;
use crate::path::TagPath;
use crate::registry::TagIoRegistry;
use crate::schema::{Schema, StructSchema};
use crate::value::Value;

// -----------------------------------------------------------------------------
// TagEncoder

/// Encodes schema-shaped values into tag trees.
///
/// Struct roots open a compound and lay their fields flat under composed
/// dotted keys. A nested struct field opens a child compound of its own,
/// restarting the key scope. Collection sizes and presence markers are
/// stored next to their owner under the reserved `size` and `mark`
/// suffixes, so a decoder can probe for them without consuming anything.
///
/// # Examples
///
/// ```rust
/// use vc_codec::{Field, Schema, StructSchema, TagEncoder, TagIoRegistry, Value};
///
/// let schema = Schema::Struct(StructSchema::new("Player", vec![
///     Field::new("health", Schema::Int),
///     Field::new("scores", Schema::list(Schema::Int)),
/// ]));
/// let value = Value::Struct(vec![
///     Value::Int(20),
///     Value::List(vec![Value::Int(1), Value::Int(2)]),
/// ]);
///
/// let registry = TagIoRegistry::standard();
/// let tag = TagEncoder::new(&registry).encode(&schema, &value).unwrap();
///
/// let tree = tag.as_compound().unwrap();
/// assert_eq!(tree.get_int("health"), Ok(20));
/// assert_eq!(tree.get_int("scoressize"), Ok(2));
/// assert_eq!(tree.get_int("scores.1"), Ok(2));
/// ```
pub struct TagEncoder<'a> {
    registry: &'a TagIoRegistry,
}

impl<'a> TagEncoder<'a> {
    /// Creates an encoder resolving tag payloads through `registry`.
    #[inline]
    pub const fn new(registry: &'a TagIoRegistry) -> Self {
        Self { registry }
    }

    /// Encodes `value` against `schema` into a single tag.
    ///
    /// Struct and list roots produce compounds, leaf roots produce the
    /// bare leaf tag. An absent nullable root produces [`Tag::End`], the
    /// one tag kind never stored as a value.
    pub fn encode(&self, schema: &Schema, value: &Value) -> Result<Tag, CodecError> {
        self.encode_root(&TagPath::root(), schema, value)
    }

    fn encode_root(
        &self,
        path: &TagPath,
        schema: &Schema,
        value: &Value,
    ) -> Result<Tag, CodecError> {
        match schema {
            Schema::Struct(info) => {
                let mut tree = Compound::new();
                self.encode_struct(path, info, value, &mut tree)?;
                Ok(Tag::Compound(tree))
            }
            Schema::List(element) => {
                let mut tree = Compound::new();
                self.encode_list(path, element, value, &mut tree)?;
                Ok(Tag::Compound(tree))
            }
            Schema::Nullable(inner) => {
                if inner.is_nullable() {
                    return Err(CodecError::nested_nullable(path));
                }
                match value.expect_nullable(path)? {
                    Some(value) => self.encode_root(path, inner, value),
                    None => Ok(Tag::End),
                }
            }
            Schema::Tag => self.tag_value(path, value),
            _ => leaf_tag(path, schema, value),
        }
    }

    fn encode_struct(
        &self,
        path: &TagPath,
        info: &StructSchema,
        value: &Value,
        tree: &mut Compound,
    ) -> Result<(), CodecError> {
        let fields = value.expect_struct(path, info)?;

        // Keys restart from the scope root inside every compound.
        for (field, value) in info.iter().zip(fields) {
            let path = TagPath::root().child(field.name())?;
            self.encode_field(&path, field.schema(), value, tree)?;
        }
        Ok(())
    }

    fn encode_field(
        &self,
        path: &TagPath,
        schema: &Schema,
        value: &Value,
        tree: &mut Compound,
    ) -> Result<(), CodecError> {
        match schema {
            Schema::List(element) => self.encode_list(path, element, value, tree),
            Schema::Nullable(inner) => self.encode_nullable(path, inner, value, tree),
            Schema::Struct(info) => {
                let mut child = Compound::new();
                self.encode_struct(path, info, value, &mut child)?;
                put_new(tree, path.as_str(), Tag::Compound(child))
            }
            Schema::Tag => {
                let tag = self.tag_value(path, value)?;
                put_new(tree, path.as_str(), tag)
            }
            _ => put_new(tree, path.as_str(), leaf_tag(path, schema, value)?),
        }
    }

    fn encode_list(
        &self,
        path: &TagPath,
        element: &Schema,
        value: &Value,
        tree: &mut Compound,
    ) -> Result<(), CodecError> {
        let items = value.expect_list(path)?;
        put_new(tree, &path.size_key(), Tag::Int(list_size(path, items.len())?))?;

        for (index, item) in items.iter().enumerate() {
            self.encode_field(&path.index(index), element, item, tree)?;
        }
        Ok(())
    }

    fn encode_nullable(
        &self,
        path: &TagPath,
        inner: &Schema,
        value: &Value,
        tree: &mut Compound,
    ) -> Result<(), CodecError> {
        if inner.is_nullable() {
            return Err(CodecError::nested_nullable(path));
        }
        match value.expect_nullable(path)? {
            None => put_new(tree, &path.mark_key(), Tag::Byte(0)),
            Some(value) => {
                put_new(tree, &path.mark_key(), Tag::Byte(1))?;
                self.encode_field(path, inner, value, tree)
            }
        }
    }

    fn tag_value(&self, path: &TagPath, value: &Value) -> Result<Tag, CodecError> {
        let Value::Tag(tag) = value else {
            return Err(CodecError::mismatch(path, "Tag", value));
        };
        self.registry.ensure(tag.kind())?;
        Ok(tag.clone())
    }
}

// Insertions never overwrite, a colliding key is always an error.
fn put_new(tree: &mut Compound, key: &str, tag: Tag) -> Result<(), CodecError> {
    if tree.contains_key(key) {
        return Err(CodecError::DuplicateKey {
            key: key.to_string(),
        });
    }
    tree.put(key, tag);
    Ok(())
}

fn leaf_tag(path: &TagPath, schema: &Schema, value: &Value) -> Result<Tag, CodecError> {
    match (schema, value) {
        (Schema::Bool, Value::Bool(value)) => Ok(Tag::Byte(i8::from(*value))),
        (Schema::Byte, Value::Byte(value)) => Ok(Tag::Byte(*value)),
        (Schema::Short, Value::Short(value)) => Ok(Tag::Short(*value)),
        (Schema::Int, Value::Int(value)) => Ok(Tag::Int(*value)),
        (Schema::Long, Value::Long(value)) => Ok(Tag::Long(*value)),
        (Schema::Float, Value::Float(value)) => Ok(Tag::Float(*value)),
        (Schema::Double, Value::Double(value)) => Ok(Tag::Double(*value)),
        (Schema::Char, Value::Char(value)) => Ok(Tag::Int(*value as i32)),
        (Schema::String, Value::String(value)) => Ok(Tag::String(value.clone())),
        (Schema::Unit, Value::Unit) => Ok(Tag::Byte(0)),
        (Schema::Enum(info), Value::Enum(ordinal)) => {
            Ok(Tag::Int(info.encode_ordinal(path, *ordinal)?))
        }
        (schema, value) => Err(CodecError::mismatch(path, schema.kind().name(), value)),
    }
}

pub(super) fn list_size(path: &TagPath, len: usize) -> Result<i32, CodecError> {
    i32::try_from(len).map_err(|_| CodecError::InvalidData {
        path: path.as_str().to_string(),
        detail: format!("a list of {len} elements exceeds the size range"),
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vc_nbt::{Tag, TagKind};

    use super::TagEncoder;
    use crate::error::CodecError;
    use crate::registry::TagIoRegistry;
    use crate::schema::{EnumSchema, Field, Schema, StructSchema};
    use crate::value::Value;

    fn encode(schema: &Schema, value: &Value) -> Result<Tag, CodecError> {
        let registry = TagIoRegistry::standard();
        TagEncoder::new(&registry).encode(schema, value)
    }

    fn player_schema() -> Schema {
        Schema::Struct(StructSchema::new(
            "Player",
            vec![
                Field::new("name", Schema::String),
                Field::new("position", Schema::nullable(Schema::Double)),
            ],
        ))
    }

    #[test]
    fn absent_nullable_fields_store_only_their_marker() {
        let value = Value::Struct(vec![Value::String("Steve".into()), Value::none()]);

        let tag = encode(&player_schema(), &value).unwrap();
        let tree = tag.as_compound().unwrap();

        assert_eq!(tree.get_byte("positionmark"), Ok(0));
        assert!(!tree.contains_key("position"));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn present_nullable_fields_store_marker_and_value() {
        let value = Value::Struct(vec![
            Value::String("Steve".into()),
            Value::some(Value::Double(64.5)),
        ]);

        let tag = encode(&player_schema(), &value).unwrap();
        let tree = tag.as_compound().unwrap();

        assert_eq!(tree.get_byte("positionmark"), Ok(1));
        assert_eq!(tree.get_double("position"), Ok(64.5));
    }

    #[test]
    fn lists_store_their_size_next_to_the_elements() {
        let schema = Schema::Struct(StructSchema::new(
            "Scores",
            vec![Field::new("scores", Schema::list(Schema::Int))],
        ));
        let value = Value::Struct(vec![Value::List(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
        ])]);

        let tag = encode(&schema, &value).unwrap();
        let tree = tag.as_compound().unwrap();

        assert_eq!(tree.get_int("scoressize"), Ok(3));
        assert_eq!(tree.get_int("scores.0"), Ok(1));
        assert_eq!(tree.get_int("scores.2"), Ok(3));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn empty_lists_still_announce_themselves() {
        let schema = Schema::list(Schema::Int);
        let tag = encode(&schema, &Value::List(vec![])).unwrap();
        let tree = tag.as_compound().unwrap();

        assert_eq!(tree.get_int("size"), Ok(0));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn nested_lists_compose_their_paths() {
        let schema = Schema::list(Schema::list(Schema::Int));
        let value = Value::List(vec![
            Value::List(vec![Value::Int(5)]),
            Value::List(vec![]),
        ]);

        let tag = encode(&schema, &value).unwrap();
        let tree = tag.as_compound().unwrap();

        assert_eq!(tree.get_int("size"), Ok(2));
        assert_eq!(tree.get_int("0size"), Ok(1));
        assert_eq!(tree.get_int("0.0"), Ok(5));
        assert_eq!(tree.get_int("1size"), Ok(0));
    }

    #[test]
    fn nested_structs_open_a_fresh_scope() {
        let schema = Schema::Struct(StructSchema::new(
            "Player",
            vec![Field::new(
                "pos",
                Schema::Struct(StructSchema::new(
                    "Position",
                    vec![
                        Field::new("x", Schema::Int),
                        Field::new("y", Schema::Int),
                    ],
                )),
            )],
        ));
        let value = Value::Struct(vec![Value::Struct(vec![Value::Int(1), Value::Int(2)])]);

        let tag = encode(&schema, &value).unwrap();
        let tree = tag.as_compound().unwrap();

        let pos = tree.get_compound("pos").unwrap();
        assert_eq!(pos.get_int("x"), Ok(1));
        assert_eq!(pos.get_int("y"), Ok(2));
    }

    #[test]
    fn leaf_roots_encode_bare() {
        assert_eq!(encode(&Schema::Int, &Value::Int(7)), Ok(Tag::Int(7)));
        assert_eq!(encode(&Schema::Bool, &Value::Bool(true)), Ok(Tag::Byte(1)));
        assert_eq!(encode(&Schema::Unit, &Value::Unit), Ok(Tag::Byte(0)));
        assert_eq!(
            encode(&Schema::Char, &Value::Char('é')),
            Ok(Tag::Int(0xE9))
        );
    }

    #[test]
    fn nullable_roots_collapse_to_the_inner_encoding() {
        let schema = Schema::nullable(Schema::Int);

        assert_eq!(encode(&schema, &Value::some(Value::Int(3))), Ok(Tag::Int(3)));
        assert_eq!(encode(&schema, &Value::none()), Ok(Tag::End));
    }

    #[test]
    fn rejects_nested_nullable_schemas() {
        let schema = Schema::nullable(Schema::nullable(Schema::Int));

        assert!(matches!(
            encode(&schema, &Value::none()),
            Err(CodecError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn rejects_reserved_field_names() {
        let schema = Schema::Struct(StructSchema::new(
            "Chunk",
            vec![Field::new("chunksize", Schema::Int)],
        ));

        assert!(matches!(
            encode(&schema, &Value::Struct(vec![Value::Int(1)])),
            Err(CodecError::ReservedName { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let schema = Schema::Struct(StructSchema::new(
            "Broken",
            vec![
                Field::new("x", Schema::Int),
                Field::new("x", Schema::Int),
            ],
        ));

        assert!(matches!(
            encode(&schema, &Value::Struct(vec![Value::Int(1), Value::Int(2)])),
            Err(CodecError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn rejects_mismatched_values() {
        assert!(matches!(
            encode(&Schema::Int, &Value::String("7".into())),
            Err(CodecError::UnsupportedValue {
                expected: "Int",
                ..
            })
        ));

        let wrong_arity = Value::Struct(vec![Value::Int(1)]);
        assert!(matches!(
            encode(&player_schema(), &wrong_arity),
            Err(CodecError::InvalidData { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_ordinals() {
        let schema = Schema::Enum(EnumSchema::new("GameMode", vec!["Survival", "Creative"]));

        assert_eq!(encode(&schema, &Value::Enum(1)), Ok(Tag::Int(1)));
        assert!(matches!(
            encode(&schema, &Value::Enum(9)),
            Err(CodecError::InvalidData { .. })
        ));
    }

    #[test]
    fn tags_pass_through_when_registered() {
        let tag = Tag::String("raw".into());

        assert_eq!(
            encode(&Schema::Tag, &Value::Tag(tag.clone())),
            Ok(tag.clone())
        );

        let empty = TagIoRegistry::empty();
        assert_eq!(
            TagEncoder::new(&empty).encode(&Schema::Tag, &Value::Tag(tag)),
            Err(CodecError::UnregisteredKind {
                kind: TagKind::String,
            })
        );
    }
}
