//! Keyed storage of schema-shaped values in a tag tree, and the stream
//! equivalents.
//!
//! These free functions are the everyday surface of the crate. Trees
//! address values by key, so `put` and `get` compose the encoding with a
//! key derived from the schema (or supplied by the caller). Streams have
//! no keys, so `write` and `read` only add the guard rails around the
//! raw codecs.

use alloc::string::ToString;

use vc_nbt::Compound;
use vc_packet::{PacketBuf, PacketError};

use crate::error::CodecError;
use crate::packet::{PacketDecoder, PacketEncoder};
use crate::registry::TagIoRegistry;
use crate::schema::Schema;
use crate::tree::{TagDecoder, TagEncoder};
use crate::value::Value;

/// Stores `value` in `tree` under the schema's default key.
///
/// See [`put_keyed`].
#[inline]
pub fn put(
    tree: &mut Compound,
    registry: &TagIoRegistry,
    schema: &Schema,
    value: &Value,
) -> Result<(), CodecError> {
    put_keyed(tree, registry, schema.name(), schema, value)
}

/// Stores `value` in `tree` under `key`.
///
/// An absent nullable value stores nothing at all: top-level absence is
/// expressed by the key not existing. A present nullable value stores
/// its inner encoding bare, without a marker. Storing onto a key that
/// already exists fails with [`CodecError::DuplicateKey`].
pub fn put_keyed(
    tree: &mut Compound,
    registry: &TagIoRegistry,
    key: &str,
    schema: &Schema,
    value: &Value,
) -> Result<(), CodecError> {
    if value.is_absent() {
        return Ok(());
    }
    if tree.contains_key(key) {
        return Err(CodecError::DuplicateKey {
            key: key.to_string(),
        });
    }

    let tag = TagEncoder::new(registry).encode(schema, value)?;
    tree.put(key, tag);
    Ok(())
}

/// Retrieves the value under the schema's default key.
///
/// See [`get_keyed`].
#[inline]
pub fn get(
    tree: &Compound,
    registry: &TagIoRegistry,
    schema: &Schema,
) -> Result<Value, CodecError> {
    get_keyed(tree, registry, schema.name(), schema)
}

/// Retrieves the value under `key`, which must be present.
///
/// Fails with [`CodecError::AbsentValue`] when nothing is stored under
/// the key, or when the stored tag encodes absence. The result keeps the
/// schema's shape: a present nullable decodes to its wrapped form.
pub fn get_keyed(
    tree: &Compound,
    registry: &TagIoRegistry,
    key: &str,
    schema: &Schema,
) -> Result<Value, CodecError> {
    let Some(tag) = tree.get(key) else {
        return Err(CodecError::AbsentValue {
            key: key.to_string(),
        });
    };

    let value = TagDecoder::new(registry).decode(schema, tag)?;
    if value.is_absent() {
        return Err(CodecError::AbsentValue {
            key: key.to_string(),
        });
    }
    Ok(value)
}

/// Retrieves the value under the schema's default key, absence allowed.
///
/// See [`get_opt_keyed`].
#[inline]
pub fn get_opt(
    tree: &Compound,
    registry: &TagIoRegistry,
    schema: &Schema,
) -> Result<Option<Value>, CodecError> {
    get_opt_keyed(tree, registry, schema.name(), schema)
}

/// Retrieves the value under `key`, or `None` when nothing is stored.
///
/// The nullable layer collapses into the returned `Option`: a nullable
/// schema yields its inner value here, never a wrapped one.
pub fn get_opt_keyed(
    tree: &Compound,
    registry: &TagIoRegistry,
    key: &str,
    schema: &Schema,
) -> Result<Option<Value>, CodecError> {
    let Some(tag) = tree.get(key) else {
        return Ok(None);
    };

    match TagDecoder::new(registry).decode(schema, tag)? {
        Value::Nullable(inner) => Ok(inner.map(|boxed| *boxed)),
        value => Ok(Some(value)),
    }
}

/// Appends `value` to `buf` in schema order.
#[inline]
pub fn write(
    buf: &mut PacketBuf,
    registry: &TagIoRegistry,
    schema: &Schema,
    value: &Value,
) -> Result<(), CodecError> {
    PacketEncoder::new(registry).encode(schema, value, buf)
}

/// Reads the next value from `buf` in schema order.
///
/// An already exhausted buffer reads as absent for nullable schemas and
/// fails as an invalid packet for everything else.
pub fn read(
    buf: &mut PacketBuf,
    registry: &TagIoRegistry,
    schema: &Schema,
) -> Result<Value, CodecError> {
    if buf.is_exhausted() {
        if schema.is_nullable() {
            return Ok(Value::none());
        }
        return Err(CodecError::InvalidPacket {
            source: PacketError::UnexpectedEnd {
                needed: 1,
                remaining: 0,
            },
        });
    }
    PacketDecoder::new(registry).decode(schema, buf)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vc_nbt::Compound;
    use vc_packet::PacketBuf;

    use crate::error::CodecError;
    use crate::registry::TagIoRegistry;
    use crate::schema::{Field, Schema, StructSchema};
    use crate::store;
    use crate::value::Value;

    fn player_schema() -> Schema {
        Schema::Struct(StructSchema::new(
            "Player",
            vec![
                Field::new("health", Schema::Int),
                Field::new("name", Schema::String),
            ],
        ))
    }

    fn player_value() -> Value {
        Value::Struct(vec![Value::Int(20), Value::String("Steve".into())])
    }

    #[test]
    fn stores_under_the_schema_name_by_default() {
        let registry = TagIoRegistry::standard();
        let mut tree = Compound::new();

        store::put(&mut tree, &registry, &player_schema(), &player_value()).unwrap();

        assert!(tree.contains_key("Player"));
        assert_eq!(
            store::get(&tree, &registry, &player_schema()),
            Ok(player_value())
        );
    }

    #[test]
    fn second_put_under_the_same_key_fails() {
        let registry = TagIoRegistry::standard();
        let mut tree = Compound::new();

        store::put(&mut tree, &registry, &player_schema(), &player_value()).unwrap();

        assert_eq!(
            store::put(&mut tree, &registry, &player_schema(), &player_value()),
            Err(CodecError::DuplicateKey {
                key: "Player".into(),
            })
        );

        // A caller-supplied key sidesteps the collision.
        store::put_keyed(
            &mut tree,
            &registry,
            "backup",
            &player_schema(),
            &player_value(),
        )
        .unwrap();
        assert!(tree.contains_key("backup"));
    }

    #[test]
    fn absent_nullable_values_store_nothing() {
        let registry = TagIoRegistry::standard();
        let schema = Schema::nullable(Schema::Int);
        let mut tree = Compound::new();

        store::put(&mut tree, &registry, &schema, &Value::none()).unwrap();

        assert!(tree.is_empty());
        assert_eq!(store::get_opt(&tree, &registry, &schema), Ok(None));
        assert_eq!(
            store::get(&tree, &registry, &schema),
            Err(CodecError::AbsentValue {
                key: "Nullable".into(),
            })
        );
    }

    #[test]
    fn present_nullable_values_store_bare() {
        let registry = TagIoRegistry::standard();
        let schema = Schema::nullable(Schema::Int);
        let mut tree = Compound::new();

        store::put(&mut tree, &registry, &schema, &Value::some(Value::Int(7))).unwrap();

        // No marker at the top level, the inner tag sits under the key.
        assert_eq!(tree.get_int("Nullable"), Ok(7));

        assert_eq!(
            store::get(&tree, &registry, &schema),
            Ok(Value::some(Value::Int(7)))
        );
        assert_eq!(
            store::get_opt(&tree, &registry, &schema),
            Ok(Some(Value::Int(7)))
        );
    }

    #[test]
    fn missing_keys_read_as_absent_or_fail() {
        let registry = TagIoRegistry::standard();
        let tree = Compound::new();

        assert_eq!(
            store::get_opt(&tree, &registry, &player_schema()),
            Ok(None)
        );
        assert_eq!(
            store::get(&tree, &registry, &player_schema()),
            Err(CodecError::AbsentValue {
                key: "Player".into(),
            })
        );
    }

    #[test]
    fn streams_round_trip_through_the_facade() {
        let registry = TagIoRegistry::standard();
        let mut buf = PacketBuf::new();

        store::write(&mut buf, &registry, &player_schema(), &player_value()).unwrap();

        assert_eq!(
            store::read(&mut buf, &registry, &player_schema()),
            Ok(player_value())
        );
        assert!(buf.is_exhausted());
    }

    #[test]
    fn exhausted_buffers_guard_by_nullability() {
        let registry = TagIoRegistry::standard();

        let mut buf = PacketBuf::new();
        assert_eq!(
            store::read(&mut buf, &registry, &Schema::nullable(Schema::Int)),
            Ok(Value::none())
        );

        let mut buf = PacketBuf::new();
        assert!(matches!(
            store::read(&mut buf, &registry, &Schema::Int),
            Err(CodecError::InvalidPacket { .. })
        ));
    }
}
