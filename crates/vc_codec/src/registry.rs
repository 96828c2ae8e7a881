//! Dispatch of raw tag payloads through registered per-kind codecs.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use vc_nbt::{Compound, Tag, TagKind};
use vc_packet::PacketBuf;

use crate::error::CodecError;

// -----------------------------------------------------------------------------
// TagIo

/// One tag kind's wire codec.
///
/// The writer and reader handle the payload only. Kind discriminants are
/// framed by the caller, either [`TagIoRegistry::write_tag`] or a
/// container codec. Both functions receive the registry they were looked
/// up in, so container kinds dispatch nested payloads through whatever
/// entries are actually registered.
#[derive(Debug, Clone, Copy)]
pub struct TagIo {
    /// The kind this entry encodes.
    pub kind: TagKind,
    /// Appends the payload of a tag of this kind.
    pub write: fn(&TagIoRegistry, &Tag, &mut PacketBuf) -> Result<(), CodecError>,
    /// Reads back the payload of a tag of this kind.
    pub read: fn(&TagIoRegistry, &mut PacketBuf) -> Result<Tag, CodecError>,
}

// -----------------------------------------------------------------------------
// TagIoRegistry

/// A table of [`TagIo`] entries indexed by tag kind.
///
/// Every codec that touches raw tags resolves payloads through an
/// explicit registry argument. There is no process-wide default: a host
/// that wants a custom wire format for some kind builds its own table
/// and passes it everywhere.
///
/// # Examples
///
/// ```rust
/// use vc_codec::TagIoRegistry;
/// use vc_nbt::TagKind;
///
/// let registry = TagIoRegistry::standard();
/// assert!(registry.contains(TagKind::Compound));
///
/// assert!(!TagIoRegistry::empty().contains(TagKind::Byte));
/// ```
#[derive(Debug, Clone)]
pub struct TagIoRegistry {
    entries: [Option<TagIo>; TagKind::COUNT],
}

impl Default for TagIoRegistry {
    /// See [`TagIoRegistry::standard`] .
    #[inline]
    fn default() -> Self {
        Self::standard()
    }
}

impl TagIoRegistry {
    /// Creates a registry with no entries.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            entries: [None; TagKind::COUNT],
        }
    }

    /// Creates a registry covering every built-in tag kind.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(TagIo {
            kind: TagKind::End,
            write: write_end,
            read: read_end,
        });
        registry.register(TagIo {
            kind: TagKind::Byte,
            write: write_byte,
            read: read_byte,
        });
        registry.register(TagIo {
            kind: TagKind::Short,
            write: write_short,
            read: read_short,
        });
        registry.register(TagIo {
            kind: TagKind::Int,
            write: write_int,
            read: read_int,
        });
        registry.register(TagIo {
            kind: TagKind::Long,
            write: write_long,
            read: read_long,
        });
        registry.register(TagIo {
            kind: TagKind::Float,
            write: write_float,
            read: read_float,
        });
        registry.register(TagIo {
            kind: TagKind::Double,
            write: write_double,
            read: read_double,
        });
        registry.register(TagIo {
            kind: TagKind::ByteArray,
            write: write_byte_array,
            read: read_byte_array,
        });
        registry.register(TagIo {
            kind: TagKind::String,
            write: write_string,
            read: read_string,
        });
        registry.register(TagIo {
            kind: TagKind::List,
            write: write_list,
            read: read_list,
        });
        registry.register(TagIo {
            kind: TagKind::Compound,
            write: write_compound,
            read: read_compound,
        });
        registry.register(TagIo {
            kind: TagKind::IntArray,
            write: write_int_array,
            read: read_int_array,
        });
        registry.register(TagIo {
            kind: TagKind::LongArray,
            write: write_long_array,
            read: read_long_array,
        });
        registry
    }

    /// Stores `entry` under its kind, replacing any previous entry.
    #[inline]
    pub fn register(&mut self, entry: TagIo) {
        self.entries[entry.kind.id() as usize] = Some(entry);
    }

    /// Returns `true` if `kind` has an entry.
    #[inline]
    pub const fn contains(&self, kind: TagKind) -> bool {
        self.entries[kind.id() as usize].is_some()
    }

    /// Returns the entry for `kind`.
    pub fn entry(&self, kind: TagKind) -> Result<&TagIo, CodecError> {
        self.entries[kind.id() as usize]
            .as_ref()
            .ok_or(CodecError::UnregisteredKind { kind })
    }

    /// Fails if `kind` has no entry.
    #[inline]
    pub fn ensure(&self, kind: TagKind) -> Result<(), CodecError> {
        self.entry(kind).map(|_| ())
    }

    /// Returns an iterator over the registered entries.
    pub fn iter(&self) -> impl Iterator<Item = &TagIo> {
        self.entries.iter().filter_map(Option::as_ref)
    }

    /// Appends `tag` behind its kind discriminant.
    pub fn write_tag(&self, tag: &Tag, buf: &mut PacketBuf) -> Result<(), CodecError> {
        let entry = self.entry(tag.kind())?;
        buf.write_u8(tag.kind().id());
        (entry.write)(self, tag, buf)
    }

    /// Reads one discriminant-framed tag.
    pub fn read_tag(&self, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
        let id = buf.read_u8()?;
        let Some(kind) = TagKind::from_id(id) else {
            return Err(CodecError::UnknownTagId { id });
        };
        let entry = self.entry(kind)?;
        (entry.read)(self, buf)
    }
}

// -----------------------------------------------------------------------------
// Standard codecs

// Payload layouts follow the classic tree wire format: big-endian
// scalars, i32 counts before array and list bodies, and id/name framing
// inside compounds.

macro_rules! impl_scalar_io {
    ($( $write_fn:ident, $read_fn:ident: $variant:ident => $cast:ident, $put:ident, $take:ident; )+) => {
        $(
            fn $write_fn(_: &TagIoRegistry, tag: &Tag, buf: &mut PacketBuf) -> Result<(), CodecError> {
                buf.$put(tag.$cast()?);
                Ok(())
            }

            fn $read_fn(_: &TagIoRegistry, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
                Ok(Tag::$variant(buf.$take()?))
            }
        )+
    };
}

impl_scalar_io! {
    write_byte, read_byte: Byte => as_byte, write_i8, read_i8;
    write_short, read_short: Short => as_short, write_i16, read_i16;
    write_int, read_int: Int => as_int, write_i32, read_i32;
    write_long, read_long: Long => as_long, write_i64, read_i64;
    write_float, read_float: Float => as_float, write_f32, read_f32;
    write_double, read_double: Double => as_double, write_f64, read_f64;
}

fn write_end(_: &TagIoRegistry, _: &Tag, _: &mut PacketBuf) -> Result<(), CodecError> {
    Ok(())
}

fn read_end(_: &TagIoRegistry, _: &mut PacketBuf) -> Result<Tag, CodecError> {
    Ok(Tag::End)
}

fn write_string(_: &TagIoRegistry, tag: &Tag, buf: &mut PacketBuf) -> Result<(), CodecError> {
    buf.write_str(tag.as_string()?)?;
    Ok(())
}

fn read_string(_: &TagIoRegistry, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
    Ok(Tag::String(buf.read_str()?))
}

fn write_byte_array(_: &TagIoRegistry, tag: &Tag, buf: &mut PacketBuf) -> Result<(), CodecError> {
    let values = tag.as_byte_array()?;
    write_count(values.len(), buf)?;
    for value in values {
        buf.write_i8(*value);
    }
    Ok(())
}

fn read_byte_array(_: &TagIoRegistry, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
    let len = read_count(buf)?;
    let mut values = Vec::new();
    for _ in 0..len {
        values.push(buf.read_i8()?);
    }
    Ok(Tag::ByteArray(values))
}

fn write_int_array(_: &TagIoRegistry, tag: &Tag, buf: &mut PacketBuf) -> Result<(), CodecError> {
    let values = tag.as_int_array()?;
    write_count(values.len(), buf)?;
    for value in values {
        buf.write_i32(*value);
    }
    Ok(())
}

fn read_int_array(_: &TagIoRegistry, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
    let len = read_count(buf)?;
    let mut values = Vec::new();
    for _ in 0..len {
        values.push(buf.read_i32()?);
    }
    Ok(Tag::IntArray(values))
}

fn write_long_array(_: &TagIoRegistry, tag: &Tag, buf: &mut PacketBuf) -> Result<(), CodecError> {
    let values = tag.as_long_array()?;
    write_count(values.len(), buf)?;
    for value in values {
        buf.write_i64(*value);
    }
    Ok(())
}

fn read_long_array(_: &TagIoRegistry, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
    let len = read_count(buf)?;
    let mut values = Vec::new();
    for _ in 0..len {
        values.push(buf.read_i64()?);
    }
    Ok(Tag::LongArray(values))
}

// Every element carries its own kind discriminant, so lists holding
// mixed kinds survive a round trip.
fn write_list(registry: &TagIoRegistry, tag: &Tag, buf: &mut PacketBuf) -> Result<(), CodecError> {
    let values = tag.as_list()?;
    write_count(values.len(), buf)?;
    for value in values {
        registry.write_tag(value, buf)?;
    }
    Ok(())
}

fn read_list(registry: &TagIoRegistry, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
    let len = read_count(buf)?;
    let mut values = Vec::new();
    for _ in 0..len {
        values.push(registry.read_tag(buf)?);
    }
    Ok(Tag::List(values))
}

fn write_compound(
    registry: &TagIoRegistry,
    tag: &Tag,
    buf: &mut PacketBuf,
) -> Result<(), CodecError> {
    let tree = tag.as_compound()?;
    for (name, value) in tree.iter() {
        // The End id terminates the entry stream, it cannot name a value.
        if value.is_end() {
            return Err(CodecError::UnsupportedSchema {
                path: name.clone(),
                detail: "an End tag cannot be stored as a compound entry",
            });
        }
        let entry = registry.entry(value.kind())?;
        buf.write_u8(value.kind().id());
        buf.write_str(name)?;
        (entry.write)(registry, value, buf)?;
    }
    buf.write_u8(TagKind::End.id());
    Ok(())
}

fn read_compound(registry: &TagIoRegistry, buf: &mut PacketBuf) -> Result<Tag, CodecError> {
    let mut tree = Compound::new();
    loop {
        let id = buf.read_u8()?;
        let Some(kind) = TagKind::from_id(id) else {
            return Err(CodecError::UnknownTagId { id });
        };
        if kind == TagKind::End {
            return Ok(Tag::Compound(tree));
        }
        let name = buf.read_str()?;
        let entry = registry.entry(kind)?;
        tree.put(name, (entry.read)(registry, buf)?);
    }
}

fn write_count(len: usize, buf: &mut PacketBuf) -> Result<(), CodecError> {
    let Ok(count) = i32::try_from(len) else {
        return Err(CodecError::InvalidData {
            path: String::new(),
            detail: format!("length {len} exceeds the count field range"),
        });
    };
    buf.write_i32(count);
    Ok(())
}

fn read_count(buf: &mut PacketBuf) -> Result<usize, CodecError> {
    let count = buf.read_i32()?;
    usize::try_from(count).map_err(|_| CodecError::InvalidData {
        path: String::new(),
        detail: format!("negative count {count}"),
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vc_nbt::{Compound, Tag, TagKind};
    use vc_packet::PacketBuf;

    use super::{TagIo, TagIoRegistry, read_end, write_end};
    use crate::error::CodecError;

    #[test]
    fn standard_covers_every_kind() {
        let registry = TagIoRegistry::standard();
        assert_eq!(registry.iter().count(), TagKind::COUNT);

        for entry in registry.iter() {
            assert!(registry.contains(entry.kind));
        }
    }

    #[test]
    fn frames_tags_with_their_kind_id() {
        let registry = TagIoRegistry::standard();
        let mut buf = PacketBuf::new();

        registry.write_tag(&Tag::Int(7), &mut buf).unwrap();
        assert_eq!(buf.as_slice(), [3, 0, 0, 0, 7]);

        assert_eq!(registry.read_tag(&mut buf), Ok(Tag::Int(7)));
        assert!(buf.is_exhausted());
    }

    #[test]
    fn round_trips_nested_trees() {
        let mut inner = Compound::new();
        inner.put_string("name", "Steve");
        inner.put_long_array("seen", vec![1, -1]);

        let mut tree = Compound::new();
        tree.put_compound("profile", inner);
        tree.put(
            "data",
            Tag::List(vec![Tag::Byte(1), Tag::Int(2), Tag::String("three".into())]),
        );

        let registry = TagIoRegistry::standard();
        let mut buf = PacketBuf::new();
        registry
            .write_tag(&Tag::Compound(tree.clone()), &mut buf)
            .unwrap();

        assert_eq!(registry.read_tag(&mut buf), Ok(Tag::Compound(tree)));
    }

    #[test]
    fn rejects_end_entries_inside_compounds() {
        let mut tree = Compound::new();
        tree.put("broken", Tag::End);

        let registry = TagIoRegistry::standard();
        let mut buf = PacketBuf::new();

        assert!(matches!(
            registry.write_tag(&Tag::Compound(tree), &mut buf),
            Err(CodecError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn unknown_ids_do_not_dispatch() {
        let registry = TagIoRegistry::standard();
        let mut buf = PacketBuf::new();
        buf.write_u8(200);

        assert_eq!(
            registry.read_tag(&mut buf),
            Err(CodecError::UnknownTagId { id: 200 })
        );
    }

    #[test]
    fn empty_registries_reject_everything() {
        let registry = TagIoRegistry::empty();
        let mut buf = PacketBuf::new();

        assert_eq!(
            registry.write_tag(&Tag::Int(1), &mut buf),
            Err(CodecError::UnregisteredKind { kind: TagKind::Int })
        );
    }

    #[test]
    fn registration_replaces_the_previous_entry() {
        let mut registry = TagIoRegistry::empty();
        registry.register(TagIo {
            kind: TagKind::End,
            write: write_end,
            read: read_end,
        });

        assert!(registry.contains(TagKind::End));
        assert_eq!(registry.iter().count(), 1);

        registry.register(TagIo {
            kind: TagKind::End,
            write: write_end,
            read: read_end,
        });
        assert_eq!(registry.iter().count(), 1);
    }
}
