//! Shape descriptions shared by the tree and packet codecs.

use alloc::boxed::Box;
use core::fmt::{self, Display, Formatter};

mod enum_schema;
mod schematic;
mod struct_schema;

pub use enum_schema::EnumSchema;
pub use schematic::Schematic;
pub use struct_schema::{Field, StructSchema};

crate::cfg::std! {
    pub use schematic::SchemaCell;
}

// -----------------------------------------------------------------------------
// Schema

/// The wire shape of a value.
///
/// A schema is the contract both codecs share. The tree codec composes
/// keys from it, the packet codec derives the field order from it, and
/// both validate values against it before touching the output.
///
/// Collections hold a single element schema, so heterogeneous lists are
/// expressed with [`Schema::Tag`] elements. Nullability is a wrapper and
/// never nests: `Nullable(Nullable(_))` has no encoding and is rejected
/// by both codecs.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Unit,
    /// A variant ordinal encoded as [`Int`](Schema::Int).
    Enum(EnumSchema),
    List(Box<Schema>),
    Nullable(Box<Schema>),
    Struct(StructSchema),
    /// An arbitrary pre-built tag, dispatched through the I/O registry.
    Tag,
}

impl Schema {
    /// Boxes `element` into a list schema.
    #[inline]
    pub fn list(element: Schema) -> Self {
        Self::List(Box::new(element))
    }

    /// Boxes `inner` into a nullable schema.
    #[inline]
    pub fn nullable(inner: Schema) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Returns the discriminant of this schema.
    pub const fn kind(&self) -> SchemaKind {
        match self {
            Self::Bool => SchemaKind::Bool,
            Self::Byte => SchemaKind::Byte,
            Self::Short => SchemaKind::Short,
            Self::Int => SchemaKind::Int,
            Self::Long => SchemaKind::Long,
            Self::Float => SchemaKind::Float,
            Self::Double => SchemaKind::Double,
            Self::Char => SchemaKind::Char,
            Self::String => SchemaKind::String,
            Self::Unit => SchemaKind::Unit,
            Self::Enum(_) => SchemaKind::Enum,
            Self::List(_) => SchemaKind::List,
            Self::Nullable(_) => SchemaKind::Nullable,
            Self::Struct(_) => SchemaKind::Struct,
            Self::Tag => SchemaKind::Tag,
        }
    }

    /// Returns `true` for nullable schemas.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Returns the default key values of this schema store under.
    ///
    /// Named schemas use their declared name, everything else its kind
    /// name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Struct(info) => info.name(),
            Self::Enum(info) => info.name(),
            other => other.kind().name(),
        }
    }

    /// Casts to the struct info, if this is a struct schema.
    pub fn as_struct(&self) -> Option<&StructSchema> {
        match self {
            Self::Struct(info) => Some(info),
            _ => None,
        }
    }

    /// Casts to the enum info, if this is an enum schema.
    pub fn as_enum(&self) -> Option<&EnumSchema> {
        match self {
            Self::Enum(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the element schema, if this is a list schema.
    pub fn as_list(&self) -> Option<&Schema> {
        match self {
            Self::List(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the inner schema, if this is a nullable schema.
    pub fn as_nullable(&self) -> Option<&Schema> {
        match self {
            Self::Nullable(inner) => Some(inner),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// SchemaKind

/// The discriminant of a [`Schema`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Unit,
    Enum,
    List,
    Nullable,
    Struct,
    Tag,
}

impl SchemaKind {
    /// Returns the display name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Char => "Char",
            Self::String => "String",
            Self::Unit => "Unit",
            Self::Enum => "Enum",
            Self::List => "List",
            Self::Nullable => "Nullable",
            Self::Struct => "Struct",
            Self::Tag => "Tag",
        }
    }
}

impl Display for SchemaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{EnumSchema, Field, Schema, SchemaKind, StructSchema};

    #[test]
    fn names_fall_back_to_the_kind() {
        assert_eq!(Schema::Int.name(), "Int");
        assert_eq!(Schema::list(Schema::Int).name(), "List");

        let player = Schema::Struct(StructSchema::new(
            "Player",
            vec![Field::new("health", Schema::Int)],
        ));
        assert_eq!(player.name(), "Player");

        let mode = Schema::Enum(EnumSchema::new("GameMode", vec!["Survival", "Creative"]));
        assert_eq!(mode.name(), "GameMode");
    }

    #[test]
    fn casts_match_the_variant() {
        let list = Schema::list(Schema::Byte);
        assert_eq!(list.kind(), SchemaKind::List);
        assert_eq!(list.as_list(), Some(&Schema::Byte));
        assert_eq!(list.as_nullable(), None);

        let nullable = Schema::nullable(Schema::Int);
        assert!(nullable.is_nullable());
        assert_eq!(nullable.as_nullable(), Some(&Schema::Int));
    }
}
