use alloc::boxed::Box;
use alloc::vec::Vec;

use vc_utils::hash::HashMap;

use crate::schema::Schema;

// -----------------------------------------------------------------------------
// Field

/// A named slot in a [`StructSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: &'static str,
    schema: Schema,
}

impl Field {
    /// Creates a new [`Field`].
    #[inline]
    pub const fn new(name: &'static str, schema: Schema) -> Self {
        Self { name, schema }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field schema.
    #[inline]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }
}

// -----------------------------------------------------------------------------
// StructSchema

/// A container for a struct's declared fields.
///
/// # Examples
///
/// ```rust
/// use vc_codec::{Field, Schema, StructSchema};
///
/// let info = StructSchema::new("Player", vec![
///     Field::new("health", Schema::Int),
///     Field::new("name", Schema::String),
/// ]);
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("name"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StructSchema {
    name: &'static str,
    fields: HashMap<&'static str, Field>,
    field_names: Box<[&'static str]>,
}

impl StructSchema {
    /// Creates a new [`StructSchema`].
    ///
    /// The order of internal fields is fixed, depends on the input order.
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        let field_names = fields.iter().map(Field::name).collect();
        let fields = fields.into_iter().map(|field| (field.name(), field)).collect();

        Self {
            name,
            fields,
            field_names,
        }
    }

    /// Returns the struct name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`Field`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the [`Field`] at the given index, if present.
    pub fn field_at(&self, index: usize) -> Option<&Field> {
        self.fields.get(self.field_names.get(index)?)
    }

    /// Returns an iterator over the fields in **declaration order**.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Field> {
        self.field_names
            .iter()
            .map(|name| self.fields.get(name).unwrap()) // field names should be valid
    }

    /// Returns the field names in declaration order.
    #[inline]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    /// Returns the index for the given field `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_names.iter().position(|s| *s == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.field_names.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Field, StructSchema};
    use crate::schema::Schema;

    #[test]
    fn keeps_declaration_order() {
        let info = StructSchema::new(
            "Player",
            vec![
                Field::new("health", Schema::Int),
                Field::new("name", Schema::String),
                Field::new("scores", Schema::list(Schema::Int)),
            ],
        );

        assert_eq!(info.name(), "Player");
        assert_eq!(info.field_len(), 3);
        assert_eq!(info.field_names(), ["health", "name", "scores"]);

        let order: Vec<_> = info.iter().map(Field::name).collect();
        assert_eq!(order, ["health", "name", "scores"]);
    }

    #[test]
    fn looks_up_by_name_and_index() {
        let info = StructSchema::new(
            "Player",
            vec![
                Field::new("health", Schema::Int),
                Field::new("name", Schema::String),
            ],
        );

        assert_eq!(info.field("name").map(Field::schema), Some(&Schema::String));
        assert_eq!(info.field_at(0).map(Field::name), Some("health"));
        assert_eq!(info.field_at(9), None);
        assert_eq!(info.index_of("health"), Some(0));
        assert_eq!(info.index_of("mana"), None);
    }
}
