use crate::error::CodecError;
use crate::schema::Schema;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Schematic

/// Types that describe their own wire shape.
///
/// An implementation ties three things together: the [`Schema`] both
/// codecs consume, the conversion into a codec [`Value`], and the
/// conversion back. Implementations are written by hand, field order in
/// `to_value` and `from_value` must match the schema declaration order.
///
/// # Examples
///
/// ```rust
/// use vc_codec::{CodecError, Field, Schema, SchemaCell, Schematic, StructSchema, Value};
///
/// struct Health {
///     current: i32,
///     max: i32,
/// }
///
/// impl Schematic for Health {
///     fn schema() -> &'static Schema {
///         static SCHEMA: SchemaCell = SchemaCell::new();
///         SCHEMA.get_or_init(|| {
///             Schema::Struct(StructSchema::new("Health", vec![
///                 Field::new("current", Schema::Int),
///                 Field::new("max", Schema::Int),
///             ]))
///         })
///     }
///
///     fn to_value(&self) -> Value {
///         Value::Struct(vec![Value::Int(self.current), Value::Int(self.max)])
///     }
///
///     fn from_value(value: &Value) -> Result<Self, CodecError> {
///         if let Value::Struct(fields) = value {
///             if let [Value::Int(current), Value::Int(max)] = fields.as_slice() {
///                 return Ok(Self { current: *current, max: *max });
///             }
///         }
///         Err(CodecError::InvalidData {
///             path: String::new(),
///             detail: "malformed Health value".into(),
///         })
///     }
/// }
///
/// let health = Health { current: 15, max: 20 };
///
/// assert_eq!(Health::schema().name(), "Health");
/// assert_eq!(Health::from_value(&health.to_value()).unwrap().current, 15);
/// ```
pub trait Schematic {
    /// Returns the schema describing `Self`.
    fn schema() -> &'static Schema;

    /// Converts `self` into its codec value.
    fn to_value(&self) -> Value;

    /// Rebuilds `Self` from a decoded value.
    fn from_value(value: &Value) -> Result<Self, CodecError>
    where
        Self: Sized;
}

// -----------------------------------------------------------------------------
// SchemaCell

crate::cfg::std! {
    /// A lazily initialized static cell for [`Schema`] values.
    ///
    /// [`Schematic::schema`] returns a `&'static Schema`, so
    /// implementations build their schema once and keep it in a static.
    /// Initialization is race free, the first caller wins and every later
    /// call observes the same schema.
    pub struct SchemaCell {
        cell: std::sync::OnceLock<Schema>,
    }

    impl SchemaCell {
        /// Creates an empty cell.
        #[inline]
        pub const fn new() -> Self {
            Self {
                cell: std::sync::OnceLock::new(),
            }
        }

        /// Returns the stored schema, initializing it with `init` on first use.
        #[inline]
        pub fn get_or_init(&self, init: impl FnOnce() -> Schema) -> &Schema {
            self.cell.get_or_init(init)
        }
    }

    impl Default for SchemaCell {
        /// See [`SchemaCell::new`] .
        #[inline]
        fn default() -> Self {
            Self::new()
        }
    }
}

crate::cfg::std! {
}
