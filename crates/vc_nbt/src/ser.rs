//! Provide [`Serialize`] for [`Tag`] and [`Compound`].
//!
//! This is a diagnostic surface: it lets a tree be dumped into an
//! interchange format (typically JSON) for inspection. There is no
//! `Deserialize` half; trees are produced by decoders, not parsed back from
//! text.

use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::{Compound, Tag};

// Helper macro for the sequence kinds, which all serialize element-wise.
macro_rules! serialize_seq {
    ($serializer:ident, $values:ident) => {{
        let mut seq = $serializer.serialize_seq(Some($values.len()))?;
        for value in $values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }};
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::End => serializer.serialize_unit(),
            Self::Byte(value) => serializer.serialize_i8(*value),
            Self::Short(value) => serializer.serialize_i16(*value),
            Self::Int(value) => serializer.serialize_i32(*value),
            Self::Long(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f32(*value),
            Self::Double(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::ByteArray(values) => serialize_seq!(serializer, values),
            Self::List(values) => serialize_seq!(serializer, values),
            Self::IntArray(values) => serialize_seq!(serializer, values),
            Self::LongArray(values) => serialize_seq!(serializer, values),
            Self::Compound(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, tag) in self.iter() {
            map.serialize_entry(key, tag)?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// Tests
