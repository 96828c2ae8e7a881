#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    vc_cfg::define_alias! {
        #[cfg(feature = "std")] => std,
    }
}

// -----------------------------------------------------------------------------
// no_std support

crate::cfg::std! {
    extern crate std;
}

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod path;
mod value;

pub mod packet;
pub mod registry;
pub mod schema;
pub mod store;
pub mod tree;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::CodecError;
pub use packet::{PacketDecoder, PacketEncoder};
pub use path::TagPath;
pub use registry::{TagIo, TagIoRegistry};
pub use schema::{EnumSchema, Field, Schema, SchemaKind, Schematic, StructSchema};
pub use tree::{TagDecoder, TagEncoder};
pub use value::Value;

crate::cfg::std! {
    pub use schema::SchemaCell;
}
