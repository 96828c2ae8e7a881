//! The self-describing tree encoding.
//!
//! Values become tags in a [`Compound`](vc_nbt::Compound) under composed
//! dotted keys. Every stored field is keyed, collection sizes and
//! presence markers included, so a decoder probes for what it knows and
//! skips the rest. This is the forward-compatible encoding of the two.

mod decode;
mod encode;

pub use decode::TagDecoder;
pub use encode::TagEncoder;
