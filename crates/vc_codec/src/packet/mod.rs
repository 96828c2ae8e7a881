//! The compact stream encoding.
//!
//! Values become raw fields in a [`PacketBuf`](vc_packet::PacketBuf), in
//! schema declaration order, with no names and no per-field framing. The
//! only bytes beyond the data itself are nullable presence markers and
//! the kind discriminants of embedded tags. Both sides must agree on the
//! schema, there is nothing in the stream to resynchronize on.

mod decode;
mod encode;

pub use decode::PacketDecoder;
pub use encode::PacketEncoder;
