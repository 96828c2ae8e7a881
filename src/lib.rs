#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_cfg as cfg;
pub use vc_codec as codec;
pub use vc_nbt as nbt;
pub use vc_packet as packet;
pub use vc_utils as utils;
