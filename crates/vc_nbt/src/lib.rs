#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    vc_cfg::define_alias! {
        #[cfg(feature = "serde")] => serde,
    }
}

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod compound;
mod kind;
mod tag;

crate::cfg::serde! { mod ser; }

// -----------------------------------------------------------------------------
// Exports

pub use compound::{Compound, LookupError};
pub use kind::{KindError, TagKind};
pub use tag::Tag;
