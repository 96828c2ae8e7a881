#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Emit macros
//
// `define_alias!` does not generate fresh `macro_rules!` bodies (that would
// need `$`-escaping); it re-exports one of these two fixed macros under the
// alias name, picked by the predicate.

/// Expansion half used when the aliased predicate holds.
///
/// Not called directly; [`define_alias!`] re-exports it under the alias name.
#[doc(hidden)]
#[macro_export]
macro_rules! __keep {
    (if { $($active:tt)* } else { $($inactive:tt)* }) => {{ $($active)* }};
    ($($tokens:tt)*) => { $($tokens)* };
}

/// Expansion half used when the aliased predicate does not hold.
///
/// Not called directly; [`define_alias!`] re-exports it under the alias name.
#[doc(hidden)]
#[macro_export]
macro_rules! __omit {
    (if { $($active:tt)* } else { $($inactive:tt)* }) => {{ $($inactive)* }};
    ($($tokens:tt)*) => {};
}

// -----------------------------------------------------------------------------
// define_alias

/// Define alias macros for `#[cfg(...)]` predicates.
///
/// Each `#[cfg(PRED)] => name` pair produces a macro `name!` that can be used
/// in two forms:
///
/// - **Item/statement form**: `name! { <tokens> }` keeps the tokens when
///   `PRED` holds and drops them otherwise.
/// - **Branch form**: `name! { if { <a> } else { <b> } }` expands to a block
///   containing `<a>` when `PRED` holds and `<b>` otherwise, and so can also
///   be used in expression position.
///
/// The conventional call site is a `cfg` module at the top of `lib.rs`, so
/// gated code reads as `crate::cfg::name! { ... }`.
///
/// # Examples
///
/// ```
/// mod cfg {
///     vc_cfg::define_alias! {
///         #[cfg(feature = "std")] => std,
///         #[cfg(debug_assertions)] => debug,
///     }
/// }
///
/// fn main() {
///     let has_std = cfg::std! { if { true } else { false } };
///     assert!(!has_std); // this example is built without the feature
/// }
/// ```
#[macro_export]
macro_rules! define_alias {
    ($( #[cfg($pred:meta)] => $alias:ident ),+ $(,)?) => {
        $(
            #[cfg($pred)]
            #[doc(hidden)]
            pub use $crate::__keep as $alias;

            #[cfg(not($pred))]
            #[doc(hidden)]
            pub use $crate::__omit as $alias;
        )+
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    mod cfg {
        crate::define_alias! {
            #[cfg(test)] => active,
            #[cfg(not(test))] => inactive,
        }
    }

    #[test]
    fn branch_form_picks_one_side() {
        let on = cfg::active! { if { 1 } else { 0 } };
        let off = cfg::inactive! { if { 1 } else { 0 } };
        assert_eq!((on, off), (1, 0));
    }

    #[test]
    fn plain_form_keeps_or_drops_items() {
        cfg::active! {
            fn present() -> u32 {
                7
            }
        }
        cfg::inactive! {
            fn present() -> u32 {
                8
            }
        }
        assert_eq!(present(), 7);
    }
}
