//! Provide [`HashSet`] based upon [`hashbrown`], with a fixed default state.

pub use hashbrown::hash_set::{Difference, Intersection, IntoIter, Iter, Union};

use crate::hash::FixedHashState;

/// A [`hashbrown::HashSet`] defaulting to [`FixedHashState`].
///
/// Construct through [`Default`], like [`HashMap`](crate::hash::HashMap).
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashSet;
///
/// let mut seen: HashSet<&str> = HashSet::default();
/// assert!(seen.insert("name"));
/// assert!(!seen.insert("name"));
/// ```
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;
