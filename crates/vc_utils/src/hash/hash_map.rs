//! Provide [`HashMap`] based upon [`hashbrown`], with a fixed default state.

pub use hashbrown::hash_map::{Drain, Entry, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

use crate::hash::FixedHashState;

/// A [`hashbrown::HashMap`] defaulting to [`FixedHashState`].
///
/// Construct through [`Default`] or `with_capacity_and_hasher`; the plain
/// `new`/`with_capacity` constructors belong to the randomized std state and
/// are not available here.
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::default();
/// map.insert("health", 20);
///
/// assert_eq!(map.get("health"), Some(&20));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;
