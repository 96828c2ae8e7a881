/// An ergonomic abbreviation for [`Default::default()`].
///
/// Reads better in struct-update initializers and constructor bodies.
///
/// # Example
///
/// ```
/// use vc_utils::default;
///
/// #[derive(Default)]
/// struct Slot {
///   key: Option<&'static str>,
///   used: usize,
/// }
///
/// let slot = Slot {
///   used: 1,
///   ..default()
/// };
/// # assert!(slot.key.is_none());
/// ```
#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}
