//! Marker types used in the public API.

/// The type reported by an empty [`Any`](crate::Any).
///
/// `NoType` is uninhabited, so no value of it can ever be stored. That makes
/// `TypeId::of::<NoType>()` a safe sentinel: [`Any::type_id`] returns it
/// exactly when [`Any::has_value`] is `false`.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
///
/// use anyhold::{Any, markers::NoType};
///
/// let empty = Any::empty();
/// assert_eq!(empty.type_id(), TypeId::of::<NoType>());
///
/// // `()` is a perfectly good value and is not confused with "nothing".
/// let unit = Any::new(());
/// assert_ne!(unit.type_id(), TypeId::of::<NoType>());
/// ```
///
/// [`Any::type_id`]: crate::Any::type_id
/// [`Any::has_value`]: crate::Any::has_value
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum NoType {}
