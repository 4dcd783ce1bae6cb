//! Free-function extraction from an [`Any`].
//!
//! Each function mirrors one of the `downcast_*` methods on [`Any`]. They read
//! well at call sites that already think in terms of "cast this container to
//! `T`":
//!
//! ```
//! use anyhold::{Any, any_cast, any_cast_mut, any_cast_ref, any_cast_take};
//!
//! let mut any = Any::new(String::from("abc"));
//!
//! let copy: String = any_cast(&any)?;
//! any_cast_mut::<String>(&mut any)?.make_ascii_uppercase();
//! assert_eq!(any_cast_ref::<String>(&any)?, "ABC");
//!
//! let moved: String = any_cast_take(&mut any)?;
//! assert_eq!((copy.as_str(), moved.as_str()), ("abc", "ABC"));
//! assert!(!any.has_value());
//! # Ok::<(), anyhold::BadAnyCast>(())
//! ```

use crate::{Any, BadAnyCast};

/// Returns a clone of the `T` held by `operand`.
///
/// # Errors
///
/// Returns [`BadAnyCast`] if `operand` is empty or holds another type.
pub fn any_cast<T: Clone + 'static>(operand: &Any) -> Result<T, BadAnyCast> {
    operand.downcast_cloned::<T>()
}

/// Returns a shared reference to the `T` held by `operand`.
///
/// # Errors
///
/// Returns [`BadAnyCast`] if `operand` is empty or holds another type.
pub fn any_cast_ref<T: 'static>(operand: &Any) -> Result<&T, BadAnyCast> {
    operand.downcast_ref::<T>()
}

/// Returns a mutable reference to the `T` held by `operand`.
///
/// # Errors
///
/// Returns [`BadAnyCast`] if `operand` is empty or holds another type.
pub fn any_cast_mut<T: 'static>(operand: &mut Any) -> Result<&mut T, BadAnyCast> {
    operand.downcast_mut::<T>()
}

/// Moves the `T` held by `operand` out, leaving `operand` empty.
///
/// # Errors
///
/// Returns [`BadAnyCast`] if `operand` is empty or holds another type. The
/// container is left untouched in that case.
pub fn any_cast_take<T: 'static>(operand: &mut Any) -> Result<T, BadAnyCast> {
    operand.downcast_take::<T>()
}

/// Returns a shared reference to the value held by `operand` as a `T`, without
/// checking its type.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `operand` holds a value, and that value is of type `T`.
#[must_use]
pub unsafe fn any_cast_unchecked<T: 'static>(operand: &Any) -> &T {
    // SAFETY: Guaranteed by the caller.
    unsafe { operand.downcast_ref_unchecked::<T>() }
}

/// Returns a mutable reference to the value held by `operand` as a `T`,
/// without checking its type.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `operand` holds a value, and that value is of type `T`.
#[must_use]
pub unsafe fn any_cast_unchecked_mut<T: 'static>(operand: &mut Any) -> &mut T {
    // SAFETY: Guaranteed by the caller.
    unsafe { operand.downcast_mut_unchecked::<T>() }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use super::*;

    #[test]
    fn test_every_access_mode_rejects_a_mismatch() {
        let mut any = Any::new(1_u32);

        assert!(any_cast::<i32>(&any).is_err());
        assert!(any_cast_ref::<i32>(&any).is_err());
        assert!(any_cast_mut::<i32>(&mut any).is_err());
        assert!(any_cast_take::<i32>(&mut any).is_err());

        // A failed take leaves the value in place.
        assert_eq!(any_cast_ref::<u32>(&any), Ok(&1));
    }

    #[test]
    fn test_every_access_mode_accepts_a_match() {
        let mut any = Any::new(vec![String::from("a")]);

        assert_eq!(any_cast::<Vec<String>>(&any).unwrap().len(), 1);
        any_cast_mut::<Vec<String>>(&mut any)
            .unwrap()
            .push(String::from("b"));
        assert_eq!(any_cast_ref::<Vec<String>>(&any).unwrap().len(), 2);
        assert_eq!(any_cast_take::<Vec<String>>(&mut any).unwrap().len(), 2);
        assert!(!any.has_value());
    }

    #[test]
    fn test_unchecked_access() {
        let mut any = Any::new(10_u64);

        // SAFETY: `any` holds a `u64`.
        unsafe {
            *any_cast_unchecked_mut::<u64>(&mut any) += 1;
        }
        // SAFETY: `any` holds a `u64`.
        let value = unsafe { any_cast_unchecked::<u64>(&any) };
        assert_eq!(*value, 11);
    }
}
