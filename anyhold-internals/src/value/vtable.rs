//! Vtable for type-erased value operations.
//!
//! This module contains the [`ValueVtable`] which lets an owner clone, drop
//! and identify a stored value after its concrete type `T` has been erased.
//! The vtable stores function pointers that dispatch to the correct typed
//! implementations.
//!
//! This module encapsulates the fields of [`ValueVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameter must match the actual value type
//! stored in the [`ValueData`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`ValueVtable::new`], which pairs the function pointers with
//! a specific type `T` at compile time.
//!
//! # Clone contract
//!
//! The clone entry allocates its own storage and returns a fresh
//! [`RawValue`]. Callers never hand it a destination buffer.

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{
    util::Erased,
    value::{
        data::ValueData,
        raw::{RawValue, RawValueRef},
    },
};

/// Vtable for type-erased value operations.
///
/// Contains function pointers for performing operations on stored values
/// without knowing their concrete type at compile time.
///
/// # Safety Invariant
///
/// The fields `clone` and `drop` are guaranteed to point to the functions
/// defined below instantiated with the value type `T` that was used to create
/// this [`ValueVtable`].
pub(crate) struct ValueVtable {
    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`ValueVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`ValueVtable`].
    type_name: fn() -> &'static str,
    /// Clones the value into a new allocation.
    clone: unsafe fn(RawValueRef<'_>) -> RawValue,
    /// Drops the [`Box<ValueData<T>>`] instance pointed to by this pointer.
    drop: unsafe fn(NonNull<ValueData<Erased>>),
}

impl ValueVtable {
    /// Creates a new [`ValueVtable`] for the value type `T`.
    pub(super) const fn new<T: Clone + 'static>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<T>,
                type_name: core::any::type_name::<T>,
                clone: clone::<T>,
                drop: drop::<T>,
            }
        }
    }

    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`ValueVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`ValueVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Clones the value referenced by `ptr` into a newly allocated
    /// [`RawValue`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`ValueVtable`] must be a vtable for the value type stored in
    ///    the [`RawValueRef`].
    #[inline]
    pub(super) unsafe fn clone_value(&self, ptr: RawValueRef<'_>) -> RawValue {
        // SAFETY: We know that `self.clone` points to the function `clone::<T>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.clone)(ptr) }
    }

    /// Drops the `Box<ValueData<T>>` instance pointed to by this pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from [`Box<ValueData<T>>`] via [`Box::into_raw`]
    /// 2. This [`ValueVtable`] must be a vtable for the value type stored in
    ///    the [`ValueData`].
    /// 3. This method drops the [`Box<ValueData<T>>`], so the caller must
    ///    ensure that the pointer has not previously been dropped, that it is
    ///    able to transfer ownership of the pointer, and that it will not use
    ///    the pointer after calling this method.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<ValueData<Erased>>) {
        // SAFETY: We know that `self.drop` points to the function `drop::<T>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.drop)(ptr);
        }
    }
}

/// Clones the stored value into a newly allocated [`RawValue`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the [`ValueData`]
unsafe fn clone<T: Clone + 'static>(ptr: RawValueRef<'_>) -> RawValue {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &T = unsafe { ptr.value_downcast_unchecked::<T>() };
    RawValue::new::<T>(value.clone())
}

/// Drops the [`Box<ValueData<T>>`] instance pointed to by this pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from [`Box<ValueData<T>>`] via [`Box::into_raw`]
/// 2. The value type `T` matches the actual value type stored in the
///    [`ValueData`]
/// 3. This method drops the [`Box<ValueData<T>>`], so the caller must ensure
///    that the pointer has not previously been dropped, that it is able to
///    transfer ownership of the pointer, and that it will not use the pointer
///    after calling this method.
unsafe fn drop<T: 'static>(ptr: NonNull<ValueData<Erased>>) {
    let ptr: NonNull<ValueData<T>> = ptr.cast();
    let ptr = ptr.as_ptr();
    // SAFETY: Our pointer has the correct type as guaranteed by the caller, and
    // it came from a call to `Box::into_raw` as also guaranteed by our caller.
    let boxed = unsafe { Box::from_raw(ptr) };
    core::mem::drop(boxed);
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn test_value_vtable_eq() {
        let vtable1 = ValueVtable::new::<i32>();
        let vtable2 = ValueVtable::new::<i32>();

        // Both should be the exact same static instance
        assert!(core::ptr::eq(vtable1, vtable2));
        assert!(!core::ptr::eq(vtable1, ValueVtable::new::<u32>()));
    }

    #[test]
    fn test_value_type_id_and_name() {
        let vtable = ValueVtable::new::<i32>();
        assert_eq!(vtable.type_id(), TypeId::of::<i32>());
        assert_eq!(vtable.type_name(), "i32");

        let vtable = ValueVtable::new::<String>();
        assert_eq!(vtable.type_id(), TypeId::of::<String>());
        assert_eq!(vtable.type_name(), core::any::type_name::<String>());
    }
}
