//! This module encapsulates the fields of the [`ValueData`]. Since this is the
//! only place they are visible, the [`ValueVtable`] is guaranteed to always
//! be in sync with the type of the stored value. They are in sync when
//! created, and the API offers no way to change either the [`ValueVtable`] or
//! the value type afterwards.

use alloc::boxed::Box;
use core::mem::MaybeUninit;

use crate::value::{
    raw::{RawValueMut, RawValueRef},
    vtable::ValueVtable,
};

/// Type-erased value storage with vtable-based dispatch.
///
/// This struct uses `#[repr(C)]` to enable safe field access in type-erased
/// contexts, allowing access to the vtable field even when the concrete
/// value type `T` is unknown.
#[repr(C)]
pub(super) struct ValueData<T: 'static> {
    /// The vtable generated for `T`
    vtable: &'static ValueVtable,
    /// The stored value
    value: T,
}

impl<T: Clone + 'static> ValueData<T> {
    /// Creates a new [`ValueData`] wrapping `value`.
    ///
    /// This pairs the value with the vtable generated for `T`.
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Self {
            vtable: ValueVtable::new::<T>(),
            value,
        }
    }

    /// Allocates a [`ValueData`] and writes the result of `init` straight into
    /// the allocation.
    ///
    /// If `init` panics the allocation is released without running any
    /// destructor for `T`.
    pub(super) fn new_boxed_with<F>(init: F) -> Box<Self>
    where
        F: FnOnce() -> T,
    {
        let mut uninit: Box<MaybeUninit<Self>> = Box::new_uninit();
        let ptr: *mut Self = uninit.as_mut_ptr();

        // SAFETY: `ptr` points into a live allocation sized and aligned for
        // `Self`. Taking a raw field pointer does not create a reference to the
        // uninitialized memory.
        let vtable_ptr: *mut &'static ValueVtable = unsafe { &raw mut (*ptr).vtable };
        // SAFETY: Same as above.
        let value_ptr: *mut T = unsafe { &raw mut (*ptr).value };

        // SAFETY: `vtable_ptr` is valid for writes and properly aligned.
        unsafe {
            vtable_ptr.write(ValueVtable::new::<T>());
        }
        // SAFETY: `value_ptr` is valid for writes and properly aligned.
        unsafe {
            value_ptr.write(init());
        }

        // SAFETY: Both fields were written above, so the whole struct is
        // initialized.
        unsafe { uninit.assume_init() }
    }
}

impl<T: 'static> ValueData<T> {
    /// Consumes the [`ValueData`] and returns the stored value.
    #[inline]
    pub(super) fn into_value(self) -> T {
        self.value
    }
}

impl<'a> RawValueRef<'a> {
    /// Returns a reference to the [`ValueVtable`] of the [`ValueData`]
    /// instance.
    #[inline]
    pub(super) fn vtable(self) -> &'static ValueVtable {
        let ptr = self.as_ptr();
        // SAFETY: We don't know the actual stored type, but we do know that the
        // pointer refers to an instance of `ValueData<T>` for some specific `T`.
        // Since `ValueData<T>` is `#[repr(C)]`, it is safe to create pointers to
        // the fields before the actual value.
        //
        // We must not create a reference to the `ValueData` itself though, as
        // that would still be undefined behavior since we don't have the right
        // type.
        let vtable_ptr: *const &'static ValueVtable = unsafe { &raw const (*ptr).vtable };

        // SAFETY: Dereferencing the pointer and reading out the `&'static
        // ValueVtable` is valid for the same reasons
        unsafe { *vtable_ptr }
    }

    /// Accesses the stored value as a reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `T` matches the actual value type
    /// stored in the [`ValueData`].
    #[inline]
    pub unsafe fn value_downcast_unchecked<T: 'static>(self) -> &'a T {
        // SAFETY: The inner function requires that `T` matches the type stored,
        // which is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<T>() };
        &this.value
    }
}

impl<'a> RawValueMut<'a> {
    /// Accesses the stored value as a mutable reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `T` matches the actual value type
    /// stored in the [`ValueData`].
    #[inline]
    pub unsafe fn value_downcast_unchecked<T: 'static>(self) -> &'a mut T {
        // SAFETY: The inner function requires that `T` matches the type stored,
        // which is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<T>() };
        &mut this.value
    }
}
