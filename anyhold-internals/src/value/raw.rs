//! Type-erased value pointer types.
//!
//! This module encapsulates the `ptr` field of [`RawValue`], [`RawValueRef`]
//! and [`RawValueMut`], ensuring it is only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the pointer always
//! comes from `Box<ValueData<T>>`**.
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set by the constructors on [`RawValue`]
//! (which create it from `Box::into_raw`), and cannot be modified afterward,
//! the pointer provenance remains valid throughout the value's lifetime.
//!
//! The [`RawValue::drop`] implementation relies on this invariant to safely
//! reconstruct the `Box` and deallocate the memory.
//!
//! # Type Erasure
//!
//! The concrete type parameter `T` is erased by casting to
//! `ValueData<Erased>`. The vtable stored within the `ValueData` provides the
//! runtime type information needed to clone, drop and downcast the value.

use alloc::boxed::Box;
use core::{any::TypeId, marker::PhantomData, mem::ManuallyDrop, ptr::NonNull};

use crate::{util::Erased, value::data::ValueData};

/// A pointer to a [`ValueData`] that is guaranteed to point to an initialized
/// instance of a [`ValueData<T>`] for some specific `T`, though we do not know
/// which actual `T` it is.
///
/// However, the pointer is allowed to transition into a non-initialized state
/// inside the [`RawValue::drop`] method.
///
/// The pointer is guaranteed to have been created using [`Box::into_raw`].
///
/// We cannot use a [`Box<ValueData<T>>`] directly, because that does not allow
/// us to type-erase the `T`.
#[repr(transparent)]
pub struct RawValue {
    /// Pointer to the inner value data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<ValueData<T>>` for
    ///    some `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `ValueData<T>` for the entire
    ///    lifetime of this object.
    /// 3. The pointee is properly initialized for the entire lifetime of this
    ///    object, except during the execution of the `Drop` implementation.
    ptr: NonNull<ValueData<Erased>>,
}

impl RawValue {
    /// Creates a new [`RawValue`] storing `value`.
    ///
    /// The value is moved into a fresh heap allocation together with the
    /// vtable generated for `T`.
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + 'static,
    {
        Self::from_box(Box::new(ValueData::new(value)))
    }

    /// Creates a new [`RawValue`] by allocating first and then writing the
    /// result of `init` into the allocation.
    ///
    /// If `init` panics, the allocation is released and nothing is dropped.
    #[inline]
    pub fn new_with<T, F>(init: F) -> Self
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        Self::from_box(ValueData::new_boxed_with(init))
    }

    /// Erases the type of a boxed [`ValueData<T>`].
    #[inline]
    fn from_box<T: 'static>(boxed: Box<ValueData<T>>) -> Self {
        let ptr: *mut ValueData<T> = Box::into_raw(boxed);
        let ptr: *mut ValueData<Erased> = ptr.cast::<ValueData<Erased>>();

        // SAFETY: `Box::into_raw` returns a non-null pointer
        let ptr: NonNull<ValueData<Erased>> = unsafe { NonNull::new_unchecked(ptr) };

        Self { ptr }
    }

    /// Returns a shared reference to the [`ValueData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawValueRef<'_> {
        RawValueRef {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Returns an exclusive reference to the [`ValueData`] instance.
    #[inline]
    pub fn as_mut(&mut self) -> RawValueMut<'_> {
        RawValueMut {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Consumes the [`RawValue`] and moves the stored value out of it,
    /// releasing the allocation.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`ValueData`].
    pub unsafe fn into_value_unchecked<T: 'static>(self) -> T {
        debug_assert_eq!(self.as_ref().type_id(), TypeId::of::<T>());

        let this = ManuallyDrop::new(self);
        let ptr: *mut ValueData<T> = this.ptr.cast::<ValueData<T>>().as_ptr();

        // SAFETY:
        // - The pointer comes from `Box::into_raw` (invariant 1 of `RawValue`)
        // - The type `T` matches the stored type (guaranteed by the caller)
        // - `this` is never dropped, so ownership moves to the new `Box` exactly
        //   once
        let boxed: Box<ValueData<T>> = unsafe { Box::from_raw(ptr) };
        (*boxed).into_value()
    }
}

impl Clone for RawValue {
    /// Clones the stored value into a new, independent allocation.
    #[inline]
    fn clone(&self) -> Self {
        let this = self.as_ref();
        let vtable = this.vtable();

        // SAFETY:
        // 1. The vtable returned by `this.vtable()` is guaranteed to match the data
        //    in the `ValueData`.
        unsafe { vtable.clone_value(this) }
    }
}

impl core::ops::Drop for RawValue {
    #[inline]
    fn drop(&mut self) {
        let vtable = self.as_ref().vtable();

        // SAFETY:
        // 1. The pointer comes from `Box::into_raw` (guaranteed by the constructors
        //    of `RawValue`)
        // 2. The vtable returned by `self.as_ref().vtable()` is guaranteed to match
        //    the data in the `ValueData`.
        // 3. The pointer is initialized and has not been previously freed as
        //    guaranteed by the invariants on this type. We are correctly
        //    transferring ownership here and the pointer is not used afterwards, as
        //    we are in the drop function.
        unsafe {
            vtable.drop(self.ptr);
        }
    }
}

/// A lifetime-bound pointer to a [`ValueData`] that is guaranteed to point to
/// an initialized instance of a [`ValueData<T>`] for some specific `T`, though
/// we do not know which actual `T` it is.
///
/// We cannot use a [`&'a ValueData<T>`] directly, because that would require
/// us to know the actual type of the value, which we do not.
///
/// [`&'a ValueData<T>`]: ValueData
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct RawValueRef<'a> {
    /// Pointer to the inner value data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<ValueData<T>>` for
    ///    some `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `ValueData<T>` for the entire
    ///    lifetime of this object.
    ptr: NonNull<ValueData<Erased>>,

    /// Marker to tell the compiler that we should behave the same as a
    /// `&'a ValueData<Erased>`
    _marker: PhantomData<&'a ValueData<Erased>>,
}

impl<'a> RawValueRef<'a> {
    /// Casts the [`RawValueRef`] to a [`ValueData<T>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`ValueData`].
    #[inline]
    pub(super) unsafe fn cast_inner<T: 'static>(self) -> &'a ValueData<T> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.vtable().type_id(), TypeId::of::<T>());

        let this = self.ptr.cast::<ValueData<T>>();
        // SAFETY: Converting the NonNull pointer to a reference is sound because:
        // - The pointer is non-null, properly aligned, and dereferenceable
        //   (guaranteed by RawValueRef's type invariants)
        // - The pointee is properly initialized
        // - The type `T` matches the actual value type (guaranteed by caller)
        // - Shared access is allowed
        // - The reference lifetime 'a is valid (tied to RawValueRef<'a>'s lifetime)
        unsafe { this.as_ref() }
    }

    /// Returns a raw pointer to the [`ValueData`] instance.
    #[inline]
    pub(super) fn as_ptr(self) -> *const ValueData<Erased> {
        self.ptr.as_ptr()
    }

    /// Returns the [`TypeId`] of the stored value.
    #[inline]
    pub fn type_id(self) -> TypeId {
        self.vtable().type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored value.
    #[inline]
    pub fn type_name(self) -> &'static str {
        self.vtable().type_name()
    }
}

/// A lifetime-bound exclusive pointer to a [`ValueData`] that is guaranteed to
/// point to an initialized instance of a [`ValueData<T>`] for some specific
/// `T`, though we do not know which actual `T` it is.
///
/// We cannot use a [`&'a mut ValueData<T>`] directly, because that would
/// require us to know the actual type of the value, which we do not.
///
/// [`&'a mut ValueData<T>`]: ValueData
#[repr(transparent)]
pub struct RawValueMut<'a> {
    /// Pointer to the inner value data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<ValueData<T>>` for
    ///    some `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `ValueData<T>` for the entire
    ///    lifetime of this object.
    /// 3. No other reference to the same `ValueData` is live while this
    ///    object exists.
    ptr: NonNull<ValueData<Erased>>,

    /// Marker to tell the compiler that we should behave the same as a
    /// `&'a mut ValueData<Erased>`
    _marker: PhantomData<&'a mut ValueData<Erased>>,
}

impl<'a> RawValueMut<'a> {
    /// Casts the [`RawValueMut`] to a mutable [`ValueData<T>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`ValueData`].
    #[inline]
    pub(super) unsafe fn cast_inner<T: 'static>(self) -> &'a mut ValueData<T> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.as_ref().type_id(), TypeId::of::<T>());

        let mut this = self.ptr.cast::<ValueData<T>>();
        // SAFETY: Converting the NonNull pointer to a mutable reference is sound
        // because:
        // - The pointer is non-null, properly aligned, and dereferenceable
        //   (guaranteed by RawValueMut's type invariants)
        // - The pointee is properly initialized
        // - The type `T` matches the actual value type (guaranteed by caller)
        // - Access is exclusive for 'a (invariant 3)
        unsafe { this.as_mut() }
    }

    /// Returns a shared reference with a shorter lifetime.
    #[inline]
    pub fn as_ref(&self) -> RawValueRef<'_> {
        RawValueRef {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Reborrows the [`RawValueMut`] with a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> RawValueMut<'_> {
        RawValueMut {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Converts the exclusive reference into a shared one with the same
    /// lifetime.
    #[inline]
    pub fn into_ref(self) -> RawValueRef<'a> {
        RawValueRef {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Returns the [`TypeId`] of the stored value.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.as_ref().type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.as_ref().type_name()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, string::String, vec, vec::Vec};
    use core::cell::Cell;

    use super::*;

    #[test]
    fn test_raw_value_size() {
        assert_eq!(
            core::mem::size_of::<RawValue>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<Option<RawValue>>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<Result<String, RawValue>>(),
            core::mem::size_of::<String>()
        );

        assert_eq!(
            core::mem::size_of::<RawValueRef<'_>>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<Option<RawValueMut<'_>>>(),
            core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_raw_value_get_refs() {
        let value = RawValue::new::<i32>(100);
        let value_ref = value.as_ref();

        let ptr1 = value_ref.as_ptr();
        let ptr2 = value_ref.as_ptr();
        assert_eq!(ptr1, ptr2);
    }

    #[test]
    fn test_raw_value_type_ids() {
        let int_value = RawValue::new::<i32>(42);
        let string_value = RawValue::new::<String>(String::from("test"));

        assert_eq!(int_value.as_ref().type_id(), TypeId::of::<i32>());
        assert_eq!(string_value.as_ref().type_id(), TypeId::of::<String>());
        assert!(!core::ptr::eq(
            int_value.as_ref().vtable(),
            string_value.as_ref().vtable()
        ));
    }

    #[test]
    fn test_raw_value_clone_is_independent() {
        let mut original = RawValue::new::<Vec<u8>>(vec![1, 2, 3]);
        let copy = original.clone();

        assert_ne!(original.as_ref().as_ptr(), copy.as_ref().as_ptr());

        // SAFETY: The stored type is `Vec<u8>`.
        let values = unsafe { original.as_mut().value_downcast_unchecked::<Vec<u8>>() };
        values.push(4);

        // SAFETY: The stored type is `Vec<u8>`.
        let copied = unsafe { copy.as_ref().value_downcast_unchecked::<Vec<u8>>() };
        assert_eq!(copied, &[1, 2, 3]);
    }

    #[test]
    fn test_raw_value_into_value() {
        let value = RawValue::new::<String>(String::from("moved"));
        // SAFETY: The stored type is `String`.
        let inner = unsafe { value.into_value_unchecked::<String>() };
        assert_eq!(inner, "moved");
    }

    #[test]
    fn test_raw_value_drops_once() {
        #[derive(Clone)]
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let value = RawValue::new(Counted(drops.clone()));
        let copy = value.clone();
        core::mem::drop(value);
        assert_eq!(drops.get(), 1);
        core::mem::drop(copy);
        assert_eq!(drops.get(), 2);

        // Moving out must not run the destructor of the moved value.
        let value = RawValue::new(Counted(drops.clone()));
        // SAFETY: The stored type is `Counted`.
        let inner = unsafe { value.into_value_unchecked::<Counted>() };
        assert_eq!(drops.get(), 2);
        core::mem::drop(inner);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn test_raw_value_mut_reborrow() {
        let mut value = RawValue::new::<u64>(1);
        let mut value_mut = value.as_mut();
        {
            // SAFETY: The stored type is `u64`.
            let inner = unsafe { value_mut.reborrow().value_downcast_unchecked::<u64>() };
            *inner += 41;
        }
        assert_eq!(value_mut.type_id(), TypeId::of::<u64>());
        // SAFETY: The stored type is `u64`.
        let inner = unsafe { value_mut.into_ref().value_downcast_unchecked::<u64>() };
        assert_eq!(*inner, 42);
    }

    #[test]
    fn test_send_sync() {
        static_assertions::assert_not_impl_any!(RawValue: Send, Sync);
        static_assertions::assert_not_impl_any!(RawValueRef<'_>: Send, Sync);
        static_assertions::assert_not_impl_any!(RawValueMut<'_>: Send, Sync);
    }
}
