//! Zero-sized placement tags.
//!
//! These markers carry no data. Passing one to a constructor states which
//! construction path is meant, so that "build a `T` in place from these
//! arguments" can never be confused with "store this argument as-is".
//!
//! - [`InPlace`] / [`IN_PLACE`]: plain in-place construction.
//! - [`InPlaceType<T>`] / [`in_place_type`]: in-place construction of a `T`.
//! - [`InPlaceIndex<I>`] / [`in_place_index`]: in-place construction of the
//!   `I`-th alternative of some sum type.
//!
//! [`Any`](crate::Any) uses [`InPlaceType`] for its `in_place*` constructors.
//!
//! The tags are not `Clone`. Every value an
//! [`Any`](crate::Any) stores must be `Clone`, so a tag can select a
//! constructor but can never end up stored as a value. Each call site names
//! a fresh tag through [`IN_PLACE`], [`in_place_type`] or [`in_place_index`].
//!
//! # Examples
//!
//! ```
//! use anyhold::{Any, in_place::in_place_type};
//!
//! // Build a `Vec<u8>` directly inside the container rather than storing the
//! // array that was passed in.
//! let any = Any::in_place(in_place_type::<Vec<u8>>(), [1, 2, 3]);
//! assert_eq!(any.downcast_ref::<Vec<u8>>(), Ok(&vec![1, 2, 3]));
//! ```

use core::{fmt, hash::Hash, marker::PhantomData};

/// Tag selecting plain in-place construction.
#[allow(missing_copy_implementations)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct InPlace;

/// The single [`InPlace`] tag value.
pub const IN_PLACE: InPlace = InPlace;

/// Tag selecting in-place construction of a value of type `T`.
///
/// The tag is zero-sized regardless of `T`; it never owns or references a
/// `T`.
#[allow(missing_copy_implementations)]
pub struct InPlaceType<T: ?Sized>(PhantomData<fn() -> *const T>);

impl<T: ?Sized> InPlaceType<T> {
    /// Creates the tag for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

/// Returns the [`InPlaceType`] tag for `T`.
#[must_use]
pub const fn in_place_type<T: ?Sized>() -> InPlaceType<T> {
    InPlaceType::new()
}

// Manual impls so that none of them require bounds on `T`.
impl<T: ?Sized> Default for InPlaceType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> PartialEq for InPlaceType<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T: ?Sized> Eq for InPlaceType<T> {}

impl<T: ?Sized> Hash for InPlaceType<T> {
    fn hash<H: core::hash::Hasher>(&self, _state: &mut H) {}
}

impl<T: ?Sized> fmt::Debug for InPlaceType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InPlaceType<{}>", core::any::type_name::<T>())
    }
}

/// Tag selecting in-place construction of the alternative with index `I`.
#[allow(missing_copy_implementations)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct InPlaceIndex<const I: usize>;

impl<const I: usize> InPlaceIndex<I> {
    /// The index carried by this tag.
    pub const INDEX: usize = I;
}

/// Returns the [`InPlaceIndex`] tag for `I`.
#[must_use]
pub const fn in_place_index<const I: usize>() -> InPlaceIndex<I> {
    InPlaceIndex
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String};

    use super::*;

    /// A small sum type whose constructor is chosen by tag, the way the tags
    /// are meant to be used.
    #[derive(Debug, PartialEq)]
    enum Either {
        Left(u32),
        Right(String),
    }

    trait Construct<Tag, Args> {
        fn construct(tag: Tag, args: Args) -> Self;
    }

    impl Construct<InPlaceIndex<0>, u32> for Either {
        fn construct(_: InPlaceIndex<0>, args: u32) -> Self {
            Either::Left(args)
        }
    }

    impl<'a> Construct<InPlaceIndex<1>, &'a str> for Either {
        fn construct(_: InPlaceIndex<1>, args: &'a str) -> Self {
            Either::Right(String::from(args))
        }
    }

    impl Construct<InPlace, ()> for Either {
        fn construct(_: InPlace, (): ()) -> Self {
            Either::Left(0)
        }
    }

    #[test]
    fn test_tags_are_zero_sized() {
        assert_eq!(core::mem::size_of::<InPlace>(), 0);
        assert_eq!(core::mem::size_of::<InPlaceType<String>>(), 0);
        assert_eq!(core::mem::size_of::<InPlaceType<str>>(), 0);
        assert_eq!(core::mem::size_of::<InPlaceIndex<3>>(), 0);
    }

    #[test]
    fn test_tags_select_constructors() {
        assert_eq!(Either::construct(in_place_index::<0>(), 5), Either::Left(5));
        assert_eq!(
            Either::construct(in_place_index::<1>(), "right"),
            Either::Right(String::from("right"))
        );
        assert_eq!(Either::construct(IN_PLACE, ()), Either::Left(0));
    }

    #[test]
    fn test_tag_constants() {
        assert_eq!(InPlaceIndex::<7>::INDEX, 7);
        assert_eq!(in_place_type::<u8>(), InPlaceType::<u8>::default());
        assert_eq!(IN_PLACE, InPlace);
        assert_eq!(format!("{:?}", in_place_type::<u8>()), "InPlaceType<u8>");
    }

    #[test]
    fn test_tag_auto_traits() {
        // The `fn` pointer marker keeps the tag `Send + Sync` even for non-thread-safe `T`.
        static_assertions::assert_impl_all!(InPlaceType<alloc::rc::Rc<u8>>: Send, Sync, Default);
        static_assertions::assert_impl_all!(InPlace: Send, Sync, Default);
        static_assertions::assert_impl_all!(InPlaceIndex<0>: Send, Sync, Default);
    }

    #[test]
    fn test_tags_are_not_clone() {
        static_assertions::assert_not_impl_any!(InPlace: Clone);
        static_assertions::assert_not_impl_any!(InPlaceType<u8>: Clone);
        static_assertions::assert_not_impl_any!(InPlaceIndex<0>: Clone);
    }
}
