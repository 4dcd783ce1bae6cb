use core::{any::TypeId, fmt};

use anyhold_internals::RawValue;

use crate::{BadAnyCast, in_place::InPlaceType, markers::NoType};

/// A container for zero or one value of any `Clone + 'static` type.
///
/// The value lives in a single heap allocation next to a vtable generated for
/// its concrete type. [`Any`] itself is one pointer wide; an empty container
/// does not allocate.
///
/// Cloning an [`Any`] clones the held value into a new, independent
/// allocation. Moving an [`Any`] moves ownership of the allocation without
/// touching the value.
///
/// # Thread safety
///
/// The held type is unconstrained, so [`Any`] is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```
/// use anyhold::Any;
///
/// let mut a = Any::new(String::from("hello"));
/// let b = a.clone();
///
/// a.downcast_mut::<String>().unwrap().push_str(", world");
///
/// assert_eq!(a.downcast_ref::<String>().unwrap(), "hello, world");
/// assert_eq!(b.downcast_ref::<String>().unwrap(), "hello");
/// ```
pub struct Any {
    /// The stored value, or `None` when empty.
    raw: Option<RawValue>,
}

impl Any {
    /// Creates an empty container.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::Any;
    ///
    /// let any = Any::empty();
    /// assert!(!any.has_value());
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Self { raw: None }
    }

    /// Creates a container holding `value`.
    ///
    /// Passing another [`Any`] returns that container unchanged instead of
    /// nesting it, so `Any::new(other)` is a move and
    /// `Any::new(other.clone())` a copy. A nested container can still be
    /// built explicitly with [`Any::in_place_with`].
    ///
    /// The placement tags in [`in_place`](crate::in_place) are not `Clone`
    /// and can never be stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::Any;
    ///
    /// let any = Any::new(42_i32);
    /// assert_eq!(any.downcast_ref::<i32>(), Ok(&42));
    ///
    /// let same = Any::new(any.clone());
    /// assert_eq!(same.downcast_ref::<i32>(), Ok(&42));
    /// ```
    ///
    /// ```compile_fail
    /// use anyhold::{Any, in_place::in_place_type};
    ///
    /// let any = Any::new(in_place_type::<String>());
    /// ```
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + 'static,
    {
        let mut slot = Some(value);
        let erased: &mut dyn core::any::Any = &mut slot;
        if let Some(container) = erased.downcast_mut::<Option<Self>>() {
            return container.take().unwrap_or_default();
        }

        Self {
            raw: slot.map(RawValue::new),
        }
    }

    /// Creates a container holding a `T` converted from `args`.
    ///
    /// The conversion runs after the storage has been allocated and its
    /// result is written straight into it.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::{Any, in_place::in_place_type};
    ///
    /// let any = Any::in_place(in_place_type::<String>(), "text");
    /// assert_eq!(any.downcast_ref::<String>().unwrap(), "text");
    /// ```
    #[must_use]
    pub fn in_place<T, A>(tag: InPlaceType<T>, args: A) -> Self
    where
        T: Clone + From<A> + 'static,
    {
        Self::in_place_with(tag, || T::from(args))
    }

    /// Creates a container holding the `T` returned by `init`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use anyhold::{Any, in_place::in_place_type};
    ///
    /// let any = Any::in_place_with(in_place_type::<HashMap<u8, u8>>(), || {
    ///     HashMap::with_capacity(16)
    /// });
    /// assert!(any.is::<HashMap<u8, u8>>());
    /// ```
    #[must_use]
    pub fn in_place_with<T, F>(_tag: InPlaceType<T>, init: F) -> Self
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        Self {
            raw: Some(RawValue::new_with(init)),
        }
    }

    /// Creates a container holding a `T` collected from `items`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    ///
    /// use anyhold::{Any, in_place::in_place_type};
    ///
    /// let any = Any::in_place_from_iter(in_place_type::<BTreeSet<u8>>(), [3, 1, 2, 1]);
    /// assert_eq!(any.downcast_ref::<BTreeSet<u8>>().unwrap().len(), 3);
    /// ```
    #[must_use]
    pub fn in_place_from_iter<T, I>(tag: InPlaceType<T>, items: I) -> Self
    where
        T: Clone + FromIterator<I::Item> + 'static,
        I: IntoIterator,
    {
        Self::in_place_with(tag, || items.into_iter().collect())
    }

    /// Replaces the held value with `value`.
    ///
    /// The new value is stored in a fresh container first and then swapped in,
    /// so the previous value is dropped exactly once, after the new one is in
    /// place. Passing another [`Any`] takes over its contents, as with
    /// [`Any::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::Any;
    ///
    /// let mut any = Any::new(1_u8);
    /// any.set("now a str");
    /// assert_eq!(any.downcast_ref::<&str>(), Ok(&"now a str"));
    /// ```
    pub fn set<T>(&mut self, value: T)
    where
        T: Clone + 'static,
    {
        let mut next = Self::new(value);
        self.swap(&mut next);
    }

    /// Moves the held value out into a new container, leaving `self` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::Any;
    ///
    /// let mut a = Any::new(5_u32);
    /// let b = a.take();
    /// assert!(!a.has_value());
    /// assert_eq!(b.downcast_ref::<u32>(), Ok(&5));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Drops the held value, then stores a `T` converted from `args` and
    /// returns a mutable reference to it.
    ///
    /// If the conversion panics the container is left empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::Any;
    ///
    /// let mut any = Any::new(1.5_f32);
    /// let name: &mut String = any.emplace("ab");
    /// name.push('c');
    /// assert_eq!(any.downcast_ref::<String>().unwrap(), "abc");
    /// ```
    pub fn emplace<T, A>(&mut self, args: A) -> &mut T
    where
        T: Clone + From<A> + 'static,
    {
        self.emplace_with(|| T::from(args))
    }

    /// Drops the held value, then stores the `T` returned by `init` and
    /// returns a mutable reference to it.
    ///
    /// If `init` panics the container is left empty.
    pub fn emplace_with<T, F>(&mut self, init: F) -> &mut T
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        self.reset();
        trace_event!(type_name = core::any::type_name::<T>(), "emplace");

        let raw = self.raw.insert(RawValue::new_with(init));
        // SAFETY: The value was stored as a `T` on the line above.
        unsafe { raw.as_mut().value_downcast_unchecked::<T>() }
    }

    /// Drops the held value, then stores a `T` collected from `items` and
    /// returns a mutable reference to it.
    ///
    /// If collecting panics the container is left empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::Any;
    ///
    /// let mut any = Any::empty();
    /// let v: &mut Vec<char> = any.emplace_from_iter("abc".chars());
    /// v.reverse();
    /// assert_eq!(any.downcast_ref::<Vec<char>>().unwrap(), &['c', 'b', 'a']);
    /// ```
    pub fn emplace_from_iter<T, I>(&mut self, items: I) -> &mut T
    where
        T: Clone + FromIterator<I::Item> + 'static,
        I: IntoIterator,
    {
        self.emplace_with(|| items.into_iter().collect())
    }

    /// Drops the held value, if any, leaving the container empty.
    pub fn reset(&mut self) {
        if let Some(raw) = self.raw.take() {
            trace_event!(type_name = raw.as_ref().type_name(), "reset");
            drop(raw);
        }
    }

    /// Exchanges the contents of two containers.
    ///
    /// Only the internal pointers move; no value is cloned or dropped.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Returns `true` if a value is held.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.raw.is_some()
    }

    /// Returns the [`TypeId`] of the held value, or of [`NoType`] when empty.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        match &self.raw {
            Some(raw) => raw.as_ref().type_id(),
            None => TypeId::of::<NoType>(),
        }
    }

    /// Returns the [`core::any::type_name`] of the held value, or of
    /// [`NoType`] when empty.
    ///
    /// The exact string is not guaranteed to be stable and should only be
    /// used for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match &self.raw {
            Some(raw) => raw.as_ref().type_name(),
            None => core::any::type_name::<NoType>(),
        }
    }

    /// Returns `true` if a value of type `T` is held.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::{Any, markers::NoType};
    ///
    /// let any = Any::new(0_i64);
    /// assert!(any.is::<i64>());
    /// assert!(!any.is::<u64>());
    /// assert!(!Any::empty().is::<NoType>());
    /// ```
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.raw
            .as_ref()
            .is_some_and(|raw| raw.as_ref().type_id() == TypeId::of::<T>())
    }

    /// Returns a shared reference to the held `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    pub fn downcast_ref<T: 'static>(&self) -> Result<&T, BadAnyCast> {
        if !self.is::<T>() {
            return Err(self.bad_cast::<T>());
        }

        // SAFETY: `self.is::<T>()` confirmed a `T` is held.
        Ok(unsafe { self.downcast_ref_unchecked::<T>() })
    }

    /// Returns a mutable reference to the held `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    pub fn downcast_mut<T: 'static>(&mut self) -> Result<&mut T, BadAnyCast> {
        if !self.is::<T>() {
            return Err(self.bad_cast::<T>());
        }

        // SAFETY: `self.is::<T>()` confirmed a `T` is held.
        Ok(unsafe { self.downcast_mut_unchecked::<T>() })
    }

    /// Returns a clone of the held `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    pub fn downcast_cloned<T: Clone + 'static>(&self) -> Result<T, BadAnyCast> {
        self.downcast_ref::<T>().cloned()
    }

    /// Moves the held `T` out, leaving the container empty.
    ///
    /// On failure the container is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BadAnyCast`] if the container is empty or holds another type.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyhold::Any;
    ///
    /// let mut any = Any::new(vec![1, 2]);
    /// assert!(any.downcast_take::<String>().is_err());
    /// assert_eq!(any.downcast_take::<Vec<i32>>(), Ok(vec![1, 2]));
    /// assert!(!any.has_value());
    /// ```
    pub fn downcast_take<T: 'static>(&mut self) -> Result<T, BadAnyCast> {
        let Some(raw) = self
            .raw
            .take_if(|raw| RawValue::as_ref(raw).type_id() == TypeId::of::<T>())
        else {
            return Err(self.bad_cast::<T>());
        };

        // SAFETY: The value was only taken because its type id is `T`'s.
        Ok(unsafe { raw.into_value_unchecked::<T>() })
    }

    /// Consumes the container and returns the held `T`.
    ///
    /// # Errors
    ///
    /// Returns the container unchanged if it is empty or holds another type.
    pub fn into_inner<T: 'static>(mut self) -> Result<T, Self> {
        match self.downcast_take::<T>() {
            Ok(value) => Ok(value),
            Err(_) => Err(self),
        }
    }

    /// Returns a shared reference to the held value as a `T` without checking
    /// its type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The container holds a value, and that value is of type `T`.
    #[must_use]
    pub unsafe fn downcast_ref_unchecked<T: 'static>(&self) -> &T {
        debug_assert!(self.is::<T>());

        // SAFETY: The caller guarantees that a value is held.
        let raw = unsafe { self.raw.as_ref().unwrap_unchecked() };
        // SAFETY: The caller guarantees that the held value is a `T`.
        unsafe { raw.as_ref().value_downcast_unchecked::<T>() }
    }

    /// Returns a mutable reference to the held value as a `T` without checking
    /// its type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The container holds a value, and that value is of type `T`.
    #[must_use]
    pub unsafe fn downcast_mut_unchecked<T: 'static>(&mut self) -> &mut T {
        debug_assert!(self.is::<T>());

        // SAFETY: The caller guarantees that a value is held.
        let raw = unsafe { self.raw.as_mut().unwrap_unchecked() };
        // SAFETY: The caller guarantees that the held value is a `T`.
        unsafe { raw.as_mut().value_downcast_unchecked::<T>() }
    }

    /// Builds the error for a failed request of `T`.
    fn bad_cast<T: 'static>(&self) -> BadAnyCast {
        BadAnyCast::new::<T>(self.type_name())
    }
}

impl Default for Any {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for Any {
    fn clone(&self) -> Self {
        trace_event!(type_name = self.type_name(), "clone");
        Self {
            raw: self.raw.clone(),
        }
    }

    /// Replaces the contents of `self` with a clone of `source`.
    ///
    /// The clone is made before `self` is touched, so if cloning panics
    /// `self` keeps its previous value.
    fn clone_from(&mut self, source: &Self) {
        let mut next = source.clone();
        self.swap(&mut next);
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}
