use derive_more::{Display, Error};

/// Error returned when a checked extraction asks an [`Any`](crate::Any) for a
/// type other than the one it holds.
///
/// The error only identifies the mismatch: the type that was requested and
/// the type that was actually held (`anyhold::markers::NoType` when the
/// container was empty). It implements [`core::error::Error`], so it can be
/// propagated with `?` into any error type that accepts standard errors.
///
/// # Examples
///
/// ```
/// use anyhold::{Any, BadAnyCast};
///
/// let any = Any::new(1_u8);
/// let err: BadAnyCast = any.downcast_ref::<u16>().unwrap_err();
/// assert_eq!(err.requested(), "u16");
/// assert_eq!(err.held(), "u8");
/// assert_eq!(err.to_string(), "bad any cast: requested `u16` but `u8` is held");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, Error)]
#[display("bad any cast: requested `{requested}` but `{held}` is held")]
pub struct BadAnyCast {
    requested: &'static str,
    held: &'static str,
}

impl BadAnyCast {
    /// Creates the error for a request of `T` against a container holding a
    /// value of the type named `held`.
    #[must_use]
    pub(crate) fn new<T: 'static>(held: &'static str) -> Self {
        let requested = core::any::type_name::<T>();
        debug_event!(requested, held, "bad any cast");
        Self { requested, held }
    }

    /// Name of the type the caller asked for.
    #[must_use]
    pub fn requested(&self) -> &'static str {
        self.requested
    }

    /// Name of the type the container held at the time of the request.
    #[must_use]
    pub fn held(&self) -> &'static str {
        self.held
    }
}
