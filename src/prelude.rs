//! Commonly used items, for glob import.
//!
//! ```
//! use anyhold::prelude::*;
//!
//! let any = Any::in_place(in_place_type::<String>(), "x");
//! assert_eq!(any_cast_ref::<String>(&any).unwrap(), "x");
//! ```

pub use crate::{
    Any, BadAnyCast, any_cast, any_cast_mut, any_cast_ref, any_cast_take,
    in_place::{IN_PLACE, InPlace, InPlaceIndex, InPlaceType, in_place_index, in_place_type},
};
