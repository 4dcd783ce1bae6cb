#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A cloneable, type-erased container for exactly one value of any type.
//!
//! ## Overview
//!
//! [`Any`] owns zero or one value of any `Clone + 'static` type. Unlike
//! `Box<dyn core::any::Any>`, an [`Any`] can itself be cloned: the concrete
//! type's `Clone` implementation is captured when the value is stored, and
//! every later copy or drop dispatches through it without naming the type
//! again.
//!
//! ```
//! use anyhold::prelude::*;
//!
//! let mut x = Any::empty();
//! assert!(!x.has_value());
//!
//! x.set(42_i32);
//! assert!(x.has_value());
//! assert_eq!(any_cast::<i32>(&x), Ok(42));
//! assert!(any_cast::<f64>(&x).is_err());
//! ```
//!
//! ## Storing values
//!
//! - [`Any::new`] moves a value in.
//! - [`Any::in_place`], [`Any::in_place_with`] and [`Any::in_place_from_iter`]
//!   build the value directly inside the container's allocation. They take an
//!   [`InPlaceType`] tag naming the target type.
//! - [`Any::emplace`] and friends replace whatever is currently held and hand
//!   back a mutable reference to the new value.
//! - [`Any::set`] and [`Clone::clone_from`] build the new value first and only
//!   then swap it in, so a panicking constructor leaves the old value alone.
//!
//! ## Getting values out
//!
//! Every checked accessor compares the requested type against the held one
//! and returns [`BadAnyCast`] on mismatch:
//!
//! | access          | method                     | free function         |
//! |-----------------|----------------------------|-----------------------|
//! | cloned copy     | [`Any::downcast_cloned`]   | [`any_cast`]          |
//! | shared borrow   | [`Any::downcast_ref`]      | [`any_cast_ref`]      |
//! | exclusive borrow| [`Any::downcast_mut`]      | [`any_cast_mut`]      |
//! | move out        | [`Any::downcast_take`]     | [`any_cast_take`]     |
//!
//! The unchecked variants ([`Any::downcast_ref_unchecked`],
//! [`any_cast_unchecked`], ...) are `unsafe` and skip the comparison.
//!
//! ## Placement tags
//!
//! The [`in_place`] module provides the zero-sized [`InPlace`],
//! [`InPlaceType`] and [`InPlaceIndex`] markers. They carry no data and exist
//! only to make a constructor's intent explicit at the call site.
//!
//! ## Features
//!
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events for failed
//!   casts (`debug`) and for clones, emplacements and resets (`trace`).
//!
//! For implementation details, see the [`anyhold-internals`] crate.
//!
//! [`anyhold-internals`]: anyhold_internals
//! [`InPlace`]: in_place::InPlace
//! [`InPlaceType`]: in_place::InPlaceType
//! [`InPlaceIndex`]: in_place::InPlaceIndex

extern crate alloc;

#[macro_use]
mod trace;

mod any;
pub mod cast;
mod error;
pub mod in_place;
pub mod markers;
pub mod prelude;

pub use self::{
    any::Any,
    cast::{
        any_cast, any_cast_mut, any_cast_ref, any_cast_take, any_cast_unchecked,
        any_cast_unchecked_mut,
    },
    error::BadAnyCast,
};
