#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`anyhold`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased storage behind the
//! [`anyhold::Any`] container. A stored value lives in a single heap
//! allocation next to a `&'static` vtable that was generated for its concrete
//! type, so the owner can clone and drop it without naming the type again.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`anyhold`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`value`]**: Type-erased value storage
//!   - [`RawValue`]: Owned value with [`Box`]-based allocation
//!   - [`RawValueRef`]: Shared borrow of a stored value
//!   - [`RawValueMut`]: Exclusive borrow of a stored value
//!   - [`ValueData`]: `#[repr(C)]` wrapper enabling field access on erased types
//!   - [`ValueVtable`]: Function pointers for type-erased dispatch
//!
//! # Safety Strategy
//!
//! When a `ValueData<T>` is erased to `ValueData<Erased>`, the vtable stored
//! in its first field must keep matching the `T` actually living in memory.
//! This holds because:
//!
//! - **Module-based encapsulation**: the fields of [`ValueData`] and the
//!   pointers inside [`RawValue`] are private to a single file each, so the
//!   invariants can be checked locally
//! - **`#[repr(C)]` layout**: the vtable sits at offset zero, so it can be
//!   read through an erased pointer without materialising a reference of the
//!   wrong type
//! - **Documented vtable contracts**: every vtable method states exactly when
//!   it may be called
//!
//! [`anyhold`]: https://docs.rs/anyhold/latest/anyhold/
//! [`anyhold::Any`]: https://docs.rs/anyhold/latest/anyhold/struct.Any.html
//! [`ValueData`]: value::data::ValueData
//! [`ValueVtable`]: value::vtable::ValueVtable
//! [`Box`]: alloc::boxed::Box

extern crate alloc;

mod util;
mod value;

pub use value::{RawValue, RawValueMut, RawValueRef};
