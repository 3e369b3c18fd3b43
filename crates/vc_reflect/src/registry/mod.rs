//! Type registry for member lookup.
//!
//! ## Menu
//!
//! - [`TypeMeta`]: the members and optional base of one type.
//! - [`GetTypeMeta`]: builds the `TypeMeta` of a type.
//! - [`TypeRegistry`]: stores `TypeMeta`s and answers hierarchy and member queries.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`] and [`auto_register!`](crate::auto_register).
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//!
//! If it is not supported, [`TypeRegistry::auto_register`] returns
//! `false` without causing any errors.
//!
//! ### Built-in registrations
//!
//! [`TypeRegistry::new`] registers:
//!
//! - `()` `bool` `char` `f32` `f64`
//! - `i8` `i16` `i32` `i64` `i128` `isize`
//! - `u8` `u16` `u32` `u64` `u128` `usize`
//! - `String`
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
